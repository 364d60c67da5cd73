use anyhow::Result;

/// Token and numeric identity the recorder joins the channel with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    pub uid: u32,
    pub rtc_token: String,
}

/// Source of channel credentials for the recording bot
///
/// Token generation lives outside this crate; implement this to plug it in.
pub trait CredentialProvider: Send + Sync {
    fn generate(&self, channel: &str, is_host: bool, is_pstn: bool) -> Result<UserCredentials>;
}

/// Hands out the same pre-issued credentials for every channel
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    credentials: UserCredentials,
}

impl StaticCredentials {
    pub fn new(uid: u32, rtc_token: impl Into<String>) -> Self {
        Self {
            credentials: UserCredentials {
                uid,
                rtc_token: rtc_token.into(),
            },
        }
    }
}

impl CredentialProvider for StaticCredentials {
    fn generate(&self, _channel: &str, _is_host: bool, _is_pstn: bool) -> Result<UserCredentials> {
        Ok(self.credentials.clone())
    }
}
