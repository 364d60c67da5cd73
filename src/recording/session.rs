/// Caller-held state for one cloud recording
///
/// `acquire` fills in the uid, token and resource id; `start` fills in the
/// session id. Update and stop read both ids back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSession {
    pub(crate) channel: String,
    pub(crate) uid: u32,
    pub(crate) token: String,
    pub(crate) resource_id: String,
    pub(crate) sid: String,
}

impl RecordingSession {
    /// Fresh session for a channel, before acquire
    pub fn new(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            ..Default::default()
        }
    }

    /// Rebuild a session from ids issued earlier (e.g. by another process)
    pub fn resume(
        channel: impl Into<String>,
        uid: u32,
        resource_id: impl Into<String>,
        sid: impl Into<String>,
    ) -> Self {
        Self {
            channel: channel.into(),
            uid,
            token: String::new(),
            resource_id: resource_id.into(),
            sid: sid.into(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = token.into();
        self
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn uid(&self) -> u32 {
        self.uid
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn resource_id(&self) -> &str {
        &self.resource_id
    }

    pub fn sid(&self) -> &str {
        &self.sid
    }
}
