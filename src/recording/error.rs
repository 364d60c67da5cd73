use thiserror::Error;

/// Errors returned by the cloud recording client
#[derive(Error, Debug)]
pub enum RecordingError {
    #[error("Failed to generate credentials for channel {channel}: {source}")]
    Credentials {
        channel: String,
        source: anyhow::Error,
    },

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("Transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        source: serde_json::Error,
    },

    #[error("{endpoint} response (HTTP {status}) has no {field}{}", reason_suffix(.reason))]
    MissingField {
        endpoint: &'static str,
        field: &'static str,
        status: u16,
        reason: Option<String>,
    },
}

fn reason_suffix(reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!(": {}", reason),
        None => String::new(),
    }
}

pub type Result<T> = std::result::Result<T, RecordingError>;
