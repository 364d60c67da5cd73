use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::fmt;
use std::time::Duration;

/// Default API host
pub const DEFAULT_API_BASE: &str = "https://api.agora.io";

/// How the recording service captures the channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordingMode {
    /// One output per participant
    Individual,
    /// Single composited output; holds the mode string used in request paths
    Mix(String),
}

impl RecordingMode {
    pub fn parse(mode: &str) -> Self {
        if mode == "individual" {
            Self::Individual
        } else {
            Self::Mix(mode.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Individual => "individual",
            Self::Mix(mode) => mode,
        }
    }

    pub fn is_individual(&self) -> bool {
        matches!(self, Self::Individual)
    }
}

impl Default for RecordingMode {
    fn default() -> Self {
        Self::Mix("mix".to_string())
    }
}

impl fmt::Display for RecordingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Third-party bucket the recorded files are uploaded to
#[derive(Debug, Clone, Default)]
pub struct StorageSettings {
    pub vendor: u32,
    pub region: u32,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
}

/// Everything the recorder needs from configuration
#[derive(Debug, Clone)]
pub struct RecorderSettings {
    pub app_id: String,
    pub customer_id: String,
    pub customer_certificate: String,

    /// Scheme and host of the REST API, without a trailing path
    pub api_base: String,

    /// Per-request timeout; `None` keeps the HTTP client default
    pub request_timeout: Option<Duration>,

    pub mode: RecordingMode,
    pub storage: StorageSettings,

    /// Zone the file name prefix date and time are rendered in
    pub time_zone: Tz,

    /// Subscribe group size used in individual mode
    pub subscribe_group: u32,

    pub resource_expired_hour: u32,
}

impl Default for RecorderSettings {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            customer_id: String::new(),
            customer_certificate: String::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout: None,
            mode: RecordingMode::default(),
            storage: StorageSettings::default(),
            time_zone: chrono_tz::America::Los_Angeles,
            subscribe_group: 3,
            resource_expired_hour: 24,
        }
    }
}

/// Source of "now" for file name prefixes
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
