use crate::recording::{
    RecorderSettings, RecordingMode, StaticCredentials, StorageSettings, DEFAULT_API_BASE,
};
use anyhow::{bail, Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;
use std::time::Duration;

/// Prefix for environment overrides, e.g. `RECORDER_AGORA__APP_ID`
pub const ENV_PREFIX: &str = "RECORDER";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub agora: AgoraConfig,
    pub recording: RecordingConfig,
    #[serde(default)]
    pub credentials: Option<CredentialsConfig>,
}

#[derive(Debug, Deserialize)]
pub struct AgoraConfig {
    pub app_id: String,
    pub customer_id: String,
    pub customer_certificate: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct RecordingConfig {
    #[serde(default = "default_mode")]
    pub mode: String,
    pub vendor: u32,
    pub region: u32,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
    #[serde(default = "default_subscribe_group")]
    pub subscribe_group: u32,
    #[serde(default = "default_resource_expired_hour")]
    pub resource_expired_hour: u32,
}

/// Pre-issued recorder credentials, for running without a token service
#[derive(Debug, Deserialize)]
pub struct CredentialsConfig {
    pub uid: u32,
    pub rtc_token: String,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_mode() -> String {
    "mix".to_string()
}

fn default_time_zone() -> String {
    "America/Los_Angeles".to_string()
}

fn default_subscribe_group() -> u32 {
    3
}

fn default_resource_expired_hour() -> u32 {
    24
}

impl Config {
    /// Load from an optional file, then `RECORDER_*` environment variables
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path))?;

        settings
            .try_deserialize()
            .context("Invalid recorder configuration")
    }

    /// Validate and convert into the value passed to `CloudRecorder`
    pub fn recorder_settings(&self) -> Result<RecorderSettings> {
        if self.agora.app_id.is_empty() {
            bail!("agora.app_id must be set");
        }

        let time_zone: Tz = self
            .recording
            .time_zone
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid recording.time_zone: {}", e))?;

        Ok(RecorderSettings {
            app_id: self.agora.app_id.clone(),
            customer_id: self.agora.customer_id.clone(),
            customer_certificate: self.agora.customer_certificate.clone(),
            api_base: self.agora.api_base.clone(),
            request_timeout: self.agora.request_timeout_secs.map(Duration::from_secs),
            mode: RecordingMode::parse(&self.recording.mode),
            storage: StorageSettings {
                vendor: self.recording.vendor,
                region: self.recording.region,
                bucket: self.recording.bucket.clone(),
                access_key: self.recording.access_key.clone(),
                secret_key: self.recording.secret_key.clone(),
            },
            time_zone,
            subscribe_group: self.recording.subscribe_group,
            resource_expired_hour: self.recording.resource_expired_hour,
        })
    }

    /// Static credentials from the `credentials` section, if configured
    pub fn static_credentials(&self) -> Option<StaticCredentials> {
        self.credentials
            .as_ref()
            .map(|c| StaticCredentials::new(c.uid, c.rtc_token.clone()))
    }
}
