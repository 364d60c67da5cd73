use super::credentials::CredentialProvider;
use super::error::{RecordingError, Result};
use super::messages::{
    redacted, AcquireClientRequest, AcquireRequest, AcquireResponse, RecordingConfig,
    RecordingFileConfig, StartClientRequest, StartRecordRequest, StartResponse, StopResponse,
    StorageConfig, TranscodingConfig, UpdateLayoutRequest, UpdateLayoutResponse,
};
use super::session::RecordingSession;
use super::settings::{Clock, RecorderSettings, SystemClock};
use super::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::util::first_n;
use base64::Engine;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

const MAX_IDLE_TIME_SECS: u32 = 30;
/// Audio and video
const STREAM_TYPES: u32 = 2;
/// Live broadcast
const CHANNEL_TYPE: u32 = 1;
const DECRYPTION_MODE: u32 = 1;

/// Client for the cloud recording REST API
///
/// Issues one request per call and trusts the server for lifecycle ordering:
/// acquire, then start, then any number of layout changes, then stop.
pub struct CloudRecorder {
    settings: RecorderSettings,
    transport: Arc<dyn HttpTransport>,
    credentials: Arc<dyn CredentialProvider>,
    clock: Arc<dyn Clock>,
}

impl CloudRecorder {
    pub fn new(
        settings: RecorderSettings,
        transport: Arc<dyn HttpTransport>,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            settings,
            transport,
            credentials,
            clock: Arc::new(SystemClock),
        }
    }

    /// Recorder backed by a `reqwest` transport
    pub fn connect(
        settings: RecorderSettings,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self> {
        let transport = ReqwestTransport::new(settings.request_timeout)?;
        Ok(Self::new(settings, Arc::new(transport), credentials))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Reserve a recording resource for the session's channel
    ///
    /// Stores the generated uid and token and the returned resource id on the
    /// session.
    pub async fn acquire(&self, session: &mut RecordingSession) -> Result<()> {
        let creds = self
            .credentials
            .generate(&session.channel, false, false)
            .map_err(|source| RecordingError::Credentials {
                channel: session.channel.clone(),
                source,
            })?;

        session.uid = creds.uid;
        session.token = creds.rtc_token;

        debug!(
            channel = %session.channel,
            uid = session.uid,
            token = %first_n(&session.token, 8),
            "Generated recorder credentials"
        );

        let request = AcquireRequest {
            cname: session.channel.clone(),
            uid: session.uid.to_string(),
            client_request: AcquireClientRequest {
                resource_expired_hour: Some(self.settings.resource_expired_hour),
            },
        };

        let url = format!("{}/acquire", self.base_url());
        let (status, response): (u16, AcquireResponse) =
            self.post("acquire", url, &request).await?;

        debug!(status, ?response, "Acquire result");

        session.resource_id = response.resource_id.ok_or_else(|| {
            let reason = response.reason.or(response.message);
            missing_field("acquire", "resourceId", status, reason)
        })?;

        info!(
            channel = %session.channel,
            rid = %session.resource_id,
            "Acquired recording resource"
        );

        Ok(())
    }

    /// Start recording into the configured bucket
    ///
    /// Files are prefixed `[title, YYYYMMDD, HHMMSS]`. A non-empty `secret`
    /// enables decryption of an encrypted channel.
    pub async fn start(
        &self,
        session: &mut RecordingSession,
        title: &str,
        secret: Option<&str>,
    ) -> Result<()> {
        let request = self.start_request(session, title, secret);

        info!(
            channel = %session.channel,
            mode = %self.settings.mode,
            request = %redacted(&request),
            "Recording request"
        );

        let url = format!(
            "{}/resourceid/{}/mode/{}/start",
            self.base_url(),
            session.resource_id,
            self.settings.mode
        );
        let (status, response): (u16, StartResponse) = self.post("start", url, &request).await?;

        debug!(status, ?response, "Start result");

        session.sid = response.sid.ok_or_else(|| {
            let reason = response.reason.or(response.message);
            missing_field("start", "sid", status, reason)
        })?;

        info!(
            channel = %session.channel,
            rid = %session.resource_id,
            sid = %session.sid,
            "Recording started"
        );

        Ok(())
    }

    /// Switch the mixed-video layout of a running recording
    ///
    /// Individual recordings have no composite output, so this returns
    /// immediately without contacting the service.
    pub async fn change_recording_mode(
        &self,
        session: &RecordingSession,
        mixed_video_layout: u32,
        max_resolution_uid: &str,
    ) -> Result<()> {
        if self.settings.mode.is_individual() {
            debug!(channel = %session.channel, "Individual recording, layout unchanged");
            return Ok(());
        }

        let request = UpdateLayoutRequest {
            cname: session.channel.clone(),
            uid: session.uid.to_string(),
            client_request: TranscodingConfig {
                mixed_video_layout,
                max_resolution_uid: Some(max_resolution_uid)
                    .filter(|uid| !uid.is_empty())
                    .map(str::to_string),
                ..Default::default()
            },
        };

        info!(request = %redacted(&request), "Change Recording Mode");

        let url = format!(
            "{}/resourceid/{}/sid/{}/mode/mix/updateLayout",
            self.base_url(),
            session.resource_id,
            session.sid
        );
        let (status, response): (u16, UpdateLayoutResponse) =
            self.post("updateLayout", url, &request).await?;

        info!(status, ?response, "Update Cloud Recording Response");

        Ok(())
    }

    /// Stop the recording and release the resource
    pub async fn stop(&self, session: &RecordingSession) -> Result<StopResponse> {
        let request = AcquireRequest {
            cname: session.channel.clone(),
            uid: session.uid.to_string(),
            client_request: AcquireClientRequest::default(),
        };

        info!(request = %redacted(&request), "Stop Recording Request");

        let url = format!(
            "{}/resourceid/{}/sid/{}/mode/{}/stop",
            self.base_url(),
            session.resource_id,
            session.sid,
            self.settings.mode
        );
        let (status, response): (u16, StopResponse) = self.post("stop", url, &request).await?;

        info!(status, ?response, "Stop Cloud Recording Response");

        Ok(response)
    }

    fn start_request(
        &self,
        session: &RecordingSession,
        title: &str,
        secret: Option<&str>,
    ) -> StartRecordRequest {
        let now = self.clock.now().with_timezone(&self.settings.time_zone);
        let current_date = now.format("%Y%m%d").to_string();
        let current_time = now.format("%H%M%S").to_string();

        let (transcoding_config, subscribe_group, av_file_type) =
            if self.settings.mode.is_individual() {
                (None, Some(self.settings.subscribe_group), vec!["hls"])
            } else {
                (Some(TranscodingConfig::hd_720p()), None, vec!["hls", "mp4"])
            };

        let secret = secret.filter(|s| !s.is_empty());

        let storage = &self.settings.storage;

        StartRecordRequest {
            cname: session.channel.clone(),
            uid: session.uid.to_string(),
            client_request: StartClientRequest {
                token: session.token.clone(),
                recording_config: RecordingConfig {
                    max_idle_time: MAX_IDLE_TIME_SECS,
                    stream_types: STREAM_TYPES,
                    channel_type: CHANNEL_TYPE,
                    decryption_mode: secret.map(|_| DECRYPTION_MODE),
                    secret: secret.map(str::to_string),
                    transcoding_config,
                    subscribe_group,
                },
                recording_file_config: RecordingFileConfig {
                    av_file_type: av_file_type.into_iter().map(String::from).collect(),
                },
                storage_config: StorageConfig {
                    vendor: storage.vendor,
                    region: storage.region,
                    bucket: storage.bucket.clone(),
                    access_key: storage.access_key.clone(),
                    secret_key: storage.secret_key.clone(),
                    file_name_prefix: vec![title.to_string(), current_date, current_time],
                },
            },
        }
    }

    fn base_url(&self) -> String {
        format!(
            "{}/v1/apps/{}/cloud_recording",
            self.settings.api_base.trim_end_matches('/'),
            self.settings.app_id
        )
    }

    fn authorization(&self) -> String {
        let credentials = format!(
            "{}:{}",
            self.settings.customer_id, self.settings.customer_certificate
        );
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(credentials)
        )
    }

    /// POST a JSON body and decode the JSON response
    ///
    /// The HTTP status is returned alongside the body but does not decide
    /// success; any body that decodes counts as a result.
    async fn post<B, R>(&self, endpoint: &'static str, url: String, body: &B) -> Result<(u16, R)>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let body = serde_json::to_vec(body).map_err(RecordingError::Encode)?;

        let request = HttpRequest {
            method: Method::POST,
            url,
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("Authorization".to_string(), self.authorization()),
            ],
            body,
        };

        let response = self.transport.execute(request).await?;

        if !response.is_success() {
            warn!(
                endpoint,
                status = response.status,
                "Cloud recording returned an error status"
            );
        }

        Ok((response.status, decode(endpoint, &response)?))
    }
}

fn decode<R: DeserializeOwned>(endpoint: &'static str, response: &HttpResponse) -> Result<R> {
    serde_json::from_slice(&response.body)
        .map_err(|source| RecordingError::Decode { endpoint, source })
}

fn missing_field(
    endpoint: &'static str,
    field: &'static str,
    status: u16,
    reason: Option<String>,
) -> RecordingError {
    RecordingError::MissingField {
        endpoint,
        field,
        status,
        reason,
    }
}
