use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Request Types
// ============================================================================

/// Body of the acquire request, also sent (with an empty client request) to stop
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquireRequest {
    pub cname: String,
    pub uid: String,
    pub client_request: AcquireClientRequest,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquireClientRequest {
    /// Hours the resource stays valid; omitted when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_expired_hour: Option<u32>,
}

/// Body of the start request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartRecordRequest {
    pub cname: String,
    pub uid: String,
    pub client_request: StartClientRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartClientRequest {
    pub token: String,
    pub recording_config: RecordingConfig,
    pub recording_file_config: RecordingFileConfig,
    pub storage_config: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordingConfig {
    pub max_idle_time: u32,
    pub stream_types: u32,
    pub channel_type: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decryption_mode: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcoding_config: Option<TranscodingConfig>,
    #[serde(rename = "subscribeUidGroup", skip_serializing_if = "Option::is_none")]
    pub subscribe_group: Option<u32>,
}

/// Mixed-video output parameters
///
/// Also used on its own as the client request of a layout update, where only
/// `mixed_video_layout` and `max_resolution_uid` are set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranscodingConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fps: Option<u32>,
    pub mixed_video_layout: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_resolution_uid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl TranscodingConfig {
    /// 1280x720 at 15 fps, 2260 Kbps, best-fit layout on black
    pub fn hd_720p() -> Self {
        Self {
            height: Some(720),
            width: Some(1280),
            bitrate: Some(2260),
            fps: Some(15),
            mixed_video_layout: 1,
            max_resolution_uid: None,
            background_color: Some("#000000".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    pub vendor: u32,
    pub region: u32,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
    pub file_name_prefix: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordingFileConfig {
    #[serde(rename = "avFileType")]
    pub av_file_type: Vec<String>,
}

/// Body of the updateLayout request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLayoutRequest {
    pub cname: String,
    pub uid: String,
    pub client_request: TranscodingConfig,
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquireResponse {
    pub resource_id: Option<String>,
    /// Error code, present on failed requests
    pub code: Option<i64>,
    pub reason: Option<String>,
    /// Gateway-level failures (e.g. bad credentials) carry this instead of `reason`
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartResponse {
    pub resource_id: Option<String>,
    pub sid: Option<String>,
    pub code: Option<i64>,
    pub reason: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLayoutResponse {
    pub resource_id: Option<String>,
    pub sid: Option<String>,
    pub code: Option<i64>,
    pub reason: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StopResponse {
    pub resource_id: Option<String>,
    pub sid: Option<String>,
    /// Upload status and file list, shape depends on the recording mode
    pub server_response: Option<Value>,
    pub code: Option<i64>,
    pub reason: Option<String>,
    pub message: Option<String>,
}

const REDACTED_KEYS: &[&str] = &["accessKey", "secretKey", "token", "secret"];

/// Serialize a request for logging with credentials masked
pub fn redacted<T: Serialize>(request: &T) -> Value {
    let mut value = serde_json::to_value(request).unwrap_or(Value::Null);
    redact(&mut value);
    value
}

fn redact(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, field) in map.iter_mut() {
                if REDACTED_KEYS.contains(&key.as_str()) {
                    *field = Value::String("***".to_string());
                } else {
                    redact(field);
                }
            }
        }
        Value::Array(items) => items.iter_mut().for_each(redact),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_acquire_request_field_names() {
        let req = AcquireRequest {
            cname: "standup".to_string(),
            uid: "42".to_string(),
            client_request: AcquireClientRequest {
                resource_expired_hour: Some(24),
            },
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "cname": "standup",
                "uid": "42",
                "clientRequest": { "resourceExpiredHour": 24 }
            })
        );
    }

    #[test]
    fn test_empty_client_request_serializes_as_empty_object() {
        let req = AcquireRequest {
            cname: "standup".to_string(),
            uid: "42".to_string(),
            client_request: AcquireClientRequest::default(),
        };

        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"clientRequest\":{}"));
    }

    #[test]
    fn test_update_layout_omits_transcoding_fields() {
        let req = UpdateLayoutRequest {
            cname: "standup".to_string(),
            uid: "42".to_string(),
            client_request: TranscodingConfig {
                mixed_video_layout: 2,
                max_resolution_uid: Some("7".to_string()),
                ..Default::default()
            },
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value["clientRequest"],
            json!({ "mixedVideoLayout": 2, "maxResolutionUid": "7" })
        );
    }

    #[test]
    fn test_hd_profile() {
        let value = serde_json::to_value(TranscodingConfig::hd_720p()).unwrap();
        assert_eq!(
            value,
            json!({
                "height": 720,
                "width": 1280,
                "bitrate": 2260,
                "fps": 15,
                "mixedVideoLayout": 1,
                "backgroundColor": "#000000"
            })
        );
    }

    #[test]
    fn test_response_ignores_unknown_fields() {
        let resp: StartResponse = serde_json::from_str(
            r#"{"resourceId":"R1","sid":"S1","extra":{"nested":true}}"#,
        )
        .unwrap();
        assert_eq!(resp.resource_id.as_deref(), Some("R1"));
        assert_eq!(resp.sid.as_deref(), Some("S1"));
        assert!(resp.code.is_none());
    }

    #[test]
    fn test_error_response_decodes() {
        let resp: AcquireResponse =
            serde_json::from_str(r#"{"code":2,"reason":"invalid appid"}"#).unwrap();
        assert!(resp.resource_id.is_none());
        assert_eq!(resp.code, Some(2));
        assert_eq!(resp.reason.as_deref(), Some("invalid appid"));
    }

    #[test]
    fn test_redacted_masks_credentials() {
        let value = redacted(&json!({
            "cname": "standup",
            "clientRequest": {
                "token": "abc",
                "recordingConfig": { "secret": "s3cr3t", "maxIdleTime": 30 },
                "storageConfig": { "accessKey": "AK", "secretKey": "SK", "bucket": "b" }
            }
        }));

        assert_eq!(value["cname"], "standup");
        assert_eq!(value["clientRequest"]["token"], "***");
        assert_eq!(value["clientRequest"]["recordingConfig"]["secret"], "***");
        assert_eq!(value["clientRequest"]["recordingConfig"]["maxIdleTime"], 30);
        assert_eq!(value["clientRequest"]["storageConfig"]["accessKey"], "***");
        assert_eq!(value["clientRequest"]["storageConfig"]["secretKey"], "***");
        assert_eq!(value["clientRequest"]["storageConfig"]["bucket"], "b");
    }
}
