pub mod config;
pub mod recording;
pub mod util;

pub use config::Config;
pub use recording::{
    CloudRecorder, CredentialProvider, HttpTransport, RecorderSettings, RecordingError,
    RecordingMode, RecordingSession, StaticCredentials, UserCredentials,
};
pub use util::first_n;
