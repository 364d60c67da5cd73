//! Cloud recording REST client
//!
//! This module provides the `CloudRecorder` that drives a recording through
//! the service's lifecycle:
//! - acquire: reserve a recording resource for a channel
//! - start: begin recording into the configured storage bucket
//! - change_recording_mode: switch the mixed-video layout
//! - stop: end the recording and release the resource
//!
//! Requests go through an `HttpTransport` and channel credentials come from a
//! `CredentialProvider`, so both can be swapped out in tests.

mod client;
mod credentials;
mod error;
pub mod messages;
mod session;
mod settings;
mod transport;

pub use client::CloudRecorder;
pub use credentials::{CredentialProvider, StaticCredentials, UserCredentials};
pub use error::{RecordingError, Result};
pub use session::RecordingSession;
pub use settings::{
    Clock, RecorderSettings, RecordingMode, StorageSettings, SystemClock, DEFAULT_API_BASE,
};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
