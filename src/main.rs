use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use cloud_recorder::{CloudRecorder, Config, CredentialProvider, RecordingSession};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cloud-recorder")]
#[command(about = "Drive Agora cloud recordings from the command line")]
struct Args {
    /// Configuration file (RECORDER_* environment variables override it)
    #[arg(short, long, default_value = "config/cloud-recorder")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Acquire, start, wait for Ctrl-C, then stop
    Run {
        #[arg(long)]
        channel: String,
        /// Channel title used as the file name prefix
        #[arg(long)]
        title: String,
        /// Channel encryption secret
        #[arg(long)]
        secret: Option<String>,
    },

    /// Reserve a recording resource and print its id
    Acquire {
        #[arg(long)]
        channel: String,
    },

    /// Start recording with a previously acquired resource
    Start {
        #[arg(long)]
        channel: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        uid: u32,
        #[arg(long)]
        token: String,
        #[arg(long)]
        rid: String,
        #[arg(long)]
        secret: Option<String>,
    },

    /// Change the mixed-video layout of a running recording
    UpdateLayout {
        #[arg(long)]
        channel: String,
        #[arg(long)]
        uid: u32,
        #[arg(long)]
        rid: String,
        #[arg(long)]
        sid: String,
        #[arg(long)]
        layout: u32,
        #[arg(long, default_value = "")]
        max_resolution_uid: String,
    },

    /// Stop a running recording
    Stop {
        #[arg(long)]
        channel: String,
        #[arg(long)]
        uid: u32,
        #[arg(long)]
        rid: String,
        #[arg(long)]
        sid: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let cfg = Config::load(&args.config)?;
    let settings = cfg.recorder_settings()?;

    info!("Cloud recorder v{}", env!("CARGO_PKG_VERSION"));
    info!("App: {} (mode: {})", settings.app_id, settings.mode);

    let credentials: Arc<dyn CredentialProvider> = match cfg.static_credentials() {
        Some(creds) => Arc::new(creds),
        None => Arc::new(MissingCredentials),
    };

    let recorder = CloudRecorder::connect(settings, credentials)
        .context("Failed to create recording client")?;

    match args.command {
        Command::Run {
            channel,
            title,
            secret,
        } => {
            let mut session = RecordingSession::new(channel);

            recorder.acquire(&mut session).await?;
            recorder
                .start(&mut session, &title, secret.as_deref())
                .await?;

            info!(
                "Recording {} (rid={}, sid={}); press Ctrl-C to stop",
                session.channel(),
                session.resource_id(),
                session.sid()
            );

            tokio::signal::ctrl_c()
                .await
                .context("Failed to listen for Ctrl-C")?;

            recorder.stop(&session).await?;
            info!("Recording stopped");
        }

        Command::Acquire { channel } => {
            let mut session = RecordingSession::new(channel);
            recorder.acquire(&mut session).await?;

            println!("uid={}", session.uid());
            println!("rid={}", session.resource_id());
        }

        Command::Start {
            channel,
            title,
            uid,
            token,
            rid,
            secret,
        } => {
            let mut session = RecordingSession::resume(channel, uid, rid, "").with_token(token);
            recorder
                .start(&mut session, &title, secret.as_deref())
                .await?;

            println!("sid={}", session.sid());
        }

        Command::UpdateLayout {
            channel,
            uid,
            rid,
            sid,
            layout,
            max_resolution_uid,
        } => {
            let session = RecordingSession::resume(channel, uid, rid, sid);
            recorder
                .change_recording_mode(&session, layout, &max_resolution_uid)
                .await?;
        }

        Command::Stop {
            channel,
            uid,
            rid,
            sid,
        } => {
            let session = RecordingSession::resume(channel, uid, rid, sid);
            let response = recorder.stop(&session).await?;

            if let Some(server_response) = response.server_response {
                println!("{}", serde_json::to_string_pretty(&server_response)?);
            }
        }
    }

    Ok(())
}

/// Used when no `credentials` section is configured
struct MissingCredentials;

impl CredentialProvider for MissingCredentials {
    fn generate(
        &self,
        _channel: &str,
        _is_host: bool,
        _is_pstn: bool,
    ) -> Result<cloud_recorder::UserCredentials> {
        anyhow::bail!(
            "No recorder credentials configured; set credentials.uid and credentials.rtc_token"
        )
    }
}
