//! Relay Console - Interactive A2A Relay
//!
//! Reads questions from stdin, relays each one to the remote answering agent
//! and prints the answer. Every turn is recorded to a per-session transcript.
//!
//! # Usage
//!
//! ```bash
//! # Start with defaults (http://localhost:8000, ./sessions)
//! relay-console
//!
//! # Different server and transcript directory
//! relay-console --base-url http://agents.internal:9000 --sessions-dir /var/log/relay
//!
//! # With config file
//! relay-console --config ~/.config/a2a-relay/config.toml
//!
//! # Verbose logging (stderr)
//! relay-console --verbose
//! RUST_LOG=relay_core=trace relay-console
//! ```
//!
//! # Signals
//!
//! - `SIGINT` (Ctrl+C): Ends the conversation. A running turn finishes first.

mod ui;

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tracing::{error, info};

use relay_core::{
    load_config, AgentLoop, Conductor, ConfigOverrides, InMemorySessionService, RelayAgent,
    RemoteAgentClient, Session, SessionService, TranscriptStore,
};

/// Relay Console - ask a remote agent through a local relay agent
#[derive(Parser, Debug)]
#[command(name = "relay-console")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long, env = "RELAY_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Base URL of the remote agent API server
    #[arg(long, value_name = "URL")]
    base_url: Option<String>,

    /// Application name on the remote server
    #[arg(long, value_name = "NAME")]
    app_name: Option<String>,

    /// Remote user id
    #[arg(long, value_name = "ID")]
    user_id: Option<String>,

    /// Directory for session transcripts
    #[arg(short = 's', long, value_name = "DIR")]
    sessions_dir: Option<PathBuf>,

    /// Debug logging for the relay crates
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_path: self.config.clone(),
            base_url: self.base_url.clone(),
            app_name: self.app_name.clone(),
            user_id: self.user_id.clone(),
            sessions_dir: self.sessions_dir.clone(),
        }
    }
}

/// Initialize logging on stderr
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("relay_console={level},relay_core={level}"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

async fn say(out: &mut Stdout, text: &str) -> Result<()> {
    out.write_all(text.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}

/// Drive a running turn to completion
///
/// Ctrl+C while the turn runs is remembered, not acted on, so the
/// transcript never loses a half-written entry. The flag tells the caller to
/// end the conversation afterwards.
async fn finish_turn<F: Future>(turn: F) -> (F::Output, bool) {
    tokio::pin!(turn);
    let mut interrupted = false;
    loop {
        tokio::select! {
            output = &mut turn => return (output, interrupted),
            _ = tokio::signal::ctrl_c(), if !interrupted => {
                info!("Interrupt received, finishing the running turn");
                interrupted = true;
            }
        }
    }
}

/// Read-relay-print loop
///
/// Returns when stdin is exhausted or Ctrl+C is pressed.
async fn conversation_loop<A: AgentLoop>(conductor: &Conductor<A>, session: &Session) -> Result<()> {
    let mut out = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let log_path = conductor.store().log_path(&session.id);
    say(&mut out, &ui::banner(&log_path)).await?;

    loop {
        say(&mut out, ui::PROMPT).await?;

        let line = tokio::select! {
            line = lines.next_line() => line.context("Failed to read stdin")?,
            _ = tokio::signal::ctrl_c() => None,
        };
        let Some(line) = line else {
            break;
        };

        let message = line.trim();
        if message.is_empty() {
            continue;
        }

        say(&mut out, ui::THINKING).await?;

        let (outcome, interrupted) = finish_turn(conductor.run_turn(session, message)).await;

        match outcome {
            Ok(Some(turn)) => {
                say(&mut out, &ui::answer(&turn.text)).await?;
                if let Some(stats) = conductor.stats(session).await {
                    say(&mut out, &ui::stats_line(&stats)).await?;
                }
            }
            Ok(None) => say(&mut out, &ui::no_answer()).await?,
            Err(e) => {
                error!(session_id = %session.id, error = %e, "Turn failed");
                say(&mut out, &ui::failure(&e)).await?;
            }
        }

        if interrupted {
            break;
        }
    }

    say(&mut out, ui::GOODBYE).await
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let (config, source) = load_config(&args.overrides())
        .await
        .context("Failed to load configuration")?;
    info!(
        source = ?source,
        base_url = %config.remote.base_url,
        app_name = %config.remote.app_name,
        sessions_dir = ?config.transcript.sessions_dir,
        "Configuration loaded"
    );

    let client = RemoteAgentClient::new(config.remote_config())
        .context("Failed to build remote agent client")?;
    let agent = RelayAgent::new(client).with_tool_name(config.agent.relay_tool.clone());

    let store = TranscriptStore::open(config.transcript_config())
        .await
        .context("Failed to open transcript store")?;

    let sessions = InMemorySessionService::new();
    let session = sessions
        .create_session(&config.agent.app_name, &config.agent.user_id)
        .await?;
    info!(session_id = %session.id, "Session started");

    let conductor = Conductor::new(agent, Arc::new(store), config.conductor_config());
    conversation_loop(&conductor, &session).await?;

    // The stdin reader may still be parked in a blocking read after Ctrl+C;
    // runtime shutdown would wait on it.
    std::process::exit(0)
}
