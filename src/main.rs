//! IO Routing - interactive session
//!
//! Drives one routing device against an in-memory Live set loaded from a
//! session file. Messages typed at the prompt play the role of the menus;
//! edits to the session file play the role of the host changing under us.

use anyhow::Result;
use clap::Parser;
use colored::*;
use io_routing::config::ConfigWatcher;
use io_routing::host::MemoryHost;
use io_routing::ui::ConsoleUi;
use io_routing::{deliver_pending, Command, RoutingDevice};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

/// Audio/MIDI routing menus for a device in a Live set
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the session file
    #[arg(short, long, env = "IO_ROUTING_SESSION", default_value = "session.yaml")]
    session: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Device arguments: ioType [channelOffset]; overrides the session's device.args
    #[arg(trailing_var_arg = true)]
    device_args: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging(&args.log_level)?;

    info!("Starting IO Routing...");
    info!("Session file: {}", args.session);

    let (watcher, session) = ConfigWatcher::new(args.session.clone()).await?;

    let device_args = if args.device_args.is_empty() {
        session.device.args.clone()
    } else {
        args.device_args.clone()
    };
    let device = RoutingDevice::new(device_args);
    let host = MemoryHost::from_session(&session);
    info!("Device at {} loaded", host.device_path());

    println!(
        "{}",
        "Messages: init | settype <n> | setchannel <n> | routethistrack [1] | quit".dimmed()
    );

    run_app(device, host, watcher, shutdown_signal()).await?;

    info!("IO Routing shutdown complete");
    Ok(())
}

async fn run_app(
    mut device: RoutingDevice,
    mut host: MemoryHost,
    mut watcher: ConfigWatcher,
    shutdown: impl std::future::Future<Output = ()>,
) -> Result<()> {
    let mut ui = ConsoleUi;
    let mut commands = cli::spawn_repl();

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = commands.recv() => {
                let Some(line) = line else {
                    info!("Input closed");
                    break;
                };
                match Command::parse(&line) {
                    Ok(Some(command)) => {
                        if let Err(e) = device.dispatch(&mut host, &command) {
                            error!("{}", e);
                        }
                    }
                    Ok(None) => {}
                    Err(e) => error!("{}", e),
                }
            }

            Some(session) = watcher.next_session() => {
                info!("📝 Session changed, applying to the live set");
                host.apply_session(&session);
            }

            _ = &mut shutdown => {
                info!("Shutdown signal received, stopping event loop");
                break;
            }
        }

        let delivered = deliver_pending(&device, &mut host, &mut ui);
        if delivered > 0 {
            debug!("Delivered {} notifications", delivered);
        }
    }

    Ok(())
}

fn init_logging(level: &str) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false),
        )
        .init();

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
