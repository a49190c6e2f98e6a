//! Lingua Server
//!
//! Serves the translation record subjects until interrupted.

use clap::Parser;
use lingua_rpc::{Dispatcher, RpcError, Transport, TransportConfig};
use lingua_server::{preload_wire_types, TranslationService};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "lingua-server")]
#[command(about = "Translation record service over publish/subscribe")]
struct Args {
    /// Transport to serve on (nats, memory); defaults to LINGUA_TRANSPORT or nats
    #[arg(short, long)]
    transport: Option<String>,

    /// NATS server URL; defaults to NATS_URL or nats://localhost:4222
    #[arg(long)]
    nats_url: Option<String>,

    /// Request timeout in milliseconds; defaults to LINGUA_REQUEST_TIMEOUT_MS or 1000
    #[arg(long)]
    request_timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

impl Args {
    /// Layer command-line overrides over the environment configuration
    fn transport_config(&self) -> Result<TransportConfig, RpcError> {
        TransportConfig::from_env_with_overrides(
            self.transport.as_deref(),
            self.nats_url.clone(),
            self.request_timeout_ms.map(Duration::from_millis),
        )
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Setup logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = args.transport_config()?;
    info!(
        "Starting lingua server: transport={}, request_timeout={:?}",
        config.transport_type(),
        config.request_timeout()
    );
    if let TransportConfig::Memory { .. } = config {
        warn!("Memory transport only serves requests from inside this process");
    }

    // Fail fast on any type that cannot cross the wire
    preload_wire_types();

    let transport = Arc::new(config.connect().await?);
    let dispatcher = Dispatcher::new(Arc::clone(&transport));
    let service = TranslationService::new();
    service.register(&dispatcher).await?;

    info!(
        "Serving {} subjects via {}",
        dispatcher.channels().len(),
        transport.transport_type()
    );

    // Wait for shutdown signal
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
        }
        Err(err) => {
            eprintln!("Unable to listen for shutdown signal: {}", err);
        }
    }

    // Stop accepting requests, then flush outstanding replies
    dispatcher.shutdown();
    if let Err(e) = transport.close().await {
        warn!("Error while closing transport: {}", e);
    }

    info!(
        "Server shutdown complete: {} languages, {} keys, {} values in memory",
        service.languages().len(),
        service.keys().len(),
        service.values().len()
    );

    Ok(())
}
