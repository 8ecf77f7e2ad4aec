//! Bridge daemon: tracker UDP in, OSC out.

use std::env;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use facebridge::{BridgeConfig, OscSink, Relay, UdpSource};

/// Parse a config path from the command line.
///
/// Supports `facebridge <path>`, `facebridge --config <path>` and
/// `facebridge -c <path>`. Returns `None` when no path is given, in which
/// case the built-in defaults apply.
fn parse_config_path() -> Option<String> {
    let args: Vec<String> = env::args().collect();

    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }

    if args.len() > 1 && !args[1].starts_with('-') {
        return Some(args[1].clone());
    }

    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match parse_config_path() {
        Some(path) => {
            info!(path = %path, "loading configuration");
            BridgeConfig::load(&path)?
        }
        None => BridgeConfig::default(),
    };
    config.validate()?;

    let source = UdpSource::bind(config.listen_addr).await?;
    let sink = OscSink::connect(config.osc_addr).await?;

    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("interrupt received"),
            Err(err) => error!(%err, "failed to listen for interrupt"),
        }
        interrupt.cancel();
    });

    let mut relay = Relay::new(&config, source, sink)?;
    relay.run(cancel).await?;

    info!(forwarded = relay.forwarded_total(), "bridge stopped");
    Ok(())
}
