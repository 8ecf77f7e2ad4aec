//! UDP face-tracker telemetry to OSC bridge.
//!
//! Facebridge sits between a head/face-tracking process emitting
//! fixed-layout binary telemetry over UDP and a downstream consumer
//! expecting semantic OSC messages. It is a translator and rate governor,
//! not a general networking stack.
//!
//! # Pipeline
//!
//! receive → decode ([`wire`]) → normalize ([`types`]) → gate ([`rate`]) →
//! forward ([`sink`]) + buffer ([`history`]) → periodically report, all
//! orchestrated by [`relay::Relay`].
//!
//! # Example
//!
//! ```rust,no_run
//! use facebridge::{BridgeConfig, OscSink, Relay, UdpSource};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = BridgeConfig::default();
//!     let source = UdpSource::bind(config.listen_addr).await?;
//!     let sink = OscSink::connect(config.osc_addr).await?;
//!
//!     let mut relay = Relay::new(&config, source, sink)?;
//!     relay.run(CancellationToken::new()).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
mod error;
pub mod history;
pub mod rate;
pub mod relay;
pub mod sink;
pub mod source;
pub mod types;
pub mod wire;

pub use config::BridgeConfig;
pub use error::{BridgeError, Result};
pub use history::{History, HistoryEntry};
pub use rate::{RateGovernor, SendRate};
pub use relay::Relay;
pub use sink::{
    OSC_ADDR_LEFT_RIGHT, OSC_ADDR_ROLL, OSC_ADDR_UP_DOWN, OrientationSink, OscSink,
};
pub use source::{PacketSource, UdpSource};
pub use types::{NormalizedOrientation, RawFrame, normalize};
pub use wire::{PacketVariant, decode_frame};
