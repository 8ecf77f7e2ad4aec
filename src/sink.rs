//! Outbound OSC sink.
//!
//! Forwarded orientations leave the bridge as three independently addressed
//! OSC messages, each carrying a single float. Sends are fire-and-forget
//! over UDP: no acknowledgment is expected and no backpressure is consumed.

use std::net::SocketAddr;

use rosc::encoder;
use rosc::{OscMessage, OscPacket, OscType};
use tokio::net::UdpSocket;
use tracing::{debug, info};

use crate::error::{BridgeError, Result};
use crate::types::NormalizedOrientation;

/// OSC address for the normalized pitch value.
pub const OSC_ADDR_UP_DOWN: &str = "/facetracker/look/up_down";
/// OSC address for the normalized yaw value.
pub const OSC_ADDR_LEFT_RIGHT: &str = "/facetracker/look/left_right";
/// OSC address for the normalized roll value.
pub const OSC_ADDR_ROLL: &str = "/facetracker/look/roll";

/// A destination for forwarded orientations.
#[async_trait::async_trait]
pub trait OrientationSink: Send {
    /// Forward one orientation downstream.
    ///
    /// Message order is up_down, left_right, roll; the consumer relies on
    /// that per-cycle order, though each message is an independent wire send.
    async fn send(&mut self, orientation: &NormalizedOrientation) -> Result<()>;
}

/// OSC-over-UDP sink.
pub struct OscSink {
    socket: UdpSocket,
    dest: SocketAddr,
}

impl OscSink {
    /// Bind an ephemeral local socket and aim it at the consumer.
    /// Failure here is fatal at startup.
    pub async fn connect(dest: SocketAddr) -> Result<Self> {
        let bind_addr: SocketAddr = if dest.is_ipv4() {
            "0.0.0.0:0".parse().expect("valid literal address")
        } else {
            "[::]:0".parse().expect("valid literal address")
        };
        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| BridgeError::transport("binding osc socket", e))?;
        socket
            .connect(dest)
            .await
            .map_err(|e| BridgeError::transport(format!("connecting to {dest}"), e))?;
        info!(%dest, "sending OSC messages");
        Ok(Self { socket, dest })
    }

    /// The configured destination.
    pub fn dest(&self) -> SocketAddr {
        self.dest
    }

    async fn send_float(&self, addr: &str, value: f32) -> Result<()> {
        let packet = OscPacket::Message(OscMessage {
            addr: addr.to_string(),
            args: vec![OscType::Float(value)],
        });
        let bytes = encoder::encode(&packet)
            .map_err(|e| BridgeError::OscEncode { addr: addr.to_string(), source: e })?;
        self.socket
            .send(&bytes)
            .await
            .map_err(|e| BridgeError::transport(format!("sending {addr}"), e))?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl OrientationSink for OscSink {
    async fn send(&mut self, orientation: &NormalizedOrientation) -> Result<()> {
        self.send_float(OSC_ADDR_UP_DOWN, orientation.up_down).await?;
        self.send_float(OSC_ADDR_LEFT_RIGHT, orientation.left_right).await?;
        self.send_float(OSC_ADDR_ROLL, orientation.roll).await?;
        debug!(
            up_down = orientation.up_down,
            left_right = orientation.left_right,
            roll = orientation.roll,
            "forwarded orientation"
        );
        Ok(())
    }
}
