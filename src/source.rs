//! Inbound packet sources.
//!
//! The relay loop reads raw datagrams through the [`PacketSource`] seam so
//! it can be driven by a real socket in production and by scripted sources
//! in tests.

use std::net::SocketAddr;

use tokio::net::UdpSocket;
use tracing::{info, trace};

use crate::error::{BridgeError, Result};

/// Maximum expected datagram size. Tracker packets are well under 100 bytes;
/// the headroom tolerates newer builds appending fields.
const RECV_BUFFER_SIZE: usize = 2048;

/// A source of raw tracker datagrams.
///
/// Each call resolves with the bytes of exactly one packet. Timing is the
/// source's concern: the UDP implementation suspends until a datagram
/// arrives, which is the relay's only suspension point besides the report
/// timer.
#[async_trait::async_trait]
pub trait PacketSource: Send {
    async fn next_packet(&mut self) -> Result<Vec<u8>>;
}

/// UDP socket bound to the tracker's send address.
pub struct UdpSource {
    socket: UdpSocket,
    buf: Vec<u8>,
}

impl UdpSource {
    /// Bind the inbound socket. Failure here is fatal at startup.
    pub async fn bind(addr: SocketAddr) -> Result<Self> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|e| BridgeError::transport(format!("binding {addr}"), e))?;
        info!(%addr, "listening for tracker packets");
        Ok(Self { socket, buf: vec![0u8; RECV_BUFFER_SIZE] })
    }

    /// The locally bound address (useful when binding port 0 in tests).
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.socket
            .local_addr()
            .map_err(|e| BridgeError::transport("querying local address", e))
    }
}

#[async_trait::async_trait]
impl PacketSource for UdpSource {
    async fn next_packet(&mut self) -> Result<Vec<u8>> {
        let (len, peer) = self
            .socket
            .recv_from(&mut self.buf)
            .await
            .map_err(|e| BridgeError::transport("udp recv", e))?;
        trace!(%peer, len, "received datagram");
        Ok(self.buf[..len].to_vec())
    }
}
