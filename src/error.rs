//! Error types for the bridge.
//!
//! Recovery policy is a visible property of each variant rather than a
//! blanket catch-all in the relay loop:
//!
//! - [`BridgeError::MalformedPacket`]: the inbound datagram was too short to
//!   reach a required field. Always recovered locally: the packet is skipped
//!   and the loop keeps listening.
//! - [`BridgeError::Transport`]: socket failure. Fatal when it happens at
//!   startup (bind/connect); after startup, receive errors are logged and the
//!   loop continues while the socket remains usable.
//! - [`BridgeError::OscEncode`]: outbound message could not be encoded.
//!   Logged and dropped, never fatal (sends are fire-and-forget).
//! - [`BridgeError::Config`]: invalid settings. Fatal at startup.
//!
//! Out-of-range normalized values are not an error anywhere in this crate;
//! they are accepted numeric behavior inherited from the upstream tracker.

use thiserror::Error;

/// Result type alias for bridge operations.
pub type Result<T, E = BridgeError> = std::result::Result<T, E>;

/// Main error type for bridge operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum BridgeError {
    #[error(
        "malformed packet: field '{field}' at offset {offset} needs {needed} bytes, buffer has {got}"
    )]
    MalformedPacket { field: &'static str, offset: usize, needed: usize, got: usize },

    #[error("transport error during {operation}")]
    Transport {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode OSC message for {addr}")]
    OscEncode {
        addr: String,
        #[source]
        source: rosc::OscError,
    },

    #[error("invalid configuration: {reason}")]
    Config { reason: String },
}

impl BridgeError {
    /// Returns whether this error must terminate the relay.
    ///
    /// Only transport and configuration failures qualify; malformed packets
    /// and encode failures are always recovered by skipping the sample.
    pub fn is_fatal(&self) -> bool {
        match self {
            BridgeError::MalformedPacket { .. } => false,
            BridgeError::OscEncode { .. } => false,
            BridgeError::Transport { .. } => true,
            BridgeError::Config { .. } => true,
        }
    }

    /// Helper constructor for truncated-buffer decode failures.
    pub fn truncated(field: &'static str, offset: usize, needed: usize, got: usize) -> Self {
        BridgeError::MalformedPacket { field, offset, needed, got }
    }

    /// Helper constructor for transport errors with operation context.
    pub fn transport(operation: impl Into<String>, source: std::io::Error) -> Self {
        BridgeError::Transport { operation: operation.into(), source }
    }

    /// Helper constructor for configuration errors.
    pub fn config(reason: impl Into<String>) -> Self {
        BridgeError::Config { reason: reason.into() }
    }
}
