//! Decoded view of one inbound tracker packet.

/// The relevant subset of fields decoded from one tracker packet.
///
/// Only the decoder constructs this, and only from a buffer long enough to
/// reach the last consumed field. Everything else in the wire format (face
/// id, resolution, blink metrics, quaternion, translation) is skipped, never
/// parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawFrame {
    /// Source clock timestamp in seconds. Decoded for availability but not
    /// relayed downstream.
    pub timestamp: f64,

    /// Up/down head tilt in degrees, nominally [-180, 180], not validated.
    pub pitch: f32,

    /// Left/right head turn in degrees, nominally [-180, 180], not validated.
    pub yaw: f32,

    /// Side tilt in degrees, nominally [-180, 180], not validated.
    pub roll: f32,
}
