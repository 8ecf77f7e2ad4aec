//! Cursor-based packet decoder.
//!
//! Walks a [`PacketLayout`] field table over the received buffer, parsing
//! consumed fields with explicit little-endian byte order and advancing the
//! cursor past skipped fields by their exact width. Bytes beyond the last
//! table entry are ignored without parsing, so unknown trailing fields from
//! newer tracker builds cannot break decoding.

use tracing::trace;

use super::layout::{FieldRole, PacketLayout};
use crate::error::{BridgeError, Result};
use crate::types::RawFrame;

/// Decode one packet buffer into a [`RawFrame`] using the given layout.
///
/// Fails with [`BridgeError::MalformedPacket`] if the buffer ends before the
/// last consumed field; the error names the field that could not be read.
/// No side effects beyond buffer reads.
pub fn decode_frame(buf: &[u8], layout: &PacketLayout) -> Result<RawFrame> {
    let mut cursor = 0usize;
    let mut timestamp = 0f64;
    let mut pitch = 0f32;
    let mut yaw = 0f32;
    let mut roll = 0f32;

    for field in layout.fields {
        match field.role {
            FieldRole::Timestamp => timestamp = read_f64_le(buf, cursor, field.name)?,
            FieldRole::Pitch => pitch = read_f32_le(buf, cursor, field.name)?,
            FieldRole::Yaw => yaw = read_f32_le(buf, cursor, field.name)?,
            FieldRole::Roll => roll = read_f32_le(buf, cursor, field.name)?,
            FieldRole::Skip => {}
        }
        cursor += field.width;
    }

    trace!(
        layout = layout.name,
        timestamp, pitch, yaw, roll, "decoded tracker frame"
    );

    Ok(RawFrame { timestamp, pitch, yaw, roll })
}

fn read_f64_le(buf: &[u8], offset: usize, field: &'static str) -> Result<f64> {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(take(buf, offset, 8, field)?);
    Ok(f64::from_le_bytes(bytes))
}

fn read_f32_le(buf: &[u8], offset: usize, field: &'static str) -> Result<f32> {
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(take(buf, offset, 4, field)?);
    Ok(f32::from_le_bytes(bytes))
}

fn take<'a>(buf: &'a [u8], offset: usize, needed: usize, field: &'static str) -> Result<&'a [u8]> {
    if offset + needed > buf.len() {
        return Err(BridgeError::truncated(field, offset, needed, buf.len()));
    }
    Ok(&buf[offset..offset + needed])
}
