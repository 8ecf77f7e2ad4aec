//! Declarative field tables for the observed packet revisions.

use serde::{Deserialize, Serialize};

/// What the decoder does with a field: parse it into the frame, or advance
/// the cursor past it without parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// f64 source timestamp, consumed.
    Timestamp,
    /// f32 pitch angle in degrees, consumed.
    Pitch,
    /// f32 yaw angle in degrees, consumed.
    Yaw,
    /// f32 roll angle in degrees, consumed.
    Roll,
    /// Present on the wire but intentionally ignored.
    Skip,
}

/// One field of a packet layout: its role and exact byte width.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub role: FieldRole,
    pub width: usize,
}

const fn field(name: &'static str, role: FieldRole, width: usize) -> FieldSpec {
    FieldSpec { name, role, width }
}

/// A complete packet layout: ordered fields at fixed offsets.
#[derive(Debug, Clone, Copy)]
pub struct PacketLayout {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl PacketLayout {
    /// Minimum buffer length required to decode: the end offset of the last
    /// consumed field. Trailing skipped fields may be absent or truncated
    /// without affecting decodability.
    pub fn min_decode_len(&self) -> usize {
        let mut offset = 0;
        let mut required = 0;
        for f in self.fields {
            offset += f.width;
            if f.role != FieldRole::Skip {
                required = offset;
            }
        }
        required
    }
}

/// Original tracker build: Euler angles directly after the resolution.
pub const LEGACY_LAYOUT: PacketLayout = PacketLayout {
    name: "legacy",
    fields: &[
        field("timestamp", FieldRole::Timestamp, 8),
        field("face_id", FieldRole::Skip, 4),
        field("width", FieldRole::Skip, 4),
        field("height", FieldRole::Skip, 4),
        field("pitch", FieldRole::Pitch, 4),
        field("yaw", FieldRole::Yaw, 4),
        field("roll", FieldRole::Roll, 4),
    ],
};

/// Later tracker build: blink metrics, success flag, fit error and a
/// quaternion were inserted before the Euler angles, and a translation
/// vector appended after them.
pub const EXTENDED_LAYOUT: PacketLayout = PacketLayout {
    name: "extended",
    fields: &[
        field("timestamp", FieldRole::Timestamp, 8),
        field("face_id", FieldRole::Skip, 4),
        field("width", FieldRole::Skip, 4),
        field("height", FieldRole::Skip, 4),
        field("eye_blink", FieldRole::Skip, 8),
        field("success", FieldRole::Skip, 1),
        field("fit_error", FieldRole::Skip, 4),
        field("quaternion", FieldRole::Skip, 16),
        field("pitch", FieldRole::Pitch, 4),
        field("yaw", FieldRole::Yaw, 4),
        field("roll", FieldRole::Roll, 4),
        field("translation", FieldRole::Skip, 12),
    ],
};

/// Which packet revision the deployed tracker emits.
///
/// Pinned per deployment by configuration; there is no length or version
/// field on the wire to auto-detect from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PacketVariant {
    #[default]
    Legacy,
    Extended,
}

impl PacketVariant {
    /// The field table for this revision.
    pub fn layout(self) -> &'static PacketLayout {
        match self {
            PacketVariant::Legacy => &LEGACY_LAYOUT,
            PacketVariant::Extended => &EXTENDED_LAYOUT,
        }
    }
}
