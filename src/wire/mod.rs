//! Inbound packet wire format.
//!
//! The tracker emits fixed-layout little-endian binary records. Two layout
//! revisions have been observed in the field; they differ only in which
//! fields sit between the resolution and the Euler angles, so each revision
//! is expressed as a declarative field table consumed by one cursor-based
//! reader instead of duplicated parsing code. The deployed revision is
//! pinned by configuration since the wire format carries no version
//! discriminator.

mod decoder;
mod layout;

pub use decoder::decode_frame;
pub use layout::{FieldRole, FieldSpec, PacketLayout, PacketVariant};
