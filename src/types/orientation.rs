//! Unit-interval normalization of tracker angles.

use super::RawFrame;

/// Map an angle in degrees to the unit interval by dividing by 180.
///
/// Pure and total over finite floats. Deliberately not clamped: the upstream
/// tracker is trusted to stay in [-180, 180] but is not validated, and an
/// out-of-range reading normalizes outside [-1, 1] and is forwarded as-is.
/// That mirrors the deployed behavior downstream consumers already handle.
#[inline]
pub fn normalize(angle_degrees: f32) -> f32 {
    angle_degrees / 180.0
}

/// Orientation angles mapped to the unit interval, ready to forward.
///
/// Computed once per accepted frame; either forwarded and buffered, or
/// discarded by the rate governor. Never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedOrientation {
    pub up_down: f32,
    pub left_right: f32,
    pub roll: f32,
}

impl NormalizedOrientation {
    /// Normalize all three angles of a decoded frame.
    pub fn from_frame(frame: &RawFrame) -> Self {
        Self {
            up_down: normalize(frame.pitch),
            left_right: normalize(frame.yaw),
            roll: normalize(frame.roll),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_values() {
        assert_eq!(normalize(180.0), 1.0);
        assert_eq!(normalize(-180.0), -1.0);
        assert_eq!(normalize(0.0), 0.0);
        assert_eq!(normalize(90.0), 0.5);
        assert_eq!(normalize(-45.0), -0.25);
    }

    #[test]
    fn out_of_range_is_preserved_not_clamped() {
        assert_eq!(normalize(360.0), 2.0);
        assert_eq!(normalize(-270.0), -1.5);
    }

    #[test]
    fn from_frame_normalizes_all_axes() {
        let frame = RawFrame { timestamp: 12.5, pitch: 90.0, yaw: -45.0, roll: 0.0 };
        let o = NormalizedOrientation::from_frame(&frame);
        assert_eq!(o.up_down, 0.5);
        assert_eq!(o.left_right, -0.25);
        assert_eq!(o.roll, 0.0);
    }
}
