use crate::foundation::error::{ReelError, ReelResult};

pub use kurbo::{Point, Rect, Size};

/// English Metric Units per inch, the length unit of OOXML drawing markup.
pub const EMU_PER_INCH: f64 = 914_400.0;

/// Convert inches to EMU, rounding to the nearest whole unit.
pub fn inches_to_emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round() as i64
}

/// Absolute 0-based frame index in output stream order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> ReelResult<Self> {
        if den == 0 {
            return Err(ReelError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(ReelError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Number of frames that cover `secs` seconds, rounded to the nearest frame, at least one.
    pub fn frames_for_secs(self, secs: f64) -> u64 {
        ((secs * self.as_f64()).round().max(1.0)) as u64
    }
}

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// The whole canvas as a frame rectangle anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_rejects_zero_parts() {
        assert!(Fps::new(0, 1).is_err());
        assert!(Fps::new(30, 0).is_err());
        assert_eq!(Fps::new(30000, 1001).unwrap().as_f64(), 30000.0 / 1001.0);
    }

    #[test]
    fn frames_for_secs_covers_display_time() {
        let fps = Fps::new(1, 1).unwrap();
        assert_eq!(fps.frames_for_secs(3.0), 3);
        let fps = Fps::new(25, 1).unwrap();
        assert_eq!(fps.frames_for_secs(2.5), 63);
        assert_eq!(fps.frames_for_secs(0.0), 1);
    }

    #[test]
    fn inch_conversions_match_ooxml_units() {
        assert_eq!(inches_to_emu(1.0), 914_400);
        assert_eq!(inches_to_emu(0.5), 457_200);
        assert_eq!(inches_to_emu(10.0), 9_144_000);
    }

    #[test]
    fn canvas_rect_is_origin_anchored() {
        let r = Canvas {
            width: 1280,
            height: 720,
        }
        .rect();
        assert_eq!((r.x0, r.y0, r.width(), r.height()), (0.0, 0.0, 1280.0, 720.0));
    }
}
