//! Fit-and-center layout.
//!
//! Given a source rectangle (the natural size of a picture) and a target frame, compute the
//! largest rectangle with the source's aspect ratio that fits inside the frame, centered on both
//! axes. The same computation serves slide placement (continuous EMU/inch units, no rounding) and
//! video canvas placement (whole pixels, see [`Placement::to_pixel_grid`]).

use crate::foundation::core::{Canvas, Rect, Size};
use crate::foundation::error::{ReelError, ReelResult};

/// Which frame axis limited the scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binding {
    /// Source is relatively wider than the frame; scaled width equals frame width.
    Width,
    /// Source is relatively taller than (or as wide as) the frame; scaled height equals frame
    /// height.
    Height,
}

/// Scaled size and absolute offset of a source fitted into a frame, in the frame's units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// Scaled width.
    pub scaled_width: f64,
    /// Scaled height.
    pub scaled_height: f64,
    /// Left edge, including the frame origin.
    pub offset_x: f64,
    /// Top edge, including the frame origin.
    pub offset_y: f64,
    /// Axis that bound the scale.
    pub binding: Binding,
}

impl Placement {
    /// Placement as a rectangle in frame coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.offset_x,
            self.offset_y,
            self.offset_x + self.scaled_width,
            self.offset_y + self.scaled_height,
        )
    }

    /// Snap to whole pixels on `canvas`.
    ///
    /// Sizes and offsets round to the nearest pixel; sizes are at least 1px and at most the canvas
    /// size. If rounding pushes the far edge past the canvas, the offset on that axis moves back by
    /// the overflow.
    pub fn to_pixel_grid(&self, canvas: Canvas) -> PixelPlacement {
        let (x, width) = snap_axis(self.offset_x, self.scaled_width, canvas.width);
        let (y, height) = snap_axis(self.offset_y, self.scaled_height, canvas.height);
        PixelPlacement {
            width,
            height,
            x,
            y,
        }
    }
}

fn snap_axis(offset: f64, len: f64, bound: u32) -> (u32, u32) {
    let len = (len.round() as u32).clamp(1, bound.max(1));
    let offset = offset.round().max(0.0) as u32;
    let overflow = (offset + len).saturating_sub(bound);
    (offset.saturating_sub(overflow), len)
}

/// A placement on a pixel grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelPlacement {
    /// Scaled width in pixels.
    pub width: u32,
    /// Scaled height in pixels.
    pub height: u32,
    /// Left edge in pixels.
    pub x: u32,
    /// Top edge in pixels.
    pub y: u32,
}

/// Fit `source` inside `frame` preserving aspect ratio and center it.
///
/// Offsets include the frame origin (`frame.x0`, `frame.y0`). Returns
/// [`ReelError::InvalidDimension`] when any width/height is zero, negative or not finite.
pub fn compute_placement(source: Size, frame: Rect) -> ReelResult<Placement> {
    check_dimension("source", source.width, source.height)?;
    check_dimension("frame", frame.width(), frame.height())?;

    let frame_w = frame.width();
    let frame_h = frame.height();
    let source_aspect = source.width / source.height;
    let frame_aspect = frame_w / frame_h;

    let (scaled_width, scaled_height, binding) = if source_aspect > frame_aspect {
        (frame_w, frame_w / source_aspect, Binding::Width)
    } else {
        (frame_h * source_aspect, frame_h, Binding::Height)
    };

    Ok(Placement {
        scaled_width,
        scaled_height,
        offset_x: frame.x0 + (frame_w - scaled_width) / 2.0,
        offset_y: frame.y0 + (frame_h - scaled_height) / 2.0,
        binding,
    })
}

/// Fit a `source_width x source_height` pixel image onto `canvas`, snapped to whole pixels.
pub fn compute_pixel_placement(
    source_width: u32,
    source_height: u32,
    canvas: Canvas,
) -> ReelResult<PixelPlacement> {
    let source = Size::new(f64::from(source_width), f64::from(source_height));
    Ok(compute_placement(source, canvas.rect())?.to_pixel_grid(canvas))
}

fn check_dimension(what: &str, width: f64, height: f64) -> ReelResult<()> {
    if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
        return Err(ReelError::invalid_dimension(format!(
            "{what} must have positive finite width/height, got {width}x{height}"
        )));
    }
    Ok(())
}
