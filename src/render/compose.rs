use image::imageops::FilterType;

use crate::assets::font::CaptionFont;
use crate::config::VideoConfig;
use crate::foundation::core::Canvas;
use crate::foundation::error::ReelResult;
use crate::layout::compute_pixel_placement;
use crate::render::FrameRGBA;
use crate::render::overlay::{CaptionStyle, draw_caption};

/// Builds fixed-size video frames: picture fitted and centered on a solid canvas, caption on top.
#[derive(Debug)]
pub struct FrameComposer {
    canvas: Canvas,
    background: image::Rgba<u8>,
    style: CaptionStyle,
    font: CaptionFont,
}

impl FrameComposer {
    /// Composer for `cfg`'s canvas and caption settings, drawing text with `font`.
    pub fn new(cfg: &VideoConfig, font: CaptionFont) -> Self {
        let [r, g, b] = cfg.background_rgb;
        Self {
            canvas: cfg.canvas(),
            background: image::Rgba([r, g, b, 255]),
            style: CaptionStyle {
                text_rgb: cfg.caption_rgb,
                box_rgba: cfg.caption_box_rgba,
                margin: cfg.caption_margin_px,
            },
            font,
        }
    }

    /// Output canvas.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Compose one opaque frame from a decoded picture and its caption.
    ///
    /// Transparent areas of the picture show the background color.
    pub fn compose(&self, picture: &image::RgbaImage, caption: &str) -> ReelResult<FrameRGBA> {
        let (src_w, src_h) = picture.dimensions();
        let place = compute_pixel_placement(src_w, src_h, self.canvas)?;

        let mut frame =
            image::RgbaImage::from_pixel(self.canvas.width, self.canvas.height, self.background);

        if (place.width, place.height) == (src_w, src_h) {
            image::imageops::overlay(&mut frame, picture, i64::from(place.x), i64::from(place.y));
        } else {
            let scaled =
                image::imageops::resize(picture, place.width, place.height, FilterType::Lanczos3);
            image::imageops::overlay(&mut frame, &scaled, i64::from(place.x), i64::from(place.y));
        }

        draw_caption(&mut frame, caption, &self.style, &self.font)?;
        Ok(FrameRGBA::from_image(frame))
    }
}
