use anyhow::Context as _;

use crate::assets::font::CaptionFont;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::{blend_premul_over_opaque, blend_straight_over_opaque};
use crate::foundation::xml::xml_escape;

/// Largest pixmap side used while rasterizing caption text.
const MAX_DIM: u32 = 16_384;

/// Colors and spacing of the caption band.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptionStyle {
    /// Text color.
    pub text_rgb: [u8; 3],
    /// Backdrop color, straight alpha.
    pub box_rgba: [u8; 4],
    /// Padding around the text, and half the gap to the bottom edge.
    pub margin: u32,
}

/// Where caption text and its backdrop go on a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CaptionLayout {
    /// Left edge of the text ink.
    pub text_x: i64,
    /// Top edge of the text ink.
    pub text_y: i64,
    /// Backdrop, inclusive corners `[x0, y0, x1, y1]`.
    pub backdrop: [i64; 4],
}

/// Center `text_w x text_h` horizontally with its top at `frame_h - text_h - 2 * margin`, and pad
/// the backdrop by `margin` on every side.
pub fn caption_layout(
    frame_w: u32,
    frame_h: u32,
    text_w: u32,
    text_h: u32,
    margin: u32,
) -> CaptionLayout {
    let (fw, fh) = (i64::from(frame_w), i64::from(frame_h));
    let (tw, th, m) = (i64::from(text_w), i64::from(text_h), i64::from(margin));
    let x = (fw - tw) / 2;
    let y = fh - th - 2 * m;
    CaptionLayout {
        text_x: x,
        text_y: y,
        backdrop: [x - m, y - m, x + tw + m, y + th + m],
    }
}

/// Caption ink cropped to its bounding box, premultiplied RGBA8.
#[derive(Clone, Debug)]
pub struct TextRaster {
    /// Ink width.
    pub width: u32,
    /// Ink height.
    pub height: u32,
    /// Premultiplied RGBA8, row-major.
    pub data: Vec<u8>,
}

/// Rasterize `text` in `font`, shrinking uniformly so the ink is at most `max_width` wide.
///
/// Returns `None` when nothing would be drawn (blank text, or no usable face).
pub fn rasterize_caption(
    text: &str,
    font: &CaptionFont,
    rgb: [u8; 3],
    max_width: u32,
) -> ReelResult<Option<TextRaster>> {
    if text.trim().is_empty() || !font.is_available() {
        return Ok(None);
    }

    let chars = text.chars().count() as f32;
    let (est_w, _) = text_box_estimate(font.size_px(), chars);
    let pre_scale = (MAX_DIM as f32 / est_w).min(1.0);

    let Some(first) = render_text(text, font, rgb, pre_scale)? else {
        return Ok(None);
    };
    if pre_scale >= 1.0 && first.width <= max_width {
        return Ok(Some(first));
    }

    let scale = (pre_scale * max_width.max(1) as f32 / first.width as f32).min(1.0);
    tracing::debug!(scale, "caption shrunk to fit frame width");
    render_text(text, font, rgb, scale)
}

/// Draw `text` with its backdrop near the bottom of `frame`.
///
/// Text wider than the frame minus four margins is scaled down. Blank captions, or captions that
/// produce no ink, leave the frame untouched.
pub fn draw_caption(
    frame: &mut image::RgbaImage,
    text: &str,
    style: &CaptionStyle,
    font: &CaptionFont,
) -> ReelResult<()> {
    let (fw, fh) = frame.dimensions();
    let max_width = fw.saturating_sub(style.margin.saturating_mul(4)).max(1);
    let Some(raster) = rasterize_caption(text, font, style.text_rgb, max_width)? else {
        return Ok(());
    };

    let layout = caption_layout(fw, fh, raster.width, raster.height, style.margin);

    let [x0, y0, x1, y1] = layout.backdrop;
    for y in y0.max(0)..=y1.min(i64::from(fh) - 1) {
        for x in x0.max(0)..=x1.min(i64::from(fw) - 1) {
            let px = frame.get_pixel_mut(x as u32, y as u32);
            blend_straight_over_opaque(&mut px.0, style.box_rgba);
        }
    }

    for ry in 0..raster.height {
        let y = layout.text_y + i64::from(ry);
        if y < 0 || y >= i64::from(fh) {
            continue;
        }
        for rx in 0..raster.width {
            let x = layout.text_x + i64::from(rx);
            if x < 0 || x >= i64::from(fw) {
                continue;
            }
            let i = ((ry * raster.width + rx) * 4) as usize;
            let px = frame.get_pixel_mut(x as u32, y as u32);
            blend_premul_over_opaque(&mut px.0, &raster.data[i..i + 4]);
        }
    }
    Ok(())
}

/// Canvas large enough for `chars` glyphs at `size_px`, in unscaled pixels.
fn text_box_estimate(size_px: f32, chars: f32) -> (f32, f32) {
    (size_px * (1.1 * chars + 2.0), size_px * 2.0)
}

fn render_text(
    text: &str,
    font: &CaptionFont,
    rgb: [u8; 3],
    scale: f32,
) -> ReelResult<Option<TextRaster>> {
    let size = font.size_px();
    let (w, h) = text_box_estimate(size, text.chars().count() as f32);
    let svg = caption_svg(text, font, rgb, w, h);

    let opts = font.usvg_options();
    let tree = usvg::Tree::from_data(svg.as_bytes(), &opts).context("parse caption svg")?;

    let px_w = ((w * scale).ceil() as u32).clamp(1, MAX_DIM);
    let px_h = ((h * scale).ceil() as u32).clamp(1, MAX_DIM);
    let mut pixmap = resvg::tiny_skia::Pixmap::new(px_w, px_h)
        .ok_or_else(|| ReelError::validation("failed to allocate caption pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    Ok(crop_to_ink(pixmap.data(), px_w, px_h))
}

fn caption_svg(text: &str, font: &CaptionFont, rgb: [u8; 3], w: f32, h: f32) -> String {
    let size = font.size_px();
    let family = font
        .resolved_family()
        .unwrap_or_else(|| font.requested_family());
    let [r, g, b] = rgb;
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            r#"<text x="{x}" y="{baseline}" font-family="'{family}', sans-serif" font-size="{size}" "#,
            r#"fill="rgb({r},{g},{b})">{text}</text></svg>"#
        ),
        w = w,
        h = h,
        x = size,
        baseline = size * 1.4,
        family = xml_escape(family),
        size = size,
        r = r,
        g = g,
        b = b,
        text = xml_escape(text),
    )
}

fn crop_to_ink(premul: &[u8], width: u32, height: u32) -> Option<TextRaster> {
    let (mut x0, mut y0, mut x1, mut y1) = (u32::MAX, u32::MAX, 0u32, 0u32);
    for y in 0..height {
        for x in 0..width {
            let a = premul[((y * width + x) * 4 + 3) as usize];
            if a == 0 {
                continue;
            }
            x0 = x0.min(x);
            y0 = y0.min(y);
            x1 = x1.max(x);
            y1 = y1.max(y);
        }
    }
    if x0 == u32::MAX {
        return None;
    }

    let (cw, ch) = (x1 - x0 + 1, y1 - y0 + 1);
    let mut data = Vec::with_capacity((cw * ch * 4) as usize);
    for y in y0..=y1 {
        let start = ((y * width + x0) * 4) as usize;
        data.extend_from_slice(&premul[start..start + (cw * 4) as usize]);
    }
    Some(TextRaster {
        width: cw,
        height: ch,
        data,
    })
}
