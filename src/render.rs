//! Frame buffers and video frame composition.

use crate::foundation::error::{ReelError, ReelResult};

/// Fit, paste and caption one picture onto a video canvas.
pub mod compose;
/// Caption rasterization and overlay.
pub mod overlay;

/// A rendered frame as straight-alpha RGBA8 pixels, tightly packed, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Take ownership of an `image` buffer.
    pub fn from_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    /// RGBA at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Byte layout of one pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PixelFormat {
    /// Red, green, blue, alpha.
    Rgba8,
    /// Blue, green, red, alpha.
    Bgra8,
    /// Red, green, blue.
    #[default]
    Rgb8,
    /// Blue, green, red.
    Bgr8,
}

impl PixelFormat {
    /// Bytes per pixel.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgba8 | Self::Bgra8 => 4,
            Self::Rgb8 | Self::Bgr8 => 3,
        }
    }

    /// Matching `ffmpeg -pix_fmt` name.
    pub fn ffmpeg_name(self) -> &'static str {
        match self {
            Self::Rgba8 => "rgba",
            Self::Bgra8 => "bgra",
            Self::Rgb8 => "rgb24",
            Self::Bgr8 => "bgr24",
        }
    }

    fn read(self, px: &[u8]) -> [u8; 4] {
        match self {
            Self::Rgba8 => [px[0], px[1], px[2], px[3]],
            Self::Bgra8 => [px[2], px[1], px[0], px[3]],
            Self::Rgb8 => [px[0], px[1], px[2], 255],
            Self::Bgr8 => [px[2], px[1], px[0], 255],
        }
    }

    fn write(self, out: &mut Vec<u8>, [r, g, b, a]: [u8; 4]) {
        match self {
            Self::Rgba8 => out.extend_from_slice(&[r, g, b, a]),
            Self::Bgra8 => out.extend_from_slice(&[b, g, r, a]),
            Self::Rgb8 => out.extend_from_slice(&[r, g, b]),
            Self::Bgr8 => out.extend_from_slice(&[b, g, r]),
        }
    }
}

/// Reorder channels from `from` to `to`.
///
/// Alpha is dropped when the target has none and set to 255 when the source has none; color
/// values are never premultiplied or flattened.
pub fn convert_pixels(src: &[u8], from: PixelFormat, to: PixelFormat) -> ReelResult<Vec<u8>> {
    let mut out = Vec::new();
    convert_pixels_into(&mut out, src, from, to)?;
    Ok(out)
}

/// Like [`convert_pixels`], reusing `dst`'s allocation.
pub fn convert_pixels_into(
    dst: &mut Vec<u8>,
    src: &[u8],
    from: PixelFormat,
    to: PixelFormat,
) -> ReelResult<()> {
    let bpp = from.bytes_per_pixel();
    if !src.len().is_multiple_of(bpp) {
        return Err(ReelError::validation(format!(
            "pixel buffer length {} is not a multiple of {bpp}",
            src.len()
        )));
    }

    dst.clear();
    if from == to {
        dst.extend_from_slice(src);
        return Ok(());
    }
    dst.reserve(src.len() / bpp * to.bytes_per_pixel());
    for px in src.chunks_exact(bpp) {
        to.write(dst, from.read(px));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba_to_bgr_drops_alpha_and_swaps() {
        let src = [1u8, 2, 3, 4, 10, 20, 30, 40];
        assert_eq!(
            convert_pixels(&src, PixelFormat::Rgba8, PixelFormat::Bgr8).unwrap(),
            vec![3, 2, 1, 30, 20, 10]
        );
        assert_eq!(
            convert_pixels(&src, PixelFormat::Rgba8, PixelFormat::Rgb8).unwrap(),
            vec![1, 2, 3, 10, 20, 30]
        );
    }

    #[test]
    fn adding_alpha_is_opaque() {
        let src = [9u8, 8, 7];
        assert_eq!(
            convert_pixels(&src, PixelFormat::Bgr8, PixelFormat::Rgba8).unwrap(),
            vec![7, 8, 9, 255]
        );
        assert_eq!(
            convert_pixels(&src, PixelFormat::Rgb8, PixelFormat::Bgra8).unwrap(),
            vec![7, 8, 9, 255]
        );
    }

    #[test]
    fn same_format_is_identity_and_ragged_input_fails() {
        let src = [5u8, 6, 7, 8];
        assert_eq!(
            convert_pixels(&src, PixelFormat::Bgra8, PixelFormat::Bgra8).unwrap(),
            src.to_vec()
        );
        assert!(convert_pixels(&[1, 2, 3, 4, 5], PixelFormat::Rgba8, PixelFormat::Rgb8).is_err());
    }

    #[test]
    fn frame_pixel_lookup() {
        let img = image::RgbaImage::from_fn(2, 2, |x, y| image::Rgba([x as u8, y as u8, 0, 255]));
        let frame = FrameRGBA::from_image(img);
        assert_eq!(frame.pixel(1, 0), Some([1, 0, 0, 255]));
        assert_eq!(frame.pixel(0, 1), Some([0, 1, 0, 255]));
        assert_eq!(frame.pixel(2, 0), None);
    }
}
