use std::path::Path;

use crate::foundation::error::{ReelError, ReelResult};

/// Natural pixel size of the image at `path`, read from its header only.
///
/// The format is sniffed from the file contents, so a mislabeled extension still works.
pub fn probe_dimensions(path: &Path) -> ReelResult<(u32, u32)> {
    let reader = image::ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| ReelError::media_decode(path, e))?;
    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| ReelError::media_decode(path, e))?;
    if width == 0 || height == 0 {
        return Err(ReelError::media_decode(path, "image has zero width or height"));
    }
    Ok((width, height))
}

/// Read and decode the image at `path` into straight-alpha RGBA8.
pub fn decode_image_file(path: &Path) -> ReelResult<image::RgbaImage> {
    let bytes = std::fs::read(path).map_err(|e| ReelError::media_decode(path, e))?;
    decode_image(&bytes).map_err(|e| ReelError::media_decode(path, e))
}

/// Decode an in-memory image into straight-alpha RGBA8.
pub fn decode_image(bytes: &[u8]) -> Result<image::RgbaImage, image::ImageError> {
    let dyn_img = image::load_from_memory(bytes)?;
    Ok(dyn_img.to_rgba8())
}
