use crate::foundation::{
    core::PixelBuffer,
    error::{RemediaError, RemediaResult},
};

/// Decode encoded image bytes into a straight-alpha RGBA8 buffer sized to
/// the image's natural dimensions.
pub fn decode_pixels(bytes: &[u8]) -> RemediaResult<PixelBuffer> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| RemediaError::decode(format!("image decode failed: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PixelBuffer::new(width, height, rgba.into_raw())
}

/// Composite straight-alpha pixels over an opaque white background.
///
/// JPEG and BMP output cannot carry alpha; partially transparent pixels
/// must land on white instead of whatever garbage the color channels hold.
pub fn flatten_onto_white(buf: &mut PixelBuffer) {
    for px in buf.data.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 255 {
            continue;
        }
        let inv = 255 - a;
        px[0] = (((u16::from(px[0]) * a) + 255 * inv + 127) / 255) as u8;
        px[1] = (((u16::from(px[1]) * a) + 255 * inv + 127) / 255) as u8;
        px[2] = (((u16::from(px[2]) * a) + 255 * inv + 127) / 255) as u8;
        px[3] = 255;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
