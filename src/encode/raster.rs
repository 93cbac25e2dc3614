use std::io::Cursor;

use anyhow::Context as _;
use image::ImageFormat;

use crate::foundation::{
    core::{EncodedResult, PixelBuffer},
    error::RemediaResult,
};

/// Zero bytes appended to each BMP row to reach a 4-byte boundary.
pub fn bmp_row_padding(width: u32) -> usize {
    (4 - (width as usize * 3) % 4) % 4
}

/// Encode as classic 24-bit uncompressed BMP.
///
/// Height is stored negative so rows are written top-down and no vertical
/// flip is needed. Alpha is dropped; callers flatten transparency first.
pub fn encode_bmp(buf: &PixelBuffer) -> EncodedResult {
    let width = buf.width as usize;
    let height = buf.height as usize;
    let padding = bmp_row_padding(buf.width);
    let file_size = 54 + (width * 3 + padding) * height;

    let mut out = Vec::with_capacity(file_size);
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(file_size as u32).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // reserved
    out.extend_from_slice(&54u32.to_le_bytes()); // offset to pixel data
    out.extend_from_slice(&40u32.to_le_bytes()); // DIB header size
    out.extend_from_slice(&(buf.width as i32).to_le_bytes());
    out.extend_from_slice(&(-(buf.height as i64) as i32).to_le_bytes()); // top-down
    out.extend_from_slice(&1u16.to_le_bytes()); // color planes
    out.extend_from_slice(&24u16.to_le_bytes()); // bits per pixel
    out.extend_from_slice(&0u32.to_le_bytes()); // BI_RGB, no compression
    out.extend_from_slice(&0u32.to_le_bytes()); // image size (0 allowed for BI_RGB)
    out.extend_from_slice(&2835i32.to_le_bytes()); // x pixels per meter
    out.extend_from_slice(&2835i32.to_le_bytes()); // y pixels per meter
    out.extend_from_slice(&0u32.to_le_bytes()); // palette colors
    out.extend_from_slice(&0u32.to_le_bytes()); // important colors

    for row in buf.data.chunks_exact(buf.row_bytes().max(1)) {
        for px in row.chunks_exact(4) {
            out.push(px[2]);
            out.push(px[1]);
            out.push(px[0]);
        }
        out.resize(out.len() + padding, 0);
    }

    EncodedResult::new(out, "image/bmp")
}

/// Encode as a minimal single-strip uncompressed RGB TIFF (little-endian).
///
/// Best-effort by design: baseline tags only, one strip, no resolution or
/// orientation entries. Strict-reader conformance is a non-goal.
pub fn encode_tiff(buf: &PixelBuffer) -> EncodedResult {
    const ENTRY_COUNT: u16 = 9;
    let width = buf.width;
    let height = buf.height;
    let strip_len = buf.pixel_count() * 3;
    let ifd_offset = 8 + strip_len;
    let bits_offset = ifd_offset + 2 + usize::from(ENTRY_COUNT) * 12 + 4;

    let mut out = Vec::with_capacity(bits_offset + 6);
    out.extend_from_slice(b"II");
    out.extend_from_slice(&42u16.to_le_bytes());
    out.extend_from_slice(&(ifd_offset as u32).to_le_bytes());

    // Strip data lives directly after the header at offset 8.
    for px in buf.data.chunks_exact(4) {
        out.extend_from_slice(&px[..3]);
    }

    const SHORT: u16 = 3;
    const LONG: u16 = 4;
    out.extend_from_slice(&ENTRY_COUNT.to_le_bytes());
    ifd_entry(&mut out, 256, LONG, 1, width); // ImageWidth
    ifd_entry(&mut out, 257, LONG, 1, height); // ImageLength
    ifd_entry(&mut out, 258, SHORT, 3, bits_offset as u32); // BitsPerSample
    ifd_entry(&mut out, 259, SHORT, 1, 1); // Compression: none
    ifd_entry(&mut out, 262, SHORT, 1, 2); // Photometric: RGB
    ifd_entry(&mut out, 273, LONG, 1, 8); // StripOffsets
    ifd_entry(&mut out, 277, SHORT, 1, 3); // SamplesPerPixel
    ifd_entry(&mut out, 278, LONG, 1, height); // RowsPerStrip
    ifd_entry(&mut out, 279, LONG, 1, strip_len as u32); // StripByteCounts
    out.extend_from_slice(&0u32.to_le_bytes()); // no next IFD

    for _ in 0..3 {
        out.extend_from_slice(&8u16.to_le_bytes()); // 8 bits per sample
    }

    EncodedResult::new(out, "image/tiff")
}

fn ifd_entry(out: &mut Vec<u8>, tag: u16, field_type: u16, count: u32, value: u32) {
    out.extend_from_slice(&tag.to_le_bytes());
    out.extend_from_slice(&field_type.to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());
    // SHORT values sit left-justified in the 4-byte value slot; a count of
    // 3 shorts does not fit and `value` is then an offset, which is LONG
    // shaped anyway.
    if field_type == 3 && count == 1 {
        out.extend_from_slice(&(value as u16).to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
    } else {
        out.extend_from_slice(&value.to_le_bytes());
    }
}

/// Hex characters per line in the EPS pixel stream. The format does not
/// care; short lines just keep the file printable.
const EPS_HEX_WRAP: usize = 78;

/// Encode as an ASCII PostScript (EPS) wrapper around hex RGB triplets
/// under a `colorimage` operator. Alpha is dropped.
pub fn encode_eps(buf: &PixelBuffer) -> EncodedResult {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let (w, h) = (buf.width, buf.height);

    let mut out = format!(
        "%!PS-Adobe-3.0 EPSF-3.0\n\
         %%BoundingBox: 0 0 {w} {h}\n\
         %%Pages: 1\n\
         %%Title: Exported Image\n\
         %%EndComments\n\
         /readstring {{\n  currentfile exch readhexstring pop\n}} bind def\n\
         /picstr {row} string def\n\
         {w} {h} 8\n\
         [{w} 0 0 -{h} 0 {h}]\n\
         {{ picstr readstring }}\nfalse 3\ncolorimage\n",
        row = w as usize * 3,
    )
    .into_bytes();

    let mut line = 0usize;
    for px in buf.data.chunks_exact(4) {
        for &c in &px[..3] {
            out.push(HEX[usize::from(c >> 4)]);
            out.push(HEX[usize::from(c & 15)]);
            line += 2;
            if line >= EPS_HEX_WRAP {
                out.push(b'\n');
                line = 0;
            }
        }
    }
    out.extend_from_slice(b"\n%%EOF");

    EncodedResult::new(out, "application/postscript")
}

/// Encode as a headerless 3-bytes-per-pixel R,G,B dump.
pub fn encode_raw(buf: &PixelBuffer) -> EncodedResult {
    let mut out = Vec::with_capacity(buf.pixel_count() * 3);
    for px in buf.data.chunks_exact(4) {
        out.extend_from_slice(&px[..3]);
    }
    EncodedResult::new(out, "application/octet-stream")
}

/// Delegate to one of the `image` crate's built-in encoders.
///
/// `quality` is in (0, 1] and applies to lossy targets (JPEG); the crate's
/// WebP encoder is lossless and ignores it.
pub fn encode_native(
    buf: &PixelBuffer,
    format: ImageFormat,
    quality: f32,
) -> RemediaResult<EncodedResult> {
    let img = image::RgbaImage::from_raw(buf.width, buf.height, buf.data.clone())
        .ok_or_else(|| crate::RemediaError::input("pixel buffer does not match its dimensions"))?;

    let mut cursor = Cursor::new(Vec::new());
    if format == ImageFormat::Jpeg {
        // The JPEG encoder rejects RGBA input; the pipeline has already
        // flattened alpha so this conversion is lossless here.
        let rgb = image::DynamicImage::ImageRgba8(img).to_rgb8();
        let q = (quality * 100.0).round().clamp(1.0, 100.0) as u8;
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, q);
        rgb.write_with_encoder(encoder)
            .context("encode jpeg via native codec")?;
    } else {
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut cursor, format)
            .with_context(|| format!("encode {format:?} via native codec"))?;
    }

    Ok(EncodedResult::new(cursor.into_inner(), native_mime(format)))
}

pub fn native_mime(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::WebP => "image/webp",
        ImageFormat::Gif => "image/gif",
        ImageFormat::Ico => "image/x-icon",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/raster.rs"]
mod tests;
