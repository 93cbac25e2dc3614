use super::*;
use crate::foundation::core::PixelBuffer;

fn solid(w: u32, h: u32, px: [u8; 4]) -> PixelBuffer {
    PixelBuffer::new(w, h, px.repeat((w * h) as usize)).unwrap()
}

#[test]
fn bmp_length_matches_header_formula() {
    for w in 1..=5u32 {
        let out = encode_bmp(&solid(w, 3, [1, 2, 3, 255]));
        let padding = bmp_row_padding(w);
        assert_eq!(out.bytes.len(), 54 + (w as usize * 3 + padding) * 3);
        let header_size = u32::from_le_bytes(out.bytes[2..6].try_into().unwrap());
        assert_eq!(header_size as usize, out.bytes.len());
    }
}

#[test]
fn bmp_header_is_top_down_24bpp() {
    let out = encode_bmp(&solid(2, 2, [255, 0, 0, 255]));
    assert_eq!(out.mime_type, "image/bmp");
    let b = &out.bytes;
    assert_eq!(&b[..2], b"BM");
    assert_eq!(u32::from_le_bytes(b[10..14].try_into().unwrap()), 54);
    assert_eq!(u32::from_le_bytes(b[14..18].try_into().unwrap()), 40);
    assert_eq!(i32::from_le_bytes(b[18..22].try_into().unwrap()), 2);
    assert_eq!(i32::from_le_bytes(b[22..26].try_into().unwrap()), -2);
    assert_eq!(u16::from_le_bytes(b[26..28].try_into().unwrap()), 1);
    assert_eq!(u16::from_le_bytes(b[28..30].try_into().unwrap()), 24);
    assert_eq!(i32::from_le_bytes(b[38..42].try_into().unwrap()), 2835);
    // first pixel lands at the data offset in B,G,R order
    assert_eq!(&b[54..57], &[0, 0, 255]);
}

#[test]
fn bmp_rows_are_padded_with_zeros() {
    // width 1: 3 pixel bytes + 1 padding byte per row
    let out = encode_bmp(&solid(1, 2, [7, 8, 9, 255])).bytes;
    assert_eq!(out.len(), 54 + 8);
    assert_eq!(&out[54..58], &[9, 8, 7, 0]);
    assert_eq!(&out[58..62], &[9, 8, 7, 0]);
}

#[test]
fn raw_is_a_bytewise_rgb_echo() {
    let out = encode_raw(&solid(2, 2, [255, 0, 0, 255]));
    assert_eq!(out.bytes, [255, 0, 0].repeat(4));
    assert_eq!(out.mime_type, "application/octet-stream");
}

#[test]
fn raw_roundtrip_preserves_rgb() {
    let data: Vec<u8> = (0..2 * 2 * 4).map(|i| i as u8).collect();
    let buf = PixelBuffer::new(2, 2, data.clone()).unwrap();
    let out = encode_raw(&buf).bytes;
    for (i, px) in data.chunks_exact(4).enumerate() {
        assert_eq!(&out[i * 3..i * 3 + 3], &px[..3]);
    }
}

#[test]
fn tiff_is_little_endian_single_strip() {
    let out = encode_tiff(&solid(3, 2, [9, 8, 7, 255]));
    assert_eq!(out.mime_type, "image/tiff");
    let b = &out.bytes;
    assert_eq!(&b[..4], &[0x49, 0x49, 0x2A, 0x00]);

    let ifd = u32::from_le_bytes(b[4..8].try_into().unwrap()) as usize;
    assert_eq!(ifd, 8 + 3 * 2 * 3);
    // the strip sits directly after the 8-byte header
    assert_eq!(&b[8..11], &[9, 8, 7]);

    assert_eq!(u16::from_le_bytes(b[ifd..ifd + 2].try_into().unwrap()), 9);
    let mut strip_byte_count = None;
    let mut strip_offset = None;
    for e in 0..9 {
        let off = ifd + 2 + e * 12;
        let tag = u16::from_le_bytes(b[off..off + 2].try_into().unwrap());
        let value = u32::from_le_bytes(b[off + 8..off + 12].try_into().unwrap());
        match tag {
            273 => strip_offset = Some(value),
            279 => strip_byte_count = Some(value),
            _ => {}
        }
    }
    assert_eq!(strip_offset, Some(8));
    assert_eq!(strip_byte_count, Some(18));
}

#[test]
fn eps_wraps_hex_under_a_colorimage_operator() {
    let out = encode_eps(&solid(4, 2, [0xAB, 0xCD, 0xEF, 255]));
    assert_eq!(out.mime_type, "application/postscript");
    let text = String::from_utf8(out.bytes).unwrap();
    assert!(text.starts_with("%!PS-Adobe-3.0 EPSF-3.0\n"));
    assert!(text.contains("%%BoundingBox: 0 0 4 2"));
    assert!(text.contains("false 3\ncolorimage"));
    assert!(text.ends_with("%%EOF"));

    let hex: String = text
        .split("colorimage\n")
        .nth(1)
        .unwrap()
        .strip_suffix("\n%%EOF")
        .unwrap()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    // two hex chars per color byte, alpha dropped
    assert_eq!(hex.len(), 4 * 2 * 3 * 2);
    assert!(hex.starts_with("ABCDEF"));
}

#[test]
fn eps_hex_lines_stay_short() {
    let out = encode_eps(&solid(64, 2, [1, 2, 3, 255]));
    let text = String::from_utf8(out.bytes).unwrap();
    for line in text.split("colorimage\n").nth(1).unwrap().lines() {
        assert!(line.len() <= 80, "line too long: {}", line.len());
    }
}

#[test]
fn native_png_roundtrips_pixels() {
    let buf = solid(2, 2, [1, 2, 3, 255]);
    let out = encode_native(&buf, image::ImageFormat::Png, 0.92).unwrap();
    assert_eq!(out.mime_type, "image/png");
    let back = image::load_from_memory(&out.bytes).unwrap().to_rgba8();
    assert_eq!(back.dimensions(), (2, 2));
    assert_eq!(back.into_raw(), buf.data);
}

#[test]
fn native_jpeg_accepts_flattened_rgba() {
    let out = encode_native(&solid(8, 8, [200, 10, 10, 255]), image::ImageFormat::Jpeg, 0.92).unwrap();
    assert_eq!(out.mime_type, "image/jpeg");
    assert_eq!(&out.bytes[..2], &[0xFF, 0xD8]); // SOI marker
}
