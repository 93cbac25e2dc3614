use crate::foundation::error::{RemediaError, RemediaResult};

/// Maximum Euclidean distance between two colors in 8-bit RGB space.
///
/// The true maximum is sqrt(255^2 * 3) = 441.67..; the keying tolerance is
/// mapped onto a flat 441 to match the percentage scale callers see.
pub const MAX_RGB_DISTANCE: f32 = 441.0;

/// Straight-alpha RGBA8 raster, row-major, 8 bits per channel.
///
/// Unlike a renderer surface this is never premultiplied: the custom
/// encoders drop or flatten alpha themselves and need the original color
/// values intact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>, // len == width * height * 4
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> RemediaResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| RemediaError::input("pixel buffer dimensions overflow"))?;
        if data.len() != expected {
            return Err(RemediaError::input(format!(
                "pixel buffer expects {expected} bytes for {width}x{height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn row_bytes(&self) -> usize {
        self.width as usize * 4
    }
}

/// An 8-bit RGB color, used as the keying reference and picker result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#RRGGBB` string (leading `#` optional, case-insensitive).
    pub fn from_hex(s: &str) -> RemediaResult<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(RemediaError::input(format!(
                "color must be 6 hex digits (like #00FF00), got '{s}'"
            )));
        }
        let channel = |i: usize| -> RemediaResult<u8> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| RemediaError::input(format!("malformed hex color '{s}'")))
        };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
        })
    }

    /// `#RRGGBB`, uppercase.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Euclidean distance to another color in RGB space.
    pub fn distance(self, other: Rgb) -> f32 {
        let dr = f32::from(self.r) - f32::from(other.r);
        let dg = f32::from(self.g) - f32::from(other.g);
        let db = f32::from(self.b) - f32::from(other.b);
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

/// Keying tolerance in percent (0-100), mapped linearly onto the
/// 0-[`MAX_RGB_DISTANCE`] color-distance range.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Tolerance(pub f32);

impl Tolerance {
    pub fn new(percent: f32) -> RemediaResult<Self> {
        if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
            return Err(RemediaError::input(format!(
                "tolerance must be a percentage in 0..=100, got {percent}"
            )));
        }
        Ok(Self(percent))
    }

    /// The distance below which a pixel is keyed out (strict less-than).
    pub fn distance_cutoff(self) -> f32 {
        self.0 / 100.0 * MAX_RGB_DISTANCE
    }
}

/// A nearest-pixel color sample plus its `#RRGGBB` rendering.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SampledColor {
    pub rgb: Rgb,
    pub hex: String,
}

/// A finished conversion: one complete binary container plus its MIME tag.
///
/// Ownership transfers to the caller; the core holds nothing back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodedResult {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
}

impl EncodedResult {
    pub fn new(bytes: Vec<u8>, mime_type: &'static str) -> Self {
        Self { bytes, mime_type }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
