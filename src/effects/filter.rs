use rayon::prelude::*;

use crate::foundation::{
    core::PixelBuffer,
    error::{RemediaError, RemediaResult},
};

/// One parsed visual filter. Amounts are fractions (1.0 = 100%); factors
/// are unbounded scale values; blur carries a Gaussian standard deviation
/// in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Filter {
    Grayscale { amount: f32 },
    Sepia { amount: f32 },
    Invert { amount: f32 },
    Brightness { factor: f32 },
    Contrast { factor: f32 },
    HueRotate { degrees: f32 },
    Blur { sigma_px: f32 },
}

/// Parse a composable filter spec string.
///
/// Whitespace-separated `name(arg)` functions applied left to right, e.g.
/// `"sepia(50%) contrast(120%)"`. Percentages may also be written as bare
/// fractions (`sepia(0.5)`); blur takes pixels (`blur(5px)`); hue-rotate
/// takes degrees (`hue-rotate(90deg)`).
pub fn parse_filters(spec: &str) -> RemediaResult<Vec<Filter>> {
    let mut filters = Vec::new();
    for token in spec.split_whitespace() {
        filters.push(parse_one(token)?);
    }
    if filters.is_empty() {
        return Err(RemediaError::input("filter spec must name at least one filter"));
    }
    Ok(filters)
}

fn parse_one(token: &str) -> RemediaResult<Filter> {
    let Some((name, rest)) = token.split_once('(') else {
        return Err(RemediaError::input(format!(
            "filter '{token}' must look like name(value)"
        )));
    };
    let Some(arg) = rest.strip_suffix(')') else {
        return Err(RemediaError::input(format!(
            "filter '{token}' is missing its closing paren"
        )));
    };
    let name = name.trim().to_ascii_lowercase();
    let arg = arg.trim();

    match name.as_str() {
        "grayscale" => Ok(Filter::Grayscale {
            amount: parse_fraction(&name, arg)?.min(1.0),
        }),
        "sepia" => Ok(Filter::Sepia {
            amount: parse_fraction(&name, arg)?.min(1.0),
        }),
        "invert" => Ok(Filter::Invert {
            amount: parse_fraction(&name, arg)?.min(1.0),
        }),
        "brightness" => Ok(Filter::Brightness {
            factor: parse_fraction(&name, arg)?,
        }),
        "contrast" => Ok(Filter::Contrast {
            factor: parse_fraction(&name, arg)?,
        }),
        "hue-rotate" => Ok(Filter::HueRotate {
            degrees: parse_number(&name, arg.strip_suffix("deg").unwrap_or(arg))?,
        }),
        "blur" => {
            let sigma = parse_number(&name, arg.strip_suffix("px").unwrap_or(arg))?;
            if sigma < 0.0 {
                return Err(RemediaError::input("blur radius must be >= 0"));
            }
            Ok(Filter::Blur { sigma_px: sigma })
        }
        _ => Err(RemediaError::input(format!(
            "unknown filter function '{name}'"
        ))),
    }
}

fn parse_number(name: &str, arg: &str) -> RemediaResult<f32> {
    let v: f32 = arg.trim().parse().map_err(|_| {
        RemediaError::input(format!("filter '{name}' has a malformed argument '{arg}'"))
    })?;
    if !v.is_finite() {
        return Err(RemediaError::input(format!(
            "filter '{name}' argument must be finite"
        )));
    }
    Ok(v)
}

/// `"50%"` -> 0.5, `"0.5"` -> 0.5. Always >= 0.
fn parse_fraction(name: &str, arg: &str) -> RemediaResult<f32> {
    let v = match arg.strip_suffix('%') {
        Some(pct) => parse_number(name, pct)? / 100.0,
        None => parse_number(name, arg)?,
    };
    if v < 0.0 {
        return Err(RemediaError::input(format!(
            "filter '{name}' argument must be >= 0"
        )));
    }
    Ok(v)
}

/// Apply a parsed filter chain over the whole buffer, in order, producing
/// a new same-size buffer. Alpha is untouched by the color filters; blur
/// spreads all four channels.
pub fn apply_filters(src: &PixelBuffer, filters: &[Filter]) -> RemediaResult<PixelBuffer> {
    let mut out = src.clone();
    if out.pixel_count() == 0 {
        return Ok(out);
    }
    for f in filters {
        match *f {
            Filter::Blur { sigma_px } => {
                out.data = blur_rgba8(&out.data, out.width, out.height, sigma_px)?;
            }
            _ => {
                let (m, offset) = color_matrix(*f);
                apply_color_matrix(&mut out, m, offset);
            }
        }
    }
    Ok(out)
}

/// The affine RGB transform for every non-blur filter: `out = m*rgb + o`.
/// Coefficients follow the CSS/SVG filter definitions.
fn color_matrix(f: Filter) -> ([[f32; 3]; 3], [f32; 3]) {
    const IDENTITY: [[f32; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    match f {
        Filter::Grayscale { amount } => {
            let lum = [0.2126, 0.7152, 0.0722];
            (blend_toward(IDENTITY, [lum, lum, lum], amount), [0.0; 3])
        }
        Filter::Sepia { amount } => {
            let sepia = [
                [0.393, 0.769, 0.189],
                [0.349, 0.686, 0.168],
                [0.272, 0.534, 0.131],
            ];
            (blend_toward(IDENTITY, sepia, amount), [0.0; 3])
        }
        Filter::Invert { amount } => (
            scale_matrix(1.0 - 2.0 * amount),
            [255.0 * amount; 3],
        ),
        Filter::Brightness { factor } => (scale_matrix(factor), [0.0; 3]),
        Filter::Contrast { factor } => (scale_matrix(factor), [127.5 * (1.0 - factor); 3]),
        Filter::HueRotate { degrees } => {
            let (sin, cos) = degrees.to_radians().sin_cos();
            (
                [
                    [
                        0.213 + cos * 0.787 - sin * 0.213,
                        0.715 - cos * 0.715 - sin * 0.715,
                        0.072 - cos * 0.072 + sin * 0.928,
                    ],
                    [
                        0.213 - cos * 0.213 + sin * 0.143,
                        0.715 + cos * 0.285 + sin * 0.140,
                        0.072 - cos * 0.072 - sin * 0.283,
                    ],
                    [
                        0.213 - cos * 0.213 - sin * 0.787,
                        0.715 - cos * 0.715 + sin * 0.715,
                        0.072 + cos * 0.928 + sin * 0.072,
                    ],
                ],
                [0.0; 3],
            )
        }
        Filter::Blur { .. } => (IDENTITY, [0.0; 3]),
    }
}

fn scale_matrix(s: f32) -> [[f32; 3]; 3] {
    [[s, 0.0, 0.0], [0.0, s, 0.0], [0.0, 0.0, s]]
}

fn blend_toward(a: [[f32; 3]; 3], b: [[f32; 3]; 3], t: f32) -> [[f32; 3]; 3] {
    let mut out = [[0.0f32; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            out[i][j] = a[i][j] + (b[i][j] - a[i][j]) * t;
        }
    }
    out
}

fn apply_color_matrix(buf: &mut PixelBuffer, m: [[f32; 3]; 3], offset: [f32; 3]) {
    let row_bytes = buf.row_bytes();
    buf.data.par_chunks_mut(row_bytes).for_each(|row| {
        for px in row.chunks_exact_mut(4) {
            let (r, g, b) = (
                f32::from(px[0]),
                f32::from(px[1]),
                f32::from(px[2]),
            );
            for c in 0..3 {
                let v = m[c][0] * r + m[c][1] * g + m[c][2] * b + offset[c];
                px[c] = v.round().clamp(0.0, 255.0) as u8;
            }
        }
    });
}

/// Separable Gaussian blur over straight RGBA8 with a Q16 fixed-point
/// kernel and clamp-to-edge sampling. Kernel support is 3 sigma per side.
fn blur_rgba8(src: &[u8], width: u32, height: u32, sigma: f32) -> RemediaResult<Vec<u8>> {
    if sigma <= 0.0 {
        return Ok(src.to_vec());
    }
    let radius = ((sigma * 3.0).ceil() as u32).clamp(1, 256);
    let kernel = gaussian_kernel_q16(radius, sigma)?;

    let mut tmp = vec![0u8; src.len()];
    let mut out = vec![0u8; src.len()];
    horizontal_pass(src, &mut tmp, width, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

/// Normalized Gaussian weights in Q16 so the passes stay in integer math.
fn gaussian_kernel_q16(radius: u32, sigma: f32) -> RemediaResult<Vec<u32>> {
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(RemediaError::input("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let sigma = f64::from(sigma);
    let denom = 2.0 * sigma * sigma;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = (((wf / sum) * 65536.0).round() as i64).clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Pin the total to exactly 1.0 in Q16 so flat regions stay flat.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let row_bytes = width as usize * 4;
    dst.par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let src_row = &src[y * row_bytes..(y + 1) * row_bytes];
            for x in 0..w {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let sx = (x + ki as i32 - radius).clamp(0, w - 1) as usize;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(src_row[sx * 4 + c]);
                    }
                }
                for c in 0..4 {
                    dst_row[x as usize * 4 + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let h = height as i32;
    let row_bytes = width as usize * 4;
    dst.par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(y, dst_row)| {
            for x in 0..width as usize {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let sy = (y as i32 + ki as i32 - radius).clamp(0, h - 1) as usize;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(src[sy * row_bytes + x * 4 + c]);
                    }
                }
                for c in 0..4 {
                    dst_row[x * 4 + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn q16_to_u8(acc: u64) -> u8 {
    (((acc + 32768) >> 16).min(255)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/filter.rs"]
mod tests;
