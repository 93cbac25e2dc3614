use rayon::prelude::*;

use crate::foundation::{
    core::{PixelBuffer, Rgb, SampledColor, Tolerance},
    error::{RemediaError, RemediaResult},
};

/// Color-keyed background removal.
///
/// Every pixel whose Euclidean RGB distance to `reference` is strictly
/// below the tolerance cutoff gets alpha 0; color channels are left
/// untouched. The strict less-than keeps tolerance 0 from removing
/// anything (distance 0 < 0 is false), and re-running with the same
/// arguments is a no-op on already-keyed pixels.
pub fn key_out_color(buf: &mut PixelBuffer, reference: Rgb, tolerance: Tolerance) {
    if buf.pixel_count() == 0 {
        return;
    }
    let cutoff = tolerance.distance_cutoff();
    let row_bytes = buf.row_bytes();
    buf.data.par_chunks_mut(row_bytes).for_each(|row| {
        for px in row.chunks_exact_mut(4) {
            let color = Rgb::new(px[0], px[1], px[2]);
            if color.distance(reference) < cutoff {
                px[3] = 0;
            }
        }
    });
}

/// Nearest-pixel color sample at integer coordinates.
///
/// Coordinates are clamped to the buffer bounds; no interpolation.
pub fn sample_pixel(buf: &PixelBuffer, x: u32, y: u32) -> RemediaResult<SampledColor> {
    if buf.pixel_count() == 0 {
        return Err(RemediaError::input("cannot sample an empty pixel buffer"));
    }
    let x = x.min(buf.width - 1) as usize;
    let y = y.min(buf.height - 1) as usize;
    let i = (y * buf.width as usize + x) * 4;
    let rgb = Rgb::new(buf.data[i], buf.data[i + 1], buf.data[i + 2]);
    Ok(SampledColor {
        rgb,
        hex: rgb.to_hex(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/effects/keying.rs"]
mod tests;
