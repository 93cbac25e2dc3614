use std::path::Path;

use image::ImageFormat;

use crate::assets::decode::{decode_pixels, flatten_onto_white};
use crate::assets::media::decode_audio;
use crate::audio::separate::{SeparationMode, separate};
use crate::convert::targets::{AudioTarget, PcmContainer, RasterCodec, RasterTarget};
use crate::effects::filter::{apply_filters, parse_filters};
use crate::effects::keying::{key_out_color, sample_pixel};
use crate::encode::pcm::{encode_au, encode_raw_pcm, encode_wav};
use crate::encode::raster::{encode_bmp, encode_eps, encode_native, encode_raw, encode_tiff};
use crate::foundation::{
    core::{EncodedResult, Rgb, SampledColor, Tolerance},
    error::{RemediaError, RemediaResult},
};

/// Default quality for lossy native targets.
pub const DEFAULT_QUALITY: f32 = 0.92;

fn resolve_quality(quality: Option<f32>) -> RemediaResult<f32> {
    let q = quality.unwrap_or(DEFAULT_QUALITY);
    if !q.is_finite() || !(0.0..=1.0).contains(&q) || q == 0.0 {
        return Err(RemediaError::input(format!(
            "quality must be in (0, 1], got {q}"
        )));
    }
    Ok(q)
}

/// Re-encode image bytes into the requested container.
///
/// JPEG and BMP targets flatten transparency onto white first (neither
/// carries alpha). Either a complete well-formed result is returned or a
/// typed error; never partial output.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn convert_raster(
    bytes: &[u8],
    target: RasterTarget,
    quality: Option<f32>,
) -> RemediaResult<EncodedResult> {
    let quality = resolve_quality(quality)?;
    let mut pixels = decode_pixels(bytes)?;
    if matches!(target, RasterTarget::Jpeg | RasterTarget::Bmp) {
        flatten_onto_white(&mut pixels);
    }
    if target.is_downgraded() {
        tracing::debug!(?target, "no native encoder for target; producing png");
    }

    match target.codec() {
        RasterCodec::Bmp => Ok(encode_bmp(&pixels)),
        RasterCodec::Tiff => Ok(encode_tiff(&pixels)),
        RasterCodec::Eps => Ok(encode_eps(&pixels)),
        RasterCodec::Raw => Ok(encode_raw(&pixels)),
        RasterCodec::Native(format) => encode_native(&pixels, format, quality),
    }
}

/// Apply a composable filter spec (`"sepia(50%) contrast(120%)"`) and
/// return the filtered image as PNG.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn apply_filter(bytes: &[u8], spec: &str) -> RemediaResult<EncodedResult> {
    let filters = parse_filters(spec)?;
    let pixels = decode_pixels(bytes)?;
    let filtered = apply_filters(&pixels, &filters)?;
    encode_native(&filtered, ImageFormat::Png, DEFAULT_QUALITY)
}

/// Color-keyed background removal. Output is always PNG regardless of any
/// requested target — transparency is the entire point of the operation.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn remove_background(
    bytes: &[u8],
    reference: Rgb,
    tolerance: Tolerance,
) -> RemediaResult<EncodedResult> {
    let mut pixels = decode_pixels(bytes)?;
    key_out_color(&mut pixels, reference, tolerance);
    encode_native(&pixels, ImageFormat::Png, DEFAULT_QUALITY)
}

/// Nearest-pixel color pick from encoded image bytes.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn pick_color(bytes: &[u8], x: u32, y: u32) -> RemediaResult<SampledColor> {
    let pixels = decode_pixels(bytes)?;
    sample_pixel(&pixels, x, y)
}

/// Decode an audio resource and re-encode it into the requested target's
/// PCM container per the routing table (compressed families downgrade to
/// WAV, DSD to raw PCM).
#[tracing::instrument]
pub fn convert_audio(source_path: &Path, target: AudioTarget) -> RemediaResult<EncodedResult> {
    let buf = decode_audio(source_path)?;
    if target.is_downgraded() {
        tracing::debug!(?target, "no client-side encoder for target; producing pcm fallback");
    }
    Ok(match target.container() {
        PcmContainer::Wav => encode_wav(&buf),
        PcmContainer::Au => encode_au(&buf),
        PcmContainer::RawPcm => encode_raw_pcm(&buf),
    })
}

/// Run a separation heuristic over a stereo source. Output is always WAV,
/// whatever the caller planned to ask for.
#[tracing::instrument]
pub fn separate_to_wav(source_path: &Path, mode: SeparationMode) -> RemediaResult<EncodedResult> {
    let buf = decode_audio(source_path)?;
    let mono = separate(&buf, mode)?;
    Ok(encode_wav(&mono))
}

#[cfg(test)]
#[path = "../../tests/unit/convert/pipeline.rs"]
mod tests;
