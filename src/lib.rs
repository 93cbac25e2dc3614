//! Remedia is the media conversion core of a client-side "universal
//! converter": decode a source resource, transform it, and hand back one
//! complete binary container plus its MIME tag.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: image bytes -> [`PixelBuffer`] (straight RGBA8), or an
//!    audio resource -> [`AudioSampleBuffer`] (per-channel f32 PCM)
//! 2. **Transform** (optional): filter chain, color-key background
//!    removal, or stereo separation
//! 3. **Encode**: a custom binary encoder (BMP/TIFF/EPS/RAW, WAV/AU/raw
//!    PCM16) or delegation to the `image` crate's native codecs
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Arena-per-call**: every conversion allocates its own buffers and
//!   returns an owned [`EncodedResult`]; nothing is pooled or shared, so
//!   concurrent conversions need no coordination.
//! - **Fail fast**: encoders either produce a complete well-formed
//!   container or a typed [`RemediaError`]; partial output is never
//!   returned. No retries, timeouts, or cancellation in the core.
//! - **Decode is a boundary**: image decoding delegates to the `image`
//!   crate; compressed audio decoding delegates to the system `ffmpeg`
//!   behind the `media-ffmpeg` feature. Both are injected capabilities,
//!   not core logic.
#![forbid(unsafe_code)]

mod assets;
mod audio;
mod convert;
mod effects;
mod encode;
mod foundation;

pub use assets::decode::{decode_pixels, flatten_onto_white};
pub use assets::media::{
    AudioSampleBuffer, AudioSourceInfo, decode_audio, is_ffmpeg_available, probe_audio,
};
pub use audio::separate::{SeparationMode, VOCAL_HIGHPASS_HZ, VOCAL_LOWPASS_HZ, separate};
pub use convert::pipeline::{
    DEFAULT_QUALITY, apply_filter, convert_audio, convert_raster, pick_color, remove_background,
    separate_to_wav,
};
pub use convert::targets::{
    AudioTarget, PcmContainer, RasterCodec, RasterTarget, resolve_audio_mime, resolve_raster_mime,
};
pub use effects::filter::{Filter, apply_filters, parse_filters};
pub use effects::keying::{key_out_color, sample_pixel};
pub use encode::pcm::{encode_au, encode_raw_pcm, encode_wav, interleave_channels, sample_to_i16};
pub use encode::raster::{
    bmp_row_padding, encode_bmp, encode_eps, encode_native, encode_raw, encode_tiff, native_mime,
};
pub use foundation::core::{
    EncodedResult, MAX_RGB_DISTANCE, PixelBuffer, Rgb, SampledColor, Tolerance,
};
pub use foundation::error::{RemediaError, RemediaResult};
