use image::ImageFormat;

use crate::foundation::error::{RemediaError, RemediaResult};

/// Requested raster output container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterTarget {
    Png,
    Jpeg,
    Webp,
    Gif,
    Ico,
    Avif,
    Heic,
    Svg,
    Bmp,
    Tiff,
    Eps,
    Raw,
}

/// The encoder a raster target actually routes to. Closed set: a custom
/// binary encoder, or delegation to one of the `image` crate's codecs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RasterCodec {
    Bmp,
    Tiff,
    Eps,
    Raw,
    Native(ImageFormat),
}

impl RasterTarget {
    /// The MIME tag of the requested container (not necessarily of the
    /// produced one; see [`RasterTarget::codec`] for downgrades).
    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Webp => "image/webp",
            Self::Gif => "image/gif",
            Self::Ico => "image/x-icon",
            Self::Avif => "image/avif",
            Self::Heic => "image/heic",
            Self::Svg => "image/svg+xml",
            Self::Bmp => "image/bmp",
            Self::Tiff => "image/tiff",
            Self::Eps => "application/postscript",
            Self::Raw => "application/octet-stream",
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/webp" => Some(Self::Webp),
            "image/gif" => Some(Self::Gif),
            "image/x-icon" | "image/vnd.microsoft.icon" => Some(Self::Ico),
            "image/avif" => Some(Self::Avif),
            "image/heic" => Some(Self::Heic),
            "image/svg+xml" => Some(Self::Svg),
            "image/bmp" => Some(Self::Bmp),
            "image/tiff" => Some(Self::Tiff),
            "application/postscript" => Some(Self::Eps),
            "application/octet-stream" => Some(Self::Raw),
            _ => None,
        }
    }

    /// File extension callers conventionally use for this target. The core
    /// never builds filenames itself; this is a courtesy table.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Webp => "webp",
            Self::Gif => "gif",
            Self::Ico => "ico",
            Self::Avif => "avif",
            Self::Heic => "heic",
            Self::Svg => "svg",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
            Self::Eps => "eps",
            Self::Raw => "bin",
        }
    }

    /// Resolve the encoder for this target.
    ///
    /// AVIF, HEIC and SVG have no client-feasible raster encoder here and
    /// deliberately downgrade to PNG, mirroring the platform fallback the
    /// original tool relied on.
    pub fn codec(self) -> RasterCodec {
        match self {
            Self::Bmp => RasterCodec::Bmp,
            Self::Tiff => RasterCodec::Tiff,
            Self::Eps => RasterCodec::Eps,
            Self::Raw => RasterCodec::Raw,
            Self::Png | Self::Avif | Self::Heic | Self::Svg => RasterCodec::Native(ImageFormat::Png),
            Self::Jpeg => RasterCodec::Native(ImageFormat::Jpeg),
            Self::Webp => RasterCodec::Native(ImageFormat::WebP),
            Self::Gif => RasterCodec::Native(ImageFormat::Gif),
            Self::Ico => RasterCodec::Native(ImageFormat::Ico),
        }
    }

    /// Whether the produced container differs from the requested one.
    pub fn is_downgraded(self) -> bool {
        matches!(self, Self::Avif | Self::Heic | Self::Svg)
    }
}

/// Resolve a caller-supplied MIME tag or fail with the unsupported-format
/// error kind.
pub fn resolve_raster_mime(mime: &str) -> RemediaResult<RasterTarget> {
    RasterTarget::from_mime(mime)
        .ok_or_else(|| RemediaError::unsupported(format!("no raster encoder for '{mime}'")))
}

/// Requested audio output container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioTarget {
    Wav,
    Mp3,
    Flac,
    Aac,
    Ogg,
    Wma,
    M4a,
    Alac,
    Dsd,
    Pcm,
    Apc,
    Cda,
    #[serde(rename = "3ga")]
    ThreeGa,
    Au,
    Mqa,
    Opus,
    Raw,
}

/// The PCM container an audio target actually routes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PcmContainer {
    Wav,
    Au,
    RawPcm,
}

impl AudioTarget {
    pub fn mime(self) -> &'static str {
        match self {
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mpeg",
            Self::Flac => "audio/flac",
            Self::Aac => "audio/aac",
            Self::Ogg => "audio/ogg",
            Self::Wma => "audio/x-ms-wma",
            Self::M4a => "audio/mp4",
            Self::Alac => "audio/alac",
            Self::Dsd => "audio/dsd",
            Self::Pcm => "audio/pcm",
            Self::Apc => "audio/apc",
            Self::Cda => "application/x-cdf",
            Self::ThreeGa => "audio/3ga",
            Self::Au => "audio/basic",
            Self::Mqa => "audio/mqa",
            Self::Opus => "audio/opus",
            Self::Raw => "application/octet-stream",
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "audio/wav" | "audio/x-wav" => Some(Self::Wav),
            "audio/mpeg" => Some(Self::Mp3),
            "audio/flac" => Some(Self::Flac),
            "audio/aac" => Some(Self::Aac),
            "audio/ogg" => Some(Self::Ogg),
            "audio/x-ms-wma" => Some(Self::Wma),
            "audio/mp4" | "audio/x-m4a" => Some(Self::M4a),
            "audio/alac" => Some(Self::Alac),
            "audio/dsd" => Some(Self::Dsd),
            "audio/pcm" => Some(Self::Pcm),
            "audio/apc" => Some(Self::Apc),
            "application/x-cdf" => Some(Self::Cda),
            "audio/3ga" => Some(Self::ThreeGa),
            "audio/basic" => Some(Self::Au),
            "audio/mqa" => Some(Self::Mqa),
            "audio/opus" => Some(Self::Opus),
            "application/octet-stream" => Some(Self::Raw),
            _ => None,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Wav => "wav",
            Self::Mp3 => "mp3",
            Self::Flac => "flac",
            Self::Aac => "aac",
            Self::Ogg => "ogg",
            Self::Wma => "wma",
            Self::M4a => "m4a",
            Self::Alac => "m4a",
            Self::Dsd => "dsf",
            Self::Pcm => "pcm",
            Self::Apc => "apc",
            Self::Cda => "cda",
            Self::ThreeGa => "3ga",
            Self::Au => "au",
            Self::Mqa => "mqa",
            Self::Opus => "opus",
            Self::Raw => "bin",
        }
    }

    /// Resolve the PCM container for this target.
    ///
    /// Targets without a real client-feasible encoder (the lossy and
    /// lossless compressed families) are deliberately downgraded to WAV —
    /// a documented compatibility substitution, not a bug. DSD dumps to
    /// raw PCM.
    pub fn container(self) -> PcmContainer {
        match self {
            Self::Au => PcmContainer::Au,
            Self::Pcm | Self::Raw | Self::Dsd => PcmContainer::RawPcm,
            Self::Wav
            | Self::Mp3
            | Self::Flac
            | Self::Aac
            | Self::Ogg
            | Self::Wma
            | Self::M4a
            | Self::Alac
            | Self::Apc
            | Self::Cda
            | Self::ThreeGa
            | Self::Mqa
            | Self::Opus => PcmContainer::Wav,
        }
    }

    /// Whether the produced container differs from the requested one.
    pub fn is_downgraded(self) -> bool {
        !matches!(self, Self::Wav | Self::Au | Self::Pcm | Self::Raw)
    }
}

/// Resolve a caller-supplied MIME tag or fail with the unsupported-format
/// error kind.
pub fn resolve_audio_mime(mime: &str) -> RemediaResult<AudioTarget> {
    AudioTarget::from_mime(mime)
        .ok_or_else(|| RemediaError::unsupported(format!("no audio encoder for '{mime}'")))
}

#[cfg(test)]
#[path = "../../tests/unit/convert/targets.rs"]
mod tests;
