use std::path::Path;

use crate::foundation::error::{RemediaError, RemediaResult};

/// Decoded multi-channel PCM with the source's native sample rate and
/// channel count preserved.
#[derive(Clone, Debug)]
pub struct AudioSampleBuffer {
    pub sample_rate: u32,
    /// One `Vec<f32>` per channel, all of identical length. Samples are
    /// nominally in [-1, 1]; encoders clamp, not this type.
    pub channels: Vec<Vec<f32>>,
}

impl AudioSampleBuffer {
    pub fn new(sample_rate: u32, channels: Vec<Vec<f32>>) -> RemediaResult<Self> {
        if sample_rate == 0 {
            return Err(RemediaError::input("audio sample rate must be > 0"));
        }
        if channels.is_empty() {
            return Err(RemediaError::input("audio buffer needs at least one channel"));
        }
        let frame_count = channels[0].len();
        if channels.iter().any(|c| c.len() != frame_count) {
            return Err(RemediaError::input(
                "audio channels must all have the same length",
            ));
        }
        Ok(Self {
            sample_rate,
            channels,
        })
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    pub fn frame_count(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }
}

/// Stream parameters reported by the external probe.
#[derive(Clone, Copy, Debug)]
pub struct AudioSourceInfo {
    pub sample_rate: u32,
    pub channel_count: u16,
}

/// Whether the external decoder is available on PATH.
pub fn is_ffmpeg_available() -> bool {
    std::process::Command::new("ffmpeg")
        .arg("-version")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(feature = "media-ffmpeg")]
pub fn probe_audio(source_path: &Path) -> RemediaResult<AudioSourceInfo> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        sample_rate: Option<String>,
        channels: Option<u16>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        streams: Vec<ProbeStream>,
    }

    let out = std::process::Command::new("ffprobe")
        .args(["-v", "error", "-print_format", "json", "-show_streams"])
        .arg(source_path)
        .output()
        .map_err(|e| RemediaError::decode(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(RemediaError::decode(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let parsed: ProbeOut = serde_json::from_slice(&out.stdout)
        .map_err(|e| RemediaError::decode(format!("ffprobe json parse failed: {e}")))?;
    let audio_stream = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("audio"))
        .ok_or_else(|| RemediaError::decode("no audio stream found"))?;
    let sample_rate = audio_stream
        .sample_rate
        .as_deref()
        .and_then(|s| s.parse::<u32>().ok())
        .filter(|&r| r > 0)
        .ok_or_else(|| RemediaError::decode("missing audio sample rate from ffprobe"))?;
    let channel_count = audio_stream
        .channels
        .filter(|&c| c > 0)
        .ok_or_else(|| RemediaError::decode("missing audio channel count from ffprobe"))?;

    Ok(AudioSourceInfo {
        sample_rate,
        channel_count,
    })
}

/// Decode a compressed/container audio resource into per-channel f32 PCM,
/// preserving the native sample rate and channel count.
#[cfg(feature = "media-ffmpeg")]
pub fn decode_audio(source_path: &Path) -> RemediaResult<AudioSampleBuffer> {
    let info = probe_audio(source_path)?;

    let out = std::process::Command::new("ffmpeg")
        .args(["-v", "error", "-i"])
        .arg(source_path)
        .args(["-vn", "-f", "f32le", "-acodec", "pcm_f32le", "pipe:1"])
        .output()
        .map_err(|e| RemediaError::decode(format!("failed to run ffmpeg for audio decode: {e}")))?;
    if !out.status.success() {
        return Err(RemediaError::decode(format!(
            "ffmpeg audio decode failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }

    let channel_count = usize::from(info.channel_count);
    let frame_bytes = channel_count * 4;
    if !out.stdout.len().is_multiple_of(frame_bytes) {
        return Err(RemediaError::decode(
            "decoded audio byte length is not aligned to whole frames",
        ));
    }

    let frame_count = out.stdout.len() / frame_bytes;
    let mut channels: Vec<Vec<f32>> = (0..channel_count)
        .map(|_| Vec::with_capacity(frame_count))
        .collect();
    for (i, chunk) in out.stdout.chunks_exact(4).enumerate() {
        let sample = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        channels[i % channel_count].push(sample);
    }

    AudioSampleBuffer::new(info.sample_rate, channels)
}

#[cfg(not(feature = "media-ffmpeg"))]
pub fn probe_audio(_source_path: &Path) -> RemediaResult<AudioSourceInfo> {
    Err(RemediaError::decode(
        "audio sources require the 'media-ffmpeg' feature",
    ))
}

#[cfg(not(feature = "media-ffmpeg"))]
pub fn decode_audio(_source_path: &Path) -> RemediaResult<AudioSampleBuffer> {
    Err(RemediaError::decode(
        "audio sources require the 'media-ffmpeg' feature",
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/media.rs"]
mod tests;
