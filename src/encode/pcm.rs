use crate::assets::media::AudioSampleBuffer;
use crate::foundation::core::EncodedResult;

/// Interleave per-channel samples frame-major: `out[frame*n + channel]`.
pub fn interleave_channels(buf: &AudioSampleBuffer) -> Vec<f32> {
    let channels = buf.channel_count();
    let frames = buf.frame_count();
    let mut out = vec![0.0f32; frames * channels];
    for (ch, samples) in buf.channels.iter().enumerate() {
        for (frame, &s) in samples.iter().enumerate() {
            out[frame * channels + ch] = s;
        }
    }
    out
}

/// Quantize one float sample to signed 16-bit PCM.
///
/// The scaling is asymmetric on purpose: negatives map by 32768 so -1.0
/// reaches the full -32768, non-negatives by 32767 so 1.0 stays in range.
/// Truncation (not rounding) matches the reference byte streams exactly.
pub fn sample_to_i16(sample: f32) -> i16 {
    let s = sample.clamp(-1.0, 1.0);
    if s < 0.0 {
        (s * 32768.0) as i16
    } else {
        (s * 32767.0) as i16
    }
}

/// Encode as standard RIFF/WAVE, 16-bit PCM, little-endian throughout.
pub fn encode_wav(buf: &AudioSampleBuffer) -> EncodedResult {
    let channels = buf.channel_count() as u16;
    let interleaved = interleave_channels(buf);
    let data_len = (interleaved.len() * 2) as u32;
    let byte_rate = buf.sample_rate * u32::from(channels) * 2;
    let block_align = channels * 2;

    let mut out = Vec::with_capacity(44 + interleaved.len() * 2);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes()); // fmt chunk size
    out.extend_from_slice(&1u16.to_le_bytes()); // format tag: PCM
    out.extend_from_slice(&channels.to_le_bytes());
    out.extend_from_slice(&buf.sample_rate.to_le_bytes());
    out.extend_from_slice(&byte_rate.to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    for &s in &interleaved {
        out.extend_from_slice(&sample_to_i16(s).to_le_bytes());
    }

    EncodedResult::new(out, "audio/wav")
}

/// Encode as Sun/NeXT AU: `.snd` magic, 24-byte header, and 16-bit linear
/// PCM with header fields AND sample data big-endian — deliberately the
/// opposite byte order of the WAV encoder.
pub fn encode_au(buf: &AudioSampleBuffer) -> EncodedResult {
    const HEADER_SIZE: u32 = 24;
    const ENCODING_PCM16: u32 = 3;
    let interleaved = interleave_channels(buf);
    let data_len = (interleaved.len() * 2) as u32;

    let mut out = Vec::with_capacity(HEADER_SIZE as usize + interleaved.len() * 2);
    out.extend_from_slice(b".snd");
    out.extend_from_slice(&HEADER_SIZE.to_be_bytes());
    out.extend_from_slice(&data_len.to_be_bytes());
    out.extend_from_slice(&ENCODING_PCM16.to_be_bytes());
    out.extend_from_slice(&buf.sample_rate.to_be_bytes());
    out.extend_from_slice(&(buf.channel_count() as u32).to_be_bytes());
    for &s in &interleaved {
        out.extend_from_slice(&sample_to_i16(s).to_be_bytes());
    }

    EncodedResult::new(out, "audio/basic")
}

/// Encode as a headerless little-endian interleaved 16-bit PCM stream.
pub fn encode_raw_pcm(buf: &AudioSampleBuffer) -> EncodedResult {
    let interleaved = interleave_channels(buf);
    let mut out = Vec::with_capacity(interleaved.len() * 2);
    for &s in &interleaved {
        out.extend_from_slice(&sample_to_i16(s).to_le_bytes());
    }
    EncodedResult::new(out, "audio/pcm")
}

#[cfg(test)]
#[path = "../../tests/unit/encode/pcm.rs"]
mod tests;
