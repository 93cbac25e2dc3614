use super::*;

fn stereo(left: Vec<f32>, right: Vec<f32>, rate: u32) -> AudioSampleBuffer {
    AudioSampleBuffer::new(rate, vec![left, right]).unwrap()
}

#[test]
fn separation_requires_stereo() {
    let mono = AudioSampleBuffer::new(44100, vec![vec![0.0; 8]]).unwrap();
    let err = separate(&mono, SeparationMode::Instrumental).unwrap_err();
    assert!(matches!(err, RemediaError::Input(_)));
    let err = separate(&mono, SeparationMode::Vocal).unwrap_err();
    assert!(matches!(err, RemediaError::Input(_)));
}

#[test]
fn identical_channels_cancel_to_silence() {
    let buf = stereo(vec![1.0; 4], vec![1.0; 4], 44100);
    let out = separate(&buf, SeparationMode::Instrumental).unwrap();
    assert_eq!(out.channel_count(), 1);
    assert_eq!(out.channels[0], vec![0.0; 4]);
}

#[test]
fn phase_cancellation_subtracts_right_from_left() {
    let buf = stereo(vec![0.5, -0.5], vec![0.25, 0.25], 44100);
    let out = separate(&buf, SeparationMode::Instrumental).unwrap();
    assert_eq!(out.channels[0], vec![0.25, -0.75]);
}

#[test]
fn vocal_band_pass_rejects_rumble_and_keeps_midrange() {
    let rate = 44100u32;
    let frames = 8192;
    let tone = |freq: f32| -> Vec<f32> {
        (0..frames)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / rate as f32).sin())
            .collect()
    };
    // measure after the filter transient has settled
    let rms_tail = |samples: &[f32]| -> f32 {
        let tail = &samples[samples.len() / 2..];
        (tail.iter().map(|s| s * s).sum::<f32>() / tail.len() as f32).sqrt()
    };

    let low = separate(&stereo(tone(50.0), tone(50.0), rate), SeparationMode::Vocal).unwrap();
    let mid = separate(&stereo(tone(1000.0), tone(1000.0), rate), SeparationMode::Vocal).unwrap();
    assert!(rms_tail(&low.channels[0]) < 0.15, "50 Hz should be rejected");
    assert!(rms_tail(&mid.channels[0]) > 0.5, "1 kHz should pass");
}

#[test]
fn vocal_output_is_mono_at_the_source_rate() {
    let buf = stereo(vec![0.1; 64], vec![0.3; 64], 22050);
    let out = separate(&buf, SeparationMode::Vocal).unwrap();
    assert_eq!(out.channel_count(), 1);
    assert_eq!(out.sample_rate, 22050);
    assert_eq!(out.frame_count(), 64);
}

#[test]
fn extra_channels_beyond_stereo_are_ignored() {
    let buf = AudioSampleBuffer::new(
        44100,
        vec![vec![0.5; 4], vec![0.5; 4], vec![0.9; 4]],
    )
    .unwrap();
    let out = separate(&buf, SeparationMode::Instrumental).unwrap();
    assert_eq!(out.channels[0], vec![0.0; 4]);
}
