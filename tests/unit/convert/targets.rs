use super::*;

#[test]
fn audio_targets_route_to_exactly_one_container() {
    assert_eq!(AudioTarget::Wav.container(), PcmContainer::Wav);
    assert_eq!(AudioTarget::Flac.container(), PcmContainer::Wav);
    assert_eq!(AudioTarget::Mp3.container(), PcmContainer::Wav);
    assert_eq!(AudioTarget::Opus.container(), PcmContainer::Wav);
    assert_eq!(AudioTarget::Dsd.container(), PcmContainer::RawPcm);
    assert_eq!(AudioTarget::Pcm.container(), PcmContainer::RawPcm);
    assert_eq!(AudioTarget::Au.container(), PcmContainer::Au);
}

#[test]
fn audio_downgrades_are_flagged() {
    assert!(!AudioTarget::Wav.is_downgraded());
    assert!(!AudioTarget::Au.is_downgraded());
    assert!(!AudioTarget::Pcm.is_downgraded());
    assert!(AudioTarget::Mp3.is_downgraded());
    assert!(AudioTarget::Flac.is_downgraded());
    assert!(AudioTarget::Dsd.is_downgraded());
}

#[test]
fn raster_routing_prefers_custom_encoders() {
    assert_eq!(RasterTarget::Bmp.codec(), RasterCodec::Bmp);
    assert_eq!(RasterTarget::Tiff.codec(), RasterCodec::Tiff);
    assert_eq!(RasterTarget::Eps.codec(), RasterCodec::Eps);
    assert_eq!(RasterTarget::Raw.codec(), RasterCodec::Raw);
    assert_eq!(
        RasterTarget::Jpeg.codec(),
        RasterCodec::Native(image::ImageFormat::Jpeg)
    );
}

#[test]
fn encoderless_raster_targets_downgrade_to_png() {
    for t in [RasterTarget::Avif, RasterTarget::Heic, RasterTarget::Svg] {
        assert_eq!(t.codec(), RasterCodec::Native(image::ImageFormat::Png));
        assert!(t.is_downgraded());
    }
    assert!(!RasterTarget::Png.is_downgraded());
}

#[test]
fn mime_lookup_roundtrips_canonical_tags() {
    for t in [
        RasterTarget::Png,
        RasterTarget::Jpeg,
        RasterTarget::Webp,
        RasterTarget::Bmp,
        RasterTarget::Tiff,
        RasterTarget::Eps,
    ] {
        assert_eq!(RasterTarget::from_mime(t.mime()), Some(t));
    }
    for t in [
        AudioTarget::Wav,
        AudioTarget::Flac,
        AudioTarget::Au,
        AudioTarget::Opus,
        AudioTarget::ThreeGa,
    ] {
        assert_eq!(AudioTarget::from_mime(t.mime()), Some(t));
    }
}

#[test]
fn unknown_mimes_are_unsupported_format_errors() {
    assert!(matches!(
        resolve_raster_mime("application/x-florp"),
        Err(RemediaError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        resolve_audio_mime("audio/x-florp"),
        Err(RemediaError::UnsupportedFormat(_))
    ));
}

#[test]
fn extensions_are_a_caller_courtesy() {
    assert_eq!(RasterTarget::Jpeg.extension(), "jpg");
    assert_eq!(RasterTarget::Raw.extension(), "bin");
    assert_eq!(AudioTarget::Alac.extension(), "m4a");
    assert_eq!(AudioTarget::ThreeGa.extension(), "3ga");
    assert_eq!(AudioTarget::Dsd.extension(), "dsf");
}
