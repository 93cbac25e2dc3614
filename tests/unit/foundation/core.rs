use super::*;

#[test]
fn pixel_buffer_validates_length() {
    assert!(PixelBuffer::new(2, 2, vec![0; 16]).is_ok());
    let err = PixelBuffer::new(2, 2, vec![0; 15]).unwrap_err();
    assert!(matches!(err, RemediaError::Input(_)));
}

#[test]
fn pixel_buffer_accepts_zero_sized_images() {
    let buf = PixelBuffer::new(0, 7, Vec::new()).unwrap();
    assert_eq!(buf.pixel_count(), 0);
}

#[test]
fn tolerance_maps_percent_onto_distance() {
    assert_eq!(Tolerance::new(50.0).unwrap().distance_cutoff(), 220.5);
    assert_eq!(Tolerance::new(0.0).unwrap().distance_cutoff(), 0.0);
    assert_eq!(Tolerance::new(100.0).unwrap().distance_cutoff(), MAX_RGB_DISTANCE);
    assert!(Tolerance::new(100.5).is_err());
    assert!(Tolerance::new(-1.0).is_err());
    assert!(Tolerance::new(f32::NAN).is_err());
}

#[test]
fn rgb_hex_roundtrip() {
    let c = Rgb::from_hex("#8A2BE2").unwrap();
    assert_eq!(c, Rgb::new(0x8A, 0x2B, 0xE2));
    assert_eq!(c.to_hex(), "#8A2BE2");
    assert_eq!(Rgb::from_hex("00ff00").unwrap(), Rgb::new(0, 255, 0));
    assert!(Rgb::from_hex("#12345").is_err());
    assert!(Rgb::from_hex("zzzzzz").is_err());
}

#[test]
fn rgb_distance_is_euclidean() {
    let d = Rgb::new(0, 0, 0).distance(Rgb::new(3, 4, 0));
    assert!((d - 5.0).abs() < 1e-6);
    assert_eq!(Rgb::new(9, 9, 9).distance(Rgb::new(9, 9, 9)), 0.0);
}
