use super::*;

#[test]
fn removes_near_matches_below_cutoff() {
    // distance((250,250,250),(255,255,255)) = sqrt(75) ~ 8.66 < 220.5
    let mut buf = PixelBuffer::new(1, 1, vec![250, 250, 250, 255]).unwrap();
    key_out_color(&mut buf, Rgb::new(255, 255, 255), Tolerance::new(50.0).unwrap());
    assert_eq!(buf.data, vec![250, 250, 250, 0]);
}

#[test]
fn rgb_channels_stay_untouched() {
    let mut buf = PixelBuffer::new(1, 1, vec![0, 250, 5, 200]).unwrap();
    key_out_color(&mut buf, Rgb::new(0, 255, 0), Tolerance::new(10.0).unwrap());
    assert_eq!(buf.data, vec![0, 250, 5, 0]);
}

#[test]
fn tolerance_zero_removes_nothing_even_on_exact_match() {
    // distance 0 is not strictly below a cutoff of 0
    let mut buf = PixelBuffer::new(1, 1, vec![9, 9, 9, 255]).unwrap();
    key_out_color(&mut buf, Rgb::new(9, 9, 9), Tolerance::new(0.0).unwrap());
    assert_eq!(buf.data[3], 255);
}

#[test]
fn exact_match_removed_for_any_positive_tolerance() {
    let mut buf = PixelBuffer::new(1, 1, vec![9, 9, 9, 255]).unwrap();
    key_out_color(&mut buf, Rgb::new(9, 9, 9), Tolerance::new(0.1).unwrap());
    assert_eq!(buf.data[3], 0);
}

#[test]
fn keying_is_idempotent_on_alpha() {
    let mut buf = PixelBuffer::new(2, 1, vec![0, 255, 0, 255, 200, 10, 10, 255]).unwrap();
    let reference = Rgb::new(0, 255, 0);
    let tolerance = Tolerance::new(20.0).unwrap();
    key_out_color(&mut buf, reference, tolerance);
    let once = buf.clone();
    key_out_color(&mut buf, reference, tolerance);
    assert_eq!(buf, once);
    assert_eq!(buf.data[3], 0);
    assert_eq!(buf.data[7], 255);
}

#[test]
fn sampling_reads_nearest_pixel_and_formats_hex() {
    let buf = PixelBuffer::new(2, 1, vec![255, 0, 170, 255, 0, 255, 0, 255]).unwrap();
    let s = sample_pixel(&buf, 0, 0).unwrap();
    assert_eq!(s.rgb, Rgb::new(255, 0, 170));
    assert_eq!(s.hex, "#FF00AA");
}

#[test]
fn sampling_clamps_out_of_bounds_coordinates() {
    let buf = PixelBuffer::new(2, 1, vec![255, 0, 170, 255, 0, 255, 0, 255]).unwrap();
    let s = sample_pixel(&buf, 99, 99).unwrap();
    assert_eq!(s.rgb, Rgb::new(0, 255, 0));
}

#[test]
fn sampling_an_empty_buffer_fails() {
    let buf = PixelBuffer::new(0, 0, Vec::new()).unwrap();
    assert!(sample_pixel(&buf, 0, 0).is_err());
}
