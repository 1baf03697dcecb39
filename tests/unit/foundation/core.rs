use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert!(!r.contains_i64(-3));
    assert!(r.contains_i64(3));
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::frames(5, 2).is_err());
    assert!(FrameRange::frames(5, 5).unwrap().is_empty());
}

#[test]
fn clamp_i64_pins_negative_and_late_frames() {
    let r = FrameRange::frames(0, 100).unwrap();
    assert_eq!(r.clamp_i64(-40), FrameIndex(0));
    assert_eq!(r.clamp_i64(42), FrameIndex(42));
    assert_eq!(r.clamp_i64(10_000), FrameIndex(99));
}

#[test]
fn overlap_frames_counts_shared_window() {
    let a = FrameRange::frames(0, 310).unwrap();
    let b = FrameRange::frames(290, 600).unwrap();
    assert_eq!(a.overlap_frames(b), 20);
    let c = FrameRange::frames(400, 500).unwrap();
    assert_eq!(a.overlap_frames(c), 0);
}

#[test]
fn fps_converts_frames_to_seconds() {
    let fps = Fps::new(30000, 1001).unwrap();
    assert!((fps.frames_to_secs(30.0) - 1.001).abs() < 1e-12);
    assert!((Fps::integer(30).frames_to_secs(45.0) - 1.5).abs() < 1e-12);
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn viewport_center_is_half_extent() {
    let v = Viewport {
        width: 1280,
        height: 720,
    };
    assert_eq!(v.center(), Point::new(640.0, 360.0));
}

#[test]
fn rgba_lerp_clamps_t() {
    let a = Rgba8::rgb(0, 0, 0);
    let b = Rgba8::rgb(200, 100, 50);
    assert_eq!(a.lerp(b, 0.5), Rgba8::rgb(100, 50, 25));
    assert_eq!(a.lerp(b, 7.0), b);
}
