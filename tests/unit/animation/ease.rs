use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in Ease::ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b);
        assert!(b < c);
    }
}

#[test]
fn cubic_bezier_linear_control_points_is_identity() {
    for t in [0.1, 0.3, 0.5, 0.9] {
        assert!((cubic_bezier(t, 0.0, 0.0, 1.0, 1.0) - t).abs() < 1e-6);
    }
}

#[test]
fn cubic_bezier_ease_out_is_ahead_of_linear() {
    // CSS `ease-out`.
    let v = cubic_bezier(0.5, 0.0, 0.0, 0.58, 1.0);
    assert!(v > 0.5);
    assert!(v < 1.0);
    assert_eq!(cubic_bezier(-1.0, 0.0, 0.0, 0.58, 1.0), 0.0);
    assert_eq!(cubic_bezier(2.0, 0.0, 0.0, 0.58, 1.0), 1.0);
}
