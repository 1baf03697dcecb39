use super::*;

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

fn strategies() -> Vec<EasingSpec> {
    vec![
        EasingSpec::default(),
        EasingSpec::Spring(SpringConfig::new(1.0, 120.0, 9.0).unwrap()),
        EasingSpec::CubicBezier(CubicBezier::ease_in_out(20.0)),
        EasingSpec::Exponential(ExponentialDecay {
            half_life_frames: 4.0,
        }),
        EasingSpec::Curve(Curve {
            ease: Ease::OutCubic,
            duration_frames: 15.0,
        }),
    ]
}

#[test]
fn every_strategy_honours_the_progress_contract() {
    for easing in strategies() {
        assert_eq!(easing.evaluate(-3.0, fps30()), 0.0, "{easing:?}");
        assert_eq!(easing.evaluate(0.0, fps30()), 0.0, "{easing:?}");
        let mut prev = 0.0;
        for f in 0..240 {
            let v = easing.evaluate(f as f64, fps30());
            assert!((0.0..=1.0).contains(&v), "{easing:?}: {v}");
            assert!(v + 1e-12 >= prev, "{easing:?} decreased at {f}");
            prev = v;
        }
        assert!(prev > 0.99, "{easing:?} ended at {prev}");
    }
}

#[test]
fn strategies_are_swappable_behind_dyn() {
    let boxed: Vec<Box<dyn Easing>> = vec![
        Box::new(SpringConfig::default()),
        Box::new(Curve {
            ease: Ease::Linear,
            duration_frames: 10.0,
        }),
    ];
    for easing in &boxed {
        assert!(easing.evaluate(5.0, fps30()) > 0.0);
    }
    assert_eq!(boxed[1].evaluate(5.0, fps30()), 0.5);
}

#[test]
fn settle_frames_is_the_first_settled_frame() {
    let fps = fps30();
    for easing in strategies() {
        let n = easing.settle_frames(fps, SETTLE_EPSILON);
        assert!(easing.has_settled(n as f64, fps, SETTLE_EPSILON), "{easing:?}");
        if n > 0 {
            assert!(
                !easing.has_settled((n - 1) as f64, fps, SETTLE_EPSILON),
                "{easing:?}"
            );
        }
    }
}

#[test]
fn default_spring_settles_in_the_documented_window() {
    let n = SpringConfig::default().settle_frames(fps30(), SETTLE_EPSILON);
    assert!((15..=30).contains(&n), "settled after {n} frames");
}

#[test]
fn linear_curve_settles_at_its_duration() {
    let c = Curve {
        ease: Ease::Linear,
        duration_frames: 10.0,
    };
    assert_eq!(c.settle_frames(fps30(), 0.0), 10);
}

#[test]
fn validate_rejects_bad_strategies() {
    let bad_bezier = EasingSpec::CubicBezier(CubicBezier {
        x1: 0.2,
        y1: 1.6,
        x2: 0.5,
        y2: 1.0,
        duration_frames: 10.0,
    });
    assert!(bad_bezier.validate().is_err());
    let zero = EasingSpec::Curve(Curve {
        ease: Ease::Linear,
        duration_frames: 0.0,
    });
    assert!(zero.validate().is_err());
    let exp = EasingSpec::Exponential(ExponentialDecay {
        half_life_frames: -1.0,
    });
    assert!(exp.validate().is_err());
    for easing in strategies() {
        easing.validate().unwrap();
    }
}

#[test]
fn easing_spec_json_shape() {
    let json = serde_json::to_value(EasingSpec::default()).unwrap();
    assert_eq!(json["kind"], "spring");
    assert_eq!(json["damping"], 20.0);

    let parsed: EasingSpec =
        serde_json::from_str(r#"{"kind":"curve","ease":"OutQuad","duration_frames":12}"#).unwrap();
    assert_eq!(
        parsed,
        EasingSpec::Curve(Curve {
            ease: Ease::OutQuad,
            duration_frames: 12.0
        })
    );
}
