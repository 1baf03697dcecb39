use super::*;

#[test]
fn default_theme_is_valid_and_unscaled() {
    let theme = Theme::default();
    assert!(theme.validate().is_ok());
    assert_eq!(theme.viewport, DESIGN_VIEWPORT);
    assert_eq!(theme.point(10.0, 20.0), Point::new(10.0, 20.0));
    assert_eq!(theme.length(12.0), 12.0);
    assert_eq!(theme.easing(), EasingSpec::Spring(SpringConfig::default()));
}

#[test]
fn layouts_scale_with_the_viewport() {
    let theme = Theme {
        viewport: Viewport {
            width: 1920,
            height: 1080,
        },
        ..Theme::default()
    };
    assert_eq!(theme.point(290.0, 365.0), Point::new(435.0, 547.5));
    assert_eq!(
        theme.rect(0.0, 0.0, 100.0, 50.0),
        Rect::new(0.0, 0.0, 150.0, 75.0)
    );
    assert_eq!(theme.length(10.0), 15.0);
}

#[test]
fn lengths_use_the_smaller_axis() {
    let theme = Theme {
        viewport: Viewport {
            width: 2560,
            height: 720,
        },
        ..Theme::default()
    };
    assert_eq!(theme.point(100.0, 100.0), Point::new(200.0, 100.0));
    assert_eq!(theme.length(30.0), 30.0);
}

#[test]
fn partial_json_keeps_defaults() {
    let theme =
        Theme::from_json_str(r#"{"viewport": {"width": 640, "height": 360}, "timing": {"fade_frames": 8}}"#)
            .unwrap();
    assert_eq!(theme.viewport.width, 640);
    assert_eq!(theme.timing.fade_frames, 8);
    assert_eq!(theme.timing.draw_frames, Timing::default().draw_frames);
    assert_eq!(theme.palette, Palette::default());
    assert_eq!(theme.fps, Fps::integer(30));
}

#[test]
fn invalid_themes_are_rejected() {
    assert!(matches!(
        Theme::from_json_str("not json"),
        Err(MotionError::Serde(_))
    ));
    assert!(matches!(
        Theme::from_json_str(r#"{"fps": {"num": 0, "den": 1}}"#),
        Err(MotionError::Validation(_))
    ));
    assert!(Theme::from_json_str(r#"{"timing": {"from_scale": 1.5}}"#).is_err());
    assert!(Theme::from_json_str(r#"{"timing": {"pulse_frames": 0}}"#).is_err());
    assert!(Theme::from_json_str(r#"{"timing": {"phase_ramp": 0}}"#).is_err());
    assert!(Theme::from_json_str(r#"{"timing": {"spring": {"mass": 0.0}}}"#).is_err());
}

#[test]
fn missing_theme_file_is_reported() {
    let err = Theme::from_path("/no/such/theme.json").unwrap_err();
    assert!(matches!(err, MotionError::Other(_)));
}

#[test]
fn styles_draw_from_the_palette() {
    let theme = Theme::default();
    let surface = theme.surface_style();
    assert_eq!(surface.stroke, Some(theme.palette.outline));
    assert_eq!(surface.fill[0].color, theme.palette.surface);
    assert_eq!(surface.highlight, theme.palette.highlight);

    let line = theme.line_style();
    assert!(line.fill.is_empty());
    assert_eq!(line.stroke, Some(theme.palette.muted));
}
