use super::*;

fn element(id: &str, scene: &str) -> ElementDef {
    ElementDef {
        id: id.to_owned(),
        scene: scene.to_owned(),
        shape: Shape::Rect {
            rect: Rect::new(100.0, 100.0, 200.0, 150.0),
            corner_radius: 8.0,
        },
        style: Style::solid(Rgba8::rgb(10, 20, 30), Rgba8::rgb(250, 200, 20)),
        appear_at: 0,
        entrance: Entrance::default(),
        highlight_at: None,
        highlight: Highlight::default(),
        gates: vec![Gate {
            phase: "click".to_owned(),
            effect: GateEffect::Highlight,
        }],
        zoomed: false,
        easing: EasingSpec::default(),
    }
}

fn def() -> CompositionDef {
    CompositionDef {
        id: "demo".to_owned(),
        fps: Fps::integer(30),
        viewport: Viewport {
            width: 1280,
            height: 720,
        },
        duration_in_frames: 120,
        scenes: vec![
            Phase::new("intro", 0, 70).unwrap().exit(10),
            Phase::new("outro", 60, 120).unwrap().enter(10),
        ],
        phases: vec![Phase::new("click", 20, 40).unwrap()],
        zoom: None,
        elements: vec![element("box", "intro")],
    }
}

fn is_declaration(err: &MotionError) -> bool {
    matches!(err, MotionError::Declaration(_))
}

#[test]
fn valid_declaration_resolves_references() {
    let comp = Composition::new(def()).unwrap();
    assert_eq!(comp.id(), "demo");
    assert_eq!(comp.range(), FrameRange::frames(0, 120).unwrap());
    assert_eq!(comp.scenes().len(), 2);

    let el = comp.element("box").unwrap();
    assert_eq!(el.scene, comp.scenes().id("intro").unwrap());
    assert_eq!(el.gates.len(), 1);
    assert_eq!(el.gates[0].0, comp.phases().id("click").unwrap());
    assert_eq!(el.anchor, Point::new(150.0, 125.0));
}

#[test]
fn meta_reports_registry_fields() {
    let meta = Composition::new(def()).unwrap().meta();
    assert_eq!(
        meta,
        CompositionMeta {
            id: "demo".to_owned(),
            duration_in_frames: 120,
            fps: Fps::integer(30),
            width: 1280,
            height: 720,
        }
    );
}

#[test]
fn unknown_scene_is_rejected() {
    let mut d = def();
    d.elements[0].scene = "missing".to_owned();
    let err = Composition::new(d).unwrap_err();
    assert!(is_declaration(&err));
    assert!(err.to_string().contains("missing"));
}

#[test]
fn unknown_gate_phase_is_rejected() {
    let mut d = def();
    d.elements[0].gates[0].phase = "hover".to_owned();
    assert!(is_declaration(&Composition::new(d).unwrap_err()));
}

#[test]
fn duplicate_element_ids_are_rejected() {
    let mut d = def();
    d.elements.push(element("box", "outro"));
    let err = Composition::new(d).unwrap_err();
    assert!(err.to_string().contains("duplicate element id 'box'"));
}

#[test]
fn zero_duration_is_rejected() {
    let mut d = def();
    d.duration_in_frames = 0;
    assert!(is_declaration(&Composition::new(d).unwrap_err()));
}

#[test]
fn scenes_must_fit_inside_duration() {
    let mut d = def();
    d.duration_in_frames = 100;
    assert!(Composition::new(d).is_err());
}

#[test]
fn scene_handover_without_overlap_is_rejected() {
    let mut d = def();
    d.scenes = vec![
        Phase::new("intro", 0, 60).unwrap(),
        Phase::new("outro", 60, 120).unwrap().enter(10),
    ];
    assert!(is_declaration(&Composition::new(d).unwrap_err()));
}

#[test]
fn compositions_need_a_scene() {
    let mut d = def();
    d.scenes.clear();
    d.elements.clear();
    assert!(Composition::new(d).is_err());
}

#[test]
fn zoomed_elements_need_a_zoom() {
    let mut d = def();
    d.elements[0].zoomed = true;
    assert!(Composition::new(d.clone()).is_err());

    d.zoom = Some(ZoomDef {
        start_at: 10,
        end_at: 50,
        target_scale: 1.5,
        focal: Point::new(300.0, 200.0),
        easing: EasingSpec::default(),
    });
    assert!(Composition::new(d).is_ok());
}

#[test]
fn zoom_parameters_are_validated() {
    let mut d = def();
    d.zoom = Some(ZoomDef {
        start_at: 50,
        end_at: 50,
        target_scale: 1.5,
        focal: Point::ORIGIN,
        easing: EasingSpec::default(),
    });
    assert!(Composition::new(d.clone()).is_err());

    d.zoom = Some(ZoomDef {
        start_at: 10,
        end_at: 200,
        target_scale: 1.5,
        focal: Point::ORIGIN,
        easing: EasingSpec::default(),
    });
    assert!(Composition::new(d).is_err());
}

#[test]
fn highlight_cannot_precede_appearance() {
    let mut d = def();
    d.elements[0].appear_at = 30;
    d.elements[0].highlight_at = Some(20);
    assert!(Composition::new(d).is_err());
}

#[test]
fn malformed_parameters_are_rejected() {
    let mut d = def();
    d.elements[0].entrance = Entrance::Fade { duration: 0 };
    assert!(Composition::new(d).is_err());

    let mut d = def();
    d.elements[0].entrance = Entrance::ScaleIn {
        fade_frames: 15,
        from_scale: 1.5,
    };
    assert!(Composition::new(d).is_err());

    let mut d = def();
    d.elements[0].shape = Shape::Path {
        points: vec![Point::ORIGIN],
        closed: false,
    };
    assert!(Composition::new(d).is_err());

    let mut d = def();
    d.elements[0].gates[0].effect = GateEffect::Pulse {
        duration: 0,
        max_radius: 10.0,
    };
    assert!(Composition::new(d).is_err());
}

#[test]
fn style_stops_must_be_sorted() {
    let mut style = Style::solid(Rgba8::rgb(0, 0, 0), Rgba8::rgb(255, 255, 255));
    style.fill.push(ColorStop {
        offset: 1.0,
        color: Rgba8::rgb(9, 9, 9),
    });
    assert!(style.validate().is_ok());
    style.fill.swap(0, 1);
    assert!(style.validate().is_err());
}

#[test]
fn shape_anchors() {
    assert_eq!(
        Shape::Line {
            from: Point::new(0.0, 0.0),
            to: Point::new(10.0, 20.0),
        }
        .anchor(),
        Point::new(5.0, 10.0)
    );
    assert_eq!(
        Shape::Path {
            points: vec![Point::new(0.0, 0.0), Point::new(8.0, 2.0), Point::new(4.0, 6.0)],
            closed: true,
        }
        .anchor(),
        Point::new(4.0, 3.0)
    );
}

#[test]
fn minimal_json_uses_defaults() {
    let json = r#"{
        "id": "mini",
        "fps": {"num": 30, "den": 1},
        "viewport": {"width": 640, "height": 360},
        "duration_in_frames": 60,
        "scenes": [{"name": "main", "range": {"start": 0, "end": 60}}],
        "elements": [{
            "id": "dot",
            "scene": "main",
            "shape": {"kind": "circle", "center": {"x": 10.0, "y": 20.0}, "radius": 5.0},
            "style": {
                "fill": [{"offset": 0.0, "color": {"r": 1, "g": 2, "b": 3, "a": 255}}],
                "highlight": {"r": 255, "g": 255, "b": 0, "a": 255}
            },
            "appear_at": 5
        }]
    }"#;
    let comp = Composition::from_json_str(json).unwrap();
    let el = &comp.elements()[0];
    assert_eq!(el.def.entrance, Entrance::Fade { duration: 15 });
    assert_eq!(el.def.easing, EasingSpec::default());
    assert_eq!(el.def.highlight, Highlight::default());
    assert!(comp.phases().is_empty());
    assert!(comp.zoom().is_none());
}

#[test]
fn json_round_trip_preserves_declaration() {
    let mut d = def();
    d.elements[0].entrance = Entrance::slide_up();
    let comp = Composition::new(d).unwrap();
    let json = comp.to_json_string().unwrap();
    let back = Composition::from_json_str(&json).unwrap();
    assert_eq!(back.def().elements[0].entrance, Entrance::slide_up());
    assert_eq!(back.def().scenes, comp.def().scenes);
    assert_eq!(back.meta(), comp.meta());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = Composition::from_json_str("{").unwrap_err();
    assert!(matches!(err, MotionError::Serde(_)));
}

#[test]
fn missing_file_is_reported() {
    let err = Composition::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, MotionError::Other(_)));
}

#[test]
fn visibility_gates_need_phase_ramps() {
    let mut d = def();
    d.elements[0].gates[0].effect = GateEffect::Show;
    let err = Composition::new(d.clone()).unwrap_err();
    assert!(is_declaration(&err));
    assert!(err.to_string().contains("enter ramp"));

    d.phases = vec![Phase::new("click", 20, 40).unwrap().enter(5)];
    d.elements[0].gates[0].effect = GateEffect::Hide;
    assert!(Composition::new(d.clone()).unwrap_err().to_string().contains("exit ramp"));

    d.phases = vec![Phase::new("click", 20, 40).unwrap().crossfade(5)];
    assert!(Composition::new(d.clone()).is_ok());

    d.phases = vec![Phase::new("click", 0, 120).unwrap()];
    assert!(Composition::new(d).is_ok());
}

#[test]
fn other_gates_accept_sharp_phases() {
    let mut d = def();
    d.elements[0].gates.push(Gate {
        phase: "click".to_owned(),
        effect: GateEffect::Draw,
    });
    assert!(Composition::new(d).is_ok());
}
