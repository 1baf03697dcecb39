use super::*;
use crate::foundation::core::{Rect, Rgba8};

fn viewport() -> Viewport {
    Viewport {
        width: 640,
        height: 360,
    }
}

fn card(id: &str) -> ElementBuilder {
    ElementBuilder::new(
        id,
        "main",
        Shape::Rect {
            rect: Rect::new(10.0, 10.0, 110.0, 60.0),
            corner_radius: 4.0,
        },
        Style::solid(Rgba8::rgb(40, 40, 40), Rgba8::rgb(255, 220, 0)),
    )
}

#[test]
fn builders_create_expected_structure() {
    let comp = CompositionBuilder::new("demo", Fps::integer(30), viewport(), 90)
        .scene(Phase::new("main", 0, 90).unwrap())
        .phase(Phase::new("focus", 30, 60).unwrap().crossfade(5))
        .zoom(zoom(20, 50, 1.25, Point::new(60.0, 35.0)))
        .element(
            card("a")
                .appear_at(5)
                .entrance(Entrance::scale_in())
                .gate("focus", GateEffect::Highlight)
                .zoomed(true)
                .build()
                .unwrap(),
        )
        .unwrap()
        .element(card("b").highlight_at(40).build().unwrap())
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(comp.elements().len(), 2);
    assert_eq!(comp.elements()[0].def.id, "a");
    assert_eq!(comp.elements()[1].def.highlight_at, Some(40));
    assert_eq!(comp.phases().len(), 1);
    assert!(comp.zoom().is_some());
}

#[test]
fn duplicate_element_id_is_rejected() {
    let builder = CompositionBuilder::new("demo", Fps::integer(30), viewport(), 30)
        .element(card("a").build().unwrap())
        .unwrap();
    assert!(builder.element(card("a").build().unwrap()).is_err());
}

#[test]
fn element_builder_validates_locally() {
    assert!(card(" ").build().is_err());
    assert!(
        card("a")
            .entrance(Entrance::Draw { duration: -1 })
            .build()
            .is_err()
    );
    assert!(
        card("a")
            .gate(
                "x",
                GateEffect::MoveBy {
                    dx: f64::NAN,
                    dy: 0.0,
                    ease: Default::default(),
                },
            )
            .build()
            .is_err()
    );
}

#[test]
fn unresolved_references_fail_at_build() {
    let result = CompositionBuilder::new("demo", Fps::integer(30), viewport(), 30)
        .scene(Phase::new("main", 0, 30).unwrap())
        .element(card("a").gate("nope", GateEffect::Show).build().unwrap())
        .unwrap()
        .build();
    assert!(matches!(result, Err(MotionError::Declaration(_))));
}

#[test]
fn into_def_keeps_declaration_order() {
    let def = CompositionBuilder::new("demo", Fps::integer(24), viewport(), 48)
        .scene(Phase::new("one", 0, 30).unwrap().exit(6))
        .scene(Phase::new("two", 24, 48).unwrap().enter(6))
        .into_def();
    let names: Vec<_> = def.scenes.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["one", "two"]);
    assert_eq!(def.fps, Fps::integer(24));
    assert!(Composition::new(def).is_ok());
}
