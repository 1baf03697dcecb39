use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MotionError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MotionError::declaration("x")
            .to_string()
            .contains("declaration error:")
    );
    assert!(
        MotionError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        MotionError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MotionError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
