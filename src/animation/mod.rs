pub(crate) mod ease;
pub(crate) mod easing;
pub(crate) mod primitives;
pub(crate) mod spring;
