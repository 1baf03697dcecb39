use crate::{
    eval::evaluator::{ElementState, FrameState},
    foundation::math::Fnv1a64,
};

/// 128-bit content hash of a [`FrameState`].
///
/// Two frames with equal fingerprints paint identically; used for parity checks between
/// sequential, parallel and cached evaluation, and to detect held frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FrameFingerprint {
    pub hi: u64,
    pub lo: u64,
}

impl std::fmt::Display for FrameFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

/// Hash the paint-relevant content of `state`.
///
/// The frame number is excluded so that two frames showing the same picture compare equal.
pub fn fingerprint_frame(state: &FrameState) -> FrameFingerprint {
    let mut a = Fnv1a64::new_default();
    let mut b = Fnv1a64::new(0x9ae16a3b2f90404f);

    write_str_pair(&mut a, &mut b, &state.composition);
    write_f64_pair(&mut a, &mut b, state.zoom.scale);
    write_f64_pair(&mut a, &mut b, state.zoom.translate.x);
    write_f64_pair(&mut a, &mut b, state.zoom.translate.y);

    write_u64_pair(&mut a, &mut b, state.elements.len() as u64);
    for el in &state.elements {
        write_element_pair(&mut a, &mut b, el);
    }

    FrameFingerprint {
        hi: a.finish(),
        lo: b.finish(),
    }
}

fn write_element_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, el: &ElementState) {
    write_str_pair(a, b, &el.id);
    write_f64_pair(a, b, el.opacity);
    write_f64_pair(a, b, el.ring_opacity);
    for c in el.transform.as_coeffs() {
        write_f64_pair(a, b, c);
    }
    let v = &el.visual;
    write_f64_pair(a, b, v.draw_progress);
    write_f64_pair(a, b, v.radius);
    write_u64_pair(a, b, v.color_stops.len() as u64);
    for stop in &v.color_stops {
        write_f64_pair(a, b, stop.offset);
        for c in [stop.color.r, stop.color.g, stop.color.b, stop.color.a] {
            a.write_u8(c);
            b.write_u8(c);
        }
    }
}

fn write_u64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u64) {
    a.write_u64(v);
    b.write_u64(v);
}

fn write_f64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: f64) {
    // -0.0 and 0.0 paint the same.
    let v = if v == 0.0 { 0.0 } else { v };
    a.write_f64(v);
    b.write_f64(v);
}

fn write_str_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, s: &str) {
    a.write_str(s);
    b.write_str(s);
}

#[cfg(test)]
#[path = "../../tests/unit/eval/fingerprint.rs"]
mod tests;
