#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_f64(&mut self, v: f64) {
        self.write_u64(v.to_bits());
    }

    pub(crate) fn write_str(&mut self, s: &str) {
        self.write_u64(s.len() as u64);
        self.write_bytes(s.as_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

#[inline]
/// Clamp scalar value to normalized range `[0, 1]`. NaN maps to 0.
pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Piecewise-linear mapping of `x` through `input -> output`, clamped at both ends.
///
/// `input` must be non-decreasing and the same length as `output`; a zero-width segment
/// resolves to its right-hand value.
pub fn interpolate(x: f64, input: &[f64], output: &[f64]) -> f64 {
    debug_assert_eq!(input.len(), output.len());
    let n = input.len().min(output.len());
    if n == 0 {
        return 0.0;
    }
    if x <= input[0] {
        return output[0];
    }
    if x >= input[n - 1] {
        return output[n - 1];
    }

    let idx = input[..n].partition_point(|&k| k <= x);
    let (x0, x1) = (input[idx - 1], input[idx]);
    let (y0, y1) = (output[idx - 1], output[idx]);
    let span = x1 - x0;
    if span <= 0.0 {
        return y1;
    }
    lerp(y0, y1, (x - x0) / span)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
