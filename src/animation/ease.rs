#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
}

impl Ease {
    pub const ALL: [Self; 7] = [
        Self::Linear,
        Self::InQuad,
        Self::OutQuad,
        Self::InOutQuad,
        Self::InCubic,
        Self::OutCubic,
        Self::InOutCubic,
    ];

    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

/// CSS `cubic-bezier(x1, y1, x2, y2)` timing curve evaluated at `t`.
///
/// Solves `bezier_x(p) == t` with Newton-Raphson and falls back to bisection when the slope
/// flattens out.
pub fn cubic_bezier(t: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let mut p = t;
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - t;
        if err.abs() < 1e-9 {
            return bezier_sample(p, y1, y2);
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-9 {
            break;
        }
        p -= err / slope;
    }

    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = t;
    for _ in 0..48 {
        let val = bezier_sample(p, x1, x2);
        if (val - t).abs() < 1e-9 {
            break;
        }
        if val < t {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_sample(p, y1, y2)
}

/// `B(t) = 3(1-t)^2 t p1 + 3(1-t) t^2 p2 + t^3` in Horner form.
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
