//! Scalar interpolation helpers and easing curves.
//!
//! Every easing function clamps its input to `[0, 1]` first, so an overshooting
//! scroll position can never push a curve outside its range.

/// Linear interpolation `a + (b - a) * t`. `t` is not clamped.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp to `[0, 1]`. NaN maps to 0.
#[inline]
pub fn clamp01(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// Map `value` from `[in_min, in_max]` onto `[out_min, out_max]` without clamping.
/// A zero-width input range maps to `out_max`.
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    let span = in_max - in_min;
    if span == 0.0 {
        return out_max;
    }
    out_min + (value - in_min) / span * (out_max - out_min)
}

/// Frame-rate independent exponential smoothing toward `target`.
///
/// `lambda` is the decay rate per second; `dt` is the frame delta in seconds.
#[inline]
pub fn damp(current: f32, target: f32, lambda: f32, dt: f32) -> f32 {
    lerp(current, target, 1.0 - (-lambda * dt).exp())
}

/// Hermite smoothstep `t²(3 - 2t)`.
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = clamp01(t);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = clamp01(t);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InExpo,
    OutExpo,
    Smoothstep,
    Smootherstep,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = clamp01(t);
        match self {
            Easing::Linear => t,
            Easing::InQuad => t * t,
            Easing::OutQuad => t * (2.0 - t),
            Easing::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Easing::InCubic => t * t * t,
            Easing::OutCubic => {
                let u = t - 1.0;
                u * u * u + 1.0
            }
            Easing::InOutCubic => ease_in_out_cubic(t),
            Easing::InQuart => t * t * t * t,
            Easing::OutQuart => {
                let u = t - 1.0;
                1.0 - u * u * u * u
            }
            Easing::InExpo => {
                if t == 0.0 {
                    0.0
                } else {
                    2f32.powf(10.0 * (t - 1.0))
                }
            }
            Easing::OutExpo => {
                if t == 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
            Easing::Smoothstep => smoothstep(t),
            Easing::Smootherstep => t * t * t * (t * (t * 6.0 - 15.0) + 10.0),
        }
    }

    /// Eased interpolation between `a` and `b`.
    pub fn interpolate(self, a: f32, b: f32, t: f32) -> f32 {
        lerp(a, b, self.apply(t))
    }
}
