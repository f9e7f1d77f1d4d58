//! Easing curves for toast animations.
//!
//! Curves map linear progress `t ∈ [0.0, 1.0]` to eased progress. The toast
//! animation uses the standard "ease" curve, `cubic-bezier(0.42, 0, 1, 1)`,
//! run forwards for exits and mirrored for entrances.

/// Control points of the standard "ease" curve.
const EASE_X1: f32 = 0.42;
const EASE_Y1: f32 = 0.0;
const EASE_X2: f32 = 1.0;
const EASE_Y2: f32 = 1.0;

/// Easing function for controlling animation curves.
///
/// # Example
///
/// ```
/// use storefront_core::easing::Easing;
///
/// let eased = Easing::EaseOut.apply(0.5);
/// assert!(eased > 0.5); // EaseOut is ahead of linear at midpoint
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed.
    #[default]
    Linear,

    /// The "ease" curve: slow start, accelerating.
    EaseIn,

    /// The "ease" curve mirrored: fast start, decelerating.
    /// Formula: `1 - ease(1 - t)`
    EaseOut,
}

impl Easing {
    /// Apply the easing function to linear progress.
    ///
    /// Input `t` is clamped to `[0.0, 1.0]`; endpoints map to themselves.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => ease(t),
            Easing::EaseOut => 1.0 - ease(1.0 - t),
        }
    }
}

/// The "ease" cubic bezier evaluated at x = `t`.
pub fn ease(t: f32) -> f32 {
    cubic_bezier(EASE_X1, EASE_Y1, EASE_X2, EASE_Y2, t)
}

/// Evaluates a CSS-style cubic bezier (P0 = (0,0), P3 = (1,1)) at `x`.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, x: f32) -> f32 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let param_t = solve_bezier_x(x1, x2, x);
    eval_cubic(0.0, y1, y2, 1.0, param_t)
}

/// B(t) = (1-t)^3*p0 + 3*(1-t)^2*t*p1 + 3*(1-t)*t^2*p2 + t^3*p3
fn eval_cubic(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let one_minus_t = 1.0 - t;
    let omt2 = one_minus_t * one_minus_t;
    let omt3 = omt2 * one_minus_t;
    let t2 = t * t;
    let t3 = t2 * t;
    omt3 * p0 + 3.0 * omt2 * t * p1 + 3.0 * one_minus_t * t2 * p2 + t3 * p3
}

/// B'(t) = 3*(1-t)^2*(p1-p0) + 6*(1-t)*t*(p2-p1) + 3*t^2*(p3-p2)
fn eval_cubic_derivative(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let one_minus_t = 1.0 - t;
    3.0 * one_minus_t * one_minus_t * (p1 - p0)
        + 6.0 * one_minus_t * t * (p2 - p1)
        + 3.0 * t * t * (p3 - p2)
}

/// Solves for the bezier parameter whose x equals `target_x`.
///
/// Newton-Raphson first, bisection when the slope is too flat.
fn solve_bezier_x(x1: f32, x2: f32, target_x: f32) -> f32 {
    let mut t = target_x;

    for _ in 0..8 {
        let x = eval_cubic(0.0, x1, x2, 1.0, t) - target_x;
        if x.abs() < 1e-6 {
            return t;
        }
        let dx = eval_cubic_derivative(0.0, x1, x2, 1.0, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    let mut lo = 0.0_f32;
    let mut hi = 1.0_f32;
    t = target_x;

    for _ in 0..32 {
        let x = eval_cubic(0.0, x1, x2, 1.0, t);
        if (x - target_x).abs() < 1e-6 {
            return t;
        }
        if x < target_x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) * 0.5;
    }

    t
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    #[test]
    fn test_endpoints() {
        for easing in [Easing::Linear, Easing::EaseIn, Easing::EaseOut] {
            assert!((easing.apply(0.0) - 0.0).abs() < EPS, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < EPS, "{:?} at 1", easing);
        }
    }

    #[test]
    fn test_clamps_input() {
        assert_eq!(Easing::Linear.apply(-1.0), 0.0);
        assert_eq!(Easing::Linear.apply(2.0), 1.0);
        assert!((Easing::EaseOut.apply(3.0) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_ease_in_is_behind() {
        assert!(Easing::EaseIn.apply(0.5) < 0.5);
    }

    #[test]
    fn test_ease_out_is_ahead() {
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
    }

    #[test]
    fn test_monotonic() {
        for easing in [Easing::EaseIn, Easing::EaseOut] {
            let mut prev = 0.0;
            for step in 1..=100 {
                let value = easing.apply(step as f32 / 100.0);
                assert!(value + EPS >= prev, "{:?} not monotonic at {}", easing, step);
                prev = value;
            }
        }
    }

    #[test]
    fn test_ease_out_mirrors_ease_in() {
        for step in 0..=10 {
            let t = step as f32 / 10.0;
            let mirrored = 1.0 - Easing::EaseIn.apply(1.0 - t);
            assert!((Easing::EaseOut.apply(t) - mirrored).abs() < EPS);
        }
    }
}
