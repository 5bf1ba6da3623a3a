//! Timing functions: map elapsed progress to eased progress.

/// Where a `steps()` timing function jumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPosition {
    /// Jump at the start of each interval (`step-start`).
    Start,
    /// Jump at the end of each interval (`step-end`).
    End,
}

/// A CSS easing function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimingFunction {
    Linear,
    /// `cubic-bezier(x1, y1, x2, y2)`; the end points are `(0,0)` and `(1,1)`.
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// `steps(count, position)`.
    Steps { count: u32, position: StepPosition },
}

impl TimingFunction {
    pub const EASE: Self = Self::CubicBezier {
        x1: 0.25,
        y1: 0.1,
        x2: 0.25,
        y2: 1.0,
    };
    pub const EASE_IN: Self = Self::CubicBezier {
        x1: 0.42,
        y1: 0.0,
        x2: 1.0,
        y2: 1.0,
    };
    pub const EASE_OUT: Self = Self::CubicBezier {
        x1: 0.0,
        y1: 0.0,
        x2: 0.58,
        y2: 1.0,
    };
    pub const EASE_IN_OUT: Self = Self::CubicBezier {
        x1: 0.42,
        y1: 0.0,
        x2: 0.58,
        y2: 1.0,
    };
    pub const STEP_START: Self = Self::Steps {
        count: 1,
        position: StepPosition::Start,
    };
    pub const STEP_END: Self = Self::Steps {
        count: 1,
        position: StepPosition::End,
    };

    /// Eased progress for `progress` in `[0, 1]`. Input outside that range
    /// is clamped; `0` maps to `0` and `1` maps to `1` for every function.
    pub fn apply(&self, progress: f64) -> f64 {
        let t = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        if t == 0.0 || t == 1.0 {
            return t;
        }
        match *self {
            TimingFunction::Linear => t,
            TimingFunction::CubicBezier { x1, y1, x2, y2 } => {
                let s = solve_bezier_x(x1, x2, t);
                bezier(y1, y2, s)
            }
            TimingFunction::Steps { count, position } => {
                let n = f64::from(count.max(1));
                match position {
                    StepPosition::Start => (t * n).ceil() / n,
                    StepPosition::End => (t * n).floor() / n,
                }
            }
        }
    }
}

impl Default for TimingFunction {
    fn default() -> Self {
        Self::EASE
    }
}

/// One coordinate of a cubic Bézier with end points 0 and 1.
fn bezier(p1: f64, p2: f64, s: f64) -> f64 {
    let u = 1.0 - s;
    3.0 * u * u * s * p1 + 3.0 * u * s * s * p2 + s * s * s
}

fn bezier_slope(p1: f64, p2: f64, s: f64) -> f64 {
    let u = 1.0 - s;
    3.0 * u * u * p1 + 6.0 * u * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Find the curve parameter whose x coordinate is `x`: Newton's method,
/// then bisection when the slope is too flat.
fn solve_bezier_x(x1: f64, x2: f64, x: f64) -> f64 {
    const EPSILON: f64 = 1e-7;

    let mut s = x;
    for _ in 0..8 {
        let error = bezier(x1, x2, s) - x;
        if error.abs() < EPSILON {
            return s;
        }
        let slope = bezier_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= error / slope;
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..64 {
        let value = bezier(x1, x2, s);
        if (value - x).abs() < EPSILON {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn end_points_are_fixed() {
        for f in [
            TimingFunction::Linear,
            TimingFunction::EASE,
            TimingFunction::EASE_IN,
            TimingFunction::EASE_OUT,
            TimingFunction::EASE_IN_OUT,
            TimingFunction::STEP_START,
            TimingFunction::STEP_END,
        ] {
            assert_eq!(f.apply(0.0), 0.0, "{f:?}");
            assert_eq!(f.apply(1.0), 1.0, "{f:?}");
        }
    }

    #[test]
    fn clamps_input() {
        assert_eq!(TimingFunction::Linear.apply(-2.0), 0.0);
        assert_eq!(TimingFunction::Linear.apply(3.0), 1.0);
        assert_eq!(TimingFunction::Linear.apply(f64::NAN), 0.0);
    }

    #[test]
    fn linear_bezier_is_identity() {
        let f = TimingFunction::CubicBezier {
            x1: 0.0,
            y1: 0.0,
            x2: 1.0,
            y2: 1.0,
        };
        for t in [0.1, 0.25, 0.5, 0.9] {
            assert!(close(f.apply(t), t), "{t}");
        }
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        let f = TimingFunction::EASE_IN_OUT;
        assert!(close(f.apply(0.5), 0.5));
        assert!(close(f.apply(0.2) + f.apply(0.8), 1.0));
        assert!(f.apply(0.2) < 0.2);
    }

    #[test]
    fn ease_in_starts_slow_and_ease_out_fast() {
        assert!(TimingFunction::EASE_IN.apply(0.3) < 0.3);
        assert!(TimingFunction::EASE_OUT.apply(0.3) > 0.3);
    }

    #[test]
    fn steps() {
        let end = TimingFunction::Steps {
            count: 4,
            position: StepPosition::End,
        };
        assert_eq!(end.apply(0.3), 0.25);
        assert_eq!(end.apply(0.99), 0.75);

        let start = TimingFunction::Steps {
            count: 4,
            position: StepPosition::Start,
        };
        assert_eq!(start.apply(0.3), 0.5);
        assert_eq!(TimingFunction::STEP_END.apply(0.7), 0.0);
        assert_eq!(TimingFunction::STEP_START.apply(0.1), 1.0);
    }

    #[test]
    fn zero_steps_behave_like_one() {
        let f = TimingFunction::Steps {
            count: 0,
            position: StepPosition::End,
        };
        assert_eq!(f.apply(0.5), 0.0);
    }
}
