//! Easing curves
//!
//! Every transition in the site uses one of a handful of named curves. The
//! named set lives in [`Easing`]; [`EasingCurve`] is the underlying value
//! (a CSS-style cubic bezier or `linear`) and knows how to evaluate itself.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// A cubic-bezier timing curve or the literal `linear`.
///
/// Serializes the way the site's stylesheets spell it: either the string
/// `"linear"` or a four element array `[x1, y1, x2, y2]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EasingCurve {
    Linear,
    CubicBezier { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl EasingCurve {
    pub const fn bezier(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::CubicBezier { x1, y1, x2, y2 }
    }

    /// Control points as `[x1, y1, x2, y2]`, or `None` for `linear`.
    pub fn control_points(&self) -> Option<[f64; 4]> {
        match *self {
            Self::Linear => None,
            Self::CubicBezier { x1, y1, x2, y2 } => Some([x1, y1, x2, y2]),
        }
    }

    /// Map linear progress in [0, 1] to eased progress.
    pub fn apply(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Self::Linear => t,
            Self::CubicBezier { x1, y1, x2, y2 } => cubic_bezier(x1, y1, x2, y2, t),
        }
    }

    /// Check that every component lies in [0, 1].
    ///
    /// With both x control points inside [0, 1] the x polynomial is
    /// monotonic, so the curve never runs backwards in time.
    pub fn validate(&self, name: &str) -> Result<()> {
        let Some(points) = self.control_points() else {
            return Ok(());
        };
        for (i, value) in points.iter().enumerate() {
            if !value.is_finite() || !(0.0..=1.0).contains(value) {
                return Err(Error::InvalidEasing {
                    name: name.to_string(),
                    reason: format!("component {} = {} outside [0, 1]", i, value),
                });
            }
        }
        Ok(())
    }
}

impl Serialize for EasingCurve {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.control_points() {
            None => serializer.serialize_str("linear"),
            Some(points) => points.serialize(serializer),
        }
    }
}

// Accept either "linear" or a four number sequence
impl<'de> Deserialize<'de> for EasingCurve {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, SeqAccess, Visitor};

        struct EasingCurveVisitor;

        impl<'de> Visitor<'de> for EasingCurveVisitor {
            type Value = EasingCurve;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("\"linear\" or an array [x1, y1, x2, y2]")
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<EasingCurve, E>
            where
                E: de::Error,
            {
                if value == "linear" {
                    Ok(EasingCurve::Linear)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(value), &self))
                }
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<EasingCurve, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut points = [0.0f64; 4];
                for (i, slot) in points.iter_mut().enumerate() {
                    *slot = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(i, &self))?;
                }
                if seq.next_element::<f64>()?.is_some() {
                    return Err(de::Error::invalid_length(5, &self));
                }
                Ok(EasingCurve::bezier(points[0], points[1], points[2], points[3]))
            }
        }

        deserializer.deserialize_any(EasingCurveVisitor)
    }
}

/// The named easing vocabulary shared by every section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// Baseline for all animations
    Industrial,
    /// Controlled arrival
    Enter,
    /// Clean departure
    Exit,
    /// Technical interactions (hover lifts)
    Mechanical,
    Sharp,
    Smooth,
    /// Constant rate, used by rotating and sweeping backgrounds
    Linear,
}

impl Easing {
    pub const ALL: [Easing; 7] = [
        Easing::Industrial,
        Easing::Enter,
        Easing::Exit,
        Easing::Mechanical,
        Easing::Sharp,
        Easing::Smooth,
        Easing::Linear,
    ];

    pub const fn curve(self) -> EasingCurve {
        match self {
            Easing::Industrial => EasingCurve::bezier(0.4, 0.0, 0.2, 1.0),
            Easing::Enter => EasingCurve::bezier(0.25, 0.1, 0.25, 1.0),
            Easing::Exit => EasingCurve::bezier(0.4, 0.0, 1.0, 1.0),
            Easing::Mechanical => EasingCurve::bezier(0.45, 0.05, 0.55, 0.95),
            Easing::Sharp => EasingCurve::bezier(0.4, 0.0, 0.6, 1.0),
            Easing::Smooth => EasingCurve::bezier(0.4, 0.0, 0.2, 1.0),
            Easing::Linear => EasingCurve::Linear,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Easing::Industrial => "industrial",
            Easing::Enter => "enter",
            Easing::Exit => "exit",
            Easing::Mechanical => "mechanical",
            Easing::Sharp => "sharp",
            Easing::Smooth => "smooth",
            Easing::Linear => "linear",
        }
    }

    #[inline]
    pub fn apply(self, t: f64) -> f64 {
        self.curve().apply(t)
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Evaluate a cubic bezier at `progress`.
///
/// Newton-Raphson finds the curve parameter whose x equals the progress;
/// bisection takes over when the derivative flattens out.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, progress: f64) -> f64 {
    if progress <= 0.0 {
        return 0.0;
    }
    if progress >= 1.0 {
        return 1.0;
    }

    let t = solve_bezier_x(x1, x2, progress);
    bezier_component(y1, y2, t)
}

fn solve_bezier_x(x1: f64, x2: f64, target_x: f64) -> f64 {
    const EPSILON: f64 = 1e-7;

    let mut t = target_x;
    for _ in 0..8 {
        let x = bezier_component(x1, x2, t) - target_x;
        if x.abs() < EPSILON {
            return t;
        }
        let dx = bezier_derivative(x1, x2, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    t = target_x;
    for _ in 0..64 {
        let x = bezier_component(x1, x2, t);
        if (x - target_x).abs() < EPSILON {
            break;
        }
        if x < target_x {
            lo = t;
        } else {
            hi = t;
        }
        t = (lo + hi) / 2.0;
    }
    t
}

/// B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_component(p1: f64, p2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t
}

#[inline]
fn bezier_derivative(p1: f64, p2: f64, t: f64) -> f64 {
    let mt = 1.0 - t;
    3.0 * mt * mt * p1 + 6.0 * mt * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_boundaries() {
        for easing in Easing::ALL {
            assert!((easing.apply(0.0) - 0.0).abs() < 0.001, "{:?} at t=0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 0.001, "{:?} at t=1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in Easing::ALL {
            let mut prev = 0.0;
            for i in 0..=50 {
                let t = i as f64 / 50.0;
                let v = easing.apply(t);
                assert!(v >= prev - 1e-9, "{:?} not monotonic at t={}", easing, t);
                prev = v;
            }
        }
    }

    #[test]
    fn test_named_curves_valid() {
        for easing in Easing::ALL {
            assert!(easing.curve().validate(easing.name()).is_ok());
        }
    }

    #[test]
    fn test_industrial_matches_smooth() {
        assert_eq!(Easing::Industrial.curve(), Easing::Smooth.curve());
    }

    #[test]
    fn test_out_of_range_rejected() {
        let curve = EasingCurve::bezier(0.4, -0.2, 0.6, 1.0);
        assert!(curve.validate("overshoot").is_err());
    }

    #[test]
    fn test_ease_matches_css_midpoint() {
        // CSS `ease` is cubic-bezier(0.25, 0.1, 0.25, 1); at x=0.5 y is about 0.8024
        let v = Easing::Enter.apply(0.5);
        assert!((v - 0.8024).abs() < 0.001, "got {}", v);
    }

    #[test]
    fn test_curve_serde() {
        let json = serde_json::to_string(&Easing::Sharp.curve()).unwrap();
        assert_eq!(json, "[0.4,0.0,0.6,1.0]");
        let linear: EasingCurve = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(linear, EasingCurve::Linear);
        let curve: EasingCurve = serde_json::from_str("[0.45,0.05,0.55,0.95]").unwrap();
        assert_eq!(curve, Easing::Mechanical.curve());
        assert!(serde_json::from_str::<EasingCurve>("\"bouncy\"").is_err());
    }
}
