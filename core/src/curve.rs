//! Contains the [`Curve`] enum which names the timing curves available to view animations, along
//! with the [`TimingFunction`] trait used to evaluate them.
//!
//! Every curve resolves two ways. The host toolkit's block-based animations only understand four
//! coarse options (see [`CoarseCurve`]), while layer animations accept an arbitrary cubic bezier
//! described by [`ControlPoints`].

use crate::error::ParseNameError;
use dyn_clone::{clone_trait_object, DynClone};
use lazy_static::lazy_static;
use lyon_geom::{CubicBezierSegment, Point};
use std::collections::HashMap;
use std::fmt::Debug;
use std::str::FromStr;

/// Provides a timing function for non-linear progress of an animation.
///
/// Expects `x` to be the normalized (from 0 to 1) elapsed time and returns the normalized progress,
/// which is typically between 0 and 1 but may overshoot (e.g. [`Curve::OutBack`]).
pub trait TimingFunction: Debug + DynClone {
    /// Computes the progress `y` for a given time `x`.
    fn calc(&self, x: f32) -> f32;
}

clone_trait_object!(TimingFunction);

/// The two inner control points of a cubic bezier timing curve whose end points are fixed at
/// `(0, 0)` and `(1, 1)`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlPoints {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl ControlPoints {
    /// The host toolkit's canonical linear curve.
    pub const LINEAR: Self = Self::new(0.0, 0.0, 1.0, 1.0);
    /// The host toolkit's canonical ease-in curve.
    pub const EASE_IN: Self = Self::new(0.42, 0.0, 1.0, 1.0);
    /// The host toolkit's canonical ease-out curve.
    pub const EASE_OUT: Self = Self::new(0.0, 0.0, 0.58, 1.0);
    /// The host toolkit's canonical ease-in-ease-out curve.
    pub const EASE_IN_OUT: Self = Self::new(0.42, 0.0, 0.58, 1.0);
    /// The curve the host toolkit uses when nothing more specific is requested.
    pub const DEFAULT: Self = Self::new(0.25, 0.1, 0.25, 1.0);

    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Returns the points as a `[x1, y1, x2, y2]` array.
    pub fn to_array(self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }
}

/// Coarse easing classification understood by the host's block-based animation API.
///
/// Anything that is not exactly one of the three ease curves collapses to [`CoarseCurve::Linear`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum CoarseCurve {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

/// Selects which configuration value shapes the [`Curve::Spring`] bezier.
///
/// The spring curve's second control point is `1.1 + value / 3`. Most callers want the spring's
/// own damping there, but some existing animation sets were tuned against the configured force
/// multiplier instead, so both are available.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SpringBasis {
    /// Use the damping carried by [`Curve::Spring`].
    #[default]
    Damping,
    /// Use the configuration's force multiplier and ignore the curve's damping.
    Force,
}

/// Named timing curves for view and layer animations.
///
/// Includes the host's native curves (`Linear`, `In`, `Out`, `InOut`), a stepped `Discrete` curve,
/// a bezier approximation of a spring, the Penner-style curves listed on <https://easings.net>
/// except for "elastic" and "bounce", and user-defined control points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Curve {
    /// Straight-line interpolation.
    Linear,
    /// Holds the start value until the very end of the animation.
    Discrete,
    /// Bezier approximation of a spring that overshoots more as `damping` grows.
    Spring { damping: f32 },
    /// The host's native ease-in curve.
    #[cfg_attr(feature = "serde", serde(rename = "easeIn"))]
    In,
    /// The host's native ease-out curve.
    #[cfg_attr(feature = "serde", serde(rename = "easeOut"))]
    Out,
    /// The host's native ease-in-ease-out curve.
    #[cfg_attr(feature = "serde", serde(rename = "easeInOut"))]
    InOut,
    /// See: <https://easings.net/#easeInSine>
    #[cfg_attr(feature = "serde", serde(rename = "easeInSine"))]
    InSine,
    /// See: <https://easings.net/#easeOutSine>
    #[cfg_attr(feature = "serde", serde(rename = "easeOutSine"))]
    OutSine,
    /// See: <https://easings.net/#easeInOutSine>
    #[cfg_attr(feature = "serde", serde(rename = "easeInOutSine"))]
    InOutSine,
    /// See: <https://easings.net/#easeInQuad>
    #[cfg_attr(feature = "serde", serde(rename = "easeInQuad"))]
    InQuad,
    /// See: <https://easings.net/#easeOutQuad>
    #[cfg_attr(feature = "serde", serde(rename = "easeOutQuad"))]
    OutQuad,
    /// See: <https://easings.net/#easeInOutQuad>
    #[cfg_attr(feature = "serde", serde(rename = "easeInOutQuad"))]
    InOutQuad,
    /// See: <https://easings.net/#easeInCubic>
    #[cfg_attr(feature = "serde", serde(rename = "easeInCubic"))]
    InCubic,
    /// See: <https://easings.net/#easeOutCubic>
    #[cfg_attr(feature = "serde", serde(rename = "easeOutCubic"))]
    OutCubic,
    /// See: <https://easings.net/#easeInOutCubic>
    #[cfg_attr(feature = "serde", serde(rename = "easeInOutCubic"))]
    InOutCubic,
    /// See: <https://easings.net/#easeInQuart>
    #[cfg_attr(feature = "serde", serde(rename = "easeInQuart"))]
    InQuart,
    /// See: <https://easings.net/#easeOutQuart>
    #[cfg_attr(feature = "serde", serde(rename = "easeOutQuart"))]
    OutQuart,
    /// See: <https://easings.net/#easeInOutQuart>
    #[cfg_attr(feature = "serde", serde(rename = "easeInOutQuart"))]
    InOutQuart,
    /// See: <https://easings.net/#easeInQuint>
    #[cfg_attr(feature = "serde", serde(rename = "easeInQuint"))]
    InQuint,
    /// See: <https://easings.net/#easeOutQuint>
    #[cfg_attr(feature = "serde", serde(rename = "easeOutQuint"))]
    OutQuint,
    /// See: <https://easings.net/#easeInOutQuint>
    #[cfg_attr(feature = "serde", serde(rename = "easeInOutQuint"))]
    InOutQuint,
    /// See: <https://easings.net/#easeInExpo>
    #[cfg_attr(feature = "serde", serde(rename = "easeInExpo"))]
    InExpo,
    /// See: <https://easings.net/#easeOutExpo>
    #[cfg_attr(feature = "serde", serde(rename = "easeOutExpo"))]
    OutExpo,
    /// See: <https://easings.net/#easeInOutExpo>
    #[cfg_attr(feature = "serde", serde(rename = "easeInOutExpo"))]
    InOutExpo,
    /// See: <https://easings.net/#easeInCirc>
    #[cfg_attr(feature = "serde", serde(rename = "easeInCirc"))]
    InCirc,
    /// See: <https://easings.net/#easeOutCirc>
    #[cfg_attr(feature = "serde", serde(rename = "easeOutCirc"))]
    OutCirc,
    /// See: <https://easings.net/#easeInOutCirc>
    #[cfg_attr(feature = "serde", serde(rename = "easeInOutCirc"))]
    InOutCirc,
    /// Moves slightly backward before accelerating forward.
    ///
    /// See: <https://easings.net/#easeInBack>
    #[cfg_attr(feature = "serde", serde(rename = "easeInBack"))]
    InBack,
    /// Overshoots the terminal value before settling.
    ///
    /// See: <https://easings.net/#easeOutBack>
    #[cfg_attr(feature = "serde", serde(rename = "easeOutBack"))]
    OutBack,
    /// Combination of [`InBack`](Self::InBack) and [`OutBack`](Self::OutBack).
    ///
    /// See: <https://easings.net/#easeInOutBack>
    #[cfg_attr(feature = "serde", serde(rename = "easeInOutBack"))]
    InOutBack,
    /// User-defined control points, used verbatim.
    Custom(ControlPoints),
    /// No curve selected; resolves to the host default.
    #[default]
    None,
}

impl Curve {
    /// Classifies this curve for the host's block-based animation options.
    pub fn coarse(&self) -> CoarseCurve {
        match self {
            Self::In => CoarseCurve::EaseIn,
            Self::Out => CoarseCurve::EaseOut,
            Self::InOut => CoarseCurve::EaseInOut,
            _ => CoarseCurve::Linear,
        }
    }

    /// Resolves the exact bezier control points of this curve, using the spring's own damping.
    ///
    /// `force` is accepted so that this has the same shape as [`control_points`]; it has no effect
    /// with [`SpringBasis::Damping`].
    ///
    /// [`control_points`]: Self::control_points
    pub fn bezier(&self, force: f32) -> ControlPoints {
        self.control_points(force, SpringBasis::Damping)
    }

    /// Resolves the exact bezier control points of this curve.
    ///
    /// # Arguments
    ///
    /// * `force` - The configured force multiplier; only read by [`Curve::Spring`] when `basis` is
    ///   [`SpringBasis::Force`].
    /// * `basis` - Which value feeds the spring curve.
    pub fn control_points(&self, force: f32, basis: SpringBasis) -> ControlPoints {
        let p = ControlPoints::new;
        match *self {
            Self::In => ControlPoints::EASE_IN,
            Self::Out => ControlPoints::EASE_OUT,
            Self::InOut => ControlPoints::EASE_IN_OUT,
            Self::Linear => ControlPoints::LINEAR,
            Self::Spring { damping } => {
                let value = match basis {
                    SpringBasis::Damping => damping,
                    SpringBasis::Force => force,
                };
                p(0.5, 1.1 + value / 3.0, 1.0, 1.0)
            }
            Self::Discrete => p(1.0, 0.0, 1.0, 1.0),
            Self::InSine => p(0.47, 0.0, 0.745, 0.715),
            Self::OutSine => p(0.39, 0.575, 0.565, 1.0),
            Self::InOutSine => p(0.445, 0.05, 0.55, 0.95),
            Self::InQuad => p(0.55, 0.085, 0.68, 0.53),
            Self::OutQuad => p(0.25, 0.46, 0.45, 0.94),
            Self::InOutQuad => p(0.455, 0.03, 0.515, 0.955),
            Self::InCubic => p(0.55, 0.055, 0.675, 0.19),
            Self::OutCubic => p(0.215, 0.61, 0.355, 1.0),
            Self::InOutCubic => p(0.645, 0.045, 0.355, 1.0),
            Self::InQuart => p(0.895, 0.03, 0.685, 0.22),
            Self::OutQuart => p(0.165, 0.84, 0.44, 1.0),
            Self::InOutQuart => p(0.77, 0.0, 0.175, 1.0),
            Self::InQuint => p(0.755, 0.05, 0.855, 0.06),
            Self::OutQuint => p(0.23, 1.0, 0.32, 1.0),
            Self::InOutQuint => p(0.86, 0.0, 0.07, 1.0),
            Self::InExpo => p(0.95, 0.05, 0.795, 0.035),
            Self::OutExpo => p(0.19, 1.0, 0.22, 1.0),
            Self::InOutExpo => p(1.0, 0.0, 0.0, 1.0),
            Self::InCirc => p(0.6, 0.04, 0.98, 0.335),
            Self::OutCirc => p(0.075, 0.82, 0.165, 1.0),
            Self::InOutCirc => p(0.785, 0.135, 0.15, 0.86),
            Self::InBack => p(0.6, -0.28, 0.735, 0.045),
            Self::OutBack => p(0.175, 0.885, 0.32, 1.275),
            Self::InOutBack => p(0.68, -0.55, 0.265, 1.55),
            Self::Custom(points) => points,
            Self::None => ControlPoints::DEFAULT,
        }
    }

    /// Creates an evaluable timing function for this curve.
    pub fn timing(&self, force: f32, basis: SpringBasis) -> CubicBezierTiming {
        CubicBezierTiming::from(self.control_points(force, basis))
    }

    /// The camelCase name of this curve, as accepted by [`FromStr`].
    ///
    /// Custom curves have no name and return `"custom"`, which does not parse.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Discrete => "discrete",
            Self::Spring { .. } => "spring",
            Self::In => "easeIn",
            Self::Out => "easeOut",
            Self::InOut => "easeInOut",
            Self::InSine => "easeInSine",
            Self::OutSine => "easeOutSine",
            Self::InOutSine => "easeInOutSine",
            Self::InQuad => "easeInQuad",
            Self::OutQuad => "easeOutQuad",
            Self::InOutQuad => "easeInOutQuad",
            Self::InCubic => "easeInCubic",
            Self::OutCubic => "easeOutCubic",
            Self::InOutCubic => "easeInOutCubic",
            Self::InQuart => "easeInQuart",
            Self::OutQuart => "easeOutQuart",
            Self::InOutQuart => "easeInOutQuart",
            Self::InQuint => "easeInQuint",
            Self::OutQuint => "easeOutQuint",
            Self::InOutQuint => "easeInOutQuint",
            Self::InExpo => "easeInExpo",
            Self::OutExpo => "easeOutExpo",
            Self::InOutExpo => "easeInOutExpo",
            Self::InCirc => "easeInCirc",
            Self::OutCirc => "easeOutCirc",
            Self::InOutCirc => "easeInOutCirc",
            Self::InBack => "easeInBack",
            Self::OutBack => "easeOutBack",
            Self::InOutBack => "easeInOutBack",
            Self::Custom(_) => "custom",
            Self::None => "none",
        }
    }
}

/// Damping given to a spring curve parsed from its bare name.
pub const DEFAULT_SPRING_DAMPING: f32 = 0.7;

lazy_static! {
    static ref CURVES_BY_NAME: HashMap<&'static str, Curve> = [
        Curve::Linear,
        Curve::Discrete,
        Curve::Spring { damping: DEFAULT_SPRING_DAMPING },
        Curve::In,
        Curve::Out,
        Curve::InOut,
        Curve::InSine,
        Curve::OutSine,
        Curve::InOutSine,
        Curve::InQuad,
        Curve::OutQuad,
        Curve::InOutQuad,
        Curve::InCubic,
        Curve::OutCubic,
        Curve::InOutCubic,
        Curve::InQuart,
        Curve::OutQuart,
        Curve::InOutQuart,
        Curve::InQuint,
        Curve::OutQuint,
        Curve::InOutQuint,
        Curve::InExpo,
        Curve::OutExpo,
        Curve::InOutExpo,
        Curve::InCirc,
        Curve::OutCirc,
        Curve::InOutCirc,
        Curve::InBack,
        Curve::OutBack,
        Curve::InOutBack,
        Curve::None,
    ]
    .into_iter()
    .map(|curve| (curve.name(), curve))
    .collect();
}

impl FromStr for Curve {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CURVES_BY_NAME
            .get(s)
            .copied()
            .ok_or_else(|| ParseNameError::UnknownCurve(s.to_string()))
    }
}

/// Timing function defined by a cubic bezier curve with the start and end points fixed at `(0, 0)`
/// and `(1, 1)`.
#[derive(Clone, Debug)]
pub struct CubicBezierTiming {
    segment: CubicBezierSegment<f32>,
}

impl CubicBezierTiming {
    /// Creates a new [`CubicBezierTiming`] with control points `(x1, y1)` and `(x2, y2)`.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            segment: CubicBezierSegment {
                from: Point::new(0.0, 0.0),
                to: Point::new(1.0, 1.0),
                ctrl1: Point::new(x1, y1),
                ctrl2: Point::new(x2, y2),
            },
        }
    }

    // x(t) is monotonic for any curve whose control x values lie in [0, 1], which holds for every
    // named curve; bisection is good enough for the precision animations need.
    fn solve_t(&self, x: f32) -> f32 {
        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        let mut t = x;
        for _ in 0..32 {
            let current = self.segment.x(t);
            if (current - x).abs() < 1e-6 {
                break;
            }
            if current < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }
}

impl From<ControlPoints> for CubicBezierTiming {
    fn from(points: ControlPoints) -> Self {
        Self::new(points.x1, points.y1, points.x2, points.y2)
    }
}

impl TimingFunction for CubicBezierTiming {
    fn calc(&self, x: f32) -> f32 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        self.segment.y(self.solve_t(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const NAMED_CURVES: [(Curve, [f32; 4]); 29] = [
        (Curve::Linear, [0.0, 0.0, 1.0, 1.0]),
        (Curve::In, [0.42, 0.0, 1.0, 1.0]),
        (Curve::Out, [0.0, 0.0, 0.58, 1.0]),
        (Curve::InOut, [0.42, 0.0, 0.58, 1.0]),
        (Curve::Discrete, [1.0, 0.0, 1.0, 1.0]),
        (Curve::InSine, [0.47, 0.0, 0.745, 0.715]),
        (Curve::OutSine, [0.39, 0.575, 0.565, 1.0]),
        (Curve::InOutSine, [0.445, 0.05, 0.55, 0.95]),
        (Curve::InQuad, [0.55, 0.085, 0.68, 0.53]),
        (Curve::OutQuad, [0.25, 0.46, 0.45, 0.94]),
        (Curve::InOutQuad, [0.455, 0.03, 0.515, 0.955]),
        (Curve::InCubic, [0.55, 0.055, 0.675, 0.19]),
        (Curve::OutCubic, [0.215, 0.61, 0.355, 1.0]),
        (Curve::InOutCubic, [0.645, 0.045, 0.355, 1.0]),
        (Curve::InQuart, [0.895, 0.03, 0.685, 0.22]),
        (Curve::OutQuart, [0.165, 0.84, 0.44, 1.0]),
        (Curve::InOutQuart, [0.77, 0.0, 0.175, 1.0]),
        (Curve::InQuint, [0.755, 0.05, 0.855, 0.06]),
        (Curve::OutQuint, [0.23, 1.0, 0.32, 1.0]),
        (Curve::InOutQuint, [0.86, 0.0, 0.07, 1.0]),
        (Curve::InExpo, [0.95, 0.05, 0.795, 0.035]),
        (Curve::OutExpo, [0.19, 1.0, 0.22, 1.0]),
        (Curve::InOutExpo, [1.0, 0.0, 0.0, 1.0]),
        (Curve::InCirc, [0.6, 0.04, 0.98, 0.335]),
        (Curve::OutCirc, [0.075, 0.82, 0.165, 1.0]),
        (Curve::InOutCirc, [0.785, 0.135, 0.15, 0.86]),
        (Curve::InBack, [0.6, -0.28, 0.735, 0.045]),
        (Curve::OutBack, [0.175, 0.885, 0.32, 1.275]),
        (Curve::InOutBack, [0.68, -0.55, 0.265, 1.55]),
    ];

    #[test]
    fn named_curves_resolve_to_exact_control_points() {
        for (curve, points) in NAMED_CURVES {
            for basis in [SpringBasis::Damping, SpringBasis::Force] {
                assert_eq!(curve.control_points(2.0, basis).to_array(), points, "{curve:?}");
            }
        }
    }

    #[test]
    fn coarse_matches_only_native_ease_curves() {
        let others = [
            Curve::Spring { damping: 0.5 },
            Curve::Custom(ControlPoints::EASE_IN),
            Curve::None,
        ];
        let eased: Vec<_> = NAMED_CURVES
            .iter()
            .map(|(curve, _)| *curve)
            .chain(others)
            .map(|curve| (curve, curve.coarse()))
            .filter(|(_, coarse)| *coarse != CoarseCurve::Linear)
            .collect();

        assert_eq!(
            eased,
            [
                (Curve::In, CoarseCurve::EaseIn),
                (Curve::Out, CoarseCurve::EaseOut),
                (Curve::InOut, CoarseCurve::EaseInOut),
            ]
        );
    }

    #[test]
    fn spring_uses_damping_by_default() {
        let curve = Curve::Spring { damping: 0.6 };

        assert_eq!(curve.bezier(9.0), ControlPoints::new(0.5, 1.1 + 0.6 / 3.0, 1.0, 1.0));
    }

    #[test]
    fn spring_with_force_basis_ignores_damping() {
        let curve = Curve::Spring { damping: 0.6 };

        assert_eq!(
            curve.control_points(1.5, SpringBasis::Force),
            ControlPoints::new(0.5, 1.1 + 1.5 / 3.0, 1.0, 1.0)
        );
    }

    #[test]
    fn custom_and_none_resolve() {
        let points = ControlPoints::new(0.1, 0.2, 0.3, 0.4);

        assert_eq!(Curve::Custom(points).bezier(1.0), points);
        assert_eq!(Curve::None.bezier(1.0), ControlPoints::DEFAULT);
    }

    #[test]
    fn names_parse_back() {
        assert_eq!("easeOutBack".parse::<Curve>(), Ok(Curve::OutBack));
        assert_eq!(
            "spring".parse::<Curve>(),
            Ok(Curve::Spring { damping: DEFAULT_SPRING_DAMPING })
        );
        assert_eq!(
            "wiggly".parse::<Curve>(),
            Err(ParseNameError::UnknownCurve("wiggly".to_string()))
        );
        assert!("custom".parse::<Curve>().is_err());
    }

    #[test]
    fn bezier_timing_hits_end_points() {
        let timing = Curve::InOutQuad.timing(1.0, SpringBasis::Damping);

        assert_eq!(timing.calc(0.0), 0.0);
        assert_eq!(timing.calc(1.0), 1.0);
        assert_relative_eq!(timing.calc(0.5), 0.5, epsilon = 0.01);
    }

    #[test]
    fn linear_timing_is_identity() {
        let timing = CubicBezierTiming::from(ControlPoints::LINEAR);

        assert_relative_eq!(timing.calc(0.25), 0.25, epsilon = 0.001);
        assert_relative_eq!(timing.calc(0.8), 0.8, epsilon = 0.001);
    }

    #[test]
    fn ease_in_starts_slowly() {
        let timing = Curve::In.timing(1.0, SpringBasis::Damping);

        assert!(timing.calc(0.25) < 0.25);
    }
}
