//! Declarative, preset-driven animations for views.
//!
//! Fill in a [`Configuration`] for a view (directly, or by chaining setters on its [`Animated`]
//! handle), pick one of the [`Preset`] effects or describe the displacement by hand, then trigger a
//! run. The [`Driver`] resolves the preset, submits any supplementary layer animations, hands the
//! main transform and opacity animation to the host's [`AnimationRunner`] and restores the
//! configuration's defaults once the host reports back.
//!
//! Spry does not render anything. Hosts implement the traits in [`host`]; the [`headless`] module
//! provides an in-process implementation for tests and previews.

pub mod prelude;

pub use spry_core::{
    attach::{Animated, Stage},
    config::Configuration,
    curve::{CoarseCurve, ControlPoints, CubicBezierTiming, Curve, SpringBasis, TimingFunction},
    driver::{AutoplayPhase, Driver},
    error::ParseNameError,
    headless,
    host::{
        self, AnimationOptions, AnimationRequest, AnimationRunner, ForegroundListener,
        ForegroundSignal, Host, RenderLayer, RunCompletion, SpringParameters, View,
    },
    interpolation::Lerp,
    layer::{AnimationValue, FillMode, KeyPath, LayerAnimation, LayerValues},
    motion::Motion,
    preset::Preset,
    solver::{displaced_state, resolve_preset, RunPlan, VisualState},
    transform::{AffineTransform, Transform3D},
};
