//! Interfaces to the host GUI toolkit.
//!
//! Spry never draws anything itself. It mutates a [`View`], submits [`LayerAnimation`]s to the
//! view's [`RenderLayer`], and asks an [`AnimationRunner`] to animate transform and opacity
//! changes. The [`headless`](crate::headless) module implements all of these in-process.

use crate::curve::CoarseCurve;
use crate::layer::LayerAnimation;
use crate::transform::AffineTransform;
use bitflags::bitflags;
use std::fmt;
use std::rc::{Rc, Weak};

/// A visual element whose transform and opacity can be animated.
pub trait View {
    fn transform(&self) -> AffineTransform;

    fn set_transform(&mut self, transform: AffineTransform);

    /// Opacity, normally between `0.0` (invisible) and `1.0`.
    fn opacity(&self) -> f32;

    fn set_opacity(&mut self, opacity: f32);

    /// The layer that renders this view.
    fn layer(&mut self) -> &mut dyn RenderLayer;
}

/// The render layer behind a [`View`], which plays supplementary animations on its own.
pub trait RenderLayer {
    /// Starts `animation`, replacing any animation previously added under the same `key`.
    fn add_animation(&mut self, key: &str, animation: LayerAnimation);

    /// Width of the layer's frame in logical units.
    fn width(&self) -> f32;
}

bitflags! {
    /// Options for a block-based view animation.
    #[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
    pub struct AnimationOptions: u32 {
        /// The view keeps receiving input while it animates.
        const ALLOW_USER_INTERACTION = 1 << 1;
        const CURVE_EASE_IN_OUT = 1 << 16;
        const CURVE_EASE_IN = 1 << 17;
        const CURVE_EASE_OUT = 1 << 18;
        const CURVE_LINEAR = 1 << 19;
    }
}

impl AnimationOptions {
    /// The coarse curve requested by these options, if any.
    pub fn coarse_curve(&self) -> Option<CoarseCurve> {
        if self.contains(Self::CURVE_EASE_IN_OUT) {
            Some(CoarseCurve::EaseInOut)
        } else if self.contains(Self::CURVE_EASE_IN) {
            Some(CoarseCurve::EaseIn)
        } else if self.contains(Self::CURVE_EASE_OUT) {
            Some(CoarseCurve::EaseOut)
        } else if self.contains(Self::CURVE_LINEAR) {
            Some(CoarseCurve::Linear)
        } else {
            None
        }
    }
}

impl From<CoarseCurve> for AnimationOptions {
    fn from(curve: CoarseCurve) -> Self {
        match curve {
            CoarseCurve::Linear => Self::CURVE_LINEAR,
            CoarseCurve::EaseIn => Self::CURVE_EASE_IN,
            CoarseCurve::EaseOut => Self::CURVE_EASE_OUT,
            CoarseCurve::EaseInOut => Self::CURVE_EASE_IN_OUT,
        }
    }
}

/// Spring physics for a block-based animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParameters {
    /// Damping ratio; `1.0` settles without oscillation.
    pub damping: f32,
    /// Initial velocity, relative to the total distance travelled per second.
    pub velocity: f32,
}

/// Everything an [`AnimationRunner`] needs to time a block-based animation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationRequest {
    pub duration: f32,
    pub delay: f32,
    /// `None` requests a plain eased animation.
    pub spring: Option<SpringParameters>,
    pub options: AnimationOptions,
    /// Address of the view being animated. A new run on a view interrupts the runs still in
    /// flight on that same view; `None` marks a free-standing block tied to no single view.
    pub target: Option<usize>,
}

/// The changes to animate. Runners call this exactly once, inside their animation context.
pub type Animations = Box<dyn FnOnce()>;

/// One-shot notification that a run has ended.
///
/// Runners consume it with [`finish`](Self::finish), passing `false` if the run was interrupted.
/// A completion that is dropped without being finished reports `false`, so the callback always
/// fires exactly once.
pub struct RunCompletion {
    callback: Option<Box<dyn FnOnce(bool)>>,
}

impl RunCompletion {
    pub fn new(callback: impl FnOnce(bool) + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// Reports the end of the run. `finished` is `false` if the run was cut short.
    pub fn finish(mut self, finished: bool) {
        if let Some(callback) = self.callback.take() {
            callback(finished);
        }
    }
}

impl Drop for RunCompletion {
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            callback(false);
        }
    }
}

impl fmt::Debug for RunCompletion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunCompletion")
            .field("pending", &self.callback.is_some())
            .finish()
    }
}

/// The host's engine for block-based view animations.
pub trait AnimationRunner {
    /// Runs `animations` as a timed animation and eventually finishes `completion`.
    ///
    /// Starting a run may interrupt runs already in flight; interrupted runs must still be
    /// finished (with `false`).
    fn run(&self, request: AnimationRequest, animations: Animations, completion: RunCompletion);

    /// Current time on the host's media clock, in seconds. Layer animation start times are
    /// expressed on this clock.
    fn now(&self) -> f64;
}

/// Receives "application became active" notifications.
pub trait ForegroundListener {
    fn became_active(&self);
}

/// The host application's foreground state.
pub trait ForegroundSignal {
    /// Whether the application is currently in the foreground.
    fn is_active(&self) -> bool;

    /// Registers `listener` for future activations. Listeners that have been dropped are skipped.
    fn subscribe(&self, listener: Weak<dyn ForegroundListener>);
}

/// The collaborators a [`Driver`](crate::driver::Driver) works against.
#[derive(Clone)]
pub struct Host {
    pub runner: Rc<dyn AnimationRunner>,
    pub foreground: Rc<dyn ForegroundSignal>,
}

impl Host {
    pub fn new(runner: Rc<dyn AnimationRunner>, foreground: Rc<dyn ForegroundSignal>) -> Self {
        Self { runner, foreground }
    }
}
