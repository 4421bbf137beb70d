//! Ad-hoc block animations, for changes that do not fit a
//! [`Configuration`](crate::config::Configuration).

use crate::curve::{CoarseCurve, DEFAULT_SPRING_DAMPING};
use crate::host::{
    AnimationOptions, AnimationRequest, AnimationRunner, Animations, RunCompletion,
    SpringParameters,
};

/// Initial velocity of the springs started by [`Motion::Normal`] and [`Motion::Delay`].
pub const DEFAULT_SPRING_VELOCITY: f32 = 0.7;

/// How a block animation is timed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Motion {
    /// A spring starting immediately.
    #[default]
    Normal,
    /// A spring starting after the given number of seconds.
    Delay(f32),
    EaseIn,
    EaseOut,
    EaseInOut,
    Linear,
}

impl Motion {
    /// The request describing this motion over `duration` seconds.
    pub fn request(&self, duration: f32) -> AnimationRequest {
        let spring = SpringParameters {
            damping: DEFAULT_SPRING_DAMPING,
            velocity: DEFAULT_SPRING_VELOCITY,
        };
        let eased = |curve: CoarseCurve| AnimationRequest {
            duration,
            delay: 0.0,
            spring: None,
            options: curve.into(),
            target: None,
        };
        match *self {
            Self::Normal => AnimationRequest {
                duration,
                delay: 0.0,
                spring: Some(spring),
                options: AnimationOptions::empty(),
                target: None,
            },
            Self::Delay(delay) => AnimationRequest {
                duration,
                delay,
                spring: Some(spring),
                options: AnimationOptions::empty(),
                target: None,
            },
            Self::EaseIn => eased(CoarseCurve::EaseIn),
            Self::EaseOut => eased(CoarseCurve::EaseOut),
            Self::EaseInOut => eased(CoarseCurve::EaseInOut),
            Self::Linear => eased(CoarseCurve::Linear),
        }
    }

    /// Runs `animations` on `runner` with this motion, then calls `completion` with whether the
    /// animation ran to its end.
    pub fn spring(
        &self,
        runner: &dyn AnimationRunner,
        duration: f32,
        animations: Animations,
        completion: Option<Box<dyn FnOnce(bool)>>,
    ) {
        let completion = RunCompletion::new(move |finished| {
            if let Some(completion) = completion {
                completion(finished);
            }
        });
        runner.run(self.request(duration), animations, completion);
    }
}
