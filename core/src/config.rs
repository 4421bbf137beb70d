//! The per-view parameter set consumed by one animation run.

use crate::curve::Curve;
use crate::preset::Preset;

/// Mutable animation parameters for a single view.
///
/// One configuration belongs to one view. Callers fill in whichever fields they care about, either
/// directly or through the fluent methods below, then trigger a run on the view's
/// [`Driver`](crate::driver::Driver). Resolving a [`Preset`] overwrites some of these fields, and
/// every completed run puts all of them back to their defaults via [`reset`](Self::reset).
///
/// Distances are in view-independent logical units, rotation is in radians and times are in
/// seconds. Values are never validated; out-of-range numbers reach the host animation runner
/// unchanged.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Configuration {
    /// Named effect to resolve before the run starts.
    pub preset: Preset,
    /// Timing curve for both the main animation and any layer animations.
    pub curve: Curve,
    /// Multiplier applied to the magnitude of most presets.
    pub force: f32,
    /// Seconds to wait before starting.
    pub delay: f32,
    /// Length of the animation, in seconds.
    pub duration: f32,
    /// Spring damping ratio of the main animation.
    pub damping: f32,
    /// Initial spring velocity of the main animation.
    pub velocity: f32,
    /// How many times layer animations repeat.
    pub repeat_count: f32,
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    /// Rotation of the displaced state, in radians.
    pub rotate: f32,
    /// Opacity of the displaced state.
    pub opacity: f32,
    /// When `true` the view starts displaced and animates back to rest. When `false` it starts at
    /// rest and animates out to the displaced state.
    pub animate_from: bool,
    /// Play automatically on the view's first layout pass.
    pub autostart: bool,
    /// Hide the view as soon as it is loaded, ahead of an automatic run.
    pub autohide: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            preset: Preset::None,
            curve: Curve::None,
            force: 1.0,
            delay: 0.0,
            duration: 0.7,
            damping: 0.7,
            velocity: 0.7,
            repeat_count: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotate: 0.0,
            opacity: 1.0,
            animate_from: true,
            autostart: false,
            autohide: false,
        }
    }
}

impl Configuration {
    /// Restores every run parameter (geometry, timing, selection and direction) to its default.
    ///
    /// `autostart` and `autohide` describe how the view is attached rather than a single run, and
    /// are kept.
    pub fn reset(&mut self) {
        *self = Self {
            autostart: self.autostart,
            autohide: self.autohide,
            ..Self::default()
        };
    }

    /// Whether every run parameter equals its default.
    pub fn is_reset(&self) -> bool {
        let mut defaults = Self::default();
        defaults.autostart = self.autostart;
        defaults.autohide = self.autohide;
        *self == defaults
    }

    /// Configures the [`Preset`] to resolve when the run starts.
    pub fn preset(mut self, preset: Preset) -> Self {
        self.preset = preset;
        self
    }

    /// Configures the timing [`Curve`].
    pub fn curve(mut self, curve: Curve) -> Self {
        self.curve = curve;
        self
    }

    /// Configures the preset magnitude multiplier.
    pub fn force(mut self, force: f32) -> Self {
        self.force = force;
        self
    }

    /// Configures the delay, in seconds, before the animation starts.
    pub fn delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    /// Configures the animation duration, in seconds.
    pub fn duration(mut self, duration: f32) -> Self {
        self.duration = duration;
        self
    }

    /// Configures the spring damping ratio.
    pub fn damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Configures the initial spring velocity.
    pub fn velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    /// Configures the repeat count of layer animations.
    pub fn repeat_count(mut self, repeat_count: f32) -> Self {
        self.repeat_count = repeat_count;
        self
    }

    /// Configures the displaced translation.
    pub fn translate(mut self, x: f32, y: f32) -> Self {
        self.translate_x = x;
        self.translate_y = y;
        self
    }

    /// Configures the displaced scale.
    pub fn scale(mut self, x: f32, y: f32) -> Self {
        self.scale_x = x;
        self.scale_y = y;
        self
    }

    /// Configures the displaced rotation, in radians.
    pub fn rotate(mut self, radians: f32) -> Self {
        self.rotate = radians;
        self
    }

    /// Configures the displaced opacity.
    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Configures the direction; see [`Configuration::animate_from`].
    pub fn animate_from(mut self, animate_from: bool) -> Self {
        self.animate_from = animate_from;
        self
    }

    /// Configures whether the view plays on its first layout pass.
    pub fn autostart(mut self, autostart: bool) -> Self {
        self.autostart = autostart;
        self
    }

    /// Configures whether the view starts hidden.
    pub fn autohide(mut self, autohide: bool) -> Self {
        self.autohide = autohide;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Configuration::default();

        assert_eq!(config.duration, 0.7);
        assert_eq!(config.damping, 0.7);
        assert_eq!(config.velocity, 0.7);
        assert_eq!(config.force, 1.0);
        assert_eq!(config.repeat_count, 1.0);
        assert_eq!((config.scale_x, config.scale_y), (1.0, 1.0));
        assert_eq!(config.opacity, 1.0);
        assert!(config.animate_from);
        assert_eq!(config.preset, Preset::None);
        assert_eq!(config.curve, Curve::None);
    }

    #[test]
    fn reset_restores_every_run_parameter() {
        let mut config = Configuration::default()
            .preset(Preset::Fall)
            .curve(Curve::OutBack)
            .force(3.0)
            .delay(1.0)
            .duration(2.0)
            .damping(0.2)
            .velocity(4.0)
            .repeat_count(5.0)
            .translate(10.0, 20.0)
            .scale(0.5, 0.25)
            .rotate(1.0)
            .opacity(0.0)
            .animate_from(false);

        config.reset();

        assert_eq!(config, Configuration::default());
        assert!(config.is_reset());
    }

    #[test]
    fn reset_keeps_autoplay_flags() {
        let mut config = Configuration::default()
            .autostart(true)
            .autohide(true)
            .translate(5.0, 5.0);

        config.reset();

        assert!(config.autostart);
        assert!(config.autohide);
        assert_eq!((config.translate_x, config.translate_y), (0.0, 0.0));
        assert!(config.is_reset());
    }
}
