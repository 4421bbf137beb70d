//! Resolution of presets into concrete animation parameters, and of a configuration into the
//! start and end states of the main transform animation.

use crate::config::Configuration;
use crate::curve::SpringBasis;
use crate::host::View;
use crate::layer::{FillMode, KeyPath, LayerAnimation};
use crate::preset::Preset;
use crate::transform::{AffineTransform, Transform3D};
use std::f32::consts::PI;

/// Distance travelled by the slide, squeeze and fade-in-from-side presets.
pub const SLIDE_DISTANCE: f32 = 300.0;
/// Distance travelled by [`Preset::Fall`].
pub const FALL_DISTANCE: f32 = 600.0;
/// Tilt of [`Preset::Fall`], in radians (15 degrees).
pub const FALL_ROTATION: f32 = 15.0 * (PI / 180.0);
/// Key times shared by the keyframe presets.
pub const KEY_TIMES: [f32; 6] = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0];
/// Opacity given to a view right before its preset is resolved, so that hosts which skip work for
/// hidden views still animate it.
pub const OPACITY_SENTINEL: f32 = 0.99;

/// A view transform and opacity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualState {
    pub transform: AffineTransform,
    pub opacity: f32,
}

impl VisualState {
    /// Identity transform, fully opaque.
    pub const RESTING: Self = Self {
        transform: AffineTransform::IDENTITY,
        opacity: 1.0,
    };

    /// Reads the current state of `view`.
    pub fn of(view: &dyn View) -> Self {
        Self {
            transform: view.transform(),
            opacity: view.opacity(),
        }
    }

    /// Writes this state to `view`.
    pub fn apply_to(&self, view: &mut dyn View) {
        view.set_transform(self.transform);
        view.set_opacity(self.opacity);
    }
}

/// Computes the displaced state described by `config`: scale, then translate, then rotate, with
/// the configured opacity.
pub fn displaced_state(config: &Configuration) -> VisualState {
    let translate = AffineTransform::translation(config.translate_x, config.translate_y);
    let scale = AffineTransform::scale(config.scale_x, config.scale_y);
    let rotate = AffineTransform::rotation(config.rotate);
    VisualState {
        transform: rotate.concat(&translate.concat(&scale)),
        opacity: config.opacity,
    }
}

/// Where the main animation starts and ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunPlan {
    /// State to apply before the animation starts. `None` leaves the view as it is, which is
    /// expected to be at rest.
    pub start: Option<VisualState>,
    /// State to animate to.
    pub end: VisualState,
}

impl RunPlan {
    /// Plans a run from an already resolved configuration.
    pub fn new(config: &Configuration) -> Self {
        let displaced = displaced_state(config);
        if config.animate_from {
            Self {
                start: Some(displaced),
                end: VisualState::RESTING,
            }
        } else {
            Self {
                start: None,
                end: displaced,
            }
        }
    }
}

/// Resolves the selected preset of `config`.
///
/// Geometry presets overwrite geometry fields (and possibly the direction) of `config`. Layer
/// effect presets leave `config` alone, except for the flips which clear rotation and scale, and
/// return the animations to add to the view's render layer, keyed by name.
///
/// # Arguments
///
/// * `config` - Configuration to resolve; read for the preset, force, curve and timing.
/// * `layer_width` - Width of the view's layer, which sets the depth of the flip presets.
/// * `now` - Current time on the host's media clock; layer animations begin at `now + delay`.
/// * `basis` - Which value shapes a spring curve.
pub fn resolve_preset(
    config: &mut Configuration,
    layer_width: f32,
    now: f64,
    basis: SpringBasis,
) -> Vec<(&'static str, LayerAnimation)> {
    let force = config.force;
    let timing = config.curve.control_points(force, basis);
    let begin_time = now + config.delay as f64;
    let (duration, repeat_count) = (config.duration, config.repeat_count);
    let timed = |animation: LayerAnimation| {
        animation.timed(timing, duration, begin_time, repeat_count)
    };
    let keyframes = |key_path, values: &[f32]| {
        timed(LayerAnimation::keyframes(key_path, values, &KEY_TIMES))
    };
    let flip = |axis: (f32, f32, f32)| {
        let perspective = Transform3D::perspective(-1.0 / layer_width / 2.0);
        let rotation = Transform3D::rotation(PI, axis.0, axis.1, axis.2);
        timed(LayerAnimation::basic(
            KeyPath::Transform,
            Transform3D::IDENTITY,
            perspective.concat(&rotation),
        ))
    };

    match config.preset {
        Preset::SlideLeft => config.translate_x = SLIDE_DISTANCE * force,
        Preset::SlideRight => config.translate_x = -SLIDE_DISTANCE * force,
        Preset::SlideDown => config.translate_y = -SLIDE_DISTANCE * force,
        Preset::SlideUp => config.translate_y = SLIDE_DISTANCE * force,
        Preset::SqueezeLeft => {
            config.translate_x = SLIDE_DISTANCE;
            config.scale_x = 3.0 * force;
        }
        Preset::SqueezeRight => {
            config.translate_x = -SLIDE_DISTANCE;
            config.scale_x = 3.0 * force;
        }
        Preset::SqueezeDown => {
            config.translate_y = -SLIDE_DISTANCE;
            config.scale_y = 3.0 * force;
        }
        Preset::SqueezeUp => {
            config.translate_y = SLIDE_DISTANCE;
            config.scale_y = 3.0 * force;
        }
        Preset::FadeIn => config.opacity = 0.0,
        Preset::FadeOut => {
            config.opacity = 0.0;
            config.animate_from = false;
        }
        Preset::FadeOutIn => {
            let fade = LayerAnimation::basic(KeyPath::Opacity, 1.0, 0.0).autoreverse(true);
            return vec![("fade", timed(fade))];
        }
        Preset::FadeInLeft => {
            config.opacity = 0.0;
            config.translate_x = SLIDE_DISTANCE * force;
        }
        Preset::FadeInRight => {
            config.opacity = 0.0;
            config.translate_x = -SLIDE_DISTANCE * force;
        }
        Preset::FadeInDown => {
            config.opacity = 0.0;
            config.translate_y = -SLIDE_DISTANCE * force;
        }
        Preset::FadeInUp => {
            config.opacity = 0.0;
            config.translate_y = SLIDE_DISTANCE * force;
        }
        Preset::ZoomIn => {
            config.opacity = 0.0;
            config.scale_x = 2.0 * force;
            config.scale_y = 2.0 * force;
        }
        Preset::ZoomOut => {
            config.opacity = 0.0;
            config.scale_x = 2.0 * force;
            config.scale_y = 2.0 * force;
            config.animate_from = false;
        }
        Preset::Fall => {
            config.rotate = FALL_ROTATION;
            config.translate_y = FALL_DISTANCE * force;
            config.animate_from = false;
        }
        Preset::Shake => {
            let values = [0.0, 30.0 * force, -30.0 * force, 30.0 * force, 0.0];
            let shake = keyframes(KeyPath::PositionX, &values).additive(true);
            return vec![("shake", shake)];
        }
        Preset::Pop => {
            let values = [0.0, 0.2 * force, -0.2 * force, 0.2 * force, 0.0];
            let pop = keyframes(KeyPath::TransformScale, &values).additive(true);
            return vec![("pop", pop)];
        }
        Preset::Active => {
            let (from, to) = (-0.023 * force, 0.023 * force);
            let active = LayerAnimation::basic(KeyPath::TransformScale, from, to)
                .autoreverse(true)
                .fill_mode(FillMode::Forwards)
                .additive(true);
            return vec![("active", timed(active))];
        }
        Preset::FlipX => {
            config.rotate = 0.0;
            config.scale_x = 1.0;
            config.scale_y = 1.0;
            return vec![("3d", flip((0.0, 1.0, 0.0)))];
        }
        Preset::FlipY => return vec![("3d", flip((1.0, 0.0, 0.0)))],
        Preset::Morph => {
            let x = [1.0, 1.3 * force, 0.7, 1.3 * force, 1.0];
            let y = [1.0, 0.7, 1.3 * force, 0.7, 1.0];
            return vec![
                ("morphX", keyframes(KeyPath::TransformScaleX, &x)),
                ("morphY", keyframes(KeyPath::TransformScaleY, &y)),
            ];
        }
        Preset::Squeeze => {
            let x = [1.0, 1.5 * force, 0.5, 1.5 * force, 1.0];
            let y = [1.0, 0.5, 1.0, 0.5, 1.0];
            return vec![
                ("morphX", keyframes(KeyPath::TransformScaleX, &x)),
                ("morphY", keyframes(KeyPath::TransformScaleY, &y)),
            ];
        }
        Preset::Flash => {
            let flash = LayerAnimation::basic(KeyPath::Opacity, 1.0, 0.0)
                .timed(timing, duration, begin_time, repeat_count * 2.0)
                .autoreverse(true);
            return vec![("flash", flash)];
        }
        Preset::Wobble => {
            let swing = [0.0, 0.3 * force, -0.3 * force, 0.3 * force, 0.0];
            let shake = [0.0, 30.0 * force, -30.0 * force, 30.0 * force, 0.0];
            return vec![
                ("wobble", keyframes(KeyPath::TransformRotation, &swing).additive(true)),
                ("x", keyframes(KeyPath::PositionX, &shake).additive(true)),
            ];
        }
        Preset::Swing => {
            let values = [0.0, 0.3 * force, -0.3 * force, 0.3 * force, 0.0];
            let swing = keyframes(KeyPath::TransformRotation, &values).additive(true);
            return vec![("swing", swing)];
        }
        Preset::None => {}
    }
    Vec::new()
}
