//! Descriptors for supplementary animations submitted directly to a view's render layer.
//!
//! A [`LayerAnimation`] is plain data. The host's [`RenderLayer`](crate::host::RenderLayer) owns
//! playback; [`LayerAnimation::sample`] exists so that hosts without a native animation engine
//! (and tests) can evaluate one at a given time.

use crate::curve::{ControlPoints, CubicBezierTiming, TimingFunction};
use crate::interpolation::Lerp;
use crate::time_scale::{TimeScale, TimeScaleOutOfBounds};
use crate::transform::Transform3D;
use std::fmt;

/// The layer property that an animation drives.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum KeyPath {
    Opacity,
    PositionX,
    Transform,
    TransformScale,
    TransformScaleX,
    TransformScaleY,
    TransformRotation,
}

impl KeyPath {
    /// The dotted key path name used by layer-based toolkits.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Opacity => "opacity",
            Self::PositionX => "position.x",
            Self::Transform => "transform",
            Self::TransformScale => "transform.scale",
            Self::TransformScaleX => "transform.scale.x",
            Self::TransformScaleY => "transform.scale.y",
            Self::TransformRotation => "transform.rotation",
        }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single animated value: either a scalar property or a whole layer transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationValue {
    Scalar(f32),
    Transform(Transform3D),
}

impl From<f32> for AnimationValue {
    fn from(value: f32) -> Self {
        Self::Scalar(value)
    }
}

impl From<Transform3D> for AnimationValue {
    fn from(value: Transform3D) -> Self {
        Self::Transform(value)
    }
}

/// The values an animation moves through.
#[derive(Clone, Debug, PartialEq)]
pub enum LayerValues {
    /// Interpolates from one value to another.
    Basic {
        from: AnimationValue,
        to: AnimationValue,
    },
    /// Moves through a sequence of scalar values, reaching `values[i]` at `key_times[i]`.
    ///
    /// When the two sequences have different lengths the key times are ignored and the values are
    /// spaced evenly.
    Keyframes { values: Vec<f32>, key_times: Vec<f32> },
}

/// What the layer shows once the animation has ended.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum FillMode {
    /// The animation is removed and the layer shows its model value.
    #[default]
    Removed,
    /// The final animated value stays visible.
    Forwards,
}

/// A fire-and-forget animation of a single layer property.
#[derive(Clone, Debug, PartialEq)]
pub struct LayerAnimation {
    pub key_path: KeyPath,
    pub values: LayerValues,
    /// Bezier applied across the whole animation.
    pub timing: ControlPoints,
    /// Seconds per forward pass.
    pub duration: f32,
    /// Absolute start time on the host's media clock.
    pub begin_time: f64,
    pub repeat_count: f32,
    /// Whether sampled values are added to the property's model value instead of replacing it.
    pub additive: bool,
    pub autoreverse: bool,
    pub fill_mode: FillMode,
}

impl LayerAnimation {
    fn with_values(key_path: KeyPath, values: LayerValues) -> Self {
        Self {
            key_path,
            values,
            timing: ControlPoints::DEFAULT,
            duration: 0.0,
            begin_time: 0.0,
            repeat_count: 1.0,
            additive: false,
            autoreverse: false,
            fill_mode: FillMode::Removed,
        }
    }

    /// Creates an animation from one value to another.
    pub fn basic(
        key_path: KeyPath,
        from: impl Into<AnimationValue>,
        to: impl Into<AnimationValue>,
    ) -> Self {
        Self::with_values(
            key_path,
            LayerValues::Basic {
                from: from.into(),
                to: to.into(),
            },
        )
    }

    /// Creates a keyframe animation through `values` at `key_times`.
    pub fn keyframes(key_path: KeyPath, values: &[f32], key_times: &[f32]) -> Self {
        Self::with_values(
            key_path,
            LayerValues::Keyframes {
                values: values.to_vec(),
                key_times: key_times.to_vec(),
            },
        )
    }

    /// Configures the timing curve, duration, absolute start time and repeat count in one go.
    pub fn timed(
        mut self,
        timing: ControlPoints,
        duration: f32,
        begin_time: f64,
        repeat_count: f32,
    ) -> Self {
        self.timing = timing;
        self.duration = duration;
        self.begin_time = begin_time;
        self.repeat_count = repeat_count;
        self
    }

    /// Configures additive composition.
    pub fn additive(mut self, additive: bool) -> Self {
        self.additive = additive;
        self
    }

    /// Configures whether each cycle plays back in reverse.
    pub fn autoreverse(mut self, autoreverse: bool) -> Self {
        self.autoreverse = autoreverse;
        self
    }

    /// Configures the fill mode.
    pub fn fill_mode(mut self, fill_mode: FillMode) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    /// The time scale of this animation, relative to [`begin_time`](Self::begin_time).
    pub fn time_scale(&self) -> TimeScale {
        TimeScale::new(self.duration, 0.0, self.repeat_count, self.autoreverse)
    }

    /// Evaluates the animation at absolute media time `now`.
    ///
    /// Returns [`None`] before the animation begins, and after it ends unless the fill mode keeps
    /// the final value visible.
    pub fn sample(&self, now: f64) -> Option<AnimationValue> {
        self.sample_with(&CubicBezierTiming::from(self.timing), now)
    }

    /// Same as [`sample`](Self::sample), with a prepared timing function.
    pub fn sample_with(&self, timing: &dyn TimingFunction, now: f64) -> Option<AnimationValue> {
        let time_scale = self.time_scale();
        let position = match time_scale.get_normalized_time((now - self.begin_time) as f32) {
            Ok(position) => position,
            Err(TimeScaleOutOfBounds::NotStarted) => return None,
            Err(TimeScaleOutOfBounds::Ended) => match self.fill_mode {
                FillMode::Forwards => time_scale.end_position(),
                FillMode::Removed => return None,
            },
        };
        self.value_at(timing.calc(position))
    }

    /// The interpolated value at an already eased `progress`.
    pub fn value_at(&self, progress: f32) -> Option<AnimationValue> {
        match &self.values {
            LayerValues::Basic { from, to } => Some(from.lerp(to, progress)),
            LayerValues::Keyframes { values, key_times } => {
                keyframe_value(values, key_times, progress).map(AnimationValue::Scalar)
            }
        }
    }
}

fn keyframe_value(values: &[f32], key_times: &[f32], progress: f32) -> Option<f32> {
    let (first, last) = (*values.first()?, *values.last()?);
    if values.len() == 1 {
        return Some(first);
    }
    let segments = (values.len() - 1) as f32;
    let time_at = |index: usize| {
        if key_times.len() == values.len() {
            key_times[index]
        } else {
            index as f32 / segments
        }
    };
    if progress <= time_at(0) {
        return Some(first);
    }
    if progress >= time_at(values.len() - 1) {
        return Some(last);
    }
    let next = (1..values.len()).find(|&i| progress < time_at(i))?;
    let (start, end) = (time_at(next - 1), time_at(next));
    let span = end - start;
    let local = if span > 0.0 { (progress - start) / span } else { 1.0 };
    Some(values[next - 1].lerp(&values[next], local))
}
