//! In-process host implementation.
//!
//! Useful for tests, previews and hosts that render on their own: views record every change made to
//! them, layers store animations by key and can sample them, and the runner only moves forward when
//! told to.

use crate::curve::{CubicBezierTiming, TimingFunction};
use crate::host::{
    AnimationRequest, AnimationRunner, Animations, ForegroundListener, ForegroundSignal,
    RenderLayer, RunCompletion, View,
};
use crate::layer::{AnimationValue, FillMode, LayerAnimation};
use crate::transform::AffineTransform;
use log::trace;
use std::cell::{Cell, RefCell};
use std::rc::Weak;

/// A change made to a [`HeadlessView`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewEvent {
    Transform(AffineTransform),
    Opacity(f32),
}

/// A view that keeps its state in memory and logs every change.
#[derive(Clone, Debug)]
pub struct HeadlessView {
    transform: AffineTransform,
    opacity: f32,
    layer: HeadlessLayer,
    events: Vec<ViewEvent>,
}

impl HeadlessView {
    /// Creates a view at rest whose layer is `width` units wide.
    pub fn new(width: f32) -> Self {
        Self {
            transform: AffineTransform::IDENTITY,
            opacity: 1.0,
            layer: HeadlessLayer::new(width),
            events: Vec::new(),
        }
    }

    /// Every transform and opacity change, oldest first.
    pub fn events(&self) -> &[ViewEvent] {
        &self.events
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }

    pub fn render_layer(&self) -> &HeadlessLayer {
        &self.layer
    }
}

impl View for HeadlessView {
    fn transform(&self) -> AffineTransform {
        self.transform
    }

    fn set_transform(&mut self, transform: AffineTransform) {
        self.transform = transform;
        self.events.push(ViewEvent::Transform(transform));
    }

    fn opacity(&self) -> f32 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
        self.events.push(ViewEvent::Opacity(opacity));
    }

    fn layer(&mut self) -> &mut dyn RenderLayer {
        &mut self.layer
    }
}

#[derive(Clone, Debug)]
struct ActiveAnimation {
    key: String,
    animation: LayerAnimation,
    timing: Box<dyn TimingFunction>,
}

/// A render layer that stores its animations and evaluates them on demand.
#[derive(Clone, Debug)]
pub struct HeadlessLayer {
    width: f32,
    animations: Vec<ActiveAnimation>,
}

impl HeadlessLayer {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            animations: Vec::new(),
        }
    }

    pub fn animation(&self, key: &str) -> Option<&LayerAnimation> {
        self.find(key).map(|active| &active.animation)
    }

    /// Keys of the stored animations, in the order they were added.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.animations.iter().map(|active| active.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// Value of the animation stored under `key` at media time `now`.
    pub fn sample(&self, key: &str, now: f64) -> Option<AnimationValue> {
        let active = self.find(key)?;
        active.animation.sample_with(active.timing.as_ref(), now)
    }

    /// Drops the animations that have ended by `now` and do not hold their final value. Returns
    /// how many were removed.
    pub fn remove_finished(&mut self, now: f64) -> usize {
        let before = self.animations.len();
        self.animations.retain(|active| {
            let animation = &active.animation;
            let end = animation.begin_time + animation.time_scale().total_duration() as f64;
            animation.fill_mode == FillMode::Forwards || now < end
        });
        before - self.animations.len()
    }

    fn find(&self, key: &str) -> Option<&ActiveAnimation> {
        self.animations.iter().find(|active| active.key == key)
    }
}

impl RenderLayer for HeadlessLayer {
    fn add_animation(&mut self, key: &str, animation: LayerAnimation) {
        self.animations.retain(|active| active.key != key);
        let timing: Box<dyn TimingFunction> = Box::new(CubicBezierTiming::from(animation.timing));
        self.animations.push(ActiveAnimation {
            key: key.to_string(),
            animation,
            timing,
        });
    }

    fn width(&self) -> f32 {
        self.width
    }
}

struct PendingRun {
    target: Option<usize>,
    ends_at: f64,
    completion: RunCompletion,
}

/// An [`AnimationRunner`] driven by a manual clock.
///
/// Animated changes are applied as soon as a run starts, the way a toolkit updates its model values
/// up front and animates only the presentation. Completions fire when the clock is advanced past
/// the end of the run (delay included) or when the run is superseded by a newer run on the same
/// [`target`](AnimationRequest::target).
pub struct ManualRunner {
    clock: Cell<f64>,
    supersede: bool,
    pending: RefCell<Vec<PendingRun>>,
    requests: RefCell<Vec<AnimationRequest>>,
}

impl Default for ManualRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualRunner {
    /// Creates a runner where each run supersedes any run still in flight on the same view, as
    /// happens when a view is animated again before its previous animation has ended. Runs on
    /// other views, and runs without a target, are left alone.
    pub fn new() -> Self {
        Self {
            clock: Cell::new(0.0),
            supersede: true,
            pending: RefCell::new(Vec::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Creates a runner whose runs never interrupt each other, even on the same view.
    pub fn concurrent() -> Self {
        Self {
            supersede: false,
            ..Self::new()
        }
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<AnimationRequest> {
        self.requests.borrow().clone()
    }

    /// Number of runs that have not completed.
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Moves the clock forward and completes every run that has ended by the new time.
    ///
    /// Runs started by those completions are queued but not checked until the next call.
    pub fn advance(&self, seconds: f64) {
        let now = self.clock.get() + seconds;
        self.clock.set(now);
        let due: Vec<PendingRun> = {
            let mut pending = self.pending.borrow_mut();
            let (due, remaining): (Vec<_>, Vec<_>) =
                pending.drain(..).partition(|run| run.ends_at <= now);
            *pending = remaining;
            due
        };
        if !due.is_empty() {
            trace!("Completing {} run(s) at t={now}", due.len());
        }
        for run in due {
            run.completion.finish(true);
        }
    }

    /// Completes every pending run immediately, without moving the clock.
    pub fn finish_all(&self) {
        let runs: Vec<PendingRun> = self.pending.borrow_mut().drain(..).collect();
        for run in runs {
            run.completion.finish(true);
        }
    }

    /// Interrupts every pending run.
    pub fn interrupt_all(&self) {
        let runs: Vec<PendingRun> = self.pending.borrow_mut().drain(..).collect();
        for run in runs {
            run.completion.finish(false);
        }
    }
}

impl AnimationRunner for ManualRunner {
    fn run(&self, request: AnimationRequest, animations: Animations, completion: RunCompletion) {
        self.requests.borrow_mut().push(request);
        animations();
        let ends_at = self.clock.get() + (request.delay + request.duration) as f64;
        let superseded: Vec<PendingRun> = {
            let mut pending = self.pending.borrow_mut();
            let superseded = match request.target {
                Some(target) if self.supersede => {
                    let (superseded, remaining): (Vec<_>, Vec<_>) = pending
                        .drain(..)
                        .partition(|run| run.target == Some(target));
                    *pending = remaining;
                    superseded
                }
                _ => Vec::new(),
            };
            pending.push(PendingRun {
                target: request.target,
                ends_at,
                completion,
            });
            superseded
        };
        for run in superseded {
            trace!("Run superseded before its end at t={}", run.ends_at);
            run.completion.finish(false);
        }
    }

    fn now(&self) -> f64 {
        self.clock.get()
    }
}

/// A [`ForegroundSignal`] that is toggled by hand.
pub struct ManualForeground {
    active: Cell<bool>,
    listeners: RefCell<Vec<Weak<dyn ForegroundListener>>>,
}

impl ManualForeground {
    pub fn new(active: bool) -> Self {
        Self {
            active: Cell::new(active),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Moves the application to the foreground and notifies every live listener.
    pub fn become_active(&self) {
        self.active.set(true);
        let listeners: Vec<_> = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.retain(|listener| listener.strong_count() > 0);
            listeners.iter().filter_map(Weak::upgrade).collect()
        };
        for listener in listeners {
            listener.became_active();
        }
    }

    pub fn resign_active(&self) {
        self.active.set(false);
    }

    /// Number of listeners that are still alive.
    pub fn listener_count(&self) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|listener| listener.strong_count() > 0)
            .count()
    }
}

impl ForegroundSignal for ManualForeground {
    fn is_active(&self) -> bool {
        self.active.get()
    }

    fn subscribe(&self, listener: Weak<dyn ForegroundListener>) {
        self.listeners.borrow_mut().push(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::ControlPoints;
    use crate::host::AnimationOptions;
    use crate::layer::KeyPath;
    use std::rc::Rc;

    fn request(duration: f32, delay: f32) -> AnimationRequest {
        AnimationRequest {
            duration,
            delay,
            spring: None,
            options: AnimationOptions::empty(),
            target: Some(1),
        }
    }

    fn recorder() -> (Rc<RefCell<Vec<bool>>>, RunCompletion) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let recorded = calls.clone();
        let completion = RunCompletion::new(move |finished| recorded.borrow_mut().push(finished));
        (calls, completion)
    }

    #[test]
    fn layer_replaces_animations_by_key() {
        let mut layer = HeadlessLayer::new(50.0);
        layer.add_animation("fade", LayerAnimation::basic(KeyPath::Opacity, 1.0, 0.0));
        layer.add_animation("pop", LayerAnimation::basic(KeyPath::TransformScale, 0.0, 1.0));
        layer.add_animation("fade", LayerAnimation::basic(KeyPath::Opacity, 0.0, 1.0));

        assert_eq!(layer.keys().collect::<Vec<_>>(), ["pop", "fade"]);
        assert_eq!(
            layer.animation("fade").map(|a| a.values.clone()),
            Some(LayerAnimation::basic(KeyPath::Opacity, 0.0, 1.0).values)
        );
    }

    #[test]
    fn layer_samples_and_removes_finished() {
        let mut layer = HeadlessLayer::new(50.0);
        let fade = LayerAnimation::basic(KeyPath::Opacity, 1.0, 0.0)
            .timed(ControlPoints::LINEAR, 1.0, 2.0, 1.0);
        layer.add_animation("fade", fade.clone());
        layer.add_animation("held", fade.fill_mode(FillMode::Forwards));

        assert_eq!(layer.sample("fade", 1.0), None);
        assert_eq!(layer.sample("fade", 2.0), Some(AnimationValue::Scalar(1.0)));
        assert_eq!(layer.remove_finished(2.5), 0);
        assert_eq!(layer.remove_finished(3.0), 1);
        assert_eq!(layer.keys().collect::<Vec<_>>(), ["held"]);
    }

    #[test]
    fn runner_applies_changes_up_front() {
        let runner = ManualRunner::new();
        let applied = Rc::new(Cell::new(false));
        let flag = applied.clone();
        let (_, completion) = recorder();

        runner.run(request(1.0, 0.0), Box::new(move || flag.set(true)), completion);

        assert!(applied.get());
        assert_eq!(runner.pending_count(), 1);
    }

    #[test]
    fn runner_completes_after_delay_and_duration() {
        let runner = ManualRunner::new();
        let (calls, completion) = recorder();
        runner.run(request(1.0, 0.5), Box::new(|| {}), completion);

        runner.advance(1.0);
        assert!(calls.borrow().is_empty());

        runner.advance(0.5);
        assert_eq!(*calls.borrow(), vec![true]);
        assert_eq!(runner.now(), 1.5);
    }

    #[test]
    fn new_run_supersedes_pending_run() {
        let runner = ManualRunner::new();
        let (first, first_completion) = recorder();
        let (second, second_completion) = recorder();

        runner.run(request(1.0, 0.0), Box::new(|| {}), first_completion);
        runner.run(request(1.0, 0.0), Box::new(|| {}), second_completion);

        assert_eq!(*first.borrow(), vec![false]);
        assert!(second.borrow().is_empty());
        runner.finish_all();
        assert_eq!(*second.borrow(), vec![true]);
    }

    #[test]
    fn runs_on_other_targets_are_not_superseded() {
        let runner = ManualRunner::new();
        let (first, first_completion) = recorder();
        let (second, second_completion) = recorder();
        let (block, block_completion) = recorder();

        runner.run(request(1.0, 0.0), Box::new(|| {}), first_completion);
        let other = AnimationRequest {
            target: Some(2),
            ..request(2.0, 0.0)
        };
        runner.run(other, Box::new(|| {}), second_completion);
        let untargeted = AnimationRequest {
            target: None,
            ..request(2.0, 0.0)
        };
        runner.run(untargeted, Box::new(|| {}), block_completion);

        assert!(first.borrow().is_empty());
        assert_eq!(runner.pending_count(), 3);
        runner.advance(1.0);
        assert_eq!(*first.borrow(), vec![true]);
        runner.advance(1.0);
        assert_eq!(*second.borrow(), vec![true]);
        assert_eq!(*block.borrow(), vec![true]);
    }

    #[test]
    fn concurrent_runner_keeps_runs_independent() {
        let runner = ManualRunner::concurrent();
        let (first, first_completion) = recorder();
        let (second, second_completion) = recorder();

        runner.run(request(1.0, 0.0), Box::new(|| {}), first_completion);
        runner.run(request(2.0, 0.0), Box::new(|| {}), second_completion);
        runner.advance(1.0);

        assert_eq!(*first.borrow(), vec![true]);
        assert!(second.borrow().is_empty());
        runner.interrupt_all();
        assert_eq!(*second.borrow(), vec![false]);
    }

    struct Counter(Cell<usize>);

    impl ForegroundListener for Counter {
        fn became_active(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn foreground_notifies_live_listeners() {
        let foreground = ManualForeground::new(false);
        let kept = Rc::new(Counter(Cell::new(0)));
        let dropped = Rc::new(Counter(Cell::new(0)));
        let kept_listener = Rc::downgrade(&kept);
        let kept_listener: Weak<dyn ForegroundListener> = kept_listener;
        let dropped_listener = Rc::downgrade(&dropped);
        let dropped_listener: Weak<dyn ForegroundListener> = dropped_listener;
        foreground.subscribe(kept_listener);
        foreground.subscribe(dropped_listener);
        drop(dropped);

        foreground.become_active();

        assert!(foreground.is_active());
        assert_eq!(kept.0.get(), 1);
        assert_eq!(foreground.listener_count(), 1);
    }
}
