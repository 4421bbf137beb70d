//! Per-view attachment of a [`Configuration`] and a [`Driver`].
//!
//! [`Animated`] is the chained, fluent face of a view's animation state:
//!
//! ```
//! use spry_core::attach::Stage;
//! use spry_core::headless::{HeadlessView, ManualForeground, ManualRunner};
//! use spry_core::host::Host;
//! use spry_core::preset::Preset;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let runner = Rc::new(ManualRunner::new());
//! let stage = Stage::new(Host::new(runner.clone(), Rc::new(ManualForeground::new(true))));
//! let view = Rc::new(RefCell::new(HeadlessView::new(320.0)));
//!
//! stage
//!     .animated(&view)
//!     .duration(1.0)
//!     .force(1.5)
//!     .animate(Some(Preset::SlideUp), None);
//!
//! runner.advance(1.0);
//! assert_eq!(runner.pending_count(), 0);
//! ```

use crate::config::Configuration;
use crate::curve::Curve;
use crate::driver::Driver;
use crate::host::{Host, View};
use crate::preset::Preset;
use crate::transform::AffineTransform;
use log::trace;
use std::cell::{OnceCell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Chained access to the animation state of a single view.
///
/// The configuration exists as soon as the handle does; the driver is created on first use.
/// Setters return `&Self` so calls can be chained on a shared handle.
pub struct Animated {
    view: Weak<RefCell<dyn View>>,
    config: Rc<RefCell<Configuration>>,
    host: Host,
    driver: OnceCell<Rc<Driver>>,
}

impl Animated {
    pub fn new(view: Weak<RefCell<dyn View>>, host: Host) -> Self {
        Self {
            view,
            config: Rc::new(RefCell::new(Configuration::default())),
            host,
            driver: OnceCell::new(),
        }
    }

    /// The driver of this view, created on first access.
    pub fn driver(&self) -> &Rc<Driver> {
        self.driver.get_or_init(|| {
            trace!("Creating driver");
            Driver::new(self.view.clone(), self.config.clone(), self.host.clone())
        })
    }

    /// A copy of the current configuration.
    pub fn config(&self) -> Configuration {
        self.config.borrow().clone()
    }

    /// Whether the view is still alive.
    pub fn is_alive(&self) -> bool {
        self.view.strong_count() > 0
    }

    /// Edits the configuration in place.
    pub fn set(&self, f: impl FnOnce(&mut Configuration)) -> &Self {
        f(&mut *self.config.borrow_mut());
        self
    }

    pub fn autostart(&self, autostart: bool) -> &Self {
        self.set(|config| config.autostart = autostart)
    }

    pub fn autohide(&self, autohide: bool) -> &Self {
        self.set(|config| config.autohide = autohide)
    }

    pub fn force(&self, force: f32) -> &Self {
        self.set(|config| config.force = force)
    }

    pub fn delay(&self, delay: f32) -> &Self {
        self.set(|config| config.delay = delay)
    }

    pub fn duration(&self, duration: f32) -> &Self {
        self.set(|config| config.duration = duration)
    }

    pub fn damping(&self, damping: f32) -> &Self {
        self.set(|config| config.damping = damping)
    }

    pub fn velocity(&self, velocity: f32) -> &Self {
        self.set(|config| config.velocity = velocity)
    }

    pub fn repeat_count(&self, repeat_count: f32) -> &Self {
        self.set(|config| config.repeat_count = repeat_count)
    }

    /// Sets the translation.
    pub fn point(&self, x: f32, y: f32) -> &Self {
        self.set(|config| {
            config.translate_x = x;
            config.translate_y = y;
        })
    }

    pub fn scale(&self, x: f32, y: f32) -> &Self {
        self.set(|config| {
            config.scale_x = x;
            config.scale_y = y;
        })
    }

    /// Sets the rotation, in radians.
    pub fn rotate(&self, radians: f32) -> &Self {
        self.set(|config| config.rotate = radians)
    }

    pub fn opacity(&self, opacity: f32) -> &Self {
        self.set(|config| config.opacity = opacity)
    }

    pub fn animate_from(&self, animate_from: bool) -> &Self {
        self.set(|config| config.animate_from = animate_from)
    }

    pub fn curve(&self, curve: Curve) -> &Self {
        self.set(|config| config.curve = curve)
    }

    pub fn preset(&self, preset: Preset) -> &Self {
        self.set(|config| config.preset = preset)
    }

    /// Sets the view's transform directly, outside of any animation.
    pub fn transform(&self, transform: AffineTransform) -> &Self {
        if let Some(view) = self.view.upgrade() {
            view.borrow_mut().set_transform(transform);
        }
        self
    }

    /// Sets the view's opacity directly, outside of any animation.
    pub fn alpha(&self, alpha: f32) -> &Self {
        if let Some(view) = self.view.upgrade() {
            view.borrow_mut().set_opacity(alpha);
        }
        self
    }

    /// Selects `preset` (if given) and animates the view in. See [`Driver::run`].
    pub fn animate(&self, preset: Option<Preset>, completion: Option<Box<dyn FnOnce()>>) {
        if let Some(preset) = preset {
            self.config.borrow_mut().preset = preset;
        }
        self.driver().run(completion);
    }

    /// Selects `preset` (if given) and animates the view out. See [`Driver::run_to`].
    pub fn animate_to(&self, preset: Option<Preset>, completion: Option<Box<dyn FnOnce()>>) {
        if let Some(preset) = preset {
            self.config.borrow_mut().preset = preset;
        }
        self.driver().run_to(completion);
    }

    /// Forwards the host's layout pass. See [`Driver::custom_layout_subviews`].
    pub fn custom_layout_subviews(&self) {
        self.driver().custom_layout_subviews();
    }

    /// Forwards the host's view creation. See [`Driver::custom_awake_from_nib`].
    pub fn custom_awake_from_nib(&self) {
        self.driver().custom_awake_from_nib();
    }
}

struct Entry {
    view: Weak<RefCell<dyn View>>,
    animated: Rc<Animated>,
}

/// Associates views with their [`Animated`] handles.
///
/// Views are held weakly and identified by address. An entry whose view has been dropped is never
/// handed out again, and is removed by [`prune`](Self::prune) or replaced when a new view reuses
/// its address.
pub struct Stage {
    host: Host,
    entries: RefCell<HashMap<usize, Entry>>,
}

impl Stage {
    pub fn new(host: Host) -> Self {
        Self {
            host,
            entries: RefCell::new(HashMap::new()),
        }
    }

    /// The handle for `view`, created on first request.
    pub fn animated<V: View + 'static>(&self, view: &Rc<RefCell<V>>) -> Rc<Animated> {
        let key = Rc::as_ptr(view) as *const () as usize;
        let mut entries = self.entries.borrow_mut();
        if let Some(entry) = entries.get(&key) {
            if entry.view.strong_count() > 0 {
                return entry.animated.clone();
            }
        }
        let weak = Rc::downgrade(view);
        let weak: Weak<RefCell<dyn View>> = weak;
        let animated = Rc::new(Animated::new(weak.clone(), self.host.clone()));
        entries.insert(
            key,
            Entry {
                view: weak,
                animated: animated.clone(),
            },
        );
        animated
    }

    /// Removes entries whose view is gone. Returns how many were removed.
    pub fn prune(&self) -> usize {
        let mut entries = self.entries.borrow_mut();
        let before = entries.len();
        entries.retain(|_, entry| entry.view.strong_count() > 0);
        let removed = before - entries.len();
        if removed > 0 {
            trace!("Pruned {removed} entries for dropped views");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessView, ManualForeground, ManualRunner};
    use std::cell::Cell;

    fn stage() -> (Rc<ManualRunner>, Stage) {
        let runner = Rc::new(ManualRunner::new());
        let host = Host::new(runner.clone(), Rc::new(ManualForeground::new(true)));
        (runner, Stage::new(host))
    }

    #[test]
    fn chained_setters_fill_configuration() {
        let (_, stage) = stage();
        let view = Rc::new(RefCell::new(HeadlessView::new(10.0)));

        let animated = stage.animated(&view);
        animated
            .force(2.0)
            .delay(0.1)
            .duration(1.2)
            .damping(0.5)
            .velocity(0.3)
            .repeat_count(2.0)
            .point(4.0, 5.0)
            .scale(1.5, 0.5)
            .rotate(0.25)
            .opacity(0.4)
            .animate_from(false)
            .curve(Curve::InOutCirc)
            .preset(Preset::Pop)
            .autostart(true)
            .autohide(true);

        assert_eq!(
            animated.config(),
            Configuration::default()
                .force(2.0)
                .delay(0.1)
                .duration(1.2)
                .damping(0.5)
                .velocity(0.3)
                .repeat_count(2.0)
                .translate(4.0, 5.0)
                .scale(1.5, 0.5)
                .rotate(0.25)
                .opacity(0.4)
                .animate_from(false)
                .curve(Curve::InOutCirc)
                .preset(Preset::Pop)
                .autostart(true)
                .autohide(true)
        );
    }

    #[test]
    fn same_view_gets_same_handle() {
        let (_, stage) = stage();
        let view = Rc::new(RefCell::new(HeadlessView::new(10.0)));
        let other = Rc::new(RefCell::new(HeadlessView::new(10.0)));

        let first = stage.animated(&view);
        first.force(3.0);

        assert!(Rc::ptr_eq(&first, &stage.animated(&view)));
        assert!(!Rc::ptr_eq(&first, &stage.animated(&other)));
        assert_eq!(stage.animated(&view).config().force, 3.0);
        assert_eq!(stage.len(), 2);
    }

    #[test]
    fn prune_drops_dead_views() {
        let (_, stage) = stage();
        let kept = Rc::new(RefCell::new(HeadlessView::new(10.0)));
        let dropped = Rc::new(RefCell::new(HeadlessView::new(10.0)));
        stage.animated(&kept);
        let handle = stage.animated(&dropped);
        drop(dropped);

        assert!(!handle.is_alive());
        assert_eq!(stage.prune(), 1);
        assert_eq!(stage.len(), 1);
    }

    #[test]
    fn direct_view_setters_bypass_configuration() {
        let (_, stage) = stage();
        let view = Rc::new(RefCell::new(HeadlessView::new(10.0)));

        stage
            .animated(&view)
            .transform(AffineTransform::scale(2.0, 2.0))
            .alpha(0.5);

        assert_eq!(view.borrow().transform(), AffineTransform::scale(2.0, 2.0));
        assert_eq!(view.borrow().opacity(), 0.5);
        assert!(stage.animated(&view).config().is_reset());
    }

    #[test]
    fn animate_selects_preset_and_runs() {
        let (runner, stage) = stage();
        let view = Rc::new(RefCell::new(HeadlessView::new(10.0)));
        let animated = stage.animated(&view);

        animated.animate(Some(Preset::FadeIn), None);

        assert_eq!(animated.config().preset, Preset::FadeIn);
        assert_eq!(runner.pending_count(), 1);
        runner.finish_all();
        assert_eq!(animated.config().preset, Preset::None);
    }
    #[test]
    fn animating_one_view_leaves_another_in_flight() {
        let (runner, stage) = stage();
        let first = Rc::new(RefCell::new(HeadlessView::new(10.0)));
        let second = Rc::new(RefCell::new(HeadlessView::new(10.0)));
        let completed = Rc::new(Cell::new(false));
        let flag = completed.clone();

        stage
            .animated(&first)
            .duration(5.0)
            .animate(Some(Preset::SlideLeft), Some(Box::new(move || flag.set(true))));
        stage.animated(&second).animate(Some(Preset::FadeIn), None);

        assert!(!completed.get());
        assert_eq!(stage.animated(&first).config().preset, Preset::SlideLeft);
        assert_eq!(runner.pending_count(), 2);
        runner.advance(1.0);
        assert!(!completed.get());
        assert_eq!(runner.pending_count(), 1);
        runner.advance(4.0);
        assert!(completed.get());
        assert!(stage.animated(&first).config().is_reset());
    }

    #[test]
    fn animating_same_view_again_interrupts_its_run() {
        let (runner, stage) = stage();
        let view = Rc::new(RefCell::new(HeadlessView::new(10.0)));
        let completed = Rc::new(Cell::new(false));
        let flag = completed.clone();

        stage
            .animated(&view)
            .duration(5.0)
            .animate(Some(Preset::SlideLeft), Some(Box::new(move || flag.set(true))));
        stage.animated(&view).animate(Some(Preset::FadeIn), None);

        assert!(completed.get());
        assert_eq!(runner.pending_count(), 1);
    }
}

