//! Runs animations for a single view.

use crate::config::Configuration;
use crate::curve::SpringBasis;
use crate::host::{
    AnimationOptions, AnimationRequest, Animations, ForegroundListener, Host, RunCompletion,
    SpringParameters, View,
};
use crate::solver::{resolve_preset, RunPlan, OPACITY_SENTINEL};
use log::{debug, trace};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// Where a driver stands with respect to playing automatically on first layout.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AutoplayPhase {
    /// The view has not been laid out yet.
    PendingFirstLayout,
    /// The first layout happened while auto-play could not start; the next foreground transition
    /// will start the run.
    DeferredUntilForeground,
    /// An automatically or manually started run has not completed yet.
    Playing,
    /// Nothing left to do automatically.
    Idle,
}

/// Drives the animations of one view from its [`Configuration`].
///
/// A driver holds its view weakly and shares the configuration with whoever fills it in (usually an
/// [`Animated`](crate::attach::Animated) handle). Each [`run`](Self::run) resolves the configured
/// preset, submits any layer animations, asks the host runner to animate the view's transform and
/// opacity, and resets the configuration once the runner reports back.
///
/// All methods take `&self` and never hold a borrow of the view or configuration while calling into
/// the host. Runners may finish or interrupt runs from inside
/// [`AnimationRunner::run`](crate::host::AnimationRunner::run), and completions may start new runs.
pub struct Driver {
    view: Weak<RefCell<dyn View>>,
    config: Rc<RefCell<Configuration>>,
    host: Host,
    spring_basis: Cell<SpringBasis>,
    awaiting_first_layout: Cell<bool>,
    pending_foreground: Cell<bool>,
    in_flight: Rc<Cell<usize>>,
}

impl Driver {
    /// Creates a driver for `view` and subscribes it to the host's foreground signal.
    pub fn new(
        view: Weak<RefCell<dyn View>>,
        config: Rc<RefCell<Configuration>>,
        host: Host,
    ) -> Rc<Self> {
        let driver = Rc::new(Self {
            view,
            config,
            host,
            spring_basis: Cell::new(SpringBasis::default()),
            awaiting_first_layout: Cell::new(true),
            pending_foreground: Cell::new(false),
            in_flight: Rc::new(Cell::new(0)),
        });
        let listener = Rc::downgrade(&driver);
        let listener: Weak<dyn ForegroundListener> = listener;
        driver.host.foreground.subscribe(listener);
        driver
    }

    /// The configuration consumed by the next run.
    pub fn config(&self) -> &Rc<RefCell<Configuration>> {
        &self.config
    }

    pub fn spring_basis(&self) -> SpringBasis {
        self.spring_basis.get()
    }

    /// Chooses which value shapes the bezier of a [`Curve::Spring`](crate::curve::Curve::Spring).
    /// The setting outlives runs.
    pub fn set_spring_basis(&self, basis: SpringBasis) {
        self.spring_basis.set(basis);
    }

    /// Number of runs dispatched whose completion has not fired yet.
    pub fn runs_in_flight(&self) -> usize {
        self.in_flight.get()
    }

    pub fn autoplay_phase(&self) -> AutoplayPhase {
        if self.awaiting_first_layout.get() {
            AutoplayPhase::PendingFirstLayout
        } else if self.pending_foreground.get() {
            AutoplayPhase::DeferredUntilForeground
        } else if self.in_flight.get() > 0 {
            AutoplayPhase::Playing
        } else {
            AutoplayPhase::Idle
        }
    }

    /// Animates the view using the current configuration.
    ///
    /// By default the view jumps to the displaced state described by the configuration and animates
    /// back to rest; presets that animate outwards (or a cleared
    /// [`animate_from`](Configuration::animate_from)) reverse that. Once the host runner reports
    /// back, finished or not, the configuration is reset and then `completion` is called.
    pub fn run(&self, completion: Option<Box<dyn FnOnce()>>) {
        let Some(view) = self.view.upgrade() else {
            debug!("View is gone; skipping run and resetting configuration");
            self.config.borrow_mut().reset();
            if let Some(completion) = completion {
                completion();
            }
            return;
        };

        let snapshot = {
            let mut config = self.config.borrow_mut();
            let mut view = view.borrow_mut();
            view.set_opacity(OPACITY_SENTINEL);
            let layer_width = view.layer().width();
            let now = self.host.runner.now();
            let animations =
                resolve_preset(&mut config, layer_width, now, self.spring_basis.get());
            for (key, animation) in animations {
                debug!(
                    "Adding layer animation '{}' on {} for preset {:?}",
                    key, animation.key_path, config.preset
                );
                view.layer().add_animation(key, animation);
            }
            config.clone()
        };
        debug!(
            "Running preset {:?} with curve {:?} ({}, duration {}s, delay {}s)",
            snapshot.preset,
            snapshot.curve,
            if snapshot.animate_from { "from displaced" } else { "to displaced" },
            snapshot.duration,
            snapshot.delay
        );

        let plan = RunPlan::new(&snapshot);
        if let Some(start) = plan.start {
            start.apply_to(&mut *view.borrow_mut());
        }

        let request = AnimationRequest {
            duration: snapshot.duration,
            delay: snapshot.delay,
            spring: Some(SpringParameters {
                damping: snapshot.damping,
                velocity: snapshot.velocity,
            }),
            options: AnimationOptions::from(snapshot.curve.coarse())
                | AnimationOptions::ALLOW_USER_INTERACTION,
            target: Some(Rc::as_ptr(&view) as *const () as usize),
        };

        let target: Weak<RefCell<dyn View>> = Rc::downgrade(&view);
        drop(view);
        let end = plan.end;
        let animations: Animations = Box::new(move || match target.upgrade() {
            Some(view) => end.apply_to(&mut *view.borrow_mut()),
            None => debug!("View is gone; skipping animated changes"),
        });

        self.in_flight.set(self.in_flight.get() + 1);
        let config = Rc::clone(&self.config);
        let in_flight = Rc::clone(&self.in_flight);
        let on_complete = RunCompletion::new(move |finished| {
            trace!("Run ended (finished: {finished}); resetting configuration");
            config.borrow_mut().reset();
            in_flight.set(in_flight.get().saturating_sub(1));
            if let Some(completion) = completion {
                completion();
            }
        });

        self.host.runner.run(request, animations, on_complete);
    }

    /// Animates the view out to the displaced state described by the configuration, regardless of
    /// the configured direction.
    pub fn run_to(&self, completion: Option<Box<dyn FnOnce()>>) {
        self.config.borrow_mut().animate_from = false;
        self.run(completion);
    }

    /// Hook for the host's layout pass. The first call starts auto-play, or defers it until the
    /// application is in the foreground.
    pub fn custom_layout_subviews(&self) {
        if !self.awaiting_first_layout.replace(false) {
            return;
        }
        let autostart = self.config.borrow().autostart;
        self.hide();
        if !autostart || !self.host.foreground.is_active() {
            trace!("Deferring auto-play until the application becomes active");
            self.pending_foreground.set(true);
            return;
        }
        trace!("Auto-playing on first layout");
        self.run(None);
    }

    /// Hook for the host's view creation. Hides the view if it is set to auto-hide.
    pub fn custom_awake_from_nib(&self) {
        if self.config.borrow().autohide {
            trace!("Auto-hiding view");
            self.hide();
        }
    }

    /// Starts a deferred auto-play, if there is one.
    pub fn on_foreground(&self) {
        if !self.pending_foreground.replace(false) {
            return;
        }
        trace!("Application became active; starting deferred auto-play");
        self.hide();
        self.run(None);
    }

    fn hide(&self) {
        match self.view.upgrade() {
            Some(view) => view.borrow_mut().set_opacity(0.0),
            None => debug!("View is gone; nothing to hide"),
        }
    }
}

impl ForegroundListener for Driver {
    fn became_active(&self) {
        self.on_foreground();
    }
}
