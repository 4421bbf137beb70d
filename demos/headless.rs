use log::info;
use spry::headless::{HeadlessView, ManualForeground, ManualRunner};
use spry::prelude::*;
use spry::{AnimationRunner, AnimationValue};
use std::cell::RefCell;
use std::rc::Rc;

const FRAME: f64 = 1.0 / 60.0;

/// Plays a few animations against the in-process host and prints what happens:
///
/// 1. A tap-style animation built from chained setters: the view pops in from 80% scale while
///    fading in, eased out over two seconds.
/// 2. Every preset by name, stepping the manual clock so each run completes.
/// 3. A layer effect (`wobble`), sampled at a few points in time.
///
/// Run with `RUST_LOG=debug` to see the driver's own logging.
fn main() {
    env_logger::init();

    let runner = Rc::new(ManualRunner::new());
    let foreground = Rc::new(ManualForeground::new(true));
    let stage = Stage::new(Host::new(runner.clone(), foreground));
    let view = Rc::new(RefCell::new(HeadlessView::new(320.0)));

    stage
        .animated(&view)
        .opacity(0.0)
        .scale(0.8, 0.8)
        .duration(2.0)
        .curve(Curve::OutQuad)
        .animate(None, Some(Box::new(|| info!("Tap animation finished"))));
    print_events("tap", &view);
    step(&runner, 2.0);

    for preset in Preset::all() {
        let name = preset.name();
        match name.parse::<Preset>() {
            Ok(parsed) => stage.animated(&view).force(1.5).animate(Some(parsed), None),
            Err(err) => eprintln!("{err}"),
        }
        print_events(name, &view);
        step(&runner, 1.0);
    }

    stage.animated(&view).duration(1.0).animate(Some(Preset::Wobble), None);
    let start = runner.now();
    for tenth in 0..=10 {
        let now = start + tenth as f64 / 10.0;
        if let Some(AnimationValue::Scalar(angle)) = view.borrow().render_layer().sample("wobble", now)
        {
            println!("wobble t={:.1}s rotation={angle:+.3}rad", now - start);
        }
    }
    step(&runner, 1.0);
}

fn print_events(label: &str, view: &Rc<RefCell<HeadlessView>>) {
    let mut view = view.borrow_mut();
    println!("{label}: {:?}", view.events());
    view.clear_events();
}

fn step(runner: &ManualRunner, seconds: f64) {
    let frames = (seconds / FRAME).ceil() as usize;
    for _ in 0..frames {
        runner.advance(FRAME);
    }
}
