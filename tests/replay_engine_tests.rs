use std::cell::{Cell, RefCell};
use std::rc::Rc;

use annot_rs::core::OhlcBar;
use annot_rs::replay::{ManualClock, ReplayConfig, ReplayEngine, ReplayStatus};

fn series(len: usize) -> Vec<OhlcBar> {
    (0..len)
        .map(|i| OhlcBar::new(i as f64, 1.0, 2.0, 0.5, 1.5, Some(10.0)).expect("valid bar"))
        .collect()
}

struct Recorder {
    ticks: Rc<RefCell<Vec<(usize, bool)>>>,
    completions: Rc<Cell<usize>>,
}

fn engine_with_recorder(
    len: usize,
    config: ReplayConfig,
    clock: ManualClock,
) -> (ReplayEngine<ManualClock>, Recorder) {
    let mut engine = ReplayEngine::with_clock(series(len), config, clock);

    let ticks = Rc::new(RefCell::new(Vec::new()));
    let completions = Rc::new(Cell::new(0));

    let tick_log = Rc::clone(&ticks);
    engine.on_tick(move |tick| {
        tick_log.borrow_mut().push((tick.index, tick.is_last));
    });

    let completion_count = Rc::clone(&completions);
    engine.on_complete(move || {
        completion_count.set(completion_count.get() + 1);
    });

    (engine, Recorder { ticks, completions })
}

fn speed(ms: u64) -> ReplayConfig {
    ReplayConfig {
        speed_ms: ms,
        ..ReplayConfig::default()
    }
}

#[test]
fn full_run_is_deterministic() {
    let clock = ManualClock::new();
    let (mut engine, recorder) = engine_with_recorder(3, speed(50), clock.clone());

    assert!(engine.start());
    assert_eq!(engine.status(), ReplayStatus::Playing);

    clock.advance_ms(200);
    let fired = engine.poll();

    assert_eq!(fired, 3);
    assert_eq!(
        *recorder.ticks.borrow(),
        vec![(0, false), (1, false), (2, true)]
    );
    assert_eq!(recorder.completions.get(), 1);
    assert_eq!(engine.status(), ReplayStatus::Stopped);
}

#[test]
fn empty_series_refuses_to_start() {
    let clock = ManualClock::new();
    let (mut engine, recorder) = engine_with_recorder(0, speed(50), clock.clone());

    assert!(!engine.start());
    assert_eq!(engine.status(), ReplayStatus::Idle);

    clock.advance_ms(1_000);
    assert_eq!(engine.poll(), 0);
    assert!(recorder.ticks.borrow().is_empty());
    assert_eq!(recorder.completions.get(), 0);
}

#[test]
fn no_tick_fires_before_the_first_interval() {
    let clock = ManualClock::new();
    let (mut engine, recorder) = engine_with_recorder(3, speed(50), clock.clone());

    assert!(engine.start());
    clock.advance_ms(49);
    assert_eq!(engine.poll(), 0);
    assert!(recorder.ticks.borrow().is_empty());

    clock.advance_ms(1);
    assert_eq!(engine.poll(), 1);
    assert_eq!(*recorder.ticks.borrow(), vec![(0, false)]);
}

#[test]
fn pause_blocks_ticks_until_resume() {
    let clock = ManualClock::new();
    let (mut engine, recorder) = engine_with_recorder(3, speed(50), clock.clone());

    assert!(engine.start());
    clock.advance_ms(50);
    assert_eq!(engine.poll(), 1);

    engine.pause();
    assert_eq!(engine.status(), ReplayStatus::Paused);

    clock.advance_ms(10_000);
    assert_eq!(engine.poll(), 0);
    assert_eq!(*recorder.ticks.borrow(), vec![(0, false)]);

    engine.resume();
    assert_eq!(engine.status(), ReplayStatus::Playing);
    clock.advance_ms(50);
    assert_eq!(engine.poll(), 1);

    // Ticks continue from the paused index: nothing skipped or duplicated.
    assert_eq!(*recorder.ticks.borrow(), vec![(0, false), (1, false)]);
}

#[test]
fn pause_preserves_the_unexpired_interval() {
    let clock = ManualClock::new();
    let (mut engine, recorder) = engine_with_recorder(3, speed(50), clock.clone());

    assert!(engine.start());
    clock.advance_ms(30);
    engine.pause();

    clock.advance_ms(500);
    engine.resume();

    // 20ms of the interval were left at pause time.
    clock.advance_ms(19);
    assert_eq!(engine.poll(), 0);
    clock.advance_ms(1);
    assert_eq!(engine.poll(), 1);
    assert_eq!(*recorder.ticks.borrow(), vec![(0, false)]);
}

#[test]
fn set_speed_reschedules_while_playing() {
    let clock = ManualClock::new();
    let (mut engine, recorder) = engine_with_recorder(3, speed(100), clock.clone());

    assert!(engine.start());
    clock.advance_ms(10);
    engine.set_speed(20);

    clock.advance_ms(20);
    assert_eq!(engine.poll(), 1);
    clock.advance_ms(20);
    assert_eq!(engine.poll(), 1);
    assert_eq!(*recorder.ticks.borrow(), vec![(0, false), (1, false)]);
}

#[test]
fn set_speed_while_idle_only_stores_the_interval() {
    let clock = ManualClock::new();
    let (mut engine, recorder) = engine_with_recorder(2, speed(1_000), clock.clone());

    engine.set_speed(10);
    assert!(engine.start());
    clock.advance_ms(10);
    assert_eq!(engine.poll(), 1);
    assert_eq!(*recorder.ticks.borrow(), vec![(0, false)]);
}

#[test]
fn manual_stop_skips_completion_callback() {
    let clock = ManualClock::new();
    let (mut engine, recorder) = engine_with_recorder(3, speed(50), clock.clone());

    assert!(engine.start());
    clock.advance_ms(50);
    assert_eq!(engine.poll(), 1);

    engine.stop();
    assert_eq!(engine.status(), ReplayStatus::Stopped);
    assert_eq!(recorder.completions.get(), 0);

    clock.advance_ms(1_000);
    assert_eq!(engine.poll(), 0);
    assert_eq!(*recorder.ticks.borrow(), vec![(0, false)]);
}

#[test]
fn step_emits_exactly_one_tick() {
    let clock = ManualClock::new();
    let (mut engine, recorder) = engine_with_recorder(3, speed(50), clock);

    // An idle step starts a paused session.
    assert!(engine.step());
    assert_eq!(engine.status(), ReplayStatus::Paused);
    assert_eq!(engine.index(), 1);

    assert!(engine.step());
    assert!(engine.step());
    assert_eq!(
        *recorder.ticks.borrow(),
        vec![(0, false), (1, false), (2, true)]
    );
    assert_eq!(recorder.completions.get(), 1);
    assert_eq!(engine.status(), ReplayStatus::Stopped);

    // Once stopped, stepping is refused.
    assert!(!engine.step());
}

#[test]
fn step_is_refused_while_playing() {
    let clock = ManualClock::new();
    let (mut engine, recorder) = engine_with_recorder(3, speed(50), clock);

    assert!(engine.start());
    assert!(!engine.step());
    assert!(recorder.ticks.borrow().is_empty());
}

#[test]
fn seek_clamps_to_playback_bounds() {
    let clock = ManualClock::new();
    let config = ReplayConfig {
        speed_ms: 50,
        from_index: 2,
        to_index: Some(3),
    };
    let (mut engine, recorder) = engine_with_recorder(5, config, clock.clone());

    assert!(engine.start());
    assert_eq!(engine.seek(0), 2);
    assert_eq!(engine.seek(99), 3);

    clock.advance_ms(50);
    assert_eq!(engine.poll(), 1);
    assert_eq!(*recorder.ticks.borrow(), vec![(3, true)]);
    assert_eq!(recorder.completions.get(), 1);
}

#[test]
fn out_of_range_bounds_are_clamped_to_the_series() {
    let clock = ManualClock::new();
    let config = ReplayConfig {
        speed_ms: 50,
        from_index: 10,
        to_index: Some(99),
    };
    let (mut engine, recorder) = engine_with_recorder(5, config, clock.clone());

    assert_eq!(engine.bounds(), (4, 4));
    assert!(engine.start());
    clock.advance_ms(50);
    assert_eq!(engine.poll(), 1);
    assert_eq!(*recorder.ticks.borrow(), vec![(4, true)]);
    assert_eq!(recorder.completions.get(), 1);
}

#[test]
fn sub_range_playback_covers_only_the_window() {
    let clock = ManualClock::new();
    let config = ReplayConfig {
        speed_ms: 50,
        from_index: 1,
        to_index: Some(3),
    };
    let (mut engine, recorder) = engine_with_recorder(5, config, clock.clone());

    assert!(engine.start());
    clock.advance_ms(500);
    assert_eq!(engine.poll(), 3);
    assert_eq!(
        *recorder.ticks.borrow(),
        vec![(1, false), (2, false), (3, true)]
    );
}

#[test]
fn lifecycle_noops_are_safe() {
    let clock = ManualClock::new();
    let (mut engine, _recorder) = engine_with_recorder(3, speed(50), clock);

    // Pause/resume outside their states are ignored.
    engine.pause();
    assert_eq!(engine.status(), ReplayStatus::Idle);
    engine.resume();
    assert_eq!(engine.status(), ReplayStatus::Idle);

    assert!(engine.start());
    engine.resume();
    assert_eq!(engine.status(), ReplayStatus::Playing);
}

#[test]
fn engine_without_callbacks_still_advances() {
    let clock = ManualClock::new();
    let mut engine = ReplayEngine::with_clock(series(2), speed(50), clock.clone());

    assert!(engine.start());
    clock.advance_ms(100);
    assert_eq!(engine.poll(), 2);
    assert_eq!(engine.status(), ReplayStatus::Stopped);
}

#[test]
fn state_snapshot_reflects_the_engine() {
    let clock = ManualClock::new();
    let (mut engine, _recorder) = engine_with_recorder(4, speed(25), clock.clone());

    assert!(engine.start());
    clock.advance_ms(50);
    engine.poll();
    engine.pause();

    let state = engine.state();
    assert_eq!(state.status, ReplayStatus::Paused);
    assert_eq!(state.index, 2);
    assert_eq!(state.speed_ms, 25);
    assert_eq!(state.from_index, 0);
    assert_eq!(state.to_index, 3);
}
