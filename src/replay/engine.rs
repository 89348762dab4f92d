use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::candle::OhlcBar;
use crate::replay::clock::{ReplayClock, SystemClock};

/// Replay lifecycle: `Idle -> Playing <-> Paused -> Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplayStatus {
    Idle,
    Playing,
    Paused,
    Stopped,
}

/// Playback bounds and pacing.
///
/// `to_index` of `None` means "end of series". Out-of-range bounds are
/// clamped to valid series indices when playback starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayConfig {
    pub speed_ms: u64,
    pub from_index: usize,
    pub to_index: Option<usize>,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            speed_ms: 1_000,
            from_index: 0,
            to_index: None,
        }
    }
}

/// Payload handed to the tick callback.
///
/// `is_last` is true exactly when `index` is the final playable index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReplayTick<'a> {
    pub index: usize,
    pub candle: &'a OhlcBar,
    pub is_last: bool,
}

/// Serializable snapshot of the engine's public state, for host UIs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayState {
    pub status: ReplayStatus,
    pub index: usize,
    pub speed_ms: u64,
    pub from_index: usize,
    pub to_index: usize,
}

type TickCallback = Box<dyn FnMut(ReplayTick<'_>)>;
type CompleteCallback = Box<dyn FnMut()>;

/// Deterministic, timer-driven player over an ordered candle series.
///
/// The engine owns one logical timer: a deadline against its clock while
/// playing, plus the remaining interval time captured across a pause, so
/// pause/resume cycles accumulate no drift. The host drives it by calling
/// [`poll`](Self::poll) from its event loop (or after advancing a
/// [`ManualClock`](crate::replay::ManualClock) in deterministic setups);
/// every due tick fires synchronously from there.
///
/// Single-threaded and cooperative: no internal synchronization, last call
/// wins.
pub struct ReplayEngine<C: ReplayClock = SystemClock> {
    series: Vec<OhlcBar>,
    clock: C,
    speed: Duration,
    from_index: usize,
    to_index: usize,
    cursor: usize,
    status: ReplayStatus,
    deadline: Option<Duration>,
    remaining: Option<Duration>,
    on_tick: Option<TickCallback>,
    on_complete: Option<CompleteCallback>,
}

impl ReplayEngine<SystemClock> {
    #[must_use]
    pub fn new(series: Vec<OhlcBar>, config: ReplayConfig) -> Self {
        Self::with_clock(series, config, SystemClock::default())
    }
}

impl<C: ReplayClock> ReplayEngine<C> {
    /// Builds an idle engine over `series` using an explicit clock.
    ///
    /// A zero `speed_ms` is raised to one millisecond; the scheduler needs a
    /// non-empty interval.
    #[must_use]
    pub fn with_clock(series: Vec<OhlcBar>, config: ReplayConfig, clock: C) -> Self {
        let last = series.len().saturating_sub(1);
        let to_index = config.to_index.unwrap_or(last).min(last);
        let from_index = config.from_index.min(to_index);

        Self {
            series,
            clock,
            speed: Duration::from_millis(config.speed_ms.max(1)),
            from_index,
            to_index,
            cursor: from_index,
            status: ReplayStatus::Idle,
            deadline: None,
            remaining: None,
            on_tick: None,
            on_complete: None,
        }
    }

    /// Registers the per-candle callback. Replaces any previous one.
    pub fn on_tick(&mut self, callback: impl FnMut(ReplayTick<'_>) + 'static) {
        self.on_tick = Some(Box::new(callback));
    }

    /// Registers the natural-completion callback. Not invoked on manual
    /// [`stop`](Self::stop).
    pub fn on_complete(&mut self, callback: impl FnMut() + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    #[must_use]
    pub fn status(&self) -> ReplayStatus {
        self.status
    }

    /// Index of the next candle to be emitted.
    #[must_use]
    pub fn index(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn speed_ms(&self) -> u64 {
        self.speed.as_millis() as u64
    }

    #[must_use]
    pub fn bounds(&self) -> (usize, usize) {
        (self.from_index, self.to_index)
    }

    #[must_use]
    pub fn state(&self) -> ReplayState {
        ReplayState {
            status: self.status,
            index: self.cursor,
            speed_ms: self.speed_ms(),
            from_index: self.from_index,
            to_index: self.to_index,
        }
    }

    /// Begins playback from the configured start index.
    ///
    /// Returns `false` on an empty series; no callback is invoked in that
    /// case. Calling `start` on a running engine restarts it.
    pub fn start(&mut self) -> bool {
        if self.series.is_empty() {
            return false;
        }

        self.cursor = self.from_index;
        self.remaining = None;
        self.deadline = Some(self.clock.now() + self.speed);
        self.status = ReplayStatus::Playing;
        debug!(from = self.from_index, to = self.to_index, "replay start");
        true
    }

    /// Fires every tick whose deadline has passed; returns how many fired.
    ///
    /// Deadlines advance at a fixed rate (`deadline += speed`), so a slow
    /// host catches up without losing ticks and pacing never drifts.
    pub fn poll(&mut self) -> usize {
        let now = self.clock.now();
        let mut fired = 0;

        while self.status == ReplayStatus::Playing {
            let Some(deadline) = self.deadline else {
                break;
            };
            if deadline > now {
                break;
            }

            self.emit_current_tick();
            fired += 1;

            if self.cursor > self.to_index {
                self.finish_naturally();
            } else {
                self.deadline = Some(deadline + self.speed);
            }
        }

        fired
    }

    /// Cancels the pending tick without advancing the cursor.
    ///
    /// The unexpired part of the current interval is preserved, so resuming
    /// continues from exactly the paused point with no skipped ticks and no
    /// double-fire.
    pub fn pause(&mut self) {
        if self.status != ReplayStatus::Playing {
            return;
        }

        let now = self.clock.now();
        let deadline = self.deadline.take();
        self.remaining = Some(
            deadline
                .map(|d| d.saturating_sub(now))
                .unwrap_or(self.speed),
        );
        self.status = ReplayStatus::Paused;
        debug!(index = self.cursor, "replay pause");
    }

    /// Rearms the timer with the interval time left over from the pause.
    pub fn resume(&mut self) {
        if self.status != ReplayStatus::Paused {
            return;
        }

        let remaining = self.remaining.take().unwrap_or(self.speed);
        self.deadline = Some(self.clock.now() + remaining);
        self.status = ReplayStatus::Playing;
        debug!(index = self.cursor, "replay resume");
    }

    /// Changes the tick interval.
    ///
    /// While playing, the next tick is rescheduled one full new interval
    /// from now; already-elapsed spacing is not revisited. While paused, the
    /// preserved remainder is clamped to the new interval so a shortened
    /// speed takes effect on resume. Zero is raised to one millisecond.
    pub fn set_speed(&mut self, speed_ms: u64) {
        self.speed = Duration::from_millis(speed_ms.max(1));

        match self.status {
            ReplayStatus::Playing => {
                self.deadline = Some(self.clock.now() + self.speed);
            }
            ReplayStatus::Paused => {
                self.remaining = Some(
                    self.remaining
                        .map(|r| r.min(self.speed))
                        .unwrap_or(self.speed),
                );
            }
            ReplayStatus::Idle | ReplayStatus::Stopped => {}
        }
    }

    /// Manual stop: cancels any pending tick and short-circuits completion.
    ///
    /// The completion callback is reserved for natural exhaustion, so hosts
    /// can tell "replay finished" from "user hit stop".
    pub fn stop(&mut self) {
        self.deadline = None;
        self.remaining = None;
        self.status = ReplayStatus::Stopped;
        debug!(index = self.cursor, "replay stop");
    }

    /// Emits exactly one tick immediately, without waiting on the timer.
    ///
    /// Valid while paused or idle (an idle step starts a paused session at
    /// the configured start index). Returns `false` while playing or
    /// stopped, or on an empty series. Stepping past the final index
    /// completes naturally.
    pub fn step(&mut self) -> bool {
        if self.series.is_empty() {
            return false;
        }

        match self.status {
            ReplayStatus::Idle => {
                self.cursor = self.from_index;
                self.status = ReplayStatus::Paused;
            }
            ReplayStatus::Paused => {}
            ReplayStatus::Playing | ReplayStatus::Stopped => return false,
        }

        self.emit_current_tick();
        if self.cursor > self.to_index {
            self.finish_naturally();
        }
        true
    }

    /// Bookmark navigation: moves the cursor to `index`, clamped to the
    /// configured playback bounds. No tick is emitted; while playing, the
    /// already-armed deadline keeps its schedule.
    pub fn seek(&mut self, index: usize) -> usize {
        let clamped = index.clamp(self.from_index, self.to_index);
        self.cursor = clamped;
        debug!(index = clamped, "replay seek");
        clamped
    }

    fn emit_current_tick(&mut self) {
        let index = self.cursor;
        let is_last = index == self.to_index;
        if let Some(callback) = self.on_tick.as_mut() {
            callback(ReplayTick {
                index,
                candle: &self.series[index],
                is_last,
            });
        }
        self.cursor = index + 1;
    }

    fn finish_naturally(&mut self) {
        self.deadline = None;
        self.remaining = None;
        self.status = ReplayStatus::Stopped;
        debug!(to = self.to_index, "replay complete");
        if let Some(callback) = self.on_complete.as_mut() {
            callback();
        }
    }
}
