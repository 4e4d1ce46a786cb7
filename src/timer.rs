//! Performance measurement tools.

use std::{
    cell::Cell,
    fmt,
    time::{Duration, Instant},
};

use itertools::Itertools;

use crate::filter::{Ema, EmaState, Filter};

const EMA_ALPHA: f32 = 0.3;

/// A timer that can measure and average the time an operation takes.
///
/// Collected timings are averaged and reset when the timer is displayed using
/// `{}` ([`std::fmt::Display`]).
pub struct Timer {
    name: &'static str,
    ema: Ema,
    ema_state: Cell<EmaState>,
    /// The current average time, in seconds.
    avg: Cell<f32>,
    /// The number of measurements that contributed to the current `avg`.
    count: Cell<usize>,
}

impl Timer {
    /// Creates a new timer.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ema: Ema::new(EMA_ALPHA),
            ema_state: Cell::new(EmaState::default()),
            avg: Cell::new(0.0),
            count: Cell::new(0),
        }
    }

    /// Invokes a closure, measuring and recording the time it takes.
    pub fn time<T>(&self, timee: impl FnOnce() -> T) -> T {
        let _guard = self.start();
        timee()
    }

    /// Starts timing an operation using a drop guard.
    ///
    /// When the returned [`TimerGuard`] is dropped, the time between the call
    /// to `start` and the drop is measured and recorded.
    pub fn start(&self) -> TimerGuard<'_> {
        TimerGuard {
            start: Instant::now(),
            timer: self,
        }
    }

    fn stop(&self, start: Instant) {
        let duration = start.elapsed();
        let mut state = self.ema_state.get();
        let filtered = self.ema.filter(&mut state, duration.as_secs_f32());
        self.ema_state.set(state);
        self.avg.set(filtered);
        self.count.set(self.count.get() + 1);
    }
}

/// Displays the average recorded time and resets it.
impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.ema_state.set(EmaState::default());

        let avg = self.avg.replace(0.0);
        let len = self.count.replace(0);
        let avg_ms = avg * 1000.0;

        write!(f, "{}: {len}x{avg_ms:.01}ms", self.name)
    }
}

/// Cloning a timer resets its collected timings.
impl Clone for Timer {
    fn clone(&self) -> Self {
        Self::new(self.name)
    }
}

/// Guard returned by [`Timer::start`]. Stops timing the operation when dropped.
pub struct TimerGuard<'a> {
    start: Instant,
    timer: &'a Timer,
}

impl Drop for TimerGuard<'_> {
    fn drop(&mut self) {
        self.timer.stop(self.start);
    }
}

/// Tracks and logs frames per second.
///
/// In addition to the once-a-second log line, the counter keeps a smoothed
/// per-frame rate in [`FpsCounter::current`] for display in an overlay.
pub struct FpsCounter {
    name: String,
    frames: u32,
    start: Instant,
    last_tick: Option<Instant>,
    ema: Ema,
    ema_state: EmaState,
    current: f32,
}

impl FpsCounter {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            name: name.into(),
            frames: 0,
            start: Instant::now(),
            last_tick: None,
            ema: Ema::new(EMA_ALPHA),
            ema_state: EmaState::default(),
            current: 0.0,
        }
    }

    /// Advances the frame counter by 1 and logs FPS if one second has passed.
    ///
    /// The logged string will also include the counter's name passed to
    /// [`FpsCounter::new`].
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    /// Advances the frame counter by 1 and logs FPS and `extra` data if one
    /// second has passed.
    pub fn tick_with<D: fmt::Display, I: IntoIterator<Item = D>>(&mut self, extra: I) {
        self.tick_at_with(Instant::now(), extra);
    }

    /// Like [`FpsCounter::tick`], but with an explicit frame timestamp.
    pub fn tick_at(&mut self, now: Instant) {
        self.tick_at_with(now, std::iter::empty::<&Timer>());
    }

    /// Like [`FpsCounter::tick_with`], but with an explicit frame timestamp.
    pub fn tick_at_with<D: fmt::Display, I: IntoIterator<Item = D>>(
        &mut self,
        now: Instant,
        extra: I,
    ) {
        if let Some(last) = self.last_tick {
            let dt = now.duration_since(last).as_secs_f32();
            if dt > 0.0 {
                self.current = self.ema.filter(&mut self.ema_state, 1.0 / dt);
            }
        }
        self.last_tick = Some(now);

        self.frames += 1;
        if now.duration_since(self.start) > Duration::from_secs(1) {
            let extra = extra.into_iter().map(|item| item.to_string()).join(", ");
            if extra.is_empty() {
                log::debug!("{}: {} FPS", self.name, self.frames);
            } else {
                log::debug!("{}: {} FPS ({})", self.name, self.frames, extra);
            }

            self.frames = 0;
            self.start = now;
        }
    }

    /// Returns the smoothed frame rate as of the last tick.
    ///
    /// Returns 0.0 until at least two ticks have been recorded.
    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_counter_smoothing() {
        let mut fps = FpsCounter::new("test");
        let t0 = Instant::now();
        assert_eq!(fps.current(), 0.0);
        fps.tick_at(t0);
        assert_eq!(fps.current(), 0.0);
        fps.tick_at(t0 + Duration::from_millis(100));
        assert!((fps.current() - 10.0).abs() < 0.1);
    }
}
