//! Fixed-rate animation ticks on top of egui's repaint scheduler
//!
//! egui only runs `update()` when something asks for a frame, and frames do
//! not arrive on a fixed clock. [`RepaintController`] turns wall-clock time
//! into a whole number of animation steps per frame and keeps a repaint
//! scheduled while an animation is running:
//!
//! 1. call [`take_ticks`](RepaintController::take_ticks) at the top of
//!    `update()` and advance the animation that many steps;
//! 2. call [`end_frame`](RepaintController::end_frame) at the bottom.
//!
//! When the app stalls (window hidden, debugger) the backlog is capped so
//! the animation does not fast-forward through hundreds of steps.

use std::time::{Duration, Instant};

/// Default step interval for marquee-style scrolling.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(10);

/// Most steps delivered in a single frame.
const MAX_CATCH_UP: u32 = 8;

#[derive(Debug, Clone)]
pub struct RepaintController {
    running: bool,
    needs_repaint: bool,
    interval: Duration,
    /// Time of the last delivered step; `None` until the first frame.
    last_tick: Option<Instant>,
}

impl Default for RepaintController {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_INTERVAL)
    }
}

impl RepaintController {
    pub fn new(interval: Duration) -> Self {
        Self {
            running: true,
            needs_repaint: false,
            interval: interval.max(Duration::from_millis(1)),
            last_tick: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval.max(Duration::from_millis(1));
    }

    /// Pause or resume stepping. Resuming does not replay the paused time.
    pub fn set_running(&mut self, running: bool) {
        if running && !self.running {
            self.last_tick = None;
        }
        self.running = running;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ask for one repaint even while paused.
    pub fn mark_needs_repaint(&mut self) {
        self.needs_repaint = true;
    }

    /// Number of whole steps due at `now`. The first call after creation or
    /// resume returns one step so the display updates immediately.
    pub fn take_ticks(&mut self, now: Instant) -> u32 {
        if !self.running {
            return 0;
        }
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return 1;
        };
        let elapsed = now.saturating_duration_since(last);
        let due = (elapsed.as_nanos() / self.interval.as_nanos()) as u64;
        if due == 0 {
            return 0;
        }
        if due > MAX_CATCH_UP as u64 {
            self.last_tick = Some(now);
            return MAX_CATCH_UP;
        }
        self.last_tick = Some(last + self.interval * due as u32);
        due as u32
    }

    /// Schedule the next frame: after one interval while running, right
    /// away if a one-shot repaint was requested, otherwise not at all.
    pub fn end_frame(&mut self, ctx: &egui::Context) {
        if self.running {
            ctx.request_repaint_after(self.interval);
        } else if self.needs_repaint {
            ctx.request_repaint();
        }
        self.needs_repaint = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_ticks_once() {
        let mut rc = RepaintController::new(Duration::from_millis(10));
        let t0 = Instant::now();
        assert_eq!(rc.take_ticks(t0), 1);
        assert_eq!(rc.take_ticks(t0 + Duration::from_millis(5)), 0);
    }

    #[test]
    fn test_whole_intervals_only() {
        let mut rc = RepaintController::new(Duration::from_millis(10));
        let t0 = Instant::now();
        rc.take_ticks(t0);
        assert_eq!(rc.take_ticks(t0 + Duration::from_millis(25)), 2);
        // the leftover 5ms carries into the next frame
        assert_eq!(rc.take_ticks(t0 + Duration::from_millis(30)), 1);
    }

    #[test]
    fn test_backlog_is_capped() {
        let mut rc = RepaintController::new(Duration::from_millis(10));
        let t0 = Instant::now();
        rc.take_ticks(t0);
        assert_eq!(rc.take_ticks(t0 + Duration::from_secs(5)), MAX_CATCH_UP);
        assert_eq!(rc.take_ticks(t0 + Duration::from_secs(5)), 0);
    }

    #[test]
    fn test_paused_delivers_nothing() {
        let mut rc = RepaintController::new(Duration::from_millis(10));
        let t0 = Instant::now();
        rc.take_ticks(t0);
        rc.set_running(false);
        assert_eq!(rc.take_ticks(t0 + Duration::from_secs(1)), 0);
        rc.set_running(true);
        assert_eq!(rc.take_ticks(t0 + Duration::from_secs(2)), 1);
    }

    #[test]
    fn test_interval_floor() {
        let rc = RepaintController::new(Duration::ZERO);
        assert_eq!(rc.interval(), Duration::from_millis(1));
    }
}
