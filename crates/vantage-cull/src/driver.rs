//! Frame-refresh scheduling.
//!
//! The engine never owns a timer or thread; the host feeds elapsed time
//! into [`RefreshDriver::tick`] from its own event loop and runs a frame
//! when the driver says so. Continuous mode fires on every delay interval;
//! settle mode fires once after input has been quiet for the interval and
//! re-arms on the next input notification.

use std::time::Duration;

use vantage_config::{RefreshConfig, RefreshMode};

/// Driver lifecycle states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Constructed, not yet started.
    Idle,
    /// Waiting for the next trigger condition.
    Armed,
    /// A frame is in flight; waiting for [`RefreshDriver::frame_complete`].
    Running,
    /// Cancelled by the host. Terminal: the driver never fires again.
    Cancelled,
}

/// Decides *when* a frame runs; the session decides *what* it does.
#[derive(Debug)]
pub struct RefreshDriver {
    mode: RefreshMode,
    delay: Duration,
    state: DriverState,
    last_run: Duration,
    last_input: Duration,
    /// Settle mode: set after firing, cleared by input, so a quiet scene
    /// triggers exactly one refresh.
    fired_since_input: bool,
}

impl RefreshDriver {
    pub fn new(mode: RefreshMode, delay: Duration) -> Self {
        Self {
            mode,
            delay,
            state: DriverState::Idle,
            last_run: Duration::ZERO,
            last_input: Duration::ZERO,
            fired_since_input: false,
        }
    }

    pub fn from_config(config: &RefreshConfig) -> Self {
        Self::new(config.mode, Duration::from_secs_f32(config.delay_seconds))
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Arm the driver. `now` is the host's elapsed-time clock; all later
    /// inputs and ticks must use the same clock.
    pub fn start(&mut self, now: Duration) {
        if self.state == DriverState::Cancelled {
            return;
        }
        self.state = DriverState::Armed;
        self.last_run = now;
        self.last_input = now;
        self.fired_since_input = false;
    }

    /// Record host input (camera movement, viewport redraw). Re-arms
    /// settle mode's one-shot trigger.
    pub fn notify_input(&mut self, now: Duration) {
        self.last_input = now;
        self.fired_since_input = false;
    }

    /// Returns true when a frame should run now. On true the driver moves
    /// to `Running` and stays there until [`RefreshDriver::frame_complete`].
    pub fn tick(&mut self, now: Duration) -> bool {
        if self.state != DriverState::Armed {
            return false;
        }
        let should_run = match self.mode {
            RefreshMode::Continuous => now.saturating_sub(self.last_run) >= self.delay,
            RefreshMode::Settle => {
                !self.fired_since_input && now.saturating_sub(self.last_input) >= self.delay
            }
        };
        if should_run {
            self.state = DriverState::Running;
        }
        should_run
    }

    /// The frame's effects have been applied; re-arm.
    pub fn frame_complete(&mut self, now: Duration) {
        if self.state != DriverState::Running {
            return;
        }
        self.state = DriverState::Armed;
        self.last_run = now;
        self.fired_since_input = true;
    }

    /// Host cancellation. Terminal; any in-flight frame finishes on its
    /// own, but no further frame is ever triggered.
    pub fn cancel(&mut self) {
        self.state = DriverState::Cancelled;
    }
}
