/// Accumulated progress at which one tick commits
pub const TICK_THRESHOLD: f64 = 10.0;

/// Converts wall-clock frame time into discrete ticks.
///
/// Progress is accumulated in `[0, TICK_THRESHOLD)`; a frame that reaches the
/// threshold yields one tick and restarts the count from zero, however far past
/// the threshold it went.
#[derive(Debug, Clone, PartialEq)]
pub struct TickClock {
    accumulator: f64,
    base_speed: f64,
    multiplier: f64,
    boosted: bool,
}

/// Result of feeding one frame's elapsed time into the clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockEvent {
    /// Still between ticks; `progress` is in `[0, 1)`
    Partial { progress: f64 },
    /// Threshold crossed; the accumulator restarted at zero
    Tick,
}

impl TickClock {
    pub fn new(ticks_per_second: f64, multiplier: f64) -> Self {
        Self {
            accumulator: 0.0,
            base_speed: ticks_per_second,
            multiplier,
            boosted: false,
        }
    }

    /// Ticks per second right now
    pub fn current_speed(&self) -> f64 {
        if self.boosted {
            self.base_speed * self.multiplier
        } else {
            self.base_speed
        }
    }

    pub fn is_boosted(&self) -> bool {
        self.boosted
    }

    pub fn set_boosted(&mut self, boosted: bool) {
        self.boosted = boosted;
    }

    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn progress(&self) -> f64 {
        self.accumulator / TICK_THRESHOLD
    }

    /// Drop any partial progress; boost state survives
    pub fn restart(&mut self) {
        self.accumulator = 0.0;
    }

    /// Add one frame's worth of progress
    pub fn accumulate(&mut self, elapsed_ms: f64) -> ClockEvent {
        self.accumulator += elapsed_ms / 1000.0 * self.current_speed() * TICK_THRESHOLD;

        if self.accumulator < TICK_THRESHOLD {
            ClockEvent::Partial {
                progress: self.progress(),
            }
        } else {
            self.accumulator = 0.0;
            ClockEvent::Tick
        }
    }
}
