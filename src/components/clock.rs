use serde::{Deserialize, Serialize};

/// Ticks between clock advances.
pub const TICKS_PER_CLOCK_STEP: u64 = 60;
/// Simulated minutes added per clock advance.
pub const MINUTES_PER_CLOCK_STEP: u32 = 10;

const DAWN_HOUR: u32 = 6;
const DUSK_HOUR: u32 = 18;

/// Day / hour / minute of the colony.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clock {
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            day: 1,
            hour: DAWN_HOUR,
            minute: 0,
        }
    }
}

impl Clock {
    pub fn new(day: u32, hour: u32, minute: u32) -> Self {
        Self { day, hour, minute }
    }

    /// Advances the clock for the given (already incremented) tick counter.
    pub fn advance(&mut self, tick: u64) {
        if tick == 0 || tick % TICKS_PER_CLOCK_STEP != 0 {
            return;
        }
        self.minute += MINUTES_PER_CLOCK_STEP;
        if self.minute >= 60 {
            self.minute = 0;
            self.hour += 1;
            if self.hour >= 24 {
                self.hour = 0;
                self.day += 1;
            }
        }
    }

    pub fn is_daytime(&self) -> bool {
        (DAWN_HOUR..DUSK_HOUR).contains(&self.hour)
    }
}
