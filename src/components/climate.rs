use rand::Rng;
use serde::{Deserialize, Serialize};

pub const TEMPERATURE_INTERVAL_TICKS: u64 = 600;
pub const MIN_CELSIUS: i32 = -30;
pub const MAX_CELSIUS: i32 = 10;
const MAX_SWING: i32 = 5;

/// Heated buildings lose efficiency below this temperature.
pub const EFFICIENCY_THRESHOLD: i32 = -5;
/// Heated buildings start decaying below this temperature.
pub const DECAY_THRESHOLD: i32 = -10;

/// Outdoor temperature in whole degrees Celsius, driven by a bounded random walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Temperature(i32);

impl Default for Temperature {
    fn default() -> Self {
        Self(-10)
    }
}

impl Temperature {
    pub fn new(celsius: i32) -> Self {
        Self(celsius)
    }

    pub fn celsius(self) -> i32 {
        self.0
    }

    /// Applies one random-walk step on every 600th tick; returns true when it did.
    pub fn update<R: Rng + ?Sized>(&mut self, tick: u64, rng: &mut R) -> bool {
        if tick == 0 || tick % TEMPERATURE_INTERVAL_TICKS != 0 {
            return false;
        }
        let swing = rng.gen_range(-MAX_SWING..=MAX_SWING);
        self.0 = (self.0 + swing).clamp(MIN_CELSIUS, MAX_CELSIUS);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn only_moves_on_interval() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut temperature = Temperature::default();
        for tick in 1..TEMPERATURE_INTERVAL_TICKS {
            assert!(!temperature.update(tick, &mut rng));
        }
        assert_eq!(temperature.celsius(), -10);
        assert!(temperature.update(TEMPERATURE_INTERVAL_TICKS, &mut rng));
        assert!((-15..=-5).contains(&temperature.celsius()));
    }

    #[test]
    fn walk_stays_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut temperature = Temperature::new(MIN_CELSIUS);
        for step in 1..=2_000 {
            temperature.update(step * TEMPERATURE_INTERVAL_TICKS, &mut rng);
            assert!((MIN_CELSIUS..=MAX_CELSIUS).contains(&temperature.celsius()));
        }
    }
}
