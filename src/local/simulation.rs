use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::error::{require_non_negative, require_positive, ConfigError};
use crate::processing::Sample;

// -----------------------------------------------------------------------------
// SETUP FOR THE SIMULATED SIGNAL
// -----------------------------------------------------------------------------

/// Longest accepted gap between the two taps of a double tap, in seconds.
pub const MAX_DOUBLE_TAP_GAP: f64 = 10.0;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Static z-acceleration in g. -1.0 is a phone lying face up.
    pub gravity: f64,
    /// Peak amplitude of uniform sensor noise, in g.
    pub noise_amplitude: f64,
    /// Height of the one-sample spike a tap produces, in g.
    pub tap_amplitude: f64,
    /// Chance per sample of starting a random tap gesture.
    pub tap_probability: f64,
    /// Chance that a random gesture is a double tap.
    pub double_tap_probability: f64,
    /// Seconds between the two taps of a double tap.
    pub double_tap_gap: f64,
    /// Fixed seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravity: -1.0,
            noise_amplitude: 0.005,
            tap_amplitude: 0.5,
            tap_probability: 0.005,
            double_tap_probability: 0.5,
            double_tap_gap: 0.25,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.gravity.is_finite() {
            return Err(ConfigError::NotFinite {
                name: "gravity",
                value: self.gravity,
            });
        }
        require_non_negative("noise_amplitude", self.noise_amplitude)?;
        require_non_negative("tap_amplitude", self.tap_amplitude)?;
        require_positive("double_tap_gap", self.double_tap_gap)?;
        if self.double_tap_gap > MAX_DOUBLE_TAP_GAP {
            return Err(ConfigError::TooLarge {
                name: "double_tap_gap",
                value: self.double_tap_gap,
                max: MAX_DOUBLE_TAP_GAP,
            });
        }
        for (name, value) in [
            ("tap_probability", self.tap_probability),
            ("double_tap_probability", self.double_tap_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Probability { name, value });
            }
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// SIMULATING DATA
// -----------------------------------------------------------------------------

/// Synthetic z-axis accelerometer: gravity plus noise, with taps drawn as
/// one-sample spikes either at scheduled times or at random.
pub struct SimulatedAccelerometer {
    config: SimulationConfig,
    dt: f64,
    index: u64,
    rng: StdRng,
    scheduled_taps: VecDeque<u64>,
}

impl SimulatedAccelerometer {
    pub fn new(config: SimulationConfig, dt: f64) -> Result<Self, ConfigError> {
        config.validate()?;
        require_positive("dt", dt)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            config,
            dt,
            index: 0,
            rng,
            scheduled_taps: VecDeque::new(),
        })
    }

    /// Schedules a tap at `time` seconds from the start of the stream.
    pub fn schedule_tap(&mut self, time: f64) {
        let at = (time / self.dt).round().max(0.0) as u64;
        let position = self
            .scheduled_taps
            .iter()
            .position(|&scheduled| scheduled > at)
            .unwrap_or(self.scheduled_taps.len());
        self.scheduled_taps.insert(position, at);
    }

    pub fn next_sample(&mut self) -> Sample {
        if self.scheduled_taps.is_empty() && self.rng.gen_bool(self.config.tap_probability) {
            // `as` saturates, so a tiny dt gives u64::MAX rather than wrapping
            let gap = (self.config.double_tap_gap / self.dt).round() as u64;
            let first = self.index.saturating_add(1);
            self.scheduled_taps.push_back(first);
            if self.rng.gen_bool(self.config.double_tap_probability) {
                self.scheduled_taps.push_back(first.saturating_add(gap.max(1)));
            }
        }

        let mut value = self.config.gravity;
        if self.config.noise_amplitude > 0.0 {
            value += self
                .rng
                .gen_range(-self.config.noise_amplitude..self.config.noise_amplitude);
        }

        while self
            .scheduled_taps
            .front()
            .map_or(false, |&at| at <= self.index)
        {
            if self.scheduled_taps.pop_front() == Some(self.index) {
                value += self.config.tap_amplitude;
            }
        }

        let sample = Sample::new(self.index as f64 * self.dt, value);
        self.index += 1;
        sample
    }
}

impl Iterator for SimulatedAccelerometer {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        Some(self.next_sample())
    }
}
