use super::TriggerInstance;
use crate::error::{require_positive, ConfigError};

/// Counts isolated taps and fires once `required_tap_count` of them arrive
/// without a gap longer than `tap_timeout` seconds.
#[derive(Debug, Clone)]
pub struct MultiTapTrigger {
    required_tap_count: u32,
    tap_timeout: f64,
    taps_detected_so_far: u32,
    time_of_last_tap: Option<f64>,
}

impl MultiTapTrigger {
    pub fn new(required_tap_count: u32, tap_timeout: f64) -> Result<Self, ConfigError> {
        if required_tap_count == 0 {
            return Err(ConfigError::ZeroTapCount);
        }
        require_positive("tap_timeout", tap_timeout)?;

        Ok(Self {
            required_tap_count,
            tap_timeout,
            taps_detected_so_far: 0,
            time_of_last_tap: None,
        })
    }

    pub fn required_tap_count(&self) -> u32 {
        self.required_tap_count
    }

    pub fn taps_detected_so_far(&self) -> u32 {
        self.taps_detected_so_far
    }
}

impl TriggerInstance for MultiTapTrigger {
    fn evaluate(&mut self, tap_detected: bool, timestamp: f64) -> bool {
        // The first sample starts the clock so the sequence cannot expire
        // before any tap has been seen.
        let last_tap = *self.time_of_last_tap.get_or_insert(timestamp);

        if tap_detected {
            self.taps_detected_so_far += 1;
            self.time_of_last_tap = Some(timestamp);
            log::debug!(
                "tap {}/{} at {:.3}s",
                self.taps_detected_so_far,
                self.required_tap_count,
                timestamp
            );

            if self.taps_detected_so_far == self.required_tap_count {
                self.taps_detected_so_far = 0;
                return true;
            }
        } else if self.taps_detected_so_far > 0 && timestamp - last_tap > self.tap_timeout {
            log::debug!(
                "tap sequence expired after {} of {} taps",
                self.taps_detected_so_far,
                self.required_tap_count
            );
            self.taps_detected_so_far = 0;
        }

        false
    }

    fn reset(&mut self) {
        self.taps_detected_so_far = 0;
        self.time_of_last_tap = None;
    }
}
