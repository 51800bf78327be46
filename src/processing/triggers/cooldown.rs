use super::TriggerInstance;

/// Refractory period after an accepted tap.
///
/// Taps arriving less than `period` seconds after the last accepted one are
/// dropped. A period of zero passes every tap through.
#[derive(Debug, Clone)]
pub struct Cooldown {
    period: f64,
    last_accepted: Option<f64>,
}

impl Cooldown {
    pub fn new(period: f64) -> Self {
        Self {
            period,
            last_accepted: None,
        }
    }

    pub fn is_active(&self, timestamp: f64) -> bool {
        self.last_accepted
            .map_or(false, |last| timestamp - last < self.period)
    }
}

impl TriggerInstance for Cooldown {
    fn evaluate(&mut self, tap_detected: bool, timestamp: f64) -> bool {
        if !tap_detected || self.is_active(timestamp) {
            return false;
        }
        self.last_accepted = Some(timestamp);
        true
    }

    fn reset(&mut self) {
        self.last_accepted = None;
    }
}
