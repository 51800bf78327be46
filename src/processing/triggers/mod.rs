pub mod cooldown;
pub mod multi_tap;

pub use cooldown::Cooldown;
pub use multi_tap::MultiTapTrigger;

/// Stage that turns per-sample tap decisions into downstream decisions.
/// Called once per processed sample, with or without a tap.
pub trait TriggerInstance: Send {
    fn evaluate(&mut self, tap_detected: bool, timestamp: f64) -> bool;
    fn reset(&mut self);
}
