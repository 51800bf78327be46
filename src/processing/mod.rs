pub mod detectors;
pub mod filters;
pub mod ring_buffer;
pub mod signal_processor;
pub mod triggers;

pub use signal_processor::{TapListener, TapProcessor};

use serde::{Deserialize, Serialize};

/// One accelerometer reading on the sensed axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sample {
    /// Seconds, monotonic.
    pub timestamp: f64,
    /// Acceleration in g.
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp: f64, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Outcome of processing one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TapEvent {
    NoEvent,
    /// An isolated tap. In multi-tap mode this is a tap that did not yet
    /// complete the sequence.
    TapDetected,
    MultiTapDetected { taps: u32 },
}

impl TapEvent {
    pub fn is_event(&self) -> bool {
        !matches!(self, TapEvent::NoEvent)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TapEvent::NoEvent => "none",
            TapEvent::TapDetected => "tap",
            TapEvent::MultiTapDetected { .. } => "multi_tap",
        }
    }

    /// Numeric code used across the C ABI.
    pub fn code(&self) -> i32 {
        match self {
            TapEvent::NoEvent => 0,
            TapEvent::TapDetected => 1,
            TapEvent::MultiTapDetected { .. } => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetectionMode {
    SingleTap,
    MultiTap { required_tap_count: u32, tap_timeout: f64 },
}

impl DetectionMode {
    /// Whether `event` is the one this mode reports to listeners.
    pub fn completes(&self, event: TapEvent) -> bool {
        match self {
            DetectionMode::SingleTap => event == TapEvent::TapDetected,
            DetectionMode::MultiTap { .. } => matches!(event, TapEvent::MultiTapDetected { .. }),
        }
    }
}
