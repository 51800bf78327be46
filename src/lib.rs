//! Real-time tap and multi-tap detection on a single accelerometer axis.
//!
//! Raw samples pass through a washout filter that removes gravity and slow
//! drift, then a sliding window test that accepts a sample as a tap only
//! when it is the one large, sharply isolated peak at the window center.
//! Taps can be aggregated into double or triple taps with a timeout.

pub mod bindings;
pub mod config;
pub mod error;
pub mod local;
pub mod processing;
pub mod utils;
pub mod visualization;

pub use config::{Config, MultiTapConfig, TapDetectorConfig};
pub use error::{ConfigError, Error, Result};
pub use processing::{DetectionMode, Sample, TapEvent, TapListener, TapProcessor};

#[cfg(feature = "python")]
pub use bindings::python::back_tap;
