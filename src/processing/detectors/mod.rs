pub mod tap;

pub use tap::{is_isolated_tap, TapDetector};
