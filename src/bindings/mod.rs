#[cfg(feature = "cpp")]
pub mod cpp;
#[cfg(feature = "python")]
pub mod python;
