use thiserror::Error;

/// Rejected detector configuration. Returned at construction time, a
/// processor is never built from an invalid config.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("window size must be odd to have a center sample, got {0}")]
    EvenWindowSize(usize),
    #[error("window size must be at least 3, got {0}")]
    WindowTooSmall(usize),
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("{name} must be zero or positive and finite, got {value}")]
    Negative { name: &'static str, value: f64 },
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: f64 },
    #[error("required tap count must be at least 1")]
    ZeroTapCount,
    #[error("{name} must be a probability between 0 and 1, got {value}")]
    Probability { name: &'static str, value: f64 },
    #[error("{name} must be at most {max}, got {value}")]
    TooLarge {
        name: &'static str,
        value: f64,
        max: f64,
    },
    #[error("plot width must be at least 4 columns, got {0}")]
    PlotTooNarrow(usize),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid sample on line {line}: {value:?}")]
    InvalidSample { line: u64, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Checks that `value` is finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> std::result::Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

/// Checks that `value` is finite and not negative.
pub(crate) fn require_non_negative(
    name: &'static str,
    value: f64,
) -> std::result::Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}
