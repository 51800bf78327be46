// src/config/mod.rs
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{require_non_negative, require_positive, ConfigError, Result};
use crate::local::simulation::SimulationConfig;
use crate::visualization::PlotConfig;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub detector: TapDetectorConfig,
    pub plot: PlotConfig,
    pub simulation: SimulationConfig,
    pub network: NetworkConfig,
    /// CSV file that detected events are appended to.
    pub event_log: Option<PathBuf>,
}

impl Config {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.detector.validate()?;
        self.plot.validate()?;
        self.simulation.validate()
    }
}

/// Detection parameters. Thresholds are in g/s, times in seconds.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TapDetectorConfig {
    pub window_size: usize,
    pub threshold: f64,
    pub separation: f64,
    pub dt: f64,
    pub tau: f64,
    pub refractory_period: f64,
    pub multi_tap: Option<MultiTapConfig>,
}

impl Default for TapDetectorConfig {
    fn default() -> Self {
        Self {
            window_size: 5,
            threshold: 3.0,
            separation: 2.0,
            dt: 0.02,
            tau: 0.1,
            refractory_period: 0.0,
            multi_tap: None,
        }
    }
}

impl TapDetectorConfig {
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.window_size < 3 {
            return Err(ConfigError::WindowTooSmall(self.window_size));
        }
        if self.window_size % 2 == 0 {
            return Err(ConfigError::EvenWindowSize(self.window_size));
        }
        require_positive("threshold", self.threshold)?;
        require_positive("separation", self.separation)?;
        require_positive("dt", self.dt)?;
        require_positive("tau", self.tau)?;
        require_non_negative("refractory_period", self.refractory_period)?;
        if let Some(multi_tap) = &self.multi_tap {
            if multi_tap.required_tap_count == 0 {
                return Err(ConfigError::ZeroTapCount);
            }
            require_positive("tap_timeout", multi_tap.tap_timeout)?;
        }
        Ok(())
    }

    pub fn with_multi_tap(mut self, required_tap_count: u32, tap_timeout: f64) -> Self {
        self.multi_tap = Some(MultiTapConfig {
            required_tap_count,
            tap_timeout,
        });
        self
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MultiTapConfig {
    pub required_tap_count: u32,
    pub tap_timeout: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    pub address: String,
    /// Pace the server at one sample per `dt`. Off streams as fast as the
    /// socket allows.
    pub realtime: bool,
    /// Samples sent per connection before the server closes it.
    pub max_samples: Option<usize>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:8080".to_string(),
            realtime: true,
            max_samples: None,
        }
    }
}

/// Reads and validates a YAML config file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let config_str = fs::read_to_string(path)?;
    let config: Config = serde_yaml::from_str(&config_str)?;
    config.validate()?;
    Ok(config)
}

pub fn save_config<P: AsRef<Path>>(config: &Config, path: P) -> Result<()> {
    let yaml = serde_yaml::to_string(config)?;
    fs::write(path, yaml)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
        assert!(TapDetectorConfig::default()
            .with_multi_tap(2, 0.5)
            .validate()
            .is_ok());
    }

    #[test]
    fn round_trips_through_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("back_tap.yaml");

        let mut config = Config::default();
        config.detector = config.detector.with_multi_tap(3, 0.6);
        config.plot.enabled = true;
        config.event_log = Some(PathBuf::from("logs/events.csv"));

        save_config(&config, &path).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn missing_sections_take_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.yaml");
        fs::write(
            &path,
            "detector:\n  threshold: 4.5\n  multi_tap:\n    required_tap_count: 2\n    tap_timeout: 0.5\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.detector.threshold, 4.5);
        assert_eq!(config.detector.window_size, 5);
        assert_eq!(config.detector.multi_tap.unwrap().required_tap_count, 2);
        assert_eq!(config.network, NetworkConfig::default());
    }

    #[test]
    fn invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "detector:\n  window_size: 4\n").unwrap();

        match load_config(&path) {
            Err(Error::Config(ConfigError::EvenWindowSize(4))) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "detector: [").unwrap();
        assert!(matches!(load_config(&path), Err(Error::Yaml(_))));
    }

    #[test]
    fn validation_covers_every_option() {
        let base = TapDetectorConfig::default();

        let cases = vec![
            (
                TapDetectorConfig { window_size: 1, ..base.clone() },
                ConfigError::WindowTooSmall(1),
            ),
            (
                TapDetectorConfig { window_size: 6, ..base.clone() },
                ConfigError::EvenWindowSize(6),
            ),
            (
                TapDetectorConfig { threshold: 0.0, ..base.clone() },
                ConfigError::NonPositive { name: "threshold", value: 0.0 },
            ),
            (
                TapDetectorConfig { separation: -1.0, ..base.clone() },
                ConfigError::NonPositive { name: "separation", value: -1.0 },
            ),
            (
                TapDetectorConfig { dt: 0.0, ..base.clone() },
                ConfigError::NonPositive { name: "dt", value: 0.0 },
            ),
            (
                TapDetectorConfig { tau: -0.1, ..base.clone() },
                ConfigError::NonPositive { name: "tau", value: -0.1 },
            ),
            (
                TapDetectorConfig { refractory_period: -0.5, ..base.clone() },
                ConfigError::Negative { name: "refractory_period", value: -0.5 },
            ),
            (base.clone().with_multi_tap(0, 0.5), ConfigError::ZeroTapCount),
            (
                base.clone().with_multi_tap(2, 0.0),
                ConfigError::NonPositive { name: "tap_timeout", value: 0.0 },
            ),
        ];

        for (config, expected) in cases {
            assert_eq!(config.validate().unwrap_err(), expected);
        }
    }
}
