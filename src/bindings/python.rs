use crate::config::TapDetectorConfig;
use crate::processing::{Sample, TapProcessor};

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

#[pyclass]
pub struct PyTapProcessor {
    processor: TapProcessor,
}

#[pymethods]
impl PyTapProcessor {
    #[new]
    #[pyo3(signature = (
        window_size,
        threshold,
        separation,
        dt,
        tau,
        required_tap_count = None,
        tap_timeout = None,
        refractory_period = 0.0
    ))]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        window_size: usize,
        threshold: f64,
        separation: f64,
        dt: f64,
        tau: f64,
        required_tap_count: Option<u32>,
        tap_timeout: Option<f64>,
        refractory_period: f64,
    ) -> PyResult<Self> {
        let mut config = TapDetectorConfig {
            window_size,
            threshold,
            separation,
            dt,
            tau,
            refractory_period,
            multi_tap: None,
        };
        match (required_tap_count, tap_timeout) {
            (Some(count), Some(timeout)) => config = config.with_multi_tap(count, timeout),
            (None, None) => {}
            _ => {
                return Err(PyValueError::new_err(
                    "required_tap_count and tap_timeout must be given together",
                ))
            }
        }

        let processor =
            TapProcessor::new(config).map_err(|e| PyValueError::new_err(e.to_string()))?;
        Ok(PyTapProcessor { processor })
    }

    /// Returns "none", "tap" or "multi_tap".
    pub fn process_sample(&mut self, raw_sample: f64, timestamp: f64) -> &'static str {
        self.processor.process_sample(raw_sample, timestamp).as_str()
    }

    /// Processes `(timestamp, value)` pairs and returns the index of every
    /// sample that produced an event, with the event name.
    pub fn run_chunk(&mut self, samples: Vec<(f64, f64)>) -> Vec<(usize, &'static str)> {
        let start = self.processor.index();
        let samples: Vec<Sample> = samples
            .into_iter()
            .map(|(timestamp, value)| Sample::new(timestamp, value))
            .collect();

        self.processor
            .run_chunk(&samples)
            .into_iter()
            .enumerate()
            .filter(|(_, event)| event.is_event())
            .map(|(offset, event)| (start + offset, event.as_str()))
            .collect()
    }

    pub fn reset(&mut self) {
        self.processor.reset();
    }

    pub fn filtered_sample(&self) -> f64 {
        self.processor.filtered_sample()
    }

    pub fn taps_detected_so_far(&self) -> u32 {
        self.processor.taps_detected_so_far()
    }
}

/// A Python module implemented in Rust.
#[pymodule]
pub fn back_tap(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyTapProcessor>()?;
    Ok(())
}
