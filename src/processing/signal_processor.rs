use super::detectors::TapDetector;
use super::filters::WashoutFilter;
use super::triggers::{Cooldown, MultiTapTrigger, TriggerInstance};
use super::{DetectionMode, Sample, TapEvent};
use crate::config::TapDetectorConfig;
use crate::error::ConfigError;

// -----------------------------------------------------------------------------
// RUST CORE LOGIC
// -----------------------------------------------------------------------------

// TAP PROCESSOR COMPONENT -----------------------------------------------------

/// Per-sample pipeline: washout filter, sliding-window isolation test,
/// optional refractory cooldown, optional multi-tap aggregation.
///
/// All state is owned here. Samples must be fed in arrival order from a
/// single owner; share it behind one `Mutex` around `process_sample` if the
/// producer lives on another thread.
#[derive(Debug, Clone)]
pub struct TapProcessor {
    index: usize,
    config: TapDetectorConfig,
    filter: WashoutFilter,
    detector: TapDetector,
    cooldown: Cooldown,
    multi_tap: Option<MultiTapTrigger>,
    skipped_samples: usize,
}

impl TapProcessor {
    pub fn new(config: TapDetectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let filter = WashoutFilter::new(config.dt, config.tau)?;
        let detector = TapDetector::new(config.window_size, config.threshold, config.separation)?;
        let multi_tap = match &config.multi_tap {
            Some(multi) => Some(MultiTapTrigger::new(
                multi.required_tap_count,
                multi.tap_timeout,
            )?),
            None => None,
        };

        Ok(Self {
            index: 0,
            cooldown: Cooldown::new(config.refractory_period),
            config,
            filter,
            detector,
            multi_tap,
            skipped_samples: 0,
        })
    }

    /// Runs one raw sample through the pipeline.
    ///
    /// Non-finite values or timestamps are skipped: no state changes and
    /// `NoEvent` is returned.
    pub fn process_sample(&mut self, raw_sample: f64, timestamp: f64) -> TapEvent {
        if !raw_sample.is_finite() || !timestamp.is_finite() {
            self.skipped_samples += 1;
            log::warn!(
                "skipping non-finite sample {} (value: {}, timestamp: {})",
                self.index,
                raw_sample,
                timestamp
            );
            self.index += 1;
            return TapEvent::NoEvent;
        }

        let filtered_sample = self.filter.step(raw_sample);
        let isolated = self.detector.process_sample(filtered_sample);
        let tap = self.cooldown.evaluate(isolated, timestamp);

        if isolated && !tap {
            log::debug!("tap at {:.3}s suppressed by refractory period", timestamp);
        }

        let event = match self.multi_tap.as_mut() {
            None if tap => TapEvent::TapDetected,
            None => TapEvent::NoEvent,
            Some(trigger) => {
                if trigger.evaluate(tap, timestamp) {
                    TapEvent::MultiTapDetected {
                        taps: trigger.required_tap_count(),
                    }
                } else if tap {
                    TapEvent::TapDetected
                } else {
                    TapEvent::NoEvent
                }
            }
        };

        log::trace!(
            "index: {}, timestamp: {:.3}, sample: {}, filtered_sample: {}",
            self.index,
            timestamp,
            raw_sample,
            filtered_sample
        );
        match event {
            TapEvent::NoEvent => {}
            TapEvent::TapDetected => log::debug!("tap detected at {:.3}s", timestamp),
            TapEvent::MultiTapDetected { taps } => {
                log::info!("{}-tap detected at {:.3}s", taps, timestamp)
            }
        }

        self.index += 1;
        event
    }

    pub fn run_chunk(&mut self, samples: &[Sample]) -> Vec<TapEvent> {
        samples
            .iter()
            .map(|sample| self.process_sample(sample.value, sample.timestamp))
            .collect()
    }

    /// Clears filter history, window, cooldown and tap count for a clean
    /// restart. Configuration is kept.
    pub fn reset(&mut self) {
        self.index = 0;
        self.filter.reset();
        self.detector.reset();
        self.cooldown.reset();
        if let Some(trigger) = self.multi_tap.as_mut() {
            trigger.reset();
        }
        self.skipped_samples = 0;
    }

    pub fn mode(&self) -> DetectionMode {
        match &self.config.multi_tap {
            None => DetectionMode::SingleTap,
            Some(multi) => DetectionMode::MultiTap {
                required_tap_count: multi.required_tap_count,
                tap_timeout: multi.tap_timeout,
            },
        }
    }

    pub fn config(&self) -> &TapDetectorConfig {
        &self.config
    }

    /// Last filtered value, for plotting and logging.
    pub fn filtered_sample(&self) -> f64 {
        self.filter.last_output()
    }

    /// Number of samples seen, skipped ones included.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn skipped_samples(&self) -> usize {
        self.skipped_samples
    }

    pub fn taps_detected_so_far(&self) -> u32 {
        self.multi_tap
            .as_ref()
            .map_or(0, |trigger| trigger.taps_detected_so_far())
    }
}

// LISTENER COMPONENT ----------------------------------------------------------

/// Processor with a callback that runs synchronously whenever the mode's
/// qualifying event completes: an isolated tap in single-tap mode, a full
/// sequence in multi-tap mode.
pub struct TapListener<F: FnMut()> {
    processor: TapProcessor,
    on_event: F,
}

impl<F: FnMut()> TapListener<F> {
    pub fn new(processor: TapProcessor, on_event: F) -> Self {
        Self {
            processor,
            on_event,
        }
    }

    pub fn process_sample(&mut self, raw_sample: f64, timestamp: f64) -> TapEvent {
        let event = self.processor.process_sample(raw_sample, timestamp);
        if self.processor.mode().completes(event) {
            (self.on_event)();
        }
        event
    }

    /// Stops listening and clears state. Feeding samples afterwards starts
    /// from scratch.
    pub fn deactivate(&mut self) {
        self.processor.reset();
    }

    pub fn processor(&self) -> &TapProcessor {
        &self.processor
    }

    pub fn into_processor(self) -> TapProcessor {
        self.processor
    }
}
