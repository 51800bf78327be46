use crate::error::{require_positive, ConfigError};
use crate::processing::ring_buffer::RingBuffer;

/// Isolation rule applied to one window of filtered samples.
///
/// The center sample must be the only one whose magnitude exceeds
/// `threshold`, and every other sample must differ from it by more than
/// `separation`. The center is `window.len() / 2`, so a window one short of
/// full is judged around the same index as a full one.
pub fn is_isolated_tap(window: &[f64], threshold: f64, separation: f64) -> bool {
    if window.is_empty() {
        return false;
    }
    let middle = window.len() / 2;

    let mut over_threshold = window
        .iter()
        .enumerate()
        .filter(|(_, value)| value.abs() > threshold)
        .map(|(index, _)| index);
    if over_threshold.next() != Some(middle) || over_threshold.next().is_some() {
        return false;
    }

    let peak = window[middle];
    window
        .iter()
        .enumerate()
        .filter(|&(index, _)| index != middle)
        .all(|(_, value)| (peak - value).abs() > separation)
}

/// Sliding-window tap detector over the filtered signal.
#[derive(Debug, Clone)]
pub struct TapDetector {
    buffer: RingBuffer<f64>,
    threshold: f64,
    separation: f64,
}

impl TapDetector {
    pub fn new(window_size: usize, threshold: f64, separation: f64) -> Result<Self, ConfigError> {
        if window_size < 3 {
            return Err(ConfigError::WindowTooSmall(window_size));
        }
        if window_size % 2 == 0 {
            return Err(ConfigError::EvenWindowSize(window_size));
        }
        require_positive("threshold", threshold)?;
        require_positive("separation", separation)?;

        Ok(Self {
            buffer: RingBuffer::new(window_size),
            threshold,
            separation,
        })
    }

    /// Pushes a filtered sample and reports whether the window now holds an
    /// isolated tap. Nothing is evaluated until the buffer is at most one
    /// sample short of full.
    pub fn process_sample(&mut self, filtered_sample: f64) -> bool {
        self.buffer.push(filtered_sample);

        if self.buffer.len() + 1 < self.buffer.capacity() {
            return false;
        }
        is_isolated_tap(&self.buffer.snapshot(), self.threshold, self.separation)
    }

    pub fn window(&self) -> Vec<f64> {
        self.buffer.snapshot()
    }

    pub fn window_size(&self) -> usize {
        self.buffer.capacity()
    }

    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}
