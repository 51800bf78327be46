use colored::Colorize;
use std::path::Path;
use std::time::Instant;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::processing::{Sample, TapEvent, TapProcessor};
use crate::utils::log::EventRecord;
use crate::visualization::console::ConsolePlot;

const CHUNK_SIZE: usize = 10000;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessSummary {
    pub samples: usize,
    pub skipped: usize,
    pub taps: usize,
    pub multi_taps: usize,
}

/// Reads a recording. Rows are either `timestamp,value` or a lone `value`,
/// in which case the timestamp is `row * dt`. A non-numeric first row is
/// taken as a header.
pub fn read_samples<P: AsRef<Path>>(path: P, dt: f64) -> Result<Vec<Sample>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut samples = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let line = record.position().map_or(row as u64 + 1, |p| p.line());
        let parse = |field: &str| -> Result<f64> {
            field.parse().map_err(|_| Error::InvalidSample {
                line,
                value: field.to_string(),
            })
        };

        let first = record.get(0).unwrap_or_default();
        if row == 0 && first.parse::<f64>().is_err() {
            continue; // header
        }

        let sample = match record.get(1) {
            Some(value) => Sample::new(parse(first)?, parse(value)?),
            None => Sample::new(samples.len() as f64 * dt, parse(first)?),
        };
        samples.push(sample);
    }

    Ok(samples)
}

/// Runs the processor over a recording and writes every event to `output`
/// as CSV.
pub fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Option<Q>,
    config: &Config,
) -> Result<ProcessSummary> {
    let samples = read_samples(input, config.detector.dt)?;
    let mut processor = TapProcessor::new(config.detector.clone())?;
    let mut writer = match output {
        Some(path) => Some(csv::Writer::from_path(path)?),
        None => None,
    };
    let plot = config
        .plot
        .enabled
        .then(|| ConsolePlot::new(config.plot.clone()));

    let total_chunks = (samples.len() + CHUNK_SIZE - 1) / CHUNK_SIZE;
    let mut summary = ProcessSummary::default();

    for (chunk_index, chunk) in samples.chunks(CHUNK_SIZE).enumerate() {
        let start_time = Instant::now();
        for sample in chunk {
            let index = processor.index();
            let event = processor.process_sample(sample.value, sample.timestamp);

            if let Some(plot) = &plot {
                println!("{}", plot.render(processor.filtered_sample(), event));
            }

            match event {
                TapEvent::NoEvent => continue,
                TapEvent::TapDetected => summary.taps += 1,
                TapEvent::MultiTapDetected { .. } => summary.multi_taps += 1,
            }
            if let Some(writer) = writer.as_mut() {
                writer.serialize(EventRecord::new(index, sample.timestamp, event))?;
            }
        }
        log::debug!(
            "processed chunk {} / {} in {:?}",
            chunk_index + 1,
            total_chunks,
            start_time.elapsed()
        );
    }

    if let Some(writer) = writer.as_mut() {
        writer.flush()?;
    }

    summary.samples = samples.len();
    summary.skipped = processor.skipped_samples();
    Ok(summary)
}

pub fn run(input: &Path, output: Option<&Path>, config: &Config) -> Result<()> {
    if !input.exists() {
        return Err(Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("data file not found at path: {}", input.display()),
        )));
    }

    log::info!("processing {}", input.display());
    let summary = process_file(input, output, config)?;

    println!(
        "{} samples ({} skipped): {} taps, {} multi-taps",
        summary.samples,
        summary.skipped,
        summary.taps.to_string().red(),
        summary.multi_taps.to_string().yellow()
    );
    if let Some(output) = output {
        println!("events written to {}", output.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TapDetectorConfig;
    use crate::utils::log::read_event_log;
    use std::fs;

    fn recording(spikes: &[usize], len: usize) -> String {
        let mut csv = String::from("timestamp,value\n");
        for index in 0..len {
            let value = if spikes.contains(&index) { -0.5 } else { -1.0 };
            csv.push_str(&format!("{},{}\n", index as f64 * 0.02, value));
        }
        csv
    }

    #[test]
    fn reads_two_column_recordings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("recording.csv");
        fs::write(&path, "timestamp,value\n0.0,-1.0\n0.02,-0.98\n").unwrap();

        let samples = read_samples(&path, 0.02).unwrap();
        assert_eq!(samples, vec![Sample::new(0.0, -1.0), Sample::new(0.02, -0.98)]);
    }

    #[test]
    fn reads_single_column_recordings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.csv");
        fs::write(&path, "-1.0\n-0.5\n-1.0\n").unwrap();

        let samples = read_samples(&path, 0.01).unwrap();
        assert_eq!(samples.len(), 3);
        assert!((samples[2].timestamp - 0.02).abs() < 1e-12);
        assert_eq!(samples[1].value, -0.5);
    }

    #[test]
    fn reports_bad_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "timestamp,value\n0.0,-1.0\n0.02,oops\n").unwrap();

        match read_samples(&path, 0.02) {
            Err(Error::InvalidSample { line, value }) => {
                assert_eq!(line, 3);
                assert_eq!(value, "oops");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn writes_detected_events() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("recording.csv");
        let output = dir.path().join("events.csv");
        fs::write(&input, recording(&[100, 115, 200], 260)).unwrap();

        let config = Config {
            detector: TapDetectorConfig::default().with_multi_tap(2, 0.5),
            ..Config::default()
        };
        let summary = process_file(&input, Some(&output), &config).unwrap();
        assert_eq!(
            summary,
            ProcessSummary {
                samples: 260,
                skipped: 0,
                taps: 2,
                multi_taps: 1,
            }
        );

        let events = read_event_log(&output).unwrap();
        let kinds: Vec<(usize, &str)> = events
            .iter()
            .map(|record| (record.index, record.event.as_str()))
            .collect();
        assert_eq!(kinds, vec![(102, "tap"), (117, "multi_tap"), (202, "tap")]);
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");
        assert!(run(&missing, None, &Config::default()).is_err());
    }
}
