use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::path::Path;

use crate::error::Result;
use crate::processing::TapEvent;

const HEADERS: [&str; 5] = ["index", "timestamp", "event", "taps", "wall_clock"];

/// One row of the event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub index: usize,
    pub timestamp: f64,
    pub event: String,
    pub taps: u32,
    pub wall_clock: String,
}

impl EventRecord {
    pub fn new(index: usize, timestamp: f64, event: TapEvent) -> Self {
        let taps = match event {
            TapEvent::NoEvent => 0,
            TapEvent::TapDetected => 1,
            TapEvent::MultiTapDetected { taps } => taps,
        };
        Self {
            index,
            timestamp,
            event: event.as_str().to_string(),
            taps,
            wall_clock: Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        }
    }
}

/// Appends detected events to a CSV file, writing the header row only when
/// the file is new or empty.
pub struct EventLog {
    writer: csv::Writer<File>,
}

impl EventLog {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let is_new = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_new {
            writer.write_record(HEADERS)?;
            writer.flush()?;
        }

        Ok(Self { writer })
    }

    pub fn record(&mut self, index: usize, timestamp: f64, event: TapEvent) -> Result<()> {
        self.writer
            .serialize(EventRecord::new(index, timestamp, event))?;
        // Ensure the data is written to disk
        self.writer.flush()?;
        Ok(())
    }
}

/// Reads back an event log written by [`EventLog`].
pub fn read_event_log<P: AsRef<Path>>(path: P) -> Result<Vec<EventRecord>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut records = Vec::new();
    for record in reader.deserialize() {
        records.push(record?);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_header_once_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("events.csv");

        {
            let mut log = EventLog::open(&path).unwrap();
            log.record(22, 0.44, TapEvent::TapDetected).unwrap();
        }
        {
            let mut log = EventLog::open(&path).unwrap();
            log.record(37, 0.74, TapEvent::MultiTapDetected { taps: 2 })
                .unwrap();
        }

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches("index,timestamp").count(), 1);

        let records = read_event_log(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].event, "tap");
        assert_eq!(records[0].taps, 1);
        assert_eq!(records[1].index, 37);
        assert_eq!(records[1].event, "multi_tap");
        assert_eq!(records[1].taps, 2);
    }
}
