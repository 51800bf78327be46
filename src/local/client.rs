use colored::Colorize;
use std::cell::Cell;
use std::io::{self, Read, Write};
use std::net::TcpStream;

use super::process_file::ProcessSummary;
use super::read_sample;
use crate::config::Config;
use crate::error::Result;
use crate::processing::{TapEvent, TapListener, TapProcessor};
use crate::utils::log::EventLog;
use crate::visualization::console::ConsolePlot;

pub fn run(config: &Config) -> Result<()> {
    let mut stream = TcpStream::connect(&config.network.address)?;
    log::info!("connected to {}", config.network.address);

    let processor = TapProcessor::new(config.detector.clone())?;
    let plot = config
        .plot
        .enabled
        .then(|| ConsolePlot::new(config.plot.clone()));
    let mut event_log = match &config.event_log {
        Some(path) => Some(EventLog::open(path)?),
        None => None,
    };

    let summary = receive(
        &mut stream,
        processor,
        plot.as_ref(),
        event_log.as_mut(),
        &mut io::stdout(),
    )?;
    log::info!(
        "stream closed after {} samples: {} taps, {} multi-taps",
        summary.samples,
        summary.taps,
        summary.multi_taps
    );
    Ok(())
}

/// Banner printed for the event a detection mode reports.
pub fn event_banner(event: TapEvent, timestamp: f64) -> Option<String> {
    match event {
        TapEvent::NoEvent => None,
        TapEvent::TapDetected => Some(
            format!("tap detected at {:.2}s", timestamp)
                .red()
                .bold()
                .to_string(),
        ),
        TapEvent::MultiTapDetected { taps } => Some(
            format!("{}-tap detected at {:.2}s", taps, timestamp)
                .yellow()
                .bold()
                .to_string(),
        ),
    }
}

/// Runs the live detector over a sample stream until it ends.
///
/// With a plot every sample gets a line on `out`. Without one, only the
/// mode's completed events are announced: every tap in single-tap mode,
/// full sequences in multi-tap mode.
pub fn receive<R: Read, W: Write>(
    reader: &mut R,
    processor: TapProcessor,
    plot: Option<&ConsolePlot>,
    mut event_log: Option<&mut EventLog>,
    out: &mut W,
) -> Result<ProcessSummary> {
    let mut summary = ProcessSummary::default();
    let completed = Cell::new(false);
    let mut listener = TapListener::new(processor, || completed.set(true));

    while let Some(sample) = read_sample(reader)? {
        let index = listener.processor().index();
        let event = listener.process_sample(sample.value, sample.timestamp);
        summary.samples += 1;

        if let Some(plot) = plot {
            writeln!(out, "{}", plot.render(listener.processor().filtered_sample(), event))?;
        } else if completed.replace(false) {
            if let Some(banner) = event_banner(event, sample.timestamp) {
                writeln!(out, "{}", banner)?;
            }
        }

        match event {
            TapEvent::NoEvent => continue,
            TapEvent::TapDetected => summary.taps += 1,
            TapEvent::MultiTapDetected { .. } => summary.multi_taps += 1,
        }

        if let Some(log) = event_log.as_deref_mut() {
            log.record(index, sample.timestamp, event)?;
        }
    }

    summary.skipped = listener.into_processor().skipped_samples();
    Ok(summary)
}
