// src/visualization/console.rs

use colored::Colorize;

use super::PlotConfig;
use crate::processing::TapEvent;

/// Running text plot of the filtered signal, one line per sample.
///
/// The axis `|` sits at the middle column, the sample is a `.` placed
/// proportionally between `-max_value` (column 0) and `+max_value`
/// (column `width`). Values past the left edge are pinned to column 0,
/// values past the right edge keep going out to twice the width.
pub struct ConsolePlot {
    config: PlotConfig,
}

impl ConsolePlot {
    pub fn new(config: PlotConfig) -> Self {
        Self { config }
    }

    /// Uncolored line for `value`.
    pub fn render_plain(&self, value: f64) -> String {
        self.compose(value, ".".to_string(), "|".to_string())
    }

    /// Line for `value`, with the point highlighted when `event` fired on
    /// this sample.
    pub fn render(&self, value: f64, event: TapEvent) -> String {
        let point = match event {
            TapEvent::NoEvent => ".".white().to_string(),
            TapEvent::TapDetected => ".".red().bold().to_string(),
            TapEvent::MultiTapDetected { .. } => ".".yellow().bold().to_string(),
        };
        let line = self.compose(value, point, "|".dimmed().to_string());
        match event {
            TapEvent::NoEvent => line,
            TapEvent::TapDetected => format!("{}  {}", line, "tap".red()),
            TapEvent::MultiTapDetected { taps } => {
                format!("{}  {}", line, format!("{}-tap detected", taps).yellow().bold())
            }
        }
    }

    fn compose(&self, value: f64, point: String, axis: String) -> String {
        let width = self.config.width as f64;
        // `as` truncates toward zero and maps NaN to 0
        let position = (((value / self.config.max_value) + 1.0) * width / 2.0) as i64;
        let position = (position.max(0) as usize).min(self.config.width * 2);
        let center = self.config.width / 2;

        if position > center {
            format!(
                "{}{}{}{}",
                " ".repeat(center.saturating_sub(1)),
                axis,
                " ".repeat(position - center - 1),
                point
            )
        } else if position == center {
            format!("{}{}", " ".repeat(position.saturating_sub(1)), point)
        } else if position > 0 {
            format!(
                "{}{}{}{}",
                " ".repeat(position.saturating_sub(1)),
                point,
                " ".repeat(center - position - 1),
                axis
            )
        } else {
            format!("{}{}{}", point, " ".repeat(center.saturating_sub(2)), axis)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plot() -> ConsolePlot {
        ConsolePlot::new(PlotConfig {
            enabled: true,
            max_value: 10.0,
            width: 20,
        })
    }

    #[test]
    fn zero_sits_on_the_axis() {
        assert_eq!(plot().render_plain(0.0), format!("{}.", " ".repeat(9)));
    }

    #[test]
    fn positive_values_are_right_of_axis() {
        // position 15, center 10
        assert_eq!(
            plot().render_plain(5.0),
            format!("{}|{}.", " ".repeat(9), " ".repeat(4))
        );
    }

    #[test]
    fn negative_values_are_left_of_axis() {
        // position 5, center 10
        assert_eq!(
            plot().render_plain(-5.0),
            format!("{}.{}|", " ".repeat(4), " ".repeat(4))
        );
    }

    #[test]
    fn values_past_left_edge_are_pinned() {
        let expected = format!(".{}|", " ".repeat(8));
        assert_eq!(plot().render_plain(-10.0), expected);
        assert_eq!(plot().render_plain(-50.0), expected);
        assert_eq!(plot().render_plain(f64::NAN), expected);
    }

    #[test]
    fn values_past_right_edge_keep_going() {
        let line = plot().render_plain(20.0);
        assert_eq!(line.len(), 30);
        assert!(line.ends_with('.'));
    }

    #[test]
    fn events_are_labelled() {
        colored::control::set_override(false);
        let line = plot().render(4.0, TapEvent::MultiTapDetected { taps: 2 });
        assert!(line.ends_with("2-tap detected"));
        let line = plot().render(4.0, TapEvent::TapDetected);
        assert!(line.ends_with("tap"));
    }
}
