use chrono::prelude::*;
use colored::Colorize;
use itertools::Itertools;

use crate::classify::{Classification, Direction, Metric};
use crate::constants::TIMESTAMP_FORMAT;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub value: f64,
    pub classification: Classification,
}

/// One poll's worth of classified metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub timestamp: DateTime<Local>,
    pub interval_secs: u64,
    pub test_data: bool,
    pub confirmed: Reading,
    pub deaths: Reading,
    pub percent_died: Reading,
}

impl Report {
    /// A zero count means the fetch produced nothing usable.
    pub fn is_valid(&self) -> bool {
        self.confirmed.value != 0.0 && self.deaths.value != 0.0
    }

    pub fn any_changed(&self) -> bool {
        self.confirmed.classification.changed
            || self.deaths.classification.changed
            || self.percent_died.classification.changed
    }

    fn reading(&self, metric: Metric) -> &Reading {
        match metric {
            Metric::Confirmed => &self.confirmed,
            Metric::Deaths => &self.deaths,
            Metric::PercentDied => &self.percent_died,
        }
    }
}

/// Format a count with thousands separators.
pub fn group_thousands(value: f64) -> String {
    let digits: Vec<char> = (value.max(0.0).round() as u64).to_string().chars().collect();
    digits
        .rchunks(3)
        .rev()
        .map(|chunk| chunk.iter().collect::<String>())
        .join(",")
}

fn format_value(metric: Metric, value: f64) -> String {
    match metric {
        Metric::PercentDied => format!("{:.2}", value),
        Metric::Confirmed | Metric::Deaths => group_thousands(value),
    }
}

fn format_delta(metric: Metric, classification: &Classification) -> String {
    let sign = match classification.direction {
        Direction::Unchanged => return "0".to_string(),
        Direction::Increased => "+",
        Direction::Decreased => "-",
    };
    format!("{}{}", sign, format_value(metric, classification.delta))
}

fn metric_text(report: &Report, metric: Metric, label: &str) -> String {
    let reading = report.reading(metric);
    format!(
        "{}({})({}): {}",
        label,
        reading.classification.direction.symbol(),
        format_delta(metric, &reading.classification),
        format_value(metric, reading.value)
    )
}

/// Plain-text rendering, also what goes into the history log.
pub fn render(report: &Report, compact: bool) -> String {
    let test_str = if report.test_data { " (Test Data)" } else { "" };
    let mut msg = format!(
        "({} {}s) Covid19!{}:",
        report.timestamp.format(TIMESTAMP_FORMAT),
        report.interval_secs,
        test_str
    );

    if !report.is_valid() {
        msg += &format!(
            " Error retrieving data, Confirmed: {}, Deaths: {}\n",
            group_thousands(report.confirmed.value),
            group_thousands(report.deaths.value)
        );
        return msg;
    }

    if compact {
        msg += &format!(" {}", metric_text(report, Metric::PercentDied, "% Died"));
    }
    msg += "\n";
    msg += &format!("{}\n", metric_text(report, Metric::Confirmed, "Confirmed"));
    msg += &format!("{}\n", metric_text(report, Metric::Deaths, "Deaths"));
    if !compact {
        msg += &format!(
            "{}\n",
            metric_text(report, Metric::PercentDied, "Percentage Died")
        );
    }
    msg
}

pub fn print_report(report: &Report, compact: bool) {
    println!();
    let text = render(report, compact);
    if !report.is_valid() {
        println!("{}", text.trim_end().red().bold());
        return;
    }
    for (i, line) in text.lines().enumerate() {
        let line = if i == 0 {
            line.cyan()
        } else if line.starts_with("Confirmed") {
            line.blue()
        } else if line.starts_with("Deaths") {
            line.red()
        } else {
            line.magenta()
        };
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changed(direction: Direction, delta: f64) -> Classification {
        Classification {
            direction,
            delta,
            changed: true,
        }
    }

    fn report(confirmed: f64, deaths: f64, percent: f64) -> Report {
        Report {
            timestamp: Local.ymd(2020, 3, 15).and_hms(9, 30, 0),
            interval_secs: 3600,
            test_data: false,
            confirmed: Reading {
                value: confirmed,
                classification: Classification::UNCHANGED,
            },
            deaths: Reading {
                value: deaths,
                classification: changed(Direction::Increased, 100.0),
            },
            percent_died: Reading {
                value: percent,
                classification: changed(Direction::Increased, 0.2),
            },
        }
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1000.0), "1,000");
        assert_eq!(group_thousands(1234567.0), "1,234,567");
    }

    #[test]
    fn expanded_layout() {
        let text = render(&report(50_000.0, 1_100.0, 2.2), false);
        assert_eq!(
            text,
            "(15/03/2020 09:30:00 3600s) Covid19!:\n\
             Confirmed(<->)(0): 50,000\n\
             Deaths(^)(+100): 1,100\n\
             Percentage Died(^)(+0.20): 2.20\n"
        );
    }

    #[test]
    fn compact_layout_moves_percent_to_header() {
        let text = render(&report(50_000.0, 1_100.0, 2.2), true);
        assert_eq!(
            text,
            "(15/03/2020 09:30:00 3600s) Covid19!: % Died(^)(+0.20): 2.20\n\
             Confirmed(<->)(0): 50,000\n\
             Deaths(^)(+100): 1,100\n"
        );
    }

    #[test]
    fn decreases_are_signed() {
        let mut r = report(50_000.0, 1_100.0, 2.2);
        r.confirmed.classification = changed(Direction::Decreased, 2_500.0);
        assert!(render(&r, false).contains("Confirmed(v)(-2,500): 50,000"));
    }

    #[test]
    fn zero_count_renders_error_line() {
        let r = report(0.0, 1_100.0, 0.0);
        assert!(!r.is_valid());
        let text = render(&r, false);
        assert_eq!(
            text,
            "(15/03/2020 09:30:00 3600s) Covid19!: Error retrieving data, Confirmed: 0, Deaths: 1,100\n"
        );
    }

    #[test]
    fn test_data_is_labelled() {
        let mut r = report(50_000.0, 1_100.0, 2.2);
        r.test_data = true;
        assert!(render(&r, false).starts_with("(15/03/2020 09:30:00 3600s) Covid19! (Test Data):"));
    }

    #[test]
    fn rendering_is_repeatable() {
        let r = report(50_000.0, 1_100.0, 2.2);
        assert_eq!(render(&r, true), render(&r, true));
        assert_eq!(render(&r, false), render(&r, false));
    }
}
