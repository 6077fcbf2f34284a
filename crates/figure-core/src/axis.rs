// File: crates/figure-core/src/axis.rs
// Summary: Axis model with label, range, tick locator and tick label formatting.

use chrono::NaiveDate;

use crate::grid::{decimals_for_step, month_ticks, multiple_ticks, nice_step};

/// Where the major ticks of an axis go.
#[derive(Clone, Debug, PartialEq)]
pub enum TickLocator {
    /// Nice steps with roughly `target` intervals.
    Auto { target: usize },
    /// Every multiple of the step.
    Multiple(f64),
    /// First day of the listed months; the axis holds day numbers.
    Months(Vec<u32>),
}

#[derive(Clone, Debug)]
pub struct Axis {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub locator: TickLocator,
}

impl Axis {
    pub fn new(label: impl Into<String>, min: f64, max: f64) -> Self {
        Self { label: label.into(), min, max, locator: TickLocator::Auto { target: 9 } }
    }

    pub fn with_locator(mut self, locator: TickLocator) -> Self {
        self.locator = locator;
        self
    }

    /// Unlabelled date axis with ticks on the given months.
    pub fn dates(by_month: &[u32]) -> Self {
        Self::new("", 0.0, 1.0).with_locator(TickLocator::Months(by_month.to_vec()))
    }

    pub fn ticks(&self) -> Vec<f64> {
        match &self.locator {
            TickLocator::Auto { target } => {
                multiple_ticks(self.min, self.max, nice_step(self.max - self.min, *target))
            }
            TickLocator::Multiple(step) => multiple_ticks(self.min, self.max, *step),
            TickLocator::Months(by_month) => month_ticks(self.min, self.max, by_month),
        }
    }

    /// Ticks paired with their label text. Numeric labels share one precision.
    pub fn tick_labels(&self) -> Vec<(f64, String)> {
        let ticks = self.ticks();
        match &self.locator {
            TickLocator::Months(_) => ticks
                .into_iter()
                .map(|x| (x, x_to_date(x).format("%Y-%m").to_string()))
                .collect(),
            TickLocator::Auto { target } => {
                let d = decimals_for_step(nice_step(self.max - self.min, *target));
                ticks.into_iter().map(|v| (v, format!("{v:.d$}"))).collect()
            }
            TickLocator::Multiple(step) => {
                let d = decimals_for_step(*step);
                ticks.into_iter().map(|v| (v, format!("{v:.d$}"))).collect()
            }
        }
    }
}

fn epoch() -> NaiveDate {
    NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or_default()
}

/// Day number of `d` (days since 1970-01-01) used as the x coordinate of date axes.
pub fn date_to_x(d: NaiveDate) -> f64 {
    (d - epoch()).num_days() as f64
}

/// Inverse of [`date_to_x`], truncating fractional days.
pub fn x_to_date(x: f64) -> NaiveDate {
    epoch() + chrono::Duration::days(x.floor() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_roundtrip_through_day_numbers() {
        let d = NaiveDate::from_ymd_opt(2025, 2, 12).unwrap();
        assert_eq!(x_to_date(date_to_x(d)), d);
        assert_eq!(date_to_x(epoch()), 0.0);
    }

    #[test]
    fn numeric_labels_share_precision() {
        let a = Axis::new("RBC", 3.164, 3.516);
        let labels: Vec<String> = a.tick_labels().into_iter().map(|(_, s)| s).collect();
        assert_eq!(labels, ["3.20", "3.25", "3.30", "3.35", "3.40", "3.45", "3.50"]);
    }

    #[test]
    fn multiple_locator_labels_are_integers() {
        let a = Axis::new("Hb", 90.05, 110.95).with_locator(TickLocator::Multiple(2.0));
        let labels = a.tick_labels();
        assert_eq!(labels[0].1, "92");
        assert_eq!(labels.last().map(|(_, s)| s.as_str()), Some("110"));
    }
}
