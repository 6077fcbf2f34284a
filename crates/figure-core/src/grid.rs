// File: crates/figure-core/src/grid.rs
// Summary: Tick placement helpers: nice steps, multiples and calendar months.

use chrono::{Datelike, NaiveDate};

use crate::axis::{date_to_x, x_to_date};

/// Smallest step from {1, 2, 2.5, 5} x 10^n giving at most `target` intervals over `span`.
pub fn nice_step(span: f64, target: usize) -> f64 {
    let span = span.abs().max(1e-12);
    let raw = span / target.max(1) as f64;
    let mag = 10f64.powf(raw.log10().floor());
    for m in [1.0, 2.0, 2.5, 5.0] {
        if m * mag >= raw * (1.0 - 1e-9) {
            return m * mag;
        }
    }
    10.0 * mag
}

/// Every multiple of `step` inside `[min, max]`.
pub fn multiple_ticks(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !min.is_finite() || !max.is_finite() || max < min {
        return Vec::new();
    }
    let eps = step * 1e-9;
    let first = ((min - eps) / step).ceil() as i64;
    let last = ((max + eps) / step).floor() as i64;
    // snap away float noise such as 3.5000000000000004
    let p = 10f64.powi(decimals_for_step(step) as i32);
    (first..=last).map(|k| (k as f64 * step * p).round() / p).collect()
}

/// First day of every month listed in `by_month` (1..=12) inside `[min, max]`,
/// where both bounds are day numbers as produced by [`date_to_x`].
pub fn month_ticks(min: f64, max: f64, by_month: &[u32]) -> Vec<f64> {
    if max < min { return Vec::new(); }
    let start = x_to_date(min.floor());
    let end = x_to_date(max.ceil());
    let mut out = Vec::new();
    let (mut year, mut month) = (start.year(), start.month());
    while (year, month) <= (end.year(), end.month()) {
        if by_month.contains(&month) {
            if let Some(d) = NaiveDate::from_ymd_opt(year, month, 1) {
                let x = date_to_x(d);
                if x >= min && x <= max { out.push(x); }
            }
        }
        if month == 12 { year += 1; month = 1; } else { month += 1; }
    }
    out
}

/// Decimal places needed to print every multiple of `step` exactly.
pub fn decimals_for_step(step: f64) -> usize {
    for d in 0..=6 {
        let scaled = step * 10f64.powi(d as i32);
        if (scaled - scaled.round()).abs() < 1e-6 { return d; }
    }
    6
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool { (a - b).abs() < 1e-9 }

    #[test]
    fn nice_steps() {
        assert!(close(nice_step(10.0, 5), 2.0));
        assert!(close(nice_step(0.33, 6), 0.1));
        assert!(close(nice_step(95.0, 8), 20.0));
        assert!(close(nice_step(1.0, 4), 0.25));
    }

    #[test]
    fn multiples_of_two_inside_range() {
        let t = multiple_ticks(90.05, 110.95, 2.0);
        assert_eq!(t.first().copied(), Some(92.0));
        assert_eq!(t.last().copied(), Some(110.0));
        assert_eq!(t.len(), 10);
    }

    #[test]
    fn multiples_are_snapped() {
        let t = multiple_ticks(3.0, 4.0, 0.1);
        assert!(t.contains(&3.5));
        assert_eq!(t.len(), 11);
    }

    #[test]
    fn even_month_ticks() {
        let lo = date_to_x(NaiveDate::from_ymd_opt(2024, 7, 13).unwrap());
        let hi = date_to_x(NaiveDate::from_ymd_opt(2025, 2, 22).unwrap());
        let ticks: Vec<String> = month_ticks(lo, hi, &[2, 4, 6, 8, 10, 12])
            .into_iter()
            .map(|x| x_to_date(x).format("%Y-%m").to_string())
            .collect();
        assert_eq!(ticks, ["2024-08", "2024-10", "2024-12", "2025-02"]);
    }

    #[test]
    fn decimals() {
        assert_eq!(decimals_for_step(2.0), 0);
        assert_eq!(decimals_for_step(0.5), 1);
        assert_eq!(decimals_for_step(0.25), 2);
    }
}
