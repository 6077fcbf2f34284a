// File: crates/report-figures/src/hematology.rs
// Summary: Complete blood count observations from the report, as literals.

use chrono::NaiveDate;
use figure_core::{FigureError, Result};

/// Date format used in the report tables (month and day are not zero-padded).
pub const DATE_FORMAT: &str = "%Y/%m/%d";

/// (date, hemoglobin g/L, RBC x10^12/L, WBC x10^9/L, platelets x10^9/L)
const TABLE: [(&str, f64, f64, f64, f64); 3] = [
    ("2024/7/23", 91.0, 3.18, 7.54, 502.0),
    ("2024/8/26", 97.0, 3.43, 8.33, 487.0),
    ("2025/2/12", 101.0, 3.48, 7.94, 429.0),
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub hemoglobin_g_l: f64,
    pub rbc_e12_l: f64,
    pub wbc_e9_l: f64,
    pub platelets_e9_l: f64,
}

pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|source| FigureError::DateParse { input: input.to_string(), source })
}

/// The observation table in row order.
pub fn observations() -> Result<Vec<Observation>> {
    TABLE
        .iter()
        .map(|&(date, hb, rbc, wbc, plt)| {
            Ok(Observation {
                date: parse_date(date)?,
                hemoglobin_g_l: hb,
                rbc_e12_l: rbc,
                wbc_e9_l: wbc,
                platelets_e9_l: plt,
            })
        })
        .collect()
}

/// Dates strictly increase row to row.
pub fn is_chronological(rows: &[Observation]) -> bool {
    rows.windows(2).all(|w| w[0].date < w[1].date)
}
