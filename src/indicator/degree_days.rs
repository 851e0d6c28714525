//! Cooling and heating degree-days.

use super::IndicatorTable;

/// Comfort baseline in degrees Fahrenheit.
pub const DEFAULT_BASE_TEMPERATURE: f64 = 65.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegreeDayKind {
    Cooling,
    Heating,
}

impl DegreeDayKind {
    pub fn column_prefix(&self) -> &'static str {
        match self {
            DegreeDayKind::Cooling => "cdd_",
            DegreeDayKind::Heating => "hdd_",
        }
    }

    pub fn apply(&self, series: &[f64], base: f64) -> Vec<f64> {
        match self {
            DegreeDayKind::Cooling => cooling_degree_days(series, base),
            DegreeDayKind::Heating => heating_degree_days(series, base),
        }
    }
}

/// `max(0, t - base)` for each value.
pub fn cooling_degree_days(series: &[f64], base: f64) -> Vec<f64> {
    series.iter().map(|t| clamp_negative(t - base)).collect()
}

/// `max(0, base - t)` for each value.
pub fn heating_degree_days(series: &[f64], base: f64) -> Vec<f64> {
    series.iter().map(|t| clamp_negative(base - t)).collect()
}

// NaN passes through.
fn clamp_negative(v: f64) -> f64 {
    if v < 0.0 {
        0.0
    } else {
        v
    }
}

impl IndicatorTable {
    /// New table with every column converted to degree-days, named `cdd_<col>` or `hdd_<col>`.
    pub fn degree_days(&self, kind: DegreeDayKind, base: f64) -> IndicatorTable {
        self.map_columns(kind.column_prefix(), |series| kind.apply(series, base))
    }
}

// -- Tests -------------------------------------------------------------------
