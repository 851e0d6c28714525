//! Remote file layout of the nClimGrid-daily archive.
//!
//! Two path schemes exist: monthly gridded netCDF files under `grids/` and
//! area-averaged CSV files under `averages/`. Both are addressed by year and
//! zero-padded month; see [`grids`] and [`averages`].

pub mod averages;
pub mod grids;

use std::path::PathBuf;

pub use averages::{AreaAverageConfig, AreaAverageFile, Variable};
pub use grids::{GridConfig, GridFile};

/// Root of the nClimGrid-daily access area.
pub const ACCESS_ROOT: &str = "https://www.ncei.noaa.gov/data/nclimgrid-daily/access";

pub const MONTHS: std::ops::RangeInclusive<u32> = 1..=12;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single file to fetch: where it lives remotely and where it lands locally.
pub struct DownloadJob {
    pub url: String,
    pub path: PathBuf,
}

/// Formats the `<year><MM>` stamp used in every archive file name.
pub fn year_month(year: i32, month: u32) -> String {
    format!("{}{:02}", year, month)
}

// -- Tests -------------------------------------------------------------------
