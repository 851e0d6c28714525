//! Monthly gridded netCDF files.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::{year_month, DownloadJob, ACCESS_ROOT, MONTHS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridFile {
    pub year: i32,
    pub month: u32,
}

impl GridFile {
    pub fn file_name(&self) -> String {
        format!("ncdd-{}-grd-scaled.nc", year_month(self.year, self.month))
    }

    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}/{}", base_url, self.year, self.file_name())
    }

    pub fn job(&self, base_url: &str, output_dir: &Path) -> DownloadJob {
        DownloadJob {
            url: self.url(base_url),
            path: output_dir.join(self.file_name()),
        }
    }
}

#[derive(Debug, Clone)]
/// Settings for a grid batch. Years are inclusive.
pub struct GridConfig {
    pub base_url: String,
    pub output_dir: PathBuf,
    pub start_year: i32,
    pub end_year: i32,
    /// Grid files are large, so no request timeout unless one is given.
    pub timeout: Option<Duration>,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            base_url: format!("{}/grids", ACCESS_ROOT),
            output_dir: PathBuf::from("."),
            start_year: 1991,
            end_year: 1991,
            timeout: None,
        }
    }
}

impl GridConfig {
    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.start_year..=self.end_year
    }

    /// Jobs for one year, January first.
    pub fn jobs_for_year(&self, year: i32) -> Vec<DownloadJob> {
        MONTHS
            .map(|month| GridFile { year, month }.job(&self.base_url, &self.output_dir))
            .collect()
    }
}

// -- Tests -------------------------------------------------------------------
