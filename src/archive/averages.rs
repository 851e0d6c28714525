//! Area-averaged CSV files, one per variable, year and month.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::{year_month, DownloadJob, ACCESS_ROOT, MONTHS};

pub const FILENAME_SUFFIX: &str = "-scaled.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Measured quantity of an area-average file.
pub enum Variable {
    Prcp,
    Tmax,
    Tmin,
}

impl Variable {
    /// Download order within a year.
    pub const ALL: [Variable; 3] = [Variable::Prcp, Variable::Tmax, Variable::Tmin];

    pub fn code(&self) -> &'static str {
        match self {
            Variable::Prcp => "prcp",
            Variable::Tmax => "tmax",
            Variable::Tmin => "tmin",
        }
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaAverageFile {
    pub variable: Variable,
    pub year: i32,
    pub month: u32,
    pub average_type: String,
}

impl AreaAverageFile {
    pub fn file_name(&self) -> String {
        format!(
            "{}-{}-{}{}",
            self.variable,
            year_month(self.year, self.month),
            self.average_type,
            FILENAME_SUFFIX
        )
    }

    pub fn url(&self, base_url: &str) -> String {
        format!("{}/{}/{}", base_url, self.year, self.file_name())
    }

    /// The local path sits in a per-year directory below `output_dir`.
    pub fn job(&self, base_url: &str, output_dir: &Path) -> DownloadJob {
        DownloadJob {
            url: self.url(base_url),
            path: year_dir(output_dir, self.year).join(self.file_name()),
        }
    }
}

pub fn year_dir(output_dir: &Path, year: i32) -> PathBuf {
    output_dir.join(year.to_string())
}

#[derive(Debug, Clone)]
/// Settings for an area-average batch.
///
/// Override individual fields with struct update syntax:
///
/// ```ignore
/// let config = AreaAverageConfig {
///     average_type: "stn".to_string(),
///     ..Default::default()
/// };
/// ```
pub struct AreaAverageConfig {
    pub base_url: String,
    pub output_dir: PathBuf,
    pub average_type: String,
    pub timeout: Duration,
}

impl Default for AreaAverageConfig {
    fn default() -> Self {
        AreaAverageConfig {
            base_url: format!("{}/averages", ACCESS_ROOT),
            output_dir: PathBuf::from("noaa_data"),
            average_type: "div".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl AreaAverageConfig {
    /// Jobs for one year: every month of `prcp`, then `tmax`, then `tmin`.
    pub fn jobs_for_year(&self, year: i32) -> Vec<DownloadJob> {
        let mut jobs = Vec::with_capacity(Variable::ALL.len() * 12);

        for variable in Variable::ALL {
            for month in MONTHS {
                let file = AreaAverageFile {
                    variable,
                    year,
                    month,
                    average_type: self.average_type.clone(),
                };
                jobs.push(file.job(&self.base_url, &self.output_dir));
            }
        }

        jobs
    }
}

// -- Tests -------------------------------------------------------------------
