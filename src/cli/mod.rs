//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use clap::{command, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use crate::indicator::DegreeDayKind;

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Get monthly gridded netCDF files
    Grids {
        /// First year to download
        #[arg(long, default_value_t = 1991)]
        start_year: i32,
        /// Last year to download (inclusive)
        #[arg(long, default_value_t = 1991)]
        end_year: i32,
        /// Directory the files are saved to [default: .]
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Request timeout in seconds [default: none]
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// Get area-averaged CSV files for prcp, tmax and tmin
    Averages {
        /// First year to download
        #[arg(long)]
        start_year: i32,
        /// Last year to download (inclusive)
        #[arg(long)]
        end_year: i32,
        /// Directory the files are saved to, one subdirectory per year [default: noaa_data]
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Averaging type embedded in file names, e.g. `div` or `stn` [default: div]
        #[arg(long)]
        average_type: Option<String>,
        /// Request timeout in seconds [default: 30]
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// Compute degree-days from a preprocessed indicator CSV
    DegreeDays {
        /// CSV with a `date` column and prefixed temperature columns
        csv: PathBuf,
        /// Base temperature
        #[arg(long, default_value_t = crate::indicator::DEFAULT_BASE_TEMPERATURE)]
        base: f64,
        /// Which degree-days to compute
        #[arg(long, value_enum, default_value_t = KindArg::Both)]
        kind: KindArg,
        /// Parquet file to write [default: ~/nclimgrid-degree-days-<date>.parquet]
        #[arg(long)]
        output: Option<PathBuf>,
        /// Also render an SVG chart to this path
        #[arg(long)]
        plot: Option<PathBuf>,
        /// Column to chart [default: first column]
        #[arg(long, requires = "plot")]
        column: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Cooling,
    Heating,
    Both,
}

impl KindArg {
    pub fn kinds(&self) -> Vec<DegreeDayKind> {
        match self {
            KindArg::Cooling => vec![DegreeDayKind::Cooling],
            KindArg::Heating => vec![DegreeDayKind::Heating],
            KindArg::Both => vec![DegreeDayKind::Cooling, DegreeDayKind::Heating],
        }
    }
}

pub fn seconds(secs: Option<u64>) -> Option<Duration> {
    secs.map(Duration::from_secs)
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// Creates a progress bar.
pub fn create_progress_bar(size: u64, message: String) -> ProgressBar {
    let style = ProgressStyle::with_template("[{eta_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("##-");

    ProgressBar::new(size).with_message(message).with_style(style)
}

// -- Tests -------------------------------------------------------------------
