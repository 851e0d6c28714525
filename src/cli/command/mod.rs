pub mod averages;
pub mod degree_days;
pub mod grids;

use std::path::PathBuf;

use chrono::{Datelike, Local};
pub use averages::averages;
pub use degree_days::{degree_days, DegreeDayOptions};
pub use grids::grids;

pub fn make_parquet_file_name(period: &str) -> PathBuf {
    let today = Local::now();
    let file_name = format!(
        "nclimgrid-{}-{}-{:02}-{:02}.parquet",
        period,
        today.year(),
        today.month(),
        today.day()
    );

    dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(file_name)
}
