//! Download area-averaged CSV files into `<output>/<year>/`.

use anyhow::Result;
use tracing::info;

use crate::{
    archive::{averages::year_dir, AreaAverageConfig},
    cli::create_progress_bar,
    download::{ensure_dir, fetch_all, make_client, BatchReport},
};

/// Fetches every variable and month for `start_year..=end_year`. Missing files
/// and failed requests are logged and skipped.
pub async fn averages(start_year: i32, end_year: i32, config: &AreaAverageConfig) -> Result<BatchReport> {
    ensure_dir(&config.output_dir)?;
    let client = make_client(Some(config.timeout))?;
    let mut report = BatchReport::default();

    for year in start_year..=end_year {
        ensure_dir(&year_dir(&config.output_dir, year))?;

        let jobs = config.jobs_for_year(year);
        let pb = create_progress_bar(jobs.len() as u64, format!("Downloading {}...", year));
        report.merge(fetch_all(&client, &jobs, &pb).await);
        pb.finish_with_message(format!("{} done", year));
    }

    info!(
        "Area averages {}-{} ({}): {}",
        start_year, end_year, config.average_type, report
    );

    Ok(report)
}

// -- Tests -------------------------------------------------------------------
