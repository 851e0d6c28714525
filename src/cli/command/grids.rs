//! Download monthly gridded netCDF files, a year at a time.

use anyhow::Result;
use tracing::info;

use crate::{
    archive::GridConfig,
    cli::create_progress_bar,
    download::{ensure_dir, fetch_all, make_client, BatchReport},
};

pub async fn grids(config: &GridConfig) -> Result<BatchReport> {
    ensure_dir(&config.output_dir)?;
    let client = make_client(config.timeout)?;
    let mut report = BatchReport::default();

    for year in config.years() {
        info!("Downloading {}...", year);

        let jobs = config.jobs_for_year(year);
        let pb = create_progress_bar(jobs.len() as u64, format!("Downloading {}...", year));
        report.merge(fetch_all(&client, &jobs, &pb).await);
        pb.finish_with_message(format!("{} done", year));

        info!("Done with {}", year);
    }

    Ok(report)
}

// -- Tests -------------------------------------------------------------------
