mod archive;
mod cli;
mod download;
mod error;
mod indicator;
mod parquet;
mod plot;
#[cfg(test)]
mod testing;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, seconds, Cli, Commands};
use tracing_subscriber::{fmt, EnvFilter};

use crate::archive::{AreaAverageConfig, GridConfig};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Grids {
            start_year,
            end_year,
            output_dir,
            timeout_secs,
        } => {
            let defaults = GridConfig::default();
            let config = GridConfig {
                start_year,
                end_year,
                output_dir: output_dir.unwrap_or(defaults.output_dir),
                timeout: seconds(timeout_secs),
                ..GridConfig::default()
            };
            let report = command::grids(&config).await?;
            println!("Grids saved to `{}`: {}", config.output_dir.display(), report);
        }
        Commands::Averages {
            start_year,
            end_year,
            output_dir,
            average_type,
            timeout_secs,
        } => {
            let defaults = AreaAverageConfig::default();
            let config = AreaAverageConfig {
                output_dir: output_dir.unwrap_or(defaults.output_dir),
                average_type: average_type.unwrap_or(defaults.average_type),
                timeout: seconds(timeout_secs).unwrap_or(defaults.timeout),
                base_url: defaults.base_url,
            };
            let report = command::averages(start_year, end_year, &config).await?;
            println!("Area averages saved to `{}`: {}", config.output_dir.display(), report);
        }
        Commands::DegreeDays {
            csv,
            base,
            kind,
            output,
            plot,
            column,
        } => {
            let options = command::DegreeDayOptions {
                csv,
                base,
                kinds: kind.kinds(),
                output: output.unwrap_or_else(|| command::make_parquet_file_name("degree-days")),
                plot,
                column,
            };
            let filename = command::degree_days(&options)?;
            println!("File saved to `{}`", filename);
        }
    }

    Ok(())
}
