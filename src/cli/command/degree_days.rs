//! Turn an indicator CSV into degree-day columns saved as parquet.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use tracing::{info, warn};

use crate::{
    cli::create_spinner,
    indicator::{drop_spines, Axes, DegreeDayKind, IndicatorTable},
    parquet, plot,
};

#[derive(Debug, Clone)]
pub struct DegreeDayOptions {
    pub csv: PathBuf,
    pub base: f64,
    pub kinds: Vec<DegreeDayKind>,
    pub output: PathBuf,
    pub plot: Option<PathBuf>,
    pub column: Option<String>,
}

pub fn degree_days(options: &DegreeDayOptions) -> Result<String> {
    let bar = create_spinner(format!("Loading {}...", options.csv.display()));
    let table = IndicatorTable::load(&options.csv)?;
    bar.finish_with_message(format!("Loaded {} rows", table.len()));
    if table.is_empty() {
        warn!("{} has no complete rows", options.csv.display());
    }

    let result = compute(&table, &options.kinds, options.base)?;
    info!(
        "Computed {} degree-day columns at base {}",
        result.columns().len(),
        options.base
    );

    parquet::save_table(&result, &options.output)?;

    if let Some(plot_path) = &options.plot {
        let column = match &options.column {
            Some(column) => column.clone(),
            None => result
                .column_names()
                .first()
                .map(|c| c.to_string())
                .ok_or_else(|| anyhow!("No columns to plot"))?,
        };
        let mut axes = Axes::default();
        plot::render_svg(&result, &column, drop_spines(&mut axes), plot_path)?;
        info!("Chart of {} saved to {}", column, plot_path.display());
    }

    Ok(options.output.to_string_lossy().to_string())
}

fn compute(table: &IndicatorTable, kinds: &[DegreeDayKind], base: f64) -> Result<IndicatorTable> {
    let mut kinds = kinds.iter();
    let first = kinds
        .next()
        .ok_or_else(|| anyhow!("No degree-day kind selected"))?;

    let mut result = table.degree_days(*first, base);
    for kind in kinds {
        result.extend_columns(table.degree_days(*kind, base));
    }

    Ok(result)
}

// -- Tests -------------------------------------------------------------------
