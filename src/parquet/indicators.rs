//! Save an indicator table to a parquet file.

use std::{fs::File, path::Path, sync::Arc};

use arrow::{
    array::{ArrayRef, Date32Array, Float64Array},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use chrono::{Datelike, NaiveDate};
use parquet::{arrow::ArrowWriter, file::properties::WriterProperties};

use crate::{error::IndicatorError, indicator::IndicatorTable};

/// Writes `table` as one row group: a `date` column followed by one
/// nullable `Float64` column per indicator. NaN values are stored as nulls.
pub fn save_table(table: &IndicatorTable, file_path: &Path) -> Result<(), IndicatorError> {
    let file = File::create(file_path).map_err(|e| IndicatorError::Write(file_path.to_path_buf(), e))?;

    let mut fields = vec![Field::new("date", DataType::Date32, false)];
    fields.extend(
        table
            .columns()
            .iter()
            .map(|c| Field::new(c.name.as_str(), DataType::Float64, true)),
    );
    let schema = Arc::new(Schema::new(fields));

    let props = WriterProperties::builder()
        .set_compression(parquet::basic::Compression::SNAPPY)
        .build();

    let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

    let dates: Vec<i32> = table.index().iter().map(|d| date32(*d)).collect();

    let mut columns: Vec<ArrayRef> = vec![Arc::new(Date32Array::from(dates))];
    for column in table.columns() {
        let values: Vec<Option<f64>> = column
            .values
            .iter()
            .map(|v| if v.is_nan() { None } else { Some(*v) })
            .collect();
        columns.push(Arc::new(Float64Array::from(values)));
    }

    let batch = RecordBatch::try_new(schema, columns)?;

    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}

// Days from 0001-01-01 to 1970-01-01.
const EPOCH_DAYS_FROM_CE: i32 = 719_163;

fn date32(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - EPOCH_DAYS_FROM_CE
}

// -- Tests -------------------------------------------------------------------
