//! Date-indexed table of preprocessed indicator values.

use std::{fs::File, io::Read, path::Path};

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;

use crate::error::IndicatorError;

const DATE_COLUMN: &str = "date";

/// Number of leading characters stripped from every data column name.
pub const PREFIX_LEN: usize = 4;

// Same markers pandas `read_csv` treats as missing by default.
const MISSING: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
/// Rows are kept in input order; the index is not sorted.
pub struct IndicatorTable {
    index: Vec<NaiveDate>,
    columns: Vec<Column>,
}

impl IndicatorTable {
    pub fn new(index: Vec<NaiveDate>, columns: Vec<Column>) -> Self {
        debug_assert!(columns.iter().all(|c| c.values.len() == index.len()));
        IndicatorTable { index, columns }
    }

    /// Loads an indicator CSV from disk. See [`IndicatorTable::from_reader`].
    pub fn load(path: &Path) -> Result<Self, IndicatorError> {
        let file = File::open(path).map_err(|e| IndicatorError::Open(path.to_path_buf(), e))?;
        Self::from_reader(file)
    }

    /// Reads a CSV with a `date` column plus numeric columns sharing a
    /// 4-character prefix. Prefixes are stripped and any row with a missing
    /// value is dropped.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, IndicatorError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::Fields)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let date_idx = headers
            .iter()
            .position(|h| h == DATE_COLUMN)
            .ok_or(IndicatorError::MissingDateColumn)?;
        let data_idx: Vec<usize> = (0..headers.len()).filter(|&i| i != date_idx).collect();

        let mut index = Vec::new();
        let mut columns: Vec<Column> = data_idx
            .iter()
            .map(|&i| Column {
                name: strip_prefix(&headers[i]),
                values: Vec::new(),
            })
            .collect();

        let mut record = StringRecord::new();
        while reader.read_record(&mut record)? {
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let Some(date) = field(&record, date_idx) else {
                continue;
            };
            let mut row = Vec::with_capacity(data_idx.len());
            for &i in &data_idx {
                match field(&record, i) {
                    Some(raw) => match parse_value(raw, line, &headers[i])? {
                        v if v.is_nan() => break,
                        v => row.push(v),
                    },
                    None => break,
                }
            }
            if row.len() < data_idx.len() {
                continue;
            }

            index.push(parse_date(date, line)?);
            for (column, value) in columns.iter_mut().zip(row) {
                column.values.push(value);
            }
        }

        Ok(IndicatorTable::new(index, columns))
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn index(&self) -> &[NaiveDate] {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.values.as_slice())
    }

    /// Applies `f` to every column, keeping the index.
    pub fn map_columns<F>(&self, prefix: &str, f: F) -> IndicatorTable
    where
        F: Fn(&[f64]) -> Vec<f64>,
    {
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: format!("{}{}", prefix, c.name),
                values: f(&c.values),
            })
            .collect();

        IndicatorTable::new(self.index.clone(), columns)
    }

    /// Appends the columns of `other`, which must share this table's index.
    pub fn extend_columns(&mut self, other: IndicatorTable) {
        debug_assert_eq!(self.index, other.index);
        self.columns.extend(other.columns);
    }
}

/// Drops the first [`PREFIX_LEN`] characters. Shorter names become empty.
pub fn strip_prefix(name: &str) -> String {
    name.chars().skip(PREFIX_LEN).collect()
}

// Returns None for a missing field, including fields past the end of a short row.
fn field(record: &StringRecord, i: usize) -> Option<&str> {
    record.get(i).filter(|v| !MISSING.contains(v))
}

fn parse_value(raw: &str, line: u64, column: &str) -> Result<f64, IndicatorError> {
    raw.parse::<f64>().map_err(|_| IndicatorError::InvalidValue {
        line,
        column: column.to_string(),
        value: raw.to_string(),
    })
}

fn parse_date(raw: &str, line: u64) -> Result<NaiveDate, IndicatorError> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .ok_or_else(|| IndicatorError::InvalidDate {
            line,
            value: raw.to_string(),
        })
}

// -- Tests -------------------------------------------------------------------
