//! Handles serialising and saving data to disk in the _parquet_ file format.

pub mod indicators;

pub use indicators::save_table;
