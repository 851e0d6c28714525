//! Preprocessed indicator files and the metrics derived from them.

pub mod axes;
pub mod degree_days;
pub mod table;

pub use axes::{drop_spines, Axes};
pub use degree_days::{DegreeDayKind, DEFAULT_BASE_TEMPERATURE};
pub use table::{Column, IndicatorTable};
