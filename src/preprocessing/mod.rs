/// Модуль предобработки данных

pub mod imputation;
pub mod inference;

pub use imputation::{fill_with_median, fill_with_text, median};
pub use inference::{infer_kind, parse_datetime};
