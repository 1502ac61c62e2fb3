/// Шаги конвейера обучения

pub mod clean_data;

pub use clean_data::{clean_data, preprocess_data};
