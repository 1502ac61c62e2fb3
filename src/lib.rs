//! Customer satisfaction - очистка данных заказов для модели оценки отзывов

pub mod api;
pub mod cleaning;
pub mod dataset;
pub mod error;
pub mod preprocessing;
pub mod steps;
pub mod types;

pub use dataset::Dataset;
pub use error::{CleaningError, Result};
pub use types::*;

// Re-export для удобства
pub use cleaning::{
    preprocess, split, DataCleaning, DataDivideStrategy, DataPreProcessStrategy, DataStrategy,
};
pub use steps::clean_data;
