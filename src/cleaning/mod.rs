/// Очистка данных: стратегии и контекст

pub mod divide;
pub mod preprocess;
pub mod strategy;

pub use divide::DataDivideStrategy;
pub use preprocess::DataPreProcessStrategy;
pub use strategy::{DataCleaning, DataStrategy};

use crate::dataset::Dataset;
use crate::error::Result;
use crate::types::{CleaningSettings, SplitResult};

/// Предобработка сырой таблицы
pub fn preprocess(data: Dataset, settings: &CleaningSettings) -> Result<Dataset> {
    let strategy = DataPreProcessStrategy::with_settings(settings.preprocess.clone());
    DataCleaning::new(data, strategy).handle_data()
}

/// Разбиение очищенной таблицы на train/test
pub fn split(data: Dataset, settings: &CleaningSettings) -> Result<SplitResult> {
    let strategy = DataDivideStrategy::with_settings(settings.split.clone());
    DataCleaning::new(data, strategy).handle_data()
}
