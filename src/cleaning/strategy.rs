//! Стратегия обработки данных и контекст её выполнения

use crate::dataset::Dataset;
use crate::error::Result;

/// Единица преобразования таблицы. Тип результата задаётся самой стратегией.
pub trait DataStrategy {
    type Output;

    fn name(&self) -> &'static str;

    fn handle_data(&self, data: Dataset) -> Result<Self::Output>;
}

/// Связывает одну таблицу с одной стратегией на один запуск
pub struct DataCleaning<S> {
    data: Dataset,
    strategy: S,
}

impl<S: DataStrategy> DataCleaning<S> {
    pub fn new(data: Dataset, strategy: S) -> Self {
        Self { data, strategy }
    }

    /// Ошибка стратегии логируется и возвращается без изменений
    pub fn handle_data(self) -> Result<S::Output> {
        let DataCleaning { data, strategy } = self;
        tracing::debug!(
            strategy = strategy.name(),
            rows = data.height(),
            columns = data.width(),
            "Handling data"
        );

        strategy.handle_data(data).map_err(|e| {
            tracing::error!(strategy = strategy.name(), "Error in handling data: {}", e);
            e
        })
    }
}
