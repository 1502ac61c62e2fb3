//! Разбиение на обучающую и тестовую выборки

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::cleaning::strategy::DataStrategy;
use crate::dataset::Dataset;
use crate::error::{CleaningError, Result};
use crate::types::{Series, SplitResult, SplitSettings};

#[derive(Debug, Clone, Default)]
pub struct DataDivideStrategy {
    settings: SplitSettings,
}

impl DataDivideStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: SplitSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SplitSettings {
        &self.settings
    }
}

/// Размеры (train, test): test = ceil(n * test_size), обе части непустые
pub fn split_sizes(n_samples: usize, test_size: f64) -> Result<(usize, usize)> {
    let n_test = (n_samples as f64 * test_size).ceil() as usize;
    let n_train = n_samples.saturating_sub(n_test);

    if n_train == 0 || n_test == 0 {
        return Err(CleaningError::InvalidSplit(format!(
            "with n_samples={}, test_size={} one of the subsets would be empty",
            n_samples, test_size
        )));
    }
    Ok((n_train, n_test))
}

/// Перестановка позиций 0..n, одинаковая для одного и того же seed
pub fn shuffled_positions(n_samples: usize, seed: u64) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut positions: Vec<usize> = (0..n_samples).collect();
    positions.shuffle(&mut rng);
    positions
}

impl DataStrategy for DataDivideStrategy {
    type Output = SplitResult;

    fn name(&self) -> &'static str {
        "divide"
    }

    fn handle_data(&self, data: Dataset) -> Result<SplitResult> {
        self.settings.validate()?;

        let (features, labels) = data.pop_column(&self.settings.target_column)?;
        let (_, n_test) = split_sizes(features.height(), self.settings.test_size)?;

        let positions = shuffled_positions(features.height(), self.settings.random_state);
        let (test_rows, train_rows) = positions.split_at(n_test);
        tracing::debug!(
            train = train_rows.len(),
            test = test_rows.len(),
            columns = features.width(),
            "Split done"
        );

        Ok(SplitResult {
            x_train: features.take(train_rows),
            x_test: features.take(test_rows),
            y_train: take_series(&labels, train_rows),
            y_test: take_series(&labels, test_rows),
        })
    }
}

fn take_series(series: &Series, rows: &[usize]) -> Series {
    Series {
        index: rows.iter().map(|&i| series.index[i]).collect(),
        column: series.column.take(rows),
    }
}
