//! Шаг очистки: предобработка, затем разбиение на train/test

use crate::cleaning;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::types::{CleaningSettings, SplitResult};

pub fn clean_data(df: Dataset, settings: &CleaningSettings) -> Result<SplitResult> {
    let result = cleaning::preprocess(df, settings)
        .and_then(|processed| cleaning::split(processed, settings));

    match result {
        Ok(split) => {
            tracing::info!(
                train_rows = split.x_train.height(),
                test_rows = split.x_test.height(),
                features = split.x_train.width(),
                "Data cleaning Completed"
            );
            Ok(split)
        }
        Err(e) => {
            tracing::error!("Error in cleaning data: {}", e);
            Err(e)
        }
    }
}

/// Только предобработка, без разбиения
pub fn preprocess_data(df: Dataset, settings: &CleaningSettings) -> Result<Dataset> {
    match cleaning::preprocess(df, settings) {
        Ok(processed) => {
            tracing::info!(
                rows = processed.height(),
                columns = processed.width(),
                "Data preprocessing Completed"
            );
            Ok(processed)
        }
        Err(e) => {
            tracing::error!("Error in preprocessing data: {}", e);
            Err(e)
        }
    }
}
