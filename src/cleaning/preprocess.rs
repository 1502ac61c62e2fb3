//! Предобработка: сырые заказы -> числовая таблица без пропусков

use crate::cleaning::strategy::DataStrategy;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::preprocessing::{fill_with_median, fill_with_text};
use crate::types::PreprocessSettings;

#[derive(Debug, Clone, Default)]
pub struct DataPreProcessStrategy {
    settings: PreprocessSettings,
}

impl DataPreProcessStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: PreprocessSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PreprocessSettings {
        &self.settings
    }
}

impl DataStrategy for DataPreProcessStrategy {
    type Output = Dataset;

    fn name(&self) -> &'static str {
        "preprocess"
    }

    fn handle_data(&self, data: Dataset) -> Result<Dataset> {
        let s = &self.settings;

        // 1. Даты не используются моделью
        let mut data = data.drop_columns(&s.date_columns)?;
        log_step("drop_dates", &data);

        // 2. Габариты товара: пропуски -> медиана колонки
        for column in &s.median_columns {
            data = data.map_column(column, fill_with_median)?;
        }
        log_step("fill_median", &data);

        // 3. Текст отзыва: пропуски -> заглушка
        data = data.map_column(&s.comment_column, |c| {
            Ok(fill_with_text(c, &s.comment_placeholder))
        })?;
        log_step("fill_comment", &data);

        // 4. Только числовые колонки. Текст отзыва здесь тоже уходит.
        let data = data.select_numeric();
        log_step("select_numeric", &data);

        // 5. Идентификаторы не являются признаками
        let data = data.drop_columns(&s.identifier_columns)?;
        log_step("drop_identifiers", &data);

        // Прочие числовые колонки не заполняются: пропуск в них - ошибка
        data.ensure_complete()
    }
}

fn log_step(step: &str, data: &Dataset) {
    tracing::debug!(
        step,
        rows = data.height(),
        columns = data.width(),
        "Preprocess step done"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CleaningError;
    use crate::types::{Column, ColumnKind};
    use chrono::NaiveDate;

    fn orders(weights: Vec<Option<f64>>) -> Dataset {
        let n = weights.len();
        let ts = NaiveDate::from_ymd_opt(2017, 10, 2)
            .unwrap()
            .and_hms_opt(10, 56, 33)
            .unwrap();
        let dates = [
            "order_approved_at",
            "order_delivered_carrier_date",
            "order_delivered_customer_date",
            "order_estimated_delivery_date",
            "order_purchase_timestamp",
        ];

        let mut columns: Vec<Column> = dates
            .iter()
            .map(|name| Column::temporal(*name, vec![Some(ts); n]))
            .collect();
        columns.push(Column::numeric("product_weight_g", weights));
        columns.push(Column::numeric("product_length_cm", vec![Some(16.0); n]));
        columns.push(Column::numeric("product_height_cm", vec![Some(10.0); n]));
        columns.push(Column::numeric("product_width_cm", vec![Some(14.0); n]));
        columns.push(Column::text(
            "review_comment_message",
            (0..n)
                .map(|i| if i % 2 == 0 { None } else { Some("ok".to_string()) })
                .collect(),
        ));
        columns.push(Column::text("order_status", vec![Some("delivered".to_string()); n]));
        columns.push(Column::numeric("customer_zip_code_prefix", vec![Some(3149.0); n]));
        columns.push(Column::numeric("order_item_id", vec![Some(1.0); n]));
        columns.push(Column::numeric("price", (0..n).map(|i| Some(i as f64)).collect()));
        columns.push(Column::numeric("review_score", vec![Some(4.0); n]));
        Dataset::new(columns).unwrap()
    }

    #[test]
    fn test_output_schema() {
        let weights = (1..=10).map(|w| Some(w as f64 * 100.0)).collect();
        let out = DataPreProcessStrategy::new().handle_data(orders(weights)).unwrap();

        assert_eq!(
            out.column_names(),
            vec![
                "product_weight_g",
                "product_length_cm",
                "product_height_cm",
                "product_width_cm",
                "price",
                "review_score",
            ]
        );
        assert_eq!(out.null_count(), 0);
        assert!(out.columns().iter().all(|c| c.kind() == ColumnKind::Numeric));
    }

    #[test]
    fn test_single_missing_weight_gets_median_of_others() {
        let mut weights: Vec<Option<f64>> = (1..=10).map(|w| Some(w as f64)).collect();
        weights[3] = None;
        let out = DataPreProcessStrategy::new().handle_data(orders(weights)).unwrap();

        // медиана 1,2,3,5,6,7,8,9,10
        let weight = out.column("product_weight_g").unwrap().as_numeric().unwrap();
        assert_eq!(weight[3], Some(6.0));
        assert_eq!(out.height(), 10);
    }

    #[test]
    fn test_missing_date_column_is_schema_error() {
        let data = orders(vec![Some(1.0); 4])
            .drop_columns(&["order_approved_at"])
            .unwrap();
        let result = DataPreProcessStrategy::new().handle_data(data);
        assert_eq!(
            result,
            Err(CleaningError::missing_column("order_approved_at"))
        );
    }

    #[test]
    fn test_missing_comment_column_is_schema_error() {
        let data = orders(vec![Some(1.0); 4])
            .drop_columns(&["review_comment_message"])
            .unwrap();
        let result = DataPreProcessStrategy::new().handle_data(data);
        assert_eq!(
            result,
            Err(CleaningError::missing_column("review_comment_message"))
        );
    }

    #[test]
    fn test_text_identifier_is_dropped_before_identifier_step() {
        let data = orders(vec![Some(1.0); 3])
            .map_column("order_item_id", |c| {
                Ok(Column::text(c.name, vec![Some("1".to_string()); 3]))
            })
            .unwrap();
        let result = DataPreProcessStrategy::new().handle_data(data);
        assert_eq!(result, Err(CleaningError::missing_column("order_item_id")));
    }

    #[test]
    fn test_all_missing_dimension_fails() {
        let result = DataPreProcessStrategy::new().handle_data(orders(vec![None; 3]));
        assert_eq!(
            result,
            Err(CleaningError::EmptyColumn("product_weight_g".to_string()))
        );
    }

    #[test]
    fn test_gap_in_non_imputed_column_fails() {
        let data = orders(vec![Some(1.0); 4])
            .map_column("price", |c| {
                Ok(Column::numeric(c.name, vec![Some(1.0), None, Some(2.0), Some(3.0)]))
            })
            .unwrap();
        let result = DataPreProcessStrategy::new().handle_data(data);
        assert_eq!(result, Err(CleaningError::MissingValues("price".to_string())));
    }

    #[test]
    fn test_custom_settings() {
        let settings = PreprocessSettings {
            identifier_columns: vec!["order_item_id".to_string()],
            ..PreprocessSettings::default()
        };
        let out = DataPreProcessStrategy::with_settings(settings)
            .handle_data(orders(vec![Some(1.0); 3]))
            .unwrap();
        assert!(out.contains("customer_zip_code_prefix"));
    }
}
