/// Типы данных для модуля очистки

use std::fmt;

use chrono::NaiveDateTime;
use ndarray::{Array1, Ix1};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::dataset::Dataset;
use crate::error::{CleaningError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Numeric,
    Text,
    Temporal,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColumnKind::Numeric => "numeric",
            ColumnKind::Text => "text",
            ColumnKind::Temporal => "temporal",
        };
        f.write_str(name)
    }
}

/// Значения колонки, `None` = пропуск
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "snake_case")]
pub enum ColumnData {
    Numeric(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
    Temporal(Vec<Option<NaiveDateTime>>),
}

impl ColumnData {
    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnData::Numeric(_) => ColumnKind::Numeric,
            ColumnData::Text(_) => ColumnKind::Text,
            ColumnData::Temporal(_) => ColumnKind::Temporal,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.len(),
            ColumnData::Text(v) => v.len(),
            ColumnData::Temporal(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// NaN в числовой колонке тоже считается пропуском
    pub fn null_count(&self) -> usize {
        match self {
            ColumnData::Numeric(v) => v.iter().filter(|x| is_missing(x)).count(),
            ColumnData::Text(v) => v.iter().filter(|x| x.is_none()).count(),
            ColumnData::Temporal(v) => v.iter().filter(|x| x.is_none()).count(),
        }
    }

    pub(crate) fn take(&self, rows: &[usize]) -> ColumnData {
        match self {
            ColumnData::Numeric(v) => ColumnData::Numeric(rows.iter().map(|&i| v[i]).collect()),
            ColumnData::Text(v) => ColumnData::Text(rows.iter().map(|&i| v[i].clone()).collect()),
            ColumnData::Temporal(v) => ColumnData::Temporal(rows.iter().map(|&i| v[i]).collect()),
        }
    }
}

pub(crate) fn is_missing(value: &Option<f64>) -> bool {
    value.map_or(true, f64::is_nan)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn numeric(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        let values = values
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect();
        Self {
            name: name.into(),
            data: ColumnData::Numeric(values),
        }
    }

    pub fn text(name: impl Into<String>, values: Vec<Option<String>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Text(values),
        }
    }

    pub fn temporal(name: impl Into<String>, values: Vec<Option<NaiveDateTime>>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Temporal(values),
        }
    }

    pub fn kind(&self) -> ColumnKind {
        self.data.kind()
    }

    pub fn is_numeric(&self) -> bool {
        self.kind() == ColumnKind::Numeric
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn null_count(&self) -> usize {
        self.data.null_count()
    }

    pub fn as_numeric(&self) -> Result<&[Option<f64>]> {
        match &self.data {
            ColumnData::Numeric(v) => Ok(v),
            other => Err(CleaningError::TypeMismatch {
                column: self.name.clone(),
                expected: ColumnKind::Numeric,
                actual: other.kind(),
            }),
        }
    }

    /// Значения без пропусков, иначе ошибка
    pub fn dense_values(&self) -> Result<Vec<f64>> {
        self.as_numeric()?
            .iter()
            .map(|v| {
                v.filter(|x| !x.is_nan())
                    .ok_or_else(|| CleaningError::MissingValues(self.name.clone()))
            })
            .collect()
    }

    pub(crate) fn take(&self, rows: &[usize]) -> Column {
        Column {
            name: self.name.clone(),
            data: self.data.take(rows),
        }
    }
}

/// Одна колонка вместе с индексом строк (метки)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub index: Vec<usize>,
    pub column: Column,
}

impl Series {
    pub fn name(&self) -> &str {
        &self.column.name
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn to_array1(&self) -> Result<Array1<f64>> {
        Ok(Array1::from(self.column.dense_values()?))
    }
}

/// Результат разбиения: X_train, X_test, y_train, y_test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitResult {
    pub x_train: Dataset,
    pub x_test: Dataset,
    pub y_train: Series,
    pub y_test: Series,
}

pub type LinfaDataset = linfa::Dataset<f64, f64, Ix1>;

impl SplitResult {
    /// Передача в обучение: (train, test) в формате linfa
    pub fn into_linfa(self) -> Result<(LinfaDataset, LinfaDataset)> {
        let feature_names: Vec<String> = self
            .x_train
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let train = linfa::DatasetBase::new(self.x_train.to_array2()?, self.y_train.to_array1()?)
            .with_feature_names(feature_names.clone());
        let test = linfa::DatasetBase::new(self.x_test.to_array2()?, self.y_test.to_array1()?)
            .with_feature_names(feature_names);

        Ok((train, test))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreprocessSettings {
    #[serde(default = "default_date_columns")]
    pub date_columns: Vec<String>,
    #[serde(default = "default_median_columns")]
    pub median_columns: Vec<String>,
    #[serde(default = "default_comment_column")]
    pub comment_column: String,
    #[serde(default = "default_comment_placeholder")]
    pub comment_placeholder: String,
    #[serde(default = "default_identifier_columns")]
    pub identifier_columns: Vec<String>,
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn default_date_columns() -> Vec<String> {
    strings(&[
        "order_approved_at",
        "order_delivered_carrier_date",
        "order_delivered_customer_date",
        "order_estimated_delivery_date",
        "order_purchase_timestamp",
    ])
}
fn default_median_columns() -> Vec<String> {
    strings(&[
        "product_weight_g",
        "product_length_cm",
        "product_height_cm",
        "product_width_cm",
    ])
}
fn default_comment_column() -> String { "review_comment_message".to_string() }
fn default_comment_placeholder() -> String { "No review".to_string() }
fn default_identifier_columns() -> Vec<String> {
    strings(&["customer_zip_code_prefix", "order_item_id"])
}

impl Default for PreprocessSettings {
    fn default() -> Self {
        Self {
            date_columns: default_date_columns(),
            median_columns: default_median_columns(),
            comment_column: default_comment_column(),
            comment_placeholder: default_comment_placeholder(),
            identifier_columns: default_identifier_columns(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitSettings {
    #[serde(default = "default_target_column")]
    pub target_column: String,
    #[serde(default = "default_test_size")]
    pub test_size: f64, // доля, 0 < test_size < 1
    #[serde(default = "default_random_state")]
    pub random_state: u64,
}

fn default_target_column() -> String { "review_score".to_string() }
fn default_test_size() -> f64 { 0.2 }
fn default_random_state() -> u64 { 42 }

impl Default for SplitSettings {
    fn default() -> Self {
        Self {
            target_column: default_target_column(),
            test_size: default_test_size(),
            random_state: default_random_state(),
        }
    }
}

impl SplitSettings {
    pub fn validate(&self) -> Result<()> {
        if !(self.test_size > 0.0 && self.test_size < 1.0) {
            return Err(CleaningError::InvalidParameter(format!(
                "test_size must be in (0, 1), got {}",
                self.test_size
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningSettings {
    #[serde(default)]
    pub preprocess: PreprocessSettings,
    #[serde(default)]
    pub split: SplitSettings,
}

impl CleaningSettings {
    pub fn validate(&self) -> Result<()> {
        self.split.validate()
    }
}

/// Таблица во входящем запросе: по колонкам или списком записей.
/// Колонки проверяются в `into_dataset`, чтобы ошибка дошла до клиента как есть.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatasetInput {
    Columns {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        index: Option<Vec<usize>>,
        columns: Vec<Column>,
    },
    Records(Vec<Map<String, Value>>),
}

impl DatasetInput {
    pub fn into_dataset(self) -> Result<Dataset> {
        match self {
            DatasetInput::Columns {
                index: Some(index),
                columns,
            } => Dataset::with_index(index, columns),
            DatasetInput::Columns {
                index: None,
                columns,
            } => Dataset::new(columns),
            DatasetInput::Records(records) => Dataset::from_records(&records),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanRequest {
    pub dataset: DatasetInput,
    #[serde(default)]
    pub settings: Option<CleaningSettings>,
}
