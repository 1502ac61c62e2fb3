//! Ошибки очистки данных

use thiserror::Error;

use crate::types::ColumnKind;

pub type Result<T> = std::result::Result<T, CleaningError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CleaningError {
    #[error("columns not found: [{}]", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("column '{column}' is {actual}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: ColumnKind,
        actual: ColumnKind,
    },

    /// Медиану нельзя посчитать: все значения пропущены
    #[error("column '{0}' has no non-missing values")]
    EmptyColumn(String),

    #[error("column '{column}' has {len} rows, expected {expected}")]
    LengthMismatch {
        column: String,
        len: usize,
        expected: usize,
    },

    #[error("index has {index} labels but table has {rows} rows")]
    IndexMismatch { index: usize, rows: usize },

    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    #[error("column '{0}' contains missing values")]
    MissingValues(String),

    #[error("invalid split: {0}")]
    InvalidSplit(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

impl CleaningError {
    pub fn missing_column(name: impl Into<String>) -> Self {
        Self::MissingColumns(vec![name.into()])
    }

    /// Короткий код для API ответов
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingColumns(_) | Self::DuplicateColumn(_) => "SCHEMA_ERROR",
            Self::TypeMismatch { .. } => "TYPE_ERROR",
            Self::EmptyColumn(_) | Self::MissingValues(_) => "DATA_ERROR",
            Self::LengthMismatch { .. } | Self::IndexMismatch { .. } => "SHAPE_ERROR",
            Self::InvalidSplit(_) | Self::InvalidParameter(_) => "INVALID_PARAMETER",
        }
    }
}
