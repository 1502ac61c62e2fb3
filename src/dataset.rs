//! Табличный датасет: именованные колонки одинаковой длины + индекс строк

use std::collections::HashSet;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{CleaningError, Result};
use crate::types::{Column, Series};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDataset")]
pub struct Dataset {
    index: Vec<usize>,
    columns: Vec<Column>,
}

#[derive(Deserialize)]
struct RawDataset {
    #[serde(default)]
    index: Option<Vec<usize>>,
    columns: Vec<Column>,
}

impl TryFrom<RawDataset> for Dataset {
    type Error = CleaningError;

    fn try_from(raw: RawDataset) -> Result<Self> {
        match raw.index {
            Some(index) => Dataset::with_index(index, raw.columns),
            None => Dataset::new(raw.columns),
        }
    }
}

impl Dataset {
    /// Индекс строк 0..n по длине первой колонки
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map_or(0, Column::len);
        Self::with_index((0..rows).collect(), columns)
    }

    pub fn with_index(index: Vec<usize>, columns: Vec<Column>) -> Result<Self> {
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(CleaningError::DuplicateColumn(column.name.clone()));
            }
            if column.len() != index.len() {
                return Err(CleaningError::LengthMismatch {
                    column: column.name.clone(),
                    len: column.len(),
                    expected: index.len(),
                });
            }
        }

        Ok(Self { index, columns })
    }

    pub fn height(&self) -> usize {
        self.index.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| CleaningError::missing_column(name))
    }

    /// Общее число пропусков во всех колонках
    pub fn null_count(&self) -> usize {
        self.columns.iter().map(Column::null_count).sum()
    }

    /// Ошибка на первой колонке с пропусками
    pub fn ensure_complete(self) -> Result<Self> {
        match self.columns.iter().find(|c| c.null_count() > 0) {
            Some(column) => Err(CleaningError::MissingValues(column.name.clone())),
            None => Ok(self),
        }
    }

    /// Удаление колонок. Если хотя бы одной нет - ошибка со списком всех отсутствующих
    pub fn drop_columns<S: AsRef<str>>(self, names: &[S]) -> Result<Self> {
        let missing: Vec<String> = names
            .iter()
            .map(|n| n.as_ref())
            .filter(|n| !self.contains(n))
            .map(|n| n.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(CleaningError::MissingColumns(missing));
        }

        let Dataset { index, columns } = self;
        let columns = columns
            .into_iter()
            .filter(|c| !names.iter().any(|n| n.as_ref() == c.name))
            .collect();
        Ok(Dataset { index, columns })
    }

    /// Только числовые колонки, остальные молча отбрасываются
    pub fn select_numeric(self) -> Self {
        let Dataset { index, columns } = self;
        let columns = columns.into_iter().filter(Column::is_numeric).collect();
        Dataset { index, columns }
    }

    /// Замена колонки результатом `f`; длина колонки должна сохраниться
    pub fn map_column<F>(mut self, name: &str, f: F) -> Result<Self>
    where
        F: FnOnce(Column) -> Result<Column>,
    {
        let position = self
            .columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| CleaningError::missing_column(name))?;

        let column = f(self.columns.remove(position))?;
        let len = column.len();
        if len != self.index.len() {
            return Err(CleaningError::LengthMismatch {
                column: column.name,
                len,
                expected: self.index.len(),
            });
        }
        self.columns.insert(position, column);
        Ok(self)
    }

    /// Отделяет колонку от таблицы: (остальные колонки, колонка с индексом)
    pub fn pop_column(self, name: &str) -> Result<(Self, Series)> {
        let Dataset { index, mut columns } = self;
        let position = columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| CleaningError::missing_column(name))?;

        let column = columns.remove(position);
        let series = Series {
            index: index.clone(),
            column,
        };
        Ok((Dataset { index, columns }, series))
    }

    /// Строки по позициям (не по меткам индекса)
    pub(crate) fn take(&self, rows: &[usize]) -> Dataset {
        Dataset {
            index: rows.iter().map(|&i| self.index[i]).collect(),
            columns: self.columns.iter().map(|c| c.take(rows)).collect(),
        }
    }

    /// Матрица признаков (строки x колонки); все колонки числовые и без пропусков
    pub fn to_array2(&self) -> Result<Array2<f64>> {
        let dense = self
            .columns
            .iter()
            .map(Column::dense_values)
            .collect::<Result<Vec<_>>>()?;

        Ok(Array2::from_shape_fn(
            (self.height(), self.width()),
            |(i, j)| dense[j][i],
        ))
    }
}
