//! Заполнение пропусков

use crate::error::{CleaningError, Result};
use crate::types::{is_missing, Column, ColumnData};

/// Медиана по непропущенным значениям; `None`, если таких нет
pub fn median(values: &[Option<f64>]) -> Option<f64> {
    let mut present: Vec<f64> = values
        .iter()
        .filter(|v| !is_missing(v))
        .flatten()
        .copied()
        .collect();
    if present.is_empty() {
        return None;
    }

    present.sort_by(f64::total_cmp);
    let n = present.len();
    if n % 2 == 0 {
        Some((present[n / 2 - 1] + present[n / 2]) / 2.0)
    } else {
        Some(present[n / 2])
    }
}

/// Пропуски числовой колонки -> медиана этой же колонки
pub fn fill_with_median(column: Column) -> Result<Column> {
    let fill = median(column.as_numeric()?)
        .ok_or_else(|| CleaningError::EmptyColumn(column.name.clone()))?;

    let Column { name, data } = column;
    let values = match data {
        ColumnData::Numeric(values) => values
            .into_iter()
            .map(|v| if is_missing(&v) { Some(fill) } else { v })
            .collect(),
        // as_numeric выше уже отсеял остальные типы
        other => return Ok(Column { name, data: other }),
    };
    Ok(Column::numeric(name, values))
}

/// Пропуски -> фиксированный текст.
///
/// Колонка без пропусков возвращается как есть. Нетекстовая колонка с
/// пропусками становится текстовой (значения переводятся в строки).
pub fn fill_with_text(column: Column, placeholder: &str) -> Column {
    if column.null_count() == 0 {
        return column;
    }

    let Column { name, data } = column;
    let filled = |v: Option<String>| Some(v.unwrap_or_else(|| placeholder.to_string()));
    let values: Vec<Option<String>> = match data {
        ColumnData::Text(values) => values.into_iter().map(filled).collect(),
        ColumnData::Numeric(values) => values
            .into_iter()
            .map(|v| filled(v.filter(|x| !x.is_nan()).map(|x| x.to_string())))
            .collect(),
        ColumnData::Temporal(values) => values
            .into_iter()
            .map(|v| filled(v.map(|t| t.to_string())))
            .collect(),
    };
    Column::text(name, values)
}
