//! Построение таблицы из JSON записей с выводом типов колонок

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::dataset::Dataset;
use crate::error::Result;
use crate::types::{Column, ColumnKind};

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

static NULL: Value = Value::Null;

pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Тип колонки по непустым значениям.
/// Все числа -> numeric, все строки-даты -> temporal, иначе text.
/// Колонка целиком из null считается числовой.
pub fn infer_kind(values: &[&Value]) -> ColumnKind {
    let present: Vec<&Value> = values.iter().copied().filter(|v| !v.is_null()).collect();

    if present.iter().all(|v| v.is_number()) {
        return ColumnKind::Numeric;
    }

    let all_dates = present
        .iter()
        .all(|v| v.as_str().map_or(false, |s| parse_datetime(s).is_some()));
    if all_dates {
        ColumnKind::Temporal
    } else {
        ColumnKind::Text
    }
}

fn to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn build_column(name: &str, values: &[&Value]) -> Column {
    match infer_kind(values) {
        ColumnKind::Numeric => {
            Column::numeric(name, values.iter().map(|v| v.as_f64()).collect())
        }
        ColumnKind::Temporal => Column::temporal(
            name,
            values
                .iter()
                .map(|v| v.as_str().and_then(parse_datetime))
                .collect(),
        ),
        ColumnKind::Text => Column::text(name, values.iter().map(|v| to_text(v)).collect()),
    }
}

impl Dataset {
    /// Таблица из построчных записей. Отсутствующий ключ = пропуск.
    /// Порядок колонок - порядок первого появления ключа.
    pub fn from_records(records: &[Map<String, Value>]) -> Result<Dataset> {
        let mut names: Vec<&str> = Vec::new();
        for record in records {
            for key in record.keys() {
                if !names.contains(&key.as_str()) {
                    names.push(key);
                }
            }
        }

        let columns = names
            .iter()
            .map(|name| {
                let values: Vec<&Value> = records
                    .iter()
                    .map(|r| r.get(*name).unwrap_or(&NULL))
                    .collect();
                build_column(name, &values)
            })
            .collect();

        Dataset::with_index((0..records.len()).collect(), columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(value: Value) -> Vec<Map<String, Value>> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_datetime_formats() {
        assert!(parse_datetime("2017-10-02 10:56:33").is_some());
        assert!(parse_datetime("2017-10-02T10:56:33").is_some());
        assert!(parse_datetime("2017-10-18").is_some());
        assert!(parse_datetime("great product").is_none());
    }

    #[test]
    fn test_infer_kinds() {
        let data = records(json!([
            {"score": 5, "msg": "good", "at": "2017-10-02 10:56:33", "empty": null},
            {"score": 4.5, "msg": null, "at": "2017-10-03 11:00:00", "empty": null},
        ]));
        let ds = Dataset::from_records(&data).unwrap();

        assert_eq!(ds.height(), 2);
        assert_eq!(ds.column("score").unwrap().kind(), ColumnKind::Numeric);
        assert_eq!(ds.column("msg").unwrap().kind(), ColumnKind::Text);
        assert_eq!(ds.column("at").unwrap().kind(), ColumnKind::Temporal);
        assert_eq!(ds.column("empty").unwrap().kind(), ColumnKind::Numeric);
        assert_eq!(ds.column("empty").unwrap().null_count(), 2);
    }

    #[test]
    fn test_mixed_values_become_text() {
        let data = records(json!([{"zip": 1234}, {"zip": "01234"}]));
        let ds = Dataset::from_records(&data).unwrap();
        let zip = ds.column("zip").unwrap();
        assert_eq!(zip.kind(), ColumnKind::Text);
        assert_eq!(zip.null_count(), 0);
    }

    #[test]
    fn test_missing_keys_are_missing_values() {
        let data = records(json!([{"a": 1.0, "b": 2.0}, {"a": 3.0}]));
        let ds = Dataset::from_records(&data).unwrap();
        assert_eq!(ds.column("b").unwrap().as_numeric().unwrap(), &[Some(2.0), None]);
    }

    #[test]
    fn test_keyless_records_keep_row_count() {
        let data = records(json!([{}, {}, {}]));
        let ds = Dataset::from_records(&data).unwrap();
        assert_eq!(ds.height(), 3);
        assert_eq!(ds.width(), 0);
    }

    #[test]
    fn test_empty_records() {
        let ds = Dataset::from_records(&[]).unwrap();
        assert_eq!(ds.height(), 0);
        assert_eq!(ds.width(), 0);
    }
}
