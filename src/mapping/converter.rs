//! Column converter: one raw driver value -> one typed value.

use crate::db::{RawRow, RawValue};
use crate::error::ConversionError;
use crate::model::ColumnType;
use crate::sql::SqlValue;

/// Rust types a column can be read into.
pub trait FromColumn: Sized {
    const COLUMN_TYPE: ColumnType;

    fn from_sql(value: SqlValue) -> Option<Self>;
}

impl FromColumn for i64 {
    const COLUMN_TYPE: ColumnType = ColumnType::BigInt;

    fn from_sql(value: SqlValue) -> Option<Self> {
        match value {
            SqlValue::BigInt(n) => Some(n),
            _ => None,
        }
    }
}

impl FromColumn for f64 {
    const COLUMN_TYPE: ColumnType = ColumnType::Double;

    fn from_sql(value: SqlValue) -> Option<Self> {
        match value {
            SqlValue::Double(n) => Some(n),
            _ => None,
        }
    }
}

impl FromColumn for String {
    const COLUMN_TYPE: ColumnType = ColumnType::Text;

    fn from_sql(value: SqlValue) -> Option<Self> {
        match value {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

pub struct ColumnConverter;

impl ColumnConverter {
    /// Read `column` from `row` as `target`. NULL and absent columns give `SqlValue::Null`.
    pub fn convert(row: &RawRow, column: &str, target: ColumnType) -> Result<SqlValue, ConversionError> {
        let raw = match row.get(column) {
            None | Some(RawValue::Null) => return Ok(SqlValue::Null),
            Some(raw) => raw,
        };
        let converted = match target {
            ColumnType::BigInt => to_i64(raw).map(SqlValue::BigInt),
            ColumnType::Double => to_f64(raw).map(SqlValue::Double),
            ColumnType::Text => to_text(raw).map(SqlValue::Text),
        };
        converted.ok_or_else(|| ConversionError {
            column: column.to_string(),
            expected: target.name(),
            found: raw.describe(),
        })
    }

    /// Typed variant of [`ColumnConverter::convert`].
    pub fn get<T: FromColumn>(row: &RawRow, column: &str) -> Result<Option<T>, ConversionError> {
        Ok(T::from_sql(Self::convert(row, column, T::COLUMN_TYPE)?))
    }
}

fn to_i64(raw: &RawValue) -> Option<i64> {
    match raw {
        RawValue::Int(n) => Some(*n),
        RawValue::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15 => Some(*f as i64),
        RawValue::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn to_f64(raw: &RawValue) -> Option<f64> {
    match raw {
        RawValue::Float(f) => Some(*f),
        RawValue::Int(n) => Some(*n as f64),
        RawValue::Text(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn to_text(raw: &RawValue) -> Option<String> {
    match raw {
        RawValue::Text(s) => Some(s.clone()),
        RawValue::Int(n) => Some(n.to_string()),
        RawValue::Float(f) => Some(f.to_string()),
        RawValue::Bool(b) => Some(b.to_string()),
        RawValue::Json(serde_json::Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> RawRow {
        RawRow::new()
            .with("e_id", 7i64)
            .with("e_count", "12")
            .with("e_score", 3i32)
            .with("e_whole", 4.0)
            .with("e_half", 4.5)
            .with("e_name", "Heat")
            .with("e_missing", None::<i64>)
            .with("e_flag", true)
    }

    #[test]
    fn integers() {
        let r = row();
        assert_eq!(ColumnConverter::get::<i64>(&r, "e_id").unwrap(), Some(7));
        assert_eq!(ColumnConverter::get::<i64>(&r, "e_count").unwrap(), Some(12));
        assert_eq!(ColumnConverter::get::<i64>(&r, "e_whole").unwrap(), Some(4));
        assert!(ColumnConverter::get::<i64>(&r, "e_half").is_err());
        assert!(ColumnConverter::get::<i64>(&r, "e_flag").is_err());
    }

    #[test]
    fn doubles_accept_integers_and_numeric_text() {
        let r = row();
        assert_eq!(ColumnConverter::get::<f64>(&r, "e_half").unwrap(), Some(4.5));
        assert_eq!(ColumnConverter::get::<f64>(&r, "e_score").unwrap(), Some(3.0));
        assert_eq!(ColumnConverter::get::<f64>(&r, "e_count").unwrap(), Some(12.0));
        assert!(ColumnConverter::get::<f64>(&r, "e_name").is_err());
    }

    #[test]
    fn text_accepts_scalars() {
        let r = row();
        assert_eq!(ColumnConverter::get::<String>(&r, "e_name").unwrap().as_deref(), Some("Heat"));
        assert_eq!(ColumnConverter::get::<String>(&r, "e_id").unwrap().as_deref(), Some("7"));
    }

    #[test]
    fn null_and_absent_columns_are_none() {
        let r = row();
        assert_eq!(ColumnConverter::get::<i64>(&r, "e_missing").unwrap(), None);
        assert_eq!(ColumnConverter::get::<String>(&r, "users_first_name").unwrap(), None);
    }

    #[test]
    fn error_names_column_and_types() {
        let r = RawRow::new().with("e_timestamp", "yesterday");
        let err = ColumnConverter::convert(&r, "e_timestamp", ColumnType::BigInt).unwrap_err();
        assert_eq!(err.column, "e_timestamp");
        assert_eq!(err.expected, "bigint");
        assert_eq!(err.found, "text \"yesterday\"");
    }

    #[test]
    fn undecodable_driver_values_fail_instead_of_reading_as_null() {
        let r = RawRow::new().with("e_rating", RawValue::Unsupported("numeric".into()));
        for target in [ColumnType::BigInt, ColumnType::Double, ColumnType::Text] {
            let err = ColumnConverter::convert(&r, "e_rating", target).unwrap_err();
            assert_eq!(err.found, "unsupported numeric");
        }
    }
}
