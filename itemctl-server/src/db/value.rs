//! Typed result values for dynamically shaped queries
//!
//! Raw SQL results carry no compile-time shape. Each column is classified
//! from its PostgreSQL type into a [`ColumnKind`] and each value decoded into
//! a tagged [`Cell`], so serialization is decided by the tag instead of by
//! inspecting values at runtime.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;
use sqlx::postgres::PgRow;
use sqlx::{Column, Row, TypeInfo};
use uuid::Uuid;

/// Wire format for every timestamp-like value.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS` (fractional seconds dropped).
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// serde helper for `NaiveDateTime` fields.
pub fn serialize_timestamp<S: Serializer>(ts: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format_timestamp(ts))
}

/// Semantic kind of a result column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Boolean,
    SmallInt,
    Integer,
    BigInt,
    Real,
    Double,
    Text,
    Uuid,
    Timestamp,
    TimestampTz,
    Date,
    Time,
    Json,
    /// Anything else; travels as PostgreSQL's text rendering
    Other,
}

impl ColumnKind {
    /// Classify a PostgreSQL type by its sqlx type name.
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "BOOL" => Self::Boolean,
            "INT2" => Self::SmallInt,
            "INT4" => Self::Integer,
            "INT8" => Self::BigInt,
            "FLOAT4" => Self::Real,
            "FLOAT8" => Self::Double,
            "TEXT" | "VARCHAR" | "CHAR" | "NAME" => Self::Text,
            "UUID" => Self::Uuid,
            "TIMESTAMP" => Self::Timestamp,
            "TIMESTAMPTZ" => Self::TimestampTz,
            "DATE" => Self::Date,
            "TIME" => Self::Time,
            "JSON" | "JSONB" => Self::Json,
            _ => Self::Other,
        }
    }
}

/// A single decoded value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Uuid(Uuid),
    Timestamp(NaiveDateTime),
    TimestampTz(DateTime<Utc>),
    Date(NaiveDate),
    Time(NaiveTime),
    Json(JsonValue),
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => s.serialize_none(),
            Self::Boolean(b) => s.serialize_bool(*b),
            Self::Integer(i) => s.serialize_i64(*i),
            // JSON has no NaN or infinity
            Self::Float(f) if f.is_finite() => s.serialize_f64(*f),
            Self::Float(_) => s.serialize_none(),
            Self::Text(t) => s.serialize_str(t),
            Self::Uuid(u) => s.serialize_str(&u.to_string()),
            Self::Timestamp(ts) => serialize_timestamp(ts, s),
            Self::TimestampTz(ts) => serialize_timestamp(&ts.naive_utc(), s),
            Self::Date(d) => s.serialize_str(&format!("{} 00:00:00", d.format("%Y-%m-%d"))),
            Self::Time(t) => s.serialize_str(&format!("1900-01-01 {}", t.format("%H:%M:%S"))),
            Self::Json(v) => v.serialize(s),
        }
    }
}

/// Column name and kind as reported by the result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultColumn {
    pub name: String,
    pub kind: ColumnKind,
}

/// Describe the columns of a row.
pub fn columns_of(row: &PgRow) -> Vec<ResultColumn> {
    row.columns()
        .iter()
        .map(|col| ResultColumn {
            name: col.name().to_owned(),
            kind: ColumnKind::from_type_name(col.type_info().name()),
        })
        .collect()
}

/// Decode one value as the Rust type matching its column kind.
fn decode_cell(row: &PgRow, idx: usize, kind: ColumnKind) -> Result<Cell, sqlx::Error> {
    let cell = match kind {
        ColumnKind::Boolean => row.try_get::<Option<bool>, _>(idx)?.map(Cell::Boolean),
        ColumnKind::SmallInt => row
            .try_get::<Option<i16>, _>(idx)?
            .map(|v| Cell::Integer(v.into())),
        ColumnKind::Integer => row
            .try_get::<Option<i32>, _>(idx)?
            .map(|v| Cell::Integer(v.into())),
        ColumnKind::BigInt => row.try_get::<Option<i64>, _>(idx)?.map(Cell::Integer),
        ColumnKind::Real => row
            .try_get::<Option<f32>, _>(idx)?
            .map(|v| Cell::Float(v.into())),
        ColumnKind::Double => row.try_get::<Option<f64>, _>(idx)?.map(Cell::Float),
        ColumnKind::Uuid => row.try_get::<Option<Uuid>, _>(idx)?.map(Cell::Uuid),
        ColumnKind::Timestamp => row
            .try_get::<Option<NaiveDateTime>, _>(idx)?
            .map(Cell::Timestamp),
        ColumnKind::TimestampTz => row
            .try_get::<Option<DateTime<Utc>>, _>(idx)?
            .map(Cell::TimestampTz),
        ColumnKind::Date => row.try_get::<Option<NaiveDate>, _>(idx)?.map(Cell::Date),
        ColumnKind::Time => row.try_get::<Option<NaiveTime>, _>(idx)?.map(Cell::Time),
        ColumnKind::Json => row.try_get::<Option<JsonValue>, _>(idx)?.map(Cell::Json),
        // Text types and everything without a dedicated variant (NUMERIC,
        // arrays, intervals, ...) keep the server's text rendering.
        ColumnKind::Text | ColumnKind::Other => row
            .try_get_unchecked::<Option<String>, _>(idx)?
            .map(Cell::Text),
    };

    Ok(cell.unwrap_or(Cell::Null))
}

/// Decode a row into a column-name keyed map, using `columns` from
/// [`columns_of`] for the row's result set.
///
/// Keys are sorted; when several columns share a name the last one wins.
pub fn decode_row(
    row: &PgRow,
    columns: &[ResultColumn],
) -> Result<BTreeMap<String, Cell>, sqlx::Error> {
    let mut map = BTreeMap::new();
    for (idx, col) in columns.iter().enumerate() {
        map.insert(col.name.clone(), decode_cell(row, idx, col.kind)?);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn to_json(cell: Cell) -> JsonValue {
        serde_json::to_value(cell).unwrap()
    }

    #[test]
    fn classifies_common_types() {
        assert_eq!(ColumnKind::from_type_name("INT2"), ColumnKind::SmallInt);
        assert_eq!(ColumnKind::from_type_name("INT4"), ColumnKind::Integer);
        assert_eq!(ColumnKind::from_type_name("INT8"), ColumnKind::BigInt);
        assert_eq!(ColumnKind::from_type_name("FLOAT4"), ColumnKind::Real);
        assert_eq!(ColumnKind::from_type_name("VARCHAR"), ColumnKind::Text);
        assert_eq!(ColumnKind::from_type_name("TIMESTAMP"), ColumnKind::Timestamp);
        assert_eq!(ColumnKind::from_type_name("TIMESTAMPTZ"), ColumnKind::TimestampTz);
        assert_eq!(ColumnKind::from_type_name("JSONB"), ColumnKind::Json);
        assert_eq!(ColumnKind::from_type_name("NUMERIC"), ColumnKind::Other);
    }

    #[test]
    fn timestamps_drop_fractional_seconds() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_micro_opt(7, 5, 3, 123_456)
            .unwrap();

        assert_eq!(to_json(Cell::Timestamp(ts)), json!("2024-03-09 07:05:03"));
        assert_eq!(
            to_json(Cell::TimestampTz(ts.and_utc())),
            json!("2024-03-09 07:05:03")
        );
    }

    #[test]
    fn dates_and_times_share_the_timestamp_format() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(to_json(Cell::Date(date)), json!("2024-12-31 00:00:00"));

        let time = NaiveTime::from_hms_opt(23, 59, 1).unwrap();
        assert_eq!(to_json(Cell::Time(time)), json!("1900-01-01 23:59:01"));
    }

    #[test]
    fn scalar_cells() {
        assert_eq!(to_json(Cell::Null), JsonValue::Null);
        assert_eq!(to_json(Cell::Boolean(true)), json!(true));
        assert_eq!(to_json(Cell::Integer(42)), json!(42));
        assert_eq!(to_json(Cell::Float(1.5)), json!(1.5));
        assert_eq!(to_json(Cell::Float(f64::NAN)), JsonValue::Null);
        assert_eq!(to_json(Cell::Text("12.50".into())), json!("12.50"));
    }

    #[test]
    fn json_cells_are_embedded() {
        let value = json!({"tags": ["a", "b"]});
        assert_eq!(to_json(Cell::Json(value.clone())), value);
    }

    #[test]
    fn uuid_cells_are_strings() {
        let id = Uuid::new_v4();
        assert_eq!(to_json(Cell::Uuid(id)), json!(id.to_string()));
    }
}
