//! Descriptor-driven decoding of database rows into JSON maps.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Value};
use sqlx::Row;
use sqlx::postgres::PgRow;
use tracing::warn;
use uuid::Uuid;

use skinspire_entity::EntityDescriptor;
use skinspire_entity::catalog::field::FieldType;

/// Convert one result row into a JSON object per the descriptor's catalog.
///
/// Type coercions follow the service contract: numeric types become
/// floats with a 0.0 null default, temporal types become ISO-8601
/// strings, booleans default to false. A column that fails to decode is
/// logged and set to null; it never aborts the row.
pub fn row_to_json(descriptor: &EntityDescriptor, row: &PgRow) -> Map<String, Value> {
    let mut map = Map::new();

    for field in &descriptor.fields {
        let value = match decode_field(row, field.name, field.field_type) {
            Ok(value) => value,
            Err(e) => {
                warn!(
                    entity = descriptor.entity_type,
                    column = field.name,
                    error = %e,
                    "Failed to decode column, defaulting to null"
                );
                Value::Null
            }
        };
        map.insert(field.name.to_string(), value);
    }

    if let Some(soft_delete) = &descriptor.soft_delete {
        mirror_soft_delete(row, soft_delete, &mut map);
    }

    for virtual_field in &descriptor.virtual_fields {
        let value = extract_virtual(row, virtual_field.column, virtual_field.key);
        map.insert(virtual_field.name.to_string(), value);
    }

    map
}

/// Decode a single column by declared type.
fn decode_field(row: &PgRow, name: &str, field_type: FieldType) -> Result<Value, sqlx::Error> {
    let value = match field_type {
        FieldType::Text | FieldType::Textarea | FieldType::Select => row
            .try_get::<Option<String>, _>(name)?
            .map(Value::String)
            .unwrap_or(Value::Null),
        FieldType::Uuid => row
            .try_get::<Option<Uuid>, _>(name)?
            .map(|v| Value::String(v.to_string()))
            .unwrap_or(Value::Null),
        FieldType::Date => row
            .try_get::<Option<NaiveDate>, _>(name)?
            .map(|v| Value::String(v.format("%Y-%m-%d").to_string()))
            .unwrap_or(Value::Null),
        FieldType::DateTime => row
            .try_get::<Option<DateTime<Utc>>, _>(name)?
            .map(|v| Value::String(v.to_rfc3339()))
            .unwrap_or(Value::Null),
        FieldType::Integer => {
            // Inventory counts are INT4; fall back to INT8 for wider columns.
            match row.try_get::<Option<i32>, _>(name) {
                Ok(v) => v.map(|v| Value::from(i64::from(v))).unwrap_or(Value::Null),
                Err(_) => row
                    .try_get::<Option<i64>, _>(name)?
                    .map(Value::from)
                    .unwrap_or(Value::Null),
            }
        }
        FieldType::Decimal | FieldType::Currency | FieldType::Percentage => {
            let decimal = row.try_get::<Option<Decimal>, _>(name)?;
            let float = decimal.and_then(|d| d.to_f64()).unwrap_or(0.0);
            Value::from(float)
        }
        FieldType::Boolean => {
            let flag = row.try_get::<Option<bool>, _>(name)?.unwrap_or(false);
            Value::Bool(flag)
        }
    };
    Ok(value)
}

/// Mirror the soft-delete bookkeeping columns verbatim.
fn mirror_soft_delete(
    row: &PgRow,
    soft_delete: &skinspire_entity::catalog::descriptor::SoftDelete,
    map: &mut Map<String, Value>,
) {
    let flag = row
        .try_get::<Option<bool>, _>(soft_delete.flag)
        .ok()
        .flatten()
        .unwrap_or(false);
    map.insert(soft_delete.flag.to_string(), Value::Bool(flag));

    let deleted_at = row
        .try_get::<Option<DateTime<Utc>>, _>(soft_delete.deleted_at)
        .ok()
        .flatten()
        .map(|v| Value::String(v.to_rfc3339()))
        .unwrap_or(Value::Null);
    map.insert(soft_delete.deleted_at.to_string(), deleted_at);

    let deleted_by = row
        .try_get::<Option<Uuid>, _>(soft_delete.deleted_by)
        .ok()
        .flatten()
        .map(|v| Value::String(v.to_string()))
        .unwrap_or(Value::Null);
    map.insert(soft_delete.deleted_by.to_string(), deleted_by);
}

/// Extract one virtual field from its JSONB source column.
///
/// Absent columns, non-object payloads, and missing keys all yield null
/// for that field only.
fn extract_virtual(row: &PgRow, column: &str, key: &str) -> Value {
    match row.try_get::<Option<Value>, _>(column) {
        Ok(Some(Value::Object(object))) => object.get(key).cloned().unwrap_or(Value::Null),
        Ok(_) => Value::Null,
        Err(e) => {
            warn!(column, key, error = %e, "Failed to read JSONB source column");
            Value::Null
        }
    }
}
