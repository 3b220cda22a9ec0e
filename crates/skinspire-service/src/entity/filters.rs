//! Categorized filter processing.
//!
//! Turns the raw per-request filter map into typed SQL conditions, using
//! the entity descriptor to decide how each key is interpreted. Unknown
//! keys, non-filterable fields, and unparsable values are skipped and
//! logged; they never fail the request.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::debug;
use uuid::Uuid;

use skinspire_core::types::filter::{FilterCondition, FilterOp, FilterValue};
use skinspire_entity::EntityDescriptor;
use skinspire_entity::catalog::field::{FieldDef, FieldType};

/// Keys that belong to the transport layer, never to structured filtering.
const RESERVED_KEYS: &[&str] = &[
    "page",
    "per_page",
    "sort_by",
    "sort_order",
    "search",
    "search_term",
    "include_deleted",
];

/// The outcome of categorized filter processing.
#[derive(Debug, Default)]
pub struct ProcessedFilters {
    /// Typed conditions ready for the query builder.
    pub conditions: Vec<FilterCondition>,
    /// Canonical names of the fields actually filtered.
    pub applied: BTreeSet<String>,
}

impl ProcessedFilters {
    /// Whether any structured filter was applied.
    pub fn any_applied(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// Process a raw filter map against an entity descriptor.
pub fn process(descriptor: &EntityDescriptor, raw: &BTreeMap<String, String>) -> ProcessedFilters {
    let mut out = ProcessedFilters::default();

    for (key, value) in raw {
        let value = value.trim();
        if value.is_empty() || RESERVED_KEYS.contains(&key.as_str()) {
            continue;
        }

        if let Some(field) = descriptor.resolve(key) {
            if !field.filterable {
                debug!(entity = descriptor.entity_type, key, "Field is not filterable, skipping");
                continue;
            }
            if let Some(conditions) = direct_conditions(field, value) {
                out.applied.insert(field.name.to_string());
                out.conditions.extend(conditions);
            } else {
                debug!(entity = descriptor.entity_type, key, value, "Unparsable filter value, skipping");
            }
            continue;
        }

        if let Some((field, condition)) = range_condition(descriptor, key, value) {
            out.applied.insert(field.name.to_string());
            out.conditions.push(condition);
            continue;
        }

        debug!(entity = descriptor.entity_type, key, "Unknown filter key, skipping");
    }

    out
}

/// Build the equality-style conditions for a directly named field.
/// Most types produce one condition; a bare date against a timestamp
/// column produces the pair bounding that day.
fn direct_conditions(field: &FieldDef, value: &str) -> Option<Vec<FilterCondition>> {
    let condition = match field.field_type {
        FieldType::Select => {
            if value.contains(',') {
                let values: Vec<String> = value
                    .split(',')
                    .map(|v| v.trim().to_string())
                    .filter(|v| !v.is_empty())
                    .collect();
                FilterCondition::new(field.name, FilterOp::In, FilterValue::StringList(values))
            } else {
                FilterCondition::eq(field.name, value)
            }
        }
        FieldType::Text | FieldType::Textarea => FilterCondition::contains(field.name, value),
        FieldType::Uuid => {
            let id = Uuid::parse_str(value).ok()?;
            FilterCondition::new(field.name, FilterOp::Eq, FilterValue::Uuid(id))
        }
        FieldType::Integer => {
            let parsed: i64 = value.parse().ok()?;
            FilterCondition::new(field.name, FilterOp::Eq, FilterValue::Integer(parsed))
        }
        FieldType::Decimal | FieldType::Currency | FieldType::Percentage => {
            let parsed: f64 = value.parse().ok()?;
            FilterCondition::new(field.name, FilterOp::Eq, FilterValue::Float(parsed))
        }
        FieldType::Boolean => {
            let parsed = parse_bool(value)?;
            FilterCondition::new(field.name, FilterOp::Eq, FilterValue::Boolean(parsed))
        }
        FieldType::Date => {
            let parsed = parse_date(value)?;
            FilterCondition::new(field.name, FilterOp::Eq, FilterValue::Date(parsed))
        }
        FieldType::DateTime => return datetime_conditions(field, value),
    };
    Some(vec![condition])
}

/// A full timestamp matches exactly; a bare date covers the whole day.
fn datetime_conditions(field: &FieldDef, value: &str) -> Option<Vec<FilterCondition>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        let exact = FilterValue::DateTime(ts.with_timezone(&Utc));
        return Some(vec![FilterCondition::new(field.name, FilterOp::Eq, exact)]);
    }
    let start = parse_datetime(value, false)?;
    let end = parse_datetime(value, true)?;
    Some(vec![
        FilterCondition::new(field.name, FilterOp::Gte, FilterValue::DateTime(start)),
        FilterCondition::new(field.name, FilterOp::Lte, FilterValue::DateTime(end)),
    ])
}

/// Handle `_from`/`_to` (temporal) and `_min`/`_max` (numeric) suffixes.
fn range_condition<'d>(
    descriptor: &'d EntityDescriptor,
    key: &str,
    value: &str,
) -> Option<(&'d FieldDef, FilterCondition)> {
    for (suffix, op, end_of_day) in [
        ("_from", FilterOp::Gte, false),
        ("_to", FilterOp::Lte, true),
    ] {
        if let Some(base) = key.strip_suffix(suffix) {
            let field = descriptor.resolve(base)?;
            if !field.filterable || !field.field_type.is_temporal() {
                return None;
            }
            let filter_value = match field.field_type {
                FieldType::Date => FilterValue::Date(parse_date(value)?),
                _ => FilterValue::DateTime(parse_datetime(value, end_of_day)?),
            };
            return Some((field, FilterCondition::new(field.name, op, filter_value)));
        }
    }

    for (suffix, op) in [("_min", FilterOp::Gte), ("_max", FilterOp::Lte)] {
        if let Some(base) = key.strip_suffix(suffix) {
            let field = descriptor.resolve(base)?;
            if !field.filterable || !field.field_type.is_rangeable() {
                return None;
            }
            let filter_value = match field.field_type {
                FieldType::Integer => FilterValue::Integer(value.parse().ok()?),
                _ => FilterValue::Float(value.parse().ok()?),
            };
            return Some((field, FilterCondition::new(field.name, op, filter_value)));
        }
    }

    None
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Parse an RFC 3339 timestamp, or a bare date widened to the start or
/// end of that day.
fn parse_datetime(value: &str, end_of_day: bool) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }
    let date = parse_date(value)?;
    let time = if end_of_day {
        NaiveTime::from_hms_opt(23, 59, 59)?
    } else {
        NaiveTime::from_hms_opt(0, 0, 0)?
    };
    Some(DateTime::from_naive_utc_and_offset(date.and_time(time), Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use skinspire_entity::EntityRegistry;

    fn raw(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn descriptor(entity: &str) -> std::sync::Arc<EntityDescriptor> {
        EntityRegistry::builtin().get(entity).unwrap()
    }

    #[test]
    fn test_select_single_and_multi_value() {
        let desc = descriptor("suppliers");
        let out = process(&desc, &raw(&[("status", "active")]));
        assert_eq!(out.conditions.len(), 1);
        assert_eq!(out.conditions[0].op, FilterOp::Eq);

        let out = process(&desc, &raw(&[("status", "active,inactive")]));
        assert_eq!(out.conditions[0].op, FilterOp::In);
    }

    #[test]
    fn test_alias_resolves_to_canonical_name() {
        let desc = descriptor("suppliers");
        let out = process(&desc, &raw(&[("name", "acme")]));
        assert!(out.applied.contains("supplier_name"));
        assert_eq!(out.conditions[0].op, FilterOp::ILike);
    }

    #[test]
    fn test_unknown_and_reserved_keys_are_skipped() {
        let desc = descriptor("suppliers");
        let out = process(&desc, &raw(&[("page", "3"), ("bogus", "x")]));
        assert!(out.conditions.is_empty());
        assert!(!out.any_applied());
    }

    #[test]
    fn test_unparsable_uuid_is_skipped() {
        let desc = descriptor("supplier_invoices");
        let out = process(&desc, &raw(&[("supplier_id", "not-a-uuid")]));
        assert!(out.conditions.is_empty());
    }

    #[test]
    fn test_date_range_suffixes() {
        let desc = descriptor("supplier_invoices");
        let out = process(
            &desc,
            &raw(&[
                ("invoice_date_from", "2026-01-01"),
                ("invoice_date_to", "2026-03-31"),
            ]),
        );
        assert_eq!(out.conditions.len(), 2);
        assert_eq!(out.applied.len(), 1);
        assert!(out.applied.contains("invoice_date"));
        let ops: Vec<_> = out.conditions.iter().map(|c| c.op).collect();
        assert!(ops.contains(&FilterOp::Gte));
        assert!(ops.contains(&FilterOp::Lte));
    }

    #[test]
    fn test_numeric_range_suffixes() {
        let desc = descriptor("supplier_invoices");
        let out = process(&desc, &raw(&[("total_amount_min", "1000")]));
        assert_eq!(out.conditions.len(), 1);
        assert_eq!(out.conditions[0].op, FilterOp::Gte);
        assert_eq!(out.conditions[0].value, FilterValue::Float(1000.0));
    }

    #[test]
    fn test_bare_date_on_timestamp_bounds_the_day() {
        let desc = descriptor("suppliers");
        let out = process(&desc, &raw(&[("created_at", "2026-01-01")]));
        assert_eq!(out.conditions.len(), 2);
        assert_eq!(out.applied.len(), 1);
        let ops: Vec<_> = out.conditions.iter().map(|c| c.op).collect();
        assert!(ops.contains(&FilterOp::Gte));
        assert!(ops.contains(&FilterOp::Lte));
    }

    #[test]
    fn test_full_timestamp_matches_exactly() {
        let desc = descriptor("suppliers");
        let out = process(&desc, &raw(&[("created_at", "2026-01-01T10:30:00Z")]));
        assert_eq!(out.conditions.len(), 1);
        assert_eq!(out.conditions[0].op, FilterOp::Eq);
    }

    #[test]
    fn test_non_filterable_field_is_skipped() {
        let desc = descriptor("suppliers");
        // updated_at is declared but not filterable.
        let out = process(&desc, &raw(&[("updated_at", "2026-01-01")]));
        assert!(out.conditions.is_empty());
    }

    #[test]
    fn test_empty_values_are_skipped() {
        let desc = descriptor("suppliers");
        let out = process(&desc, &raw(&[("status", "  ")]));
        assert!(out.conditions.is_empty());
    }
}
