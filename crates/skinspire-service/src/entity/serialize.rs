//! Display-name hydration for serialized rows.
//!
//! After rows are decoded, every declared foreign-key reference is
//! resolved to a human-readable display name with one batched lookup per
//! referenced table, never one query per row. Hydration is best-effort:
//! a failed lookup is logged and the affected display keys stay absent.

use std::collections::{HashMap, HashSet};

use serde_json::{Map, Value};
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;

use skinspire_entity::EntityDescriptor;
use skinspire_entity::catalog::field::Reference;

/// Hydrate display names for every referencing field, in place.
pub async fn hydrate_display_names(
    pool: &PgPool,
    descriptor: &EntityDescriptor,
    rows: &mut [Map<String, Value>],
) {
    for field in &descriptor.fields {
        let Some(reference) = field.reference else {
            continue;
        };

        let mut ids: HashSet<Uuid> = HashSet::new();
        for row in rows.iter() {
            if let Some(Value::String(raw)) = row.get(field.name) {
                if let Ok(id) = Uuid::parse_str(raw) {
                    ids.insert(id);
                }
            }
        }
        if ids.is_empty() {
            continue;
        }

        let names = match fetch_display_names(pool, &reference, ids.into_iter().collect()).await {
            Ok(names) => names,
            Err(e) => {
                warn!(
                    entity = descriptor.entity_type,
                    field = field.name,
                    target = reference.table,
                    error = %e,
                    "Display-name lookup failed, leaving rows unhydrated"
                );
                continue;
            }
        };

        let display_key = field.display_key();
        for row in rows.iter_mut() {
            let name = row
                .get(field.name)
                .and_then(Value::as_str)
                .and_then(|raw| Uuid::parse_str(raw).ok())
                .and_then(|id| names.get(&id));
            if let Some(name) = name {
                row.insert(display_key.clone(), Value::String(name.clone()));
            }
        }
    }
}

/// One batched lookup against the referenced table.
async fn fetch_display_names(
    pool: &PgPool,
    reference: &Reference,
    ids: Vec<Uuid>,
) -> sqlx::Result<HashMap<Uuid, String>> {
    // Table and column names come from static descriptor declarations.
    let sql = format!(
        "SELECT {key}, {display} FROM {table} WHERE {key} = ANY($1)",
        key = reference.key,
        display = reference.display,
        table = reference.table,
    );
    let pairs: Vec<(Uuid, String)> = sqlx::query_as(&sql).bind(&ids).fetch_all(pool).await?;
    Ok(pairs.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use skinspire_entity::EntityRegistry;

    #[test]
    fn test_invoice_descriptor_declares_supplier_reference() {
        let desc = EntityRegistry::builtin().get("supplier_invoices").unwrap();
        let field = desc.field("supplier_id").unwrap();
        let reference = field.reference.expect("supplier_id carries a reference");
        assert_eq!(reference.table, "suppliers");
        assert_eq!(reference.display, "supplier_name");
        assert_eq!(field.display_key(), "supplier_name");
    }
}
