//! Per-entity descriptor: table, keys, capabilities, and field catalog.

use serde::Serialize;

use super::field::{FieldDef, VirtualField};

/// Soft-delete capability, declared once per entity.
///
/// The legacy schema carried three competing flag names
/// (`is_deleted` / `deleted_flag` / `deleted`); here a descriptor names a
/// single authoritative flag column and its bookkeeping companions.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SoftDelete {
    /// Boolean flag column.
    pub flag: &'static str,
    /// Deletion timestamp column.
    pub deleted_at: &'static str,
    /// Deleting actor column.
    pub deleted_by: &'static str,
}

impl SoftDelete {
    /// The standard column set used by every SkinSpire table.
    pub fn standard() -> Self {
        Self {
            flag: "is_deleted",
            deleted_at: "deleted_at",
            deleted_by: "deleted_by",
        }
    }
}

/// Immutable description of one queryable entity type.
#[derive(Debug, Clone, Serialize)]
pub struct EntityDescriptor {
    /// Registry key, e.g. `"suppliers"`.
    pub entity_type: &'static str,
    /// Table name.
    pub table: &'static str,
    /// Primary-key column.
    pub primary_key: &'static str,
    /// Tenant (hospital) column. Every query is scoped by it.
    pub tenant_key: &'static str,
    /// Branch column, when the table is branch-scoped.
    pub branch_key: Option<&'static str>,
    /// Soft-delete capability, when the table supports it.
    pub soft_delete: Option<SoftDelete>,
    /// Status column used for the per-status summary breakdown.
    pub status_column: Option<&'static str>,
    /// Ordered field catalog.
    pub fields: Vec<FieldDef>,
    /// Values extracted from JSONB columns at read time.
    pub virtual_fields: Vec<VirtualField>,
}

impl EntityDescriptor {
    /// Look up a field by its exact column name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Resolve a raw filter key to a field, by name or alias.
    pub fn resolve(&self, key: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.matches_key(key))
    }

    /// Whether the table declares the given column.
    pub fn has_column(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Columns included in free-text search.
    pub fn searchable_columns(&self) -> Vec<&'static str> {
        self.fields
            .iter()
            .filter(|f| f.searchable)
            .map(|f| f.name)
            .collect()
    }

    /// Column used when the caller supplies no sort field: the first of
    /// `created_at`, `updated_at`, or the primary key that exists.
    pub fn default_sort_column(&self) -> &'static str {
        for candidate in ["created_at", "updated_at"] {
            if let Some(field) = self.field(candidate) {
                return field.name;
            }
        }
        self.primary_key
    }

    /// Validate a caller-supplied sort key, falling back to the default.
    /// Only declared column names ever reach SQL text.
    pub fn sort_column(&self, requested: Option<&str>) -> &'static str {
        requested
            .and_then(|key| self.resolve(key))
            .map(|f| f.name)
            .unwrap_or_else(|| self.default_sort_column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::field::FieldType;

    fn descriptor() -> EntityDescriptor {
        EntityDescriptor {
            entity_type: "widgets",
            table: "widgets",
            primary_key: "widget_id",
            tenant_key: "hospital_id",
            branch_key: None,
            soft_delete: Some(SoftDelete::standard()),
            status_column: None,
            fields: vec![
                FieldDef::new("widget_id", FieldType::Uuid),
                FieldDef::new("widget_name", FieldType::Text)
                    .searchable()
                    .filterable()
                    .aliases(&["name"]),
                FieldDef::new("updated_at", FieldType::DateTime),
            ],
            virtual_fields: vec![],
        }
    }

    #[test]
    fn test_resolve_by_alias() {
        let desc = descriptor();
        assert_eq!(desc.resolve("name").unwrap().name, "widget_name");
        assert!(desc.resolve("unknown").is_none());
    }

    #[test]
    fn test_default_sort_prefers_created_then_updated() {
        let desc = descriptor();
        // No created_at declared, falls through to updated_at.
        assert_eq!(desc.default_sort_column(), "updated_at");
    }

    #[test]
    fn test_descriptor_serializes_for_introspection() {
        let value = serde_json::to_value(descriptor()).expect("descriptor must serialize");
        assert_eq!(value["table"], "widgets");
        assert_eq!(value["fields"][1]["name"], "widget_name");
        assert_eq!(value["fields"][1]["aliases"][0], "name");
    }

    #[test]
    fn test_sort_column_rejects_undeclared_keys() {
        let desc = descriptor();
        assert_eq!(desc.sort_column(Some("widget_name")), "widget_name");
        assert_eq!(desc.sort_column(Some("1; DROP TABLE x")), "updated_at");
        assert_eq!(desc.sort_column(None), "updated_at");
    }
}
