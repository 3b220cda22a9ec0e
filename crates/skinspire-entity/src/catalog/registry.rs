//! Startup-built registry of entity descriptors.

use std::collections::HashMap;
use std::sync::Arc;

use super::descriptor::{EntityDescriptor, SoftDelete};
use super::field::{FieldDef, FieldType, Reference, VirtualField};

/// Reference from a child row to its supplier.
const SUPPLIER_REF: Reference = Reference {
    entity: "suppliers",
    table: "suppliers",
    key: "supplier_id",
    display: "supplier_name",
};

/// Reference from a payment to the invoice it settles.
const INVOICE_REF: Reference = Reference {
    entity: "supplier_invoices",
    table: "supplier_invoices",
    key: "invoice_id",
    display: "invoice_number",
};

/// Immutable lookup table of entity descriptors, keyed by entity type.
///
/// Built once during startup and passed by `Arc` to everything that needs
/// it; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct EntityRegistry {
    entities: HashMap<&'static str, Arc<EntityDescriptor>>,
}

impl EntityRegistry {
    /// Build a registry from a list of descriptors.
    pub fn new(descriptors: Vec<EntityDescriptor>) -> Self {
        let entities = descriptors
            .into_iter()
            .map(|d| (d.entity_type, Arc::new(d)))
            .collect();
        Self { entities }
    }

    /// Build the registry with all built-in SkinSpire entities.
    pub fn builtin() -> Self {
        Self::new(vec![
            suppliers(),
            medicines(),
            supplier_invoices(),
            supplier_payments(),
        ])
    }

    /// Look up a descriptor by entity type.
    pub fn get(&self, entity_type: &str) -> Option<Arc<EntityDescriptor>> {
        self.entities.get(entity_type).cloned()
    }

    /// All registered entity type names, sorted.
    pub fn entity_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entities.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

fn suppliers() -> EntityDescriptor {
    EntityDescriptor {
        entity_type: "suppliers",
        table: "suppliers",
        primary_key: "supplier_id",
        tenant_key: "hospital_id",
        branch_key: Some("branch_id"),
        soft_delete: Some(SoftDelete::standard()),
        status_column: Some("status"),
        fields: vec![
            FieldDef::new("supplier_id", FieldType::Uuid),
            FieldDef::new("hospital_id", FieldType::Uuid),
            FieldDef::new("branch_id", FieldType::Uuid),
            FieldDef::new("supplier_name", FieldType::Text)
                .searchable()
                .filterable()
                .aliases(&["name"]),
            FieldDef::new("supplier_category", FieldType::Select)
                .filterable()
                .aliases(&["category"]),
            FieldDef::new("gst_number", FieldType::Text)
                .searchable()
                .filterable(),
            FieldDef::new("status", FieldType::Select).filterable(),
            FieldDef::new("created_at", FieldType::DateTime).filterable(),
            FieldDef::new("updated_at", FieldType::DateTime),
        ],
        virtual_fields: vec![
            VirtualField {
                name: "contact_email",
                column: "contact_info",
                key: "email",
            },
            VirtualField {
                name: "contact_phone",
                column: "contact_info",
                key: "phone",
            },
        ],
    }
}

fn medicines() -> EntityDescriptor {
    EntityDescriptor {
        entity_type: "medicines",
        table: "medicines",
        primary_key: "medicine_id",
        tenant_key: "hospital_id",
        branch_key: Some("branch_id"),
        soft_delete: Some(SoftDelete::standard()),
        status_column: Some("status"),
        fields: vec![
            FieldDef::new("medicine_id", FieldType::Uuid),
            FieldDef::new("hospital_id", FieldType::Uuid),
            FieldDef::new("branch_id", FieldType::Uuid),
            FieldDef::new("medicine_name", FieldType::Text)
                .searchable()
                .filterable()
                .aliases(&["name"]),
            FieldDef::new("generic_name", FieldType::Text)
                .searchable()
                .filterable(),
            FieldDef::new("category", FieldType::Select).filterable(),
            FieldDef::new("hsn_code", FieldType::Text)
                .searchable()
                .filterable(),
            FieldDef::new("gst_rate", FieldType::Percentage).filterable(),
            FieldDef::new("mrp", FieldType::Currency).filterable(),
            FieldDef::new("stock_quantity", FieldType::Integer).filterable(),
            FieldDef::new("reorder_level", FieldType::Integer),
            FieldDef::new("status", FieldType::Select).filterable(),
            FieldDef::new("created_at", FieldType::DateTime).filterable(),
            FieldDef::new("updated_at", FieldType::DateTime),
        ],
        virtual_fields: vec![],
    }
}

fn supplier_invoices() -> EntityDescriptor {
    EntityDescriptor {
        entity_type: "supplier_invoices",
        table: "supplier_invoices",
        primary_key: "invoice_id",
        tenant_key: "hospital_id",
        branch_key: Some("branch_id"),
        soft_delete: Some(SoftDelete::standard()),
        status_column: Some("status"),
        fields: vec![
            FieldDef::new("invoice_id", FieldType::Uuid),
            FieldDef::new("hospital_id", FieldType::Uuid),
            FieldDef::new("branch_id", FieldType::Uuid),
            FieldDef::new("supplier_id", FieldType::Uuid)
                .filterable()
                .aliases(&["supplier"])
                .reference(SUPPLIER_REF),
            FieldDef::new("invoice_number", FieldType::Text)
                .searchable()
                .filterable(),
            FieldDef::new("invoice_date", FieldType::Date).filterable(),
            FieldDef::new("total_amount", FieldType::Currency).filterable(),
            FieldDef::new("cgst_amount", FieldType::Currency),
            FieldDef::new("sgst_amount", FieldType::Currency),
            FieldDef::new("igst_amount", FieldType::Currency),
            FieldDef::new("paid_amount", FieldType::Currency),
            FieldDef::new("balance_amount", FieldType::Currency).filterable(),
            FieldDef::new("status", FieldType::Select).filterable(),
            FieldDef::new("created_at", FieldType::DateTime).filterable(),
            FieldDef::new("updated_at", FieldType::DateTime),
        ],
        virtual_fields: vec![],
    }
}

fn supplier_payments() -> EntityDescriptor {
    EntityDescriptor {
        entity_type: "supplier_payments",
        table: "supplier_payments",
        primary_key: "payment_id",
        tenant_key: "hospital_id",
        branch_key: Some("branch_id"),
        soft_delete: Some(SoftDelete::standard()),
        status_column: Some("status"),
        fields: vec![
            FieldDef::new("payment_id", FieldType::Uuid),
            FieldDef::new("hospital_id", FieldType::Uuid),
            FieldDef::new("branch_id", FieldType::Uuid),
            FieldDef::new("supplier_id", FieldType::Uuid)
                .filterable()
                .aliases(&["supplier"])
                .reference(SUPPLIER_REF),
            FieldDef::new("invoice_id", FieldType::Uuid)
                .filterable()
                .aliases(&["invoice"])
                .reference(INVOICE_REF),
            FieldDef::new("payment_date", FieldType::Date).filterable(),
            FieldDef::new("amount", FieldType::Currency).filterable(),
            FieldDef::new("payment_method", FieldType::Select)
                .filterable()
                .aliases(&["method"]),
            FieldDef::new("reference_no", FieldType::Text)
                .searchable()
                .filterable(),
            FieldDef::new("status", FieldType::Select).filterable(),
            FieldDef::new("notes", FieldType::Textarea).searchable(),
            FieldDef::new("created_at", FieldType::DateTime).filterable(),
            FieldDef::new("updated_at", FieldType::DateTime),
        ],
        virtual_fields: vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_contains_all_entities() {
        let registry = EntityRegistry::builtin();
        assert_eq!(
            registry.entity_types(),
            vec![
                "medicines",
                "supplier_invoices",
                "supplier_payments",
                "suppliers"
            ]
        );
    }

    #[test]
    fn test_supplier_descriptor_shape() {
        let registry = EntityRegistry::builtin();
        let desc = registry.get("suppliers").unwrap();
        assert_eq!(desc.primary_key, "supplier_id");
        assert!(desc.soft_delete.is_some());
        assert_eq!(
            desc.searchable_columns(),
            vec!["supplier_name", "gst_number"]
        );
        assert_eq!(desc.virtual_fields.len(), 2);
    }

    #[test]
    fn test_invoice_supplier_reference_is_explicit() {
        let registry = EntityRegistry::builtin();
        let desc = registry.get("supplier_invoices").unwrap();
        let field = desc.field("supplier_id").unwrap();
        let reference = field.reference.expect("supplier_id must carry a reference");
        assert_eq!(reference.table, "suppliers");
        assert_eq!(reference.display, "supplier_name");
    }

    #[test]
    fn test_unknown_entity_returns_none() {
        let registry = EntityRegistry::builtin();
        assert!(registry.get("patients").is_none());
    }
}
