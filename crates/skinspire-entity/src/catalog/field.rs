//! Field-level entity configuration.

use serde::{Deserialize, Serialize};

/// The declared type of an entity field.
///
/// Drives filter parsing, row serialization, and display hydration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Free text.
    Text,
    /// Longer free text (serialized identically to `Text`).
    Textarea,
    /// Constrained string value (status, category, payment method).
    Select,
    /// UUID column.
    Uuid,
    /// Calendar date.
    Date,
    /// Timestamp with timezone.
    DateTime,
    /// Integer count or quantity.
    Integer,
    /// Arbitrary decimal.
    Decimal,
    /// Monetary amount.
    Currency,
    /// Percentage (e.g. GST rate).
    Percentage,
    /// Boolean flag.
    Boolean,
}

impl FieldType {
    /// Whether this type is serialized as a float with a 0.0 null default.
    pub fn is_numericish(&self) -> bool {
        matches!(self, Self::Decimal | Self::Currency | Self::Percentage)
    }

    /// Whether this type supports `_from`/`_to` range filters.
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }

    /// Whether this type supports `_min`/`_max` range filters.
    pub fn is_rangeable(&self) -> bool {
        self.is_numericish() || matches!(self, Self::Integer)
    }
}

/// A statically declared foreign-key relationship.
///
/// Replaces name-convention pluralization: the target table, key, and
/// display column are spelled out at descriptor definition time.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Reference {
    /// Entity type name of the target (as registered).
    pub entity: &'static str,
    /// Target table name.
    pub table: &'static str,
    /// Target key column.
    pub key: &'static str,
    /// Column on the target used as the display name.
    pub display: &'static str,
}

/// A value derived from a JSONB column at read time.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct VirtualField {
    /// Name the value is exposed under in serialized rows.
    pub name: &'static str,
    /// JSONB source column.
    pub column: &'static str,
    /// Top-level key inside the JSONB object.
    pub key: &'static str,
}

/// A single field in an entity's catalog.
///
/// Built once at startup from `&'static` declarations, so the catalog
/// types serialize (for introspection) but are never deserialized.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDef {
    /// Column name.
    pub name: &'static str,
    /// Declared type.
    pub field_type: FieldType,
    /// Whether structured filters may target this field.
    pub filterable: bool,
    /// Whether free-text search includes this field.
    pub searchable: bool,
    /// Alternate filter keys accepted for this field.
    pub aliases: &'static [&'static str],
    /// Foreign-key relationship, if any.
    pub reference: Option<Reference>,
}

impl FieldDef {
    /// Declare a plain field.
    pub fn new(name: &'static str, field_type: FieldType) -> Self {
        Self {
            name,
            field_type,
            filterable: false,
            searchable: false,
            aliases: &[],
            reference: None,
        }
    }

    /// Mark the field filterable.
    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    /// Mark the field searchable.
    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    /// Accept alternate filter keys.
    pub fn aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    /// Attach a foreign-key reference.
    pub fn reference(mut self, reference: Reference) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Whether a raw filter key names this field directly or via alias.
    pub fn matches_key(&self, key: &str) -> bool {
        self.name == key || self.aliases.contains(&key)
    }

    /// The key a hydrated display name is exposed under
    /// (`supplier_id` becomes `supplier_name`).
    pub fn display_key(&self) -> String {
        match self.name.strip_suffix("_id") {
            Some(stem) => format!("{stem}_name"),
            None => format!("{}_name", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_key_by_alias() {
        let field = FieldDef::new("supplier_name", FieldType::Text)
            .filterable()
            .aliases(&["name"]);
        assert!(field.matches_key("supplier_name"));
        assert!(field.matches_key("name"));
        assert!(!field.matches_key("supplier"));
    }

    #[test]
    fn test_display_key_strips_id_suffix() {
        let field = FieldDef::new("supplier_id", FieldType::Uuid);
        assert_eq!(field.display_key(), "supplier_name");
        let field = FieldDef::new("status", FieldType::Select);
        assert_eq!(field.display_key(), "status_name");
    }

    #[test]
    fn test_type_categories() {
        assert!(FieldType::Currency.is_numericish());
        assert!(FieldType::Date.is_temporal());
        assert!(FieldType::Integer.is_rangeable());
        assert!(!FieldType::Text.is_rangeable());
    }
}
