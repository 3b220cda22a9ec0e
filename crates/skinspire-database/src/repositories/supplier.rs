//! Supplier repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use skinspire_core::error::{AppError, ErrorKind};
use skinspire_core::result::AppResult;
use skinspire_entity::supplier::{CreateSupplier, Supplier};

/// Repository for supplier write operations.
#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: PgPool,
}

impl SupplierRepository {
    /// Create a new supplier repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a supplier by primary key within a tenant.
    pub async fn find_by_id(&self, hospital_id: Uuid, supplier_id: Uuid) -> AppResult<Option<Supplier>> {
        sqlx::query_as::<_, Supplier>(
            "SELECT * FROM suppliers WHERE hospital_id = $1 AND supplier_id = $2",
        )
        .bind(hospital_id)
        .bind(supplier_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find supplier", e))
    }

    /// Register a new supplier.
    pub async fn create(&self, data: &CreateSupplier) -> AppResult<Supplier> {
        sqlx::query_as::<_, Supplier>(
            "INSERT INTO suppliers \
               (hospital_id, branch_id, supplier_name, supplier_category, gst_number, contact_info) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING *",
        )
        .bind(data.hospital_id)
        .bind(data.branch_id)
        .bind(&data.supplier_name)
        .bind(&data.supplier_category)
        .bind(&data.gst_number)
        .bind(&data.contact_info)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("suppliers_hospital_name_key") =>
            {
                AppError::conflict(format!(
                    "Supplier '{}' already exists for this hospital",
                    data.supplier_name
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create supplier", e),
        })
    }

    /// Soft-delete a supplier. Returns false when no visible row matched.
    pub async fn soft_delete(
        &self,
        hospital_id: Uuid,
        supplier_id: Uuid,
        deleted_by: Option<Uuid>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE suppliers \
             SET is_deleted = TRUE, deleted_at = NOW(), deleted_by = $3, updated_at = NOW() \
             WHERE hospital_id = $1 AND supplier_id = $2 AND NOT is_deleted",
        )
        .bind(hospital_id)
        .bind(supplier_id)
        .bind(deleted_by)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete supplier", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Restore a soft-deleted supplier. Returns false when no deleted row matched.
    pub async fn restore(&self, hospital_id: Uuid, supplier_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE suppliers \
             SET is_deleted = FALSE, deleted_at = NULL, deleted_by = NULL, updated_at = NOW() \
             WHERE hospital_id = $1 AND supplier_id = $2 AND is_deleted",
        )
        .bind(hospital_id)
        .bind(supplier_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to restore supplier", e))?;

        Ok(result.rows_affected() > 0)
    }
}
