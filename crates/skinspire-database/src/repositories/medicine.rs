//! Medicine repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use skinspire_core::error::{AppError, ErrorKind};
use skinspire_core::result::AppResult;
use skinspire_entity::medicine::{CreateMedicine, Medicine};

/// Repository for medicine write operations.
#[derive(Debug, Clone)]
pub struct MedicineRepository {
    pool: PgPool,
}

impl MedicineRepository {
    /// Create a new medicine repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a medicine by primary key within a tenant.
    pub async fn find_by_id(&self, hospital_id: Uuid, medicine_id: Uuid) -> AppResult<Option<Medicine>> {
        sqlx::query_as::<_, Medicine>(
            "SELECT * FROM medicines WHERE hospital_id = $1 AND medicine_id = $2",
        )
        .bind(hospital_id)
        .bind(medicine_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find medicine", e))
    }

    /// Add a medicine to inventory.
    pub async fn create(&self, data: &CreateMedicine) -> AppResult<Medicine> {
        sqlx::query_as::<_, Medicine>(
            "INSERT INTO medicines \
               (hospital_id, branch_id, medicine_name, generic_name, category, hsn_code, \
                gst_rate, mrp, stock_quantity, reorder_level) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING *",
        )
        .bind(data.hospital_id)
        .bind(data.branch_id)
        .bind(&data.medicine_name)
        .bind(&data.generic_name)
        .bind(&data.category)
        .bind(&data.hsn_code)
        .bind(data.gst_rate)
        .bind(data.mrp)
        .bind(data.stock_quantity)
        .bind(data.reorder_level)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create medicine", e))
    }

    /// Soft-delete a medicine. Returns false when no visible row matched.
    pub async fn soft_delete(
        &self,
        hospital_id: Uuid,
        medicine_id: Uuid,
        deleted_by: Option<Uuid>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE medicines \
             SET is_deleted = TRUE, deleted_at = NOW(), deleted_by = $3, updated_at = NOW() \
             WHERE hospital_id = $1 AND medicine_id = $2 AND NOT is_deleted",
        )
        .bind(hospital_id)
        .bind(medicine_id)
        .bind(deleted_by)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete medicine", e))?;

        Ok(result.rows_affected() > 0)
    }
}
