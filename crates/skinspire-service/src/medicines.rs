//! Medicine inventory service.

use std::sync::Arc;

use serde_json::{Map, Value};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use skinspire_core::error::AppError;
use skinspire_core::result::AppResult;
use skinspire_database::repositories::medicine::MedicineRepository;
use skinspire_entity::medicine::{CreateMedicine, Medicine};

use crate::context::TenantContext;
use crate::entity::envelope::{SearchEnvelope, SearchQuery};
use crate::entity::service::EntityService;

/// Write paths for the medicine catalog.
#[derive(Clone)]
pub struct MedicineService {
    entity: Arc<EntityService>,
    repo: MedicineRepository,
}

impl MedicineService {
    pub fn new(entity: Arc<EntityService>, pool: PgPool) -> Self {
        Self {
            entity,
            repo: MedicineRepository::new(pool),
        }
    }

    /// List medicines through the universal search pipeline.
    pub async fn search(&self, ctx: &TenantContext, query: &SearchQuery) -> SearchEnvelope {
        self.entity.search_data(ctx, query).await
    }

    /// Detail lookup through the universal pipeline.
    pub async fn get(&self, ctx: &TenantContext, id: Uuid) -> AppResult<Option<Map<String, Value>>> {
        self.entity.get_by_id(ctx, id).await
    }

    /// Add a medicine to inventory.
    pub async fn create(&self, ctx: &TenantContext, mut data: CreateMedicine) -> AppResult<Medicine> {
        let scope = ctx.scope()?;
        data.hospital_id = scope.hospital_id;
        data.branch_id = data.branch_id.or(scope.branch_id);

        let medicine = self.repo.create(&data).await?;
        info!(medicine_id = %medicine.medicine_id, name = %medicine.medicine_name, "Medicine created");
        self.entity.invalidate(scope.hospital_id).await;
        Ok(medicine)
    }

    /// Soft-delete a medicine.
    pub async fn delete(&self, ctx: &TenantContext, id: Uuid) -> AppResult<()> {
        let scope = ctx.scope()?;
        let deleted = self.repo.soft_delete(scope.hospital_id, id, ctx.user_id).await?;
        if !deleted {
            return Err(AppError::not_found(format!("Medicine {id} not found")));
        }
        info!(medicine_id = %id, "Medicine deleted");
        self.entity.invalidate(scope.hospital_id).await;
        Ok(())
    }
}
