//! Supplier master-data service.

use std::sync::Arc;

use serde_json::{Map, Value};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use skinspire_core::error::AppError;
use skinspire_core::result::AppResult;
use skinspire_database::repositories::supplier::SupplierRepository;
use skinspire_entity::supplier::{CreateSupplier, Supplier};

use crate::context::TenantContext;
use crate::entity::envelope::{SearchEnvelope, SearchQuery};
use crate::entity::service::EntityService;

/// Write paths for suppliers, layered over the universal entity service.
#[derive(Clone)]
pub struct SupplierService {
    entity: Arc<EntityService>,
    repo: SupplierRepository,
}

impl SupplierService {
    pub fn new(entity: Arc<EntityService>, pool: PgPool) -> Self {
        Self {
            entity,
            repo: SupplierRepository::new(pool),
        }
    }

    /// List suppliers through the universal search pipeline.
    pub async fn search(&self, ctx: &TenantContext, query: &SearchQuery) -> SearchEnvelope {
        self.entity.search_data(ctx, query).await
    }

    /// Detail lookup through the universal pipeline.
    pub async fn get(&self, ctx: &TenantContext, id: Uuid) -> AppResult<Option<Map<String, Value>>> {
        self.entity.get_by_id(ctx, id).await
    }

    /// Register a supplier. The tenant always comes from the context,
    /// never from the payload.
    pub async fn create(&self, ctx: &TenantContext, mut data: CreateSupplier) -> AppResult<Supplier> {
        let scope = ctx.scope()?;
        data.hospital_id = scope.hospital_id;
        data.branch_id = data.branch_id.or(scope.branch_id);

        let supplier = self.repo.create(&data).await?;
        info!(supplier_id = %supplier.supplier_id, name = %supplier.supplier_name, "Supplier created");
        self.entity.invalidate(scope.hospital_id).await;
        Ok(supplier)
    }

    /// Soft-delete a supplier.
    pub async fn delete(&self, ctx: &TenantContext, id: Uuid) -> AppResult<()> {
        let scope = ctx.scope()?;
        let deleted = self.repo.soft_delete(scope.hospital_id, id, ctx.user_id).await?;
        if !deleted {
            return Err(AppError::not_found(format!("Supplier {id} not found")));
        }
        info!(supplier_id = %id, "Supplier deleted");
        self.entity.invalidate(scope.hospital_id).await;
        Ok(())
    }

    /// Restore a soft-deleted supplier.
    pub async fn restore(&self, ctx: &TenantContext, id: Uuid) -> AppResult<()> {
        let scope = ctx.scope()?;
        let restored = self.repo.restore(scope.hospital_id, id).await?;
        if !restored {
            return Err(AppError::not_found(format!(
                "Supplier {id} not found or not deleted"
            )));
        }
        info!(supplier_id = %id, "Supplier restored");
        self.entity.invalidate(scope.hospital_id).await;
        Ok(())
    }
}
