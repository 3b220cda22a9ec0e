//! Supplier payment service.

use std::sync::Arc;

use serde_json::{Map, Value};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use skinspire_core::result::AppResult;
use skinspire_database::repositories::payment::PaymentRepository;
use skinspire_entity::payment::{RecordPayment, SupplierPayment};

use crate::context::TenantContext;
use crate::entity::envelope::{SearchEnvelope, SearchQuery};
use crate::entity::service::EntityService;

/// Payment recording layered over the universal entity service.
///
/// Holds a handle to the invoice entity service as well: recording a
/// payment mutates the invoice's balance and status, so both caches are
/// invalidated together.
#[derive(Clone)]
pub struct PaymentService {
    entity: Arc<EntityService>,
    invoices: Arc<EntityService>,
    repo: PaymentRepository,
}

impl PaymentService {
    pub fn new(entity: Arc<EntityService>, invoices: Arc<EntityService>, pool: PgPool) -> Self {
        Self {
            entity,
            invoices,
            repo: PaymentRepository::new(pool),
        }
    }

    /// List payments through the universal search pipeline.
    pub async fn search(&self, ctx: &TenantContext, query: &SearchQuery) -> SearchEnvelope {
        self.entity.search_data(ctx, query).await
    }

    /// Detail lookup through the universal pipeline.
    pub async fn get(&self, ctx: &TenantContext, id: Uuid) -> AppResult<Option<Map<String, Value>>> {
        self.entity.get_by_id(ctx, id).await
    }

    /// Record a payment against an invoice and settle the invoice state
    /// in the same transaction.
    pub async fn record(&self, ctx: &TenantContext, mut data: RecordPayment) -> AppResult<SupplierPayment> {
        let scope = ctx.scope()?;
        data.hospital_id = scope.hospital_id;
        data.branch_id = data.branch_id.or(scope.branch_id);

        let payment = self.repo.record(&data).await?;
        info!(
            payment_id = %payment.payment_id,
            invoice_id = %payment.invoice_id,
            amount = %payment.amount,
            "Payment recorded"
        );

        self.entity.invalidate(scope.hospital_id).await;
        self.invoices.invalidate(scope.hospital_id).await;
        Ok(payment)
    }
}
