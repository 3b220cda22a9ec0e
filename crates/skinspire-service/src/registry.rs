//! Startup wiring of entity services.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;

use skinspire_cache::provider::CacheManager;
use skinspire_core::error::AppError;
use skinspire_core::result::AppResult;
use skinspire_entity::EntityRegistry;

use crate::entity::service::EntityService;
use crate::medicines::MedicineService;
use crate::payments::PaymentService;
use crate::suppliers::SupplierService;

/// Every service the application exposes, built once at startup.
#[derive(Clone)]
pub struct ServiceRegistry {
    entities: HashMap<&'static str, Arc<EntityService>>,
    pub suppliers: SupplierService,
    pub medicines: MedicineService,
    pub payments: PaymentService,
}

impl ServiceRegistry {
    /// Wire one [`EntityService`] per registered entity plus the concrete
    /// write-path services.
    pub fn build(
        registry: &EntityRegistry,
        pool: PgPool,
        cache: Option<CacheManager>,
    ) -> AppResult<Self> {
        let mut entities = HashMap::new();
        for entity_type in registry.entity_types() {
            let descriptor = registry
                .get(entity_type)
                .ok_or_else(|| AppError::configuration(format!("Missing descriptor: {entity_type}")))?;
            let service = Arc::new(EntityService::new(descriptor, pool.clone(), cache.clone()));
            entities.insert(entity_type, service);
        }

        let entity = |name: &str| -> AppResult<Arc<EntityService>> {
            entities
                .get(name)
                .cloned()
                .ok_or_else(|| AppError::configuration(format!("Entity not registered: {name}")))
        };

        let suppliers = SupplierService::new(entity("suppliers")?, pool.clone());
        let medicines = MedicineService::new(entity("medicines")?, pool.clone());
        let payments = PaymentService::new(
            entity("supplier_payments")?,
            entity("supplier_invoices")?,
            pool,
        );

        Ok(Self {
            entities,
            suppliers,
            medicines,
            payments,
        })
    }

    /// The universal service for an entity type, if registered.
    pub fn entity(&self, entity_type: &str) -> Option<Arc<EntityService>> {
        self.entities.get(entity_type).cloned()
    }

    /// All registered entity type names, sorted.
    pub fn entity_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entities.keys().copied().collect();
        names.sort_unstable();
        names
    }
}
