//! The universal entity service.
//!
//! One instance per entity type. `search_data` is the single entry point
//! for list queries and always returns the uniform envelope; `get_by_id`
//! serves detail lookups with a widened-scope fallback.

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use sqlx::PgPool;
use tracing::{debug, instrument, warn};

use skinspire_cache::keys;
use skinspire_cache::provider::{CacheManager, CacheProvider};
use skinspire_core::result::AppResult;
use skinspire_core::types::pagination::PageMeta;
use skinspire_database::query::QueryScope;
use skinspire_database::query::builder::SelectBuilder;
use skinspire_database::query::decode::row_to_json;
use skinspire_entity::EntityDescriptor;
use uuid::Uuid;

use super::envelope::{SearchEnvelope, SearchQuery};
use super::filters;
use super::serialize::hydrate_display_names;
use super::summary::{self, SummaryBuilder, SummaryContext};
use crate::context::TenantContext;

/// How long list envelopes stay cached.
const LIST_TTL: Duration = Duration::from_secs(120);
/// How long detail rows stay cached.
const DETAIL_TTL: Duration = Duration::from_secs(300);

/// Declarative search, filter, sort, paginate, and serialize behavior
/// for one entity type.
pub struct EntityService {
    descriptor: Arc<EntityDescriptor>,
    pool: PgPool,
    cache: Option<CacheManager>,
    summary: Box<dyn SummaryBuilder>,
}

impl EntityService {
    /// Build a service with the summary hook registered for the entity.
    pub fn new(descriptor: Arc<EntityDescriptor>, pool: PgPool, cache: Option<CacheManager>) -> Self {
        let summary = summary::for_entity(descriptor.entity_type);
        Self {
            descriptor,
            pool,
            cache,
            summary,
        }
    }

    /// The entity type this service answers for.
    pub fn entity_type(&self) -> &'static str {
        self.descriptor.entity_type
    }

    /// The descriptor this service is built over.
    pub fn descriptor(&self) -> &EntityDescriptor {
        &self.descriptor
    }

    /// Run a list query. Never returns an error: every failure, including
    /// a missing tenant, becomes the uniform failure envelope.
    #[instrument(skip(self, query), fields(entity = self.descriptor.entity_type))]
    pub async fn search_data(&self, ctx: &TenantContext, query: &SearchQuery) -> SearchEnvelope {
        let scope = match ctx.scope() {
            Ok(scope) => scope,
            Err(e) => return SearchEnvelope::failure(self.entity_type(), &query.page, e.message),
        };

        let cache_key = self.list_cache_key(&scope, query);
        if let Some(envelope) = self.cache_get::<SearchEnvelope>(&cache_key).await {
            debug!(key = %cache_key, "List cache hit");
            return envelope;
        }

        match self.run_search(scope, query).await {
            Ok(envelope) => {
                self.cache_put(&cache_key, &envelope, LIST_TTL).await;
                envelope
            }
            Err(e) => {
                warn!(entity = self.entity_type(), error = %e, "Search failed");
                SearchEnvelope::failure(self.entity_type(), &query.page, e.message)
            }
        }
    }

    /// The full query pipeline behind `search_data`.
    async fn run_search(&self, scope: QueryScope, query: &SearchQuery) -> AppResult<SearchEnvelope> {
        let processed = filters::process(&self.descriptor, &query.filters);
        let search_term = query
            .search_term
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());

        let mut builder = SelectBuilder::new(&self.descriptor, scope)
            .with_conditions(processed.conditions.clone())
            .with_sort(query.sort_by.as_deref(), query.sort_order)
            .with_page(query.page);
        if let Some(term) = search_term {
            builder = builder.with_search(term);
        }

        // Count before paginating so total_pages reflects the full match.
        let total = builder.fetch_count(&self.pool).await?;

        let mut items: Vec<Map<String, Value>> = builder
            .fetch_rows(&self.pool)
            .await?
            .iter()
            .map(|row| row_to_json(&self.descriptor, row))
            .collect();
        hydrate_display_names(&self.pool, &self.descriptor, &mut items).await;

        let summary_ctx = SummaryContext {
            pool: &self.pool,
            descriptor: &self.descriptor,
            scope,
            conditions: &processed.conditions,
            search_term,
            total,
            filters_applied: processed.any_applied() || search_term.is_some(),
        };
        let summary = self.summary.build(&summary_ctx).await?;

        let pagination = PageMeta::compute(&query.page, total);
        let applied = processed.applied.into_iter().collect();
        Ok(SearchEnvelope::success(
            self.entity_type(),
            items,
            pagination,
            summary,
            applied,
        ))
    }

    /// Fetch one row by primary key within the tenant scope.
    ///
    /// When the scoped lookup misses, the query is retried once with the
    /// widened scope (tenant only, deleted rows visible) so callers can
    /// still show archived or other-branch records by direct link.
    #[instrument(skip(self), fields(entity = self.descriptor.entity_type))]
    pub async fn get_by_id(&self, ctx: &TenantContext, id: Uuid) -> AppResult<Option<Map<String, Value>>> {
        let scope = ctx.scope()?;

        let cache_key = keys::entity_detail(self.entity_type(), scope.hospital_id, id);
        if let Some(row) = self.cache_get::<Map<String, Value>>(&cache_key).await {
            debug!(key = %cache_key, "Detail cache hit");
            return Ok(Some(row));
        }

        let mut row = SelectBuilder::new(&self.descriptor, scope)
            .with_pk(id)
            .fetch_optional(&self.pool)
            .await?;
        if row.is_none() && scope != scope.widened() {
            debug!(%id, "Scoped lookup missed, retrying with widened scope");
            row = SelectBuilder::new(&self.descriptor, scope.widened())
                .with_pk(id)
                .fetch_optional(&self.pool)
                .await?;
        }

        let Some(row) = row else {
            return Ok(None);
        };

        let mut items = vec![row_to_json(&self.descriptor, &row)];
        hydrate_display_names(&self.pool, &self.descriptor, &mut items).await;
        let item = items.remove(0);

        self.cache_put(&cache_key, &item, DETAIL_TTL).await;
        Ok(Some(item))
    }

    /// Drop every cached list and detail entry for this entity within a
    /// tenant. Called after any write.
    pub async fn invalidate(&self, hospital_id: Uuid) {
        let Some(cache) = &self.cache else {
            return;
        };
        for prefix in [
            keys::entity_list_prefix(self.entity_type(), hospital_id),
            keys::entity_detail_prefix(self.entity_type(), hospital_id),
        ] {
            if let Err(e) = cache.delete_prefix(&prefix).await {
                warn!(%prefix, error = %e, "Cache invalidation failed");
            }
        }
    }

    fn list_cache_key(&self, scope: &QueryScope, query: &SearchQuery) -> String {
        let branch = scope
            .branch_id
            .map(|b| b.to_string())
            .unwrap_or_else(|| "none".to_string());
        let canonical = query.canonical(&branch, scope.include_deleted);
        keys::entity_list(self.entity_type(), scope.hospital_id, keys::fingerprint(&canonical))
    }

    /// Best-effort cache read; failures are logged, never surfaced.
    async fn cache_get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> Option<T> {
        let cache = self.cache.as_ref()?;
        match cache.get_json(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(%key, error = %e, "Cache read failed");
                None
            }
        }
    }

    /// Best-effort cache write.
    async fn cache_put<T: serde::Serialize + Send + Sync>(&self, key: &str, value: &T, ttl: Duration) {
        let Some(cache) = &self.cache else {
            return;
        };
        if let Err(e) = cache.set_json(key, value, ttl).await {
            warn!(%key, error = %e, "Cache write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skinspire_entity::EntityRegistry;

    fn lazy_pool() -> PgPool {
        // Never actually connects; the tests below fail before any query.
        sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/skinspire_test")
            .unwrap()
    }

    fn service(entity: &str) -> EntityService {
        let descriptor = EntityRegistry::builtin().get(entity).unwrap();
        EntityService::new(descriptor, lazy_pool(), None)
    }

    #[tokio::test]
    async fn test_missing_hospital_yields_failure_envelope() {
        let service = service("suppliers");
        let env = service
            .search_data(&TenantContext::default(), &SearchQuery::default())
            .await;
        assert!(!env.success);
        assert_eq!(env.error.as_deref(), Some("Hospital ID required"));
        assert_eq!(env.entity_type, "suppliers");
        assert!(env.items.is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id_requires_hospital() {
        let service = service("suppliers");
        let err = service
            .get_by_id(&TenantContext::default(), Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.message, "Hospital ID required");
    }

    #[tokio::test]
    async fn test_list_cache_key_varies_with_query() {
        let service = service("suppliers");
        let scope = QueryScope::for_hospital(Uuid::nil());

        let a = service.list_cache_key(&scope, &SearchQuery::default());
        let mut query = SearchQuery::default();
        query.filters.insert("status".into(), "active".into());
        let b = service.list_cache_key(&scope, &query);

        assert_ne!(a, b);
        assert!(a.starts_with(&keys::entity_list_prefix("suppliers", Uuid::nil())));
    }
}
