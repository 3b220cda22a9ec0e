//! Per-entity summary hooks.
//!
//! Every search result carries an aggregate summary block. The default
//! hook produces counts common to all entities; the financial entities
//! override it to add amount aggregates over the filtered result set.

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Value};
use sqlx::PgPool;

use skinspire_core::error::{AppError, ErrorKind};
use skinspire_core::result::AppResult;
use skinspire_core::types::filter::FilterCondition;
use skinspire_database::query::QueryScope;
use skinspire_database::query::builder::SelectBuilder;
use skinspire_entity::EntityDescriptor;

/// Everything a summary hook may draw on.
pub struct SummaryContext<'a> {
    pub pool: &'a PgPool,
    pub descriptor: &'a EntityDescriptor,
    pub scope: QueryScope,
    pub conditions: &'a [FilterCondition],
    pub search_term: Option<&'a str>,
    /// Matching-row total already computed for pagination.
    pub total: u64,
    /// Whether any structured filter or search term narrowed the result.
    pub filters_applied: bool,
}

impl SummaryContext<'_> {
    /// Builder over the scoped base query (no search, no filters).
    fn scoped(&self) -> SelectBuilder<'_> {
        SelectBuilder::new(self.descriptor, self.scope)
    }

    /// Builder over the fully filtered query.
    fn filtered(&self) -> SelectBuilder<'_> {
        let mut builder =
            SelectBuilder::new(self.descriptor, self.scope).with_conditions(self.conditions.to_vec());
        if let Some(term) = self.search_term {
            builder = builder.with_search(term);
        }
        builder
    }

    /// Counts shared by every entity: the scoped total, the filtered
    /// count, and the per-status breakdown.
    async fn base_counts(&self) -> AppResult<Map<String, Value>> {
        let mut summary = Map::new();

        let total_count = self.scoped().fetch_count(self.pool).await?;
        summary.insert("total_count".to_string(), Value::from(total_count));
        summary.insert(
            "filtered_count".to_string(),
            filtered_count(self.filters_applied, self.total, total_count),
        );

        for (status, count) in self.scoped().fetch_status_counts(self.pool).await? {
            summary.insert(format!("{status}_count"), Value::from(count));
        }

        Ok(summary)
    }

    /// Run a caller-supplied aggregate select list over the filtered query.
    async fn fetch_aggregate<T>(&self, select_list: &str) -> AppResult<T>
    where
        T: Send + Unpin + for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow>,
    {
        self.filtered()
            .build_aggregate(select_list)
            .build_query_as::<T>()
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to aggregate {}", self.descriptor.entity_type),
                    e,
                )
            })
    }
}

/// A per-entity aggregate summary hook.
#[async_trait]
pub trait SummaryBuilder: Send + Sync {
    async fn build(&self, ctx: &SummaryContext<'_>) -> AppResult<Map<String, Value>>;
}

/// Counts only. Used by entities without monetary aggregates.
pub struct DefaultSummary;

#[async_trait]
impl SummaryBuilder for DefaultSummary {
    async fn build(&self, ctx: &SummaryContext<'_>) -> AppResult<Map<String, Value>> {
        ctx.base_counts().await
    }
}

/// Invoice amounts over the filtered result set.
pub struct InvoiceSummary;

#[async_trait]
impl SummaryBuilder for InvoiceSummary {
    async fn build(&self, ctx: &SummaryContext<'_>) -> AppResult<Map<String, Value>> {
        let mut summary = ctx.base_counts().await?;

        let (total, gst, balance): (Decimal, Decimal, Decimal) = ctx
            .fetch_aggregate(
                "COALESCE(SUM(total_amount), 0), \
                 COALESCE(SUM(cgst_amount + sgst_amount + igst_amount), 0), \
                 COALESCE(SUM(balance_amount), 0)",
            )
            .await?;

        summary.insert("total_amount_sum".to_string(), decimal_value(total));
        summary.insert("gst_amount_sum".to_string(), decimal_value(gst));
        summary.insert("balance_amount_sum".to_string(), decimal_value(balance));
        Ok(summary)
    }
}

/// Payment amounts, including a per-method breakdown.
pub struct PaymentSummary;

#[async_trait]
impl SummaryBuilder for PaymentSummary {
    async fn build(&self, ctx: &SummaryContext<'_>) -> AppResult<Map<String, Value>> {
        let mut summary = ctx.base_counts().await?;

        let (amount,): (Decimal,) = ctx.fetch_aggregate("COALESCE(SUM(amount), 0)").await?;
        summary.insert("amount_sum".to_string(), decimal_value(amount));

        let mut qb = ctx
            .filtered()
            .build_aggregate("payment_method, COALESCE(SUM(amount), 0)");
        qb.push(" GROUP BY payment_method");
        let rows: Vec<(String, Decimal)> = qb
            .build_query_as()
            .fetch_all(ctx.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    "Failed to aggregate payments by method",
                    e,
                )
            })?;

        let mut by_method = Map::new();
        for (method, amount) in rows {
            by_method.insert(method, decimal_value(amount));
        }
        summary.insert("amount_by_method".to_string(), Value::Object(by_method));
        Ok(summary)
    }
}

/// Stock health counts for the medicine catalog.
pub struct MedicineSummary;

#[async_trait]
impl SummaryBuilder for MedicineSummary {
    async fn build(&self, ctx: &SummaryContext<'_>) -> AppResult<Map<String, Value>> {
        let mut summary = ctx.base_counts().await?;

        let (low_stock,): (i64,) = ctx
            .fetch_aggregate("COUNT(*) FILTER (WHERE stock_quantity <= reorder_level)")
            .await?;
        summary.insert("low_stock_count".to_string(), Value::from(low_stock));
        Ok(summary)
    }
}

/// The summary hook registered for an entity type.
pub fn for_entity(entity_type: &str) -> Box<dyn SummaryBuilder> {
    match entity_type {
        "supplier_invoices" => Box::new(InvoiceSummary),
        "supplier_payments" => Box::new(PaymentSummary),
        "medicines" => Box::new(MedicineSummary),
        _ => Box::new(DefaultSummary),
    }
}

/// `filtered_count` mirrors the scoped total when nothing narrowed the
/// result, and reports the narrowed total otherwise.
fn filtered_count(filters_applied: bool, filtered_total: u64, total_count: u64) -> Value {
    if filters_applied {
        Value::from(filtered_total)
    } else {
        Value::from(total_count)
    }
}

fn decimal_value(value: Decimal) -> Value {
    Value::from(value.to_f64().unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filtered_count_mirrors_total_when_unfiltered() {
        assert_eq!(filtered_count(false, 42, 42), Value::from(42));
    }

    #[test]
    fn test_filtered_count_reports_narrowed_total() {
        assert_eq!(filtered_count(true, 7, 42), Value::from(7));
    }
}
