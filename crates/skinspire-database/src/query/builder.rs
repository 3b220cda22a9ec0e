//! Scoped SELECT builder for the universal entity service.

use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use skinspire_core::error::{AppError, ErrorKind};
use skinspire_core::result::AppResult;
use skinspire_core::types::filter::{FilterCondition, FilterOp, FilterValue};
use skinspire_core::types::pagination::PageRequest;
use skinspire_core::types::sorting::SortDirection;
use skinspire_entity::EntityDescriptor;

use super::QueryScope;

/// Builds tenant-scoped SELECT/COUNT statements for one entity type.
///
/// The builder mirrors the query pipeline of the entity service: base
/// scope first, then primary-key constraint, free-text search, structured
/// conditions, and finally sort and pagination on the row query only.
#[derive(Debug)]
pub struct SelectBuilder<'d> {
    descriptor: &'d EntityDescriptor,
    scope: QueryScope,
    pk_value: Option<Uuid>,
    search_term: Option<String>,
    conditions: Vec<FilterCondition>,
    sort_column: &'static str,
    sort_direction: SortDirection,
    page: Option<PageRequest>,
}

impl<'d> SelectBuilder<'d> {
    /// Start a builder over the descriptor's table with the given scope.
    pub fn new(descriptor: &'d EntityDescriptor, scope: QueryScope) -> Self {
        Self {
            descriptor,
            scope,
            pk_value: None,
            search_term: None,
            conditions: Vec::new(),
            sort_column: descriptor.default_sort_column(),
            sort_direction: SortDirection::Desc,
            page: None,
        }
    }

    /// Constrain to a single row by primary key.
    pub fn with_pk(mut self, id: Uuid) -> Self {
        self.pk_value = Some(id);
        self
    }

    /// Apply a free-text search term over the descriptor's searchable columns.
    /// Ignored when the term is blank or nothing is searchable.
    pub fn with_search(mut self, term: &str) -> Self {
        let term = term.trim();
        if !term.is_empty() && !self.descriptor.searchable_columns().is_empty() {
            self.search_term = Some(term.to_string());
        }
        self
    }

    /// Add structured filter conditions.
    pub fn with_conditions(mut self, conditions: Vec<FilterCondition>) -> Self {
        self.conditions = conditions;
        self
    }

    /// Sort by a caller-supplied key (validated against the descriptor,
    /// falling back to the default sort column) in the given direction.
    pub fn with_sort(mut self, requested: Option<&str>, direction: SortDirection) -> Self {
        self.sort_column = self.descriptor.sort_column(requested);
        self.sort_direction = direction;
        self
    }

    /// Apply offset pagination.
    pub fn with_page(mut self, page: PageRequest) -> Self {
        self.page = Some(page.clamped());
        self
    }

    /// Build the row query.
    pub fn build_select(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!("SELECT * FROM {}", self.descriptor.table));
        self.push_where(&mut qb);

        qb.push(format!(
            " ORDER BY {} {}",
            self.sort_column,
            self.sort_direction.as_sql()
        ));

        if let Some(page) = &self.page {
            qb.push(" LIMIT ");
            qb.push_bind(page.limit() as i64);
            qb.push(" OFFSET ");
            qb.push_bind(page.offset() as i64);
        }

        qb
    }

    /// Build the pre-pagination count query.
    pub fn build_count(&self) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", self.descriptor.table));
        self.push_where(&mut qb);
        qb
    }

    /// Build an aggregate over the fully filtered query (scope, search,
    /// and structured conditions; no sort or pagination). The select list
    /// is supplied by the caller and must reference declared columns only.
    pub fn build_aggregate(&self, select_list: &str) -> QueryBuilder<'static, Postgres> {
        let mut qb = QueryBuilder::new(format!(
            "SELECT {select_list} FROM {}",
            self.descriptor.table
        ));
        self.push_where(&mut qb);
        qb
    }

    /// Build the per-status breakdown over the scoped base query
    /// (scope only, no search or structured filters), when the entity
    /// declares a status column.
    pub fn build_status_counts(&self) -> Option<QueryBuilder<'static, Postgres>> {
        let status = self.descriptor.status_column?;
        let mut qb = QueryBuilder::new(format!(
            "SELECT {status}, COUNT(*) FROM {}",
            self.descriptor.table
        ));
        self.push_scope(&mut qb);
        qb.push(format!(" GROUP BY {status}"));
        Some(qb)
    }

    /// Execute the row query.
    pub async fn fetch_rows(&self, pool: &PgPool) -> AppResult<Vec<PgRow>> {
        self.build_select()
            .build()
            .fetch_all(pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to query {}", self.descriptor.entity_type),
                    e,
                )
            })
    }

    /// Execute the row query expecting at most one row.
    pub async fn fetch_optional(&self, pool: &PgPool) -> AppResult<Option<PgRow>> {
        self.build_select()
            .build()
            .fetch_optional(pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to query {}", self.descriptor.entity_type),
                    e,
                )
            })
    }

    /// Execute the count query.
    pub async fn fetch_count(&self, pool: &PgPool) -> AppResult<u64> {
        let count: i64 = self
            .build_count()
            .build_query_scalar()
            .fetch_one(pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to count {}", self.descriptor.entity_type),
                    e,
                )
            })?;
        Ok(count as u64)
    }

    /// Execute the per-status breakdown, if the entity declares a status column.
    pub async fn fetch_status_counts(&self, pool: &PgPool) -> AppResult<Vec<(String, i64)>> {
        let Some(mut qb) = self.build_status_counts() else {
            return Ok(Vec::new());
        };
        qb.build_query_as::<(String, i64)>()
            .fetch_all(pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Database,
                    format!("Failed to count {} by status", self.descriptor.entity_type),
                    e,
                )
            })
    }

    /// Tenant, branch, and soft-delete visibility clauses.
    fn push_scope(&self, qb: &mut QueryBuilder<'static, Postgres>) {
        qb.push(format!(" WHERE {} = ", self.descriptor.tenant_key));
        qb.push_bind(self.scope.hospital_id);

        if let (Some(branch_id), Some(branch_key)) = (self.scope.branch_id, self.descriptor.branch_key)
        {
            qb.push(format!(" AND {branch_key} = "));
            qb.push_bind(branch_id);
        }

        if let Some(soft_delete) = &self.descriptor.soft_delete {
            if !self.scope.include_deleted {
                qb.push(format!(" AND NOT {}", soft_delete.flag));
            }
        }
    }

    /// Full WHERE clause: scope, primary key, search, structured conditions.
    fn push_where(&self, qb: &mut QueryBuilder<'static, Postgres>) {
        self.push_scope(qb);

        if let Some(id) = self.pk_value {
            qb.push(format!(" AND {} = ", self.descriptor.primary_key));
            qb.push_bind(id);
        }

        if let Some(term) = &self.search_term {
            let pattern = format!("%{term}%");
            qb.push(" AND (");
            for (i, column) in self.descriptor.searchable_columns().iter().enumerate() {
                if i > 0 {
                    qb.push(" OR ");
                }
                qb.push(format!("{column} ILIKE "));
                qb.push_bind(pattern.clone());
            }
            qb.push(")");
        }

        for condition in &self.conditions {
            push_condition(qb, condition);
        }
    }
}

/// Append one structured filter condition.
fn push_condition(qb: &mut QueryBuilder<'static, Postgres>, condition: &FilterCondition) {
    let column = &condition.column;

    match (&condition.op, &condition.value) {
        (FilterOp::IsNull, _) => {
            qb.push(format!(" AND {column} IS NULL"));
        }
        (FilterOp::In, FilterValue::StringList(values)) => {
            qb.push(format!(" AND {column} = ANY("));
            qb.push_bind(values.clone());
            qb.push(")");
        }
        (op, value) => {
            let sql_op = match op {
                FilterOp::Eq => "=",
                FilterOp::Ne => "<>",
                FilterOp::Gte => ">=",
                FilterOp::Lte => "<=",
                FilterOp::ILike => "ILIKE",
                // IN with a non-list value degrades to equality.
                FilterOp::In => "=",
                FilterOp::IsNull => unreachable!(),
            };
            qb.push(format!(" AND {column} {sql_op} "));
            push_value(qb, value);
        }
    }
}

/// Bind a typed filter value.
fn push_value(qb: &mut QueryBuilder<'static, Postgres>, value: &FilterValue) {
    match value {
        FilterValue::String(v) => {
            qb.push_bind(v.clone());
        }
        FilterValue::Integer(v) => {
            qb.push_bind(*v);
        }
        FilterValue::Float(v) => {
            qb.push_bind(*v);
        }
        FilterValue::Boolean(v) => {
            qb.push_bind(*v);
        }
        FilterValue::Uuid(v) => {
            qb.push_bind(*v);
        }
        FilterValue::Date(v) => {
            qb.push_bind(*v);
        }
        FilterValue::DateTime(v) => {
            qb.push_bind(*v);
        }
        FilterValue::StringList(values) => {
            qb.push_bind(values.clone());
        }
        FilterValue::Null => {
            qb.push_bind(Option::<String>::None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skinspire_entity::EntityRegistry;

    fn scope() -> QueryScope {
        QueryScope::for_hospital(Uuid::nil())
    }

    fn supplier_builder(scope: QueryScope) -> (std::sync::Arc<EntityDescriptor>, QueryScope) {
        let registry = EntityRegistry::builtin();
        (registry.get("suppliers").unwrap(), scope)
    }

    #[test]
    fn test_base_query_scopes_tenant_and_soft_delete() {
        let (desc, scope) = supplier_builder(scope());
        let builder = SelectBuilder::new(&desc, scope);
        let sql = builder.build_select().sql().to_string();
        assert!(sql.starts_with("SELECT * FROM suppliers WHERE hospital_id = $1"));
        assert!(sql.contains("AND NOT is_deleted"));
        assert!(sql.contains("ORDER BY created_at DESC"));
    }

    #[test]
    fn test_include_deleted_drops_visibility_clause() {
        let (desc, mut scope) = supplier_builder(scope());
        scope.include_deleted = true;
        let builder = SelectBuilder::new(&desc, scope);
        let sql = builder.build_select().sql().to_string();
        assert!(!sql.contains("is_deleted"));
    }

    #[test]
    fn test_branch_filter_applied_only_when_supplied() {
        let (desc, mut scope) = supplier_builder(scope());
        let sql = SelectBuilder::new(&desc, scope).build_select().sql().to_string();
        assert!(!sql.contains("branch_id"));

        scope.branch_id = Some(Uuid::nil());
        let sql = SelectBuilder::new(&desc, scope).build_select().sql().to_string();
        assert!(sql.contains("AND branch_id = $2"));
    }

    #[test]
    fn test_search_is_a_disjunction_over_searchable_columns() {
        let (desc, scope) = supplier_builder(scope());
        let builder = SelectBuilder::new(&desc, scope).with_search("acme");
        let sql = builder.build_select().sql().to_string();
        assert!(sql.contains("(supplier_name ILIKE $2 OR gst_number ILIKE $3)"));
    }

    #[test]
    fn test_blank_search_is_ignored() {
        let (desc, scope) = supplier_builder(scope());
        let builder = SelectBuilder::new(&desc, scope).with_search("   ");
        let sql = builder.build_select().sql().to_string();
        assert!(!sql.contains("ILIKE"));
    }

    #[test]
    fn test_pagination_binds_limit_and_offset() {
        let (desc, scope) = supplier_builder(scope());
        let builder = SelectBuilder::new(&desc, scope).with_page(PageRequest::new(3, 10));
        let sql = builder.build_select().sql().to_string();
        assert!(sql.contains("LIMIT $2 OFFSET $3"));
    }

    #[test]
    fn test_count_query_has_no_pagination() {
        let (desc, scope) = supplier_builder(scope());
        let builder = SelectBuilder::new(&desc, scope).with_page(PageRequest::new(2, 10));
        let sql = builder.build_count().sql().to_string();
        assert!(sql.starts_with("SELECT COUNT(*) FROM suppliers"));
        assert!(!sql.contains("LIMIT"));
        assert!(!sql.contains("ORDER BY"));
    }

    #[test]
    fn test_conditions_render_with_operators() {
        let (desc, scope) = supplier_builder(scope());
        let builder = SelectBuilder::new(&desc, scope).with_conditions(vec![
            FilterCondition::eq("status", "active"),
            FilterCondition::new(
                "supplier_category",
                FilterOp::In,
                FilterValue::StringList(vec!["distributor".into(), "manufacturer".into()]),
            ),
        ]);
        let sql = builder.build_select().sql().to_string();
        assert!(sql.contains("AND status = $2"));
        assert!(sql.contains("AND supplier_category = ANY($3)"));
    }

    #[test]
    fn test_status_counts_ignore_filters() {
        let (desc, scope) = supplier_builder(scope());
        let builder = SelectBuilder::new(&desc, scope)
            .with_search("acme")
            .with_conditions(vec![FilterCondition::eq("status", "active")]);
        let sql = builder.build_status_counts().unwrap().sql().to_string();
        assert!(sql.contains("GROUP BY status"));
        assert!(!sql.contains("ILIKE"));
        assert!(!sql.contains("status = "));
    }

    #[test]
    fn test_aggregate_keeps_filters_and_drops_ordering() {
        let (desc, scope) = supplier_builder(scope());
        let builder = SelectBuilder::new(&desc, scope)
            .with_conditions(vec![FilterCondition::eq("status", "active")])
            .with_page(PageRequest::new(2, 10));
        let sql = builder.build_aggregate("COUNT(*)").sql().to_string();
        assert!(sql.starts_with("SELECT COUNT(*) FROM suppliers"));
        assert!(sql.contains("AND status = $2"));
        assert!(!sql.contains("LIMIT"));
        assert!(!sql.contains("ORDER BY"));
    }

    #[test]
    fn test_pk_constraint() {
        let (desc, scope) = supplier_builder(scope());
        let builder = SelectBuilder::new(&desc, scope).with_pk(Uuid::nil());
        let sql = builder.build_select().sql().to_string();
        assert!(sql.contains("AND supplier_id = $2"));
    }
}
