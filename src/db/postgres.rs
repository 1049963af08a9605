//! PostgreSQL driver over a sqlx pool.

use super::{Database, RawRow, RawValue};
use crate::error::AppError;
use crate::sql::{bind_value, QueryBuf};
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgRow, Postgres};
use sqlx::query::Query;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgDatabase {
    pool: PgPool,
}

impl PgDatabase {
    pub fn new(pool: PgPool) -> Self {
        PgDatabase { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn build(q: &QueryBuf) -> Query<'_, Postgres, PgArguments> {
    let mut query = sqlx::query(&q.sql);
    for p in &q.params {
        query = bind_value(query, p);
    }
    query
}

#[async_trait]
impl Database for PgDatabase {
    async fn fetch_all(&self, q: &QueryBuf) -> Result<Vec<RawRow>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = build(q).fetch_all(&self.pool).await?;
        Ok(rows.iter().map(row_to_raw).collect())
    }

    async fn fetch_optional(&self, q: &QueryBuf) -> Result<Option<RawRow>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = build(q).fetch_optional(&self.pool).await?;
        Ok(row.as_ref().map(row_to_raw))
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let result = build(q).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

fn row_to_raw(row: &PgRow) -> RawRow {
    use sqlx::Column;
    use sqlx::TypeInfo;
    use sqlx::Row;
    let mut out = RawRow::new();
    for col in row.columns() {
        let name = col.name();
        out.push(name, cell_to_raw(row, name, &col.type_info().name().to_ascii_lowercase()));
    }
    out
}

/// Decodes the scalar types the entities use. Any other non-null value comes
/// back as `Unsupported` so conversion fails instead of reading as NULL.
fn cell_to_raw(row: &PgRow, name: &str, type_name: &str) -> RawValue {
    use sqlx::Row;
    use sqlx::ValueRef;
    match row.try_get_raw(name) {
        Ok(v) if v.is_null() => return RawValue::Null,
        Err(_) => return RawValue::Unsupported(type_name.to_string()),
        Ok(_) => {}
    }
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return RawValue::Int(n);
    }
    if let Ok(Some(n)) = row.try_get::<Option<i32>, _>(name) {
        return RawValue::Int(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<i16>, _>(name) {
        return RawValue::Int(n.into());
    }
    if let Ok(Some(n)) = row.try_get::<Option<f64>, _>(name) {
        return RawValue::Float(n);
    }
    if let Ok(Some(n)) = row.try_get::<Option<f32>, _>(name) {
        return RawValue::Float(n.into());
    }
    if let Ok(Some(b)) = row.try_get::<Option<bool>, _>(name) {
        return RawValue::Bool(b);
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return RawValue::Text(s);
    }
    if let Ok(Some(j)) = row.try_get::<Option<serde_json::Value>, _>(name) {
        return RawValue::Json(j);
    }
    RawValue::Unsupported(type_name.to_string())
}
