//! Traffic record store: the trait the service depends on and its
//! PostgreSQL implementation.

use crate::error::Result;
use crate::infra::config::DatabaseConfig;
use crate::storage::query::{SegmentQuery, DISTINCT_DATES_SQL};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value as JsonValue;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};

/// Read access to the traffic table.
#[async_trait]
pub trait TrafficStore: Send + Sync {
    /// Runs a built segment query and returns each row as an opaque JSON object.
    async fn fetch_tramos(&self, query: &SegmentQuery) -> Result<Vec<JsonValue>>;

    /// Every distinct date present in the table.
    async fn distinct_dates(&self) -> Result<Vec<NaiveDate>>;

    /// Cheap connectivity check.
    async fn ping(&self) -> Result<()>;
}

/// A `TrafficStore` backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgTrafficStore {
    pool: PgPool,
}

impl PgTrafficStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool using the resolved database configuration.
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(config.connect_options()?)
            .await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TrafficStore for PgTrafficStore {
    async fn fetch_tramos(&self, query: &SegmentQuery) -> Result<Vec<JsonValue>> {
        let mut q = sqlx::query(&query.sql);
        for param in &query.params {
            q = q.bind(param.as_str());
        }
        let rows = q.fetch_all(&self.pool).await?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let record: JsonValue = row.try_get("record")?;
            records.push(record);
        }
        tracing::debug!(
            date = query.date(),
            segments = query.placeholder_count(),
            rows = records.len(),
            "Fetched tramos"
        );
        Ok(records)
    }

    async fn distinct_dates(&self) -> Result<Vec<NaiveDate>> {
        let dates = sqlx::query_scalar::<_, NaiveDate>(DISTINCT_DATES_SQL)
            .fetch_all(&self.pool)
            .await?;
        Ok(dates)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
