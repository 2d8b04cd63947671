//! The tramo service.
//!
//! Glues the request inputs to the data:
//! 1.  Normalizes the province name into a boundary-file key.
//! 2.  Loads the province's segment identifiers from its boundary file.
//! 3.  Builds and runs the date + segments query against the traffic store.

use crate::domain::boundary::BoundaryLoader;
use crate::domain::province;
use crate::error::Result;
use crate::storage::query::build_segment_query;
use crate::storage::traffic::TrafficStore;
use serde_json::Value as JsonValue;
use std::sync::Arc;

pub struct TramoService {
    store: Arc<dyn TrafficStore>,
    boundaries: BoundaryLoader,
}

impl TramoService {
    pub fn new(store: Arc<dyn TrafficStore>, boundaries: BoundaryLoader) -> Self {
        Self { store, boundaries }
    }

    pub fn store(&self) -> &Arc<dyn TrafficStore> {
        &self.store
    }

    pub fn boundaries(&self) -> &BoundaryLoader {
        &self.boundaries
    }

    /// Segment identifiers of the province named `province` (raw user text).
    pub async fn province_segments(&self, province: &str) -> Result<Vec<String>> {
        let key = province::normalize(province);
        self.boundaries.load_segments(&key).await
    }

    /// Traffic records of `date` for every segment of `province`.
    pub async fn tramos_for_province(&self, date: &str, province: &str) -> Result<Vec<JsonValue>> {
        let segments = self.province_segments(province).await?;
        self.query_tramos(date, &segments).await
    }

    /// Traffic records of `date` for the given segments. An empty segment
    /// list never reaches the store.
    pub async fn query_tramos(&self, date: &str, segments: &[String]) -> Result<Vec<JsonValue>> {
        match build_segment_query(date, segments) {
            Some(query) => self.store.fetch_tramos(&query).await,
            None => Ok(Vec::new()),
        }
    }

    /// Distinct dates as `YYYY-MM-DD`, most recent first.
    pub async fn list_distinct_dates(&self) -> Result<Vec<String>> {
        let mut dates = self.store.distinct_dates().await?;
        dates.sort_unstable_by(|a, b| b.cmp(a));
        dates.dedup();
        Ok(dates
            .into_iter()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TramosError;
    use crate::storage::query::SegmentQuery;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingStore {
        calls: AtomicUsize,
        dates: Vec<NaiveDate>,
        fail: bool,
    }

    #[async_trait]
    impl TrafficStore for CountingStore {
        async fn fetch_tramos(&self, query: &SegmentQuery) -> Result<Vec<JsonValue>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(TramosError::StoreUnavailable(sqlx::Error::PoolTimedOut));
            }
            Ok(query
                .segments()
                .iter()
                .map(|s| json!({ "fecha": query.date(), "tramo": s }))
                .collect())
        }

        async fn distinct_dates(&self) -> Result<Vec<NaiveDate>> {
            if self.fail {
                return Err(TramosError::StoreUnavailable(sqlx::Error::PoolClosed));
            }
            Ok(self.dates.clone())
        }

        async fn ping(&self) -> Result<()> {
            Ok(())
        }
    }

    fn service(store: Arc<CountingStore>) -> TramoService {
        TramoService::new(store, BoundaryLoader::new("/nonexistent"))
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn empty_segments_skip_the_store() {
        let store = Arc::new(CountingStore::default());
        let rows = service(store.clone()).query_tramos("2024-01-01", &[]).await.unwrap();
        assert!(rows.is_empty());
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn segments_are_passed_through_to_the_store() {
        let store = Arc::new(CountingStore::default());
        let rows = service(store.clone())
            .query_tramos("2024-01-01", &["S1".to_string(), "S2".to_string()])
            .await
            .unwrap();
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], json!({ "fecha": "2024-01-01", "tramo": "S2" }));
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let store = Arc::new(CountingStore { fail: true, ..Default::default() });
        let svc = service(store);
        assert!(matches!(
            svc.query_tramos("2024-01-01", &["S1".to_string()]).await,
            Err(TramosError::StoreUnavailable(_))
        ));
        assert!(matches!(
            svc.list_distinct_dates().await,
            Err(TramosError::StoreUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn dates_come_back_descending_and_unique() {
        let store = Arc::new(CountingStore {
            dates: vec![ymd(2024, 1, 2), ymd(2024, 3, 1), ymd(2023, 12, 31), ymd(2024, 3, 1)],
            ..Default::default()
        });
        let dates = service(store).list_distinct_dates().await.unwrap();
        assert_eq!(dates, vec!["2024-03-01", "2024-01-02", "2023-12-31"]);
    }

    #[tokio::test]
    async fn unknown_province_is_not_found() {
        let store = Arc::new(CountingStore::default());
        let err = service(store.clone())
            .tramos_for_province("2024-01-01", "Atlántida")
            .await
            .unwrap_err();
        match err {
            TramosError::BoundaryNotFound { key, .. } => assert_eq!(key, "Atlantida"),
            other => panic!("expected BoundaryNotFound, got {:?}", other),
        }
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }
}
