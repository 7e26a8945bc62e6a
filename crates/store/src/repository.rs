use crate::StoreError;
use chrono::Utc;
use core_types::{Chart, ChartUpdate, DataPoint, DataPointUpdate, NewChart, NewDataPoint};
use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Quotas applied when charts and data points are created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreLimits {
    pub max_charts_per_user: usize,
    pub max_points_per_chart: usize,
}

impl Default for StoreLimits {
    fn default() -> Self {
        Self {
            max_charts_per_user: 50,
            max_points_per_chart: 10_000,
        }
    }
}

/// A chart together with its points, kept in insertion order.
#[derive(Debug)]
struct ChartEntry {
    chart: Chart,
    /// Insertion sequence; breaks ties between charts created in the same instant.
    seq: u64,
    points: Vec<DataPoint>,
}

#[derive(Debug, Default)]
struct Inner {
    charts: HashMap<Uuid, ChartEntry>,
    next_seq: u64,
}

impl Inner {
    fn owned(&self, user_id: &str, chart_id: Uuid) -> Result<&ChartEntry, StoreError> {
        self.charts
            .get(&chart_id)
            .filter(|entry| entry.chart.user_id == user_id)
            .ok_or(StoreError::ChartNotFound(chart_id))
    }

    fn owned_mut(&mut self, user_id: &str, chart_id: Uuid) -> Result<&mut ChartEntry, StoreError> {
        self.charts
            .get_mut(&chart_id)
            .filter(|entry| entry.chart.user_id == user_id)
            .ok_or(StoreError::ChartNotFound(chart_id))
    }
}

/// The `ChartRepository` provides a high-level, application-specific interface
/// to the stored charts. Callers validate payloads before handing them over.
#[derive(Debug, Clone)]
pub struct ChartRepository {
    inner: Arc<RwLock<Inner>>,
    limits: StoreLimits,
}

impl ChartRepository {
    pub fn new(limits: StoreLimits) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            limits,
        }
    }

    pub fn limits(&self) -> StoreLimits {
        self.limits
    }

    // ==========================================================================
    // Charts
    // ==========================================================================

    pub async fn create_chart(&self, user_id: &str, new_chart: NewChart) -> Result<Chart, StoreError> {
        let mut inner = self.inner.write().await;

        let owned = inner
            .charts
            .values()
            .filter(|entry| entry.chart.user_id == user_id)
            .count();
        if owned >= self.limits.max_charts_per_user {
            return Err(StoreError::LimitExceeded(format!(
                "a user may own at most {} charts",
                self.limits.max_charts_per_user
            )));
        }

        let chart = Chart::new(user_id, new_chart, Utc::now());
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.charts.insert(
            chart.id,
            ChartEntry {
                chart: chart.clone(),
                seq,
                points: Vec::new(),
            },
        );

        tracing::info!(chart_id = %chart.id, user_id, "Chart created.");
        Ok(chart)
    }

    /// All charts owned by `user_id`, newest first.
    pub async fn list_charts(&self, user_id: &str) -> Vec<Chart> {
        let inner = self.inner.read().await;
        let mut entries: Vec<&ChartEntry> = inner
            .charts
            .values()
            .filter(|entry| entry.chart.user_id == user_id)
            .collect();
        entries.sort_by_key(|entry| (Reverse(entry.chart.created_at), Reverse(entry.seq)));
        entries.into_iter().map(|entry| entry.chart.clone()).collect()
    }

    pub async fn get_chart(&self, user_id: &str, chart_id: Uuid) -> Result<Chart, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.owned(user_id, chart_id)?.chart.clone())
    }

    pub async fn update_chart(
        &self,
        user_id: &str,
        chart_id: Uuid,
        update: ChartUpdate,
    ) -> Result<Chart, StoreError> {
        let mut inner = self.inner.write().await;
        let entry = inner.owned_mut(user_id, chart_id)?;
        entry.chart.apply(update, Utc::now());

        tracing::info!(%chart_id, user_id, "Chart updated.");
        Ok(entry.chart.clone())
    }

    /// Deletes a chart together with all of its data points.
    pub async fn delete_chart(&self, user_id: &str, chart_id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.owned(user_id, chart_id)?;
        if let Some(entry) = inner.charts.remove(&chart_id) {
            tracing::info!(%chart_id, user_id, points = entry.points.len(), "Chart deleted.");
        }
        Ok(())
    }

    // ==========================================================================
    // Data points
    // ==========================================================================

    pub async fn add_point(
        &self,
        user_id: &str,
        chart_id: Uuid,
        new_point: NewDataPoint,
    ) -> Result<DataPoint, StoreError> {
        let mut inner = self.inner.write().await;
        let entry = inner.owned_mut(user_id, chart_id)?;

        if entry.points.len() >= self.limits.max_points_per_chart {
            return Err(StoreError::LimitExceeded(format!(
                "a chart may hold at most {} data points",
                self.limits.max_points_per_chart
            )));
        }

        let point = DataPoint::new(chart_id, new_point, Utc::now());
        entry.points.push(point.clone());

        tracing::debug!(%chart_id, point_id = %point.id, "Data point added.");
        Ok(point)
    }

    /// The chart's points in ascending date order. Points sharing a date keep
    /// the order they were added in.
    pub async fn list_points(&self, user_id: &str, chart_id: Uuid) -> Result<Vec<DataPoint>, StoreError> {
        let inner = self.inner.read().await;
        let mut points = inner.owned(user_id, chart_id)?.points.clone();
        points.sort_by_key(|p| p.date);
        Ok(points)
    }

    pub async fn update_point(
        &self,
        user_id: &str,
        chart_id: Uuid,
        point_id: Uuid,
        update: DataPointUpdate,
    ) -> Result<DataPoint, StoreError> {
        let mut inner = self.inner.write().await;
        let entry = inner.owned_mut(user_id, chart_id)?;
        let point = entry
            .points
            .iter_mut()
            .find(|p| p.id == point_id)
            .ok_or(StoreError::DataPointNotFound(point_id))?;
        point.apply(update);

        tracing::debug!(%chart_id, %point_id, "Data point updated.");
        Ok(point.clone())
    }

    pub async fn delete_point(&self, user_id: &str, chart_id: Uuid, point_id: Uuid) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let entry = inner.owned_mut(user_id, chart_id)?;
        let index = entry
            .points
            .iter()
            .position(|p| p.id == point_id)
            .ok_or(StoreError::DataPointNotFound(point_id))?;
        entry.points.remove(index);

        tracing::debug!(%chart_id, %point_id, "Data point deleted.");
        Ok(())
    }
}

impl Default for ChartRepository {
    fn default() -> Self {
        Self::new(StoreLimits::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::ChartCategory;

    fn new_chart(name: &str) -> NewChart {
        NewChart {
            name: name.to_string(),
            category: ChartCategory::Health,
            description: None,
        }
    }

    fn new_point(day: u32, measurement: f64) -> NewDataPoint {
        NewDataPoint {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            measurement,
            label: None,
        }
    }

    #[tokio::test]
    async fn charts_are_scoped_to_their_owner() {
        let repo = ChartRepository::default();
        let chart = repo.create_chart("alice", new_chart("Weight")).await.unwrap();

        assert_eq!(repo.get_chart("alice", chart.id).await.unwrap(), chart);
        assert_eq!(
            repo.get_chart("bob", chart.id).await,
            Err(StoreError::ChartNotFound(chart.id))
        );
        assert!(repo.list_charts("bob").await.is_empty());
        assert_eq!(
            repo.delete_chart("bob", chart.id).await,
            Err(StoreError::ChartNotFound(chart.id))
        );
        assert!(repo.add_point("bob", chart.id, new_point(1, 1.0)).await.is_err());
    }

    #[tokio::test]
    async fn list_charts_returns_newest_first() {
        let repo = ChartRepository::default();
        let first = repo.create_chart("alice", new_chart("First")).await.unwrap();
        let second = repo.create_chart("alice", new_chart("Second")).await.unwrap();

        let ids: Vec<Uuid> = repo.list_charts("alice").await.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn update_chart_changes_fields() {
        let repo = ChartRepository::default();
        let chart = repo.create_chart("alice", new_chart("Weight")).await.unwrap();
        let updated = repo
            .update_chart(
                "alice",
                chart.id,
                ChartUpdate {
                    name: Some("Body weight".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Body weight");
        assert!(updated.updated_at >= chart.updated_at);
        assert_eq!(repo.get_chart("alice", chart.id).await.unwrap().name, "Body weight");
    }

    #[tokio::test]
    async fn points_are_listed_by_date_with_stable_ties() {
        let repo = ChartRepository::default();
        let chart = repo.create_chart("alice", new_chart("Weight")).await.unwrap();
        let late = repo.add_point("alice", chart.id, new_point(15, 69.2)).await.unwrap();
        let tie_a = repo.add_point("alice", chart.id, new_point(1, 70.5)).await.unwrap();
        let tie_b = repo.add_point("alice", chart.id, new_point(1, 70.1)).await.unwrap();

        let ids: Vec<Uuid> = repo
            .list_points("alice", chart.id)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![tie_a.id, tie_b.id, late.id]);
    }

    #[tokio::test]
    async fn update_and_delete_points() {
        let repo = ChartRepository::default();
        let chart = repo.create_chart("alice", new_chart("Steps")).await.unwrap();
        let point = repo.add_point("alice", chart.id, new_point(2, 4000.0)).await.unwrap();

        let updated = repo
            .update_point(
                "alice",
                chart.id,
                point.id,
                DataPointUpdate {
                    measurement: Some(5000.0),
                    label: Some("long walk".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.measurement, 5000.0);
        assert_eq!(updated.label.as_deref(), Some("long walk"));
        assert_eq!(updated.date, point.date);

        repo.delete_point("alice", chart.id, point.id).await.unwrap();
        assert!(repo.list_points("alice", chart.id).await.unwrap().is_empty());
        assert_eq!(
            repo.delete_point("alice", chart.id, point.id).await,
            Err(StoreError::DataPointNotFound(point.id))
        );
    }

    #[tokio::test]
    async fn deleting_a_chart_removes_its_points() {
        let repo = ChartRepository::default();
        let chart = repo.create_chart("alice", new_chart("Weight")).await.unwrap();
        repo.add_point("alice", chart.id, new_point(1, 1.0)).await.unwrap();

        repo.delete_chart("alice", chart.id).await.unwrap();
        assert_eq!(
            repo.list_points("alice", chart.id).await,
            Err(StoreError::ChartNotFound(chart.id))
        );
    }

    #[tokio::test]
    async fn limits_are_enforced() {
        let repo = ChartRepository::new(StoreLimits {
            max_charts_per_user: 1,
            max_points_per_chart: 2,
        });
        let chart = repo.create_chart("alice", new_chart("Only")).await.unwrap();
        assert!(matches!(
            repo.create_chart("alice", new_chart("Second")).await,
            Err(StoreError::LimitExceeded(_))
        ));
        // Quotas are per user.
        assert!(repo.create_chart("bob", new_chart("Bob's")).await.is_ok());

        repo.add_point("alice", chart.id, new_point(1, 1.0)).await.unwrap();
        repo.add_point("alice", chart.id, new_point(2, 2.0)).await.unwrap();
        assert!(matches!(
            repo.add_point("alice", chart.id, new_point(3, 3.0)).await,
            Err(StoreError::LimitExceeded(_))
        ));
    }
}
