use crate::enums::ChartCategory;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named, categorized collection of data points belonging to one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    pub category: ChartCategory,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Chart {
    /// Builds a fresh chart owned by `user_id` from an already validated payload.
    pub fn new(user_id: &str, new_chart: NewChart, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            name: new_chart.name.trim().to_string(),
            category: new_chart.category,
            description: non_empty(new_chart.description),
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the fields present in `update` and bumps `updated_at`.
    pub fn apply(&mut self, update: ChartUpdate, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name.trim().to_string();
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(description) = update.description {
            // An empty description clears the field.
            self.description = non_empty(Some(description));
        }
        self.updated_at = now;
    }
}

/// A single dated measurement belonging to a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    pub id: Uuid,
    pub chart_id: Uuid,
    pub date: NaiveDate,
    pub measurement: f64,
    pub label: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DataPoint {
    pub fn new(chart_id: Uuid, new_point: NewDataPoint, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            chart_id,
            date: new_point.date,
            measurement: new_point.measurement,
            label: non_empty(new_point.label),
            created_at: now,
        }
    }

    /// Applies the fields present in `update`.
    pub fn apply(&mut self, update: DataPointUpdate) {
        if let Some(date) = update.date {
            self.date = date;
        }
        if let Some(measurement) = update.measurement {
            self.measurement = measurement;
        }
        if let Some(label) = update.label {
            self.label = non_empty(Some(label));
        }
    }
}

/// Payload for creating a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChart {
    pub name: String,
    #[serde(default)]
    pub category: ChartCategory,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update of a chart. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<ChartCategory>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Payload for adding a data point to a chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDataPoint {
    pub date: NaiveDate,
    pub measurement: f64,
    #[serde(default)]
    pub label: Option<String>,
}

/// Partial update of a data point. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPointUpdate {
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub measurement: Option<f64>,
    #[serde(default)]
    pub label: Option<String>,
}

/// Anything that can be placed on a chart's time axis: a calendar date and a
/// numeric value.
///
/// The value is expected to be finite. Validation in this crate rejects
/// non-finite measurements before they are stored.
pub trait Observation {
    fn date(&self) -> NaiveDate;
    fn value(&self) -> f64;
}

impl Observation for DataPoint {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn value(&self) -> f64 {
        self.measurement
    }
}

impl Observation for (NaiveDate, f64) {
    fn date(&self) -> NaiveDate {
        self.0
    }

    fn value(&self) -> f64 {
        self.1
    }
}

impl<T: Observation + ?Sized> Observation for &T {
    fn date(&self) -> NaiveDate {
        (**self).date()
    }

    fn value(&self) -> f64 {
        (**self).value()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
