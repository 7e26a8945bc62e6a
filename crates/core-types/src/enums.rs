use serde::{Deserialize, Serialize};
use std::fmt;

/// The broad subject a chart tracks. Used for grouping charts in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartCategory {
    Health,
    Fitness,
    Finance,
    Habits,
    Productivity,
    #[default]
    Other,
}

impl ChartCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartCategory::Health => "health",
            ChartCategory::Fitness => "fitness",
            ChartCategory::Finance => "finance",
            ChartCategory::Habits => "habits",
            ChartCategory::Productivity => "productivity",
            ChartCategory::Other => "other",
        }
    }
}

impl fmt::Display for ChartCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
