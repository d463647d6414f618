use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct ActivityMetric {
    pub date: NaiveDate,
    pub entry_count: i64,
}

/// One day of the dashboard activity chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityDay {
    pub date: NaiveDate,
    pub count: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct ActivityQuery {
    pub days: Option<u32>,
}
