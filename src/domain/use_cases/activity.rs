use std::collections::HashMap;

use chrono::{Days, NaiveDate};

use crate::{
    constants::{DEFAULT_ACTIVITY_DAYS, MAX_ACTIVITY_DAYS},
    entities::activity::ActivityDay,
    errors::AppError,
    repositories::activity::ActivityRepository,
};

pub struct ActivityHandler<A>
where
    A: ActivityRepository,
{
    pub activity_repo: A,
}

impl<A> ActivityHandler<A>
where
    A: ActivityRepository,
{
    pub fn new(activity_repo: A) -> Self {
        ActivityHandler { activity_repo }
    }

    /// Exactly `days` entries ending at `today`, oldest first. Days without
    /// logs are reported with a zero count.
    pub async fn get_activity(
        &self,
        days: Option<u32>,
        today: NaiveDate,
    ) -> Result<Vec<ActivityDay>, AppError> {
        let days = clamp_days(days);
        let from = today
            .checked_sub_days(Days::new(u64::from(days - 1)))
            .ok_or_else(|| AppError::BadRequest("days is out of range".into()))?;

        let counts: HashMap<NaiveDate, i64> = self
            .activity_repo
            .metrics_between(from, today)
            .await?
            .into_iter()
            .map(|m| (m.date, m.entry_count))
            .collect();

        Ok(from
            .iter_days()
            .take(days as usize)
            .map(|date| ActivityDay {
                date,
                count: counts.get(&date).copied().unwrap_or(0),
            })
            .collect())
    }
}

fn clamp_days(days: Option<u32>) -> u32 {
    days.unwrap_or(DEFAULT_ACTIVITY_DAYS).clamp(1, MAX_ACTIVITY_DAYS)
}
