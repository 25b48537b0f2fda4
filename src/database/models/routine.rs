use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::schedule::{Schedule, Weekday};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct RoutineData {
    pub user_id: String,
    pub name: String,
    pub description: String,
    #[sqlx(try_from = "String")]
    pub day: Weekday,
    pub start_hour: i32,
    pub end_hour: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RoutineData {
    pub fn schedule(&self) -> Schedule {
        Schedule::new(self.day, self.start_hour, self.end_hour)
    }
}

/// POST body for a routine. Any `user_id` in the body is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutineInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub day: Weekday,
    pub start_hour: i32,
    pub end_hour: i32,
}

impl RoutineInput {
    pub fn schedule(&self) -> Schedule {
        Schedule::new(self.day, self.start_hour, self.end_hour)
    }
}

#[derive(Debug, Clone)]
pub struct NewRoutine {
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub schedule: Schedule,
}
