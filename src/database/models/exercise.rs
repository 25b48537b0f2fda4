use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseData {
    pub id: i64,
    pub user_id: String,
    pub exercise_name: String,
    pub calories_burned: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseInput {
    pub exercise_name: String,
    pub calories_burned: f64,
}

/// A day's exercises with their summed calories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllExercisesInDay {
    pub total_burned: f64,
    pub exercises: Vec<ExerciseData>,
}

impl AllExercisesInDay {
    pub fn new(exercises: Vec<ExerciseData>) -> Self {
        let total_burned = exercises.iter().map(|e| e.calories_burned).sum();
        Self {
            total_burned,
            exercises,
        }
    }
}
