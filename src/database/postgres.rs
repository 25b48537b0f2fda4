use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use super::manager::{DatabaseManager, DbResult};
use super::models::{
    AnthropometricData, BaseFixedUserData, ExerciseData, ExerciseInput, Measurements, NewRoutine,
    ObjectiveData, RoutineData,
};
use super::repository::{
    AnthropometricRepository, ExerciseRepository, FixedDataRepository, HealthCheck, ObjectiveRepository,
    RoutineRepository,
};
use crate::schedule::Schedule;

/// Postgres-backed store. Timestamps are compared as UTC calendar dates.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ANTHROPOMETRIC_COLUMNS: &str = "user_id, weight, muscle_mass, fat_mass, bone_mass, created_at";
const OBJECTIVE_COLUMNS: &str = "user_id, weight, muscle_mass, fat_mass, bone_mass, created_at, deadline";
const ROUTINE_COLUMNS: &str = "user_id, name, description, day, start_hour, end_hour, created_at, updated_at";
const EXERCISE_COLUMNS: &str = "id, user_id, exercise_name, calories_burned, created_at";

#[async_trait]
impl AnthropometricRepository for PgStore {
    async fn create(&self, user_id: &str, data: &Measurements) -> DbResult<AnthropometricData> {
        let sql = format!(
            "INSERT INTO anthropometric_data (user_id, weight, muscle_mass, fat_mass, bone_mass)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            ANTHROPOMETRIC_COLUMNS
        );
        let row = sqlx::query_as::<_, AnthropometricData>(&sql)
            .bind(user_id)
            .bind(data.weight)
            .bind(data.muscle_mass)
            .bind(data.fat_mass)
            .bind(data.bone_mass)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create anthropometric data for user {}: {}", user_id, e);
                e
            })?;
        Ok(row)
    }

    async fn replace_on(
        &self,
        user_id: &str,
        date: NaiveDate,
        data: &Measurements,
    ) -> DbResult<Option<AnthropometricData>> {
        let sql = format!(
            "UPDATE anthropometric_data
             SET weight = $1, muscle_mass = $2, fat_mass = $3, bone_mass = $4
             WHERE user_id = $5 AND (created_at AT TIME ZONE 'UTC')::date = $6
             RETURNING {}",
            ANTHROPOMETRIC_COLUMNS
        );
        let row = sqlx::query_as::<_, AnthropometricData>(&sql)
            .bind(data.weight)
            .bind(data.muscle_mass)
            .bind(data.fat_mass)
            .bind(data.bone_mass)
            .bind(user_id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update anthropometric data for user {}: {}", user_id, e);
                e
            })?;
        Ok(row)
    }

    async fn find_on(&self, user_id: &str, date: NaiveDate) -> DbResult<Option<AnthropometricData>> {
        let sql = format!(
            "SELECT {} FROM anthropometric_data
             WHERE user_id = $1 AND (created_at AT TIME ZONE 'UTC')::date = $2
             ORDER BY created_at DESC
             LIMIT 1",
            ANTHROPOMETRIC_COLUMNS
        );
        let row = sqlx::query_as::<_, AnthropometricData>(&sql)
            .bind(user_id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_by_user(&self, user_id: &str) -> DbResult<Vec<AnthropometricData>> {
        let sql = format!(
            "SELECT {} FROM anthropometric_data WHERE user_id = $1 ORDER BY created_at DESC",
            ANTHROPOMETRIC_COLUMNS
        );
        let rows = sqlx::query_as::<_, AnthropometricData>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[async_trait]
impl FixedDataRepository for PgStore {
    async fn create(&self, data: &BaseFixedUserData) -> DbResult<BaseFixedUserData> {
        let row = sqlx::query_as::<_, BaseFixedUserData>(
            "INSERT INTO fixed_user_data (user_id, height, birthday)
             VALUES ($1, $2, $3)
             RETURNING user_id, height, birthday",
        )
        .bind(&data.user_id)
        .bind(data.height)
        .bind(data.birthday)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to create fixed user data for user {}: {}", data.user_id, e);
            e
        })?;
        Ok(row)
    }

    async fn replace(&self, data: &BaseFixedUserData) -> DbResult<Option<BaseFixedUserData>> {
        let row = sqlx::query_as::<_, BaseFixedUserData>(
            "UPDATE fixed_user_data SET height = $1, birthday = $2
             WHERE user_id = $3
             RETURNING user_id, height, birthday",
        )
        .bind(data.height)
        .bind(data.birthday)
        .bind(&data.user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update fixed user data for user {}: {}", data.user_id, e);
            e
        })?;
        Ok(row)
    }

    async fn find(&self, user_id: &str) -> DbResult<Option<BaseFixedUserData>> {
        let row = sqlx::query_as::<_, BaseFixedUserData>(
            "SELECT user_id, height, birthday FROM fixed_user_data WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}

#[async_trait]
impl ObjectiveRepository for PgStore {
    async fn create(&self, user_id: &str, data: &Measurements, deadline: NaiveDate) -> DbResult<ObjectiveData> {
        let sql = format!(
            "INSERT INTO objective (user_id, weight, muscle_mass, fat_mass, bone_mass, deadline)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {}",
            OBJECTIVE_COLUMNS
        );
        let row = sqlx::query_as::<_, ObjectiveData>(&sql)
            .bind(user_id)
            .bind(data.weight)
            .bind(data.muscle_mass)
            .bind(data.fat_mass)
            .bind(data.bone_mass)
            .bind(deadline)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create objective for user {}: {}", user_id, e);
                e
            })?;
        Ok(row)
    }

    async fn replace(
        &self,
        user_id: &str,
        data: &Measurements,
        deadline: NaiveDate,
    ) -> DbResult<Option<ObjectiveData>> {
        let sql = format!(
            "UPDATE objective
             SET weight = $1, muscle_mass = $2, fat_mass = $3, bone_mass = $4, deadline = $5
             WHERE user_id = $6
             RETURNING {}",
            OBJECTIVE_COLUMNS
        );
        let row = sqlx::query_as::<_, ObjectiveData>(&sql)
            .bind(data.weight)
            .bind(data.muscle_mass)
            .bind(data.fat_mass)
            .bind(data.bone_mass)
            .bind(deadline)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update objective for user {}: {}", user_id, e);
                e
            })?;
        Ok(row)
    }

    async fn find(&self, user_id: &str) -> DbResult<Option<ObjectiveData>> {
        let sql = format!("SELECT {} FROM objective WHERE user_id = $1", OBJECTIVE_COLUMNS);
        let row = sqlx::query_as::<_, ObjectiveData>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

#[async_trait]
impl RoutineRepository for PgStore {
    async fn create(&self, routine: &NewRoutine) -> DbResult<RoutineData> {
        let sql = format!(
            "INSERT INTO user_routines (user_id, name, description, day, start_hour, end_hour)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {}",
            ROUTINE_COLUMNS
        );
        let row = sqlx::query_as::<_, RoutineData>(&sql)
            .bind(&routine.user_id)
            .bind(&routine.name)
            .bind(&routine.description)
            .bind(routine.schedule.day.as_str())
            .bind(routine.schedule.start_hour)
            .bind(routine.schedule.end_hour)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create a routine for user {}: {}", routine.user_id, e);
                e
            })?;
        Ok(row)
    }

    async fn list_by_user(&self, user_id: &str) -> DbResult<Vec<RoutineData>> {
        let sql = format!(
            "SELECT {} FROM user_routines WHERE user_id = $1 ORDER BY created_at, day, start_hour",
            ROUTINE_COLUMNS
        );
        let rows = sqlx::query_as::<_, RoutineData>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn overlapping(&self, user_id: &str, schedule: &Schedule) -> DbResult<Vec<RoutineData>> {
        let sql = format!(
            "SELECT {} FROM user_routines
             WHERE user_id = $1 AND day = $2 AND end_hour > $3 AND start_hour < $4",
            ROUTINE_COLUMNS
        );
        let rows = sqlx::query_as::<_, RoutineData>(&sql)
            .bind(user_id)
            .bind(schedule.day.as_str())
            .bind(schedule.start_hour)
            .bind(schedule.end_hour)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn delete_by_schedule(&self, user_id: &str, schedule: &Schedule) -> DbResult<u64> {
        let result = sqlx::query(
            "DELETE FROM user_routines
             WHERE user_id = $1 AND day = $2 AND start_hour = $3 AND end_hour = $4",
        )
        .bind(user_id)
        .bind(schedule.day.as_str())
        .bind(schedule.start_hour)
        .bind(schedule.end_hour)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                "Failed to delete routine for schedule {} {}-{} for user {}: {}",
                schedule.day,
                schedule.start_hour,
                schedule.end_hour,
                user_id,
                e
            );
            e
        })?;
        Ok(result.rows_affected())
    }
}

#[async_trait]
impl ExerciseRepository for PgStore {
    async fn create(&self, user_id: &str, data: &ExerciseInput) -> DbResult<ExerciseData> {
        let sql = format!(
            "INSERT INTO exercise_by_day (user_id, exercise_name, calories_burned)
             VALUES ($1, $2, $3)
             RETURNING {}",
            EXERCISE_COLUMNS
        );
        let row = sqlx::query_as::<_, ExerciseData>(&sql)
            .bind(user_id)
            .bind(&data.exercise_name)
            .bind(data.calories_burned)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to create exercise for user {}: {}", user_id, e);
                e
            })?;
        Ok(row)
    }

    async fn find(&self, id: i64) -> DbResult<Option<ExerciseData>> {
        let sql = format!("SELECT {} FROM exercise_by_day WHERE id = $1", EXERCISE_COLUMNS);
        let row = sqlx::query_as::<_, ExerciseData>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list_on(&self, user_id: &str, date: NaiveDate) -> DbResult<Vec<ExerciseData>> {
        let sql = format!(
            "SELECT {} FROM exercise_by_day
             WHERE user_id = $1 AND (created_at AT TIME ZONE 'UTC')::date = $2
             ORDER BY created_at ASC, id ASC",
            EXERCISE_COLUMNS
        );
        let rows = sqlx::query_as::<_, ExerciseData>(&sql)
            .bind(user_id)
            .bind(date)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to get exercises for user {} on date {}: {}", user_id, date, e);
                e
            })?;
        Ok(rows)
    }

    async fn update(&self, id: i64, data: &ExerciseInput) -> DbResult<Option<ExerciseData>> {
        let sql = format!(
            "UPDATE exercise_by_day SET exercise_name = $1, calories_burned = $2
             WHERE id = $3
             RETURNING {}",
            EXERCISE_COLUMNS
        );
        let row = sqlx::query_as::<_, ExerciseData>(&sql)
            .bind(&data.exercise_name)
            .bind(data.calories_burned)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to update exercise with ID {}: {}", id, e);
                e
            })?;
        Ok(row)
    }

    async fn delete(&self, id: i64) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM exercise_by_day WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to delete exercise with ID {}: {}", id, e);
                e
            })?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl HealthCheck for PgStore {
    async fn ping(&self) -> DbResult<()> {
        DatabaseManager::health_check(&self.pool).await
    }
}
