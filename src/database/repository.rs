//! Storage seams. Each resource gets a narrow trait so services can be
//! exercised against the in-memory store or a stub.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use super::manager::DbResult;
use super::models::{
    AnthropometricData, BaseFixedUserData, ExerciseData, ExerciseInput, Measurements, NewRoutine,
    ObjectiveData, RoutineData,
};
use crate::schedule::Schedule;

#[async_trait]
pub trait AnthropometricRepository: Send + Sync {
    async fn create(&self, user_id: &str, data: &Measurements) -> DbResult<AnthropometricData>;

    /// Replace the record created on `date`. `None` when there is none.
    async fn replace_on(
        &self,
        user_id: &str,
        date: NaiveDate,
        data: &Measurements,
    ) -> DbResult<Option<AnthropometricData>>;

    async fn find_on(&self, user_id: &str, date: NaiveDate) -> DbResult<Option<AnthropometricData>>;

    /// Newest first.
    async fn list_by_user(&self, user_id: &str) -> DbResult<Vec<AnthropometricData>>;
}

#[async_trait]
pub trait FixedDataRepository: Send + Sync {
    async fn create(&self, data: &BaseFixedUserData) -> DbResult<BaseFixedUserData>;
    async fn replace(&self, data: &BaseFixedUserData) -> DbResult<Option<BaseFixedUserData>>;
    async fn find(&self, user_id: &str) -> DbResult<Option<BaseFixedUserData>>;
}

#[async_trait]
pub trait ObjectiveRepository: Send + Sync {
    async fn create(&self, user_id: &str, data: &Measurements, deadline: NaiveDate) -> DbResult<ObjectiveData>;
    async fn replace(
        &self,
        user_id: &str,
        data: &Measurements,
        deadline: NaiveDate,
    ) -> DbResult<Option<ObjectiveData>>;
    async fn find(&self, user_id: &str) -> DbResult<Option<ObjectiveData>>;
}

#[async_trait]
pub trait RoutineRepository: Send + Sync {
    /// Fails with `UniqueViolation` when the exact schedule already exists for the user.
    async fn create(&self, routine: &NewRoutine) -> DbResult<RoutineData>;
    async fn list_by_user(&self, user_id: &str) -> DbResult<Vec<RoutineData>>;
    /// Routines of the user overlapping `[start_hour, end_hour)` on the same day.
    async fn overlapping(&self, user_id: &str, schedule: &Schedule) -> DbResult<Vec<RoutineData>>;
    /// Number of rows removed.
    async fn delete_by_schedule(&self, user_id: &str, schedule: &Schedule) -> DbResult<u64>;
}

#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    async fn create(&self, user_id: &str, data: &ExerciseInput) -> DbResult<ExerciseData>;
    async fn find(&self, id: i64) -> DbResult<Option<ExerciseData>>;
    /// Oldest first.
    async fn list_on(&self, user_id: &str, date: NaiveDate) -> DbResult<Vec<ExerciseData>>;
    async fn update(&self, id: i64, data: &ExerciseInput) -> DbResult<Option<ExerciseData>>;
    async fn delete(&self, id: i64) -> DbResult<bool>;
}

#[async_trait]
pub trait HealthCheck: Send + Sync {
    async fn ping(&self) -> DbResult<()>;
}

/// One store implementing every repository.
pub trait FullRepository:
    AnthropometricRepository
    + FixedDataRepository
    + ObjectiveRepository
    + RoutineRepository
    + ExerciseRepository
    + HealthCheck
{
}

impl<T> FullRepository for T where
    T: AnthropometricRepository
        + FixedDataRepository
        + ObjectiveRepository
        + RoutineRepository
        + ExerciseRepository
        + HealthCheck
{
}

/// Per-resource handles onto a single backing store.
#[derive(Clone)]
pub struct Repositories {
    pub anthropometrics: Arc<dyn AnthropometricRepository>,
    pub fixed_data: Arc<dyn FixedDataRepository>,
    pub objectives: Arc<dyn ObjectiveRepository>,
    pub routines: Arc<dyn RoutineRepository>,
    pub exercises: Arc<dyn ExerciseRepository>,
    pub health: Arc<dyn HealthCheck>,
}

impl Repositories {
    pub fn from_store<S: FullRepository + 'static>(store: Arc<S>) -> Self {
        Self {
            anthropometrics: store.clone(),
            fixed_data: store.clone(),
            objectives: store.clone(),
            routines: store.clone(),
            exercises: store.clone(),
            health: store,
        }
    }
}
