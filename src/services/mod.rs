pub mod exercise_service;
pub mod objective_service;
pub mod routine_service;
pub mod user_data_service;

use chrono::{NaiveDate, Utc};

use crate::database::Repositories;
use crate::error::ApiError;

pub use exercise_service::ExerciseService;
pub use objective_service::ObjectiveService;
pub use routine_service::RoutineService;
pub use user_data_service::UserDataService;

/// Outcome of a create-or-replace write.
#[derive(Debug, Clone, PartialEq)]
pub struct Upserted<T> {
    pub record: T,
    pub created: bool,
}

impl<T> Upserted<T> {
    pub fn created(record: T) -> Self {
        Self { record, created: true }
    }

    pub fn replaced(record: T) -> Self {
        Self {
            record,
            created: false,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Upserted<U> {
        Upserted {
            record: f(self.record),
            created: self.created,
        }
    }
}

/// All domain services, built once over the configured store.
#[derive(Clone)]
pub struct Services {
    pub user_data: UserDataService,
    pub objectives: ObjectiveService,
    pub routines: RoutineService,
    pub exercises: ExerciseService,
}

impl Services {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            user_data: UserDataService::new(
                repositories.anthropometrics.clone(),
                repositories.fixed_data.clone(),
            ),
            objectives: ObjectiveService::new(repositories.objectives.clone()),
            routines: RoutineService::new(repositories.routines.clone()),
            exercises: ExerciseService::new(repositories.exercises.clone()),
        }
    }
}

/// Current calendar day in UTC. Records are bucketed by this day.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Parses `YYYY-MM-DD`.
pub fn parse_date(value: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| ApiError::invalid_date())
}
