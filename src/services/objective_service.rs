use chrono::NaiveDate;
use std::sync::Arc;

use super::{parse_date, Upserted};
use crate::database::models::{ObjectiveData, ObjectiveInput};
use crate::database::repository::ObjectiveRepository;
use crate::error::ApiError;

#[derive(Clone)]
pub struct ObjectiveService {
    objectives: Arc<dyn ObjectiveRepository>,
}

impl ObjectiveService {
    pub fn new(objectives: Arc<dyn ObjectiveRepository>) -> Self {
        Self { objectives }
    }

    /// Creates the user's objective or merges `input` into the existing one.
    /// The deadline has to fall strictly after `today`.
    pub async fn put_objective(
        &self,
        user_id: &str,
        input: &ObjectiveInput,
        today: NaiveDate,
    ) -> Result<Upserted<ObjectiveData>, ApiError> {
        let deadline = validate_deadline(&input.deadline, today)?;

        match self.objectives.find(user_id).await? {
            None => {
                let record = self
                    .objectives
                    .create(user_id, &input.measurements(), deadline)
                    .await?;
                Ok(Upserted::created(record))
            }
            Some(existing) => {
                let mut merged = existing.measurements();
                merged.merge(&input.measurements());
                let record = self
                    .objectives
                    .replace(user_id, &merged, deadline)
                    .await?
                    .ok_or_else(|| objective_not_found(user_id))?;
                Ok(Upserted::replaced(record))
            }
        }
    }

    pub async fn objective(&self, user_id: &str) -> Result<ObjectiveData, ApiError> {
        self.objectives
            .find(user_id)
            .await?
            .ok_or_else(|| objective_not_found(user_id))
    }
}

fn validate_deadline(value: &str, today: NaiveDate) -> Result<NaiveDate, ApiError> {
    let deadline = parse_date(value)?;
    if deadline <= today {
        return Err(ApiError::validation(
            "Invalid deadline",
            "The deadline must be in the future",
        ));
    }
    Ok(deadline)
}

fn objective_not_found(user_id: &str) -> ApiError {
    ApiError::not_found(
        "Objective data not found",
        format!("No objective data found for user {}", user_id),
    )
}
