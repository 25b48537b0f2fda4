use chrono::NaiveDate;
use std::sync::Arc;

use crate::database::models::{AllExercisesInDay, ExerciseData, ExerciseInput};
use crate::database::repository::ExerciseRepository;
use crate::error::ApiError;

#[derive(Clone)]
pub struct ExerciseService {
    exercises: Arc<dyn ExerciseRepository>,
}

impl ExerciseService {
    pub fn new(exercises: Arc<dyn ExerciseRepository>) -> Self {
        Self { exercises }
    }

    pub async fn create_exercise(&self, user_id: &str, input: &ExerciseInput) -> Result<ExerciseData, ApiError> {
        validate(input)?;
        Ok(self.exercises.create(user_id, input).await?)
    }

    /// The user's exercises created on `date`, oldest first, with their calorie total.
    pub async fn exercises_on(&self, user_id: &str, date: NaiveDate) -> Result<AllExercisesInDay, ApiError> {
        let exercises = self.exercises.list_on(user_id, date).await?;
        Ok(AllExercisesInDay::new(exercises))
    }

    pub async fn update_exercise(
        &self,
        user_id: &str,
        id: i64,
        input: &ExerciseInput,
    ) -> Result<ExerciseData, ApiError> {
        validate(input)?;
        self.owned(user_id, id, "update").await?;

        self.exercises
            .update(id, input)
            .await?
            .ok_or_else(|| exercise_not_found(id))
    }

    pub async fn delete_exercise(&self, user_id: &str, id: i64) -> Result<(), ApiError> {
        self.owned(user_id, id, "delete").await?;

        if !self.exercises.delete(id).await? {
            return Err(exercise_not_found(id));
        }
        Ok(())
    }

    async fn owned(&self, user_id: &str, id: i64, action: &str) -> Result<ExerciseData, ApiError> {
        let exercise = self
            .exercises
            .find(id)
            .await?
            .ok_or_else(|| exercise_not_found(id))?;

        if exercise.user_id != user_id {
            return Err(ApiError::unauthorized(
                "Unauthorized",
                format!("You are not authorized to {} this exercise", action),
            ));
        }
        Ok(exercise)
    }
}

/// Exercise ids in paths are positive integers.
pub fn parse_exercise_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::validation("Invalid exercise ID", "Exercise ID must be a positive integer"))
}

fn validate(input: &ExerciseInput) -> Result<(), ApiError> {
    if input.exercise_name.trim().is_empty() {
        return Err(invalid_exercise("exerciseName is required"));
    }
    if input.calories_burned.is_nan() || input.calories_burned <= 0.0 {
        return Err(invalid_exercise("caloriesBurned must be greater than 0"));
    }
    Ok(())
}

fn invalid_exercise(reason: &str) -> ApiError {
    ApiError::validation(
        "Invalid exercise data",
        format!("The exercise data is invalid, {}", reason),
    )
}

fn exercise_not_found(id: i64) -> ApiError {
    ApiError::not_found("Exercise not found", format!("No exercise found with ID {}", id))
}
