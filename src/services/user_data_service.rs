use chrono::NaiveDate;
use std::sync::Arc;

use super::{parse_date, Upserted};
use crate::database::models::{
    AnthropometricData, BaseFixedUserData, FixedDataInput, FixedUserData, Measurements,
};
use crate::database::repository::{AnthropometricRepository, FixedDataRepository};
use crate::error::ApiError;

/// Daily anthropometric records and the user's fixed data (height, birthday).
#[derive(Clone)]
pub struct UserDataService {
    anthropometrics: Arc<dyn AnthropometricRepository>,
    fixed_data: Arc<dyn FixedDataRepository>,
}

impl UserDataService {
    pub fn new(
        anthropometrics: Arc<dyn AnthropometricRepository>,
        fixed_data: Arc<dyn FixedDataRepository>,
    ) -> Self {
        Self {
            anthropometrics,
            fixed_data,
        }
    }

    /// Creates today's record, or merges `data` into it when one exists.
    pub async fn put_anthropometrics(
        &self,
        user_id: &str,
        data: &Measurements,
        today: NaiveDate,
    ) -> Result<Upserted<AnthropometricData>, ApiError> {
        match self.anthropometrics.find_on(user_id, today).await? {
            None => {
                let record = self.anthropometrics.create(user_id, data).await?;
                Ok(Upserted::created(record))
            }
            Some(existing) => {
                let mut merged = existing.measurements();
                merged.merge(data);
                let record = self
                    .anthropometrics
                    .replace_on(user_id, today, &merged)
                    .await?
                    .ok_or_else(|| anthropometrics_not_found(user_id, today))?;
                Ok(Upserted::replaced(record))
            }
        }
    }

    pub async fn anthropometrics_on(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<AnthropometricData, ApiError> {
        self.anthropometrics
            .find_on(user_id, date)
            .await?
            .ok_or_else(|| anthropometrics_not_found(user_id, date))
    }

    /// Every record of the user, newest first.
    pub async fn all_anthropometrics(&self, user_id: &str) -> Result<Vec<AnthropometricData>, ApiError> {
        Ok(self.anthropometrics.list_by_user(user_id).await?)
    }

    /// Creates or replaces height and birthday; returns the derived form.
    pub async fn put_fixed_data(
        &self,
        user_id: &str,
        input: &FixedDataInput,
        today: NaiveDate,
    ) -> Result<Upserted<FixedUserData>, ApiError> {
        if input.height <= 0 {
            return Err(ApiError::validation(
                "Invalid fixed user data",
                "The fixed user data is invalid, height must be a positive number of centimetres",
            ));
        }
        let birthday = parse_date(&input.birthday)?;

        let data = BaseFixedUserData {
            user_id: user_id.to_string(),
            height: input.height,
            birthday,
        };

        let upserted = match self.fixed_data.replace(&data).await? {
            Some(record) => Upserted::replaced(record),
            None => Upserted::created(self.fixed_data.create(&data).await?),
        };
        Ok(upserted.map(|base| base.derive(today)))
    }

    pub async fn fixed_data(&self, user_id: &str, today: NaiveDate) -> Result<FixedUserData, ApiError> {
        Ok(self.base_fixed_data(user_id).await?.derive(today))
    }

    pub async fn base_fixed_data(&self, user_id: &str) -> Result<BaseFixedUserData, ApiError> {
        self.fixed_data.find(user_id).await?.ok_or_else(|| {
            ApiError::not_found(
                "Fixed user data not found",
                format!("No fixed user data found for user {}", user_id),
            )
        })
    }
}

fn anthropometrics_not_found(user_id: &str, date: NaiveDate) -> ApiError {
    ApiError::not_found(
        "Anthropometric data not found",
        format!("No anthropometric data found for user {} on date {}", user_id, date),
    )
}
