use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Stored form: height in centimetres and birthday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct BaseFixedUserData {
    pub user_id: String,
    pub height: i32,
    pub birthday: NaiveDate,
}

/// Derived form exposed by default: birthday replaced by age in whole years.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedUserData {
    pub user_id: String,
    pub height: i32,
    pub age: i32,
}

impl BaseFixedUserData {
    pub fn derive(&self, today: NaiveDate) -> FixedUserData {
        FixedUserData {
            user_id: self.user_id.clone(),
            height: self.height,
            age: age_on(self.birthday, today),
        }
    }
}

/// Whole years between `birthday` and `today`, counting 365.25 days a year.
pub fn age_on(birthday: NaiveDate, today: NaiveDate) -> i32 {
    let days = (today - birthday).num_days() as f64;
    (days / 365.25).floor() as i32
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixedDataInput {
    pub height: i32,
    pub birthday: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_counts_completed_years() {
        assert_eq!(age_on(date(2000, 1, 1), date(2025, 6, 1)), 25);
        assert_eq!(age_on(date(2000, 6, 2), date(2025, 6, 1)), 24);
        assert_eq!(age_on(date(2025, 6, 1), date(2025, 6, 1)), 0);
    }

    #[test]
    fn derive_replaces_birthday_with_age() {
        let base = BaseFixedUserData {
            user_id: "1".into(),
            height: 180,
            birthday: date(1990, 3, 15),
        };
        let derived = base.derive(date(2024, 3, 16));
        assert_eq!(derived.height, 180);
        assert_eq!(derived.age, 34);
    }
}
