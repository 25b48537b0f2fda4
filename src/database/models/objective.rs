use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::anthropometric::Measurements;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ObjectiveData {
    pub user_id: String,
    pub weight: f32,
    pub muscle_mass: Option<f32>,
    pub fat_mass: Option<f32>,
    pub bone_mass: Option<f32>,
    pub created_at: DateTime<Utc>,
    pub deadline: NaiveDate,
}

impl ObjectiveData {
    pub fn measurements(&self) -> Measurements {
        Measurements {
            weight: self.weight,
            muscle_mass: self.muscle_mass,
            fat_mass: self.fat_mass,
            bone_mass: self.bone_mass,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectiveInput {
    pub weight: f32,
    #[serde(default)]
    pub muscle_mass: Option<f32>,
    #[serde(default)]
    pub fat_mass: Option<f32>,
    #[serde(default)]
    pub bone_mass: Option<f32>,
    pub deadline: String,
}

impl ObjectiveInput {
    pub fn measurements(&self) -> Measurements {
        Measurements {
            weight: self.weight,
            muscle_mass: self.muscle_mass,
            fat_mass: self.fat_mass,
            bone_mass: self.bone_mass,
        }
    }
}
