use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Body measurements shared by daily records and objectives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub weight: f32,
    #[serde(default)]
    pub muscle_mass: Option<f32>,
    #[serde(default)]
    pub fat_mass: Option<f32>,
    #[serde(default)]
    pub bone_mass: Option<f32>,
}

impl Measurements {
    /// Weight is always replaced; optional masses only when the update carries them.
    pub fn merge(&mut self, update: &Measurements) {
        self.weight = update.weight;
        if update.muscle_mass.is_some() {
            self.muscle_mass = update.muscle_mass;
        }
        if update.fat_mass.is_some() {
            self.fat_mass = update.fat_mass;
        }
        if update.bone_mass.is_some() {
            self.bone_mass = update.bone_mass;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AnthropometricData {
    pub user_id: String,
    pub weight: f32,
    pub muscle_mass: Option<f32>,
    pub fat_mass: Option<f32>,
    pub bone_mass: Option<f32>,
    pub created_at: DateTime<Utc>,
}

impl AnthropometricData {
    pub fn measurements(&self) -> Measurements {
        Measurements {
            weight: self.weight,
            muscle_mass: self.muscle_mass,
            fat_mass: self.fat_mass,
            bone_mass: self.bone_mass,
        }
    }

    pub fn with_measurements(mut self, m: &Measurements) -> Self {
        self.weight = m.weight;
        self.muscle_mass = m.muscle_mass;
        self.fat_mass = m.fat_mass;
        self.bone_mass = m.bone_mass;
        self
    }
}
