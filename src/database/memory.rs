//! In-process store with the same observable behaviour as [`PgStore`](super::postgres::PgStore).
//! Used by the test-suite and for running the API without Postgres.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::manager::{DatabaseError, DbResult};
use super::models::{
    AnthropometricData, BaseFixedUserData, ExerciseData, ExerciseInput, Measurements, NewRoutine,
    ObjectiveData, RoutineData,
};
use super::repository::{
    AnthropometricRepository, ExerciseRepository, FixedDataRepository, HealthCheck, ObjectiveRepository,
    RoutineRepository,
};
use crate::schedule::Schedule;

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Default)]
struct Tables {
    anthropometrics: Vec<AnthropometricData>,
    fixed_data: Vec<BaseFixedUserData>,
    objectives: Vec<ObjectiveData>,
    routines: Vec<RoutineData>,
    exercises: Vec<ExerciseData>,
    next_exercise_id: i64,
}

pub struct MemoryStore {
    tables: RwLock<Tables>,
    clock: Clock,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// A store whose `created_at` stamps come from `clock`.
    pub fn with_clock(clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        Self {
            tables: RwLock::new(Tables {
                next_exercise_id: 1,
                ..Default::default()
            }),
            clock: Arc::new(clock),
        }
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}

#[async_trait]
impl AnthropometricRepository for MemoryStore {
    async fn create(&self, user_id: &str, data: &Measurements) -> DbResult<AnthropometricData> {
        let row = AnthropometricData {
            user_id: user_id.to_string(),
            weight: data.weight,
            muscle_mass: data.muscle_mass,
            fat_mass: data.fat_mass,
            bone_mass: data.bone_mass,
            created_at: self.now(),
        };
        self.tables.write().await.anthropometrics.push(row.clone());
        Ok(row)
    }

    async fn replace_on(
        &self,
        user_id: &str,
        date: NaiveDate,
        data: &Measurements,
    ) -> DbResult<Option<AnthropometricData>> {
        let mut tables = self.tables.write().await;
        let mut updated = None;
        for row in tables
            .anthropometrics
            .iter_mut()
            .filter(|r| r.user_id == user_id && r.created_at.date_naive() == date)
        {
            *row = row.clone().with_measurements(data);
            updated = Some(row.clone());
        }
        Ok(updated)
    }

    async fn find_on(&self, user_id: &str, date: NaiveDate) -> DbResult<Option<AnthropometricData>> {
        let tables = self.tables.read().await;
        Ok(tables
            .anthropometrics
            .iter()
            .filter(|r| r.user_id == user_id && r.created_at.date_naive() == date)
            .max_by_key(|r| r.created_at)
            .cloned())
    }

    async fn list_by_user(&self, user_id: &str) -> DbResult<Vec<AnthropometricData>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<_> = tables
            .anthropometrics
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}

#[async_trait]
impl FixedDataRepository for MemoryStore {
    async fn create(&self, data: &BaseFixedUserData) -> DbResult<BaseFixedUserData> {
        let mut tables = self.tables.write().await;
        if tables.fixed_data.iter().any(|r| r.user_id == data.user_id) {
            return Err(DatabaseError::UniqueViolation(format!(
                "fixed_user_data.user_id = {}",
                data.user_id
            )));
        }
        tables.fixed_data.push(data.clone());
        Ok(data.clone())
    }

    async fn replace(&self, data: &BaseFixedUserData) -> DbResult<Option<BaseFixedUserData>> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .fixed_data
            .iter_mut()
            .find(|r| r.user_id == data.user_id)
            .map(|row| {
                *row = data.clone();
                row.clone()
            }))
    }

    async fn find(&self, user_id: &str) -> DbResult<Option<BaseFixedUserData>> {
        let tables = self.tables.read().await;
        Ok(tables.fixed_data.iter().find(|r| r.user_id == user_id).cloned())
    }
}

#[async_trait]
impl ObjectiveRepository for MemoryStore {
    async fn create(&self, user_id: &str, data: &Measurements, deadline: NaiveDate) -> DbResult<ObjectiveData> {
        let mut tables = self.tables.write().await;
        if tables.objectives.iter().any(|r| r.user_id == user_id) {
            return Err(DatabaseError::UniqueViolation(format!("objective.user_id = {}", user_id)));
        }
        let row = ObjectiveData {
            user_id: user_id.to_string(),
            weight: data.weight,
            muscle_mass: data.muscle_mass,
            fat_mass: data.fat_mass,
            bone_mass: data.bone_mass,
            created_at: self.now(),
            deadline,
        };
        tables.objectives.push(row.clone());
        Ok(row)
    }

    async fn replace(
        &self,
        user_id: &str,
        data: &Measurements,
        deadline: NaiveDate,
    ) -> DbResult<Option<ObjectiveData>> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .objectives
            .iter_mut()
            .find(|r| r.user_id == user_id)
            .map(|row| {
                row.weight = data.weight;
                row.muscle_mass = data.muscle_mass;
                row.fat_mass = data.fat_mass;
                row.bone_mass = data.bone_mass;
                row.deadline = deadline;
                row.clone()
            }))
    }

    async fn find(&self, user_id: &str) -> DbResult<Option<ObjectiveData>> {
        let tables = self.tables.read().await;
        Ok(tables.objectives.iter().find(|r| r.user_id == user_id).cloned())
    }
}

#[async_trait]
impl RoutineRepository for MemoryStore {
    async fn create(&self, routine: &NewRoutine) -> DbResult<RoutineData> {
        let mut tables = self.tables.write().await;
        if tables
            .routines
            .iter()
            .any(|r| r.user_id == routine.user_id && r.schedule() == routine.schedule)
        {
            return Err(DatabaseError::UniqueViolation(format!(
                "user_routines ({}, {}, {}, {})",
                routine.user_id, routine.schedule.day, routine.schedule.start_hour, routine.schedule.end_hour
            )));
        }
        let now = self.now();
        let row = RoutineData {
            user_id: routine.user_id.clone(),
            name: routine.name.clone(),
            description: routine.description.clone(),
            day: routine.schedule.day,
            start_hour: routine.schedule.start_hour,
            end_hour: routine.schedule.end_hour,
            created_at: now,
            updated_at: now,
        };
        tables.routines.push(row.clone());
        Ok(row)
    }

    async fn list_by_user(&self, user_id: &str) -> DbResult<Vec<RoutineData>> {
        let tables = self.tables.read().await;
        Ok(tables
            .routines
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn overlapping(&self, user_id: &str, schedule: &Schedule) -> DbResult<Vec<RoutineData>> {
        let tables = self.tables.read().await;
        Ok(tables
            .routines
            .iter()
            .filter(|r| r.user_id == user_id && r.schedule().overlaps(schedule))
            .cloned()
            .collect())
    }

    async fn delete_by_schedule(&self, user_id: &str, schedule: &Schedule) -> DbResult<u64> {
        let mut tables = self.tables.write().await;
        let before = tables.routines.len();
        tables
            .routines
            .retain(|r| !(r.user_id == user_id && r.schedule() == *schedule));
        Ok((before - tables.routines.len()) as u64)
    }
}

#[async_trait]
impl ExerciseRepository for MemoryStore {
    async fn create(&self, user_id: &str, data: &ExerciseInput) -> DbResult<ExerciseData> {
        let mut tables = self.tables.write().await;
        let id = tables.next_exercise_id;
        tables.next_exercise_id += 1;
        let row = ExerciseData {
            id,
            user_id: user_id.to_string(),
            exercise_name: data.exercise_name.clone(),
            calories_burned: data.calories_burned,
            created_at: self.now(),
        };
        tables.exercises.push(row.clone());
        Ok(row)
    }

    async fn find(&self, id: i64) -> DbResult<Option<ExerciseData>> {
        let tables = self.tables.read().await;
        Ok(tables.exercises.iter().find(|e| e.id == id).cloned())
    }

    async fn list_on(&self, user_id: &str, date: NaiveDate) -> DbResult<Vec<ExerciseData>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<_> = tables
            .exercises
            .iter()
            .filter(|e| e.user_id == user_id && e.created_at.date_naive() == date)
            .cloned()
            .collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(rows)
    }

    async fn update(&self, id: i64, data: &ExerciseInput) -> DbResult<Option<ExerciseData>> {
        let mut tables = self.tables.write().await;
        Ok(tables.exercises.iter_mut().find(|e| e.id == id).map(|row| {
            row.exercise_name = data.exercise_name.clone();
            row.calories_burned = data.calories_burned;
            row.clone()
        }))
    }

    async fn delete(&self, id: i64) -> DbResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.exercises.len();
        tables.exercises.retain(|e| e.id != id);
        Ok(tables.exercises.len() < before)
    }
}

#[async_trait]
impl HealthCheck for MemoryStore {
    async fn ping(&self) -> DbResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Weekday;
    use chrono::TimeZone;

    fn routine(user: &str, day: Weekday, start: i32, end: i32) -> NewRoutine {
        NewRoutine {
            user_id: user.to_string(),
            name: "Workout".to_string(),
            description: String::new(),
            schedule: Schedule::new(day, start, end),
        }
    }

    #[tokio::test]
    async fn duplicate_routine_is_a_unique_violation() {
        let store = MemoryStore::new();
        RoutineRepository::create(&store, &routine("1", Weekday::Monday, 8, 10))
            .await
            .unwrap();
        let err = RoutineRepository::create(&store, &routine("1", Weekday::Monday, 8, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::UniqueViolation(_)));

        // same slot, other user
        RoutineRepository::create(&store, &routine("2", Weekday::Monday, 8, 10))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn overlapping_uses_half_open_ranges() {
        let store = MemoryStore::new();
        RoutineRepository::create(&store, &routine("1", Weekday::Monday, 8, 10))
            .await
            .unwrap();

        let hit = store
            .overlapping("1", &Schedule::new(Weekday::Monday, 9, 11))
            .await
            .unwrap();
        assert_eq!(hit.len(), 1);

        let touching = store
            .overlapping("1", &Schedule::new(Weekday::Monday, 10, 12))
            .await
            .unwrap();
        assert!(touching.is_empty());
    }

    #[tokio::test]
    async fn delete_by_schedule_only_removes_exact_match() {
        let store = MemoryStore::new();
        RoutineRepository::create(&store, &routine("1", Weekday::Monday, 8, 10))
            .await
            .unwrap();
        RoutineRepository::create(&store, &routine("1", Weekday::Friday, 8, 10))
            .await
            .unwrap();

        let removed = store
            .delete_by_schedule("1", &Schedule::new(Weekday::Monday, 8, 9))
            .await
            .unwrap();
        assert_eq!(removed, 0);

        let removed = store
            .delete_by_schedule("1", &Schedule::new(Weekday::Monday, 8, 10))
            .await
            .unwrap();
        assert_eq!(removed, 1);
        assert_eq!(RoutineRepository::list_by_user(&store, "1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn anthropometrics_are_keyed_by_calendar_day() {
        let store = MemoryStore::with_clock(|| Utc.with_ymd_and_hms(2025, 3, 10, 23, 30, 0).unwrap());
        let m = Measurements {
            weight: 70.0,
            muscle_mass: None,
            fat_mass: None,
            bone_mass: None,
        };
        AnthropometricRepository::create(&store, "1", &m).await.unwrap();

        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert!(store.find_on("1", day).await.unwrap().is_some());
        assert!(store.find_on("1", day.succ_opt().unwrap()).await.unwrap().is_none());
        assert!(store.find_on("2", day).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn exercise_ids_increase() {
        let store = MemoryStore::new();
        let input = ExerciseInput {
            exercise_name: "Run".to_string(),
            calories_burned: 300.0,
        };
        let a = ExerciseRepository::create(&store, "1", &input).await.unwrap();
        let b = ExerciseRepository::create(&store, "1", &input).await.unwrap();
        assert!(b.id > a.id);
        assert!(ExerciseRepository::delete(&store, a.id).await.unwrap());
        assert!(!ExerciseRepository::delete(&store, a.id).await.unwrap());
    }
}
