use futures::future::try_join_all;
use std::sync::Arc;

use crate::database::models::{NewRoutine, RoutineData, RoutineInput};
use crate::database::repository::RoutineRepository;
use crate::database::{DatabaseError, DbResult};
use crate::error::ApiError;
use crate::schedule::{FreeSchedule, OccupancyGrid, Schedule};

#[derive(Clone)]
pub struct RoutineService {
    routines: Arc<dyn RoutineRepository>,
}

impl RoutineService {
    pub fn new(routines: Arc<dyn RoutineRepository>) -> Self {
        Self { routines }
    }

    /// Stores a routine unless it overlaps one the user already has on that day.
    pub async fn create_routine(&self, user_id: &str, input: RoutineInput) -> Result<RoutineData, ApiError> {
        let schedule = input.schedule();
        if input.name.trim().is_empty() {
            return Err(invalid_routine("name is required"));
        }
        if !schedule.is_valid() {
            return Err(invalid_routine(
                "start_hour and end_hour must satisfy 0 <= start_hour < end_hour <= 24",
            ));
        }

        let conflicts = self.routines.overlapping(user_id, &schedule).await?;
        if !conflicts.is_empty() {
            tracing::debug!(
                "Routine {} {}-{} for user {} overlaps {} existing routine(s)",
                schedule.day,
                schedule.start_hour,
                schedule.end_hour,
                user_id,
                conflicts.len()
            );
            return Err(ApiError::conflict(
                "Routine conflict",
                "There is already a routine scheduled in the same time interval or subinterval",
            ));
        }

        let routine = NewRoutine {
            user_id: user_id.to_string(),
            name: input.name,
            description: input.description,
            schedule,
        };

        self.routines.create(&routine).await.map_err(|e| match e {
            DatabaseError::UniqueViolation(_) => ApiError::conflict(
                "Routine already exists",
                "A routine with the same schedule already exists for this user",
            ),
            other => other.into(),
        })
    }

    pub async fn routines(&self, user_id: &str) -> Result<Vec<RoutineData>, ApiError> {
        Ok(self.routines.list_by_user(user_id).await?)
    }

    /// Removes the routine booked exactly at `schedule` and returns what is left.
    pub async fn delete_routine(&self, user_id: &str, schedule: &Schedule) -> Result<Vec<RoutineData>, ApiError> {
        let removed = self.routines.delete_by_schedule(user_id, schedule).await?;
        if removed == 0 {
            tracing::debug!(
                "No routine of user {} matched {} {}-{}",
                user_id,
                schedule.day,
                schedule.start_hour,
                schedule.end_hour
            );
        }
        self.routines(user_id).await
    }

    /// Hours of the week in which none of `users` has a routine.
    ///
    /// Every user's bookings are fetched concurrently; one failed lookup fails
    /// the whole call. An empty `users` list succeeds without touching storage.
    pub async fn free_schedules(&self, users: &[String]) -> Result<FreeSchedule, ApiError> {
        if users.is_empty() {
            return Ok(FreeSchedule::empty());
        }

        let grids = try_join_all(users.iter().map(|user| self.occupancy(user))).await?;

        let mut grid = OccupancyGrid::new();
        for other in &grids {
            grid.merge(other);
        }

        let schedules = grid.free_intervals();
        if schedules.is_empty() {
            return Err(ApiError::not_found(
                "No free schedules found",
                "No free schedules found for the provided users",
            ));
        }

        Ok(FreeSchedule { schedules })
    }

    async fn occupancy(&self, user_id: &str) -> DbResult<OccupancyGrid> {
        let routines = self.routines.list_by_user(user_id).await?;
        let bookings: Vec<Schedule> = routines.iter().map(RoutineData::schedule).collect();

        let mut grid = OccupancyGrid::new();
        grid.book_all(&bookings);
        Ok(grid)
    }
}

fn invalid_routine(reason: &str) -> ApiError {
    ApiError::validation(
        "Invalid routine data",
        format!("The routine data is invalid, {}", reason),
    )
}
