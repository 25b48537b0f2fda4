pub mod anthropometric;
pub mod exercise;
pub mod fixed_data;
pub mod objective;
pub mod routine;

pub use anthropometric::{AnthropometricData, Measurements};
pub use exercise::{AllExercisesInDay, ExerciseData, ExerciseInput};
pub use fixed_data::{BaseFixedUserData, FixedDataInput, FixedUserData};
pub use objective::{ObjectiveData, ObjectiveInput};
pub use routine::{NewRoutine, RoutineData, RoutineInput};
