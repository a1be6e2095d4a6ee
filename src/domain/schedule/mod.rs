pub mod error;
pub mod model;
pub mod trigger;
mod weekday_field;

pub use error::ScheduleError;
pub use model::{DayOfWeek, Interval, ScheduleConfig};
pub use trigger::{TriggerSpec, translate};
