use super::model::Interval;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("Schedule is disabled; only enabled schedules can be translated")]
    Disabled,

    #[error("Enabled schedule requires 'cron' or an interval (daily, weekly, monthly)")]
    MissingTrigger,

    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange { field: &'static str, value: u32, min: u32, max: u32 },

    #[error("{interval} schedule requires '{field}'")]
    MissingField { interval: Interval, field: &'static str },

    #[error("Invalid day_of_week '{0}'. Use one of: monday, tuesday, wednesday, thursday, friday, saturday, sunday")]
    InvalidDayOfWeek(String),

    #[error("Invalid cron expression '{expression}': {reason}")]
    InvalidCron { expression: String, reason: String },
}

impl ScheduleError {
    /// Config field the error points at, relative to the schedule table.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ScheduleError::Disabled => Some("enabled"),
            ScheduleError::MissingTrigger => None,
            ScheduleError::OutOfRange { field, .. } | ScheduleError::MissingField { field, .. } => {
                Some(field)
            }
            ScheduleError::InvalidDayOfWeek(_) => Some("day_of_week"),
            ScheduleError::InvalidCron { .. } => Some("cron"),
        }
    }
}
