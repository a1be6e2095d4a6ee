use chrono::{DateTime, Local};

/// Wall-clock source used to place trigger firings.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}
