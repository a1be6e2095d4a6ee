pub mod api;
pub mod cli;
pub mod commands;
pub mod compose;
mod context;
pub mod logging;
pub mod orchestrator;
pub mod scheduler;

pub use context::AppContext;
pub use orchestrator::Orchestrator;
pub use scheduler::SchedulerRunner;
