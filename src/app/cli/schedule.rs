//! Schedule command implementation.

use std::path::Path;
use std::time::Duration;

use crate::app::api::{self, ScheduleOptions};
use crate::domain::AppError;

/// Grace period for abandoned blocking jobs once the runtime is torn down.
const RUNTIME_SHUTDOWN: Duration = Duration::from_secs(1);

pub fn run_scheduler(
    config_dir: &Path,
    drain_timeout: Option<u64>,
    run_now: bool,
) -> Result<i32, AppError> {
    let options = ScheduleOptions { drain_timeout: drain_timeout.map(Duration::from_secs), run_now };
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::InternalError(format!("Failed to start runtime: {}", err)))?;

    let result = runtime.block_on(api::schedule_at(config_dir, &options, shutdown_signal()));
    // Blocking jobs abandoned by the drain must not keep the process alive.
    runtime.shutdown_timeout(RUNTIME_SHUTDOWN);
    let outcome = result?;

    if outcome.registered.is_empty() {
        println!("⚠️  No scheduled domains were registered");
    }
    if outcome.composition_failures + outcome.registration_failures > 0 {
        println!(
            "⚠️  {} domain(s) not scheduled due to configuration errors",
            outcome.composition_failures + outcome.registration_failures
        );
    }
    if outcome.drain.completed {
        println!("✅ Scheduler stopped");
        Ok(0)
    } else {
        println!("⚠️  Scheduler stopped; abandoned: {}", outcome.drain.abandoned.join(", "));
        Ok(1)
    }
}

/// Resolves on Ctrl-C, or on SIGTERM where available.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "cannot listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
