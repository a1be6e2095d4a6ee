//! Perpetual scheduled execution.
//!
//! Each registered domain gets a supervisor task that sleeps until the next
//! firing of its trigger. Firings run on the blocking pool through the same
//! single-domain path as batch runs, so one domain's failure never touches
//! another domain's job.

mod state;

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::app::orchestrator::Orchestrator;
use crate::domain::schedule::translate;
use crate::domain::{AppError, DomainConfig, OverlapPolicy, Outcome, TriggerSpec};
use crate::ports::Clock;
use crate::services::SystemClock;

pub use state::{DrainReport, FireDecision, JobStats, RunnerState};
use state::DomainSlot;

struct Job {
    config: Arc<DomainConfig>,
    trigger: TriggerSpec,
    slot: Arc<DomainSlot>,
}

struct Registration {
    job: Arc<Job>,
    supervisor: JoinHandle<()>,
}

struct Shared {
    orchestrator: Orchestrator,
    policy: OverlapPolicy,
    clock: Arc<dyn Clock>,
    state: watch::Sender<RunnerState>,
    stop: watch::Sender<bool>,
    in_flight: watch::Sender<usize>,
    jobs: Mutex<BTreeMap<String, Registration>>,
    slots: Mutex<BTreeMap<String, Arc<DomainSlot>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-process recurring job runner.
///
/// Must be driven from inside a tokio runtime.
pub struct SchedulerRunner {
    shared: Arc<Shared>,
}

impl SchedulerRunner {
    pub fn new(orchestrator: Orchestrator, policy: OverlapPolicy) -> Self {
        Self::with_clock(orchestrator, policy, Arc::new(SystemClock))
    }

    /// Runner whose triggers are placed against `clock` instead of the
    /// system time. Sleeps still run on the tokio timer.
    pub fn with_clock(
        orchestrator: Orchestrator,
        policy: OverlapPolicy,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let (state, _) = watch::channel(RunnerState::Idle);
        let (stop, _) = watch::channel(false);
        let (in_flight, _) = watch::channel(0usize);
        Self {
            shared: Arc::new(Shared {
                orchestrator,
                policy,
                clock,
                state,
                stop,
                in_flight,
                jobs: Mutex::new(BTreeMap::new()),
                slots: Mutex::new(BTreeMap::new()),
            }),
        }
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.shared.policy
    }

    pub fn state(&self) -> RunnerState {
        *self.shared.state.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<RunnerState> {
        self.shared.state.subscribe()
    }

    /// Register a job for every enabled domain with an enabled schedule,
    /// then enter `Running`. Registration errors are returned but leave the
    /// other jobs in place.
    pub fn build<'a, I>(&self, domains: I) -> Vec<AppError>
    where
        I: IntoIterator<Item = &'a DomainConfig>,
    {
        self.shared.state.send_replace(RunnerState::Building);

        let mut errors = Vec::new();
        for config in domains {
            if !config.enabled || !config.schedule.enabled {
                tracing::debug!(domain = %config.name, "no enabled schedule; not registered");
                continue;
            }
            if let Err(err) = self.register(config.clone()) {
                tracing::error!(domain = %config.name, error = %err, "job registration failed");
                errors.push(err);
            }
        }

        self.shared.state.send_replace(RunnerState::Running);
        let jobs = self.job_names();
        if jobs.is_empty() {
            tracing::info!("scheduler running with no jobs");
        } else {
            tracing::info!(jobs = jobs.len(), "scheduler running");
        }
        errors
    }

    /// Register (or replace) the job for `config.name`.
    pub fn register(&self, config: DomainConfig) -> Result<(), AppError> {
        let name = config.name.to_string();
        if !self.state().accepts_jobs() {
            return Err(AppError::SchedulerRegistration {
                domain: name,
                details: format!("scheduler is {}", self.state()),
            });
        }

        let trigger = translate(&config.schedule).map_err(|err| AppError::SchedulerRegistration {
            domain: name.clone(),
            details: err.to_string(),
        })?;

        let slot = Arc::clone(lock(&self.shared.slots).entry(name.clone()).or_default());
        let job = Arc::new(Job { config: Arc::new(config), trigger, slot });
        let supervisor = tokio::spawn(supervise(
            Arc::clone(&self.shared),
            Arc::clone(&job),
            self.shared.stop.subscribe(),
        ));

        tracing::info!(domain = %name, trigger = %job.trigger.to_cron_string(), "job registered");
        let previous = lock(&self.shared.jobs).insert(name.clone(), Registration { job, supervisor });
        if let Some(previous) = previous {
            previous.supervisor.abort();
            tracing::info!(domain = %name, "replaced previous job definition");
        }
        Ok(())
    }

    pub fn job_names(&self) -> Vec<String> {
        lock(&self.shared.jobs).keys().cloned().collect()
    }

    pub fn stats(&self, domain: &str) -> Option<JobStats> {
        lock(&self.shared.slots).get(domain).map(|slot| slot.stats())
    }

    /// Next time the domain's job is due, if registered.
    pub fn next_fire(&self, domain: &str) -> Option<DateTime<Local>> {
        let now = self.shared.clock.now();
        lock(&self.shared.jobs).get(domain).and_then(|reg| reg.job.trigger.next_after(&now))
    }

    /// Fire a registered job immediately, under the same overlap policy.
    pub fn trigger_now(&self, domain: &str) -> Result<FireDecision, AppError> {
        let job = lock(&self.shared.jobs)
            .get(domain)
            .map(|reg| Arc::clone(&reg.job))
            .ok_or_else(|| AppError::config_error(format!("No scheduled job for domain '{}'", domain)))?;
        Ok(self.shared.dispatch(&job))
    }

    /// Wait until no firing is in flight.
    pub async fn wait_idle(&self) {
        let mut in_flight = self.shared.in_flight.subscribe();
        let _ = in_flight.wait_for(|count| *count == 0).await;
    }

    /// Stop scheduling, then wait up to `timeout` for in-flight firings.
    pub async fn stop(&self, timeout: Duration) -> DrainReport {
        self.shared.state.send_replace(RunnerState::Stopping);
        self.shared.stop.send_replace(true);
        for (_, registration) in std::mem::take(&mut *lock(&self.shared.jobs)) {
            registration.supervisor.abort();
        }
        tracing::info!(timeout_secs = timeout.as_secs_f64(), "scheduler stopping; draining in-flight jobs");

        let mut in_flight = self.shared.in_flight.subscribe();
        let completed =
            tokio::time::timeout(timeout, in_flight.wait_for(|count| *count == 0)).await.is_ok();

        let abandoned: Vec<String> = if completed {
            Vec::new()
        } else {
            lock(&self.shared.slots)
                .iter()
                .filter(|(_, slot)| slot.active.load(Ordering::SeqCst) > 0)
                .map(|(name, _)| name.clone())
                .collect()
        };
        if !abandoned.is_empty() {
            tracing::warn!(domains = ?abandoned, "drain timeout elapsed; abandoning running jobs");
        }

        self.shared.state.send_replace(RunnerState::Stopped);
        tracing::info!("scheduler stopped");
        DrainReport { completed, abandoned }
    }

    /// Run until `shutdown` resolves, then drain.
    pub async fn run_until<F>(&self, shutdown: F, drain_timeout: Duration) -> DrainReport
    where
        F: Future<Output = ()>,
    {
        shutdown.await;
        tracing::info!("stop signal received");
        self.stop(drain_timeout).await
    }
}

impl Shared {
    fn dispatch(self: &Arc<Self>, job: &Arc<Job>) -> FireDecision {
        let domain = job.config.name.as_str();
        if *self.stop.borrow() {
            tracing::debug!(domain, "runner stopping; firing dropped");
            return FireDecision::Stopped;
        }

        job.slot.record_fired();
        if self.policy == OverlapPolicy::Skip && job.slot.running.swap(true, Ordering::SeqCst) {
            job.slot.record_skipped();
            tracing::warn!(domain, "previous firing still running; skipping this firing");
            return FireDecision::Skipped;
        }

        self.in_flight.send_modify(|count| *count += 1);
        job.slot.active.fetch_add(1, Ordering::SeqCst);

        let shared = Arc::clone(self);
        let job = Arc::clone(job);
        tokio::spawn(async move {
            let _queued = match shared.policy {
                OverlapPolicy::Queue => Some(job.slot.queue.lock().await),
                OverlapPolicy::Skip | OverlapPolicy::Concurrent => None,
            };

            let orchestrator = shared.orchestrator.clone();
            let config = Arc::clone(&job.config);
            let outcome = tokio::task::spawn_blocking(move || orchestrator.run_domain(&config)).await;

            let success = match outcome {
                Ok(result) => match result.outcome {
                    Outcome::Succeeded => true,
                    Outcome::Failed { .. } => {
                        tracing::warn!(domain = %job.config.name, "scheduled firing failed; job stays registered");
                        false
                    }
                    Outcome::Skipped { .. } => true,
                },
                Err(err) => {
                    tracing::error!(domain = %job.config.name, error = %err, "firing task aborted");
                    false
                }
            };
            job.slot.record_finished(success);

            if shared.policy == OverlapPolicy::Skip {
                job.slot.running.store(false, Ordering::SeqCst);
            }
            job.slot.active.fetch_sub(1, Ordering::SeqCst);
            shared.in_flight.send_modify(|count| *count -= 1);
        });

        FireDecision::Dispatched
    }
}

async fn supervise(shared: Arc<Shared>, job: Arc<Job>, mut stop: watch::Receiver<bool>) {
    let domain = job.config.name.as_str();
    let mut cursor = shared.clock.now();

    loop {
        let Some(next) = job.trigger.next_after(&cursor) else {
            tracing::warn!(domain, "trigger has no future firing; job idle");
            return;
        };
        tracing::debug!(domain, next = %next, "next firing scheduled");

        let wait = (next - shared.clock.now()).to_std().unwrap_or(Duration::ZERO);
        tokio::select! {
            _ = tokio::time::sleep(wait) => {}
            _ = stop.wait_for(|stopped| *stopped) => return,
        }

        shared.dispatch(&job);
        cursor = next.max(shared.clock.now());
    }
}
