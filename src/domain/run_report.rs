//! Per-invocation execution results.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Configuration for the domain could not be composed.
    Composition,
    /// No pipeline is registered under the domain's key.
    DomainNotFound,
    /// The pipeline returned an error.
    Pipeline,
    /// The pipeline panicked.
    Panic,
}

impl FailureKind {
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::Composition => "ConfigComposition",
            FailureKind::DomainNotFound => "DomainNotFound",
            FailureKind::Pipeline => "PipelineExecution",
            FailureKind::Panic => "Panic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Succeeded,
    Failed { kind: FailureKind, reason: String },
    Skipped { reason: String },
}

impl Outcome {
    pub fn failed(kind: FailureKind, reason: impl Into<String>) -> Self {
        Outcome::Failed { kind, reason: reason.into() }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Outcome::Skipped { reason: reason.into() }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Succeeded => f.write_str("succeeded"),
            Outcome::Failed { kind, reason } => write!(f, "failed ({}): {}", kind.label(), reason),
            Outcome::Skipped { reason } => write!(f, "skipped: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainOutcome {
    pub domain: String,
    pub outcome: Outcome,
    #[serde(serialize_with = "serialize_millis")]
    pub duration: Duration,
}

fn serialize_millis<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u128(duration.as_millis())
}

/// Every domain attempted by one invocation, in attempt order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub entries: Vec<DomainOutcome>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: DomainOutcome) {
        self.entries.push(entry);
    }

    pub fn record(&mut self, domain: impl Into<String>, outcome: Outcome, duration: Duration) {
        self.push(DomainOutcome { domain: domain.into(), outcome, duration });
    }

    pub fn succeeded(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Succeeded))
    }

    pub fn failed(&self) -> usize {
        self.count(Outcome::is_failure)
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped { .. }))
    }

    fn count(&self, predicate: impl Fn(&Outcome) -> bool) -> usize {
        self.entries.iter().filter(|entry| predicate(&entry.outcome)).count()
    }

    pub fn get(&self, domain: &str) -> Option<&DomainOutcome> {
        self.entries.iter().find(|entry| entry.domain == domain)
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Process exit status for batch runs: 0 only when nothing failed.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }

    /// Plain-text per-domain table followed by a totals line.
    pub fn render_table(&self) -> String {
        let width = self.entries.iter().map(|e| e.domain.len()).max().unwrap_or(0).max("DOMAIN".len());

        let mut out = format!("{:<width$}  {:<9}  {:>8}  DETAIL\n", "DOMAIN", "STATUS", "TIME");
        for entry in &self.entries {
            let (status, detail) = match &entry.outcome {
                Outcome::Succeeded => ("ok", String::new()),
                Outcome::Failed { kind, reason } => ("FAILED", format!("{}: {}", kind.label(), reason)),
                Outcome::Skipped { reason } => ("skipped", reason.clone()),
            };
            out.push_str(&format!(
                "{:<width$}  {:<9}  {:>7.2}s  {}\n",
                entry.domain,
                status,
                entry.duration.as_secs_f64(),
                detail
            ));
        }
        out.push_str(&format!(
            "{} succeeded, {} failed, {} skipped",
            self.succeeded(),
            self.failed(),
            self.skipped()
        ));
        out
    }
}
