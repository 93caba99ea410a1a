//! External contracts the core is computed against.
//!
//! Persistence, authentication, and the priority formula all live outside
//! this crate. Each core operation takes a fresh snapshot through these
//! traits so results never go stale under concurrent check-ins.

use std::cmp::Ordering;

use uuid::Uuid;

use crate::types::{AccountView, JobView, WorkerView};

/// Source of pending generation requests.
pub trait JobProvider {
    /// Every job that has been submitted and not yet discarded.
    fn pending_jobs(&self) -> Vec<JobView>;

    fn job_by_id(&self, id: &Uuid) -> Option<JobView>;

    /// True while the job still has outstanding work to hand out.
    /// Externally defined; the core only calls it.
    fn needs_generation(&self, job: &JobView) -> bool;
}

/// Source of registered workers and their capabilities.
pub trait WorkerProvider {
    fn all_workers(&self) -> Vec<WorkerView>;

    fn worker_by_id(&self, id: &Uuid) -> Option<WorkerView>;

    fn worker_by_name(&self, name: &str) -> Option<WorkerView>;

    /// Whether this worker can service this job, with a human-readable
    /// refusal reason when it cannot.
    fn can_generate(&self, worker: &WorkerView, job: &JobView) -> (bool, Option<String>);
}

/// Source of user accounts and the balance mutation entry point.
pub trait AccountProvider {
    fn by_id(&self, id: u64) -> Option<AccountView>;

    fn by_username(&self, username: &str) -> Option<AccountView>;

    fn by_api_key(&self, api_key: &str) -> Option<AccountView>;

    /// Identity of the distinguished anonymous account.
    fn anonymous_id(&self) -> u64;

    /// Apply a balance delta with an audit tag (e.g. "gifted", "received").
    /// Callers are responsible for serializing conflicting mutations; the
    /// ledger does this through its per-account locks.
    fn modify_kudos(&self, id: u64, delta: f64, tag: &str);
}

/// Current average throughput per model, in things per second per thread.
pub trait PerformanceOracle {
    fn model_avg(&self, model: &str) -> f64;
}

/// The pluggable priority formula.
///
/// `compare` orders ascending by the opaque priority key; the queue view
/// applies it in reverse with a stable sort so higher-priority jobs come
/// first and ties keep their submission order.
pub trait PriorityComparator: Send + Sync {
    fn compare(&self, a: &JobView, b: &JobView) -> Ordering;
}
