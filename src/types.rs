use std::collections::HashMap;
use std::net::IpAddr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Round a work-volume figure to two decimals, the precision used for all
/// reported "things" totals.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Read-only snapshot of a pending generation request.
///
/// Owned by external persistence; the core never mutates one. The `models`
/// set lists every model name the request may be serviced by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobView {
    pub id: Uuid,
    pub user_id: u64,
    /// Generations still requested. Never negative.
    pub n: i64,
    /// Work units this request represents (e.g. pixel-steps).
    pub things: f64,
    pub models: Vec<String>,
    /// Sub-generations currently being processed by workers.
    pub processing: i64,
    /// Work units still queued for this request, as reported by the owner.
    pub queued_things: f64,
    /// Workers already holding an assignment for this request.
    pub assigned_workers: Vec<Uuid>,
}

impl JobView {
    /// A request is complete once nothing is requested and nothing is
    /// in flight. Complete requests drop out of every queue computation.
    pub fn is_complete(&self) -> bool {
        self.n == 0 && self.processing == 0
    }

    /// Requested plus in-flight generations.
    pub fn outstanding(&self) -> i64 {
        self.n + self.processing
    }
}

/// Read-only snapshot of a registered worker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerView {
    pub id: Uuid,
    pub user_id: u64,
    pub name: String,
    pub ipaddr: IpAddr,
    /// Concurrent job capacity.
    pub threads: i64,
    pub models: Vec<String>,
    /// Rolling per-model throughput figures reported by the worker.
    pub performance: HashMap<String, f64>,
    pub last_check_in: DateTime<Utc>,
    /// Lifetime contributed work units.
    pub contributions: f64,
    /// Lifetime fulfilled generations.
    pub fulfilments: u64,
}

impl WorkerView {
    /// Active means checked in within the activity window.
    pub fn is_active(&self, now: DateTime<Utc>, window: Duration) -> bool {
        now - self.last_check_in <= window
    }
}

/// Read-only snapshot of a user account. Balance mutation goes through
/// [`AccountProvider::modify_kudos`](crate::provider::AccountProvider::modify_kudos).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountView {
    pub id: u64,
    pub username: String,
    pub kudos: f64,
    /// Floor below which voluntary transfers are blocked. May be negative,
    /// allowing the account a bounded deficit.
    pub min_kudos: f64,
    pub suspicious: bool,
}

/// Per-model queue report produced by the throughput estimator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelQueueEntry {
    pub name: String,
    /// Total threads across active workers offering this model.
    pub count: i64,
    /// Average model throughput from the performance oracle.
    pub performance: f64,
    pub workers: Vec<Uuid>,
    /// Work units queued for this model.
    pub queued: f64,
    /// Seconds until the queue clears at current throughput.
    /// -1 when work is queued but throughput is zero.
    pub eta: i64,
}

/// Queue placement of a single job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueueStats {
    /// 0-based rank in the priority-ordered queue; -1 when not queued.
    pub position: i64,
    /// Work units queued strictly ahead, rounded to two decimals.
    pub things_ahead: f64,
    /// Generations queued strictly ahead.
    pub jobs_ahead: i64,
}

impl QueueStats {
    /// The sentinel for a job that is complete or unknown.
    pub fn not_queued() -> Self {
        Self {
            position: -1,
            things_ahead: 0.0,
            jobs_ahead: 0,
        }
    }
}
