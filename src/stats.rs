//! Aggregate usage and queue totals over the current job/worker state.

use std::collections::HashMap;
use std::net::IpAddr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{round2, JobView, WorkerView};

/// Lifetime contribution totals across the whole worker pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UsageTotals {
    pub things: f64,
    pub fulfilments: u64,
}

/// Outstanding demand across the whole queue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QueueTotals {
    pub queued_requests: i64,
    /// Scaled by the configured thing divisor, rounded to two decimals.
    pub queued_things: f64,
}

/// Total concurrent capacity (threads) across active workers.
pub fn count_active_workers(workers: &[WorkerView], now: DateTime<Utc>, window: Duration) -> i64 {
    workers
        .iter()
        .filter(|w| w.is_active(now, window))
        .map(|w| w.threads)
        .sum()
}

/// Group every registered worker (active or not) by its IP address.
pub fn workers_by_ip(workers: &[WorkerView]) -> HashMap<IpAddr, Vec<&WorkerView>> {
    let mut per_ip: HashMap<IpAddr, Vec<&WorkerView>> = HashMap::new();
    for worker in workers {
        per_ip.entry(worker.ipaddr).or_default().push(worker);
    }
    per_ip
}

/// How many workers share the given IP address.
pub fn count_workers_in_ip(workers: &[WorkerView], ipaddr: IpAddr) -> usize {
    workers_by_ip(workers)
        .get(&ipaddr)
        .map(|found| found.len())
        .unwrap_or(0)
}

/// Sum lifetime contributions and fulfilments over all workers.
pub fn total_usage(workers: &[WorkerView]) -> UsageTotals {
    let mut totals = UsageTotals {
        things: 0.0,
        fulfilments: 0,
    };
    for worker in workers {
        totals.things += worker.contributions;
        totals.fulfilments += worker.fulfilments;
    }
    totals
}

/// The worker with the highest lifetime contribution.
pub fn top_worker(workers: &[WorkerView]) -> Option<&WorkerView> {
    workers
        .iter()
        .max_by(|a, b| a.contributions.total_cmp(&b.contributions))
}

/// Count the generations a user still has waiting.
///
/// With a non-empty `models` filter, only jobs requesting at least one of
/// those models are counted.
pub fn count_waiting_requests(jobs: &[JobView], user_id: u64, models: &[String]) -> i64 {
    let mut count = 0;
    for job in jobs {
        if job.user_id != user_id || job.is_complete() {
            continue;
        }
        if !models.is_empty() && !models.iter().any(|m| job.models.contains(m)) {
            continue;
        }
        count += job.n;
    }
    count
}

/// Total outstanding requests and queued work volume across all jobs.
pub fn count_totals(jobs: &[JobView], thing_divisor: f64) -> QueueTotals {
    let mut totals = QueueTotals {
        queued_requests: 0,
        queued_things: 0.0,
    };
    for job in jobs {
        let outstanding = job.outstanding();
        totals.queued_requests += outstanding;
        if outstanding > 0 {
            totals.queued_things += job.things * outstanding as f64 / thing_divisor;
        }
    }
    totals.queued_things = round2(totals.queued_things);
    totals
}
