//! Demand and supply grouped by model name.
//!
//! A job requesting several models lands in every matching bucket, so
//! aggregate demand across models is intentionally inflated; there is no
//! more accurate way to split it before a worker commits to one model.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::types::{JobView, WorkerView};

/// Group pending jobs under each model they may be serviced by.
pub fn jobs_by_model(jobs: &[JobView]) -> HashMap<String, Vec<&JobView>> {
    let mut buckets: HashMap<String, Vec<&JobView>> = HashMap::new();
    for job in jobs {
        for model in &job.models {
            if model.is_empty() {
                continue;
            }
            buckets.entry(model.clone()).or_default().push(job);
        }
    }
    buckets
}

/// Group workers under each model they offer, keeping only workers that
/// checked in within the activity window.
pub fn active_workers_by_model(
    workers: &[WorkerView],
    now: DateTime<Utc>,
    window: Duration,
) -> HashMap<String, Vec<&WorkerView>> {
    let mut buckets: HashMap<String, Vec<&WorkerView>> = HashMap::new();
    for worker in workers.iter().filter(|w| w.is_active(now, window)) {
        for model in &worker.models {
            if model.is_empty() {
                continue;
            }
            buckets.entry(model.clone()).or_default().push(worker);
        }
    }
    buckets
}
