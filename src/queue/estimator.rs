//! Per-model queue volume, available throughput, and ETA.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::provider::PerformanceOracle;
use crate::queue::index;
use crate::types::{round2, JobView, ModelQueueEntry, WorkerView};

/// Sum the queued work units under each model with demand.
///
/// Only jobs with outstanding generations contribute, but a model whose
/// bucket holds nothing outstanding still gets a 0.0 entry. Totals are
/// rounded to two decimals per model.
pub fn things_per_model(jobs: &[JobView]) -> HashMap<String, f64> {
    let mut totals: HashMap<String, f64> = HashMap::new();
    for (model, bucket) in index::jobs_by_model(jobs) {
        let mut queued = 0.0;
        for job in bucket {
            if job.outstanding() > 0 {
                queued += job.things;
            }
        }
        totals.insert(model, round2(queued));
    }
    totals
}

/// Build the per-model queue report.
///
/// The supply side comes from active workers; each model's `performance` is
/// the oracle's current average, `count` the thread sum across workers
/// offering it. With `lite` set, that supply-side view is returned as-is,
/// which is enough for "which models have any capacity" queries.
///
/// Otherwise queued demand and ETA are filled in. A model with queued work
/// but zero throughput reports `eta == -1` rather than dividing by zero,
/// and a model with demand but no active worker is dropped from the result
/// entirely. Entry order is not significant.
pub fn estimate_models<O: PerformanceOracle + ?Sized>(
    jobs: &[JobView],
    workers: &[WorkerView],
    oracle: &O,
    now: DateTime<Utc>,
    window: Duration,
    lite: bool,
) -> Vec<ModelQueueEntry> {
    let mut models: HashMap<String, ModelQueueEntry> = HashMap::new();
    for worker in workers.iter().filter(|w| w.is_active(now, window)) {
        for model in &worker.models {
            if model.is_empty() {
                continue;
            }
            let entry = models
                .entry(model.clone())
                .or_insert_with(|| ModelQueueEntry {
                    name: model.clone(),
                    count: 0,
                    performance: oracle.model_avg(model),
                    workers: Vec::new(),
                    queued: 0.0,
                    eta: 0,
                });
            entry.count += worker.threads;
            entry.workers.push(worker.id);
        }
    }
    if lite {
        return models.into_values().collect();
    }

    for (model, queued) in things_per_model(jobs) {
        // Demand for a model nobody serves is dropped, not reported with an
        // unbounded ETA. Downstream callers rely on the omission.
        let Some(entry) = models.get_mut(&model) else {
            continue;
        };
        entry.queued = queued;
        let total_throughput = entry.count as f64 * entry.performance;
        entry.eta = if total_throughput > 0.0 {
            (entry.queued / total_throughput) as i64
        } else {
            -1
        };
    }
    models.into_values().collect()
}
