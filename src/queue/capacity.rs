//! Can anyone actually service this job?

use std::collections::HashSet;

use uuid::Uuid;

use crate::types::{JobView, WorkerView};

/// Scan `active_workers` for one that can generate for `job`, stopping at
/// the first match.
///
/// A restriction set narrows the scan to named candidates: workers that are
/// neither already assigned to the job nor in the set are skipped. Without
/// one, every active worker is a candidate.
pub fn has_valid_worker<F>(
    job: &JobView,
    active_workers: &[WorkerView],
    restrict_to: Option<&HashSet<Uuid>>,
    can_generate: F,
) -> bool
where
    F: Fn(&WorkerView, &JobView) -> (bool, Option<String>),
{
    for worker in active_workers {
        if let Some(allowed) = restrict_to {
            let already_assigned = job.assigned_workers.contains(&worker.id);
            if !already_assigned && !allowed.contains(&worker.id) {
                continue;
            }
        }
        let (ok, reason) = can_generate(worker, job);
        if ok {
            return true;
        }
        if let Some(reason) = reason {
            tracing::trace!(worker = %worker.name, job = %job.id, %reason, "Worker skipped");
        }
    }
    false
}
