//! The live priority queue: ordering, position, and work-ahead queries.
//!
//! Nothing here is cached. Priority inputs (account balances, mostly) shift
//! continuously, so callers re-sort from a fresh snapshot on every query.

use uuid::Uuid;

use crate::provider::PriorityComparator;
use crate::types::{round2, JobView, QueueStats};

/// Stable-sort jobs so the highest priority comes first. Jobs the
/// comparator considers equal keep their input order.
pub fn sort_by_priority(jobs: &mut [JobView], order: &dyn PriorityComparator) {
    jobs.sort_by(|a, b| order.compare(b, a));
}

/// Walk the priority-ordered queue and report where `target` sits.
///
/// `position` is the 0-based rank, which doubles as the number of jobs
/// strictly ahead. `things_ahead` and `jobs_ahead` accumulate only over
/// entries strictly before the target. A target missing from the sequence
/// (completed between snapshot and lookup) reports the not-queued sentinel.
pub fn queue_stats(ordered: &[JobView], target: &Uuid) -> QueueStats {
    let mut things_ahead = 0.0;
    let mut jobs_ahead = 0;
    for (position, job) in ordered.iter().enumerate() {
        if job.id == *target {
            return QueueStats {
                position: position as i64,
                things_ahead: round2(things_ahead),
                jobs_ahead,
            };
        }
        things_ahead += job.queued_things;
        jobs_ahead += job.n;
    }
    QueueStats::not_queued()
}
