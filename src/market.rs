//! The marketplace facade that wires config, providers, comparator, and
//! ledger into one query surface.
//!
//! Every read below is a snapshot computation: it pulls current state from
//! the providers at call time and holds nothing between calls. The ledger
//! is the only component with write semantics.

use std::collections::HashSet;
use std::net::IpAddr;

use chrono::Utc;
use uuid::Uuid;

use crate::config::CoreConfig;
use crate::error::TransferResult;
use crate::ledger::KudosLedger;
use crate::provider::{
    AccountProvider, JobProvider, PerformanceOracle, PriorityComparator, WorkerProvider,
};
use crate::queue::{capacity, estimator, view};
use crate::stats::{self, QueueTotals, UsageTotals};
use crate::types::{JobView, ModelQueueEntry, QueueStats, WorkerView};

pub struct Marketplace<J, W, A, O>
where
    J: JobProvider,
    W: WorkerProvider,
    A: AccountProvider,
    O: PerformanceOracle,
{
    config: CoreConfig,
    jobs: J,
    workers: W,
    oracle: O,
    ledger: KudosLedger<A>,
    order: Box<dyn PriorityComparator>,
}

impl<J, W, A, O> Marketplace<J, W, A, O>
where
    J: JobProvider,
    W: WorkerProvider,
    A: AccountProvider,
    O: PerformanceOracle,
{
    pub fn new(
        config: CoreConfig,
        jobs: J,
        workers: W,
        accounts: A,
        oracle: O,
        order: Box<dyn PriorityComparator>,
    ) -> Self {
        let ledger = KudosLedger::new(accounts, &config);
        Self {
            config,
            jobs,
            workers,
            oracle,
            ledger,
            order,
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn ledger(&self) -> &KudosLedger<A> {
        &self.ledger
    }

    /// Workers that checked in within the activity window.
    pub fn active_workers(&self) -> Vec<WorkerView> {
        let now = Utc::now();
        let window = self.config.activity_window();
        self.workers
            .all_workers()
            .into_iter()
            .filter(|w| w.is_active(now, window))
            .collect()
    }

    /// Per-model queue report. With `lite`, only the supply side is
    /// computed (worker counts and oracle performance, no demand or ETA).
    pub fn available_models(&self, lite: bool) -> Vec<ModelQueueEntry> {
        estimator::estimate_models(
            &self.jobs.pending_jobs(),
            &self.workers.all_workers(),
            &self.oracle,
            Utc::now(),
            self.config.activity_window(),
            lite,
        )
    }

    /// All jobs still needing generation, highest priority first.
    /// Recomputed from scratch on every call.
    pub fn waiting_jobs_by_priority(&self) -> Vec<JobView> {
        let mut jobs = self.jobs.pending_jobs();
        view::sort_by_priority(&mut jobs, self.order.as_ref());
        jobs.retain(|job| self.jobs.needs_generation(job));
        jobs
    }

    /// Queue placement for one job: 0-based position plus the work and
    /// generations strictly ahead of it. Jobs that are unknown or no
    /// longer need generation report the not-queued sentinel.
    pub fn queue_stats(&self, job_id: &Uuid) -> QueueStats {
        let Some(job) = self.jobs.job_by_id(job_id) else {
            return QueueStats::not_queued();
        };
        if !self.jobs.needs_generation(&job) {
            return QueueStats::not_queued();
        }
        view::queue_stats(&self.waiting_jobs_by_priority(), job_id)
    }

    /// True when at least one active worker can service the job, optionally
    /// restricted to specific candidate workers.
    pub fn has_valid_worker(&self, job: &JobView, restrict_to: Option<&HashSet<Uuid>>) -> bool {
        capacity::has_valid_worker(job, &self.active_workers(), restrict_to, |worker, job| {
            self.workers.can_generate(worker, job)
        })
    }

    pub fn count_active_worker_threads(&self) -> i64 {
        stats::count_active_workers(
            &self.workers.all_workers(),
            Utc::now(),
            self.config.activity_window(),
        )
    }

    pub fn count_workers_in_ip(&self, ipaddr: IpAddr) -> usize {
        stats::count_workers_in_ip(&self.workers.all_workers(), ipaddr)
    }

    pub fn total_usage(&self) -> UsageTotals {
        stats::total_usage(&self.workers.all_workers())
    }

    pub fn top_worker(&self) -> Option<WorkerView> {
        let workers = self.workers.all_workers();
        stats::top_worker(&workers).cloned()
    }

    pub fn count_waiting_requests(&self, user_id: u64, models: &[String]) -> i64 {
        stats::count_waiting_requests(&self.jobs.pending_jobs(), user_id, models)
    }

    pub fn count_totals(&self) -> QueueTotals {
        stats::count_totals(&self.jobs.pending_jobs(), self.config.thing_divisor)
    }

    pub fn transfer_kudos(&self, source: u64, dest: u64, amount: f64) -> TransferResult {
        self.ledger.transfer(source, dest, amount)
    }

    pub fn transfer_kudos_to_username(
        &self,
        source: u64,
        dest_username: &str,
        amount: f64,
    ) -> TransferResult {
        self.ledger.transfer_to_username(source, dest_username, amount)
    }

    pub fn transfer_kudos_from_api_key(
        &self,
        source_api_key: &str,
        dest_username: &str,
        amount: f64,
    ) -> TransferResult {
        self.ledger
            .transfer_from_api_key(source_api_key, dest_username, amount)
    }
}
