#![allow(dead_code)]

//! In-memory providers shared by the integration tests.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{Duration, Utc};
use uuid::Uuid;

use swarmgrid::provider::{
    AccountProvider, JobProvider, PerformanceOracle, PriorityComparator, WorkerProvider,
};
use swarmgrid::types::{AccountView, JobView, WorkerView};

pub fn job(user_id: u64, n: i64, things: f64, models: &[&str]) -> JobView {
    JobView {
        id: Uuid::new_v4(),
        user_id,
        n,
        things,
        models: models.iter().map(|m| m.to_string()).collect(),
        processing: 0,
        queued_things: things,
        assigned_workers: Vec::new(),
    }
}

pub fn worker(name: &str, threads: i64, models: &[&str], ipaddr: &str) -> WorkerView {
    WorkerView {
        id: Uuid::new_v4(),
        user_id: 1,
        name: name.to_string(),
        ipaddr: ipaddr.parse().unwrap(),
        threads,
        models: models.iter().map(|m| m.to_string()).collect(),
        performance: HashMap::new(),
        last_check_in: Utc::now(),
        contributions: 0.0,
        fulfilments: 0,
    }
}

pub fn stale_worker(name: &str, threads: i64, models: &[&str], ipaddr: &str) -> WorkerView {
    let mut w = worker(name, threads, models, ipaddr);
    w.last_check_in = Utc::now() - Duration::seconds(600);
    w
}

pub fn account(id: u64, username: &str, kudos: f64, min_kudos: f64) -> AccountView {
    AccountView {
        id,
        username: username.to_string(),
        kudos,
        min_kudos,
        suspicious: false,
    }
}

pub struct MemJobs {
    pub jobs: Vec<JobView>,
}

impl MemJobs {
    pub fn new(jobs: Vec<JobView>) -> Self {
        Self { jobs }
    }
}

impl JobProvider for MemJobs {
    fn pending_jobs(&self) -> Vec<JobView> {
        self.jobs.clone()
    }

    fn job_by_id(&self, id: &Uuid) -> Option<JobView> {
        self.jobs.iter().find(|j| j.id == *id).cloned()
    }

    fn needs_generation(&self, job: &JobView) -> bool {
        !job.is_complete()
    }
}

pub struct MemWorkers {
    pub workers: Vec<WorkerView>,
}

impl MemWorkers {
    pub fn new(workers: Vec<WorkerView>) -> Self {
        Self { workers }
    }
}

impl WorkerProvider for MemWorkers {
    fn all_workers(&self) -> Vec<WorkerView> {
        self.workers.clone()
    }

    fn worker_by_id(&self, id: &Uuid) -> Option<WorkerView> {
        self.workers.iter().find(|w| w.id == *id).cloned()
    }

    fn worker_by_name(&self, name: &str) -> Option<WorkerView> {
        self.workers.iter().find(|w| w.name == name).cloned()
    }

    fn can_generate(&self, worker: &WorkerView, job: &JobView) -> (bool, Option<String>) {
        if job.models.iter().any(|m| worker.models.contains(m)) {
            (true, None)
        } else {
            (false, Some("no matching model".to_string()))
        }
    }
}

/// Account store with an audit log of every balance mutation.
pub struct MemAccounts {
    accounts: Mutex<HashMap<u64, AccountView>>,
    api_keys: HashMap<String, u64>,
    anon_id: u64,
    pub audit: Mutex<Vec<(u64, f64, String)>>,
}

impl MemAccounts {
    pub fn new(anon_id: u64) -> Self {
        Self {
            accounts: Mutex::new(HashMap::new()),
            api_keys: HashMap::new(),
            anon_id,
            audit: Mutex::new(Vec::new()),
        }
    }

    pub fn add(&mut self, account: AccountView, api_key: &str) {
        self.api_keys.insert(api_key.to_string(), account.id);
        self.accounts.lock().unwrap().insert(account.id, account);
    }

    pub fn balance(&self, id: u64) -> f64 {
        self.accounts.lock().unwrap()[&id].kudos
    }

    pub fn set_suspicious(&self, id: u64) {
        self.accounts.lock().unwrap().get_mut(&id).unwrap().suspicious = true;
    }
}

impl AccountProvider for MemAccounts {
    fn by_id(&self, id: u64) -> Option<AccountView> {
        self.accounts.lock().unwrap().get(&id).cloned()
    }

    fn by_username(&self, username: &str) -> Option<AccountView> {
        self.accounts
            .lock()
            .unwrap()
            .values()
            .find(|a| a.username == username)
            .cloned()
    }

    fn by_api_key(&self, api_key: &str) -> Option<AccountView> {
        let id = *self.api_keys.get(api_key)?;
        self.by_id(id)
    }

    fn anonymous_id(&self) -> u64 {
        self.anon_id
    }

    fn modify_kudos(&self, id: u64, delta: f64, tag: &str) {
        if let Some(account) = self.accounts.lock().unwrap().get_mut(&id) {
            account.kudos += delta;
        }
        self.audit.lock().unwrap().push((id, delta, tag.to_string()));
    }
}

/// Orders jobs by a fixed per-job key, standing in for the external
/// priority formula.
pub struct KeyOrder {
    pub keys: HashMap<Uuid, i64>,
}

impl KeyOrder {
    pub fn new(keys: HashMap<Uuid, i64>) -> Self {
        Self { keys }
    }
}

impl PriorityComparator for KeyOrder {
    fn compare(&self, a: &JobView, b: &JobView) -> Ordering {
        let ka = self.keys.get(&a.id).copied().unwrap_or(0);
        let kb = self.keys.get(&b.id).copied().unwrap_or(0);
        ka.cmp(&kb)
    }
}

/// Fixed per-model averages standing in for the performance oracle.
pub struct FixedOracle {
    pub avgs: HashMap<String, f64>,
}

impl FixedOracle {
    pub fn new(avgs: &[(&str, f64)]) -> Self {
        Self {
            avgs: avgs.iter().map(|(m, v)| (m.to_string(), *v)).collect(),
        }
    }
}

impl PerformanceOracle for FixedOracle {
    fn model_avg(&self, model: &str) -> f64 {
        self.avgs.get(model).copied().unwrap_or(0.0)
    }
}
