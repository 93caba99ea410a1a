mod common;

use std::collections::HashMap;

use common::{account, job, worker, FixedOracle, KeyOrder, MemAccounts, MemJobs, MemWorkers};
use swarmgrid::{CoreConfig, Marketplace};

fn market() -> Marketplace<MemJobs, MemWorkers, MemAccounts, FixedOracle> {
    let mut accounts = MemAccounts::new(0);
    accounts.add(account(0, "anonymous#0", 0.0, 0.0), "anon");
    accounts.add(account(1, "alice#1", 100.0, 0.0), "key-alice");
    accounts.add(account(2, "bob#2", 0.0, 0.0), "key-bob");

    Marketplace::new(
        CoreConfig::default().with_thing_divisor(10.0),
        MemJobs::new(vec![job(1, 2, 50.0, &["m"]), job(2, 1, 10.0, &["m"])]),
        MemWorkers::new(vec![
            worker("w1", 2, &["m"], "10.0.0.1"),
            worker("w2", 3, &["m"], "10.0.0.1"),
        ]),
        accounts,
        FixedOracle::new(&[("m", 2.0)]),
        Box::new(KeyOrder::new(HashMap::new())),
    )
}

#[test]
fn test_available_models_report() {
    let market = market();
    let entries = market.available_models(false);
    assert_eq!(entries.len(), 1);
    let m = &entries[0];
    assert_eq!(m.count, 5);
    assert_eq!(m.queued, 60.0);
    // floor(60 / (5 * 2))
    assert_eq!(m.eta, 6);

    let lite = market.available_models(true);
    assert_eq!(lite[0].queued, 0.0);
    assert_eq!(lite[0].eta, 0);
}

#[test]
fn test_pool_wide_aggregations() {
    let market = market();
    assert_eq!(market.count_active_worker_threads(), 5);
    assert_eq!(market.count_workers_in_ip("10.0.0.1".parse().unwrap()), 2);
    assert_eq!(market.count_waiting_requests(1, &[]), 2);

    let totals = market.count_totals();
    assert_eq!(totals.queued_requests, 3);
    // (50 * 2 + 10 * 1) / 10
    assert_eq!(totals.queued_things, 11.0);
}

#[test]
fn test_model_entries_serialize_for_the_api_layer() {
    let market = market();
    let entries = market.available_models(false);
    let json: serde_json::Value = serde_json::to_value(&entries[0]).unwrap();
    assert_eq!(json["name"], "m");
    assert_eq!(json["count"], 5);
    assert_eq!(json["eta"], 6);
}

#[test]
fn test_facade_transfer_wrappers() {
    let market = market();
    assert_eq!(market.transfer_kudos(1, 2, 25.0), Ok(25.0));
    assert_eq!(market.ledger().accounts().balance(2), 25.0);

    assert_eq!(
        market.transfer_kudos_to_username(1, "bob#2", 5.0),
        Ok(5.0)
    );
    assert_eq!(
        market.transfer_kudos_from_api_key("key-bob", "alice#1", 30.0),
        Ok(30.0)
    );
    assert_eq!(market.ledger().accounts().balance(1), 100.0);
    assert_eq!(market.ledger().accounts().balance(2), 0.0);
}
