// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{deleted, signed_in, transaction};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use tally::api::Method;
use tally::{cli, commands::transactions};

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["tally", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let (_, tx) = matches.subcommand().unwrap();
    let (_, list) = tx.subcommand().unwrap();
    list.clone()
}

fn run_tx(h: &common::Harness, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["tally", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    let (_, tx) = matches.subcommand().unwrap();
    transactions::handle(&h.client, tx)
}

fn seed(h: &common::Harness, path: &str) {
    h.transport.ok(
        Method::Get,
        path,
        json!([
            transaction("t1", "income", 100.0, "2025-01-01"),
            deleted(transaction("t2", "expense", 5.0, "2025-01-05")),
            transaction("t3", "expense", 20.0, "2025-01-09"),
            transaction("t4", "expense", 7.0, "2025-01-09"),
        ]),
    );
}

#[test]
fn list_is_newest_first_and_hides_deleted() {
    let h = signed_in();
    seed(&h, "/transactions");

    let rows = transactions::query_rows(&h.client, &list_matches(&[])).unwrap();

    let ids: Vec<&str> = rows.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["t4", "t3", "t1"]);
}

#[test]
fn list_all_includes_deleted_and_respects_limit() {
    let h = signed_in();
    seed(&h, "/transactions");

    let rows =
        transactions::query_rows(&h.client, &list_matches(&["--all", "--limit", "3"])).unwrap();

    let ids: Vec<&str> = rows.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["t4", "t3", "t2"]);
}

#[test]
fn list_flags_become_query_parameters() {
    let h = signed_in();
    seed(&h, "/transactions?account_id=a1&category_id=c1&end_date=2025-01-31");

    let m = list_matches(&["--account", "a1", "--category", "c1", "--to", "2025-01-31"]);
    let rows = transactions::query_rows(&h.client, &m).unwrap();

    assert_eq!(rows.len(), 3);
}

#[test]
fn bad_dates_are_rejected_before_any_request() {
    let h = signed_in();

    let m = list_matches(&["--from", "2025-02-30"]);

    assert!(transactions::filter_from_args(&m).is_err());
    assert!(transactions::query_rows(&h.client, &m).is_err());
    assert!(h.transport.requests().is_empty());
}

#[test]
fn update_with_negative_amount_is_rejected_locally() {
    let h = signed_in();

    let err = run_tx(&h, &["update", "t1", "--amount=-5"]).unwrap_err();

    assert!(err.to_string().contains("amount"));
    assert!(h.transport.requests().is_empty());
}

#[test]
fn update_sends_only_changed_fields() {
    let h = signed_in();
    h.transport.ok(
        Method::Put,
        "/transactions/t1",
        transaction("t1", "expense", 5.0, "2025-02-01"),
    );

    run_tx(&h, &["update", "t1", "--amount", "5", "--date", "2025-02-01"]).unwrap();

    let body: Value =
        serde_json::from_str(h.transport.requests()[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({ "amount": 5.0, "date": "2025-02-01T00:00:00Z" }));
}

#[test]
fn add_without_date_sends_the_current_time() {
    let h = signed_in();
    h.transport.ok(
        Method::Post,
        "/transactions",
        transaction("t9", "expense", 5.0, "2025-01-09"),
    );
    let before = Utc::now();

    run_tx(
        &h,
        &["add", "--account", "a1", "--category", "c1", "--type", "expense", "--amount", "5"],
    )
    .unwrap();

    let body: Value =
        serde_json::from_str(h.transport.requests()[0].body.as_deref().unwrap()).unwrap();
    let sent: DateTime<Utc> = body["date"].as_str().unwrap().parse().unwrap();
    assert!(sent >= before && sent <= Utc::now());
}
