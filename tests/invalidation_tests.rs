// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use chrono::Utc;
use common::{Harness, account, message, signed_in, transaction, transfer};
use rust_decimal::Decimal;
use serde_json::json;
use tally::api::Method;
use tally::models::{
    Account, CreateTransferRequest, UpdateTransactionRequest, UpdateTransferRequest,
};
use tally::query::{QueryClient, QueryKey};

/// Warms `accounts` and `list`, runs `write`, then reads both again and
/// checks each went back to the server.
fn assert_refreshes_accounts_and(h: &Harness, list: &str, write: impl FnOnce(&QueryClient)) {
    let read_list = |c: &QueryClient| {
        if list == "/transfers" {
            assert!(c.transfers().is_success());
        } else {
            assert!(c.transactions(None).is_success());
        }
    };
    assert!(h.client.accounts().is_success());
    read_list(&h.client);
    assert_eq!(h.transport.count(Method::Get, "/accounts"), 1);
    assert_eq!(h.transport.count(Method::Get, list), 1);

    write(&h.client);

    assert!(h.client.accounts().is_success());
    read_list(&h.client);
    assert_eq!(h.transport.count(Method::Get, "/accounts"), 2);
    assert_eq!(h.transport.count(Method::Get, list), 2);
}

fn seeded() -> Harness {
    let h = signed_in();
    h.transport
        .ok(Method::Get, "/accounts", json!([account("a1", 100.0), account("a2", 0.0)]))
        .ok(Method::Get, "/transfers", json!([transfer("tr1", 25.0)]))
        .ok(
            Method::Get,
            "/transactions",
            json!([transaction("t1", "expense", 10.0, "2025-01-10")]),
        );
    h
}

#[test]
fn create_transfer_refreshes_accounts() {
    let h = seeded();
    h.transport
        .ok(Method::Post, "/transfers", transfer("tr2", 40.0));
    assert_refreshes_accounts_and(&h, "/transfers", |c| {
        c.create_transfer(&CreateTransferRequest {
            from_account_id: "a1".into(),
            to_account_id: "a2".into(),
            amount: Decimal::new(40, 0),
            description: None,
            date: Utc::now(),
        })
        .unwrap();
    });
}

#[test]
fn update_transfer_refreshes_accounts() {
    let h = seeded();
    h.transport
        .ok(Method::Put, "/transfers/tr1", transfer("tr1", 30.0));
    assert_refreshes_accounts_and(&h, "/transfers", |c| {
        c.update_transfer(
            "tr1",
            &UpdateTransferRequest {
                amount: Some(Decimal::new(30, 0)),
                ..Default::default()
            },
        )
        .unwrap();
    });
}

#[test]
fn delete_transfer_refreshes_accounts() {
    let h = seeded();
    h.transport
        .ok(Method::Delete, "/transfers/tr1", message("transfer deleted"));
    assert_refreshes_accounts_and(&h, "/transfers", |c| {
        assert_eq!(c.delete_transfer("tr1").unwrap().message, "transfer deleted");
    });
}

#[test]
fn update_transaction_refreshes_accounts() {
    let h = seeded();
    h.transport.ok(
        Method::Put,
        "/transactions/t1",
        transaction("t1", "expense", 12.0, "2025-01-10"),
    );
    assert_refreshes_accounts_and(&h, "/transactions", |c| {
        c.update_transaction(
            "t1",
            &UpdateTransactionRequest {
                amount: Some(Decimal::new(12, 0)),
                ..Default::default()
            },
        )
        .unwrap();
    });
}

#[test]
fn delete_transaction_refreshes_accounts() {
    let h = seeded();
    h.transport
        .ok(Method::Delete, "/transactions/t1", message("transaction deleted"));
    assert_refreshes_accounts_and(&h, "/transactions", |c| {
        c.delete_transaction("t1").unwrap();
    });
}

#[test]
fn failed_transfer_leaves_accounts_cached() {
    let h = seeded();
    h.transport
        .fail(Method::Delete, "/transfers/tr1", 404, json!({ "error": "not found" }));

    h.client.accounts();
    assert!(h.client.delete_transfer("tr1").is_err());
    h.client.accounts();

    assert_eq!(h.transport.count(Method::Get, "/accounts"), 1);
}

#[test]
fn response_from_before_logout_is_not_cached() {
    let h = seeded();
    let cache = h.client.cache().clone();
    // the session ends while the accounts request is on the wire
    h.transport.before_reply(move |req| {
        if req.url.ends_with("/accounts") {
            cache.clear();
        }
    });

    let state = h.client.accounts();

    assert!(!state.is_success());
    assert!(
        h.client
            .cache()
            .get_fresh::<Vec<Account>>(&QueryKey::accounts())
            .is_none()
    );
    assert!(h.client.cache().is_empty());
}
