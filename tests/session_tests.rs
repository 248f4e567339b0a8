// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{BASE, account, harness, signed_in, transaction, user};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;
use tally::api::{ApiClient, Method};
use tally::db::{SqliteTokenStore, TokenStore};
use tally::models::{CreateTransactionRequest, LoginRequest, TransactionType, start_of_day};
use tally::query::QueryClient;
use tempfile::tempdir;

fn credentials() -> LoginRequest {
    LoginRequest {
        email: "ada@example.com".into(),
        password: "secret1".into(),
    }
}

#[test]
fn login_then_expense_updates_balance_and_list() {
    let h = harness();
    h.transport
        .ok(
            Method::Post,
            "/auth/login",
            json!({ "token": "tok-new", "user": user() }),
        )
        .ok(Method::Get, "/accounts", json!([account("a1", 1000.0)]))
        .ok(Method::Get, "/accounts", json!([account("a1", 950.0)]))
        .ok(
            Method::Post,
            "/transactions",
            transaction("t1", "expense", 50.0, "2025-01-20"),
        )
        .ok(
            Method::Get,
            "/transactions",
            json!([transaction("t1", "expense", 50.0, "2025-01-20")]),
        );

    let u = h.client.login(&credentials()).unwrap();
    assert_eq!(u.email, "ada@example.com");
    assert_eq!(h.tokens.get().unwrap().as_deref(), Some("tok-new"));
    assert!(h.client.is_authenticated());

    // login warms the accounts list, so this read is a cache hit
    let before = h.client.accounts();
    assert_eq!(before.data().unwrap()[0].balance, Decimal::new(1000, 0));
    assert_eq!(h.transport.count(Method::Get, "/accounts"), 1);
    assert_eq!(h.transport.count(Method::Get, "/users/me"), 0);

    h.client
        .create_transaction(&CreateTransactionRequest {
            account_id: "a1".into(),
            category_id: "c1".into(),
            r#type: TransactionType::Expense,
            amount: Decimal::new(5000, 2),
            description: Some("Groceries".into()),
            date: start_of_day(NaiveDate::from_ymd_opt(2025, 1, 20).unwrap()),
        })
        .unwrap();

    let after = h.client.accounts();
    assert_eq!(after.data().unwrap()[0].balance, Decimal::new(950, 0));
    let txs = h.client.transactions(None);
    let listed = &txs.data().unwrap()[0];
    assert_eq!(listed.id, "t1");
    assert_eq!(listed.amount, Decimal::new(50, 0));
    assert!(listed.deleted_at.is_none());

    let post = h
        .transport
        .requests()
        .into_iter()
        .find(|r| r.method == Method::Post && r.url == format!("{BASE}/transactions"))
        .unwrap();
    assert_eq!(post.bearer.as_deref(), Some("tok-new"));
    let body: serde_json::Value = serde_json::from_str(post.body.as_deref().unwrap()).unwrap();
    assert_eq!(body["type"], "expense");
    assert_eq!(body["date"], "2025-01-20T00:00:00Z");
}

#[test]
fn failed_login_stores_nothing() {
    let h = harness();
    h.transport.fail(
        Method::Post,
        "/auth/login",
        401,
        json!({ "error": "invalid credentials" }),
    );

    let err = h.client.login(&credentials()).unwrap_err();

    assert_eq!(err.message, "invalid credentials");
    assert!(h.tokens.get().unwrap().is_none());
    assert!(!h.client.is_authenticated());
}

#[test]
fn restore_session_without_token_makes_no_request() {
    let h = harness();

    assert!(h.client.restore_session().unwrap().is_none());
    assert!(h.transport.requests().is_empty());
}

#[test]
fn rejected_token_is_removed() {
    let h = signed_in();
    h.transport
        .fail(Method::Get, "/users/me", 401, json!({ "error": "token expired" }));

    assert!(h.client.restore_session().unwrap().is_none());
    assert!(h.tokens.get().unwrap().is_none());
}

#[test]
fn server_failure_keeps_the_token() {
    let h = signed_in();
    h.transport
        .fail(Method::Get, "/users/me", 500, json!({ "error": "down" }));

    let err = h.client.restore_session().unwrap_err();

    assert_eq!(err.status, 500);
    assert_eq!(h.tokens.get().unwrap().as_deref(), Some("tok-1"));
}

#[test]
fn valid_token_restores_the_user() {
    let h = signed_in();
    h.transport.ok(Method::Get, "/users/me", user());

    let u = h.client.restore_session().unwrap().unwrap();

    assert_eq!(u.name, "Ada");
    assert!(h.client.is_authenticated());
}

#[test]
fn logout_clears_token_and_cache() {
    let h = signed_in();
    h.transport
        .ok(Method::Get, "/accounts", json!([account("a1", 1.0)]));
    h.client.accounts();

    h.client.logout();

    assert!(!h.client.is_authenticated());
    assert!(h.client.cache().is_empty());
    h.client.accounts();
    let last = h.transport.requests().pop().unwrap();
    assert!(last.bearer.is_none());
}

#[test]
fn sqlite_token_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("tally.sqlite");

    {
        let store = SqliteTokenStore::open(&path).unwrap();
        assert!(store.get().unwrap().is_none());
        store.set("tok-a").unwrap();
        store.set("tok-b").unwrap();
    }

    let store = SqliteTokenStore::open(&path).unwrap();
    assert_eq!(store.current().as_deref(), Some("tok-b"));
    store.clear().unwrap();
    assert!(store.current().is_none());
}

#[test]
fn sqlite_store_backs_an_api_client() {
    let dir = tempdir().unwrap();
    let store = Arc::new(SqliteTokenStore::open(&dir.path().join("t.sqlite")).unwrap());
    store.set("tok-disk").unwrap();
    let transport = Arc::new(common::MockTransport::default());
    transport.ok(Method::Get, "/users/me", user());

    let client = QueryClient::with_api(ApiClient::new(BASE, transport.clone(), store));

    assert!(client.restore_session().unwrap().is_some());
    assert_eq!(
        transport.requests()[0].bearer.as_deref(),
        Some("tok-disk")
    );
}
