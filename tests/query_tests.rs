// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{account, category, deleted, signed_in, transaction};
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::json;
use tally::api::Method;
use tally::models::{
    CreateCategoryRequest, CreateTransactionRequest, TransactionFilter, TransactionType,
};
use tally::query::QueryState;

fn expense(amount: Decimal) -> CreateTransactionRequest {
    CreateTransactionRequest {
        account_id: "a1".into(),
        category_id: "c1".into(),
        r#type: TransactionType::Expense,
        amount,
        description: Some("Groceries".into()),
        date: Utc::now(),
    }
}

#[test]
fn repeated_reads_hit_the_network_once() {
    let h = signed_in();
    h.transport
        .ok(Method::Get, "/accounts", json!([account("a1", 100.0)]));

    let first = h.client.accounts();
    let second = h.client.accounts();

    assert_eq!(first.data(), second.data());
    assert_eq!(h.transport.count(Method::Get, "/accounts"), 1);
    let req = &h.transport.requests()[0];
    assert_eq!(req.bearer.as_deref(), Some("tok-1"));
}

#[test]
fn creating_a_transaction_refreshes_transactions_and_accounts_only() {
    let h = signed_in();
    h.transport
        .ok(Method::Get, "/transactions", json!([]))
        .ok(
            Method::Get,
            "/transactions",
            json!([transaction("t1", "expense", 50.0, "2025-01-20")]),
        )
        .ok(Method::Get, "/accounts", json!([account("a1", 100.0)]))
        .ok(Method::Get, "/accounts", json!([account("a1", 50.0)]))
        .ok(Method::Get, "/categories", json!([category("c1", "Food")]))
        .ok(
            Method::Post,
            "/transactions",
            transaction("t1", "expense", 50.0, "2025-01-20"),
        );

    assert!(h.client.transactions(None).data().unwrap().is_empty());
    assert_eq!(h.client.accounts().data().unwrap()[0].balance, Decimal::new(100, 0));
    h.client.categories();

    let created = h.client.create_transaction(&expense(Decimal::new(5000, 2))).unwrap();
    assert_eq!(created.id, "t1");

    let txs = h.client.transactions(None);
    assert_eq!(txs.data().unwrap().len(), 1);
    assert_eq!(h.client.accounts().data().unwrap()[0].balance, Decimal::new(50, 0));
    h.client.categories();

    assert_eq!(h.transport.count(Method::Get, "/transactions"), 2);
    assert_eq!(h.transport.count(Method::Get, "/accounts"), 2);
    assert_eq!(h.transport.count(Method::Get, "/categories"), 1);
}

#[test]
fn filtered_transaction_lists_are_invalidated_too() {
    let h = signed_in();
    let path = "/transactions?account_id=a1";
    h.transport
        .ok(Method::Get, path, json!([]))
        .ok(Method::Post, "/transactions", transaction("t1", "expense", 50.0, "2025-01-20"));
    let filter = TransactionFilter {
        account_id: Some("a1".into()),
        ..Default::default()
    };

    h.client.transactions(Some(&filter));
    h.client.create_transaction(&expense(Decimal::new(50, 0))).unwrap();
    h.client.transactions(Some(&filter));

    assert_eq!(h.transport.count(Method::Get, path), 2);
}

#[test]
fn creating_a_category_leaves_other_caches_alone() {
    let h = signed_in();
    h.transport
        .ok(Method::Get, "/categories", json!([]))
        .ok(Method::Get, "/accounts", json!([account("a1", 10.0)]))
        .ok(Method::Post, "/categories", category("c9", "Travel"));

    h.client.categories();
    h.client.accounts();
    h.client
        .create_category(&CreateCategoryRequest {
            name: "Travel".into(),
            description: None,
            color: None,
        })
        .unwrap();
    h.client.categories();
    h.client.accounts();

    assert_eq!(h.transport.count(Method::Get, "/categories"), 2);
    assert_eq!(h.transport.count(Method::Get, "/accounts"), 1);
}

#[test]
fn failed_write_reports_server_message_and_keeps_cache() {
    let h = signed_in();
    h.transport
        .ok(Method::Get, "/transactions", json!([]))
        .fail(
            Method::Post,
            "/transactions",
            500,
            json!({ "error": "database unavailable" }),
        );

    h.client.transactions(None);
    let err = h
        .client
        .create_transaction(&expense(Decimal::new(50, 0)))
        .unwrap_err();
    assert_eq!(err.message, "database unavailable");
    assert_eq!(err.status, 500);

    h.client.transactions(None);
    assert_eq!(h.transport.count(Method::Get, "/transactions"), 1);
    assert_eq!(h.transport.count(Method::Post, "/transactions"), 1);
}

#[test]
fn writes_are_never_retried() {
    let h = signed_in();
    h.transport.unreachable(Method::Post, "/transactions");

    let err = h
        .client
        .create_transaction(&expense(Decimal::new(50, 0)))
        .unwrap_err();
    assert!(err.is_transport());
    assert_eq!(h.transport.count(Method::Post, "/transactions"), 1);
}

#[test]
fn reads_retry_once_when_the_server_is_unreachable() {
    let h = signed_in();
    h.transport
        .unreachable(Method::Get, "/accounts")
        .ok(Method::Get, "/accounts", json!([account("a1", 5.0)]));

    let state = h.client.accounts();

    assert!(state.is_success());
    assert_eq!(h.transport.count(Method::Get, "/accounts"), 2);
}

#[test]
fn http_errors_on_reads_are_not_retried() {
    let h = signed_in();
    h.transport
        .fail(Method::Get, "/budgets", 500, json!({ "error": "boom" }));

    let state = h.client.budgets();

    assert_eq!(state.error().map(|e| e.message.as_str()), Some("boom"));
    assert_eq!(h.transport.count(Method::Get, "/budgets"), 1);
}

#[test]
fn reads_without_an_id_stay_idle() {
    let h = signed_in();

    assert!(h.client.transaction("").is_idle());
    assert!(h.client.account("").is_idle());
    assert!(h.client.budget_status("").is_idle());
    assert!(h.client.analytics_summary(None, None).is_idle());
    assert!(h.transport.requests().is_empty());
}

#[test]
fn soft_deleted_records_are_hidden_from_active_views() {
    let h = signed_in();
    h.transport.ok(
        Method::Get,
        "/transactions",
        json!([
            transaction("t1", "income", 10.0, "2025-01-01"),
            deleted(transaction("t2", "expense", 4.0, "2025-01-02")),
        ]),
    );

    let state = h.client.transactions(None);

    assert_eq!(state.data().unwrap().len(), 2);
    let active = state.active();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, "t1");
}

#[test]
fn monthly_comparison_defaults_to_six_months() {
    let h = signed_in();
    h.transport.ok(
        Method::Get,
        "/analytics/monthly-comparison?months=6",
        json!([{ "month": "2025-01", "income": 100.0, "expenses": 40.0, "balance": 60.0 }]),
    );

    let state = h.client.monthly_comparison(None);

    let months = state.data().unwrap();
    assert_eq!(months[0].balance, Decimal::new(60, 0));
    assert!(matches!(h.client.monthly_comparison(Some(6)), QueryState::Success(_)));
    assert_eq!(
        h.transport
            .count(Method::Get, "/analytics/monthly-comparison?months=6"),
        1
    );
}
