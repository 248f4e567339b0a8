// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{loaded, opt_date, opt_day, opt_decimal, opt_string};
use crate::models::{
    CreateTransactionRequest, Transaction, TransactionFilter, TransactionType,
    UpdateTransactionRequest, active,
};
use crate::query::QueryClient;
use crate::utils::{fmt_signed, maybe_print_json, parse_decimal, pretty_table};
use crate::validation::{validate_transaction, validate_transaction_update};
use anyhow::{Result, anyhow};
use chrono::Utc;

pub fn handle(client: &QueryClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(client, sub)?,
        Some(("list", sub)) => list(client, sub)?,
        Some(("show", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let t = loaded(client.transaction(id), "transaction")?;
            if !maybe_print_json(sub.get_flag("json"), t.as_ref())? {
                println!("{}", transaction_table(std::slice::from_ref(t.as_ref())));
            }
        }
        Some(("update", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let req = UpdateTransactionRequest {
                account_id: opt_string(sub, "account"),
                category_id: opt_string(sub, "category"),
                r#type: sub
                    .get_one::<String>("type")
                    .map(|t| parse_type(t))
                    .transpose()?,
                amount: opt_decimal(sub, "amount")?,
                description: opt_string(sub, "description"),
                date: opt_day(sub, "date")?,
            };
            validate_transaction_update(&req)?;
            let t = client.update_transaction(id, &req)?;
            println!("Updated transaction {}", t.id);
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            client.delete_transaction(id)?;
            println!("Removed transaction {}", id);
        }
        _ => {}
    }
    Ok(())
}

pub(crate) fn parse_type(s: &str) -> Result<TransactionType> {
    TransactionType::parse(s).ok_or_else(|| anyhow!("Unknown transaction type '{}'", s))
}

fn add(client: &QueryClient, sub: &clap::ArgMatches) -> Result<()> {
    let req = CreateTransactionRequest {
        account_id: sub.get_one::<String>("account").unwrap().trim().to_string(),
        category_id: sub.get_one::<String>("category").unwrap().trim().to_string(),
        r#type: parse_type(sub.get_one::<String>("type").unwrap())?,
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        description: opt_string(sub, "description"),
        date: opt_day(sub, "date")?.unwrap_or_else(Utc::now),
    };
    validate_transaction(&req)?;
    let t = client.create_transaction(&req)?;
    println!(
        "Recorded {} {} on {} (acct: {})",
        t.r#type,
        t.amount,
        t.date.date_naive(),
        t.account_id
    );
    Ok(())
}

/// Filter built from the shared `--account/--category/--type/--from/--to` flags.
pub fn filter_from_args(sub: &clap::ArgMatches) -> Result<TransactionFilter> {
    Ok(TransactionFilter {
        account_id: opt_string(sub, "account"),
        category_id: opt_string(sub, "category"),
        r#type: sub
            .get_one::<String>("type")
            .map(|t| parse_type(t))
            .transpose()?,
        start_date: opt_date(sub, "from")?,
        end_date: opt_date(sub, "to")?,
    })
}

/// Transactions matching the list flags, newest first.
pub fn query_rows(client: &QueryClient, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let filter = filter_from_args(sub)?;
    let all = loaded(client.transactions(Some(&filter)), "transactions")?;
    let mut data = if sub.get_flag("all") {
        all.to_vec()
    } else {
        active(&all)
    };
    data.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| b.id.cmp(&a.id)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}

fn list(client: &QueryClient, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(client, sub)?;
    if !maybe_print_json(sub.get_flag("json"), &data)? {
        println!("{}", transaction_table(&data));
    }
    Ok(())
}

fn transaction_table(data: &[Transaction]) -> comfy_table::Table {
    let rows = data
        .iter()
        .map(|t| {
            vec![
                t.date.date_naive().to_string(),
                t.id.clone(),
                t.account_id.clone(),
                t.category_id.clone(),
                t.description.clone(),
                fmt_signed(&t.amount, t.r#type == TransactionType::Expense),
            ]
        })
        .collect();
    pretty_table(
        &["Date", "ID", "Account", "Category", "Description", "Amount"],
        rows,
    )
}
