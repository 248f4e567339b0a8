// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{loaded, opt_day, opt_decimal, opt_string};
use crate::models::{
    BudgetPeriod, CreateBudgetRequest, UpdateBudgetRequest, active, start_of_day,
};
use crate::query::QueryClient;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use crate::validation::{validate_budget, validate_budget_update};
use anyhow::{Result, anyhow};

pub fn handle(client: &QueryClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(client, sub)?,
        Some(("list", sub)) => list(client, sub)?,
        Some(("status", sub)) => status(client, sub)?,
        Some(("update", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let req = UpdateBudgetRequest {
                category_id: opt_string(sub, "category"),
                amount: opt_decimal(sub, "amount")?,
                period: sub
                    .get_one::<String>("period")
                    .map(|p| parse_period(p))
                    .transpose()?,
                start_date: opt_day(sub, "start")?,
                end_date: opt_day(sub, "end")?,
            };
            validate_budget_update(&req)?;
            let b = client.update_budget(id, &req)?;
            println!("Updated budget {}", b.id);
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            client.delete_budget(id)?;
            println!("Removed budget {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn parse_period(s: &str) -> Result<BudgetPeriod> {
    BudgetPeriod::parse(s).ok_or_else(|| anyhow!("Unknown budget period '{}'", s))
}

fn add(client: &QueryClient, sub: &clap::ArgMatches) -> Result<()> {
    let req = CreateBudgetRequest {
        category_id: sub.get_one::<String>("category").unwrap().trim().to_string(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        period: parse_period(sub.get_one::<String>("period").unwrap())?,
        start_date: start_of_day(parse_date(sub.get_one::<String>("start").unwrap())?),
        end_date: start_of_day(parse_date(sub.get_one::<String>("end").unwrap())?),
    };
    validate_budget(&req)?;
    let b = client.create_budget(&req)?;
    println!(
        "Budget set for category {} = {} ({})",
        b.category_id,
        fmt_money(&b.amount),
        b.period.as_str()
    );
    Ok(())
}

fn list(client: &QueryClient, sub: &clap::ArgMatches) -> Result<()> {
    let budgets = loaded(client.budgets(), "budgets")?;
    let data = if sub.get_flag("all") {
        budgets.to_vec()
    } else {
        active(&budgets)
    };
    if maybe_print_json(sub.get_flag("json"), &data)? {
        return Ok(());
    }
    let rows = data
        .iter()
        .map(|b| {
            vec![
                b.id.clone(),
                b.category_id.clone(),
                b.period.as_str().to_string(),
                b.start_date.date_naive().to_string(),
                b.end_date.date_naive().to_string(),
                fmt_money(&b.amount),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Category", "Period", "Start", "End", "Budget"], rows)
    );
    Ok(())
}

fn status(client: &QueryClient, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let s = loaded(client.budget_status(id), "budget status")?;
    if maybe_print_json(sub.get_flag("json"), s.as_ref())? {
        return Ok(());
    }
    let rows = vec![vec![
        s.budget.category_id.clone(),
        fmt_money(&s.budget.amount),
        fmt_money(&s.spent),
        fmt_money(&s.remaining),
        format!("{}%", s.percentage.round_dp(1)),
    ]];
    println!(
        "{}",
        pretty_table(&["Category", "Budget", "Spent", "Remaining", "Used"], rows)
    );
    Ok(())
}
