// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::transactions::parse_type;
use super::{loaded, opt_date};
use crate::models::{GroupBy, TrendData};
use crate::query::QueryClient;
use crate::utils::{fmt_money, maybe_print_json, month_range, pretty_table};
use anyhow::{Result, anyhow};
use chrono::{Local, NaiveDate};

pub fn handle(client: &QueryClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => {
            let (start, end) = range(sub)?;
            let s = loaded(client.analytics_summary(Some(start), Some(end)), "summary")?;
            if !maybe_print_json(sub.get_flag("json"), s.as_ref())? {
                let rows = vec![vec![
                    format!("{} .. {}", start, end),
                    fmt_money(&s.income),
                    fmt_money(&s.expenses),
                    fmt_money(&s.balance),
                ]];
                println!(
                    "{}",
                    pretty_table(&["Period", "Income", "Expenses", "Balance"], rows)
                );
            }
        }
        Some(("by-category", sub)) => {
            let (start, end) = range(sub)?;
            let kind = sub
                .get_one::<String>("type")
                .map(|t| parse_type(t))
                .transpose()?;
            let data = loaded(
                client.analytics_by_category(Some(start), Some(end), kind),
                "category breakdown",
            )?;
            if !maybe_print_json(sub.get_flag("json"), data.as_ref())? {
                let rows = data
                    .iter()
                    .map(|c| {
                        vec![
                            c.category_name.clone(),
                            fmt_money(&c.total),
                            format!("{}%", c.percentage.round_dp(1)),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["Category", "Total", "Share"], rows));
            }
        }
        Some(("monthly", sub)) => {
            let months = sub.get_one::<u32>("months").copied();
            let data = loaded(client.monthly_comparison(months), "monthly comparison")?;
            if !maybe_print_json(sub.get_flag("json"), data.as_ref())? {
                let rows = data
                    .iter()
                    .map(|m| {
                        vec![
                            m.month.clone(),
                            fmt_money(&m.income),
                            fmt_money(&m.expenses),
                            fmt_money(&m.balance),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Month", "Income", "Expenses", "Balance"], rows)
                );
            }
        }
        Some(("trends", sub)) => {
            let (start, end) = range(sub)?;
            let group_by = group_by(sub)?;
            let data = loaded(client.trends(Some(start), Some(end), group_by), "trends")?;
            print_series(sub, &data)?;
        }
        Some(("chart", sub)) => {
            let (start, end) = range(sub)?;
            let group_by = group_by(sub)?;
            let data = loaded(
                client.expense_income_chart(Some(start), Some(end), group_by),
                "expense/income chart",
            )?;
            print_series(sub, &data)?;
        }
        _ => {}
    }
    Ok(())
}

/// `--from/--to`, defaulting to the current month.
fn range(sub: &clap::ArgMatches) -> Result<(NaiveDate, NaiveDate)> {
    let (first, last) = month_range(Local::now().date_naive())?;
    let start = opt_date(sub, "from")?.unwrap_or(first);
    let end = opt_date(sub, "to")?.unwrap_or(last);
    if end < start {
        return Err(anyhow!("--to {} is before --from {}", end, start));
    }
    Ok((start, end))
}

fn group_by(sub: &clap::ArgMatches) -> Result<GroupBy> {
    let raw = sub.get_one::<String>("group-by").unwrap();
    GroupBy::parse(raw).ok_or_else(|| anyhow!("Unknown grouping '{}'", raw))
}

fn print_series(sub: &clap::ArgMatches, data: &[TrendData]) -> Result<()> {
    if maybe_print_json(sub.get_flag("json"), &data)? {
        return Ok(());
    }
    let rows = data
        .iter()
        .map(|t| {
            vec![
                t.date.clone(),
                fmt_money(&t.income),
                fmt_money(&t.expenses),
                fmt_money(&(t.income - t.expenses)),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Period", "Income", "Expenses", "Net"], rows)
    );
    Ok(())
}
