// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::loaded;
use super::transactions::filter_from_args;
use crate::models::{Transaction, active};
use crate::query::QueryClient;
use anyhow::{Result, bail};
use serde_json::json;
use std::path::Path;

pub fn handle(client: &QueryClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(client, sub),
        _ => Ok(()),
    }
}

fn export_transactions(client: &QueryClient, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let filter = filter_from_args(sub)?;
    let all = loaded(client.transactions(Some(&filter)), "transactions")?;
    let mut rows = active(&all);
    rows.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));

    let n = write_transactions(Path::new(out), &fmt, &rows)?;
    println!("Exported {} transactions to {}", n, out);
    Ok(())
}

/// Writes `rows` to `out` as `csv` or `json` and returns how many were written.
pub fn write_transactions(out: &Path, fmt: &str, rows: &[Transaction]) -> Result<usize> {
    match fmt {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "description", "type", "amount", "category_id"])?;
            for t in rows {
                wtr.write_record([
                    t.date.date_naive().to_string(),
                    t.description.clone(),
                    t.r#type.as_str().to_string(),
                    t.amount.to_string(),
                    t.category_id.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let items: Vec<_> = rows
                .iter()
                .map(|t| {
                    json!({
                        "date": t.date.date_naive().to_string(),
                        "description": t.description,
                        "type": t.r#type.as_str(),
                        "amount": t.amount.to_string(),
                        "category_id": t.category_id,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        other => bail!("Unknown format: {} (use csv|json)", other),
    }
    Ok(rows.len())
}
