// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{loaded, opt_day, opt_decimal, opt_string};
use crate::models::{CreateTransferRequest, UpdateTransferRequest, active};
use crate::query::QueryClient;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use crate::validation::{validate_transfer, validate_transfer_update};
use anyhow::Result;
use chrono::Utc;

pub fn handle(client: &QueryClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let req = CreateTransferRequest {
                from_account_id: sub.get_one::<String>("from").unwrap().trim().to_string(),
                to_account_id: sub.get_one::<String>("to").unwrap().trim().to_string(),
                amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
                description: opt_string(sub, "description"),
                date: opt_day(sub, "date")?.unwrap_or_else(Utc::now),
            };
            validate_transfer(&req)?;
            let t = client.create_transfer(&req)?;
            println!(
                "Moved {} from {} to {}",
                fmt_money(&t.amount),
                t.from_account_id,
                t.to_account_id
            );
        }
        Some(("list", sub)) => {
            let transfers = loaded(client.transfers(), "transfers")?;
            let mut data = if sub.get_flag("all") {
                transfers.to_vec()
            } else {
                active(&transfers)
            };
            data.sort_by(|a, b| b.date.cmp(&a.date));
            if !maybe_print_json(sub.get_flag("json"), &data)? {
                let rows = data
                    .iter()
                    .map(|t| {
                        vec![
                            t.date.date_naive().to_string(),
                            t.id.clone(),
                            t.from_account_id.clone(),
                            t.to_account_id.clone(),
                            t.description.clone(),
                            fmt_money(&t.amount),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Date", "ID", "From", "To", "Description", "Amount"], rows)
                );
            }
        }
        Some(("update", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let req = UpdateTransferRequest {
                from_account_id: opt_string(sub, "from"),
                to_account_id: opt_string(sub, "to"),
                amount: opt_decimal(sub, "amount")?,
                description: opt_string(sub, "description"),
                date: opt_day(sub, "date")?,
            };
            validate_transfer_update(&req)?;
            let t = client.update_transfer(id, &req)?;
            println!("Updated transfer {}", t.id);
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            client.delete_transfer(id)?;
            println!("Removed transfer {}", id);
        }
        _ => {}
    }
    Ok(())
}
