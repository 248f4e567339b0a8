// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{loaded, opt_decimal, opt_string};
use crate::models::{Account, AccountType, CreateAccountRequest, UpdateAccountRequest, active};
use crate::query::QueryClient;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use crate::validation::{validate_account, validate_account_update};
use anyhow::{Result, anyhow};

pub fn handle(client: &QueryClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("name").unwrap().trim().to_string();
            let typ = parse_type(sub.get_one::<String>("type").unwrap())?;
            let req = CreateAccountRequest {
                name,
                r#type: typ,
                balance: opt_decimal(sub, "balance")?,
            };
            validate_account(&req)?;
            let a = client.create_account(&req)?;
            println!("Added account '{}' ({}) id={}", a.name, a.r#type.as_str(), a.id);
        }
        Some(("list", sub)) => {
            let state = client.accounts();
            let accounts = loaded(state, "accounts")?;
            let data = if sub.get_flag("all") {
                accounts.to_vec()
            } else {
                active(&accounts)
            };
            if !maybe_print_json(sub.get_flag("json"), &data)? {
                println!("{}", account_table(&data));
            }
        }
        Some(("show", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let account = loaded(client.account(id), "account")?;
            if !maybe_print_json(sub.get_flag("json"), account.as_ref())? {
                println!("{}", account_table(std::slice::from_ref(account.as_ref())));
            }
        }
        Some(("update", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let req = UpdateAccountRequest {
                name: opt_string(sub, "name"),
                r#type: sub
                    .get_one::<String>("type")
                    .map(|t| parse_type(t))
                    .transpose()?,
                balance: opt_decimal(sub, "balance")?,
            };
            validate_account_update(&req)?;
            let a = client.update_account(id, &req)?;
            println!("Updated account '{}'", a.name);
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            client.delete_account(id)?;
            println!("Removed account {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn parse_type(s: &str) -> Result<AccountType> {
    AccountType::parse(s).ok_or_else(|| anyhow!("Unknown account type '{}'", s))
}

fn account_table(accounts: &[Account]) -> comfy_table::Table {
    let rows = accounts
        .iter()
        .map(|a| {
            vec![
                a.id.clone(),
                a.name.clone(),
                a.r#type.as_str().to_string(),
                fmt_money(&a.balance),
                if a.deleted_at.is_some() { "deleted".into() } else { String::new() },
            ]
        })
        .collect();
    pretty_table(&["ID", "Name", "Type", "Balance", ""], rows)
}
