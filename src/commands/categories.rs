// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{loaded, opt_string};
use crate::models::{CreateCategoryRequest, UpdateCategoryRequest, active};
use crate::query::QueryClient;
use crate::utils::{maybe_print_json, pretty_table};
use crate::validation::{validate_category, validate_category_update};
use anyhow::Result;

pub fn handle(client: &QueryClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let req = CreateCategoryRequest {
                name: sub.get_one::<String>("name").unwrap().trim().to_string(),
                description: opt_string(sub, "description"),
                color: opt_string(sub, "color"),
            };
            validate_category(&req)?;
            let c = client.create_category(&req)?;
            println!("Added category '{}' id={}", c.name, c.id);
        }
        Some(("list", sub)) => {
            let categories = loaded(client.categories(), "categories")?;
            let data = if sub.get_flag("all") {
                categories.to_vec()
            } else {
                active(&categories)
            };
            if !maybe_print_json(sub.get_flag("json"), &data)? {
                let rows = data
                    .iter()
                    .map(|c| {
                        vec![
                            c.id.clone(),
                            c.name.clone(),
                            c.description.clone(),
                            c.color.clone().unwrap_or_default(),
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["ID", "Category", "Description", "Color"], rows)
                );
            }
        }
        Some(("update", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            let req = UpdateCategoryRequest {
                name: opt_string(sub, "name"),
                description: opt_string(sub, "description"),
                color: opt_string(sub, "color"),
            };
            validate_category_update(&req)?;
            let c = client.update_category(id, &req)?;
            println!("Updated category '{}'", c.name);
        }
        Some(("rm", sub)) => {
            let id = sub.get_one::<String>("id").unwrap();
            client.delete_category(id)?;
            println!("Removed category {}", id);
        }
        _ => {}
    }
    Ok(())
}
