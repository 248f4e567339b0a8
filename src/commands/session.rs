// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::opt_string;
use crate::models::{LoginRequest, RegisterRequest, UpdateUserRequest, User};
use crate::query::QueryClient;
use crate::utils::{maybe_print_json, pretty_table};
use crate::validation::{validate_login, validate_register, validate_user_update};
use anyhow::{Result, bail};

pub fn login(client: &QueryClient, sub: &clap::ArgMatches) -> Result<()> {
    let req = LoginRequest {
        email: sub.get_one::<String>("email").unwrap().trim().to_string(),
        password: sub.get_one::<String>("password").unwrap().to_string(),
    };
    validate_login(&req)?;
    let user = client.login(&req)?;
    println!("Signed in as {} <{}>", user.name, user.email);
    Ok(())
}

pub fn register(client: &QueryClient, sub: &clap::ArgMatches) -> Result<()> {
    let req = RegisterRequest {
        name: sub.get_one::<String>("name").unwrap().trim().to_string(),
        email: sub.get_one::<String>("email").unwrap().trim().to_string(),
        password: sub.get_one::<String>("password").unwrap().to_string(),
    };
    let confirm = sub.get_one::<String>("confirm").unwrap();
    validate_register(&req, confirm)?;
    let user = client.register(&req)?;
    println!("Registered and signed in as {} <{}>", user.name, user.email);
    Ok(())
}

pub fn logout(client: &QueryClient) -> Result<()> {
    client.logout();
    println!("Signed out");
    Ok(())
}

pub fn whoami(client: &QueryClient, sub: &clap::ArgMatches) -> Result<()> {
    let Some(user) = client.restore_session()? else {
        bail!("Not signed in. Run `tally login` first.");
    };
    if !maybe_print_json(sub.get_flag("json"), user.as_ref())? {
        println!("{}", user_table(&user));
    }
    Ok(())
}

pub fn profile(client: &QueryClient, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("update", sub)) = m.subcommand() {
        let req = UpdateUserRequest {
            name: opt_string(sub, "name"),
            email: opt_string(sub, "email"),
        };
        if req.name.is_none() && req.email.is_none() {
            bail!("Nothing to update; pass --name and/or --email");
        }
        validate_user_update(&req)?;
        let user = client.update_user(&req)?;
        println!("Updated profile for {}", user.email);
    }
    Ok(())
}

fn user_table(user: &User) -> comfy_table::Table {
    pretty_table(
        &["ID", "Name", "Email", "Member since"],
        vec![vec![
            user.id.clone(),
            user.name.clone(),
            user.email.clone(),
            user.created_at.date_naive().to_string(),
        ]],
    )
}
