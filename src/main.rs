// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use tally::api::ApiClient;
use tally::config::Config;
use tally::db::SqliteTokenStore;
use tally::query::{QueryCache, QueryClient, QueryConfig};
use tally::{cli, commands};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let mut config = Config::from_env()?;
    if let Some(url) = matches.get_one::<String>("api-url") {
        config = config.with_api_url(url)?;
    }

    let tokens = SqliteTokenStore::open(&config.db_path())?;
    let api = ApiClient::from_config(&config, Arc::new(tokens))
        .context("Failed to build HTTP client")?;
    let client = QueryClient::new(api, Arc::new(QueryCache::new()), QueryConfig::from(&config));

    match matches.subcommand() {
        Some(("login", sub)) => commands::session::login(&client, sub)?,
        Some(("register", sub)) => commands::session::register(&client, sub)?,
        Some(("logout", _)) => commands::session::logout(&client)?,
        Some(("whoami", sub)) => commands::session::whoami(&client, sub)?,
        Some(("profile", sub)) => commands::session::profile(&client, sub)?,
        Some(("account", sub)) => commands::accounts::handle(&client, sub)?,
        Some(("category", sub)) => commands::categories::handle(&client, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&client, sub)?,
        Some(("transfer", sub)) => commands::transfers::handle(&client, sub)?,
        Some(("budget", sub)) => commands::budgets::handle(&client, sub)?,
        Some(("analytics", sub)) => commands::analytics::handle(&client, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&client, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
