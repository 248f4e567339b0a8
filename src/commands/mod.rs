// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod analytics;
pub mod budgets;
pub mod categories;
pub mod exporter;
pub mod session;
pub mod transactions;
pub mod transfers;

use crate::models::start_of_day;
use crate::query::QueryState;
use crate::utils::{parse_date, parse_decimal};
use anyhow::{Result, anyhow};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;

pub(crate) fn opt_string(m: &clap::ArgMatches, name: &str) -> Option<String> {
    m.get_one::<String>(name).map(|s| s.trim().to_string())
}

pub(crate) fn opt_date(m: &clap::ArgMatches, name: &str) -> Result<Option<NaiveDate>> {
    m.get_one::<String>(name).map(|s| parse_date(s)).transpose()
}

/// Optional `YYYY-MM-DD` flag as midnight UTC, the form request bodies use.
pub(crate) fn opt_day(m: &clap::ArgMatches, name: &str) -> Result<Option<DateTime<Utc>>> {
    Ok(opt_date(m, name)?.map(start_of_day))
}

pub(crate) fn opt_decimal(m: &clap::ArgMatches, name: &str) -> Result<Option<Decimal>> {
    m.get_one::<String>(name).map(|s| parse_decimal(s)).transpose()
}

/// Data of a finished read, or the error it ended with.
pub(crate) fn loaded<T>(state: QueryState<T>, what: &str) -> Result<Arc<T>> {
    match state {
        QueryState::Success(v) => Ok(v),
        QueryState::Error(e) => Err(anyhow!(e).context(format!("Could not load {}", what))),
        QueryState::Idle | QueryState::Loading => Err(anyhow!("No {} loaded", what)),
    }
}
