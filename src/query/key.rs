// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{GroupBy, TransactionFilter, TransactionType};
use chrono::NaiveDate;
use std::fmt;

/// Resource families sharing a cache prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Resource {
    Transactions,
    Accounts,
    Categories,
    Transfers,
    Budgets,
    User,
    Analytics,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Transactions => "transactions",
            Resource::Accounts => "accounts",
            Resource::Categories => "categories",
            Resource::Transfers => "transfers",
            Resource::Budgets => "budgets",
            Resource::User => "user",
            Resource::Analytics => "analytics",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One position of a key after the resource name. `Absent` stands for an
/// omitted optional parameter, so two lookups omitting the same field agree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyPart {
    Text(String),
    Number(u64),
    Absent,
}

impl From<&str> for KeyPart {
    fn from(s: &str) -> Self {
        KeyPart::Text(s.to_string())
    }
}

impl From<String> for KeyPart {
    fn from(s: String) -> Self {
        KeyPart::Text(s)
    }
}

impl From<u32> for KeyPart {
    fn from(n: u32) -> Self {
        KeyPart::Number(n as u64)
    }
}

impl From<NaiveDate> for KeyPart {
    fn from(d: NaiveDate) -> Self {
        KeyPart::Text(d.to_string())
    }
}

impl From<TransactionType> for KeyPart {
    fn from(t: TransactionType) -> Self {
        KeyPart::Text(t.as_str().to_string())
    }
}

impl From<GroupBy> for KeyPart {
    fn from(g: GroupBy) -> Self {
        KeyPart::Text(g.as_str().to_string())
    }
}

impl<T: Into<KeyPart>> From<Option<T>> for KeyPart {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(KeyPart::Absent)
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyPart::Text(s) => write!(f, "{s:?}"),
            KeyPart::Number(n) => write!(f, "{n}"),
            KeyPart::Absent => f.write_str("_"),
        }
    }
}

/// Ordered tuple `(resource, ...parameters in declared order)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: Resource,
    parts: Vec<KeyPart>,
}

impl QueryKey {
    pub fn new(resource: Resource) -> Self {
        QueryKey {
            resource,
            parts: Vec::new(),
        }
    }

    pub fn with(mut self, part: impl Into<KeyPart>) -> Self {
        self.parts.push(part.into());
        self
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn parts(&self) -> &[KeyPart] {
        &self.parts
    }

    /// True when `prefix` names the same resource and its parts lead ours.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.resource == prefix.resource && self.parts.starts_with(&prefix.parts)
    }

    pub fn transactions(filter: Option<&TransactionFilter>) -> Self {
        let f = filter.map(TransactionFilter::normalized).unwrap_or_default();
        QueryKey::new(Resource::Transactions)
            .with(f.account_id)
            .with(f.category_id)
            .with(f.r#type)
            .with(f.start_date)
            .with(f.end_date)
    }

    pub fn transaction(id: &str) -> Self {
        QueryKey::new(Resource::Transactions).with(id)
    }

    pub fn accounts() -> Self {
        QueryKey::new(Resource::Accounts)
    }

    pub fn account(id: &str) -> Self {
        QueryKey::new(Resource::Accounts).with(id)
    }

    pub fn categories() -> Self {
        QueryKey::new(Resource::Categories)
    }

    pub fn category(id: &str) -> Self {
        QueryKey::new(Resource::Categories).with(id)
    }

    pub fn transfers() -> Self {
        QueryKey::new(Resource::Transfers)
    }

    pub fn transfer(id: &str) -> Self {
        QueryKey::new(Resource::Transfers).with(id)
    }

    pub fn budgets() -> Self {
        QueryKey::new(Resource::Budgets)
    }

    pub fn budget(id: &str) -> Self {
        QueryKey::new(Resource::Budgets).with(id)
    }

    pub fn budget_status(id: &str) -> Self {
        QueryKey::new(Resource::Budgets).with(id).with("status")
    }

    pub fn user() -> Self {
        QueryKey::new(Resource::User)
    }

    pub fn analytics_summary(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        QueryKey::new(Resource::Analytics)
            .with("summary")
            .with(start)
            .with(end)
    }

    pub fn analytics_by_category(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        kind: Option<TransactionType>,
    ) -> Self {
        QueryKey::new(Resource::Analytics)
            .with("by-category")
            .with(start)
            .with(end)
            .with(kind)
    }

    pub fn monthly_comparison(months: u32) -> Self {
        QueryKey::new(Resource::Analytics)
            .with("monthly-comparison")
            .with(months)
    }

    pub fn trends(start: Option<NaiveDate>, end: Option<NaiveDate>, group_by: GroupBy) -> Self {
        QueryKey::new(Resource::Analytics)
            .with("trends")
            .with(start)
            .with(end)
            .with(group_by)
    }

    pub fn expense_income_chart(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        group_by: GroupBy,
    ) -> Self {
        QueryKey::new(Resource::Analytics)
            .with("expense-income-chart")
            .with(start)
            .with(end)
            .with(group_by)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}", self.resource.as_str())?;
        for p in &self.parts {
            write!(f, ", {p}")?;
        }
        f.write_str("]")
    }
}
