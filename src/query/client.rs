// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Cached reads and cache-invalidating writes over the resource clients.
//!
//! A read is served from the cache while its entry is fresh and only goes to
//! the network once the entry is missing or invalidated. A successful write
//! invalidates every resource listed for it in
//! [`INVALIDATION_TABLE`](super::invalidation::INVALIDATION_TABLE). A failed
//! write leaves the cache untouched and is never retried.

use super::cache::QueryCache;
use super::invalidation::Mutation;
use super::key::QueryKey;
use crate::api::analytics::DEFAULT_COMPARISON_MONTHS;
use crate::api::{ApiClient, ApiError};
use crate::config::{Config, DEFAULT_READ_RETRIES};
use crate::models::{
    Account, AnalyticsSummary, AuthResponse, Budget, BudgetStatus, Category, CategoryBreakdown,
    CreateAccountRequest, CreateBudgetRequest, CreateCategoryRequest, CreateTransactionRequest,
    CreateTransferRequest, GroupBy, LoginRequest, MessageResponse, MonthlyComparison,
    RegisterRequest, SoftDelete, Transaction, TransactionFilter, TransactionType, Transfer,
    TrendData, UpdateAccountRequest, UpdateBudgetRequest, UpdateCategoryRequest,
    UpdateTransactionRequest, UpdateTransferRequest, UpdateUserRequest, User, active,
};
use chrono::NaiveDate;
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryConfig {
    /// Extra attempts for reads that failed before reaching the server.
    pub read_retries: u32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        QueryConfig {
            read_retries: DEFAULT_READ_RETRIES,
        }
    }
}

impl From<&Config> for QueryConfig {
    fn from(config: &Config) -> Self {
        QueryConfig {
            read_retries: config.read_retries,
        }
    }
}

/// What a read reports back to the caller.
#[derive(Debug, Clone)]
pub enum QueryState<T> {
    /// A prerequisite parameter is missing; nothing was fetched.
    Idle,
    /// A newer request for the same key is still outstanding.
    Loading,
    Success(Arc<T>),
    Error(ApiError),
}

impl<T> QueryState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            QueryState::Success(v) => Some(v.as_ref()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match self {
            QueryState::Error(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, QueryState::Idle)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, QueryState::Success(_))
    }

    /// Turns the state into a `Result`, treating idle and loading as `None`.
    pub fn into_result(self) -> Result<Option<Arc<T>>, ApiError> {
        match self {
            QueryState::Success(v) => Ok(Some(v)),
            QueryState::Error(e) => Err(e),
            QueryState::Idle | QueryState::Loading => Ok(None),
        }
    }
}

impl<T: SoftDelete + Clone> QueryState<Vec<T>> {
    /// Records without a `deleted_at` marker; empty unless the read succeeded.
    pub fn active(&self) -> Vec<T> {
        self.data().map(|items| active(items)).unwrap_or_default()
    }
}

#[derive(Clone)]
pub struct QueryClient {
    api: ApiClient,
    cache: Arc<QueryCache>,
    config: QueryConfig,
}

impl QueryClient {
    pub fn new(api: ApiClient, cache: Arc<QueryCache>, config: QueryConfig) -> Self {
        QueryClient { api, cache, config }
    }

    /// A client with its own empty cache.
    pub fn with_api(api: ApiClient) -> Self {
        Self::new(api, Arc::new(QueryCache::new()), QueryConfig::default())
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    /// Cached read of `key`.
    ///
    /// When `enabled` is false the read stays idle. Reads failing without a
    /// response are retried up to `read_retries` times.
    pub fn fetch<T, F>(&self, key: QueryKey, enabled: bool, fetcher: F) -> QueryState<T>
    where
        T: Any + Send + Sync,
        F: Fn(&ApiClient) -> Result<T, ApiError>,
    {
        if !enabled {
            return QueryState::Idle;
        }
        if let Some(v) = self.cache.get_fresh::<T>(&key) {
            debug!(%key, "cache hit");
            return QueryState::Success(v);
        }

        let ticket = self.cache.begin_fetch(&key);
        let mut attempt = 0;
        let result = loop {
            match fetcher(&self.api) {
                Err(e) if e.is_transport() && attempt < self.config.read_retries => {
                    attempt += 1;
                    warn!(%key, attempt, error = %e, "retrying read");
                }
                other => break other,
            }
        };

        match result {
            Ok(value) => match self.cache.complete(ticket, value) {
                Ok(v) => QueryState::Success(v),
                Err(_) => match self.cache.get_fresh::<T>(&key) {
                    Some(v) => QueryState::Success(v),
                    None => QueryState::Loading,
                },
            },
            Err(e) => {
                self.cache.abandon(ticket);
                QueryState::Error(e)
            }
        }
    }

    /// Runs a write once and, only if it succeeds, invalidates the caches
    /// the mutation affects.
    pub fn mutate<T, F>(&self, mutation: Mutation, op: F) -> Result<T, ApiError>
    where
        F: FnOnce(&ApiClient) -> Result<T, ApiError>,
    {
        match op(&self.api) {
            Ok(v) => {
                for resource in mutation.invalidates() {
                    let n = self.cache.invalidate_resource(*resource);
                    debug!(%resource, entries = n, "invalidated");
                }
                info!(%mutation, "mutation succeeded");
                Ok(v)
            }
            Err(e) => {
                warn!(%mutation, status = e.status, error = %e.message, "mutation failed");
                Err(e)
            }
        }
    }

    // Session

    pub fn is_authenticated(&self) -> bool {
        self.api.tokens().current().is_some()
    }

    /// Logs in, persists the token, caches the user and warms the accounts
    /// list the dashboard opens with.
    pub fn login(&self, credentials: &LoginRequest) -> Result<User, ApiError> {
        let resp = self.api.auth().login(credentials)?;
        Ok(self.start_session(resp))
    }

    pub fn register(&self, data: &RegisterRequest) -> Result<User, ApiError> {
        let resp = self.api.auth().register(data)?;
        Ok(self.start_session(resp))
    }

    fn start_session(&self, resp: AuthResponse) -> User {
        if let Err(e) = self.api.tokens().set(&resp.token) {
            warn!(error = %e, "could not persist token");
        }
        self.cache.clear();
        self.cache.set(&QueryKey::user(), resp.user.clone());
        info!(user = %resp.user.email, "signed in");
        if let QueryState::Error(e) = self.accounts() {
            warn!(error = %e, "could not prefetch accounts");
        }
        resp.user
    }

    pub fn logout(&self) {
        if let Err(e) = self.api.tokens().clear() {
            warn!(error = %e, "could not remove token");
        }
        self.cache.clear();
        info!("signed out");
    }

    /// Checks a stored token against `/users/me`.
    ///
    /// Returns `Ok(None)` when there is no token, or when the server rejects
    /// it with 401, in which case the token is removed. Any other failure is
    /// returned and the token is kept.
    pub fn restore_session(&self) -> Result<Option<Arc<User>>, ApiError> {
        if !self.is_authenticated() {
            return Ok(None);
        }
        match self.user() {
            QueryState::Success(u) => Ok(Some(u)),
            QueryState::Error(e) if e.is_unauthorized() => {
                warn!("stored token rejected, signing out");
                self.logout();
                Ok(None)
            }
            QueryState::Error(e) => Err(e),
            QueryState::Idle | QueryState::Loading => Ok(None),
        }
    }

    // Transactions

    pub fn transactions(&self, filter: Option<&TransactionFilter>) -> QueryState<Vec<Transaction>> {
        self.fetch(QueryKey::transactions(filter), true, |api| {
            api.transactions().list(filter)
        })
    }

    pub fn transaction(&self, id: &str) -> QueryState<Transaction> {
        self.fetch(QueryKey::transaction(id), !id.is_empty(), |api| {
            api.transactions().get_by_id(id)
        })
    }

    pub fn create_transaction(
        &self,
        data: &CreateTransactionRequest,
    ) -> Result<Transaction, ApiError> {
        self.mutate(Mutation::CreateTransaction, |api| {
            api.transactions().create(data)
        })
    }

    pub fn update_transaction(
        &self,
        id: &str,
        data: &UpdateTransactionRequest,
    ) -> Result<Transaction, ApiError> {
        self.mutate(Mutation::UpdateTransaction, |api| {
            api.transactions().update(id, data)
        })
    }

    pub fn delete_transaction(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.mutate(Mutation::DeleteTransaction, |api| {
            api.transactions().delete(id)
        })
    }

    // Accounts

    pub fn accounts(&self) -> QueryState<Vec<Account>> {
        self.fetch(QueryKey::accounts(), true, |api| api.accounts().list())
    }

    pub fn account(&self, id: &str) -> QueryState<Account> {
        self.fetch(QueryKey::account(id), !id.is_empty(), |api| {
            api.accounts().get_by_id(id)
        })
    }

    pub fn create_account(&self, data: &CreateAccountRequest) -> Result<Account, ApiError> {
        self.mutate(Mutation::CreateAccount, |api| api.accounts().create(data))
    }

    pub fn update_account(
        &self,
        id: &str,
        data: &UpdateAccountRequest,
    ) -> Result<Account, ApiError> {
        self.mutate(Mutation::UpdateAccount, |api| {
            api.accounts().update(id, data)
        })
    }

    pub fn delete_account(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.mutate(Mutation::DeleteAccount, |api| api.accounts().delete(id))
    }

    // Categories

    pub fn categories(&self) -> QueryState<Vec<Category>> {
        self.fetch(QueryKey::categories(), true, |api| api.categories().list())
    }

    pub fn category(&self, id: &str) -> QueryState<Category> {
        self.fetch(QueryKey::category(id), !id.is_empty(), |api| {
            api.categories().get_by_id(id)
        })
    }

    pub fn create_category(&self, data: &CreateCategoryRequest) -> Result<Category, ApiError> {
        self.mutate(Mutation::CreateCategory, |api| {
            api.categories().create(data)
        })
    }

    pub fn update_category(
        &self,
        id: &str,
        data: &UpdateCategoryRequest,
    ) -> Result<Category, ApiError> {
        self.mutate(Mutation::UpdateCategory, |api| {
            api.categories().update(id, data)
        })
    }

    pub fn delete_category(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.mutate(Mutation::DeleteCategory, |api| {
            api.categories().delete(id)
        })
    }

    // Transfers

    pub fn transfers(&self) -> QueryState<Vec<Transfer>> {
        self.fetch(QueryKey::transfers(), true, |api| api.transfers().list())
    }

    pub fn transfer(&self, id: &str) -> QueryState<Transfer> {
        self.fetch(QueryKey::transfer(id), !id.is_empty(), |api| {
            api.transfers().get_by_id(id)
        })
    }

    pub fn create_transfer(&self, data: &CreateTransferRequest) -> Result<Transfer, ApiError> {
        self.mutate(Mutation::CreateTransfer, |api| api.transfers().create(data))
    }

    pub fn update_transfer(
        &self,
        id: &str,
        data: &UpdateTransferRequest,
    ) -> Result<Transfer, ApiError> {
        self.mutate(Mutation::UpdateTransfer, |api| {
            api.transfers().update(id, data)
        })
    }

    pub fn delete_transfer(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.mutate(Mutation::DeleteTransfer, |api| api.transfers().delete(id))
    }

    // Budgets

    pub fn budgets(&self) -> QueryState<Vec<Budget>> {
        self.fetch(QueryKey::budgets(), true, |api| api.budgets().list())
    }

    pub fn budget(&self, id: &str) -> QueryState<Budget> {
        self.fetch(QueryKey::budget(id), !id.is_empty(), |api| {
            api.budgets().get_by_id(id)
        })
    }

    pub fn budget_status(&self, id: &str) -> QueryState<BudgetStatus> {
        self.fetch(QueryKey::budget_status(id), !id.is_empty(), |api| {
            api.budgets().get_status(id)
        })
    }

    pub fn create_budget(&self, data: &CreateBudgetRequest) -> Result<Budget, ApiError> {
        self.mutate(Mutation::CreateBudget, |api| api.budgets().create(data))
    }

    pub fn update_budget(&self, id: &str, data: &UpdateBudgetRequest) -> Result<Budget, ApiError> {
        self.mutate(Mutation::UpdateBudget, |api| api.budgets().update(id, data))
    }

    pub fn delete_budget(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.mutate(Mutation::DeleteBudget, |api| api.budgets().delete(id))
    }

    // User

    pub fn user(&self) -> QueryState<User> {
        self.fetch(QueryKey::user(), true, |api| api.users().get_me())
    }

    pub fn update_user(&self, data: &UpdateUserRequest) -> Result<User, ApiError> {
        self.mutate(Mutation::UpdateUser, |api| api.users().update_me(data))
    }

    // Analytics. Date-ranged reads stay idle until both dates are known.

    pub fn analytics_summary(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> QueryState<AnalyticsSummary> {
        self.fetch(
            QueryKey::analytics_summary(start, end),
            start.is_some() && end.is_some(),
            |api| match (start, end) {
                (Some(s), Some(e)) => api.analytics().summary(s, e),
                _ => Err(missing_range()),
            },
        )
    }

    pub fn analytics_by_category(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        kind: Option<TransactionType>,
    ) -> QueryState<Vec<CategoryBreakdown>> {
        self.fetch(
            QueryKey::analytics_by_category(start, end, kind),
            start.is_some() && end.is_some(),
            |api| match (start, end) {
                (Some(s), Some(e)) => api.analytics().by_category(s, e, kind),
                _ => Err(missing_range()),
            },
        )
    }

    /// Defaults to the last six months when `months` is `None`.
    pub fn monthly_comparison(&self, months: Option<u32>) -> QueryState<Vec<MonthlyComparison>> {
        let months = months.unwrap_or(DEFAULT_COMPARISON_MONTHS);
        self.fetch(QueryKey::monthly_comparison(months), true, |api| {
            api.analytics().monthly_comparison(months)
        })
    }

    pub fn trends(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        group_by: GroupBy,
    ) -> QueryState<Vec<TrendData>> {
        self.fetch(
            QueryKey::trends(start, end, group_by),
            start.is_some() && end.is_some(),
            |api| match (start, end) {
                (Some(s), Some(e)) => api.analytics().trends(s, e, group_by),
                _ => Err(missing_range()),
            },
        )
    }

    pub fn expense_income_chart(
        &self,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        group_by: GroupBy,
    ) -> QueryState<Vec<TrendData>> {
        self.fetch(
            QueryKey::expense_income_chart(start, end, group_by),
            start.is_some() && end.is_some(),
            |api| match (start, end) {
                (Some(s), Some(e)) => api.analytics().expense_income_chart(s, e, group_by),
                _ => Err(missing_range()),
            },
        )
    }
}

fn missing_range() -> ApiError {
    ApiError {
        message: "start and end dates are required".into(),
        status: 0,
        data: serde_json::Value::Null,
    }
}
