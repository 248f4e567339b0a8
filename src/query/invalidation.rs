// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::key::Resource;
use std::fmt;

/// Every write the client can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    CreateTransaction,
    UpdateTransaction,
    DeleteTransaction,
    CreateTransfer,
    UpdateTransfer,
    DeleteTransfer,
    CreateAccount,
    UpdateAccount,
    DeleteAccount,
    CreateCategory,
    UpdateCategory,
    DeleteCategory,
    CreateBudget,
    UpdateBudget,
    DeleteBudget,
    UpdateUser,
}

use Mutation::*;
use Resource::{Accounts, Budgets, Categories, Transactions, Transfers, User};

/// Cache prefixes each successful write invalidates.
///
/// Balances are computed by the server from transactions and transfers, so
/// every write to either also invalidates `accounts`.
pub const INVALIDATION_TABLE: &[(Mutation, &[Resource])] = &[
    (CreateTransaction, &[Transactions, Accounts]),
    (UpdateTransaction, &[Transactions, Accounts]),
    (DeleteTransaction, &[Transactions, Accounts]),
    (CreateTransfer, &[Transfers, Accounts]),
    (UpdateTransfer, &[Transfers, Accounts]),
    (DeleteTransfer, &[Transfers, Accounts]),
    (CreateAccount, &[Accounts]),
    (UpdateAccount, &[Accounts]),
    (DeleteAccount, &[Accounts]),
    (CreateCategory, &[Categories]),
    (UpdateCategory, &[Categories]),
    (DeleteCategory, &[Categories]),
    (CreateBudget, &[Budgets]),
    (UpdateBudget, &[Budgets]),
    (DeleteBudget, &[Budgets]),
    (UpdateUser, &[User]),
];

impl Mutation {
    pub const ALL: [Mutation; 16] = [
        CreateTransaction,
        UpdateTransaction,
        DeleteTransaction,
        CreateTransfer,
        UpdateTransfer,
        DeleteTransfer,
        CreateAccount,
        UpdateAccount,
        DeleteAccount,
        CreateCategory,
        UpdateCategory,
        DeleteCategory,
        CreateBudget,
        UpdateBudget,
        DeleteBudget,
        UpdateUser,
    ];

    /// The resource this mutation writes to.
    pub fn resource(&self) -> Resource {
        match self {
            CreateTransaction | UpdateTransaction | DeleteTransaction => Transactions,
            CreateTransfer | UpdateTransfer | DeleteTransfer => Transfers,
            CreateAccount | UpdateAccount | DeleteAccount => Accounts,
            CreateCategory | UpdateCategory | DeleteCategory => Categories,
            CreateBudget | UpdateBudget | DeleteBudget => Budgets,
            UpdateUser => User,
        }
    }

    pub fn invalidates(&self) -> &'static [Resource] {
        INVALIDATION_TABLE
            .iter()
            .find(|(m, _)| m == self)
            .map(|(_, r)| *r)
            .unwrap_or(&[])
    }

    fn verb(&self) -> &'static str {
        match self {
            CreateTransaction | CreateTransfer | CreateAccount | CreateCategory | CreateBudget => {
                "create"
            }
            UpdateTransaction | UpdateTransfer | UpdateAccount | UpdateCategory | UpdateBudget
            | UpdateUser => "update",
            DeleteTransaction | DeleteTransfer | DeleteAccount | DeleteCategory | DeleteBudget => {
                "delete"
            }
        }
    }
}

impl fmt::Display for Mutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verb(), self.resource())
    }
}
