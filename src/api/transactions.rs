// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{ApiClient, ApiError, query_string};
use crate::models::{
    CreateTransactionRequest, MessageResponse, Transaction, TransactionFilter,
    UpdateTransactionRequest,
};

pub struct TransactionsApi<'a> {
    api: &'a ApiClient,
}

impl ApiClient {
    pub fn transactions(&self) -> TransactionsApi<'_> {
        TransactionsApi { api: self }
    }
}

/// Path for `GET /transactions`; only the filters that are set are sent.
pub fn list_path(filter: Option<&TransactionFilter>) -> Result<String, ApiError> {
    match filter {
        Some(f) => Ok(format!("/transactions{}", query_string(&f.normalized())?)),
        None => Ok("/transactions".to_string()),
    }
}

impl TransactionsApi<'_> {
    pub fn list(&self, filter: Option<&TransactionFilter>) -> Result<Vec<Transaction>, ApiError> {
        self.api.get(&list_path(filter)?)
    }

    pub fn get_by_id(&self, id: &str) -> Result<Transaction, ApiError> {
        self.api.get(&format!("/transactions/{id}"))
    }

    pub fn create(&self, data: &CreateTransactionRequest) -> Result<Transaction, ApiError> {
        self.api.post("/transactions", data)
    }

    pub fn update(
        &self,
        id: &str,
        data: &UpdateTransactionRequest,
    ) -> Result<Transaction, ApiError> {
        self.api.put(&format!("/transactions/{id}"), data)
    }

    pub fn delete(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.api.delete(&format!("/transactions/{id}"))
    }
}
