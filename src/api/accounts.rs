// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{ApiClient, ApiError};
use crate::models::{Account, CreateAccountRequest, MessageResponse, UpdateAccountRequest};

pub struct AccountsApi<'a> {
    api: &'a ApiClient,
}

impl ApiClient {
    pub fn accounts(&self) -> AccountsApi<'_> {
        AccountsApi { api: self }
    }
}

impl AccountsApi<'_> {
    pub fn list(&self) -> Result<Vec<Account>, ApiError> {
        self.api.get("/accounts")
    }

    pub fn get_by_id(&self, id: &str) -> Result<Account, ApiError> {
        self.api.get(&format!("/accounts/{id}"))
    }

    pub fn create(&self, data: &CreateAccountRequest) -> Result<Account, ApiError> {
        self.api.post("/accounts", data)
    }

    pub fn update(&self, id: &str, data: &UpdateAccountRequest) -> Result<Account, ApiError> {
        self.api.put(&format!("/accounts/{id}"), data)
    }

    pub fn delete(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.api.delete(&format!("/accounts/{id}"))
    }
}
