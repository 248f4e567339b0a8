// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{ApiClient, ApiError};
use crate::models::{
    Budget, BudgetStatus, CreateBudgetRequest, MessageResponse, UpdateBudgetRequest,
};

pub struct BudgetsApi<'a> {
    api: &'a ApiClient,
}

impl ApiClient {
    pub fn budgets(&self) -> BudgetsApi<'_> {
        BudgetsApi { api: self }
    }
}

impl BudgetsApi<'_> {
    pub fn list(&self) -> Result<Vec<Budget>, ApiError> {
        self.api.get("/budgets")
    }

    pub fn get_by_id(&self, id: &str) -> Result<Budget, ApiError> {
        self.api.get(&format!("/budgets/{id}"))
    }

    /// Spent/remaining figures computed by the server.
    pub fn get_status(&self, id: &str) -> Result<BudgetStatus, ApiError> {
        self.api.get(&format!("/budgets/{id}/status"))
    }

    pub fn create(&self, data: &CreateBudgetRequest) -> Result<Budget, ApiError> {
        self.api.post("/budgets", data)
    }

    pub fn update(&self, id: &str, data: &UpdateBudgetRequest) -> Result<Budget, ApiError> {
        self.api.put(&format!("/budgets/{id}"), data)
    }

    pub fn delete(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.api.delete(&format!("/budgets/{id}"))
    }
}
