// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{ApiClient, ApiError};
use crate::models::{CreateTransferRequest, MessageResponse, Transfer, UpdateTransferRequest};

pub struct TransfersApi<'a> {
    api: &'a ApiClient,
}

impl ApiClient {
    pub fn transfers(&self) -> TransfersApi<'_> {
        TransfersApi { api: self }
    }
}

impl TransfersApi<'_> {
    pub fn list(&self) -> Result<Vec<Transfer>, ApiError> {
        self.api.get("/transfers")
    }

    pub fn get_by_id(&self, id: &str) -> Result<Transfer, ApiError> {
        self.api.get(&format!("/transfers/{id}"))
    }

    pub fn create(&self, data: &CreateTransferRequest) -> Result<Transfer, ApiError> {
        self.api.post("/transfers", data)
    }

    pub fn update(&self, id: &str, data: &UpdateTransferRequest) -> Result<Transfer, ApiError> {
        self.api.put(&format!("/transfers/{id}"), data)
    }

    pub fn delete(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.api.delete(&format!("/transfers/{id}"))
    }
}
