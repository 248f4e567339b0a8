// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{ApiClient, ApiError};
use crate::models::{Category, CreateCategoryRequest, MessageResponse, UpdateCategoryRequest};

pub struct CategoriesApi<'a> {
    api: &'a ApiClient,
}

impl ApiClient {
    pub fn categories(&self) -> CategoriesApi<'_> {
        CategoriesApi { api: self }
    }
}

impl CategoriesApi<'_> {
    pub fn list(&self) -> Result<Vec<Category>, ApiError> {
        self.api.get("/categories")
    }

    pub fn get_by_id(&self, id: &str) -> Result<Category, ApiError> {
        self.api.get(&format!("/categories/{id}"))
    }

    pub fn create(&self, data: &CreateCategoryRequest) -> Result<Category, ApiError> {
        self.api.post("/categories", data)
    }

    pub fn update(&self, id: &str, data: &UpdateCategoryRequest) -> Result<Category, ApiError> {
        self.api.put(&format!("/categories/{id}"), data)
    }

    pub fn delete(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.api.delete(&format!("/categories/{id}"))
    }
}
