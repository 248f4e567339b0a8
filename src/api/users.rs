// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{ApiClient, ApiError};
use crate::models::{UpdateUserRequest, User};

pub struct UsersApi<'a> {
    api: &'a ApiClient,
}

impl ApiClient {
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi { api: self }
    }
}

impl UsersApi<'_> {
    pub fn get_me(&self) -> Result<User, ApiError> {
        self.api.get("/users/me")
    }

    pub fn update_me(&self, data: &UpdateUserRequest) -> Result<User, ApiError> {
        self.api.put("/users/me", data)
    }
}
