// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{ApiClient, ApiError};
use crate::models::{AuthResponse, LoginRequest, RegisterRequest};

pub struct AuthApi<'a> {
    api: &'a ApiClient,
}

impl ApiClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { api: self }
    }
}

impl AuthApi<'_> {
    pub fn login(&self, data: &LoginRequest) -> Result<AuthResponse, ApiError> {
        self.api.post("/auth/login", data)
    }

    pub fn register(&self, data: &RegisterRequest) -> Result<AuthResponse, ApiError> {
        self.api.post("/auth/register", data)
    }
}
