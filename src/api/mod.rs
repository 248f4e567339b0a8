// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod analytics;
pub mod auth;
pub mod budgets;
pub mod categories;
pub mod client;
pub mod transactions;
pub mod transfers;
pub mod users;

pub use client::{
    ApiClient, ApiError, HttpRequest, HttpResponse, Method, ReqwestTransport, Transport,
    TransportError,
};

use serde::Serialize;

/// Encodes `params` as `?k=v&...`, or an empty string when nothing is set.
///
/// Fields skipped during serialization never appear in the output.
pub fn query_string<T: Serialize>(params: &T) -> Result<String, ApiError> {
    let encoded = serde_urlencoded::to_string(params).map_err(|e| ApiError {
        message: format!("could not encode query string: {e}"),
        status: 0,
        data: serde_json::Value::Null,
    })?;
    if encoded.is_empty() {
        Ok(String::new())
    } else {
        Ok(format!("?{encoded}"))
    }
}
