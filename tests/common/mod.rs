// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use tally::api::{ApiClient, HttpRequest, HttpResponse, Method, Transport, TransportError};
use tally::db::{MemoryTokenStore, TokenStore};
use tally::query::QueryClient;

pub const BASE: &str = "http://finance.test/api/v1";

type Reply = Result<HttpResponse, TransportError>;
type Hook = Box<dyn Fn(&HttpRequest) + Send + Sync>;

/// Scripted transport: replies are queued per `(method, path)` and the last
/// one for a route keeps being served once the queue runs dry.
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<(Method, String), VecDeque<Reply>>>,
    requests: Mutex<Vec<HttpRequest>>,
    before_reply: Mutex<Option<Hook>>,
}

impl MockTransport {
    pub fn on(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    pub fn ok(&self, method: Method, path: &str, body: Value) -> &Self {
        self.on(method, path, Ok(json_response(200, "OK", &body)))
    }

    pub fn fail(&self, method: Method, path: &str, status: u16, body: Value) -> &Self {
        let text = match status {
            400 => "Bad Request",
            401 => "Unauthorized",
            404 => "Not Found",
            _ => "Internal Server Error",
        };
        self.on(method, path, Ok(json_response(status, text, &body)))
    }

    pub fn unreachable(&self, method: Method, path: &str) -> &Self {
        self.on(method, path, Err(TransportError::new("connection refused")))
    }

    /// Runs `hook` on every request before its reply is picked.
    pub fn before_reply(&self, hook: impl Fn(&HttpRequest) + Send + Sync + 'static) {
        *self.before_reply.lock().unwrap() = Some(Box::new(hook));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        let url = format!("{BASE}{path}");
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }
}

impl Transport for MockTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let path = request
            .url
            .strip_prefix(BASE)
            .unwrap_or(&request.url)
            .to_string();
        let method = request.method;
        if let Some(hook) = self.before_reply.lock().unwrap().as_ref() {
            hook(&request);
        }
        self.requests.lock().unwrap().push(request);

        let mut routes = self.routes.lock().unwrap();
        match routes.get_mut(&(method, path.clone())) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) if !queue.is_empty() => queue[0].clone(),
            _ => Ok(json_response(
                404,
                "Not Found",
                &json!({ "error": format!("no route for {method} {path}") }),
            )),
        }
    }
}

pub fn json_response(status: u16, status_text: &str, body: &Value) -> HttpResponse {
    HttpResponse {
        status,
        status_text: status_text.to_string(),
        content_type: Some("application/json".to_string()),
        body: body.to_string(),
    }
}

pub struct Harness {
    pub transport: Arc<MockTransport>,
    pub tokens: Arc<MemoryTokenStore>,
    pub client: QueryClient,
}

pub fn harness() -> Harness {
    harness_with(MemoryTokenStore::default())
}

pub fn signed_in() -> Harness {
    harness_with(MemoryTokenStore::with_token("tok-1"))
}

pub fn harness_with(tokens: MemoryTokenStore) -> Harness {
    let transport = Arc::new(MockTransport::default());
    let tokens = Arc::new(tokens);
    let store: Arc<dyn TokenStore> = tokens.clone();
    let api = ApiClient::new(BASE, transport.clone(), store);
    Harness {
        transport,
        tokens,
        client: QueryClient::with_api(api),
    }
}

const TS: &str = "2025-01-15T10:00:00Z";

pub fn user() -> Value {
    json!({
        "id": "u1",
        "email": "ada@example.com",
        "name": "Ada",
        "created_at": TS,
        "updated_at": TS
    })
}

pub fn account(id: &str, balance: f64) -> Value {
    json!({
        "id": id,
        "user_id": "u1",
        "name": "Checking",
        "type": "checking",
        "balance": balance,
        "created_at": TS,
        "updated_at": TS
    })
}

pub fn category(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "user_id": "u1",
        "name": name,
        "description": "",
        "created_at": TS,
        "updated_at": TS
    })
}

pub fn transaction(id: &str, kind: &str, amount: f64, date: &str) -> Value {
    json!({
        "id": id,
        "user_id": "u1",
        "account_id": "a1",
        "category_id": "c1",
        "type": kind,
        "amount": amount,
        "description": format!("tx {id}"),
        "date": format!("{date}T00:00:00Z"),
        "created_at": TS,
        "updated_at": TS
    })
}

pub fn deleted(mut v: Value) -> Value {
    v["deleted_at"] = json!(TS);
    v
}

pub fn transfer(id: &str, amount: f64) -> Value {
    json!({
        "id": id,
        "user_id": "u1",
        "from_account_id": "a1",
        "to_account_id": "a2",
        "amount": amount,
        "description": "",
        "date": "2025-01-20T00:00:00Z",
        "created_at": TS,
        "updated_at": TS
    })
}

pub fn message(text: &str) -> Value {
    json!({ "message": text })
}
