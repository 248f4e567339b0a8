// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Input checks run before a request is sent.
//!
//! Each validator is a pure function over the request payload and returns
//! every problem it finds, so a form can show them all at once. The server
//! stays authoritative; these only catch obvious mistakes early.

use crate::models::{
    CreateAccountRequest, CreateBudgetRequest, CreateCategoryRequest, CreateTransactionRequest,
    CreateTransferRequest, LoginRequest, RegisterRequest, UpdateAccountRequest,
    UpdateBudgetRequest, UpdateCategoryRequest, UpdateTransactionRequest, UpdateTransferRequest,
    UpdateUserRequest,
};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::fmt;

pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|e| panic!("bad email regex: {e}"))
});
static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap_or_else(|e| panic!("bad color regex: {e}"))
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Field errors collected by one validator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(pub Vec<FieldError>);

impl FieldErrors {
    fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    fn check(&mut self, ok: bool, field: &'static str, message: &'static str) {
        if !ok {
            self.push(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn for_field(&self, field: &str) -> Vec<&FieldError> {
        self.0.iter().filter(|e| e.field == field).collect()
    }

    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

fn present(s: &str) -> bool {
    !s.trim().is_empty()
}

fn positive(d: &Decimal) -> bool {
    *d > Decimal::ZERO
}

pub fn is_email(s: &str) -> bool {
    EMAIL.is_match(s.trim())
}

pub fn validate_login(req: &LoginRequest) -> Result<(), FieldErrors> {
    let mut errs = FieldErrors::default();
    errs.check(is_email(&req.email), "email", "invalid email");
    errs.check(present(&req.password), "password", "password is required");
    errs.into_result()
}

pub fn validate_register(req: &RegisterRequest, confirm_password: &str) -> Result<(), FieldErrors> {
    let mut errs = FieldErrors::default();
    errs.check(present(&req.name), "name", "name is required");
    errs.check(is_email(&req.email), "email", "invalid email");
    errs.check(
        req.password.chars().count() >= MIN_PASSWORD_LENGTH,
        "password",
        "password must be at least 6 characters",
    );
    errs.check(
        req.password == confirm_password,
        "confirm_password",
        "passwords do not match",
    );
    errs.into_result()
}

pub fn validate_account(req: &CreateAccountRequest) -> Result<(), FieldErrors> {
    let mut errs = FieldErrors::default();
    errs.check(present(&req.name), "name", "name is required");
    errs.check(
        req.balance.is_none_or(|b| b >= Decimal::ZERO),
        "balance",
        "balance cannot be negative",
    );
    errs.into_result()
}

pub fn validate_category(req: &CreateCategoryRequest) -> Result<(), FieldErrors> {
    let mut errs = FieldErrors::default();
    errs.check(present(&req.name), "name", "name is required");
    errs.check(
        req.color.as_deref().is_none_or(|c| HEX_COLOR.is_match(c)),
        "color",
        "color must look like #RRGGBB",
    );
    errs.into_result()
}

pub fn validate_transaction(req: &CreateTransactionRequest) -> Result<(), FieldErrors> {
    let mut errs = FieldErrors::default();
    errs.check(present(&req.account_id), "account_id", "account is required");
    errs.check(present(&req.category_id), "category_id", "category is required");
    errs.check(
        req.amount > Decimal::ZERO,
        "amount",
        "amount must be greater than zero",
    );
    errs.into_result()
}

pub fn validate_transfer(req: &CreateTransferRequest) -> Result<(), FieldErrors> {
    let mut errs = FieldErrors::default();
    let from_ok = present(&req.from_account_id);
    let to_ok = present(&req.to_account_id);
    errs.check(from_ok, "from_account_id", "source account is required");
    errs.check(to_ok, "to_account_id", "destination account is required");
    errs.check(
        req.amount > Decimal::ZERO,
        "amount",
        "amount must be greater than zero",
    );
    if from_ok && to_ok {
        errs.check(
            req.from_account_id != req.to_account_id,
            "to_account_id",
            "accounts must be different",
        );
    }
    errs.into_result()
}

pub fn validate_budget(req: &CreateBudgetRequest) -> Result<(), FieldErrors> {
    let mut errs = FieldErrors::default();
    errs.check(present(&req.category_id), "category_id", "category is required");
    errs.check(
        req.amount > Decimal::ZERO,
        "amount",
        "amount must be greater than zero",
    );
    errs.check(
        req.end_date >= req.start_date,
        "end_date",
        "end date cannot be before start date",
    );
    errs.into_result()
}

pub fn validate_user_update(req: &UpdateUserRequest) -> Result<(), FieldErrors> {
    let mut errs = FieldErrors::default();
    errs.check(
        req.name.as_deref().is_none_or(present),
        "name",
        "name is required",
    );
    errs.check(
        req.email.as_deref().is_none_or(is_email),
        "email",
        "invalid email",
    );
    errs.into_result()
}

// Edits send only the fields that changed, so each rule applies when its
// field is present.

pub fn validate_account_update(req: &UpdateAccountRequest) -> Result<(), FieldErrors> {
    let mut errs = FieldErrors::default();
    errs.check(
        req.name.as_deref().is_none_or(present),
        "name",
        "name is required",
    );
    errs.check(
        req.balance.is_none_or(|b| b >= Decimal::ZERO),
        "balance",
        "balance cannot be negative",
    );
    errs.into_result()
}

pub fn validate_category_update(req: &UpdateCategoryRequest) -> Result<(), FieldErrors> {
    let mut errs = FieldErrors::default();
    errs.check(
        req.name.as_deref().is_none_or(present),
        "name",
        "name is required",
    );
    errs.check(
        req.color.as_deref().is_none_or(|c| HEX_COLOR.is_match(c)),
        "color",
        "color must look like #RRGGBB",
    );
    errs.into_result()
}

pub fn validate_transaction_update(req: &UpdateTransactionRequest) -> Result<(), FieldErrors> {
    let mut errs = FieldErrors::default();
    errs.check(
        req.account_id.as_deref().is_none_or(present),
        "account_id",
        "account is required",
    );
    errs.check(
        req.category_id.as_deref().is_none_or(present),
        "category_id",
        "category is required",
    );
    errs.check(
        req.amount.as_ref().is_none_or(positive),
        "amount",
        "amount must be greater than zero",
    );
    errs.into_result()
}

/// Only a change that names both accounts can be checked for a self-transfer.
pub fn validate_transfer_update(req: &UpdateTransferRequest) -> Result<(), FieldErrors> {
    let mut errs = FieldErrors::default();
    errs.check(
        req.from_account_id.as_deref().is_none_or(present),
        "from_account_id",
        "source account is required",
    );
    errs.check(
        req.to_account_id.as_deref().is_none_or(present),
        "to_account_id",
        "destination account is required",
    );
    errs.check(
        req.amount.as_ref().is_none_or(positive),
        "amount",
        "amount must be greater than zero",
    );
    if let (Some(from), Some(to)) = (&req.from_account_id, &req.to_account_id) {
        if present(from) && present(to) {
            errs.check(from != to, "to_account_id", "accounts must be different");
        }
    }
    errs.into_result()
}

pub fn validate_budget_update(req: &UpdateBudgetRequest) -> Result<(), FieldErrors> {
    let mut errs = FieldErrors::default();
    errs.check(
        req.category_id.as_deref().is_none_or(present),
        "category_id",
        "category is required",
    );
    errs.check(
        req.amount.as_ref().is_none_or(positive),
        "amount",
        "amount must be greater than zero",
    );
    if let (Some(start), Some(end)) = (req.start_date, req.end_date) {
        errs.check(end >= start, "end_date", "end date cannot be before start date");
    }
    errs.into_result()
}
