// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{ApiClient, ApiError, query_string};
use crate::models::{
    AnalyticsSummary, CategoryBreakdown, GroupBy, MonthlyComparison, TransactionType, TrendData,
};
use chrono::NaiveDate;
use serde::Serialize;

pub const DEFAULT_COMPARISON_MONTHS: u32 = 6;

#[derive(Serialize)]
struct RangeParams {
    start_date: NaiveDate,
    end_date: NaiveDate,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group_by: Option<GroupBy>,
}

impl RangeParams {
    fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        RangeParams {
            start_date,
            end_date,
            kind: None,
            group_by: None,
        }
    }
}

#[derive(Serialize)]
struct MonthsParams {
    months: u32,
}

pub struct AnalyticsApi<'a> {
    api: &'a ApiClient,
}

impl ApiClient {
    pub fn analytics(&self) -> AnalyticsApi<'_> {
        AnalyticsApi { api: self }
    }
}

impl AnalyticsApi<'_> {
    pub fn summary(&self, start: NaiveDate, end: NaiveDate) -> Result<AnalyticsSummary, ApiError> {
        let q = query_string(&RangeParams::new(start, end))?;
        self.api.get(&format!("/analytics/summary{q}"))
    }

    /// `kind = None` means every transaction type; no `type` parameter is sent.
    pub fn by_category(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        kind: Option<TransactionType>,
    ) -> Result<Vec<CategoryBreakdown>, ApiError> {
        let q = query_string(&RangeParams {
            kind,
            ..RangeParams::new(start, end)
        })?;
        self.api.get(&format!("/analytics/by-category{q}"))
    }

    pub fn monthly_comparison(&self, months: u32) -> Result<Vec<MonthlyComparison>, ApiError> {
        let q = query_string(&MonthsParams { months })?;
        self.api.get(&format!("/analytics/monthly-comparison{q}"))
    }

    pub fn trends(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        group_by: GroupBy,
    ) -> Result<Vec<TrendData>, ApiError> {
        let q = query_string(&RangeParams {
            group_by: Some(group_by),
            ..RangeParams::new(start, end)
        })?;
        self.api.get(&format!("/analytics/trends{q}"))
    }

    pub fn expense_income_chart(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        group_by: GroupBy,
    ) -> Result<Vec<TrendData>, ApiError> {
        let q = query_string(&RangeParams {
            group_by: Some(group_by),
            ..RangeParams::new(start, end)
        })?;
        self.api.get(&format!("/analytics/expense-income-chart{q}"))
    }
}
