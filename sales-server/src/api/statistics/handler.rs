//! Statistics API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use shared::models::{MonthlyTotals, Period, TenantSummary};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::ledger::aggregate::saturating_sum;
use crate::utils::format::{format_percentage, format_yen};
use crate::utils::time::parse_period_or_current;
use crate::utils::{ApiResponse, AppResult, ok};

#[derive(Debug, Default, Deserialize)]
pub struct OverviewQuery {
    /// `YYYY-MM`; defaults to the current month
    pub period: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyQuery {
    pub tenant_id: Option<String>,
}

/// One tenant's row with display strings for the UI
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewRow {
    #[serde(flatten)]
    pub summary: TenantSummary,
    pub current_total_display: String,
    pub previous_total_display: String,
    pub percentage_change_display: String,
}

impl From<TenantSummary> for OverviewRow {
    fn from(summary: TenantSummary) -> Self {
        Self {
            current_total_display: format_yen(summary.current_total),
            previous_total_display: format_yen(summary.previous_total),
            percentage_change_display: format_percentage(summary.percentage_change),
            summary,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    pub period: Period,
    pub previous_period: Period,
    pub tenants: Vec<OverviewRow>,
    pub grand_total: u64,
}

/// GET /api/statistics/overview - 全テナント売上一覧 (admin)
///
/// One row per tenant in directory order, compared against the month before
/// `period`.
pub async fn overview(
    State(state): State<ServerState>,
    Query(query): Query<OverviewQuery>,
) -> AppResult<Json<ApiResponse<OverviewResponse>>> {
    let period = parse_period_or_current(query.period.as_deref())?;

    let ledger = state.ledger.read().await;
    let directory = state.directory.read().await;
    let tenants: Vec<OverviewRow> = directory
        .list_tenants()
        .iter()
        .map(|tenant| {
            let mut summary = ledger.tenant_summary(&tenant.id, period);
            summary.tenant_name = Some(tenant.name.clone());
            OverviewRow::from(summary)
        })
        .collect();
    let grand_total = saturating_sum(tenants.iter().map(|row| row.summary.current_total));

    Ok(ok(OverviewResponse {
        period,
        previous_period: period.previous(),
        tenants,
        grand_total,
    }))
}

/// GET /api/statistics/monthly - 月別推移
///
/// Tenant users see only their own tenant. Admins see every tenant in the
/// directory, or one with `?tenantId=`.
pub async fn monthly(
    State(state): State<ServerState>,
    current: CurrentUser,
    Query(query): Query<MonthlyQuery>,
) -> AppResult<Json<ApiResponse<Vec<MonthlyTotals>>>> {
    let tenant_ids: Vec<String> = match current.scope(query.tenant_id.as_deref())? {
        Some(tenant_id) => vec![tenant_id.to_string()],
        None => state
            .directory
            .read()
            .await
            .list_tenants()
            .iter()
            .map(|t| t.id.clone())
            .collect(),
    };

    Ok(ok(state.ledger.read().await.monthly_breakdown(&tenant_ids)))
}
