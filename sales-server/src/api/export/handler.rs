//! CSV export handler

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::audit_log;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::export::{CSV_CONTENT_TYPE, export_filename, sales_csv as render_csv};
use crate::utils::AppResult;
use crate::utils::time::today;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportQuery {
    pub tenant_id: Option<String>,
}

/// GET /api/export/sales.csv - CSV ダウンロード
///
/// Same scoping as `GET /api/sales`: tenant users export their own records
/// (newest first), admins everything or one tenant.
pub async fn sales_csv(
    State(state): State<ServerState>,
    current: CurrentUser,
    Query(query): Query<ExportQuery>,
) -> AppResult<Response> {
    let scope = current.scope(query.tenant_id.as_deref())?;

    let body = {
        let ledger = state.ledger.read().await;
        let directory = state.directory.read().await;
        match scope {
            Some(tenant_id) => render_csv(&ledger.records_for_tenant(tenant_id), &directory),
            None => render_csv(ledger.records(), &directory),
        }
    };

    let filename = export_filename(today());
    audit_log!(current.id, "export", "sales.csv", format!("scope={}", scope.unwrap_or("all")));

    Ok((
        [
            (header::CONTENT_TYPE, CSV_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response())
}
