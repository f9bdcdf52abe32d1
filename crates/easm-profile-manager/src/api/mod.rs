use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    actions::bulk_delete,
    auth::authenticate_all,
    errors::{ConnectError, MissingFieldError},
    identity::expand,
    models::{AuthFailure, ProfileRecord, SelectionKey},
    table::{filter, Selection},
    AppState,
};

fn refresh_stopped() -> Response {
    (StatusCode::SERVICE_UNAVAILABLE, "refresh loop stopped").into_response()
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok", "service": "easm-profile-manager"}))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectRequest {
    gateway_host: String,
    base_username: String,
    start: u32,
    end: u32,
    password: String,
}

impl ConnectRequest {
    fn usernames(&self) -> Result<Vec<String>, ConnectError> {
        let required = [
            ("gatewayHost", self.gateway_host.trim()),
            ("baseUsername", self.base_username.trim()),
            ("password", self.password.as_str()),
        ];
        if let Some((field, _)) = required.iter().find(|(_, v)| v.is_empty()) {
            return Err(MissingFieldError { field: *field }.into());
        }
        Ok(expand(self.base_username.trim(), self.start, self.end)?)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectResponse {
    gateway_host: String,
    authenticated: Vec<String>,
    failed: Vec<AuthFailure>,
}

pub async fn connect(State(state): State<AppState>, Json(req): Json<ConnectRequest>) -> Response {
    let usernames = match req.usernames() {
        Ok(names) => names,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let gateway = (state.gateway_for)(state.http.clone(), &req.gateway_host);
    info!(gateway = gateway.host(), identities = usernames.len(), "connecting");
    let connection = authenticate_all(
        &gateway,
        &usernames,
        &req.password,
        state.config.max_concurrent_requests,
    )
    .await;

    let response = ConnectResponse {
        gateway_host: gateway.host().to_string(),
        authenticated: connection.sessions.usernames(),
        failed: connection.auth_failures.clone(),
    };

    if connection.sessions.is_empty() {
        warn!(gateway = gateway.host(), "no identity authenticated");
    }
    *state.dashboard.write().await = Some(connection);
    if state.refresh.refresh().await.is_none() {
        return refresh_stopped();
    }

    Json(response).into_response()
}

pub async fn disconnect(State(state): State<AppState>) -> Response {
    *state.dashboard.write().await = None;
    if state.refresh.refresh().await.is_none() {
        return refresh_stopped();
    }
    StatusCode::NO_CONTENT.into_response()
}

#[derive(Debug, Deserialize)]
pub struct ProfilesQuery {
    #[serde(default)]
    q: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRow {
    #[serde(flatten)]
    record: ProfileRecord,
    status_key: &'static str,
    status_color: &'static str,
}

impl From<&ProfileRecord> for ProfileRow {
    fn from(record: &ProfileRecord) -> Self {
        Self {
            status_key: record.status.key(),
            status_color: record.status.color(),
            record: record.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilesResponse {
    connected: bool,
    gateway_host: Option<String>,
    generation: u64,
    refreshed_at: Option<DateTime<Utc>>,
    total: usize,
    rows: Vec<ProfileRow>,
    auth_failures: Vec<AuthFailure>,
}

pub async fn list_profiles(
    State(state): State<AppState>,
    Query(query): Query<ProfilesQuery>,
) -> Json<ProfilesResponse> {
    let (gateway_host, auth_failures) = match state.dashboard.read().await.as_ref() {
        Some(conn) => (
            Some(conn.gateway.host().to_string()),
            conn.auth_failures.clone(),
        ),
        None => (None, Vec::new()),
    };

    let snapshot = state.snapshots.borrow().clone();
    let rows = filter(&snapshot.records, &query.q)
        .into_iter()
        .map(ProfileRow::from)
        .collect();

    Json(ProfilesResponse {
        connected: gateway_host.is_some(),
        gateway_host,
        generation: snapshot.generation,
        refreshed_at: snapshot.refreshed_at,
        total: snapshot.records.len(),
        rows,
        auth_failures,
    })
}

/// Either explicit selections, or every selectable row matching `q` when
/// `selectAll` is set.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    #[serde(default)]
    selections: Vec<SelectionKey>,
    #[serde(default)]
    select_all: bool,
    #[serde(default)]
    q: String,
}

pub async fn delete_profiles(
    State(state): State<AppState>,
    Json(req): Json<DeleteRequest>,
) -> Response {
    let selection = if req.select_all {
        let snapshot = state.snapshots.borrow().clone();
        Selection::all(filter(&snapshot.records, &req.q))
    } else {
        req.selections.into_iter().collect()
    };
    if selection.is_empty() {
        return (StatusCode::BAD_REQUEST, "no profiles selected").into_response();
    }

    let Some(connection) = state.dashboard.read().await.clone() else {
        return (StatusCode::CONFLICT, "not connected").into_response();
    };

    info!(count = selection.len(), "deleting selected profiles");
    let report = bulk_delete(&connection.gateway, &connection.sessions, &selection).await;
    info!(
        succeeded = report.succeeded.len(),
        failed = report.failed.len(),
        "bulk delete finished"
    );

    if state.refresh.refresh().await.is_none() {
        warn!("refresh loop stopped, table not updated after delete");
        return refresh_stopped();
    }
    Json(report).into_response()
}

pub async fn refresh(State(state): State<AppState>) -> Response {
    match state.refresh.refresh().await {
        Some(generation) => Json(serde_json::json!({"generation": generation})).into_response(),
        None => refresh_stopped(),
    }
}
