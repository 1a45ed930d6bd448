//! Axum route handlers for the quote generator RPC API.

use crate::app::QuoteApp;
use crate::error::QuoteError;
use crate::notify::Notifier;
use crate::sync::SyncContext;
use crate::sync_api;
use crate::transfer;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use quote_generator_types::*;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

pub struct AppState {
    pub app: Arc<Mutex<QuoteApp>>,
    pub sync: SyncContext,
    pub notifier: Arc<Notifier>,
    pub start_time: Instant,
    pub sync_enabled: bool,
    pub sync_interval_secs: u64,
}

fn error_status(e: &QuoteError) -> StatusCode {
    match e {
        QuoteError::NoQuotes | QuoteError::NoQuotesInCategory(_) => StatusCode::NOT_FOUND,
        QuoteError::Network(_) => StatusCode::BAD_GATEWAY,
        e if e.is_client_error() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn respond<T: serde::Serialize>(
    result: Result<T, QuoteError>,
) -> (StatusCode, Json<RpcResponse<T>>) {
    match result {
        Ok(data) => (StatusCode::OK, Json(RpcResponse::ok(data))),
        Err(e) => (error_status(&e), Json(RpcResponse::err(e.to_string()))),
    }
}

// =====================================================
// Quote Endpoints
// =====================================================

// GET /rpc/quotes/list
pub async fn quotes_list(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<Vec<Quote>>>) {
    let app = state.app.lock().await;
    respond(Ok(app.store().as_slice().to_vec()))
}

// GET /rpc/quotes/random
pub async fn quotes_random(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<QuoteView>>) {
    respond(state.app.lock().await.show_random())
}

// GET /rpc/quotes/last
pub async fn quotes_last(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<Option<QuoteView>>>) {
    respond(Ok(state.app.lock().await.last_viewed()))
}

// POST /rpc/quotes/add
pub async fn quotes_add(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AddQuoteRequest>,
) -> (StatusCode, Json<RpcResponse<Quote>>) {
    respond(state.app.lock().await.add_quote(&req.text, &req.category))
}

// POST /rpc/quotes/filter
pub async fn quotes_filter(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FilterQuotesRequest>,
) -> (StatusCode, Json<RpcResponse<QuoteView>>) {
    respond(state.app.lock().await.filter_quotes(&req.category))
}

// GET /rpc/categories
pub async fn categories(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<CategoryOptions>>) {
    respond(Ok(state.app.lock().await.category_options()))
}

// =====================================================
// Transfer Endpoints
// =====================================================

// GET /rpc/quotes/export
pub async fn quotes_export(State(state): State<Arc<AppState>>) -> Response {
    let document = state.app.lock().await.export_document();
    match document {
        Ok(doc) => {
            let filename = transfer::export_filename(chrono::Utc::now());
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "application/json".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"{}\"", filename),
                    ),
                ],
                doc,
            )
                .into_response()
        }
        Err(e) => (
            error_status(&e),
            Json(RpcResponse::<()>::err(e.to_string())),
        )
            .into_response(),
    }
}

// POST /rpc/quotes/import (raw document as the request body)
pub async fn quotes_import(
    State(state): State<Arc<AppState>>,
    body: String,
) -> (StatusCode, Json<RpcResponse<ImportReport>>) {
    let result = state.app.lock().await.import_document(&body);
    if let Ok(report) = &result {
        log::info!(
            "Imported {} quote(s), store now holds {}",
            report.accepted,
            report.total
        );
    }
    respond(result)
}

// =====================================================
// Sync Endpoints
// =====================================================

// POST /rpc/sync/run
pub async fn sync_run(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<SyncOutcome>>) {
    respond(Ok(state.sync.run_cycle().await))
}

// POST /rpc/sync/push
pub async fn sync_push(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<usize>>) {
    let quotes = state.app.lock().await.store().as_slice().to_vec();
    let result = sync_api::push_local_quotes(&state.sync.client, &state.sync.server_url, &quotes)
        .await
        .map(|_| quotes.len());
    if let Err(e) = &result {
        log::warn!("[QUOTE_SYNC] Push failed: {}", e);
    }
    respond(result)
}

// GET /rpc/notification
pub async fn notification(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<Option<Notification>>>) {
    respond(Ok(state.notifier.current()))
}

// =====================================================
// Service
// =====================================================

// GET /rpc/status
pub async fn status(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<RpcResponse<ServiceStatus>>) {
    let (total_quotes, category_count) = {
        let app = state.app.lock().await;
        (app.store().len(), app.store().categories().len())
    };
    let last_sync_at = state.sync.last_sync_at.lock().await.clone();
    respond(Ok(ServiceStatus {
        running: true,
        uptime_secs: state.start_time.elapsed().as_secs(),
        total_quotes,
        category_count,
        sync_state: state.sync.gate.state(),
        sync_enabled: state.sync_enabled,
        sync_interval_secs: state.sync_interval_secs,
        last_sync_at,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Db;
    use crate::persistence::Persistence;
    use crate::sync::SyncGate;

    fn state() -> Arc<AppState> {
        let persistence = Persistence::new(Arc::new(Db::open(":memory:").unwrap()));
        let app = Arc::new(Mutex::new(QuoteApp::init(persistence)));
        let notifier = Arc::new(Notifier::default());
        Arc::new(AppState {
            app: app.clone(),
            sync: SyncContext {
                app,
                client: reqwest::Client::new(),
                server_url: crate::sync_api::test_support::closed_url(),
                gate: Arc::new(SyncGate::default()),
                notifier: notifier.clone(),
                last_sync_at: Arc::new(Mutex::new(None)),
            },
            notifier,
            start_time: Instant::now(),
            sync_enabled: false,
            sync_interval_secs: 30,
        })
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let state = state();
        let (status, Json(resp)) = quotes_add(
            State(state.clone()),
            Json(AddQuoteRequest {
                text: "Be kind.".into(),
                category: "Life".into(),
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(resp.success);

        let (_, Json(resp)) = quotes_list(State(state)).await;
        let quotes = resp.data.unwrap();
        assert_eq!(quotes.len(), 4);
        assert_eq!(quotes[3], Quote::new("Be kind.", "Life"));
    }

    #[tokio::test]
    async fn test_add_rejects_blank_fields() {
        let (status, Json(resp)) = quotes_add(
            State(state()),
            Json(AddQuoteRequest {
                text: "".into(),
                category: "Life".into(),
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.error.as_deref(), Some("Both fields required."));
    }

    #[tokio::test]
    async fn test_import_invalid_document() {
        let (status, Json(resp)) =
            quotes_import(State(state()), r#"{"not":"an array"}"#.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.error.as_deref(), Some("Invalid JSON format."));
    }

    #[tokio::test]
    async fn test_filter_missing_category_is_not_found() {
        let (status, Json(resp)) = quotes_filter(
            State(state()),
            Json(FilterQuotesRequest {
                category: CategoryFilter::Category("Nope".into()),
            }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            resp.error.as_deref(),
            Some("No quotes available in this category.")
        );
    }

    #[tokio::test]
    async fn test_status_reports_counts() {
        let (_, Json(resp)) = status(State(state())).await;
        let s = resp.data.unwrap();
        assert_eq!(s.total_quotes, 3);
        assert_eq!(s.category_count, 3);
        assert_eq!(s.sync_state, SyncState::Idle);
        assert!(s.last_sync_at.is_none());
    }
}
