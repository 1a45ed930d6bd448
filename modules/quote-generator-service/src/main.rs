//! Quote Generator Service — standalone binary serving a persisted quote
//! collection with periodic sync against a remote quote source.
//!
//! Hosts the RPC API used by the quote page.
//! Default: http://127.0.0.1:9103/

mod app;
mod config;
mod db;
mod error;
mod notify;
mod persistence;
mod render;
mod routes;
mod selector;
mod store;
mod sync;
mod sync_api;
mod transfer;
mod worker;

use app::QuoteApp;
use config::Config;
use notify::Notifier;
use persistence::Persistence;
use routes::AppState;
use std::sync::Arc;
use std::time::Instant;
use sync::{SyncContext, SyncGate};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    log::info!("Opening database at: {}", config.db_path);
    let database = match db::Db::open(&config.db_path) {
        Ok(db) => Arc::new(db),
        Err(e) => {
            log::error!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    let mut quote_app = QuoteApp::init(Persistence::new(database));

    if let Some(path) = &config.import_file {
        match transfer::read_document(path).await {
            Ok(raw) => match quote_app.import_document(&raw) {
                Ok(report) => log::info!(
                    "Imported {} quote(s) from {} ({} total)",
                    report.accepted,
                    path,
                    report.total
                ),
                Err(e) => log::warn!("Skipping import of {}: {}", path, e),
            },
            Err(e) => log::warn!("{}", e),
        }
    }

    let app = Arc::new(Mutex::new(quote_app));
    let notifier = Arc::new(Notifier::default());

    let sync_ctx = SyncContext {
        app: app.clone(),
        client: reqwest::Client::new(),
        server_url: config.server_url.clone(),
        gate: Arc::new(SyncGate::default()),
        notifier: notifier.clone(),
        last_sync_at: Arc::new(Mutex::new(None)),
    };

    let state = Arc::new(AppState {
        app,
        sync: sync_ctx.clone(),
        notifier,
        start_time: Instant::now(),
        sync_enabled: config.sync_enabled,
        sync_interval_secs: config.sync_interval_secs,
    });

    let shutdown = CancellationToken::new();

    let worker_handle = if config.sync_enabled {
        let interval = config.sync_interval_secs;
        let token = shutdown.clone();
        let handle = tokio::spawn(async move {
            worker::run_worker(sync_ctx, interval, token).await;
        });
        log::info!("Background sync started (poll interval: {}s)", interval);
        Some(handle)
    } else {
        log::warn!("Remote sync disabled — background worker not started");
        None
    };

    let cors = tower_http::cors::CorsLayer::permissive();

    let router = axum::Router::new()
        // Quotes
        .route("/rpc/quotes/list", axum::routing::get(routes::quotes_list))
        .route("/rpc/quotes/random", axum::routing::get(routes::quotes_random))
        .route("/rpc/quotes/last", axum::routing::get(routes::quotes_last))
        .route("/rpc/quotes/add", axum::routing::post(routes::quotes_add))
        .route("/rpc/quotes/filter", axum::routing::post(routes::quotes_filter))
        .route("/rpc/categories", axum::routing::get(routes::categories))
        // Transfer
        .route("/rpc/quotes/export", axum::routing::get(routes::quotes_export))
        .route("/rpc/quotes/import", axum::routing::post(routes::quotes_import))
        // Sync
        .route("/rpc/sync/run", axum::routing::post(routes::sync_run))
        .route("/rpc/sync/push", axum::routing::post(routes::sync_push))
        .route("/rpc/notification", axum::routing::get(routes::notification))
        // Service
        .route("/rpc/status", axum::routing::get(routes::status))
        .with_state(state)
        .layer(cors);

    let addr = format!("127.0.0.1:{}", config.port);
    log::info!("Quote Generator Service listening on http://{}", addr);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    let server_shutdown = shutdown.clone();
    let served = axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            if tokio::signal::ctrl_c().await.is_err() {
                log::warn!("Failed to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            log::info!("Shutting down");
            server_shutdown.cancel();
        })
        .await;

    if let Err(e) = served {
        log::error!("Server error: {}", e);
    }

    shutdown.cancel();
    if let Some(handle) = worker_handle {
        handle.await.ok();
    }
}
