use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tokio::task::JoinError;
use tokio::time::{timeout, Duration};
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use tracker_application::AppState;
use tracker_interfaces_http::{build_router, envelope_rejections};

use crate::context::{AppContext, StartupOptions};

pub fn build_router_with_layers(state: AppState) -> Router {
    build_router(state.clone())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(
            usize::try_from(state.config.max_body_bytes).unwrap_or(usize::MAX),
        ))
        .layer(TimeoutLayer::new(Duration::from_secs(
            state.config.request_timeout_seconds,
        )))
        .layer(middleware::map_response(envelope_rejections))
        .layer(TraceLayer::new_for_http())
}

/// Serves until SIGINT/SIGTERM, then gives in-flight requests
/// `shutdown_grace_seconds` to finish before aborting and closing the pool.
pub async fn run_standalone(options: StartupOptions) -> Result<()> {
    let AppContext { state, pool } = AppContext::new(&options).await?;

    let app = build_router_with_layers(state.clone());
    let addr: SocketAddr = state.config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!("listening on {}", addr);

    let shutdown = Arc::new(Notify::new());
    let drain = shutdown.clone();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { drain.notified().await })
            .await
    });

    let finished = tokio::select! {
        result = &mut server => Some(server_outcome(result)),
        _ = shutdown_signal() => None,
    };
    let outcome = match finished {
        Some(outcome) => outcome,
        None => {
            info!("shutdown signal received, draining in-flight requests");
            shutdown.notify_one();
            let grace = Duration::from_secs(state.config.shutdown_grace_seconds);
            match timeout(grace, &mut server).await {
                Ok(result) => server_outcome(result),
                Err(_) => {
                    warn!("grace period of {:?} elapsed, aborting server", grace);
                    server.abort();
                    Ok(())
                }
            }
        }
    };

    pool.close().await;
    info!("shutdown complete");
    outcome
}

fn server_outcome(result: Result<std::io::Result<()>, JoinError>) -> Result<()> {
    match result {
        Ok(served) => Ok(served?),
        Err(err) if err.is_cancelled() => Ok(()),
        Err(err) => Err(err.into()),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("failed to listen for ctrl-c: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!("failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
