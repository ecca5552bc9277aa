//! HTTP server and graceful shutdown.
//!
//! # Shutdown
//!
//! On SIGTERM (what Kubernetes and `docker stop` send) or Ctrl-C the server:
//! 1. Stops calling `listener.accept()`, so no new connections are made.
//! 2. Lets every in-flight connection task run to completion. A request
//!    that is halfway through its four upstream fetches still gets its page.
//! 3. Returns from [`Server::serve`], which lets `main` exit cleanly.
//!
//! The upstream client timeout (`--timeout-secs`) bounds how long one fetch
//! can hold a connection open, so keep the pod's termination grace period
//! above four times that value.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http_body_util::Full;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::error::{Error, PageError};
use crate::middleware;
use crate::request::Request;
use crate::response::IntoResponse;
use crate::router::Router;
use crate::state::AppState;

/// The HTTP server.
#[derive(Debug)]
pub struct Server {
    addr: SocketAddr,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    pub fn bind(addr: SocketAddr) -> Self {
        Self { addr }
    }

    /// Binds, then serves `router` until SIGTERM or Ctrl-C.
    ///
    /// Returns only after a full graceful shutdown.
    pub async fn serve(self, router: Router, state: AppState) -> Result<(), Error> {
        let listener = TcpListener::bind(self.addr).await?;
        serve_until(listener, router, state, shutdown_signal()).await
    }
}

/// Serves connections from an already-bound `listener` until `shutdown`
/// resolves, then drains in-flight connections.
///
/// Tests bind `127.0.0.1:0` themselves and pass `std::future::pending()` so
/// the server lives as long as the test runtime.
pub async fn serve_until<F>(
    listener: TcpListener,
    router: Router,
    state: AppState,
    shutdown: F,
) -> Result<(), Error>
where
    F: Future<Output = ()>,
{
    // Shared by every connection task; neither is cloned per request beyond
    // the Arc itself.
    let router = Arc::new(router);
    let state = Arc::new(state);

    info!(addr = %listener.local_addr()?, "groupie-tracker listening");

    // Tracks every connection task so shutdown can wait for them.
    let mut tasks = tokio::task::JoinSet::new();

    // `select!` polls `shutdown` by reference on every turn of the loop, so
    // it has to stay put in memory: pin it on the stack.
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            // Arms are polled top to bottom. Shutdown goes first so a signal
            // stops accepting even while connections are still queued.
            biased;

            () = &mut shutdown => {
                info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                break;
            }

            res = listener.accept() => {
                let (stream, remote_addr) = match res {
                    Ok(v) => v,
                    Err(e) => {
                        error!("accept error: {e}");
                        continue;
                    }
                };

                let router = Arc::clone(&router);
                let state = Arc::clone(&state);
                let io = TokioIo::new(stream);

                tasks.spawn(async move {
                    // Called once per request on this connection.
                    let svc = service_fn(move |req| {
                        let router = Arc::clone(&router);
                        let state = Arc::clone(&state);
                        async move { dispatch(router, state, req).await }
                    });

                    // HTTP/1.1 or HTTP/2, whichever the client speaks.
                    if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                        .serve_connection(io, svc)
                        .await
                    {
                        error!(peer = %remote_addr, "connection error: {e}");
                    }
                });
            }

            // Reap finished connection tasks so the set does not grow on a
            // long-running server.
            Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
        }
    }

    while tasks.join_next().await.is_some() {}

    info!("groupie-tracker stopped");
    Ok(())
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Routes one request and produces one response.
///
/// The error type is `Infallible`: every failure, including an unknown path
/// or a wrong method, is turned into an error page here, so hyper never
/// sees an error and the client always gets HTML with a status code.
async fn dispatch(
    router: Arc<Router>,
    state: Arc<AppState>,
    req: hyper::Request<hyper::body::Incoming>,
) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let path = req.uri().path().to_owned();

    let response = match router.lookup(req.method(), &path) {
        Some((handler, params)) => handler.call(Request::new(req.uri(), params, state)).await,
        None if router.has_path(&path) => PageError::method_not_allowed().into_response(),
        None => PageError::not_found().into_response(),
    };

    middleware::trace(req.method(), &path, response.status(), started.elapsed());
    Ok(response.into_inner())
}

// ── Shutdown signal ───────────────────────────────────────────────────────────

/// Resolves on the first SIGTERM or SIGINT.
///
/// On Windows only Ctrl-C is available; the SIGTERM arm becomes a future that
/// never resolves.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
