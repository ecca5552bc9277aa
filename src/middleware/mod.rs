//! Cross-cutting request concerns.
//!
//! Currently one: [`trace`], the per-request access log line emitted after
//! every response is produced (method, path, status, latency).

use std::time::Duration;

use tracing::{error, info};

use crate::status::Status;

/// Logs one finished request. Server errors are logged at `error`, the rest
/// at `info`.
pub(crate) fn trace(method: &http::Method, path: &str, status: Status, elapsed: Duration) {
    let latency_ms = elapsed.as_secs_f64() * 1000.0;
    let code = status.as_u16();
    if status.is_server_error() {
        error!(%method, path, status = code, latency_ms, "request failed");
    } else {
        info!(%method, path, status = code, latency_ms, "request");
    }
}
