//! Health-check handlers for an orchestrator such as Kubernetes.
//!
//! | Probe | Path | Question | On failure |
//! |---|---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? | restart the pod |
//! | **Readiness** | `/readyz` | Does the upstream API answer? | stop routing traffic to it |
//!
//! Liveness ignores upstream, since restarting this service does not bring
//! the upstream API back. Readiness checks it: with upstream gone every page
//! except `/` is an error.
//!
//! Both answers carry `Cache-Control: no-store` so no proxy between the
//! prober and the pod can replay a stale result.

use http::header::{CACHE_CONTROL, HeaderValue};
use tracing::warn;

use crate::{Request, Response, Status};

/// Always `200 OK` with body `"ok"`.
pub async fn liveness(_req: Request) -> Response {
    probe(Status::Ok, "ok")
}

/// `200 OK` with body `"ready"` when the upstream API root answers with a
/// success status, `503` otherwise.
pub async fn readiness(req: Request) -> Response {
    match req.state().api().ping().await {
        Ok(()) => probe(Status::Ok, "ready"),
        Err(e) => {
            warn!("readiness check failed: {e}");
            probe(Status::ServiceUnavailable, "upstream unavailable")
        }
    }
}

fn probe(status: Status, body: &'static str) -> Response {
    Response::builder()
        .status(status)
        .header(CACHE_CONTROL, HeaderValue::from_static("no-store"))
        .text(body)
}
