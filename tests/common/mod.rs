//! Test harness: a fake upstream API and a running copy of the app.

use std::convert::Infallible;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use http_body_util::Full;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use groupie_tracker::{ApiClient, AppState, app, serve_until};

/// Paths the fake upstream has been asked for, in order.
pub type RequestLog = Arc<Mutex<Vec<String>>>;

/// A base URL nothing listens on.
pub const DEAD_UPSTREAM: &str = "http://127.0.0.1:9/api";

fn artist(id: u32, name: &str, members: &[&str], created: i32, album: &str) -> Value {
    json!({
        "id": id,
        "image": format!("https://groupietrackers.herokuapp.com/api/images/{id}.jpeg"),
        "name": name,
        "members": members,
        "creationDate": created,
        "firstAlbum": album,
        "locations": format!("https://groupietrackers.herokuapp.com/api/locations/{id}"),
        "concertDates": format!("https://groupietrackers.herokuapp.com/api/dates/{id}"),
        "relations": format!("https://groupietrackers.herokuapp.com/api/relation/{id}"),
    })
}

fn roster() -> Vec<Value> {
    vec![
        artist(1, "Queen", &["Freddie Mercury", "Brian May", "Roger Taylor", "John Deacon"], 1970, "14-12-1973"),
        artist(2, "SOJA", &["Jacob Hemphill", "Bob Jefferson"], 1997, "05-06-2002"),
        artist(3, "Pink Floyd", &["Roger Waters", "David Gilmour", "Nick Mason"], 1965, "05-08-1967"),
    ]
}

/// Artist 1 is complete. Artist 2 fails on dates, artist 3 on relations and
/// artist 4 (not in the listing) on locations. Unknown artist IDs answer with
/// an all-zero record, like the real API.
fn fixture(path: &str) -> (u16, Value) {
    let rest = path.strip_prefix("/api").unwrap_or(path);
    match rest {
        "" | "/" => (200, json!({
            "artists": "/api/artists",
            "locations": "/api/locations",
            "dates": "/api/dates",
            "relation": "/api/relation",
        })),
        "/artists" => (200, Value::Array(roster())),
        "/artists/1" => (200, roster()[0].clone()),
        "/artists/2" => (200, roster()[1].clone()),
        "/artists/3" => (200, roster()[2].clone()),
        "/artists/4" => (200, artist(4, "Gorillaz", &["Damon Albarn", "Jamie Hewlett"], 1998, "26-03-2001")),
        p if p.starts_with("/artists/") => (200, json!({
            "id": 0, "image": "", "name": "", "members": null, "creationDate": 0,
            "firstAlbum": "", "locations": "", "concertDates": "", "relations": "",
        })),
        "/dates/1" => (200, json!({ "id": 1, "dates": ["*28-01-2020", "10-02-2020"] })),
        "/dates/3" => (200, json!({ "id": 3, "dates": ["*01-01-1970"] })),
        "/dates/4" => (200, json!({ "id": 4, "dates": ["12-03-2018"] })),
        "/locations/1" => (200, json!({
            "id": 1,
            "locations": ["osaka-japan", "dunedin-new_zealand"],
            "dates": "https://groupietrackers.herokuapp.com/api/dates/1",
        })),
        "/locations/3" => (200, json!({ "id": 3, "locations": ["london-uk"], "dates": "" })),
        "/relation/1" => (200, json!({
            "id": 1,
            "datesLocations": {
                "osaka-japan": ["*28-01-2020"],
                "dunedin-new_zealand": ["10-02-2020"],
            },
        })),
        _ => (500, json!({ "error": "boom" })),
    }
}

/// Starts the fake upstream and returns its API base URL.
pub async fn spawn_upstream() -> (String, RequestLog) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: RequestLog = Arc::default();
    let seen = Arc::clone(&log);

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let seen = Arc::clone(&seen);
            tokio::spawn(async move {
                let svc = service_fn(move |req: hyper::Request<hyper::body::Incoming>| {
                    let seen = Arc::clone(&seen);
                    async move {
                        let path = req.uri().path().to_owned();
                        seen.lock().unwrap().push(path.clone());
                        let (status, body) = fixture(&path);
                        let res = http::Response::builder()
                            .status(status)
                            .header("content-type", "application/json")
                            .body(Full::new(Bytes::from(body.to_string())))
                            .unwrap();
                        Ok::<_, Infallible>(res)
                    }
                });
                let _ = hyper::server::conn::http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), svc)
                    .await;
            });
        }
    });

    (format!("http://{addr}/api"), log)
}

/// Starts the app against `api_url` and returns its base URL.
pub async fn spawn_app(api_url: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let api = ApiClient::new(api_url, Duration::from_secs(5)).unwrap();
    tokio::spawn(serve_until(listener, app(), AppState::new(api), std::future::pending()));
    format!("http://{addr}")
}

/// Upstream paths requested so far, without the `/api` prefix.
pub fn requested(log: &RequestLog) -> Vec<String> {
    log.lock()
        .unwrap()
        .iter()
        .map(|p| p.trim_start_matches("/api").to_owned())
        .collect()
}
