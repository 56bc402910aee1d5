//! Minimal HTTP/1.1 server impersonating the upstream listings API for integration tests.
//!
//! Each API key maps to a fixture account. `GET /v1/listing/{id}` serves the
//! account's direct listings (404 otherwise); `GET /v1/listings` serves its
//! bulk collection. Unknown keys get 401. Every request is logged as
//! `"<key> <path+query>"`.

use serde_json::{json, Value};
use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct FixtureAccount {
    pub direct: Vec<Value>,
    pub bulk: Vec<Value>,
    /// When set, the direct endpoint answers this status with `status_body`.
    pub direct_status: Option<u16>,
    /// When set, the collection endpoint answers this status with `status_body`.
    pub bulk_status: Option<u16>,
    pub status_body: String,
    /// When set, both endpoints answer `302 Found` with this `Location`.
    pub redirect_to: Option<String>,
}

pub struct ListingsServer {
    pub base_url: String,
    log: Arc<Mutex<Vec<String>>>,
}

impl ListingsServer {
    /// Requests received so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.log.lock().unwrap().clear();
    }
}

/// Starts the server in a background thread. It runs until the process exits.
pub fn start(accounts: HashMap<String, FixtureAccount>) -> ListingsServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let accounts = Arc::new(accounts);
    let log = Arc::new(Mutex::new(Vec::new()));
    let server_log = Arc::clone(&log);
    thread::spawn(move || {
        // Sequential on purpose: the client never issues concurrent calls.
        for stream in listener.incoming().flatten() {
            handle(stream, &accounts, &server_log);
        }
    });
    ListingsServer {
        base_url: format!("http://127.0.0.1:{}", port),
        log,
    }
}

/// Base URL of a port that refuses connections.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

fn handle(
    mut stream: TcpStream,
    accounts: &HashMap<String, FixtureAccount>,
    log: &Mutex<Vec<String>>,
) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let mut raw = Vec::new();
    let mut buf = [0u8; 4096];
    while !raw.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf) {
            Ok(0) | Err(_) => break,
            Ok(n) => raw.extend_from_slice(&buf[..n]),
        }
    }
    let request = String::from_utf8_lossy(&raw);
    let (target, key) = parse_request(&request);
    log.lock().unwrap().push(format!("{} {}", key, target));

    let (status, body, location) = route(&target, &key, accounts);
    let reason = match status {
        200 => "OK",
        302 => "Found",
        401 => "Unauthorized",
        404 => "Not Found",
        _ => "Error",
    };
    let location = location
        .map(|l| format!("Location: {}\r\n", l))
        .unwrap_or_default();
    let response = format!(
        "HTTP/1.1 {} {}\r\n{}Content-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        reason,
        location,
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body.as_bytes());
}

/// Returns (status, body, Location header).
fn route(
    target: &str,
    key: &str,
    accounts: &HashMap<String, FixtureAccount>,
) -> (u16, String, Option<String>) {
    let Some(account) = accounts.get(key) else {
        return (401, json!({"error": "invalid api key"}).to_string(), None);
    };
    if let Some(location) = &account.redirect_to {
        return (302, String::new(), Some(format!("{}{}", location, target)));
    }
    let (status, body) = route_account(target, account);
    (status, body, None)
}

fn route_account(target: &str, account: &FixtureAccount) -> (u16, String) {
    let path = target.split('?').next().unwrap_or("");

    if let Some(id) = path.strip_prefix("/v1/listing/") {
        if let Some(status) = account.direct_status {
            return (status, account.status_body.clone());
        }
        return match account.direct.iter().find(|l| l["id"] == json!(id)) {
            Some(listing) => (200, listing.to_string()),
            None => (404, json!({"error": "Not found"}).to_string()),
        };
    }
    if path == "/v1/listings" {
        if let Some(status) = account.bulk_status {
            return (status, account.status_body.clone());
        }
        return (200, json!({ "listings": account.bulk }).to_string());
    }
    (404, json!({"error": "no route"}).to_string())
}

/// Returns (request target, X-API-Key value).
fn parse_request(request: &str) -> (String, String) {
    let mut target = String::new();
    let mut key = String::new();
    for (i, line) in request.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            break;
        }
        if i == 0 {
            target = line.split_whitespace().nth(1).unwrap_or("").to_string();
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("x-api-key") {
                key = value.trim().to_string();
            }
        }
    }
    (target, key)
}
