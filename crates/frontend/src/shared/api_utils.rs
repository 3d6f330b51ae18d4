//! API utilities for frontend-backend communication

use gloo_net::http::Response;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Message of a failed response: the `error` field of a JSON body if there is
/// one, else the HTTP status.
pub async fn error_message(response: &Response) -> String {
    let status = response.status();
    match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("error")
            .and_then(|e| e.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP {}", status)),
        Err(_) => format!("HTTP {}", status),
    }
}
