//! HTTP source — blocking fetch of a static JSON document.

use std::time::Duration;

/// Fetch a document body over HTTP. Non-success statuses are errors.
pub fn fetch_text(url: &str) -> Result<String, String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| format!("http client error: {}", e))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| format!("cannot fetch {}: {}", url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(format!("cannot fetch {}: HTTP {}", url, status));
    }

    response
        .text()
        .map_err(|e| format!("cannot read body of {}: {}", url, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_text_unreachable() {
        // Port 1 on loopback: refused immediately, no external traffic.
        let err = fetch_text("http://127.0.0.1:1/menu.json").unwrap_err();
        assert!(err.contains("cannot fetch"));
    }
}
