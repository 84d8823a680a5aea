//! Webhook delivery
//! One POST per run; the response status is logged, never acted on.

use log::{info, warn};
use serde_json::json;

pub fn deliver(url: &str, text: &str) {
    let client = match reqwest::blocking::Client::builder().build() {
        Ok(client) => client,
        Err(e) => {
            warn!("webhook client could not be built: {}", e);
            return;
        }
    };

    match client.post(url).json(&json!({ "text": text })).send() {
        Ok(resp) => info!("webhook delivered, status {}", resp.status()),
        Err(e) => warn!("webhook delivery failed: {}", e),
    }
}
