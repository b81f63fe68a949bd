//! Shared HTTP client for all remote calls.
//!
//! One process-wide `reqwest::Client` keeps connection pooling effective across
//! the sequential segment uploads. Per-request timeouts are set at the call
//! sites since upload and chat-completion latencies differ.

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;

static HTTP_CLIENT: OnceCell<reqwest::Client> = OnceCell::new();

/// Get the shared HTTP client, creating it on first use.
pub fn get_http_client() -> Result<&'static reqwest::Client> {
    HTTP_CLIENT.get_or_try_init(|| {
        reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")
    })
}
