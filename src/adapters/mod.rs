// Adapters layer: concrete implementations of the domain ports.

pub mod fio;
pub mod kawa;
pub mod keys;
pub mod storage;

pub use fio::FioClient;
pub use kawa::KawaClient;
pub use keys::StaticKeyStore;
pub use storage::LocalStorage;

use crate::utils::error::{PrunError, Result};
use reqwest::{Client, Response};
use std::time::Duration;
use url::Url;

pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Ok(Client::builder()
        .timeout(timeout)
        .user_agent(concat!("prun-tools/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

pub(crate) fn parse_base_url(field: &str, base_url: &str) -> Result<Url> {
    let url = Url::parse(base_url).map_err(|e| PrunError::InvalidConfigValueError {
        field: field.to_string(),
        value: base_url.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;
    if url.cannot_be_a_base() {
        return Err(PrunError::InvalidConfigValueError {
            field: field.to_string(),
            value: base_url.to_string(),
            reason: "URL cannot be used as a base".to_string(),
        });
    }
    Ok(url)
}

/// Appends path segments to `base`, percent-encoding each one.
pub(crate) fn join_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// Turns non-2xx responses into `UpstreamStatus` errors.
pub(crate) fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        tracing::warn!("⚠️ {} answered {}", response.url(), status);
        Err(PrunError::upstream(status.as_u16(), response.url().as_str()))
    }
}
