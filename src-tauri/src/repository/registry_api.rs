//! Registry HTTP API
//!
//! The running registry is the authority on which stored packages were
//! published locally; the storage directory alone cannot tell.

use std::time::Duration;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{DomainError, DomainResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Characters escaped in a package path segment; `@scope/name` becomes `@scope%2Fname`
const PACKAGE_SEGMENT: &AsciiSet = &CONTROLS.add(b' ').add(b'/').add(b'%').add(b'?').add(b'#');

/// Queries against a registry listening on `localhost:<port>`
#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// Names of packages published to this registry
    async fn private_package_names(&self, port: u16) -> DomainResult<Vec<String>>;

    /// Full metadata document for `name`; `None` when the registry has no such package
    async fn package_document(&self, port: u16, name: &str) -> DomainResult<Option<Value>>;
}

#[derive(Debug, Deserialize)]
struct PackageListEntry {
    name: String,
}

/// [`RegistryApi`] over HTTP with reqwest
#[derive(Debug, Clone)]
pub struct HttpRegistry {
    client: reqwest::Client,
}

impl HttpRegistry {
    pub fn new() -> DomainResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DomainError::Internal(format!("HTTP client setup failed: {}", e)))?;
        Ok(Self { client })
    }
}

pub fn package_url(port: u16, name: &str) -> String {
    format!("http://localhost:{}/{}", port, utf8_percent_encode(name, PACKAGE_SEGMENT))
}

#[async_trait]
impl RegistryApi for HttpRegistry {
    async fn private_package_names(&self, port: u16) -> DomainResult<Vec<String>> {
        let url = format!("http://localhost:{}/-/verdaccio/data/packages", port);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DomainError::Internal(format!("registry request failed: {}", e)))?;

        // Older registries without the web UI endpoint have no private listing
        if !response.status().is_success() {
            warn!(status = %response.status(), "package listing endpoint unavailable");
            return Ok(Vec::new());
        }

        let entries: Vec<PackageListEntry> = response
            .json()
            .await
            .map_err(|e| DomainError::Internal(format!("unexpected package listing: {}", e)))?;
        debug!(count = entries.len(), "private packages listed");
        Ok(entries.into_iter().map(|p| p.name).collect())
    }

    async fn package_document(&self, port: u16, name: &str) -> DomainResult<Option<Value>> {
        let response = self
            .client
            .get(package_url(port, name))
            .send()
            .await
            .map_err(|e| DomainError::Internal(format!("registry request failed: {}", e)))?;

        if !response.status().is_success() {
            debug!(package = name, status = %response.status(), "registry has no metadata");
            return Ok(None);
        }
        let doc = response
            .json()
            .await
            .map_err(|e| DomainError::Internal(format!("unexpected package metadata: {}", e)))?;
        Ok(Some(doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_package_url_escapes_scope_separator() {
        assert_eq!(package_url(4873, "lodash"), "http://localhost:4873/lodash");
        assert_eq!(package_url(4873, "@acme/ui"), "http://localhost:4873/@acme%2Fui");
    }
}
