//! Package Commands
//!
//! Frontend bindings for listing, inspecting and deleting stored packages.

use serde::Serialize;
use serde_json::Value;

use super::{Api, Bridge};
use crate::errors::BackendError;
use crate::models::{PackageKind, PackageRecord, Page};

/// What a bulk delete removes. Each scope is its own explicit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkScope {
    /// Only packages proxied from the upstream registry
    CachedOnly,
    /// Every stored package, private ones included
    Everything,
}

impl BulkScope {
    pub fn package_kind(&self) -> PackageKind {
        match self {
            BulkScope::CachedOnly => PackageKind::Cached,
            BulkScope::Everything => PackageKind::All,
        }
    }
}

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListPackagesArgs {
    port: u16,
    package_type: PackageKind,
    page: usize,
    page_size: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct KindArgs {
    port: u16,
    package_type: PackageKind,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PackageNameArgs<'a> {
    package_name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PackageDetailsArgs<'a> {
    port: u16,
    package_name: &'a str,
}

// ========================
// Commands
// ========================

impl<B: Bridge> Api<B> {
    pub async fn get_packages(
        &self,
        port: u16,
        kind: PackageKind,
        page: usize,
        page_size: usize,
    ) -> Result<Page<PackageRecord>, BackendError> {
        let args = ListPackagesArgs { port, package_type: kind, page, page_size };
        self.call("get_packages", &args).await
    }

    pub async fn get_package_count(&self, port: u16, kind: PackageKind) -> Result<usize, BackendError> {
        self.call("get_package_count", &KindArgs { port, package_type: kind }).await
    }

    pub async fn delete_package(&self, package_name: &str) -> Result<(), BackendError> {
        self.call_unit("delete_package", &PackageNameArgs { package_name }).await
    }

    /// Returns how many packages were removed
    pub async fn delete_packages(&self, port: u16, scope: BulkScope) -> Result<usize, BackendError> {
        let args = KindArgs { port, package_type: scope.package_kind() };
        self.call("delete_packages", &args).await
    }

    /// Raw registry metadata document; its schema belongs to the registry
    pub async fn get_package_details(&self, port: u16, package_name: &str) -> Result<Value, BackendError> {
        self.call("get_package_details", &PackageDetailsArgs { port, package_name }).await
    }
}
