//! Package Flows
//!
//! Listing, single delete and bulk delete. Packages are classified by the
//! running registry, so listings need its live port.

use leptos::logging::{log, warn};

use crate::commands::{Api, Bridge, BulkScope};
use crate::errors::BackendError;
use crate::listing::page_after_removal;
use crate::models::{PackageKind, PackageRecord, Page};
use crate::package_details::PackageDetails;

/// Port of the running registry; `None` while it is stopped
pub async fn live_port<B: Bridge>(api: &Api<B>) -> Result<Option<u16>, BackendError> {
    let status = api.get_verdaccio_status().await?;
    Ok(status.running.then_some(status.port))
}

pub async fn load_page<B: Bridge>(
    api: &Api<B>,
    port: u16,
    kind: PackageKind,
    page: usize,
    page_size: usize,
) -> Result<Page<PackageRecord>, BackendError> {
    api.get_packages(port, kind, page.max(1), page_size).await
}

/// Delete `name`, then reload the page the listing should land on
pub async fn delete_one<B: Bridge>(
    api: &Api<B>,
    port: u16,
    kind: PackageKind,
    name: &str,
    current: &Page<PackageRecord>,
) -> Result<Page<PackageRecord>, BackendError> {
    api.delete_package(name).await?;
    log!("[Packages] deleted {}", name);
    load_page(api, port, kind, page_after_removal(current), current.page_size).await
}

/// Result of a bulk delete
#[derive(Debug, Clone, PartialEq)]
pub struct BulkOutcome {
    pub deleted: usize,
    /// First page of the listing after deletion; `None` if the reload failed
    pub page: Option<Page<PackageRecord>>,
}

impl BulkOutcome {
    pub fn notice(&self) -> String {
        match self.deleted {
            0 => "Nothing to delete".to_string(),
            1 => "Deleted 1 package".to_string(),
            n => format!("Deleted {} packages", n),
        }
    }
}

/// Delete everything in `scope`, then reload page 1 of `listing` at the same page size
pub async fn delete_all<B: Bridge>(
    api: &Api<B>,
    port: u16,
    scope: BulkScope,
    listing: PackageKind,
    page_size: usize,
) -> Result<BulkOutcome, BackendError> {
    let deleted = api.delete_packages(port, scope).await?;
    log!("[Packages] bulk delete ({:?}) removed {}", scope, deleted);

    let page = match load_page(api, port, listing, 1, page_size).await {
        Ok(page) => Some(page),
        Err(e) => {
            warn!("[Packages] reload after bulk delete failed: {}", e);
            None
        }
    };
    Ok(BulkOutcome { deleted, page })
}

pub async fn load_details<B: Bridge>(api: &Api<B>, port: u16, name: &str) -> Result<PackageDetails, BackendError> {
    let doc = api.get_package_details(port, name).await?;
    Ok(PackageDetails::from_document(doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fake_api;
    use serde_json::json;

    fn page(page: usize, page_size: usize, total: usize, names: &[&str]) -> serde_json::Value {
        let items: Vec<_> = names
            .iter()
            .map(|n| json!({ "name": n, "version": "1.0.0", "description": null, "author": null,
                              "license": null, "homepage": null, "repository": null,
                              "created": null, "modified": null }))
            .collect();
        json!({
            "items": items,
            "total": total,
            "page": page,
            "page_size": page_size,
            "total_pages": total.div_ceil(page_size),
        })
    }

    #[tokio::test]
    async fn test_bulk_delete_reloads_first_page_with_same_size() {
        let api = fake_api();
        api.bridge()
            .respond("delete_packages", 3)
            .respond("get_packages", page(1, 50, 0, &[]));

        let outcome = delete_all(&api, 4873, BulkScope::CachedOnly, PackageKind::Cached, 50)
            .await
            .unwrap();

        assert!(outcome.notice().contains('3'));
        assert_eq!(
            api.bridge().args_of("delete_packages"),
            vec![json!({ "port": 4873, "packageType": "cached" })]
        );
        assert_eq!(
            api.bridge().args_of("get_packages"),
            vec![json!({ "port": 4873, "packageType": "cached", "page": 1, "pageSize": 50 })]
        );
        assert_eq!(outcome.page.map(|p| p.total), Some(0));
    }

    #[tokio::test]
    async fn test_bulk_delete_everything_is_its_own_scope() {
        let api = fake_api();
        api.bridge()
            .respond("delete_packages", 12)
            .reject("get_packages", "request failed");

        let outcome = delete_all(&api, 4873, BulkScope::Everything, PackageKind::Private, 20)
            .await
            .unwrap();

        assert_eq!(api.bridge().args_of("delete_packages")[0]["packageType"], "all");
        assert_eq!(outcome.deleted, 12);
        assert!(outcome.page.is_none());
    }

    #[tokio::test]
    async fn test_failed_bulk_delete_does_not_reload() {
        let api = fake_api();
        api.bridge().reject("delete_packages", "permission denied");

        let err = delete_all(&api, 4873, BulkScope::CachedOnly, PackageKind::Cached, 20)
            .await
            .unwrap_err();

        assert_eq!(err.message(), "permission denied");
        assert_eq!(api.bridge().count("get_packages"), 0);
    }

    #[tokio::test]
    async fn test_deleting_last_row_steps_back_a_page() {
        let api = fake_api();
        api.bridge()
            .respond("delete_package", ())
            .respond("get_packages", page(2, 10, 20, &[]));

        let current: Page<PackageRecord> = serde_json::from_value(page(3, 10, 21, &["lonely"])).unwrap();
        delete_one(&api, 4873, PackageKind::Private, "lonely", &current).await.unwrap();

        assert_eq!(api.bridge().args_of("delete_package"), vec![json!({ "packageName": "lonely" })]);
        assert_eq!(api.bridge().args_of("get_packages")[0]["page"], 2);
    }

    #[tokio::test]
    async fn test_live_port_is_none_when_stopped() {
        let api = fake_api();
        api.bridge().respond_once(
            "get_verdaccio_status",
            json!({ "running": false, "port": 4873, "pid": null, "storage_path": "", "config_path": "" }),
        );
        assert_eq!(live_port(&api).await.unwrap(), None);

        api.bridge().respond_once(
            "get_verdaccio_status",
            json!({ "running": true, "port": 4900, "pid": 1, "storage_path": "", "config_path": "" }),
        );
        assert_eq!(live_port(&api).await.unwrap(), Some(4900));
    }

    #[tokio::test]
    async fn test_details_are_parsed() {
        let api = fake_api();
        api.bridge().respond(
            "get_package_details",
            json!({ "name": "@acme/ui", "dist-tags": { "latest": "2.0.0" }, "versions": { "2.0.0": {} } }),
        );

        let details = load_details(&api, 4873, "@acme/ui").await.unwrap();
        assert_eq!(details.latest.as_deref(), Some("2.0.0"));
        assert_eq!(
            api.bridge().args_of("get_package_details"),
            vec![json!({ "port": 4873, "packageName": "@acme/ui" })]
        );
    }
}
