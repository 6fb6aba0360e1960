//! Package Details
//!
//! Reads the handful of fields the details drawer shows out of a registry
//! metadata document. The document itself stays an opaque JSON value.

use std::cmp::Ordering;

use serde_json::Value;

use crate::markdown::is_safe_href;

#[derive(Debug, Clone, PartialEq)]
pub struct VersionSummary {
    pub version: String,
    pub description: Option<String>,
    pub license: Option<String>,
    pub published: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackageDetails {
    pub name: String,
    pub latest: Option<String>,
    /// Newest first
    pub versions: Vec<VersionSummary>,
    pub readme: Option<String>,
    pub homepage: Option<String>,
    pub repository: Option<String>,
    pub raw: Value,
}

impl PackageDetails {
    pub fn from_document(doc: Value) -> Self {
        let name = str_field(&doc, "name").unwrap_or_default();
        let latest = doc
            .get("dist-tags")
            .and_then(|tags| tags.get("latest"))
            .and_then(Value::as_str)
            .map(str::to_string);

        let mut versions: Vec<VersionSummary> = doc
            .get("versions")
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .map(|(version, meta)| VersionSummary {
                        version: version.clone(),
                        description: str_field(meta, "description"),
                        license: license_field(meta),
                        published: doc
                            .get("time")
                            .and_then(|t| t.get(version))
                            .and_then(Value::as_str)
                            .map(str::to_string),
                    })
                    .collect()
            })
            .unwrap_or_default();
        versions.sort_by(|a, b| compare_versions(&b.version, &a.version));

        let latest_meta = latest
            .as_deref()
            .and_then(|v| doc.get("versions").and_then(|vs| vs.get(v)));

        let readme = str_field(&doc, "readme")
            .or_else(|| latest_meta.and_then(|m| str_field(m, "readme")))
            .filter(|r| !r.trim().is_empty());
        let homepage = latest_meta
            .and_then(|m| str_field(m, "homepage"))
            .or_else(|| str_field(&doc, "homepage"));
        let repository = latest_meta
            .and_then(|m| m.get("repository"))
            .or_else(|| doc.get("repository"))
            .and_then(repository_url);

        Self {
            name,
            latest,
            versions,
            readme,
            homepage,
            repository,
            raw: doc,
        }
    }

    /// Metadata of the latest version, if the document carries it
    pub fn latest_summary(&self) -> Option<&VersionSummary> {
        let latest = self.latest.as_deref()?;
        self.versions.iter().find(|v| v.version == latest)
    }

    /// Homepage when it is safe to open as a link
    pub fn homepage_link(&self) -> Option<&str> {
        self.homepage.as_deref().filter(|url| is_safe_href(url))
    }

    pub fn pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.raw).unwrap_or_default()
    }
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

/// `license` is either a SPDX string or a legacy `{ "type": ... }` object
fn license_field(meta: &Value) -> Option<String> {
    match meta.get("license")? {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj.get("type").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

fn repository_url(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj.get("url").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// Numeric comparison of dotted versions; pre-release suffixes sort by their digits
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let parts = |v: &str| -> Vec<u64> {
        v.split(|c: char| !c.is_ascii_digit())
            .filter_map(|s| s.parse().ok())
            .collect()
    };
    parts(a).cmp(&parts(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document() -> Value {
        json!({
            "name": "@acme/logger",
            "dist-tags": { "latest": "1.10.0" },
            "versions": {
                "1.2.0": { "description": "old", "license": { "type": "ISC" } },
                "1.10.0": {
                    "description": "Structured logging",
                    "license": "MIT",
                    "homepage": "https://acme.dev",
                    "repository": { "type": "git", "url": "git+https://example.com/acme/logger.git" }
                },
                "1.9.3": { "description": "mid" }
            },
            "time": { "1.10.0": "2024-03-01T00:00:00.000Z" },
            "readme": "# Logger\n\nUsage",
            "_attachments": {}
        })
    }

    #[test]
    fn test_extracts_consumed_fields() {
        let details = PackageDetails::from_document(document());
        assert_eq!(details.name, "@acme/logger");
        assert_eq!(details.latest.as_deref(), Some("1.10.0"));
        assert_eq!(details.homepage.as_deref(), Some("https://acme.dev"));
        assert_eq!(
            details.repository.as_deref(),
            Some("git+https://example.com/acme/logger.git")
        );
        assert!(details.readme.unwrap().starts_with("# Logger"));

        let latest = PackageDetails::from_document(document()).latest_summary().cloned().unwrap();
        assert_eq!(latest.license.as_deref(), Some("MIT"));
        assert_eq!(latest.published.as_deref(), Some("2024-03-01T00:00:00.000Z"));
    }

    #[test]
    fn test_versions_sorted_newest_first() {
        let details = PackageDetails::from_document(document());
        let order: Vec<&str> = details.versions.iter().map(|v| v.version.as_str()).collect();
        assert_eq!(order, vec!["1.10.0", "1.9.3", "1.2.0"]);
        assert_eq!(details.versions[2].license.as_deref(), Some("ISC"));
    }

    #[test]
    fn test_homepage_link_only_for_web_urls() {
        let details = PackageDetails::from_document(document());
        assert_eq!(details.homepage_link(), Some("https://acme.dev"));

        let hostile = PackageDetails::from_document(json!({
            "name": "evil",
            "homepage": "javascript:window.__TAURI__.core.invoke('add_user')"
        }));
        assert!(hostile.homepage.is_some());
        assert_eq!(hostile.homepage_link(), None);
    }

    #[test]
    fn test_unknown_shape_is_tolerated() {
        let details = PackageDetails::from_document(json!({ "error": "not found" }));
        assert_eq!(details.name, "");
        assert!(details.versions.is_empty());
        assert!(details.latest_summary().is_none());
        assert!(details.pretty_json().contains("not found"));
    }
}
