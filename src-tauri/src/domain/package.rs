//! Package Entity
//!
//! Summaries of stored packages, read from the `package.json` metadata
//! document the registry keeps per package directory.

use std::cmp::Ordering;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entity::{DomainError, DomainResult};

/// Package view selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageKind {
    /// Published directly to this registry
    Private,
    /// Proxied from the upstream registry
    Cached,
    All,
}

/// Package summary for list views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageInfo {
    pub name: String,
    /// Latest version per dist-tags
    pub version: String,
    pub description: Option<String>,
    pub author: Option<String>,
    pub license: Option<String>,
    /// Newest first
    pub versions: Vec<String>,
    pub keywords: Vec<String>,
    pub homepage: Option<String>,
    pub repository: Option<String>,
    pub created: Option<String>,
    pub modified: Option<String>,
}

impl PackageInfo {
    /// Build a summary from a registry metadata document.
    ///
    /// Per-version fields come from the latest version, falling back to the
    /// document root.
    pub fn from_metadata(name: &str, doc: &Value) -> Self {
        let mut versions: Vec<String> = doc
            .get("versions")
            .and_then(Value::as_object)
            .map(|v| v.keys().cloned().collect())
            .unwrap_or_default();
        versions.sort_by(|a, b| version_compare(b, a));

        let latest = doc
            .get("dist-tags")
            .and_then(|dt| dt.get("latest"))
            .and_then(Value::as_str)
            .unwrap_or("0.0.0");
        let latest_info = doc.get("versions").and_then(|v| v.get(latest));
        let from_latest = |key: &str| latest_info.and_then(|info| info.get(key));

        let author = from_latest("author")
            .and_then(parse_author)
            .or_else(|| doc.get("author").and_then(parse_author));
        let keywords = from_latest("keywords")
            .and_then(Value::as_array)
            .map(|arr| arr.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
            .unwrap_or_default();
        let description = from_latest("description")
            .and_then(Value::as_str)
            .or_else(|| doc.get("description").and_then(Value::as_str))
            .map(str::to_string);
        let license = from_latest("license")
            .and_then(parse_license)
            .or_else(|| doc.get("license").and_then(parse_license));
        let time = |key: &str| {
            doc.get("time")
                .and_then(|t| t.get(key))
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Self {
            name: name.to_string(),
            version: latest.to_string(),
            description,
            author,
            license,
            versions,
            keywords,
            homepage: from_latest("homepage").and_then(Value::as_str).map(str::to_string),
            repository: from_latest("repository").and_then(parse_repository),
            created: time("created"),
            modified: time("modified"),
        }
    }
}

/// `author` is either "Name <mail>" or `{ "name": ... }`
fn parse_author(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj.get("name").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

fn parse_license(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj.get("type").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

fn parse_repository(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj.get("url").and_then(Value::as_str).map(str::to_string),
        _ => None,
    }
}

/// Numeric comparison of dotted versions, used for ordering only
pub fn version_compare(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| -> Vec<u64> {
        v.split(|c: char| !c.is_ascii_digit())
            .filter_map(|s| s.parse().ok())
            .collect()
    };
    parse(a).cmp(&parse(b))
}

/// Storage-relative directory of `name`; `@scope/pkg` maps to two components.
///
/// Rejects names that could escape the storage directory.
pub fn package_rel_path(name: &str) -> DomainResult<PathBuf> {
    let invalid = || DomainError::InvalidInput(format!("invalid package name: {}", name));
    let parts: Vec<&str> = if name.starts_with('@') {
        let (scope, pkg) = name.split_once('/').ok_or_else(invalid)?;
        vec![scope, pkg]
    } else {
        vec![name]
    };
    let safe = parts
        .iter()
        .all(|p| !p.is_empty() && *p != "." && *p != ".." && !p.contains(['/', '\\']));
    if !safe {
        return Err(invalid());
    }
    Ok(parts.iter().collect())
}

/// One page of a sorted listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Page arithmetic over `total` rows. Page numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: usize,
    pub page_size: usize,
    pub total: usize,
}

impl PageWindow {
    pub fn new(page: usize, page_size: usize, total: usize) -> DomainResult<Self> {
        if page_size == 0 {
            return Err(DomainError::InvalidInput("page size must be positive".into()));
        }
        Ok(Self { page: page.max(1), page_size, total })
    }

    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size)
    }

    /// Index range of this page, empty past the end
    pub fn range(&self) -> std::ops::Range<usize> {
        let start = (self.page - 1).saturating_mul(self.page_size).min(self.total);
        let end = start.saturating_add(self.page_size).min(self.total);
        start..end
    }

    pub fn into_page<T>(self, items: Vec<T>) -> Page<T> {
        Page {
            items,
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_from_metadata() {
        let doc = json!({
            "name": "left-pad",
            "dist-tags": { "latest": "1.3.0" },
            "versions": {
                "1.0.0": { "description": "old" },
                "1.3.0": {
                    "description": "String left pad",
                    "author": { "name": "azer" },
                    "license": "WTFPL",
                    "keywords": ["pad", "string"],
                    "repository": { "type": "git", "url": "git://github.com/stevemao/left-pad.git" }
                },
                "1.10.0-beta": {}
            },
            "time": { "created": "2014-03-14T00:00:00.000Z", "modified": "2018-04-20T00:00:00.000Z" }
        });

        let info = PackageInfo::from_metadata("left-pad", &doc);
        assert_eq!(info.version, "1.3.0");
        assert_eq!(info.description.as_deref(), Some("String left pad"));
        assert_eq!(info.author.as_deref(), Some("azer"));
        assert_eq!(info.license.as_deref(), Some("WTFPL"));
        assert_eq!(info.keywords, vec!["pad", "string"]);
        assert_eq!(info.repository.as_deref(), Some("git://github.com/stevemao/left-pad.git"));
        assert_eq!(info.versions, vec!["1.10.0-beta", "1.3.0", "1.0.0"]);
        assert_eq!(info.created.as_deref(), Some("2014-03-14T00:00:00.000Z"));
    }

    #[test]
    fn test_summary_without_dist_tags() {
        let info = PackageInfo::from_metadata("bare", &json!({ "description": "root" }));
        assert_eq!(info.version, "0.0.0");
        assert_eq!(info.description.as_deref(), Some("root"));
        assert!(info.versions.is_empty());
    }

    #[test]
    fn test_version_ordering() {
        assert_eq!(version_compare("1.10.0", "1.9.9"), Ordering::Greater);
        assert_eq!(version_compare("2.0.0", "2.0.0"), Ordering::Equal);
        assert_eq!(version_compare("0.1.0", "0.1.1"), Ordering::Less);
    }

    #[test]
    fn test_package_paths() {
        assert_eq!(package_rel_path("lodash").unwrap(), PathBuf::from("lodash"));
        assert_eq!(
            package_rel_path("@acme/ui").unwrap(),
            PathBuf::from("@acme").join("ui")
        );
        assert!(package_rel_path("..").is_err());
        assert!(package_rel_path("@acme").is_err());
        assert!(package_rel_path("@acme/../etc").is_err());
        assert!(package_rel_path("a/b").is_err());
    }

    #[test]
    fn test_page_window_with_extreme_arguments() {
        let huge_page = PageWindow::new(usize::MAX, 100, 25).unwrap();
        assert!(huge_page.range().is_empty());
        assert_eq!(huge_page.into_page(Vec::<()>::new()).total_pages, 1);

        let huge_size = PageWindow::new(1, usize::MAX, 25).unwrap();
        assert_eq!(huge_size.range(), 0..25);
        assert_eq!(huge_size.total_pages(), 1);
    }

    #[test]
    fn test_page_window() {
        let window = PageWindow::new(3, 10, 25).unwrap();
        assert_eq!(window.total_pages(), 3);
        assert_eq!(window.range(), 20..25);

        let past_end = PageWindow::new(9, 10, 25).unwrap();
        assert!(past_end.range().is_empty());

        let empty = PageWindow::new(1, 20, 0).unwrap();
        assert_eq!(empty.total_pages(), 0);
        assert_eq!(empty.into_page(Vec::<u8>::new()).total_pages, 0);

        assert!(PageWindow::new(1, 0, 5).is_err());
    }
}
