//! List Utilities
//!
//! Page arithmetic and client-side text filtering for list pages.
//! Filtering only narrows rows that are already loaded; it never refetches.

use crate::models::{LogEntry, LogLevel, PackageRecord, Page, UserAccount};

pub const PAGE_SIZES: &[usize] = &[10, 20, 50, 100];
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// `ceil(total / page_size)`; zero when there is nothing to show
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Page to request after removing one row from `page`
pub fn page_after_removal(page: &Page<impl Sized>) -> usize {
    let remaining = page.total.saturating_sub(1);
    let last = total_pages(remaining, page.page_size).max(1);
    page.page.clamp(1, last)
}

/// Records matchable by the list search box
pub trait Searchable {
    /// Fields the search text is matched against
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for PackageRecord {
    fn search_fields(&self) -> Vec<&str> {
        [Some(self.name.as_str()), self.description.as_deref(), self.author.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }
}

impl Searchable for UserAccount {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.username.as_str()]
    }
}

impl Searchable for LogEntry {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.message.as_str()]
    }
}

/// Case-insensitive substring match against any search field
pub fn matches_query<T: Searchable>(record: &T, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Rows of the loaded page matching `query`, in their original order
pub fn filter_records<T: Searchable + Clone>(records: &[T], query: &str) -> Vec<T> {
    records.iter().filter(|r| matches_query(*r, query)).cloned().collect()
}

/// Total shown under a list: the server's count without a filter, the local
/// match count with one
pub fn displayed_total(server_total: usize, filtered_len: usize, query: &str) -> usize {
    if query.trim().is_empty() {
        server_total
    } else {
        filtered_len
    }
}

/// Level selector on the logs page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelFilter {
    #[default]
    All,
    Info,
    Warn,
    Error,
    Output,
}

impl LevelFilter {
    pub const ALL: &'static [LevelFilter] =
        &[LevelFilter::All, LevelFilter::Info, LevelFilter::Warn, LevelFilter::Error, LevelFilter::Output];

    pub fn label(&self) -> &'static str {
        match self {
            LevelFilter::All => "All",
            LevelFilter::Info => "Info",
            LevelFilter::Warn => "Warn",
            LevelFilter::Error => "Error",
            LevelFilter::Output => "Output",
        }
    }

    pub fn accepts(&self, level: &LogLevel) -> bool {
        match self {
            LevelFilter::All => true,
            LevelFilter::Info => matches!(level, LogLevel::Info),
            LevelFilter::Warn => matches!(level, LogLevel::Warn),
            LevelFilter::Error => matches!(level, LogLevel::Error | LogLevel::Stderr),
            LevelFilter::Output => matches!(level, LogLevel::Stdout | LogLevel::Stderr),
        }
    }
}

pub fn filter_logs(entries: &[LogEntry], level: LevelFilter, query: &str) -> Vec<LogEntry> {
    entries
        .iter()
        .filter(|e| level.accepts(&e.level) && matches_query(*e, query))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pkg(name: &str, description: Option<&str>, author: Option<&str>) -> PackageRecord {
        PackageRecord {
            name: name.to_string(),
            version: "1.0.0".to_string(),
            description: description.map(str::to_string),
            author: author.map(str::to_string),
            license: None,
            versions: vec!["1.0.0".to_string()],
            keywords: vec![],
            homepage: None,
            repository: None,
            created: None,
            modified: None,
        }
    }

    fn sample() -> Vec<PackageRecord> {
        vec![
            pkg("@acme/logger", Some("Structured LOGGING"), Some("Ada")),
            pkg("left-pad", None, Some("azer")),
            pkg("react", Some("UI library"), None),
        ]
    }

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(101, 10), 11);
        for total in 0..200 {
            for &size in PAGE_SIZES {
                let pages = total_pages(total, size);
                assert!(pages * size >= total);
                assert!(pages == 0 || (pages - 1) * size < total);
            }
        }
    }

    #[test]
    fn test_filter_is_case_insensitive_across_fields() {
        let rows = sample();
        let by_desc = filter_records(&rows, "logging");
        assert_eq!(by_desc.len(), 1);
        assert_eq!(by_desc[0].name, "@acme/logger");

        let by_author = filter_records(&rows, "AZER");
        assert_eq!(by_author[0].name, "left-pad");

        assert!(filter_records(&rows, "vue").is_empty());
    }

    #[test]
    fn test_empty_filter_returns_page_unchanged() {
        let rows = sample();
        assert_eq!(filter_records(&rows, ""), rows);
        assert_eq!(filter_records(&rows, "   "), rows);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let rows = sample();
        let once = filter_records(&rows, "a");
        let twice = filter_records(&once, "a");
        assert_eq!(once, twice);
        assert_eq!(filter_records(&rows, "a"), once);
    }

    #[test]
    fn test_displayed_total_switches_on_filter() {
        assert_eq!(displayed_total(57, 3, ""), 57);
        assert_eq!(displayed_total(57, 3, "re"), 3);
    }

    #[test]
    fn test_page_after_removal_steps_back_from_emptied_page() {
        let last_row_on_page_3 = Page { items: vec![()], total: 41, page: 3, page_size: 20, total_pages: 3 };
        assert_eq!(page_after_removal(&last_row_on_page_3), 2);

        let middle = Page { items: vec![(); 20], total: 60, page: 2, page_size: 20, total_pages: 3 };
        assert_eq!(page_after_removal(&middle), 2);

        let only_row = Page { items: vec![()], total: 1, page: 1, page_size: 20, total_pages: 1 };
        assert_eq!(page_after_removal(&only_row), 1);
    }

    #[test]
    fn test_log_level_filter() {
        let entry = |level: LogLevel, message: &str| LogEntry {
            seq: 0,
            timestamp: String::new(),
            level,
            message: message.to_string(),
        };
        let logs = vec![
            entry(LogLevel::Info, "starting"),
            entry(LogLevel::Stderr, "EADDRINUSE"),
            entry(LogLevel::Stdout, "http address"),
        ];
        assert_eq!(filter_logs(&logs, LevelFilter::Error, "").len(), 1);
        assert_eq!(filter_logs(&logs, LevelFilter::Output, "").len(), 2);
        assert_eq!(filter_logs(&logs, LevelFilter::All, "ADDR").len(), 2);
    }
}
