//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::logging::warn;
use leptos::prelude::*;

use crate::commands::ConsoleApi;

const SCHEME_KEY: &str = "verdaccio-console.scheme";

/// Sidebar navigation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Dashboard,
    PrivatePackages,
    CachedPackages,
    Users,
    Logs,
    Config,
    Settings,
}

impl Section {
    pub const ALL: &'static [Section] = &[
        Section::Dashboard,
        Section::PrivatePackages,
        Section::CachedPackages,
        Section::Users,
        Section::Logs,
        Section::Config,
        Section::Settings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Section::Dashboard => "Dashboard",
            Section::PrivatePackages => "Private Packages",
            Section::CachedPackages => "Cached Packages",
            Section::Users => "Users",
            Section::Logs => "Logs",
            Section::Config => "Config",
            Section::Settings => "Settings",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Section::Dashboard => "◧",
            Section::PrivatePackages => "▣",
            Section::CachedPackages => "▤",
            Section::Users => "☺",
            Section::Logs => "≡",
            Section::Config => "⚙",
            Section::Settings => "☰",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn toggled(self) -> Self {
        match self {
            ColorScheme::Light => ColorScheme::Dark,
            ColorScheme::Dark => ColorScheme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(ColorScheme::Light),
            "dark" => Some(ColorScheme::Dark),
            _ => None,
        }
    }

    /// Last choice from local storage, light when unset
    pub fn restore() -> Self {
        window()
            .local_storage()
            .ok()
            .flatten()
            .and_then(|storage| storage.get_item(SCHEME_KEY).ok().flatten())
            .and_then(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    fn persist(self) {
        let Some(storage) = window().local_storage().ok().flatten() else {
            return;
        };
        if storage.set_item(SCHEME_KEY, self.as_str()).is_err() {
            warn!("[Context] could not store color scheme");
        }
    }
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Visible section - read
    pub section: ReadSignal<Section>,
    /// Visible section - write
    set_section: WriteSignal<Section>,
    /// Color scheme - read
    pub scheme: ReadSignal<ColorScheme>,
    /// Color scheme - write
    set_scheme: WriteSignal<ColorScheme>,
    /// Backend command surface
    pub api: ConsoleApi,
}

impl AppContext {
    pub fn new(
        section: (ReadSignal<Section>, WriteSignal<Section>),
        scheme: (ReadSignal<ColorScheme>, WriteSignal<ColorScheme>),
    ) -> Self {
        Self {
            section: section.0,
            set_section: section.1,
            scheme: scheme.0,
            set_scheme: scheme.1,
            api: ConsoleApi::default(),
        }
    }

    pub fn navigate(&self, section: Section) {
        self.set_section.set(section);
    }

    /// Flip light/dark and remember the choice
    pub fn toggle_scheme(&self) {
        let next = self.scheme.get_untracked().toggled();
        self.set_scheme.set(next);
        next.persist();
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_toggle_and_parse() {
        assert_eq!(ColorScheme::Light.toggled(), ColorScheme::Dark);
        assert_eq!(ColorScheme::Dark.toggled().as_str(), "light");
        assert_eq!(ColorScheme::parse("dark"), Some(ColorScheme::Dark));
        assert_eq!(ColorScheme::parse("solarized"), None);
    }

    #[test]
    fn test_every_section_has_a_label() {
        assert_eq!(Section::ALL.len(), 7);
        assert!(Section::ALL.iter().all(|s| !s.label().is_empty()));
    }
}
