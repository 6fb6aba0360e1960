//! README Rendering
//!
//! Renders package READMEs with pulldown-cmark:
//! - Syntax highlighting for fenced code (syntect)
//! - Raw HTML is shown as text, never injected
//! - Links open outside the app window; only web and mail links stay clickable
//! - Relative images are dropped (there is no base URL to resolve them against)

use pulldown_cmark::{html::push_html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::sync::OnceLock;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Syntax highlighter resources (lazy loaded)
static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn get_syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn get_theme() -> Option<&'static Theme> {
    THEME_SET.get_or_init(ThemeSet::load_defaults).themes.get("InspiredGitHub")
}

/// Render a README to HTML
pub fn render_readme(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

enum State {
    Normal,
    InCodeBlock { lang: Option<String>, content: String },
    /// Swallowing a dropped image's alt text until its end tag
    InDroppedImage { depth: usize },
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;
    // Whether each open link emitted an anchor
    let mut links: Vec<bool> = Vec::new();

    for event in parser {
        match state {
            State::Normal => match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(l) if !l.is_empty() => Some(l.to_string()),
                        _ => None,
                    };
                    state = State::InCodeBlock { lang, content: String::new() };
                }

                Event::Start(Tag::Image { dest_url, .. }) if !is_absolute_url(&dest_url) => {
                    state = State::InDroppedImage { depth: 0 };
                }

                Event::Start(Tag::Link { dest_url, title, .. }) => {
                    let safe = is_safe_href(&dest_url);
                    if safe {
                        let html = format!(
                            r#"<a href="{}" title="{}" target="_blank" rel="noopener noreferrer">"#,
                            escape_html(&dest_url),
                            escape_html(&title)
                        );
                        events.push(Event::Html(CowStr::from(html)));
                    }
                    links.push(safe);
                }
                Event::End(TagEnd::Link) => {
                    if links.pop().unwrap_or(false) {
                        events.push(Event::Html(CowStr::from("</a>")));
                    }
                }

                Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),

                other => events.push(other),
            },

            State::InCodeBlock { ref lang, ref mut content } => match event {
                Event::Text(t) => content.push_str(&t),
                Event::End(TagEnd::CodeBlock) => {
                    let html = highlight_code(content, lang.as_deref());
                    events.push(Event::Html(CowStr::from(html)));
                    state = State::Normal;
                }
                _ => {}
            },

            State::InDroppedImage { ref mut depth } => match event {
                Event::Start(_) => *depth += 1,
                Event::End(_) if *depth == 0 => state = State::Normal,
                Event::End(_) => *depth -= 1,
                _ => {}
            },
        }
    }

    events
}

fn highlight_code(code: &str, lang: Option<&str>) -> String {
    let fallback = || format!("<pre><code>{}</code></pre>", escape_html(code));
    let Some(theme) = get_theme() else {
        return fallback();
    };
    let ss = get_syntax_set();
    let syntax = lang
        .and_then(|l| ss.find_syntax_by_token(l))
        .unwrap_or_else(|| ss.find_syntax_plain_text());

    highlighted_html_for_string(code, ss, syntax, theme).unwrap_or_else(|_| fallback())
}

/// Link targets allowed in an `href`: web, mail and in-page anchors.
///
/// Anything else (`javascript:`, `vbscript:`, `data:`, relative paths) is rendered as text.
pub fn is_safe_href(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    lower.starts_with("https://")
        || lower.starts_with("http://")
        || lower.starts_with("mailto:")
        || lower.starts_with('#')
}

fn is_absolute_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://") || lower.starts_with("data:image/")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_readme("hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_links_open_externally() {
        let html = render_readme("[docs](https://verdaccio.org)");
        assert!(html.contains(r#"href="https://verdaccio.org""#));
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains("docs</a>"));
    }

    #[test]
    fn test_script_links_render_as_text() {
        for target in [
            "javascript:window.__TAURI__.core.invoke('delete_packages')",
            "JavaScript:alert(1)",
            " vbscript:msgbox(1)",
            "data:text/html,<b>x</b>",
        ] {
            let html = render_readme(&format!("[click]({}) after", target));
            assert!(!html.contains("<a "), "anchor emitted for {}", target);
            assert!(!html.contains("</a>"));
            assert!(html.contains("click"));
            assert!(html.contains("after"));
        }

        let auto = render_readme("<javascript:alert(1)>");
        assert!(!auto.contains("href="));
    }

    #[test]
    fn test_safe_href_schemes() {
        assert!(is_safe_href("https://verdaccio.org"));
        assert!(is_safe_href("HTTP://example.com"));
        assert!(is_safe_href("mailto:dev@acme.dev"));
        assert!(is_safe_href("#usage"));
        assert!(!is_safe_href("javascript:void(0)"));
        assert!(!is_safe_href("  JAVASCRIPT:void(0)"));
        assert!(!is_safe_href("vbscript:x"));
        assert!(!is_safe_href("./docs/api.md"));
    }

    #[test]
    fn test_only_safe_links_become_anchors() {
        let html = render_readme("[a](javascript:x) and [b](https://ok.dev)");
        assert_eq!(html.matches("<a ").count(), 1);
        assert_eq!(html.matches("</a>").count(), 1);
        assert!(html.contains(r#"href="https://ok.dev""#));
    }

    #[test]
    fn test_relative_images_are_dropped() {
        let html = render_readme("![logo](./logo.png) text");
        assert!(!html.contains("logo.png"));
        assert!(!html.contains(">logo<"));
        assert!(html.contains("text"));

        let remote = render_readme("![badge](https://img.shields.io/badge.svg)");
        assert!(remote.contains("img.shields.io"));
    }

    #[test]
    fn test_code_block_is_rendered() {
        let html = render_readme("```js\nconst a = 1;\n```");
        assert!(html.contains("<pre"));
        assert!(html.contains("const"));
    }
}
