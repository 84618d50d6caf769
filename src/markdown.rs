//! Chat Markdown Rendering
//!
//! Bot replies are Markdown from a remote service, so rendering is
//! restricted: raw HTML is shown as text, links open in a new tab, and
//! only http(s), mailto and relative URLs survive.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag, TagEnd};

/// Characters that would break out of a quoted attribute.
const HREF: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'\'').add(b'<').add(b'>').add(b'`');

/// Render a chat message to HTML.
pub fn parse_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = parser.map(restrict_event);
    let mut html_output = String::new();
    push_html(&mut html_output, events);
    html_output
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES
}

fn restrict_event(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link { dest_url, .. }) => {
            let href = safe_href(&dest_url);
            Event::Html(CowStr::from(format!(
                r#"<a href="{href}" target="_blank" rel="noopener noreferrer">"#
            )))
        }
        Event::End(TagEnd::Link) => Event::Html(CowStr::from("</a>")),
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => {
            let dest_url = if is_safe_url(&dest_url) { dest_url } else { CowStr::from("") };
            Event::Start(Tag::Image { link_type, dest_url, title, id })
        }
        other => other,
    }
}

fn safe_href(url: &str) -> String {
    if is_safe_url(url) {
        utf8_percent_encode(url, HREF).to_string()
    } else {
        "#".to_string()
    }
}

fn is_safe_url(url: &str) -> bool {
    let url = url.trim();
    match url.split_once(':') {
        Some((scheme, _)) if !scheme.contains('/') => {
            let scheme = scheme.to_ascii_lowercase();
            matches!(scheme.as_str(), "http" | "https" | "mailto")
        }
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_formatting() {
        let html = parse_markdown("**오늘의 추천** 메뉴");
        assert!(html.contains("<strong>오늘의 추천</strong>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = parse_markdown("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_links_open_in_new_tab() {
        let html = parse_markdown("[지도](https://map.kakao.com/1)");
        assert!(html.contains(
            r#"<a href="https://map.kakao.com/1" target="_blank" rel="noopener noreferrer">지도</a>"#
        ));
    }

    #[test]
    fn test_script_urls_are_dropped() {
        let html = parse_markdown("[x](javascript:alert(1))");
        assert!(html.contains(r##"href="#""##));
        assert!(!html.contains("javascript:"));
    }

    #[test]
    fn test_relative_urls_kept() {
        assert!(is_safe_url("/restaurants/3"));
        assert!(is_safe_url("https://a.kr/x?y=1:2"));
        assert!(!is_safe_url("data:text/html,hi"));
    }
}
