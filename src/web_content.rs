use anyhow::{Context, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Node};
use url::Url;

use crate::config::WebContentConfig;

static BRACKETED_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[.*?\]").expect("valid bracket regex"));
static PUNCTUATION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid punctuation regex"));
static DIGIT_WORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w*\d\w*").expect("valid digit word regex"));
static WHITESPACE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Elements whose text never shows up on the rendered page.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "template"];

/// Something that can hand back the HTML of a page.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch_html(&self, url: &Url) -> Result<String>;
}

pub struct WebContentFetcher {
    client: Client,
    config: WebContentConfig,
}

impl WebContentFetcher {
    pub fn new(client: Client, config: WebContentConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl PageSource for WebContentFetcher {
    async fn fetch_html(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .timeout(self.config.fetch_timeout)
            .send()
            .await
            .with_context(|| format!("failed to fetch {url}"))?
            .error_for_status()
            .with_context(|| format!("bad response from {url}"))?;

        response
            .text()
            .await
            .with_context(|| format!("failed to read body of {url}"))
    }
}

/// Parses `raw` and keeps it only if it carries both a scheme and a host.
pub fn parse_target_url(raw: &str) -> Option<Url> {
    let url = Url::parse(raw.trim()).ok()?;
    url.host_str().filter(|host| !host.is_empty())?;
    Some(url)
}

/// Visible text of an HTML document, one trimmed text node per line.
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut lines = Vec::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|el| HIDDEN_ELEMENTS.contains(&el.name()))
        });
        if hidden {
            continue;
        }
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            lines.push(trimmed);
        }
    }

    lines.join("\n")
}

/// Strips bracketed notes, punctuation and digit-bearing words, then
/// normalises whitespace. The order of the passes matters.
pub fn clean_text(text: &str) -> String {
    let text = BRACKETED_REGEX.replace_all(text, "");
    let text = PUNCTUATION_REGEX.replace_all(&text, " ");
    let text = DIGIT_WORD_REGEX.replace_all(&text, "");
    let text = WHITESPACE_REGEX.replace_all(&text, " ");
    text.trim().to_string()
}

/// Fetches `url` and returns its cleaned visible text.
pub async fn extract_page_text(source: &dyn PageSource, url: &Url) -> Result<String> {
    let html = source.fetch_html(url).await?;
    Ok(clean_text(&html_to_text(&html)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_urls_without_scheme_or_host() {
        assert!(parse_target_url("https://www.example.com/").is_some());
        assert!(parse_target_url("http://example.com/path?q=1").is_some());
        assert!(parse_target_url("www.example.com").is_none());
        assert!(parse_target_url("not a url").is_none());
        assert!(parse_target_url("mailto:someone@example.com").is_none());
        assert!(parse_target_url("file:///etc/hosts").is_none());
        assert!(parse_target_url("").is_none());
    }

    #[test]
    fn html_text_skips_scripts_and_styles() {
        let html = r#"<!doctype html>
            <html><head><title>Studio</title><style>body { color: red }</style></head>
            <body>
              <script>var tracking = 1;</script>
              <h1>We build   websites</h1>
              <p>Fast <b>and</b> accessible</p>
              <!-- hidden comment -->
            </body></html>"#;
        let text = html_to_text(html);
        assert_eq!(text, "Studio\nWe build   websites\nFast\nand\naccessible");
    }

    #[test]
    fn clean_text_applies_passes_in_order() {
        let raw = "Award winning [citation needed] agency, since 2010!\nCall 555-1234 or visit web3 hub.";
        assert_eq!(
            clean_text(raw),
            "Award winning agency since Call or visit hub"
        );
    }

    #[test]
    fn bracket_removal_is_non_greedy() {
        assert_eq!(clean_text("keep [a] this [b] text"), "keep this text");
    }

    #[test]
    fn cleaned_text_has_no_punctuation_brackets_or_digits() {
        let html = "<html><body><p>Hello, world! [1] Top-10 picks for 2024: design &amp; UX.</p>\
                    <p>Über café — naïve résumé (v2) #42</p></body></html>";
        let text = clean_text(&html_to_text(html));

        assert!(!text.contains('['));
        assert!(!text.contains(']'));
        assert!(text
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == ' '));
        assert!(text
            .split(' ')
            .all(|word| !word.chars().any(|c| c.is_ascii_digit())));
        assert!(!text.contains("  "));
        assert_eq!(text, text.trim());
        assert!(text.contains("Über café"));
    }

    struct StaticPage(&'static str);

    #[async_trait]
    impl PageSource for StaticPage {
        async fn fetch_html(&self, _url: &Url) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn extract_page_text_cleans_fetched_html() {
        let source = StaticPage("<html><body><h1>Design [edit]</h1><p>Speed: 99%</p></body></html>");
        let url = Url::parse("https://example.com/").unwrap();
        let text = extract_page_text(&source, &url).await.unwrap();
        assert_eq!(text, "Design Speed");
    }
}
