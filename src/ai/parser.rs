use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use url::Url;

use crate::models::{FurtherReadingLink, SummaryPayload};

/// Length of the raw-text summary used when no JSON can be recovered.
pub const FALLBACK_SUMMARY_CHARS: usize = 300;

const TRUNCATION_MARKER: &str = "...";

static FENCE_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^```[A-Za-z]*\s*").unwrap());
static FENCE_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*```$").unwrap());

/// Removes a surrounding markdown code fence (```` ``` ```` or ```` ```json ````).
pub fn strip_code_fence(text: &str) -> String {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }
    let opened = FENCE_OPEN.replace(trimmed, "");
    FENCE_CLOSE.replace(&opened, "").trim().to_string()
}

/// Returns the first balanced span opened by `open` and closed by `close`
/// that `accept` likes. Brackets inside JSON strings are ignored.
fn find_balanced<T>(
    text: &str,
    open: char,
    close: char,
    accept: impl Fn(&str) -> Option<T>,
) -> Option<T> {
    for (start, _) in text.match_indices(open) {
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;

        for (offset, c) in text[start..].char_indices() {
            if in_string {
                match c {
                    _ if escaped => escaped = false,
                    '\\' => escaped = true,
                    '"' => in_string = false,
                    _ => {}
                }
                continue;
            }

            if c == '"' {
                in_string = true;
            } else if c == open {
                depth += 1;
            } else if c == close {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + c.len_utf8();
                    if let Some(found) = accept(&text[start..end]) {
                        return Some(found);
                    }
                    break;
                }
            }
        }
    }
    None
}

fn parse_payload(text: &str) -> Option<SummaryPayload> {
    serde_json::from_str(text).ok()
}

fn embedded_payload(text: &str) -> Option<SummaryPayload> {
    find_balanced(text, '{', '}', parse_payload)
}

fn degraded_payload(text: &str) -> SummaryPayload {
    let mut summary: String = text.chars().take(FALLBACK_SUMMARY_CHARS).collect();
    if text.chars().nth(FALLBACK_SUMMARY_CHARS).is_some() {
        summary.push_str(TRUNCATION_MARKER);
    }
    SummaryPayload {
        summary,
        key_points: Vec::new(),
    }
}

/// Extracts `{summary, keyPoints}` from model output. Total: when no JSON
/// can be recovered the leading text itself becomes the summary.
pub fn parse_summary(raw: &str) -> SummaryPayload {
    let cleaned = strip_code_fence(raw);

    parse_payload(&cleaned)
        .or_else(|| embedded_payload(&cleaned))
        .unwrap_or_else(|| {
            tracing::warn!(
                "AI response was not JSON, using raw text ({} chars)",
                cleaned.chars().count()
            );
            degraded_payload(&cleaned)
        })
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LinksReply {
    Wrapped { links: Vec<RawLink> },
    Bare(Vec<RawLink>),
}

#[derive(Debug, Deserialize)]
struct RawLink {
    #[serde(default)]
    title: String,
    url: String,
}

impl LinksReply {
    fn into_links(self) -> Vec<RawLink> {
        match self {
            LinksReply::Wrapped { links } => links,
            LinksReply::Bare(links) => links,
        }
    }
}

fn parse_links_reply(text: &str) -> Option<LinksReply> {
    serde_json::from_str(text).ok()
}

fn is_web_url(candidate: &str) -> bool {
    Url::parse(candidate)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false)
}

/// Extracts further-reading links, keeping only absolute http(s) URLs.
pub fn parse_links(raw: &str) -> Vec<FurtherReadingLink> {
    let cleaned = strip_code_fence(raw);

    let reply = parse_links_reply(&cleaned)
        .or_else(|| find_balanced(&cleaned, '{', '}', parse_links_reply))
        .or_else(|| find_balanced(&cleaned, '[', ']', parse_links_reply));

    let Some(reply) = reply else {
        tracing::warn!("No link list found in AI response");
        return Vec::new();
    };

    reply
        .into_links()
        .into_iter()
        .filter(|link| is_web_url(&link.url))
        .map(|link| FurtherReadingLink {
            title: if link.title.trim().is_empty() {
                link.url.clone()
            } else {
                link.title.trim().to_string()
            },
            url: link.url,
        })
        .collect()
}
