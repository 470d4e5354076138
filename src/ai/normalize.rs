use std::sync::LazyLock;

use regex::Regex;

/// Wide enough that ordinary paragraphs are not re-wrapped.
const RENDER_WIDTH: usize = 1000;

const WORDS_PER_MINUTE: usize = 200;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Renders rich-text HTML to plain text. Never fails: if the renderer
/// rejects the input, tags are stripped textually instead.
pub fn strip_html(html: &str) -> String {
    let text = match html2text::from_read(html.as_bytes(), RENDER_WIDTH) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!("html2text failed, stripping tags textually: {}", e);
            TAG.replace_all(html, " ").into_owned()
        }
    };

    text.lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// `"<n> min read"` at 200 words per minute, rounded up, never below one minute.
pub fn estimate_read_time(text: &str) -> String {
    let words = text.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{} min read", minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markup_and_keeps_word_boundaries() {
        let text = strip_html("<p>CRISPR uses</p><p>guide RNA</p><p><br></p><p>and Cas9.</p>");
        let words: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(words, vec!["CRISPR", "uses", "guide", "RNA", "and", "Cas9."]);
        assert!(!text.contains('<'));
    }

    #[test]
    fn tolerates_malformed_markup() {
        let text = strip_html("<p>unclosed <div>tags & stray > brackets");
        assert!(text.contains("unclosed"));
        assert!(text.contains("brackets"));
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(strip_html("just words"), "just words");
        assert_eq!(strip_html(""), "");
    }

    #[test]
    fn reading_time_rounds_up() {
        assert_eq!(estimate_read_time(&vec!["word"; 400].join(" ")), "2 min read");
        assert_eq!(estimate_read_time(&vec!["word"; 401].join(" ")), "3 min read");
        assert_eq!(estimate_read_time("photosynthesis"), "1 min read");
        assert_eq!(estimate_read_time(""), "1 min read");
    }
}
