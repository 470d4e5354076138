/// Only the opening of an article is sent for summarisation.
pub const SUMMARY_CONTENT_CHARS: usize = 1500;

pub const LINKS_CONTENT_CHARS: usize = 1000;

pub const SUMMARY_SYSTEM_PROMPT: &str =
    "You summarise biology articles for a student news site. You reply with raw JSON only.";

pub const LINKS_SYSTEM_PROMPT: &str = "You suggest reputable external links for further reading on scientific and educational topics. Always respond with valid JSON only, no markdown formatting or code blocks.";

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn summary_prompt(title: &str, plain_text: &str) -> String {
    let content = truncate_chars(plain_text, SUMMARY_CONTENT_CHARS);

    format!(
        r#"Write a concise summary and the key takeaways for this blog post, in British (UK) English.

Title: {title}

Content: {content}

Respond with ONLY a JSON object in exactly this shape, with no markdown, no code fences and no other text:
{{
  "summary": "A 2-3 sentence summary of the main points",
  "keyPoints": ["Key point 1", "Key point 2", "Key point 3"]
}}

Keep the summary short. Give between 3 and 5 key points, each one a single bullet-worthy insight."#
    )
}

pub fn links_prompt(title: &str, content: &str) -> String {
    let content = truncate_chars(content, LINKS_CONTENT_CHARS);

    format!(
        r#"Suggest 3-5 reputable, up-to-date external links for further reading on the topic below. Use a mix of sources, and only URLs that really exist.

Title: {title}

Content: {content}

Respond with a JSON object in exactly this shape:
{{
  "links": [
    {{ "title": "Link title", "url": "https://example.com" }}
  ]
}}"#
    )
}

pub fn tutor_system_prompt(context: Option<&str>) -> String {
    let context = context
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or("No specific articles available");

    format!(
        r#"You are an expert biology tutor working alongside the BioNews Weekly article archive. You:

1. Help students understand complex biology concepts
2. Give clear, educational explanations
3. Point to relevant articles when they help
4. Adapt to the student's level
5. Encourage curiosity and deeper learning

Available articles:
{context}

Be encouraging. Use analogies and examples, break difficult topics into small steps, and ask a follow-up question when it helps check understanding. Offer study tips where useful.

Keep replies conversational and aim for 2-3 paragraphs unless the question needs more."#
    )
}
