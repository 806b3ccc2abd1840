//! Plain-text extraction.
//!
//! Editor content arrives with inline formatting tags (`<b>`, `<p>`, ...)
//! that must not count as words. Markdown files handed to the CLI go through
//! pulldown-cmark instead, which understands code blocks and frontmatter.

use std::sync::LazyLock;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use regex::Regex;

/// Any `<...>` tag.
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

/// Remove every `<...>` tag, leaving the text between tags untouched.
///
/// A tag is any `<` up to the next `>`, so prose such as `a < b and c > d`
/// loses the span between the brackets. A `<` with no later `>` is kept.
/// Entities are not decoded and no whitespace is inserted where a tag was.
pub fn strip_tags(raw: &str) -> String {
    TAG_PATTERN.replace_all(raw, "").into_owned()
}

/// Strip markdown formatting, returning plain prose text.
///
/// Drops code blocks, inline code, headings, and YAML frontmatter. Link
/// text, list items, blockquotes and emphasized text are kept without
/// their markers. Paragraphs are separated by a blank line so paragraph
/// counts survive extraction.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn strip_to_prose(text: &str) -> String {
    let text = strip_frontmatter(text);

    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(text, options);

    let mut result = String::with_capacity(text.len() / 2);
    let mut skip_depth: usize = 0;

    for event in parser {
        match event {
            Event::Start(Tag::CodeBlock(_) | Tag::Heading { .. }) => {
                skip_depth += 1;
            }
            Event::End(TagEnd::CodeBlock | TagEnd::Heading(_)) => {
                skip_depth = skip_depth.saturating_sub(1);
            }
            Event::Text(t) if skip_depth == 0 => {
                result.push_str(&t);
            }
            Event::SoftBreak | Event::HardBreak if skip_depth == 0 => {
                result.push(' ');
            }
            Event::End(TagEnd::Paragraph) if skip_depth == 0 => {
                result.push_str("\n\n");
            }
            _ => {}
        }
    }

    result.trim_end().to_string()
}

/// Strip YAML frontmatter delimited by `---` lines.
fn strip_frontmatter(text: &str) -> &str {
    let trimmed = text.trim_start();
    let Some(after_opening) = trimmed.strip_prefix("---") else {
        return text;
    };
    let Some(close_pos) = after_opening.find("\n---") else {
        return text;
    };

    let remainder = &after_opening[close_pos + 4..];
    remainder.strip_prefix('\n').unwrap_or(remainder)
}
