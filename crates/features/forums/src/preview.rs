//! Plain-text previews of markdown thread content.

use pulldown_cmark::{Event, Parser, TagEnd};
use std::fmt::Debug;

/// Markdown to plain text with every piece of HTML removed.
pub trait ConvertMarkdown: Debug + Send + Sync {
    fn convert_and_strip_html(&self, markdown: &str) -> String;
}

/// [`ConvertMarkdown`] backed by `pulldown-cmark`.
///
/// Raw and inline HTML are dropped; block ends become line breaks.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownConverter;

impl ConvertMarkdown for MarkdownConverter {
    fn convert_and_strip_html(&self, markdown: &str) -> String {
        let mut text = String::with_capacity(markdown.len());

        for event in Parser::new(markdown) {
            match event {
                Event::Text(chunk) | Event::Code(chunk) => text.push_str(&chunk),
                Event::SoftBreak => text.push(' '),
                Event::HardBreak => text.push('\n'),
                Event::End(
                    TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item | TagEnd::CodeBlock,
                ) => {
                    if !text.ends_with('\n') {
                        text.push('\n');
                    }
                },
                _ => {},
            }
        }

        text.trim().to_owned()
    }
}

/// Converts `markdown` and cuts the result to at most `max_length` characters.
///
/// Counts Unicode scalar values and does not look for word boundaries.
#[must_use]
pub fn preview(converter: &dyn ConvertMarkdown, markdown: &str, max_length: usize) -> String {
    truncate_chars(converter.convert_and_strip_html(markdown), max_length)
}

fn truncate_chars(mut text: String, max_length: usize) -> String {
    if let Some((byte_idx, _)) = text.char_indices().nth(max_length) {
        text.truncate(byte_idx);
    }
    text
}
