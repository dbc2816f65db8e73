//! Frontmatter parser for extracting flat `key: value` metadata from documents.

use std::collections::BTreeMap;

/// Metadata pairs read from a frontmatter block, keyed by trimmed name.
pub type Metadata = BTreeMap<String, String>;

/// Result of splitting a raw document into metadata and body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    pub metadata: Metadata,
    pub body: String,
}

impl Frontmatter {
    /// Returns a metadata value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }
}

/// Parses a document with an optional frontmatter block.
///
/// # Format
/// ```text
/// ---
/// title: Collaborating with git
/// date: 2024-01-15
/// ---
/// Body content here...
/// ```
///
/// The block must open on the very first line. Each line inside is split on
/// its first `:`; lines without one are ignored and later keys overwrite
/// earlier ones. Values wrapped in matching quotes lose the outer pair.
///
/// A document without a complete block is not an error: the metadata is empty
/// and the body is the input unchanged. Otherwise the body is whatever follows
/// the closing delimiter, trimmed. Further blocks that follow the first with
/// only whitespace between are consumed too, later values winning, so the
/// returned body never opens with another block.
///
/// # Examples
///
/// ```
/// use noteindex::infra::parse_frontmatter;
///
/// let parsed = parse_frontmatter("---\ntitle: \"Hello, World\"\n---\n\nBody\n");
/// assert_eq!(parsed.get("title"), Some("Hello, World"));
/// assert_eq!(parsed.body, "Body");
/// ```
pub fn parse(raw: &str) -> Frontmatter {
    let content = raw.strip_prefix('\u{FEFF}').unwrap_or(raw);

    let Some((block, mut rest)) = split_block(content) else {
        return unparsed(raw);
    };
    let mut metadata = parse_block(block);

    // Blocks stacked directly after the first merge into it.
    while let Some((block, after)) = split_block(rest.trim_start()) {
        metadata.extend(parse_block(block));
        rest = after;
    }

    Frontmatter {
        metadata,
        body: rest.trim().to_string(),
    }
}

/// Splits a leading `---` block from `content`, returning the block text and
/// everything after its closing delimiter.
fn split_block(content: &str) -> Option<(&str, &str)> {
    let after_opening = if content.starts_with("---\r\n") {
        5
    } else if content.starts_with("---\n") {
        4
    } else {
        return None;
    };

    let block_and_rest = &content[after_opening..];
    let closing_pos = find_closing_delimiter(block_and_rest)?;
    Some((
        &block_and_rest[..closing_pos],
        &block_and_rest[closing_pos + 3..],
    ))
}

fn unparsed(raw: &str) -> Frontmatter {
    Frontmatter {
        metadata: Metadata::new(),
        body: raw.to_string(),
    }
}

fn parse_block(block: &str) -> Metadata {
    let mut metadata = Metadata::new();
    for line in block.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        metadata.insert(key.to_string(), unquote(value.trim()).to_string());
    }
    metadata
}

/// Strips one pair of matching outer quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Finds the position of the closing `---` delimiter.
///
/// The closing delimiter must:
/// - Appear at the start of a line
/// - Be exactly `---` followed by newline or EOF
fn find_closing_delimiter(content: &str) -> Option<usize> {
    let mut pos = 0;
    let bytes = content.as_bytes();

    while pos < bytes.len() {
        if content[pos..].starts_with("---") {
            let after = pos + 3;
            if after >= bytes.len()
                || bytes[after] == b'\n'
                || (bytes[after] == b'\r' && bytes.get(after + 1) == Some(&b'\n'))
            {
                return Some(pos);
            }
        }

        match content[pos..].find('\n') {
            Some(newline_offset) => pos += newline_offset + 1,
            None => break,
        }
    }

    None
}
