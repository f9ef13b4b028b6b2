//! Header block parsing for content files.
//!
//! Content files may start with a small key-value block fenced by `---`
//! lines:
//!
//! ```text
//! ---
//! title: "Scaling Event-Driven Services"
//! date: 2024-10-23
//! stack:
//!   - NestJS
//!   - Kafka
//! ---
//! Body text starts here.
//! ```
//!
//! The block is not YAML. The grammar is:
//!
//! - `key: value` sets a text field. Keys are a word character followed by
//!   word characters or dashes.
//! - `key:` with an empty value opens a list; following `- item` lines are
//!   appended until any other line.
//! - Values (and list items) wrapped in matching `"` or `'` are unquoted.
//! - Anything else inside the block is ignored.
//!
//! A missing or unterminated block is not an error: the whole text becomes
//! the body and the header is empty.

use std::collections::BTreeMap;

const FENCE: &str = "---";

#[derive(Debug, Clone, PartialEq)]
pub enum HeaderValue {
    Text(String),
    List(Vec<String>),
}

/// Parsed header fields, keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    fields: BTreeMap<String, HeaderValue>,
}

impl Header {
    /// A text field, if present and non-empty.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.fields.get(key) {
            Some(HeaderValue::Text(v)) if !v.is_empty() => Some(v),
            _ => None,
        }
    }

    /// A list field; empty when absent or when the key holds text.
    pub fn list(&self, key: &str) -> &[String] {
        match self.fields.get(key) {
            Some(HeaderValue::List(items)) => items,
            _ => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

/// Split raw file text into its header and body.
///
/// The body is everything after the closing fence with leading whitespace
/// trimmed (or the whole text, trimmed, when there is no header block).
pub fn parse(raw: &str) -> (Header, &str) {
    let text = raw.strip_prefix('\u{feff}').unwrap_or(raw).trim_start();
    match split_block(text) {
        Some((block, body)) => (parse_block(block), body.trim_start()),
        None => (Header::default(), text),
    }
}

/// Locate the fenced block. Returns `(block, rest)`.
fn split_block(text: &str) -> Option<(&str, &str)> {
    let rest = text.strip_prefix(FENCE)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == FENCE {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn parse_block(block: &str) -> Header {
    let mut fields = BTreeMap::new();
    let mut open_list: Option<String> = None;

    for line in block.lines() {
        if let Some(key) = &open_list {
            if let Some(item) = list_item(line) {
                if let Some(HeaderValue::List(items)) = fields.get_mut(key) {
                    items.push(unquote(item).to_string());
                }
                continue;
            }
        }

        match key_value(line) {
            Some((key, "")) => {
                fields.insert(key.to_string(), HeaderValue::List(Vec::new()));
                open_list = Some(key.to_string());
            }
            Some((key, value)) => {
                fields.insert(key.to_string(), HeaderValue::Text(unquote(value).to_string()));
                open_list = None;
            }
            None => open_list = None,
        }
    }

    Header { fields }
}

/// `  - item` → `item`
fn list_item(line: &str) -> Option<&str> {
    let item = line.trim_start().strip_prefix('-')?.trim();
    (!item.is_empty()).then_some(item)
}

/// `key: value` → `(key, value)` with the value trimmed.
fn key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim_end();
    let mut chars = key.chars();
    let valid = chars.next().is_some_and(is_word)
        && chars.all(|c| is_word(c) || c == '-');
    valid.then(|| (key, value.trim()))
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}
