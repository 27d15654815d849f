//! Line tokenizer: raw text into classified lines.

use serde::{Deserialize, Serialize};

use super::ip::is_ip;
use super::model::SYSTEM_GROUP;

/// One classified line of hosts text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Line {
    /// An active or commented-out mapping.
    Valid(ValidLine),
    Empty,
    /// A `#[name]` group delimiter.
    Group(String),
    /// Anything else, kept as written.
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidLine {
    pub ip: String,
    pub hosts: Vec<String>,
    pub enabled: bool,
}

/// Tokenizer output: classified lines plus the raw line strings they came from.
#[derive(Debug, Clone)]
pub struct TextLines<'a> {
    pub lines: Vec<Line>,
    pub raw_lines: Vec<&'a str>,
}

/// Split text into physical lines, treating `\r\n` as `\n`.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect()
}

/// True if `token` is a group marker (`#[name]`) other than `#[System]`.
pub fn is_group(token: &str) -> bool {
    token.len() > 3
        && token.starts_with("#[")
        && token.ends_with(']')
        && token[2..token.len() - 1].trim() != SYSTEM_GROUP
}

pub fn text_to_lines(text: &str) -> TextLines<'_> {
    let raw_lines = split_lines(text);
    let lines = raw_lines.iter().map(|raw| classify(raw)).collect();
    TextLines { lines, raw_lines }
}

fn classify(raw: &str) -> Line {
    let tokens: Vec<&str> = raw.split_whitespace().collect();

    match tokens.as_slice() {
        [] => Line::Empty,
        [token] if is_group(token) => {
            let name = token[2..token.len() - 1].trim();
            Line::Group(name.to_string())
        }
        [first, ..] if tokens.len() > 1 => match parse_mapping(first, &tokens) {
            Some(valid) => Line::Valid(valid),
            None => Line::Other(raw.to_string()),
        },
        _ => Line::Other(raw.to_string()),
    }
}

/// `<ip> <host>...` or `# <ip> <host>...`; host collection stops at the first `#`.
fn parse_mapping(first: &str, tokens: &[&str]) -> Option<ValidLine> {
    let enabled = first != "#";
    let skip = if enabled { 1 } else { 2 };
    let ip = tokens.get(skip - 1)?;
    if !is_ip(ip) {
        return None;
    }

    let mut hosts = Vec::new();
    for token in &tokens[skip..] {
        if let Some(idx) = token.find('#') {
            if idx > 0 {
                hosts.push(token[..idx].to_string());
            }
            break;
        }
        hosts.push(token.to_string());
    }

    if hosts.is_empty() {
        return None;
    }
    Some(ValidLine {
        ip: ip.to_string(),
        hosts,
        enabled,
    })
}
