// envvar-rs: Persistent Environment Variable Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `KEY=VALUE` environment file codec.
//!
//! ```text
//! # comment            --> kept verbatim
//! PATH=/usr/bin        --> raw value
//! GREETING="a \"b\"#c" --> double-quoted, \\ \" \n \r \t escapes
//! NAME='literal'       --> single-quoted, no escapes
//! ```
//!
//! Rewriting keeps comments, blank lines and unparseable lines in place.
//! When a name is defined twice the later definition wins and the earlier
//! line is dropped.

use std::borrow::Cow;
use std::fmt::Write as _;

use super::EnvVarEntry;
use super::entry::EnvKey;

#[derive(Debug, Clone)]
enum Line {
    Entry { name: EnvKey, value: String },
    Verbatim(String),
}

/// A parsed environment file.
#[derive(Debug, Clone, Default)]
pub struct EnvFile {
    lines: Vec<Line>,
}

impl EnvFile {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Parses file content. Never fails; lines that are not assignments are
    /// kept verbatim.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut file = Self::new();
        for line in text.lines() {
            match parse_assignment(line) {
                Some((name, value)) => {
                    file.remove(name);
                    file.lines.push(Line::Entry {
                        name: EnvKey::new(name),
                        value,
                    });
                }
                None => file.lines.push(Line::Verbatim(line.to_string())),
            }
        }
        file
    }

    /// Entries in file order.
    #[must_use]
    pub fn entries(&self) -> Vec<EnvVarEntry> {
        self.lines
            .iter()
            .filter_map(|line| match line {
                Line::Entry { name, value } => Some(EnvVarEntry::new(name.as_str(), value.clone())),
                Line::Verbatim(_) => None,
            })
            .collect()
    }

    /// Looks up `name` case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).and_then(|i| match &self.lines[i] {
            Line::Entry { value, .. } => Some(value.as_str()),
            Line::Verbatim(_) => None,
        })
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| matches!(line, Line::Entry { .. }))
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Creates or overwrites `name`; an existing line keeps its position and
    /// spelling.
    pub fn set(&mut self, name: &str, value: &str) {
        if let Some(i) = self.position(name) {
            if let Line::Entry { value: existing, .. } = &mut self.lines[i] {
                value.clone_into(existing);
            }
        } else {
            self.lines.push(Line::Entry {
                name: EnvKey::new(name),
                value: value.to_string(),
            });
        }
    }

    /// Removes `name`, returning whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.position(name).is_some_and(|i| {
            self.lines.remove(i);
            true
        })
    }

    /// Removes every entry, keeping comments and blank lines.
    pub fn clear(&mut self) {
        self.lines.retain(|line| matches!(line, Line::Verbatim(_)));
    }

    /// Renders the file, one line per entry, with a trailing newline.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            match line {
                Line::Entry { name, value } => {
                    let _ = writeln!(out, "{}={}", name.as_str(), format_value(value));
                }
                Line::Verbatim(text) => {
                    out.push_str(text);
                    out.push('\n');
                }
            }
        }
        out
    }

    fn position(&self, name: &str) -> Option<usize> {
        let key = EnvKey::new(name);
        self.lines
            .iter()
            .position(|line| matches!(line, Line::Entry { name: existing, .. } if *existing == key))
    }
}

/// Checks that `name` reads back as the same assignment once written.
///
/// # Errors
///
/// Returns the reason a name cannot be stored on an assignment line.
pub fn check_name(name: &str) -> Result<(), &'static str> {
    if name.starts_with('#') {
        return Err("starts with '#'");
    }
    if name.contains(char::is_whitespace) {
        return Err("contains whitespace");
    }
    Ok(())
}

/// Splits an assignment line into name and decoded value.
fn parse_assignment(line: &str) -> Option<(&str, String)> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }

    let (left, right) = trimmed.split_once('=')?;
    let left = left.trim_end();
    let name = left.strip_prefix("export ").map_or(left, str::trim_start);
    if name.is_empty() || name.contains(char::is_whitespace) {
        return None;
    }

    Some((name, parse_value(right.trim())))
}

/// Decodes a value as written in an environment file.
#[must_use]
pub fn parse_value(raw: &str) -> String {
    if raw.len() >= 2 {
        if let Some(inner) = raw.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
            return unescape(inner);
        }
        if let Some(inner) = raw.strip_prefix('\'').and_then(|r| r.strip_suffix('\'')) {
            return inner.to_string();
        }
    }
    raw.to_string()
}

/// Encodes a value so that [`parse_value`] returns it unchanged.
#[must_use]
pub fn format_value(value: &str) -> Cow<'_, str> {
    if !needs_quoting(value) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    Cow::Owned(out)
}

fn needs_quoting(value: &str) -> bool {
    value.trim() != value
        || value.starts_with(['"', '\''])
        || value.contains(['\n', '\r', '\t', '#'])
}

fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some(escaped @ ('"' | '\\')) => out.push(escaped),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
