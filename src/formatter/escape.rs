use crate::error::{FormatError, Result};

use super::{Formatter, FormatterKind};

/// Escaping formatter
/// Prefixes every character of a configured set with an escape character.
/// The escape character itself is always escaped so the reverse is exact.
pub struct EscapeFormatter {
    name: String,
    chars: Vec<char>,
    escape: char,
}

impl EscapeFormatter {
    pub fn new(name: impl Into<String>, chars: &str, escape: char) -> Self {
        Self {
            name: name.into(),
            chars: chars.chars().collect(),
            escape,
        }
    }

    fn needs_escape(&self, ch: char) -> bool {
        ch == self.escape || self.chars.contains(&ch)
    }
}

impl Formatter for EscapeFormatter {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> FormatterKind {
        FormatterKind::Escape
    }

    fn forward(&self, text: &str) -> Result<String> {
        let mut result = String::with_capacity(text.len() + 10);
        for ch in text.chars() {
            if self.needs_escape(ch) {
                result.push(self.escape);
            }
            result.push(ch);
        }
        Ok(result)
    }

    fn reverse(&self, text: &str) -> Result<String> {
        let mut result = String::with_capacity(text.len());
        let mut chars = text.chars();

        while let Some(ch) = chars.next() {
            if ch != self.escape {
                result.push(ch);
                continue;
            }
            match chars.next() {
                Some(escaped) => result.push(escaped),
                None => {
                    return Err(FormatError::malformed(
                        &self.name,
                        format!("dangling escape character '{}'", self.escape),
                    ))
                }
            }
        }

        Ok(result)
    }

    fn round_trips(&self) -> bool {
        true
    }
}
