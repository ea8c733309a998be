use crate::error::Result;

use super::{Formatter, FormatterKind};

/// Wraps a value in a fixed prefix and suffix, e.g. `kr 100` or `42 %`.
/// An empty value stays empty in both directions.
pub struct AffixFormatter {
    name: String,
    prefix: String,
    suffix: String,
}

impl AffixFormatter {
    pub fn new(
        name: impl Into<String>,
        prefix: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }
}

impl Formatter for AffixFormatter {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> FormatterKind {
        FormatterKind::Affix
    }

    fn forward(&self, text: &str) -> Result<String> {
        if text.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("{}{}{}", self.prefix, text, self.suffix))
    }

    fn reverse(&self, text: &str) -> Result<String> {
        let text = text.strip_prefix(self.prefix.as_str()).unwrap_or(text);
        let text = text.strip_suffix(self.suffix.as_str()).unwrap_or(text);
        Ok(text.to_string())
    }

    fn round_trips(&self) -> bool {
        true
    }
}
