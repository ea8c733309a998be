use crate::error::Result;

use super::{Formatter, FormatterKind};

/// Plain formatter - passes text through without modification
pub struct PlainFormatter {
    name: String,
}

impl PlainFormatter {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Formatter for PlainFormatter {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> FormatterKind {
        FormatterKind::Plain
    }

    fn forward(&self, text: &str) -> Result<String> {
        Ok(text.to_string())
    }

    fn reverse(&self, text: &str) -> Result<String> {
        Ok(text.to_string())
    }

    fn round_trips(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_both_ways() {
        let formatter = PlainFormatter::new("plain");
        assert_eq!(formatter.forward("Hello world").unwrap(), "Hello world");
        assert_eq!(formatter.reverse("  spaced ").unwrap(), "  spaced ");
        assert!(formatter.round_trips());
    }
}
