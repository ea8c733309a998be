use crate::error::{FormatError, Result};

use super::{Formatter, FormatterKind};

/// Character class accepted by a mask slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// `#`
    Digit,
    /// `@`
    Letter,
    /// `*`
    Any,
}

impl Slot {
    fn accepts(&self, ch: char) -> bool {
        match self {
            Self::Digit => ch.is_ascii_digit(),
            Self::Letter => ch.is_alphabetic(),
            Self::Any => true,
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            Self::Digit => "a digit",
            Self::Letter => "a letter",
            Self::Any => "any character",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Slot(Slot),
    Literal(char),
}

/// Parse a mask pattern into tokens
///
/// `#` digit slot, `@` letter slot, `*` any-char slot, `\x` literal `x`,
/// every other character is a literal.
fn parse_pattern(name: &str, pattern: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::with_capacity(pattern.len());
    let mut chars = pattern.chars();

    while let Some(ch) = chars.next() {
        let token = match ch {
            '#' => Token::Slot(Slot::Digit),
            '@' => Token::Slot(Slot::Letter),
            '*' => Token::Slot(Slot::Any),
            '\\' => match chars.next() {
                Some(escaped) => Token::Literal(escaped),
                None => {
                    return Err(FormatError::invalid(name, "mask pattern ends with a lone '\\'"))
                }
            },
            _ => Token::Literal(ch),
        };
        tokens.push(token);
    }

    if !tokens.iter().any(|t| matches!(t, Token::Slot(_))) {
        return Err(FormatError::invalid(name, "mask pattern has no slots (#, @ or *)"));
    }

    Ok(tokens)
}

/// Input mask formatter, e.g. `## ## ## ##` or `(###) ###-####`
pub struct MaskFormatter {
    name: String,
    tokens: Vec<Token>,
}

impl MaskFormatter {
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self> {
        let name = name.into();
        let tokens = parse_pattern(&name, pattern)?;
        Ok(Self { name, tokens })
    }

    /// Check a pattern without building a formatter
    pub fn validate_pattern(name: &str, pattern: &str) -> Result<()> {
        parse_pattern(name, pattern).map(|_| ())
    }

    pub fn slot_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|t| matches!(t, Token::Slot(_)))
            .count()
    }
}

impl Formatter for MaskFormatter {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> FormatterKind {
        FormatterKind::Mask
    }

    fn forward(&self, text: &str) -> Result<String> {
        let mut result = String::with_capacity(self.tokens.len());
        // Literals are held back until a raw char needs the slot after them
        let mut pending = String::new();
        let mut chars = text.chars();
        let mut next = chars.next();

        for token in &self.tokens {
            match token {
                Token::Literal(c) => pending.push(*c),
                Token::Slot(slot) => {
                    let Some(ch) = next else {
                        return Ok(result);
                    };
                    if !slot.accepts(ch) {
                        return Err(FormatError::malformed(
                            &self.name,
                            format!("'{}' is not {}", ch, slot.describe()),
                        ));
                    }
                    result.push_str(&pending);
                    pending.clear();
                    result.push(ch);
                    next = chars.next();
                }
            }
        }

        if next.is_some() {
            return Err(FormatError::malformed(
                &self.name,
                format!("value is longer than the {} slots of the mask", self.slot_count()),
            ));
        }

        // Every slot filled: close with the trailing literals
        result.push_str(&pending);
        Ok(result)
    }

    fn reverse(&self, text: &str) -> Result<String> {
        let mut result = String::with_capacity(text.len());
        let mut chars = text.chars().peekable();

        for token in &self.tokens {
            match token {
                // Missing literals are tolerated so unformatted input reverses too
                Token::Literal(c) => {
                    if chars.peek() == Some(c) {
                        chars.next();
                    }
                }
                Token::Slot(slot) => match chars.next() {
                    None => break,
                    Some(ch) if slot.accepts(ch) => result.push(ch),
                    Some(ch) => {
                        return Err(FormatError::malformed(
                            &self.name,
                            format!("'{}' is not {}", ch, slot.describe()),
                        ))
                    }
                },
            }
        }

        let rest: String = chars.collect();
        if !rest.is_empty() {
            return Err(FormatError::malformed(
                &self.name,
                format!("unexpected trailing text '{}'", rest),
            ));
        }

        Ok(result)
    }

    fn round_trips(&self) -> bool {
        true
    }
}
