use crate::error::{FormatError, Result};

use super::{Formatter, FormatterKind, GroupAlign};

/// Splits a value into fixed-size groups joined by a separator,
/// e.g. `1234567` -> `1 234 567` (right aligned, size 3).
pub struct GroupingFormatter {
    name: String,
    size: usize,
    separator: String,
    align: GroupAlign,
}

impl GroupingFormatter {
    pub fn new(
        name: impl Into<String>,
        size: usize,
        separator: impl Into<String>,
        align: GroupAlign,
    ) -> Result<Self> {
        let name = name.into();
        let separator = separator.into();
        if size == 0 {
            return Err(FormatError::invalid(&name, "group size must be at least 1"));
        }
        if separator.is_empty() {
            return Err(FormatError::invalid(&name, "group separator must not be empty"));
        }
        Ok(Self {
            name,
            size,
            separator,
            align,
        })
    }

    fn is_separator_char(&self, ch: char) -> bool {
        self.separator.contains(ch)
    }
}

impl Formatter for GroupingFormatter {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> FormatterKind {
        FormatterKind::Grouping
    }

    fn forward(&self, text: &str) -> Result<String> {
        // A raw separator char could not be told apart from an inserted one
        if let Some(ch) = text.chars().find(|&c| self.is_separator_char(c)) {
            return Err(FormatError::malformed(
                &self.name,
                format!("value contains separator character '{}'", ch),
            ));
        }

        let chars: Vec<char> = text.chars().collect();
        if chars.len() <= self.size {
            return Ok(text.to_string());
        }

        let head = match self.align {
            GroupAlign::Left => self.size,
            GroupAlign::Right => match chars.len() % self.size {
                0 => self.size,
                n => n,
            },
        };

        let groups = chars.len() / self.size;
        let mut result = String::with_capacity(text.len() + groups * self.separator.len());
        result.extend(&chars[..head]);
        for group in chars[head..].chunks(self.size) {
            result.push_str(&self.separator);
            result.extend(group);
        }

        Ok(result)
    }

    fn reverse(&self, text: &str) -> Result<String> {
        Ok(text.replace(self.separator.as_str(), ""))
    }

    fn round_trips(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thousands() -> GroupingFormatter {
        GroupingFormatter::new("thousands", 3, " ", GroupAlign::Right).unwrap()
    }

    #[test]
    fn test_right_aligned_groups() {
        let formatter = thousands();
        assert_eq!(formatter.forward("1234567").unwrap(), "1 234 567");
        assert_eq!(formatter.forward("123456").unwrap(), "123 456");
        assert_eq!(formatter.forward("123").unwrap(), "123");
        assert_eq!(formatter.reverse("1 234 567").unwrap(), "1234567");
    }

    #[test]
    fn test_left_aligned_groups() {
        let formatter = GroupingFormatter::new("account", 4, ".", GroupAlign::Left).unwrap();
        assert_eq!(formatter.forward("12345678901").unwrap(), "1234.5678.901");
        assert_eq!(formatter.reverse("1234.5678.901").unwrap(), "12345678901");
    }

    #[test]
    fn test_multichar_separator() {
        let formatter = GroupingFormatter::new("pairs", 2, " - ", GroupAlign::Left).unwrap();
        assert_eq!(formatter.forward("abcde").unwrap(), "ab - cd - e");
        assert_eq!(formatter.reverse("ab - cd - e").unwrap(), "abcde");
    }

    #[test]
    fn test_empty_value() {
        assert_eq!(thousands().forward("").unwrap(), "");
    }

    #[test]
    fn test_separator_in_raw_value_rejected() {
        let err = thousands().forward("12 345").unwrap_err();
        assert!(err.is_input_error());
    }

    #[test]
    fn test_invalid_definition() {
        assert!(GroupingFormatter::new("bad", 0, " ", GroupAlign::Right).is_err());
        assert!(GroupingFormatter::new("bad", 3, "", GroupAlign::Right).is_err());
    }
}
