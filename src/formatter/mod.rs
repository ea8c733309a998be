mod affix;
mod chain;
mod class;
mod escape;
mod grouping;
mod mask;
mod plain;

pub use affix::AffixFormatter;
pub use chain::ChainFormatter;
pub use class::{FormatterClass, GroupAlign, DEFAULT_ESCAPE_CHAR, DEFAULT_ESCAPE_SET};
pub use escape::EscapeFormatter;
pub use grouping::GroupingFormatter;
pub use mask::MaskFormatter;
pub use plain::PlainFormatter;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// Direction of a string transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Raw value to display value
    #[default]
    Forward,
    /// Display value back to raw value
    Reverse,
}

impl Direction {
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            Self::Reverse
        } else {
            Self::Forward
        }
    }

    pub fn is_reverse(&self) -> bool {
        matches!(self, Self::Reverse)
    }

    pub fn opposite(&self) -> Self {
        match self {
            Self::Forward => Self::Reverse,
            Self::Reverse => Self::Forward,
        }
    }
}

/// Supported formatter variants
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FormatterKind {
    /// Identity transform
    Plain,
    /// Slot pattern such as `## ## ## ##`
    Mask,
    /// Fixed prefix and suffix
    Affix,
    /// Fixed-size groups joined by a separator
    Grouping,
    /// Backslash-style escaping of a character set
    Escape,
    /// Sequence of other named formatters
    Chain,
}

impl FormatterKind {
    pub const ALL: [FormatterKind; 6] = [
        Self::Plain,
        Self::Mask,
        Self::Affix,
        Self::Grouping,
        Self::Escape,
        Self::Chain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Mask => "mask",
            Self::Affix => "affix",
            Self::Grouping => "grouping",
            Self::Escape => "escape",
            Self::Chain => "chain",
        }
    }
}

impl fmt::Display for FormatterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Trait for bidirectional field formatters
pub trait Formatter: Send + Sync {
    /// Registered name, used in error messages
    fn name(&self) -> &str;

    fn kind(&self) -> FormatterKind;

    /// Convert a raw value to its display form
    fn forward(&self, text: &str) -> Result<String>;

    /// Convert a display value back to its raw form
    fn reverse(&self, text: &str) -> Result<String>;

    /// Transform `text` forward, or in reverse when `reverse` is set
    fn format_string(&self, text: &str, reverse: bool) -> Result<String> {
        self.apply(text, Direction::from_reverse(reverse))
    }

    fn apply(&self, text: &str, direction: Direction) -> Result<String> {
        match direction {
            Direction::Forward => self.forward(text),
            Direction::Reverse => self.reverse(text),
        }
    }

    /// Whether `reverse(forward(x)) == x` holds for every `x` accepted by `forward`
    fn round_trips(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_reverse() {
        assert_eq!(Direction::from_reverse(false), Direction::Forward);
        assert_eq!(Direction::from_reverse(true), Direction::Reverse);
        assert!(Direction::Reverse.is_reverse());
        assert_eq!(Direction::Forward.opposite(), Direction::Reverse);
    }

    #[test]
    fn test_kind_names_match_serde() {
        for kind in FormatterKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn test_format_string_dispatches_on_flag() {
        let formatter = AffixFormatter::new("kr", "kr ", "");
        assert_eq!(formatter.format_string("100", false).unwrap(), "kr 100");
        assert_eq!(formatter.format_string("kr 100", true).unwrap(), "100");
    }
}
