use serde::{Deserialize, Serialize};

use crate::error::{FormatError, Result};
use crate::registry::{normalize_name, FormatterRegistry};

use super::{
    AffixFormatter, ChainFormatter, EscapeFormatter, Formatter, FormatterKind, GroupingFormatter,
    MaskFormatter, PlainFormatter,
};

/// Characters escaped by the built-in `escape` formatter (Telegram MarkdownV2 specials)
pub const DEFAULT_ESCAPE_SET: &str = "_*[]()~`>#+-=|{}.!";
pub const DEFAULT_ESCAPE_CHAR: char = '\\';

/// Which end of the value keeps the full-size groups
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GroupAlign {
    Left,
    /// Short group first, as for thousands separators (default)
    #[default]
    Right,
}

impl GroupAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// A formatter variant together with its parameters
///
/// This is what a registry lookup returns; [`FormatterClass::instantiate`]
/// turns it into a working [`Formatter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FormatterClass {
    Plain,
    Mask {
        pattern: String,
    },
    Affix {
        #[serde(default)]
        prefix: String,
        #[serde(default)]
        suffix: String,
    },
    Grouping {
        #[serde(default = "default_group_size")]
        size: usize,
        #[serde(default = "default_separator")]
        separator: String,
        #[serde(default)]
        align: GroupAlign,
    },
    Escape {
        #[serde(default = "default_escape_set")]
        chars: String,
        #[serde(default = "default_escape_char")]
        escape: char,
    },
    Chain {
        steps: Vec<String>,
    },
}

fn default_group_size() -> usize {
    3
}

fn default_separator() -> String {
    " ".to_string()
}

fn default_escape_set() -> String {
    DEFAULT_ESCAPE_SET.to_string()
}

fn default_escape_char() -> char {
    DEFAULT_ESCAPE_CHAR
}

impl FormatterClass {
    pub fn kind(&self) -> FormatterKind {
        match self {
            Self::Plain => FormatterKind::Plain,
            Self::Mask { .. } => FormatterKind::Mask,
            Self::Affix { .. } => FormatterKind::Affix,
            Self::Grouping { .. } => FormatterKind::Grouping,
            Self::Escape { .. } => FormatterKind::Escape,
            Self::Chain { .. } => FormatterKind::Chain,
        }
    }

    /// The `escape` class with its default parameters
    pub fn default_escape() -> Self {
        Self::Escape {
            chars: default_escape_set(),
            escape: default_escape_char(),
        }
    }

    /// Check the parameters that can be verified without a registry
    pub fn validate(&self, name: &str) -> Result<()> {
        match self {
            Self::Plain | Self::Affix { .. } => Ok(()),
            Self::Mask { pattern } => MaskFormatter::validate_pattern(name, pattern),
            Self::Grouping {
                size, separator, ..
            } => {
                GroupingFormatter::new(name, *size, separator.as_str(), GroupAlign::default())?;
                Ok(())
            }
            Self::Escape { chars, .. } => {
                if chars.is_empty() {
                    Err(FormatError::invalid(name, "escape set must not be empty"))
                } else {
                    Ok(())
                }
            }
            Self::Chain { steps } => {
                if steps.is_empty() {
                    Err(FormatError::invalid(name, "chain has no steps"))
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Build a formatter for this class under `name`
    ///
    /// Chain steps are looked up in `registry`.
    pub fn instantiate(
        &self,
        name: &str,
        registry: &FormatterRegistry,
    ) -> Result<Box<dyn Formatter>> {
        let mut stack = vec![normalize_name(name)];
        self.build(name, registry, &mut stack)
    }

    fn build(
        &self,
        name: &str,
        registry: &FormatterRegistry,
        stack: &mut Vec<String>,
    ) -> Result<Box<dyn Formatter>> {
        self.validate(name)?;

        let formatter: Box<dyn Formatter> = match self {
            Self::Plain => Box::new(PlainFormatter::new(name)),
            Self::Mask { pattern } => Box::new(MaskFormatter::new(name, pattern)?),
            Self::Affix { prefix, suffix } => {
                Box::new(AffixFormatter::new(name, prefix.as_str(), suffix.as_str()))
            }
            Self::Grouping {
                size,
                separator,
                align,
            } => Box::new(GroupingFormatter::new(name, *size, separator.as_str(), *align)?),
            Self::Escape { chars, escape } => Box::new(EscapeFormatter::new(name, chars, *escape)),
            Self::Chain { steps } => {
                let mut built = Vec::with_capacity(steps.len());
                for step in steps {
                    let key = normalize_name(step);
                    if stack.contains(&key) {
                        return Err(FormatError::invalid(
                            name,
                            format!("chain cycle through '{}' ({})", key, stack.join(" -> ")),
                        ));
                    }
                    let class = registry.get(&key).ok_or_else(|| {
                        let reason = format!("chain step '{}' is not registered", step);
                        FormatError::invalid(name, reason)
                    })?;

                    stack.push(key.clone());
                    let formatter = class.build(&key, registry, stack);
                    stack.pop();
                    built.push(formatter?);
                }
                Box::new(ChainFormatter::new(name, built))
            }
        };

        Ok(formatter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mask_from_toml() {
        let class: FormatterClass = toml::from_str("kind = \"mask\"\npattern = \"## ##\"").unwrap();
        assert_eq!(
            class,
            FormatterClass::Mask {
                pattern: "## ##".to_string()
            }
        );
        assert_eq!(class.kind(), FormatterKind::Mask);
    }

    #[test]
    fn test_grouping_defaults() {
        let class: FormatterClass = toml::from_str("kind = \"grouping\"").unwrap();
        assert_eq!(
            class,
            FormatterClass::Grouping {
                size: 3,
                separator: " ".to_string(),
                align: GroupAlign::Right,
            }
        );
    }

    #[test]
    fn test_escape_defaults() {
        let class: FormatterClass = toml::from_str("kind = \"escape\"").unwrap();
        assert_eq!(class, FormatterClass::default_escape());
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(toml::from_str::<FormatterClass>("kind = \"currency\"").is_err());
    }

    #[test]
    fn test_validate() {
        assert!(FormatterClass::Plain.validate("p").is_ok());
        assert!(FormatterClass::Chain { steps: vec![] }.validate("c").is_err());
        assert!(FormatterClass::Escape {
            chars: String::new(),
            escape: '\\'
        }
        .validate("e")
        .is_err());
        assert!(FormatterClass::Mask {
            pattern: "abc".to_string()
        }
        .validate("m")
        .is_err());
    }

    #[test]
    fn test_instantiate_reports_kind() {
        let registry = FormatterRegistry::builtin();
        let class = FormatterClass::Affix {
            prefix: "kr ".to_string(),
            suffix: String::new(),
        };
        let formatter = class.instantiate("amount", &registry).unwrap();
        assert_eq!(formatter.kind(), FormatterKind::Affix);
        assert_eq!(formatter.name(), "amount");
    }
}
