//! Name-keyed registry of formatter classes
//!
//! Field-type names map to a [`FormatterClass`]. The registry is filled at
//! start-up (built-ins first, then the user's configuration) and then used
//! read-only, optionally through the process-wide instance returned by
//! [`global`].
//!
//! # Example
//!
//! ```
//! use fieldfmt::{FormatterClass, FormatterRegistry};
//!
//! let mut registry = FormatterRegistry::builtin();
//! registry
//!     .register("phone", FormatterClass::Mask { pattern: "## ## ## ##".into() })
//!     .unwrap();
//!
//! let shown = registry.format_string("phone", "12345678", false).unwrap();
//! assert_eq!(shown, "12 34 56 78");
//! assert_eq!(registry.format_string("phone", &shown, true).unwrap(), "12345678");
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::config::FieldfmtConfig;
use crate::error::{FormatError, Result};
use crate::formatter::{Formatter, FormatterClass, FormatterKind};

/// What a lookup does with a name nobody registered
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnknownPolicy {
    /// Fail with [`FormatError::UnknownFormatter`] (default)
    #[default]
    Error,
    /// Fall back to the identity formatter
    Plain,
}

/// Normalize a formatter name for lookup: trimmed and ASCII-lowercased
pub fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

#[derive(Debug, Clone, Default)]
pub struct FormatterRegistry {
    classes: BTreeMap<String, FormatterClass>,
    unknown: UnknownPolicy,
}

impl FormatterRegistry {
    /// An empty registry
    pub fn new(unknown: UnknownPolicy) -> Self {
        Self {
            classes: BTreeMap::new(),
            unknown,
        }
    }

    /// Registry holding the built-in `plain` and `escape` formatters
    pub fn builtin() -> Self {
        let mut registry = Self::new(UnknownPolicy::default());
        registry
            .classes
            .insert(FormatterKind::Plain.to_string(), FormatterClass::Plain);
        registry
            .classes
            .insert(FormatterKind::Escape.to_string(), FormatterClass::default_escape());
        registry
    }

    /// Built-ins plus every formatter defined in `config`
    ///
    /// Each definition is validated, names that collide after normalization
    /// are rejected, and chains are instantiated once so
    /// missing steps and cycles surface here instead of at first use.
    pub fn from_config(config: &FieldfmtConfig) -> Result<Self> {
        let mut registry = Self::builtin();
        registry.unknown = config.registry.unknown;

        // Keys that only differ in case or padding would silently replace each other
        let mut defined: BTreeMap<String, &str> = BTreeMap::new();
        for (name, class) in &config.formatters {
            let key = normalize_name(name);
            if let Some(first) = defined.insert(key.clone(), name.as_str()) {
                return Err(FormatError::invalid(
                    &key,
                    format!("defined more than once (as '{}' and '{}')", first, name),
                ));
            }
            registry.register(name, class.clone())?;
        }

        for (name, class) in &registry.classes {
            if class.kind() == FormatterKind::Chain {
                class.instantiate(name, &registry)?;
            }
        }

        tracing::debug!(
            component = "registry",
            formatters = registry.classes.len(),
            unknown = ?registry.unknown,
            "Formatter registry built"
        );

        Ok(registry)
    }

    pub fn unknown_policy(&self) -> UnknownPolicy {
        self.unknown
    }

    pub fn set_unknown_policy(&mut self, unknown: UnknownPolicy) {
        self.unknown = unknown;
    }

    /// Register `class` under `name`, replacing any previous entry
    pub fn register(&mut self, name: &str, class: FormatterClass) -> Result<()> {
        let key = normalize_name(name);
        if key.is_empty() {
            return Err(FormatError::InvalidName);
        }
        class.validate(&key)?;

        if let Some(previous) = self.classes.insert(key.clone(), class) {
            tracing::debug!(
                component = "registry",
                name = %key,
                previous = %previous.kind(),
                "Replaced formatter definition"
            );
        }
        Ok(())
    }

    /// Exact lookup, ignoring the unknown-name policy
    pub fn get(&self, name: &str) -> Option<&FormatterClass> {
        self.classes.get(&normalize_name(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Resolve the formatter class that handles `name`
    pub fn formatter_class(&self, name: &str) -> Result<FormatterClass> {
        let key = normalize_name(name);
        if key.is_empty() {
            return Err(FormatError::InvalidName);
        }

        match (self.classes.get(&key), self.unknown) {
            (Some(class), _) => Ok(class.clone()),
            (None, UnknownPolicy::Plain) => {
                tracing::debug!(
                    component = "registry",
                    name = %key,
                    "Unknown formatter, falling back to plain"
                );
                Ok(FormatterClass::Plain)
            }
            (None, UnknownPolicy::Error) => Err(FormatError::UnknownFormatter { name: key }),
        }
    }

    /// Resolve and build the formatter for `name`
    pub fn formatter(&self, name: &str) -> Result<Box<dyn Formatter>> {
        let class = self.formatter_class(name)?;
        class.instantiate(&normalize_name(name), self)
    }

    /// Transform `text` with the formatter registered under `name`
    pub fn format_string(&self, name: &str, text: &str, reverse: bool) -> Result<String> {
        self.formatter(name)?.format_string(text, reverse)
    }

    /// Registered names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    /// Registered names with their classes, sorted by name
    pub fn entries(&self) -> impl Iterator<Item = (&str, &FormatterClass)> {
        self.classes.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

static GLOBAL: OnceLock<FormatterRegistry> = OnceLock::new();

/// Install the process-wide registry; only the first call succeeds
pub fn install(registry: FormatterRegistry) -> Result<()> {
    GLOBAL
        .set(registry)
        .map_err(|_| FormatError::AlreadyInstalled)
}

/// The process-wide registry, or the built-ins when nothing was installed
pub fn global() -> &'static FormatterRegistry {
    GLOBAL.get_or_init(FormatterRegistry::builtin)
}
