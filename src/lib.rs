//! Named, bidirectional field formatters.
//!
//! A [`FormatterRegistry`] maps field-type names to a [`FormatterClass`];
//! the class builds a [`Formatter`] that turns a raw value into its display
//! form and back.

pub mod config;
pub mod error;
pub mod formatter;
pub mod logging;
pub mod registry;

pub use config::FieldfmtConfig;
pub use error::FormatError;
pub use formatter::{Direction, Formatter, FormatterClass, FormatterKind};
pub use registry::{FormatterRegistry, UnknownPolicy};
