//! # promptml
//!
//! A parser for PromptML, a small markup language for describing prompt
//! documents: named sections (context, objective, instructions, examples,
//! constraints, metadata), variable substitution, and a single-level
//! conditional over variable bindings.
//!
//! Parsed documents can be rendered to JSON, YAML, or XML.

pub mod promptml;

pub use promptml::document::{Constraints, Example, LengthRange, MetaValue, PromptDocument};
pub use promptml::formats::{render, RenderError, RenderFormat};
pub use promptml::parser::{parse_document, ParseError};
