//! Canonical document types for parsed PromptML
//!
//! This module defines the data structures that represent the result of
//! parsing one PromptML document. The document is built once per parse call
//! and not mutated afterward; renderers consume it read-only.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// The canonical result of parsing one PromptML document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptDocument {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Free text with variable placeholders substituted
    pub context: String,
    /// Free text with variable placeholders substituted
    pub objective: String,
    /// Ordered steps, in source order; empty when the section is absent
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub instructions: Vec<String>,
    /// Ordered input/output pairs, in source order
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Example>,
    #[serde(skip_serializing_if = "Constraints::is_empty")]
    pub constraints: Constraints,
    /// Typed key/value pairs; literal form in the source decides the type
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, MetaValue>,
}

/// One worked example: an input and the expected output
///
/// Both fields are required; the grammar rejects an example that carries
/// only one of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Example {
    pub input: String,
    pub output: String,
}

/// Recognized constraint sub-blocks; absent ones are omitted, not defaulted
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Constraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<LengthRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
}

impl Constraints {
    pub fn is_empty(&self) -> bool {
        self.length.is_none() && self.tone.is_none() && self.difficulty.is_none()
    }
}

/// An inclusive length window in characters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LengthRange {
    pub min: i64,
    pub max: i64,
}

/// A metadata value with its type inferred from the literal form
///
/// Quoted literals stay strings (`"true"` is the string `true`, not a
/// boolean), bare digits become integers, digits with a decimal point become
/// floats. Serialized untagged so the numeric distinction survives into
/// JSON/YAML output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetaValue {
    String(String),
    Integer(i64),
    Float(f64),
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::String(s) => write!(f, "{}", s),
            MetaValue::Integer(n) => write!(f, "{}", n),
            // {:?} keeps the decimal point on round floats (1.0, not 1)
            MetaValue::Float(x) => write!(f, "{:?}", x),
        }
    }
}
