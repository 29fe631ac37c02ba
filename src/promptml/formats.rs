//! Render formats for parsed documents
//!
//! The format set is closed and small, so selection is a plain enum keyed
//! by a single lookup function rather than any open-ended registry. JSON
//! and YAML go through serde; XML has its own writer.

pub mod xml;

use std::fmt;

use crate::promptml::document::PromptDocument;

/// The supported render targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    Json,
    Yaml,
    Xml,
}

impl RenderFormat {
    /// Look up a format by name ("json", "yaml", "xml")
    pub fn from_string(name: &str) -> Result<Self, RenderError> {
        match name {
            "json" => Ok(RenderFormat::Json),
            "yaml" => Ok(RenderFormat::Yaml),
            "xml" => Ok(RenderFormat::Xml),
            other => Err(RenderError::UnknownFormat(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            RenderFormat::Json => "json",
            RenderFormat::Yaml => "yaml",
            RenderFormat::Xml => "xml",
        }
    }

    /// All available formats
    pub fn all() -> [RenderFormat; 3] {
        [RenderFormat::Json, RenderFormat::Yaml, RenderFormat::Xml]
    }
}

/// Errors that can occur while rendering a document
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    UnknownFormat(String),
    Serialize(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::UnknownFormat(name) => write!(f, "unknown render format: {}", name),
            RenderError::Serialize(message) => write!(f, "serialization failed: {}", message),
        }
    }
}

impl std::error::Error for RenderError {}

/// Render a document to the requested format
pub fn render(doc: &PromptDocument, format: RenderFormat) -> Result<String, RenderError> {
    match format {
        RenderFormat::Json => {
            serde_json::to_string_pretty(doc).map_err(|e| RenderError::Serialize(e.to_string()))
        }
        RenderFormat::Yaml => {
            serde_yaml::to_string(doc).map_err(|e| RenderError::Serialize(e.to_string()))
        }
        RenderFormat::Xml => Ok(xml::serialize_document(doc)),
    }
}

impl PromptDocument {
    /// Render this document as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, RenderError> {
        render(self, RenderFormat::Json)
    }

    /// Render this document as YAML
    pub fn to_yaml(&self) -> Result<String, RenderError> {
        render(self, RenderFormat::Yaml)
    }

    /// Render this document as pretty-printed XML
    pub fn to_xml(&self) -> Result<String, RenderError> {
        render(self, RenderFormat::Xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_lookup() {
        assert_eq!(RenderFormat::from_string("json"), Ok(RenderFormat::Json));
        assert_eq!(RenderFormat::from_string("yaml"), Ok(RenderFormat::Yaml));
        assert_eq!(RenderFormat::from_string("xml"), Ok(RenderFormat::Xml));
        assert_eq!(
            RenderFormat::from_string("toml"),
            Err(RenderError::UnknownFormat("toml".to_string()))
        );
    }

    #[test]
    fn test_format_names_round_trip() {
        for format in RenderFormat::all() {
            assert_eq!(RenderFormat::from_string(format.name()), Ok(format));
        }
    }
}
