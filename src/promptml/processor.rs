//! File processing API for the PromptML format
//!
//! This module provides an API for processing PromptML files at different
//! stages (token, document) and formats (simple, json, yaml, xml).
//!
//! # Sample Sources
//!
//! The `pml_sources` module provides access to the sample PromptML files
//! under `docs/samples/`. These samples are the canonical sources for
//! PromptML content and tests should load them instead of copying content.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::promptml::document::PromptDocument;
use crate::promptml::formats::{render, RenderFormat};
use crate::promptml::lexer::tokenize;
use crate::promptml::parser::parse_document;

/// Represents the processing stage (what data to extract)
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingStage {
    Token,
    Document,
}

/// Represents the output format
#[derive(Debug, Clone, PartialEq)]
pub enum OutputFormat {
    Simple,
    Json,
    Yaml,
    Xml,
}

/// Represents a complete processing specification
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    /// Parse a format string like "token-simple" or "document-xml"
    pub fn from_string(format_str: &str) -> Result<Self, ProcessingError> {
        let parts: Vec<&str> = format_str.split('-').collect();
        if parts.len() != 2 {
            return Err(ProcessingError::InvalidFormat(format_str.to_string()));
        }

        let stage = match parts[0] {
            "token" => ProcessingStage::Token,
            "document" => ProcessingStage::Document,
            _ => return Err(ProcessingError::InvalidStage(parts[0].to_string())),
        };

        let format = match parts[1] {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "yaml" => OutputFormat::Yaml,
            "xml" => OutputFormat::Xml,
            _ => return Err(ProcessingError::InvalidFormatType(parts[1].to_string())),
        };

        // Validate stage/format compatibility
        match (&stage, &format) {
            (ProcessingStage::Token, OutputFormat::Simple | OutputFormat::Json) => {}
            (ProcessingStage::Token, _) => {
                return Err(ProcessingError::InvalidFormatType(format!(
                    "Format '{:?}' not supported for token stage (only 'simple' and 'json')",
                    format
                )))
            }
            (ProcessingStage::Document, OutputFormat::Simple) => {
                return Err(ProcessingError::InvalidFormatType(
                    "Format 'simple' only works with the token stage".to_string(),
                ))
            }
            (ProcessingStage::Document, _) => {}
        }

        Ok(ProcessingSpec { stage, format })
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        vec![
            ProcessingSpec {
                stage: ProcessingStage::Token,
                format: OutputFormat::Simple,
            },
            ProcessingSpec {
                stage: ProcessingStage::Token,
                format: OutputFormat::Json,
            },
            ProcessingSpec {
                stage: ProcessingStage::Document,
                format: OutputFormat::Json,
            },
            ProcessingSpec {
                stage: ProcessingStage::Document,
                format: OutputFormat::Yaml,
            },
            ProcessingSpec {
                stage: ProcessingStage::Document,
                format: OutputFormat::Xml,
            },
        ]
    }
}

/// Errors that can occur during processing
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingError {
    FileNotFound(String),
    InvalidFormat(String),
    InvalidStage(String),
    InvalidFormatType(String),
    IoError(String),
    Parse(String),
}

impl std::error::Error for ProcessingError {}

impl fmt::Display for ProcessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingError::FileNotFound(path) => write!(f, "File not found: {}", path),
            ProcessingError::InvalidFormat(format) => write!(f, "Invalid format: {}", format),
            ProcessingError::InvalidStage(stage) => write!(f, "Invalid stage: {}", stage),
            ProcessingError::InvalidFormatType(format_type) => {
                write!(f, "Invalid format type: {}", format_type)
            }
            ProcessingError::IoError(msg) => write!(f, "IO error: {}", msg),
            ProcessingError::Parse(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

/// Parse a PromptML file into a document
pub fn parse_file<P: AsRef<Path>>(file_path: P) -> Result<PromptDocument, ProcessingError> {
    let content = fs::read_to_string(file_path.as_ref())
        .map_err(|e| ProcessingError::IoError(e.to_string()))?;
    parse_document(&content).map_err(|e| ProcessingError::Parse(e.to_string()))
}

/// Process a PromptML file according to the given specification
pub fn process_file<P: AsRef<Path>>(
    file_path: P,
    spec: &ProcessingSpec,
) -> Result<String, ProcessingError> {
    let content = fs::read_to_string(file_path.as_ref())
        .map_err(|e| ProcessingError::IoError(e.to_string()))?;

    match spec.stage {
        ProcessingStage::Token => {
            let tokens = tokenize(&content);
            match spec.format {
                OutputFormat::Simple => {
                    let lines: Vec<String> =
                        tokens.iter().map(|token| format!("{}", token)).collect();
                    Ok(lines.join("\n"))
                }
                OutputFormat::Json => serde_json::to_string_pretty(&tokens)
                    .map_err(|e| ProcessingError::IoError(e.to_string())),
                _ => Err(ProcessingError::InvalidFormatType(
                    "Only simple and json formats are supported for the token stage".to_string(),
                )),
            }
        }
        ProcessingStage::Document => {
            let doc =
                parse_document(&content).map_err(|e| ProcessingError::Parse(e.to_string()))?;
            let format = match spec.format {
                OutputFormat::Json => RenderFormat::Json,
                OutputFormat::Yaml => RenderFormat::Yaml,
                OutputFormat::Xml => RenderFormat::Xml,
                OutputFormat::Simple => {
                    return Err(ProcessingError::InvalidFormatType(
                        "Format 'simple' only works with the token stage".to_string(),
                    ))
                }
            };
            render(&doc, format).map_err(|e| ProcessingError::Parse(e.to_string()))
        }
    }
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .into_iter()
        .map(|spec| {
            format!(
                "{}-{}",
                match spec.stage {
                    ProcessingStage::Token => "token",
                    ProcessingStage::Document => "document",
                },
                match spec.format {
                    OutputFormat::Simple => "simple",
                    OutputFormat::Json => "json",
                    OutputFormat::Yaml => "yaml",
                    OutputFormat::Xml => "xml",
                }
            )
        })
        .collect()
}

/// Sample sources module for accessing the PromptML sample files
pub mod pml_sources {
    use super::*;

    /// Available sample files (canonical sources)
    pub const AVAILABLE_SAMPLES: &[&str] = &[
        "000-minimal.pml",
        "010-sections.pml",
        "020-variables.pml",
        "030-conditional.pml",
    ];

    /// Main interface for accessing PromptML sample files
    pub struct PmlSources;

    impl PmlSources {
        fn samples_dir() -> &'static str {
            "docs/samples"
        }

        fn sample_path(filename: &str) -> String {
            format!("{}/{}", Self::samples_dir(), filename)
        }

        fn validate_sample(filename: &str) -> Result<(), ProcessingError> {
            if !AVAILABLE_SAMPLES.contains(&filename) {
                return Err(ProcessingError::FileNotFound(format!(
                    "Sample '{}' is not available. Available samples: {:?}",
                    filename, AVAILABLE_SAMPLES
                )));
            }
            Ok(())
        }

        /// Get sample content as a raw string
        pub fn get_string(filename: &str) -> Result<String, ProcessingError> {
            Self::validate_sample(filename)?;
            let path = Self::sample_path(filename);
            fs::read_to_string(&path)
                .map_err(|e| ProcessingError::IoError(format!("Failed to read {}: {}", path, e)))
        }

        /// Get a sample parsed into a document
        pub fn get_document(filename: &str) -> Result<PromptDocument, ProcessingError> {
            let content = Self::get_string(filename)?;
            parse_document(&content).map_err(|e| ProcessingError::Parse(e.to_string()))
        }

        /// List all available sample files
        pub fn list_samples() -> Vec<&'static str> {
            AVAILABLE_SAMPLES.to_vec()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_get_string_sample() {
            let content = PmlSources::get_string("000-minimal.pml").unwrap();
            assert!(content.contains("@prompt"));
            assert!(content.contains("@context"));
        }

        #[test]
        fn test_validate_sample() {
            assert!(PmlSources::get_string("missing-sample.pml").is_err());
        }

        #[test]
        fn test_all_samples_parse() {
            for sample in PmlSources::list_samples() {
                let doc = PmlSources::get_document(sample);
                assert!(doc.is_ok(), "Sample {} should parse: {:?}", sample, doc);
            }
        }
    }
}
