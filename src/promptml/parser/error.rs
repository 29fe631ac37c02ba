//! Error types for PromptML parsing
//!
//! All grammar-level failures are fatal to the parse call: no partial
//! document is ever returned.

use crate::promptml::lexer::Token;
use chumsky::error::SimpleReason;
use chumsky::prelude::Simple;
use std::fmt;
use std::ops::Range;

/// One structural problem found while matching the grammar
#[derive(Debug, Clone, PartialEq)]
pub struct GrammarIssue {
    /// Byte range of the offending token; empty when input ended early
    pub span: Range<usize>,
    pub message: String,
}

impl fmt::Display for GrammarIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.span.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} at bytes {}..{}", self.message, self.span.start, self.span.end)
        }
    }
}

/// Errors produced while parsing a PromptML document
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Input does not conform to the section grammar
    Grammar(Vec<GrammarIssue>),
    /// Structurally valid prompt with no contribution for a mandatory section
    MissingSection(&'static str),
    /// A typed field held a literal of the wrong shape
    InvalidLiteral { field: &'static str, value: String },
}

impl ParseError {
    /// Collapse the combinator errors into grammar issues
    pub(crate) fn from_grammar_errors(errors: Vec<Simple<(Token, Range<usize>)>>) -> Self {
        let issues = errors
            .into_iter()
            .map(|error| {
                let (found, span) = match error.found() {
                    Some((token, span)) => (format!("{}", token), span.clone()),
                    None => ("end of input".to_string(), 0..0),
                };
                let message = match error.reason() {
                    SimpleReason::Custom(message) => message.clone(),
                    _ => format!("unexpected {}", found),
                };
                GrammarIssue { span, message }
            })
            .collect();
        ParseError::Grammar(issues)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Grammar(issues) => {
                write!(f, "grammar error")?;
                for issue in issues {
                    write!(f, "\n  {}", issue)?;
                }
                Ok(())
            }
            ParseError::MissingSection(section) => {
                write!(f, "prompt is missing the mandatory '{}' section", section)
            }
            ParseError::InvalidLiteral { field, value } => {
                write!(f, "invalid literal '{}' for {}", value, field)
            }
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_issue_display() {
        let issue = GrammarIssue {
            span: 4..8,
            message: "unexpected <end>".to_string(),
        };
        assert_eq!(issue.to_string(), "unexpected <end> at bytes 4..8");

        let issue = GrammarIssue {
            span: 0..0,
            message: "unexpected end of input".to_string(),
        };
        assert_eq!(issue.to_string(), "unexpected end of input");
    }

    #[test]
    fn test_parse_error_display() {
        let error = ParseError::MissingSection("context");
        assert_eq!(
            error.to_string(),
            "prompt is missing the mandatory 'context' section"
        );

        let error = ParseError::InvalidLiteral {
            field: "length min",
            value: "10.5".to_string(),
        };
        assert_eq!(error.to_string(), "invalid literal '10.5' for length min");
    }
}
