//! Parser module for the PromptML format
//!
//! The pipeline is: tokenize the source, match it against the section
//! grammar, fold the resulting tree into a draft document plus variable
//! bindings, then substitute placeholders in the free-text fields. Each
//! parse call is self-contained and deterministic; a failed parse returns
//! no partial document.

pub mod error;
pub mod grammar;
pub mod transform;
pub mod tree;

use chumsky::Parser;

pub use error::{GrammarIssue, ParseError};
pub use transform::{PromptDraft, VarBindings};
pub use tree::DocumentNode;

use crate::promptml::document::PromptDocument;
use crate::promptml::lexer::tokenize_with_spans;
use crate::promptml::resolver;

/// Parse source text into a PromptML document
///
/// This is the primary entry point. Fails with a grammar error on malformed
/// input; placeholders without a matching binding are left verbatim.
pub fn parse_document(source: &str) -> Result<PromptDocument, ParseError> {
    let (draft, bindings) = parse_draft(source)?;
    Ok(resolver::resolve(draft, &bindings))
}

/// Parse source text up to the draft stage, before placeholder substitution
pub fn parse_draft(source: &str) -> Result<(PromptDraft, VarBindings), ParseError> {
    let tree = parse_tree(source)?;
    transform::fold_document(source, tree)
}

/// Parse source text into the raw section tree
pub fn parse_tree(source: &str) -> Result<DocumentNode, ParseError> {
    let tokens = tokenize_with_spans(source);
    grammar::document()
        .parse(tokens)
        .map_err(ParseError::from_grammar_errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_document_substitutes_variables() {
        let doc = parse_document(
            "@vars greeting = \"Hello\" @end\n\
             @prompt @context $greeting, world @end @objective o @end @end",
        )
        .unwrap();
        assert_eq!(doc.context, "Hello, world");
    }

    #[test]
    fn test_parse_draft_leaves_placeholders() {
        let (draft, bindings) = parse_draft(
            "@vars greeting = \"Hello\" @end\n\
             @prompt @context $greeting, world @end @objective o @end @end",
        )
        .unwrap();
        assert_eq!(draft.context, "$greeting, world");
        assert_eq!(bindings.get("greeting").map(String::as_str), Some("Hello"));
    }

    #[test]
    fn test_grammar_error_carries_issue() {
        let error = parse_document("@prompt @context c @end").unwrap_err();
        match error {
            ParseError::Grammar(issues) => assert!(!issues.is_empty()),
            other => panic!("expected grammar error, got {:?}", other),
        }
    }
}
