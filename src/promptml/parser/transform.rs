//! Fold of the parse tree into a draft document plus variable bindings
//!
//! Each tree node kind has one assembly rule, dispatched by an explicit
//! match: leaf text trims surrounding whitespace, steps and examples keep
//! source order, constraints and metadata merge with last-occurrence-wins,
//! and the conditional folds exactly one branch (or none, when the test is
//! false and no else exists).
//!
//! Bindings are collected here and passed onward explicitly; nothing about
//! a parse call survives it.

use std::collections::{BTreeMap, HashMap};
use std::ops::Range;

use super::error::ParseError;
use super::tree::{
    ConditionalNode, ConstraintNode, DocumentNode, LiteralNode, PromptItem, SectionNode,
};
use crate::promptml::document::{Constraints, Example, LengthRange, MetaValue};

/// Variable bindings collected from the vars block, quote-stripped
pub type VarBindings = HashMap<String, String>;

/// The document as assembled from the tree, before placeholder substitution
#[derive(Debug, Clone, PartialEq)]
pub struct PromptDraft {
    pub title: Option<String>,
    pub context: String,
    pub objective: String,
    pub instructions: Vec<String>,
    pub examples: Vec<Example>,
    pub constraints: Constraints,
    pub metadata: BTreeMap<String, MetaValue>,
}

/// Working state while folding sections; context/objective stay optional
/// until the mandatory-section check at the end
#[derive(Debug, Default)]
struct SectionAccumulator {
    title: Option<String>,
    context: Option<String>,
    objective: Option<String>,
    instructions: Vec<String>,
    examples: Vec<Example>,
    constraints: Constraints,
    metadata: BTreeMap<String, MetaValue>,
}

/// Fold a parse tree into a draft document and its variable bindings
///
/// A prompt whose sections (after conditional resolution) never contribute
/// `context` or `objective` is rejected here; an empty section body is fine
/// and yields an empty string.
pub fn fold_document(
    source: &str,
    tree: DocumentNode,
) -> Result<(PromptDraft, VarBindings), ParseError> {
    let mut bindings = VarBindings::new();
    for var in tree.vars {
        // Redefinition: last binding wins
        bindings.insert(var.name, strip_quotes(&var.value).to_string());
    }

    let mut acc = SectionAccumulator::default();
    for item in tree.items {
        match item {
            PromptItem::Section(section) => fold_section(source, section, &mut acc)?,
            PromptItem::Conditional(cond) => fold_conditional(source, cond, &bindings, &mut acc)?,
        }
    }

    let draft = PromptDraft {
        title: acc.title,
        context: acc
            .context
            .ok_or(ParseError::MissingSection("context"))?,
        objective: acc
            .objective
            .ok_or(ParseError::MissingSection("objective"))?,
        instructions: acc.instructions,
        examples: acc.examples,
        constraints: acc.constraints,
        metadata: acc.metadata,
    };

    Ok((draft, bindings))
}

/// Evaluate the conditional's equality test and fold only the taken branch
fn fold_conditional(
    source: &str,
    cond: ConditionalNode,
    bindings: &VarBindings,
    acc: &mut SectionAccumulator,
) -> Result<(), ParseError> {
    let operand = strip_quotes(&cond.operand);
    let taken = if bindings.get(&cond.variable).map(String::as_str) == Some(operand) {
        cond.then_branch
    } else {
        cond.else_branch
    };

    for section in taken {
        fold_section(source, section, acc)?;
    }
    Ok(())
}

/// Apply one section's assembly rule to the accumulator
fn fold_section(
    source: &str,
    section: SectionNode,
    acc: &mut SectionAccumulator,
) -> Result<(), ParseError> {
    match section {
        SectionNode::Title(spans) => {
            acc.title = Some(strip_outer_quotes(&extract_text(source, &spans)).to_string());
        }
        SectionNode::Context(spans) => {
            acc.context = Some(extract_text(source, &spans));
        }
        SectionNode::Objective(spans) => {
            acc.objective = Some(extract_text(source, &spans));
        }
        SectionNode::Instructions(steps) => {
            acc.instructions = steps
                .iter()
                .map(|spans| extract_text(source, spans))
                .collect();
        }
        SectionNode::Examples(nodes) => {
            acc.examples = nodes
                .iter()
                .map(|node| Example {
                    input: extract_text(source, &node.input),
                    output: extract_text(source, &node.output),
                })
                .collect();
        }
        SectionNode::Constraints(nodes) => {
            for node in nodes {
                match node {
                    ConstraintNode::Length { min, max } => {
                        acc.constraints.length = Some(LengthRange {
                            min: parse_bound("length min", &min)?,
                            max: parse_bound("length max", &max)?,
                        });
                    }
                    ConstraintNode::Tone(spans) => {
                        acc.constraints.tone =
                            Some(strip_outer_quotes(&extract_text(source, &spans)).to_string());
                    }
                    ConstraintNode::Difficulty(spans) => {
                        acc.constraints.difficulty =
                            Some(strip_outer_quotes(&extract_text(source, &spans)).to_string());
                    }
                }
            }
        }
        SectionNode::Metadata(props) => {
            for prop in props {
                // Duplicate keys: last occurrence wins
                acc.metadata.insert(prop.key, infer_value(prop.value));
            }
        }
    }
    Ok(())
}

/// Recover a free-text run from the source and trim its edges
///
/// The spans cover every token of the run, so slicing from the first start
/// to the last end preserves interior whitespace and line breaks exactly.
pub(crate) fn extract_text(source: &str, spans: &[Range<usize>]) -> String {
    match (spans.first(), spans.last()) {
        (Some(first), Some(last)) => source[first.start..last.end].trim().to_string(),
        _ => String::new(),
    }
}

/// Infer a metadata value's type from its literal form
fn infer_value(literal: LiteralNode) -> MetaValue {
    match literal {
        LiteralNode::Str(raw) => MetaValue::String(strip_quotes(&raw).to_string()),
        LiteralNode::Number(raw) => {
            if raw.contains('.') {
                MetaValue::Float(raw.parse().unwrap_or(f64::NAN))
            } else {
                match raw.parse::<i64>() {
                    Ok(n) => MetaValue::Integer(n),
                    // Integer literal too large for i64: fall back to float
                    Err(_) => MetaValue::Float(raw.parse().unwrap_or(f64::NAN)),
                }
            }
        }
    }
}

/// Parse a length bound, which must be a bare integer
fn parse_bound(field: &'static str, raw: &str) -> Result<i64, ParseError> {
    raw.parse().map_err(|_| ParseError::InvalidLiteral {
        field,
        value: raw.to_string(),
    })
}

/// Strip the surrounding quotes of a string literal token
fn strip_quotes(raw: &str) -> &str {
    raw.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(raw)
}

/// Strip one surrounding quote pair when an entire text run is quoted
///
/// Lets `@tone "Professional" @end` and `@tone Professional @end` fold to
/// the same value; text that merely contains quotes is left alone.
fn strip_outer_quotes(text: &str) -> &str {
    if text.len() >= 2 && text.starts_with('"') && text.ends_with('"') {
        let inner = &text[1..text.len() - 1];
        if !inner.contains('"') {
            return inner;
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::promptml::lexer::tokenize_with_spans;
    use crate::promptml::parser::grammar;
    use chumsky::Parser;

    fn fold(source: &str) -> Result<(PromptDraft, VarBindings), ParseError> {
        let tree = grammar::document()
            .parse(tokenize_with_spans(source))
            .map_err(ParseError::from_grammar_errors)?;
        fold_document(source, tree)
    }

    #[test]
    fn test_text_extraction_trims_edges_only() {
        let source = "@prompt @context   spaced   out   @end @objective o @end @end";
        let (draft, _) = fold(source).unwrap();
        assert_eq!(draft.context, "spaced   out");
    }

    #[test]
    fn test_multiline_text_keeps_interior_breaks() {
        let source = "@prompt @context\n    line one\n    line two\n@end @objective o @end @end";
        let (draft, _) = fold(source).unwrap();
        assert_eq!(draft.context, "line one\n    line two");
    }

    #[test]
    fn test_empty_context_is_empty_string_not_error() {
        let (draft, _) = fold("@prompt @context @end @objective o @end @end").unwrap();
        assert_eq!(draft.context, "");
    }

    #[test]
    fn test_missing_context_is_an_error() {
        let result = fold("@prompt @objective o @end @end");
        assert_eq!(result.unwrap_err(), ParseError::MissingSection("context"));
    }

    #[test]
    fn test_missing_objective_is_an_error() {
        let result = fold("@prompt @context c @end @end");
        assert_eq!(result.unwrap_err(), ParseError::MissingSection("objective"));
    }

    #[test]
    fn test_bindings_are_quote_stripped() {
        let (_, bindings) = fold(
            "@vars greeting = \"Hello\" @end @prompt @context c @end @objective o @end @end",
        )
        .unwrap();
        assert_eq!(bindings.get("greeting").map(String::as_str), Some("Hello"));
    }

    #[test]
    fn test_binding_redefinition_last_wins() {
        let (_, bindings) = fold(
            "@vars x = \"first\" x = \"second\" @end @prompt @context c @end @objective o @end @end",
        )
        .unwrap();
        assert_eq!(bindings.get("x").map(String::as_str), Some("second"));
    }

    #[test]
    fn test_step_order_is_preserved() {
        let (draft, _) = fold(
            "@prompt @context c @end @objective o @end \
             @instructions @step alpha @end @step beta @end @step gamma @end @end @end",
        )
        .unwrap();
        assert_eq!(draft.instructions, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_example_order_is_preserved() {
        let (draft, _) = fold(
            "@prompt @context c @end @objective o @end @examples \
             @example @input i1 @end @output o1 @end @end \
             @example @input i2 @end @output o2 @end @end \
             @end @end",
        )
        .unwrap();
        assert_eq!(
            draft.examples,
            vec![
                Example {
                    input: "i1".to_string(),
                    output: "o1".to_string()
                },
                Example {
                    input: "i2".to_string(),
                    output: "o2".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_constraints_assembly() {
        let (draft, _) = fold(
            "@prompt @context c @end @objective o @end \
             @constraints @length min: 1000 max: 3000 @end \
             @tone Professional and technical @end @end @end",
        )
        .unwrap();
        assert_eq!(
            draft.constraints.length,
            Some(LengthRange {
                min: 1000,
                max: 3000
            })
        );
        assert_eq!(
            draft.constraints.tone.as_deref(),
            Some("Professional and technical")
        );
        assert_eq!(draft.constraints.difficulty, None);
    }

    #[test]
    fn test_quoted_tone_is_unquoted() {
        let (draft, _) = fold(
            "@prompt @context c @end @objective o @end \
             @constraints @tone \"Professional and technical\" @end @end @end",
        )
        .unwrap();
        assert_eq!(
            draft.constraints.tone.as_deref(),
            Some("Professional and technical")
        );
    }

    #[test]
    fn test_duplicate_constraint_sub_block_last_wins() {
        let (draft, _) = fold(
            "@prompt @context c @end @objective o @end \
             @constraints @tone calm @end @tone stern @end @end @end",
        )
        .unwrap();
        assert_eq!(draft.constraints.tone.as_deref(), Some("stern"));
    }

    #[test]
    fn test_length_rejects_decimal_bound() {
        let result = fold(
            "@prompt @context c @end @objective o @end \
             @constraints @length min: 10.5 max: 20 @end @end @end",
        );
        assert_eq!(
            result.unwrap_err(),
            ParseError::InvalidLiteral {
                field: "length min",
                value: "10.5".to_string()
            }
        );
    }

    #[test]
    fn test_metadata_type_inference() {
        let (draft, _) = fold(
            "@prompt @context c @end @objective o @end \
             @metadata top_p: 0.6 n: 1 internal: \"true\" @end @end",
        )
        .unwrap();
        assert_eq!(draft.metadata.get("top_p"), Some(&MetaValue::Float(0.6)));
        assert_eq!(draft.metadata.get("n"), Some(&MetaValue::Integer(1)));
        assert_eq!(
            draft.metadata.get("internal"),
            Some(&MetaValue::String("true".to_string()))
        );
    }

    #[test]
    fn test_metadata_huge_integer_falls_back_to_float() {
        let (draft, _) = fold(
            "@prompt @context c @end @objective o @end \
             @metadata big: 99999999999999999999999999 @end @end",
        )
        .unwrap();
        match draft.metadata.get("big") {
            Some(MetaValue::Float(x)) => assert!(*x > 9.9e24),
            other => panic!("expected float fallback, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_metadata_key_last_wins() {
        let (draft, _) = fold(
            "@prompt @context c @end @objective o @end \
             @metadata n: 1 n: 2 @end @end",
        )
        .unwrap();
        assert_eq!(draft.metadata.get("n"), Some(&MetaValue::Integer(2)));
    }

    #[test]
    fn test_title_surfaces_at_top_level() {
        let (draft, _) = fold(
            "@prompt @title \"Conditional Prompt Example\" @end \
             @context c @end @objective o @end @end",
        )
        .unwrap();
        assert_eq!(draft.title.as_deref(), Some("Conditional Prompt Example"));
    }

    #[test]
    fn test_conditional_takes_then_branch_on_match() {
        let (draft, _) = fold(
            "@vars mode = \"fast\" @end @prompt @objective o @end \
             @if mode == \"fast\" { @context quick @end } @else { @context slow @end } @end",
        )
        .unwrap();
        assert_eq!(draft.context, "quick");
    }

    #[test]
    fn test_conditional_takes_else_branch_on_mismatch() {
        let (draft, _) = fold(
            "@vars mode = \"slow\" @end @prompt @objective o @end \
             @if mode == \"fast\" { @context quick @end } @else { @context slow @end } @end",
        )
        .unwrap();
        assert_eq!(draft.context, "slow");
    }

    #[test]
    fn test_conditional_unbound_variable_takes_else_branch() {
        let (draft, _) = fold(
            "@prompt @objective o @end \
             @if mode == \"fast\" { @context quick @end } @else { @context slow @end } @end",
        )
        .unwrap();
        assert_eq!(draft.context, "slow");
    }

    #[test]
    fn test_false_conditional_without_else_contributes_nothing() {
        // The only context lives in the untaken branch, so the mandatory
        // check fails
        let result = fold(
            "@prompt @objective o @end \
             @if mode == \"fast\" { @context quick @end } @end",
        );
        assert_eq!(result.unwrap_err(), ParseError::MissingSection("context"));
    }

    #[test]
    fn test_conditional_branch_overrides_earlier_section() {
        let (draft, _) = fold(
            "@vars mode = \"fast\" @end @prompt @context base @end @objective o @end \
             @if mode == \"fast\" { @context quick @end } @end",
        )
        .unwrap();
        assert_eq!(draft.context, "quick");
    }
}
