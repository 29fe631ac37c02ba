//! Parse-tree node types
//!
//! The grammar produces this intermediate tree rather than final strings:
//! free text is kept as byte-span runs into the source so the fold step can
//! recover it exactly (interior whitespace included), while identifiers and
//! literals are captured as values at parse time.

use std::ops::Range;

/// Byte spans of the tokens making up one free-text run
pub type TextSpans = Vec<Range<usize>>;

/// A whole parsed document: optional variable bindings plus the prompt body
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentNode {
    pub vars: Vec<VarNode>,
    pub items: Vec<PromptItem>,
}

/// One `name = "literal"` binding; the value keeps its source quotes
#[derive(Debug, Clone, PartialEq)]
pub struct VarNode {
    pub name: String,
    pub value: String,
}

/// A top-level item inside the prompt block
///
/// Conditionals exist only at this level; branch bodies hold plain sections,
/// which is what limits conditionals to a single level.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptItem {
    Section(SectionNode),
    Conditional(ConditionalNode),
}

/// A recognized section of the prompt block
#[derive(Debug, Clone, PartialEq)]
pub enum SectionNode {
    Title(TextSpans),
    Context(TextSpans),
    Objective(TextSpans),
    Instructions(Vec<TextSpans>),
    Examples(Vec<ExampleNode>),
    Constraints(Vec<ConstraintNode>),
    Metadata(Vec<PropNode>),
}

/// An example block; input always precedes output
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleNode {
    pub input: TextSpans,
    pub output: TextSpans,
}

/// A recognized constraint sub-block
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintNode {
    /// Min/max literals are kept as source text; integer validation happens
    /// during the fold so the error can name the field
    Length { min: String, max: String },
    Tone(TextSpans),
    Difficulty(TextSpans),
}

/// One `key: value` metadata pair
#[derive(Debug, Clone, PartialEq)]
pub struct PropNode {
    pub key: String,
    pub value: LiteralNode,
}

/// A typed literal as it appeared in the source
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralNode {
    /// Quoted string, quotes included
    Str(String),
    /// Bare integer or decimal, as written
    Number(String),
}

/// The `@if name == "literal" { ... } @else { ... }` construct
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalNode {
    pub variable: String,
    /// Comparison operand, quotes included
    pub operand: String,
    pub then_branch: Vec<SectionNode>,
    /// Empty when no `@else` was written
    pub else_branch: Vec<SectionNode>,
}
