//! Grammar for the PromptML format, implemented with chumsky combinators
//!
//! The grammar is a fixed, closed set of sections, so every production is
//! keyed on its leading keyword token and no recursion is needed: the only
//! nesting construct (the conditional) holds plain sections in its branches.
//!
//! Parsers operate over `(Token, byte_span)` pairs. Free text is collected
//! as span runs and resolved against the source during the fold step.

use chumsky::prelude::*;
use std::ops::Range;

use super::tree::{
    ConditionalNode, ConstraintNode, DocumentNode, ExampleNode, LiteralNode, PromptItem, PropNode,
    SectionNode, VarNode,
};
use crate::promptml::lexer::Token;

/// Type alias for token with span
pub type TokenSpan = (Token, Range<usize>);

/// Type alias for parser error
pub type ParserError = Simple<TokenSpan>;

/// Helper: match a specific token, ignoring the span
fn token(t: Token) -> impl Parser<TokenSpan, (), Error = ParserError> + Clone {
    filter(move |(tok, _): &TokenSpan| tok == &t).ignored()
}

/// Helper: match a specific bare word, such as the `min`/`max` attribute names
fn keyword(kw: &'static str) -> impl Parser<TokenSpan, (), Error = ParserError> + Clone {
    filter(move |(tok, _): &TokenSpan| matches!(tok, Token::Word(w) if w == kw)).ignored()
}

/// Parse an identifier (variable name, metadata key)
fn word() -> impl Parser<TokenSpan, String, Error = ParserError> + Clone {
    filter_map(|span, (tok, _): TokenSpan| match tok {
        Token::Word(word) => Ok(word),
        other => Err(Simple::custom(
            span,
            format!("expected identifier, found {}", other),
        )),
    })
}

/// Parse a quoted string literal, returned with its quotes
fn string_lit() -> impl Parser<TokenSpan, String, Error = ParserError> + Clone {
    filter_map(|span, (tok, _): TokenSpan| match tok {
        Token::Str(raw) => Ok(raw),
        other => Err(Simple::custom(
            span,
            format!("expected string literal, found {}", other),
        )),
    })
}

/// Parse a numeric literal, returned as its source text
fn number_lit() -> impl Parser<TokenSpan, String, Error = ParserError> + Clone {
    filter_map(|span, (tok, _): TokenSpan| match tok {
        Token::Number(raw) => Ok(raw),
        other => Err(Simple::custom(
            span,
            format!("expected number, found {}", other),
        )),
    })
}

/// Parse a string or number literal for metadata values
fn literal() -> impl Parser<TokenSpan, LiteralNode, Error = ParserError> + Clone {
    filter_map(|span, (tok, _): TokenSpan| match tok {
        Token::Str(raw) => Ok(LiteralNode::Str(raw)),
        Token::Number(raw) => Ok(LiteralNode::Number(raw)),
        other => Err(Simple::custom(
            span,
            format!("expected string or number literal, found {}", other),
        )),
    })
}

/// Parse a free-text run: any tokens up to the next keyword or brace
///
/// Returns the collected byte spans; the run may be empty, which folds to an
/// empty string.
fn text_run() -> impl Parser<TokenSpan, Vec<Range<usize>>, Error = ParserError> + Clone {
    filter(|(tok, _): &TokenSpan| tok.is_text())
        .repeated()
        .map(|tokens: Vec<TokenSpan>| tokens.into_iter().map(|(_, span)| span).collect())
}

/// Parse a `@<keyword> <text> @end` section body
fn text_section(open: Token) -> impl Parser<TokenSpan, Vec<Range<usize>>, Error = ParserError> + Clone {
    token(open)
        .ignore_then(text_run())
        .then_ignore(token(Token::End))
}

/// Parse any one recognized section of the prompt block
fn section() -> impl Parser<TokenSpan, SectionNode, Error = ParserError> + Clone {
    let title = text_section(Token::Title).map(SectionNode::Title);
    let context = text_section(Token::Context).map(SectionNode::Context);
    let objective = text_section(Token::Objective).map(SectionNode::Objective);

    let instructions = token(Token::Instructions)
        .ignore_then(text_section(Token::Step).repeated())
        .then_ignore(token(Token::End))
        .map(SectionNode::Instructions);

    // An example is strictly input-then-output; an example missing either
    // half fails the parse rather than folding a partial record
    let example = token(Token::Example)
        .ignore_then(text_section(Token::Input))
        .then(text_section(Token::Output))
        .then_ignore(token(Token::End))
        .map(|(input, output)| ExampleNode { input, output });
    let examples = token(Token::Examples)
        .ignore_then(example.repeated())
        .then_ignore(token(Token::End))
        .map(SectionNode::Examples);

    let length = token(Token::Length)
        .ignore_then(keyword("min"))
        .ignore_then(token(Token::Colon))
        .ignore_then(number_lit())
        .then_ignore(keyword("max"))
        .then_ignore(token(Token::Colon))
        .then(number_lit())
        .then_ignore(token(Token::End))
        .map(|(min, max)| ConstraintNode::Length { min, max });
    let tone = text_section(Token::Tone).map(ConstraintNode::Tone);
    let difficulty = text_section(Token::Difficulty).map(ConstraintNode::Difficulty);
    let constraints = token(Token::Constraints)
        .ignore_then(choice((length, tone, difficulty)).repeated())
        .then_ignore(token(Token::End))
        .map(SectionNode::Constraints);

    let prop = word()
        .then_ignore(token(Token::Colon))
        .then(literal())
        .map(|(key, value)| PropNode { key, value });
    let metadata = token(Token::Metadata)
        .ignore_then(prop.repeated())
        .then_ignore(token(Token::End))
        .map(SectionNode::Metadata);

    choice((
        title,
        context,
        objective,
        instructions,
        examples,
        constraints,
        metadata,
    ))
}

/// Parse the `@if name == "literal" { ... } @else { ... }` construct
///
/// Branch bodies are brace-delimited section lists, so `@end` markers inside
/// a branch always close the innermost open section, never the branch.
fn conditional() -> impl Parser<TokenSpan, ConditionalNode, Error = ParserError> + Clone {
    let branch = token(Token::OpenBrace)
        .ignore_then(section().repeated())
        .then_ignore(token(Token::CloseBrace));

    token(Token::If)
        .ignore_then(word())
        .then_ignore(token(Token::DoubleEquals))
        .then(string_lit())
        .then(branch.clone())
        .then(token(Token::Else).ignore_then(branch).or_not())
        .map(
            |(((variable, operand), then_branch), else_branch)| ConditionalNode {
                variable,
                operand,
                then_branch,
                else_branch: else_branch.unwrap_or_default(),
            },
        )
}

/// Parse a whole document: an optional vars block, then exactly one prompt
/// block, then end of input
pub fn document() -> impl Parser<TokenSpan, DocumentNode, Error = ParserError> {
    let binding = word()
        .then_ignore(token(Token::Equals))
        .then(string_lit())
        .map(|(name, value)| VarNode { name, value });
    let vars_block = token(Token::Vars)
        .ignore_then(binding.repeated())
        .then_ignore(token(Token::End));

    let item = section()
        .map(PromptItem::Section)
        .or(conditional().map(PromptItem::Conditional));
    let prompt_block = token(Token::Prompt)
        .ignore_then(item.repeated())
        .then_ignore(token(Token::End));

    vars_block
        .or_not()
        .then(prompt_block)
        .then_ignore(end())
        .map(|(vars, items)| DocumentNode {
            vars: vars.unwrap_or_default(),
            items,
        })
}
