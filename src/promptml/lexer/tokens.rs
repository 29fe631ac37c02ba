//! Token definitions for the PromptML format
//!
//! This module defines all the tokens that can be produced by the PromptML lexer.
//! The tokens are defined using the logos derive macro for efficient tokenization.
//!
//! Keywords are `@`-prefixed literals and close with the nearest `@end` marker.
//! Free text inside a section lexes as a run of value-carrying tokens; the
//! parser records their byte spans so the original text (interior whitespace
//! included) can be recovered from the source string later.

use logos::Logos;
use serde::Serialize;
use std::fmt;

/// All possible tokens in the PromptML format
#[derive(Logos, Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // Block keywords
    #[token("@prompt")]
    Prompt,
    #[token("@vars")]
    Vars,
    #[token("@end")]
    End,

    // Section keywords
    #[token("@title")]
    Title,
    #[token("@context")]
    Context,
    #[token("@objective")]
    Objective,
    #[token("@instructions")]
    Instructions,
    #[token("@step")]
    Step,
    #[token("@examples")]
    Examples,
    #[token("@example")]
    Example,
    #[token("@input")]
    Input,
    #[token("@output")]
    Output,
    #[token("@constraints")]
    Constraints,
    #[token("@length")]
    Length,
    #[token("@tone")]
    Tone,
    #[token("@difficulty")]
    Difficulty,
    #[token("@metadata")]
    Metadata,

    // Conditional keywords and branch delimiters
    #[token("@if")]
    If,
    #[token("@else")]
    Else,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,

    // Punctuation
    #[token("==")]
    DoubleEquals,
    #[token("=")]
    Equals,
    #[token(":")]
    Colon,

    // Literals
    #[regex(r#""[^"\n]*""#, |lex| lex.slice().to_string())]
    Str(String),
    #[regex(r"-?[0-9]+(\.[0-9]+)?", |lex| lex.slice().to_string(), priority = 4)]
    Number(String),
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string(), priority = 3)]
    Word(String),

    // Catch-all for remaining free-text chunks (prose punctuation, `$name`
    // placeholders, and so on). Structural characters are excluded so they
    // always lex as their own tokens.
    #[regex(r#"[^ \t\r\n\f@{}":=]+"#, |lex| lex.slice().to_string(), priority = 1)]
    Text(String),
}

impl Token {
    /// Check if this token is an `@`-prefixed keyword
    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            Token::Prompt
                | Token::Vars
                | Token::End
                | Token::Title
                | Token::Context
                | Token::Objective
                | Token::Instructions
                | Token::Step
                | Token::Examples
                | Token::Example
                | Token::Input
                | Token::Output
                | Token::Constraints
                | Token::Length
                | Token::Tone
                | Token::Difficulty
                | Token::Metadata
                | Token::If
                | Token::Else
        )
    }

    /// Check if this token may appear inside a free-text run
    ///
    /// Everything except keywords and branch braces counts as text; colons,
    /// equals signs, and literals are structural only where the grammar asks
    /// for them.
    pub fn is_text(&self) -> bool {
        !self.is_keyword() && !matches!(self, Token::OpenBrace | Token::CloseBrace)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Prompt => write!(f, "<prompt>"),
            Token::Vars => write!(f, "<vars>"),
            Token::End => write!(f, "<end>"),
            Token::Title => write!(f, "<title>"),
            Token::Context => write!(f, "<context>"),
            Token::Objective => write!(f, "<objective>"),
            Token::Instructions => write!(f, "<instructions>"),
            Token::Step => write!(f, "<step>"),
            Token::Examples => write!(f, "<examples>"),
            Token::Example => write!(f, "<example>"),
            Token::Input => write!(f, "<input>"),
            Token::Output => write!(f, "<output>"),
            Token::Constraints => write!(f, "<constraints>"),
            Token::Length => write!(f, "<length>"),
            Token::Tone => write!(f, "<tone>"),
            Token::Difficulty => write!(f, "<difficulty>"),
            Token::Metadata => write!(f, "<metadata>"),
            Token::If => write!(f, "<if>"),
            Token::Else => write!(f, "<else>"),
            Token::OpenBrace => write!(f, "<open-brace>"),
            Token::CloseBrace => write!(f, "<close-brace>"),
            Token::DoubleEquals => write!(f, "<double-equals>"),
            Token::Equals => write!(f, "<equals>"),
            Token::Colon => write!(f, "<colon>"),
            Token::Str(s) => write!(f, "<string:{}>", s),
            Token::Number(n) => write!(f, "<number:{}>", n),
            Token::Word(w) => write!(f, "<word:{}>", w),
            Token::Text(t) => write!(f, "<text:{}>", t),
        }
    }
}
