//! Lexer module for the PromptML format
//!
//! This module contains the tokenization logic for the PromptML format,
//! including token definitions and the lexer implementation.
//!
//! PromptML blocks are keyword-delimited (`@context ... @end`), so no
//! indentation post-processing is needed: the logos token stream is handed
//! to the parser as-is, paired with byte spans for text recovery.

pub mod lexer_impl;
pub mod tokens;

pub use lexer_impl::{tokenize, tokenize_with_spans};
pub use tokens::Token;
