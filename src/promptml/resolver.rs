//! Variable placeholder substitution
//!
//! Placeholders are a `$` sigil immediately followed by an identifier, with
//! no delimiters, and are only substituted inside the context and objective
//! fields. Substitution is a single pass per field: inserted values are
//! never re-scanned, so a value that itself looks like a placeholder cannot
//! expand further. Placeholders with no matching binding stay verbatim; no
//! error is raised.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::promptml::document::PromptDocument;
use crate::promptml::parser::transform::{PromptDraft, VarBindings};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$([A-Za-z_][A-Za-z0-9_]*)").expect("placeholder pattern"));

/// Apply the collected bindings to a draft, producing the final document
pub fn resolve(draft: PromptDraft, bindings: &VarBindings) -> PromptDocument {
    PromptDocument {
        title: draft.title,
        context: substitute(&draft.context, bindings),
        objective: substitute(&draft.objective, bindings),
        instructions: draft.instructions,
        examples: draft.examples,
        constraints: draft.constraints,
        metadata: draft.metadata,
    }
}

/// Replace every bound `$name` occurrence in one field
pub fn substitute(text: &str, bindings: &VarBindings) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures<'_>| match bindings.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, &str)]) -> VarBindings {
        pairs
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn test_single_substitution() {
        let out = substitute("$greeting, world", &bindings(&[("greeting", "Hello")]));
        assert_eq!(out, "Hello, world");
    }

    #[test]
    fn test_every_occurrence_is_replaced() {
        let out = substitute("$x and $x and $x", &bindings(&[("x", "y")]));
        assert_eq!(out, "y and y and y");
    }

    #[test]
    fn test_unbound_placeholder_stays_verbatim() {
        let out = substitute("$known and $unknown", &bindings(&[("known", "k")]));
        assert_eq!(out, "k and $unknown");
    }

    #[test]
    fn test_inserted_values_are_not_rescanned() {
        // A value that looks like a placeholder must not expand again
        let out = substitute("$a", &bindings(&[("a", "$b"), ("b", "boom")]));
        assert_eq!(out, "$b");
    }

    #[test]
    fn test_identifier_boundary() {
        // $greet must not partially match $greeting
        let out = substitute("$greeting", &bindings(&[("greet", "Hi")]));
        assert_eq!(out, "$greeting");
    }

    #[test]
    fn test_bare_sigil_is_untouched() {
        let out = substitute("costs $5 or $ nothing", &bindings(&[("x", "y")]));
        assert_eq!(out, "costs $5 or $ nothing");
    }
}
