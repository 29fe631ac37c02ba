//! XML serialization for parsed documents
//!
//! Writes an indentation-normalized, pretty-printed tree rooted at
//! `<prompt>`. List-valued fields become repeated child nodes: each
//! instruction is a `<step>` under `<instructions>`, and each example is an
//! `<example>` holding sibling `<input>`/`<output>` elements. Empty values
//! collapse to self-closing tags.

use crate::promptml::document::PromptDocument;

const INDENT: &str = "    ";

/// Serialize a document to pretty-printed XML
pub fn serialize_document(doc: &PromptDocument) -> String {
    let mut out = String::new();
    out.push_str("<prompt>\n");

    if let Some(title) = &doc.title {
        push_text_element(&mut out, 1, "title", title);
    }
    push_text_element(&mut out, 1, "context", &doc.context);
    push_text_element(&mut out, 1, "objective", &doc.objective);

    if !doc.instructions.is_empty() {
        push_open(&mut out, 1, "instructions");
        for step in &doc.instructions {
            push_text_element(&mut out, 2, "step", step);
        }
        push_close(&mut out, 1, "instructions");
    }

    if !doc.examples.is_empty() {
        push_open(&mut out, 1, "examples");
        for example in &doc.examples {
            push_open(&mut out, 2, "example");
            push_text_element(&mut out, 3, "input", &example.input);
            push_text_element(&mut out, 3, "output", &example.output);
            push_close(&mut out, 2, "example");
        }
        push_close(&mut out, 1, "examples");
    }

    if !doc.constraints.is_empty() {
        push_open(&mut out, 1, "constraints");
        if let Some(length) = &doc.constraints.length {
            push_open(&mut out, 2, "length");
            push_text_element(&mut out, 3, "min", &length.min.to_string());
            push_text_element(&mut out, 3, "max", &length.max.to_string());
            push_close(&mut out, 2, "length");
        }
        if let Some(tone) = &doc.constraints.tone {
            push_text_element(&mut out, 2, "tone", tone);
        }
        if let Some(difficulty) = &doc.constraints.difficulty {
            push_text_element(&mut out, 2, "difficulty", difficulty);
        }
        push_close(&mut out, 1, "constraints");
    }

    if !doc.metadata.is_empty() {
        push_open(&mut out, 1, "metadata");
        for (key, value) in &doc.metadata {
            push_text_element(&mut out, 2, key, &value.to_string());
        }
        push_close(&mut out, 1, "metadata");
    }

    out.push_str("</prompt>");
    out
}

fn push_open(out: &mut String, level: usize, name: &str) {
    out.push_str(&format!("{}<{}>\n", INDENT.repeat(level), name));
}

fn push_close(out: &mut String, level: usize, name: &str) {
    out.push_str(&format!("{}</{}>\n", INDENT.repeat(level), name));
}

fn push_text_element(out: &mut String, level: usize, name: &str, text: &str) {
    let indent = INDENT.repeat(level);
    if text.is_empty() {
        out.push_str(&format!("{}<{}/>\n", indent, name));
    } else {
        out.push_str(&format!(
            "{}<{}>{}</{}>\n",
            indent,
            name,
            escape_xml(text),
            name
        ));
    }
}

/// Escape XML special characters
fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
