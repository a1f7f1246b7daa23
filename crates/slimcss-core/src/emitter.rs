//! Token stream and printer. The optimised tree is flattened into a
//! fixed set of token kinds, then printed in the configured style.

use crate::ast::{Block, Stylesheet};
use crate::config::{Config, OutputStyle};
use log::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    AtStart(String),
    AtEnd,
    SelStart(String),
    SelEnd,
    Property(String),
    Value(String),
    Comment(String),
}

/// Flatten a stylesheet into the token stream the printer consumes.
///
/// Empty-valued declarations (dissolution sentinels), style blocks with
/// nothing left to print and at-rules whose children all vanished are
/// dropped here. A brace-less directive becomes an `AtStart` immediately
/// followed by `AtEnd`.
pub fn tokens(sheet: &Stylesheet) -> Vec<Token> {
    let mut out = Vec::new();
    for block in &sheet.blocks {
        tokenize_block(block, &mut out);
    }
    out
}

fn tokenize_block(block: &Block, out: &mut Vec<Token>) {
    match block {
        Block::Comment(text) => out.push(Token::Comment(text.clone())),
        Block::Directive(text) => {
            out.push(Token::AtStart(text.trim_end_matches(';').to_string()));
            out.push(Token::AtEnd);
        }
        Block::Style(style) => {
            let declarations: Vec<(&str, &str)> = style
                .properties
                .iter()
                .filter(|d| !d.value.is_empty())
                .map(|d| (d.property.as_str(), d.value.as_str()))
                .collect();
            if declarations.is_empty() {
                return;
            }
            out.push(Token::SelStart(style.selector.clone()));
            for (property, value) in declarations {
                out.push(Token::Property(property.to_string()));
                out.push(Token::Value(value.to_string()));
            }
            out.push(Token::SelEnd);
        }
        Block::At(at) => {
            let mark = out.len();
            out.push(Token::AtStart(at.prelude.clone()));
            for child in &at.blocks {
                tokenize_block(child, out);
            }
            if out.len() == mark + 1 {
                out.truncate(mark);
            } else {
                out.push(Token::AtEnd);
            }
        }
    }
}

pub fn emit_css(sheet: &Stylesheet, config: &Config) -> String {
    let mut out = String::new();
    emit_header(sheet, &mut out);
    let stream = tokens(sheet);
    match config.style {
        OutputStyle::Pretty => print_pretty(&stream, &mut out),
        OutputStyle::Compact => print_compact(&stream, &mut out),
    }
    out
}

fn emit_header(sheet: &Stylesheet, out: &mut String) {
    if let Some(charset) = &sheet.charset {
        out.push_str("@charset ");
        out.push_str(charset);
        out.push_str(";\n");
    }
    for import in &sheet.imports {
        out.push_str("@import ");
        out.push_str(&unwrap_url(import, "@import"));
        out.push_str(";\n");
    }
    for namespace in &sheet.namespaces {
        out.push_str("@namespace ");
        out.push_str(&unwrap_url(namespace, "@namespace"));
        out.push_str(";\n");
    }
}

/// `url("x")` in an import or namespace prelude prints as the bare
/// quoted string.
fn unwrap_url(value: &str, directive: &str) -> String {
    let lower = value.to_ascii_lowercase();
    if let Some(idx) = lower.find("url(") {
        if value.ends_with(')') {
            let head = &value[..idx];
            let inner = value[idx + 4..value.len() - 1].trim();
            let quoted = if inner.starts_with('"') || inner.starts_with('\'') {
                inner.to_string()
            } else {
                format!("\"{}\"", inner)
            };
            info!("unwrapped url() in {}", directive);
            return format!("{}{}", head, quoted);
        }
    }
    value.to_string()
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("    ");
    }
}

fn print_pretty(stream: &[Token], out: &mut String) {
    let mut depth = 0usize;
    let mut i = 0;
    while i < stream.len() {
        match &stream[i] {
            Token::AtStart(prelude) => {
                if matches!(stream.get(i + 1), Some(Token::AtEnd)) {
                    indent(out, depth);
                    out.push_str(prelude);
                    out.push_str(";\n");
                    if depth == 0 {
                        out.push('\n');
                    }
                    i += 2;
                    continue;
                }
                indent(out, depth);
                out.push_str(prelude);
                out.push_str(" {\n");
                depth += 1;
            }
            Token::SelStart(selector) => {
                indent(out, depth);
                out.push_str(selector);
                out.push_str(" {\n");
                depth += 1;
            }
            Token::AtEnd | Token::SelEnd => {
                depth = depth.saturating_sub(1);
                indent(out, depth);
                out.push_str("}\n");
                if depth == 0 {
                    out.push('\n');
                }
            }
            Token::Property(name) => {
                indent(out, depth);
                out.push_str(name);
                out.push_str(": ");
            }
            Token::Value(value) => {
                out.push_str(value);
                out.push_str(";\n");
            }
            Token::Comment(text) => {
                indent(out, depth);
                out.push_str(text);
                out.push('\n');
            }
        }
        i += 1;
    }
}

fn print_compact(stream: &[Token], out: &mut String) {
    let mut prev_was_value = false;
    let mut i = 0;
    while i < stream.len() {
        match &stream[i] {
            Token::AtStart(prelude) => {
                if matches!(stream.get(i + 1), Some(Token::AtEnd)) {
                    out.push_str(prelude);
                    out.push(';');
                    prev_was_value = false;
                    i += 2;
                    continue;
                }
                out.push_str(prelude);
                out.push('{');
                prev_was_value = false;
            }
            Token::SelStart(selector) => {
                out.push_str(selector);
                out.push('{');
                prev_was_value = false;
            }
            Token::AtEnd | Token::SelEnd => {
                out.push('}');
                prev_was_value = false;
            }
            Token::Property(name) => {
                if prev_was_value {
                    out.push(';');
                }
                out.push_str(name);
                out.push(':');
                prev_was_value = false;
            }
            Token::Value(value) => {
                out.push_str(value);
                prev_was_value = true;
            }
            Token::Comment(text) => {
                out.push_str(text);
                prev_was_value = false;
            }
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{AtBlock, PropertyMap, StyleBlock};
    use crate::config::Config;

    fn sheet_with_rule(selector: &str, pairs: &[(&str, &str)]) -> Stylesheet {
        let mut properties = PropertyMap::new();
        for (prop, value) in pairs {
            properties.set(prop, *value);
        }
        let mut sheet = Stylesheet::default();
        sheet.blocks.push(Block::Style(StyleBlock {
            selector: selector.to_string(),
            properties,
        }));
        sheet
    }

    fn compact() -> Config {
        Config {
            style: OutputStyle::Compact,
            ..Config::default()
        }
    }

    #[test]
    fn pretty_output_shape() {
        let sheet = sheet_with_rule("a", &[("color", "red"), ("margin", "1px")]);
        let css = emit_css(&sheet, &Config::default());
        assert_eq!(css, "a {\n    color: red;\n    margin: 1px;\n}\n\n");
    }

    #[test]
    fn compact_output_shape() {
        let sheet = sheet_with_rule("a", &[("color", "red"), ("margin", "1px")]);
        let css = emit_css(&sheet, &compact());
        assert_eq!(css, "a{color:red;margin:1px}");
    }

    #[test]
    fn empty_values_and_empty_blocks_are_skipped() {
        let mut sheet = sheet_with_rule("a", &[("margin", ""), ("color", "red")]);
        sheet
            .blocks
            .push(Block::Style(StyleBlock {
                selector: "b".to_string(),
                properties: PropertyMap::new(),
            }));
        let css = emit_css(&sheet, &compact());
        assert_eq!(css, "a{color:red}");
    }

    #[test]
    fn at_block_nesting_and_pruning() {
        let inner = sheet_with_rule("a", &[("color", "red")]);
        let mut sheet = Stylesheet::default();
        sheet.blocks.push(Block::At(AtBlock {
            prelude: "@media screen".to_string(),
            blocks: inner.blocks,
        }));
        sheet.blocks.push(Block::At(AtBlock {
            prelude: "@media print".to_string(),
            blocks: vec![Block::Style(StyleBlock {
                selector: "b".to_string(),
                properties: PropertyMap::new(),
            })],
        }));
        let css = emit_css(&sheet, &compact());
        assert_eq!(css, "@media screen{a{color:red}}");
    }

    #[test]
    fn header_unwraps_import_urls() {
        let mut sheet = Stylesheet::default();
        sheet.charset = Some("\"utf-8\"".to_string());
        sheet.imports.push("url(\"print.css\")".to_string());
        sheet.imports.push("url(screen.css)".to_string());
        let css = emit_css(&sheet, &compact());
        assert_eq!(
            css,
            "@charset \"utf-8\";\n@import \"print.css\";\n@import \"screen.css\";\n"
        );
    }

    #[test]
    fn directive_round_trip() {
        let mut sheet = Stylesheet::default();
        sheet
            .blocks
            .push(Block::Directive("@layer base, utilities;".to_string()));
        let css = emit_css(&sheet, &compact());
        assert_eq!(css, "@layer base, utilities;");
    }

    #[test]
    fn token_stream_kinds() {
        let sheet = sheet_with_rule("a", &[("color", "red")]);
        assert_eq!(
            tokens(&sheet),
            vec![
                Token::SelStart("a".to_string()),
                Token::Property("color".to_string()),
                Token::Value("red".to_string()),
                Token::SelEnd,
            ]
        );
    }
}
