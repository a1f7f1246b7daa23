//! Tolerant CSS parser. Builds the block tree the optimiser works on;
//! malformed declarations are skipped with a warning instead of failing
//! the whole document.

use crate::ast::{AtBlock, Block, PropertyMap, StyleBlock, Stylesheet};
use crate::error::{Diagnostic, Position};
use crate::rewrite::strip_vendor;
use crate::split::split_outside;
use log::warn;

pub fn parse(input: &str) -> Result<Stylesheet, String> {
    let mut scanner = Scanner::new(input);
    let mut sheet = Stylesheet::default();
    let blocks = parse_blocks(&mut scanner, true, &mut sheet);
    sheet.blocks = blocks;
    Ok(sheet)
}

struct Scanner<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
        }
    }

    fn starts_with(&self, s: &str) -> bool {
        self.input[self.pos..].starts_with(s)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    /// Consume a `/* … */` comment, cursor on the opening slash.
    fn read_comment(&mut self) -> String {
        let mut out = String::new();
        out.push(self.bump().unwrap());
        out.push(self.bump().unwrap());
        while !self.eof() {
            if self.starts_with("*/") {
                out.push(self.bump().unwrap());
                out.push(self.bump().unwrap());
                break;
            }
            out.push(self.bump().unwrap());
        }
        out
    }

    /// Read raw text until one of `stops` appears at top level (outside
    /// quotes, parentheses and nested braces). Comments are dropped. The
    /// stop character is consumed and returned.
    fn read_until(&mut self, stops: &[char]) -> (String, Option<char>) {
        let mut out = String::new();
        let mut in_double = false;
        let mut in_single = false;
        let mut paren = 0usize;
        let mut brace = 0usize;
        let mut escaped = false;

        while let Some(ch) = self.peek() {
            if escaped {
                out.push(self.bump().unwrap());
                escaped = false;
                continue;
            }
            if !in_double && !in_single && self.starts_with("/*") {
                self.read_comment();
                continue;
            }
            if !in_double && !in_single && paren == 0 && brace == 0 && stops.contains(&ch) {
                self.bump();
                return (out, Some(ch));
            }
            match ch {
                '\\' => escaped = true,
                '"' if !in_single => in_double = !in_double,
                '\'' if !in_double => in_single = !in_single,
                '(' if !in_double && !in_single => paren += 1,
                ')' if !in_double && !in_single => paren = paren.saturating_sub(1),
                '{' if !in_double && !in_single => brace += 1,
                '}' if !in_double && !in_single => brace = brace.saturating_sub(1),
                _ => {}
            }
            out.push(self.bump().unwrap());
        }
        (out, None)
    }
}

fn parse_blocks(scanner: &mut Scanner, top_level: bool, sheet: &mut Stylesheet) -> Vec<Block> {
    let mut blocks = Vec::new();
    loop {
        scanner.skip_ws();
        if scanner.eof() {
            break;
        }
        if scanner.peek() == Some('}') {
            let position = scanner.position();
            scanner.bump();
            if top_level {
                warn!("{}", Diagnostic::new(position, "Ignored stray '}'"));
                continue;
            }
            break;
        }
        if scanner.starts_with("/*") {
            blocks.push(Block::Comment(scanner.read_comment()));
            continue;
        }

        let position = scanner.position();
        if scanner.peek() == Some('@') {
            let (prelude, stop) = scanner.read_until(&['{', ';']);
            let prelude = normalize_ws(&prelude);
            match stop {
                Some(';') => handle_directive(&prelude, top_level, sheet, &mut blocks),
                Some('{') => {
                    if is_grouping_at_rule(&prelude) {
                        let children = parse_blocks(scanner, false, sheet);
                        blocks.push(Block::At(AtBlock {
                            prelude,
                            blocks: children,
                        }));
                    } else {
                        let properties = parse_declarations(scanner, position);
                        blocks.push(Block::Style(StyleBlock {
                            selector: prelude,
                            properties,
                        }));
                    }
                }
                None => {
                    warn!(
                        "{}",
                        Diagnostic::new(position, format!("Unterminated at-rule '{}'", prelude))
                    );
                    break;
                }
                _ => unreachable!("read_until only returns one of the requested stop chars or None"),
            }
            continue;
        }

        let (selector, stop) = scanner.read_until(&['{']);
        let selector = normalize_ws(&selector);
        match stop {
            Some(_) => {
                let properties = parse_declarations(scanner, position);
                if selector.is_empty() {
                    warn!(
                        "{}",
                        Diagnostic::new(position, "Skipped rule with empty selector")
                    );
                } else {
                    blocks.push(Block::Style(StyleBlock {
                        selector,
                        properties,
                    }));
                }
            }
            None => {
                if !selector.is_empty() {
                    warn!(
                        "{}",
                        Diagnostic::new(position, format!("Ignored dangling text '{}'", selector))
                    );
                }
                break;
            }
        }
    }
    blocks
}

/// Brace-less at-rules. Charset, import and namespace ride on the
/// stylesheet header at top level; anything else is preserved verbatim.
fn handle_directive(
    prelude: &str,
    top_level: bool,
    sheet: &mut Stylesheet,
    blocks: &mut Vec<Block>,
) {
    if top_level {
        if let Some(rest) = strip_keyword(prelude, "@charset") {
            sheet.charset = Some(rest.to_string());
            return;
        }
        if let Some(rest) = strip_keyword(prelude, "@import") {
            sheet.imports.push(rest.to_string());
            return;
        }
        if let Some(rest) = strip_keyword(prelude, "@namespace") {
            sheet.namespaces.push(rest.to_string());
            return;
        }
    }
    blocks.push(Block::Directive(format!("{};", prelude)));
}

fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    if text.len() < keyword.len() || !text[..keyword.len()].eq_ignore_ascii_case(keyword) {
        return None;
    }
    let rest = &text[keyword.len()..];
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

fn is_grouping_at_rule(prelude: &str) -> bool {
    let name: String = prelude
        .trim_start_matches('@')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    let lower = name.to_ascii_lowercase();
    matches!(
        strip_vendor(&lower),
        "media" | "supports" | "keyframes" | "document" | "layer" | "container"
    )
}

fn parse_declarations(scanner: &mut Scanner, start: Position) -> PropertyMap {
    let (body, stop) = scanner.read_until(&['}']);
    if stop.is_none() {
        warn!("{}", Diagnostic::new(start, "Unclosed block"));
    }

    let mut properties = PropertyMap::new();
    for declaration in split_outside(';', &body) {
        let declaration = declaration.trim();
        if declaration.is_empty() {
            continue;
        }
        match declaration.split_once(':') {
            Some((property, value)) => {
                let property = property.trim().to_ascii_lowercase();
                let value = value.trim();
                if property.is_empty() || value.is_empty() {
                    warn!(
                        "{}",
                        Diagnostic::new(
                            start,
                            format!("Skipped malformed declaration '{}'", declaration)
                        )
                    );
                    continue;
                }
                properties.set(&property, value);
            }
            None => warn!(
                "{}",
                Diagnostic::new(
                    start,
                    format!("Skipped declaration without ':': '{}'", declaration)
                )
            ),
        }
    }
    properties
}

fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
