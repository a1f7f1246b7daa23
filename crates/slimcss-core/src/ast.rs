//! Block tree produced by the parser and mutated in place by the optimiser.

/// One `property: value` pair. The value excludes the trailing semicolon
/// but may still carry an `!important` marker.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// Ordered property map of a single block.
///
/// Iteration order equals declaration order, and each property name occurs
/// at most once: `set` overwrites an existing entry in place, keeping the
/// position of the first occurrence (last write wins, as in the cascade
/// within one block).
#[derive(Debug, Default, Clone)]
pub struct PropertyMap {
    entries: Vec<Declaration>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
    }

    pub fn contains(&self, property: &str) -> bool {
        self.entries.iter().any(|d| d.property == property)
    }

    /// True when the property is present with a non-empty value. Empty
    /// values are dissolution sentinels and count as absent.
    pub fn is_set(&self, property: &str) -> bool {
        self.get(property).map(|v| !v.is_empty()).unwrap_or(false)
    }

    pub fn set(&mut self, property: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(existing) = self.entries.iter_mut().find(|d| d.property == property) {
            existing.value = value;
        } else {
            self.entries.push(Declaration {
                property: property.to_string(),
                value,
            });
        }
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        let idx = self.entries.iter().position(|d| d.property == property)?;
        Some(self.entries.remove(idx).value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Declaration> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Declaration> {
        self.entries.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Selector-scoped rule: `div.foo { … }`, also braced at-rules whose body
/// is a declaration list (`@font-face`, `@page`).
#[derive(Debug)]
pub struct StyleBlock {
    pub selector: String,
    pub properties: PropertyMap,
}

/// Grouping at-rule whose body is a list of blocks (`@media`, `@supports`).
#[derive(Debug)]
pub struct AtBlock {
    pub prelude: String,
    pub blocks: Vec<Block>,
}

#[derive(Debug)]
pub enum Block {
    Style(StyleBlock),
    At(AtBlock),
    Comment(String),
    /// Brace-less at-rule preserved verbatim (charset/import/namespace are
    /// lifted onto the stylesheet instead).
    Directive(String),
}

#[derive(Debug, Default)]
pub struct Stylesheet {
    pub charset: Option<String>,
    pub imports: Vec<String>,
    pub namespaces: Vec<String>,
    pub blocks: Vec<Block>,
}

/// Canonical importance suffix used when re-attaching the marker.
pub const IMPORTANT: &str = "!important";

/// Detects a trailing `!important`, case-insensitive, with arbitrary
/// whitespace around the `!`.
pub fn is_important(value: &str) -> bool {
    let squashed: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    squashed.ends_with(IMPORTANT)
}

/// The value with its importance marker removed and surrounding
/// whitespace trimmed. Values without the marker are only trimmed.
pub fn strip_important(value: &str) -> &str {
    if !is_important(value) {
        return value.trim();
    }
    match value.rfind('!') {
        Some(idx) => value[..idx].trim(),
        None => value.trim(),
    }
}
