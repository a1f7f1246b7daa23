use serde::Deserialize;
use std::fs;

/// How far shorthand optimisation goes. Levels are cumulative: each one
/// enables everything below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShorthandLevel {
    /// No shorthand work at all.
    None,
    /// Four-value dissolve/merge and the two-value pair merges.
    Common,
    /// Additionally dissolve and merge `font`.
    Font,
    /// Additionally dissolve and merge `background`.
    Background,
    All,
}

impl ShorthandLevel {
    pub fn parse(name: &str) -> Result<Self, String> {
        match name {
            "none" => Ok(Self::None),
            "common" => Ok(Self::Common),
            "font" => Ok(Self::Font),
            "background" => Ok(Self::Background),
            "all" => Ok(Self::All),
            other => Err(format!("Unknown optimisation level '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    #[default]
    Pretty,
    Compact,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub optimise_shorthands: ShorthandLevel,
    pub compress_colors: bool,
    pub compress_font_weight: bool,
    pub style: OutputStyle,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            optimise_shorthands: ShorthandLevel::All,
            compress_colors: true,
            compress_font_weight: true,
            style: OutputStyle::Pretty,
        }
    }
}

impl Config {
    /// Load a configuration from a JSON file. Missing keys fall back to
    /// the defaults.
    pub fn load(path: &str) -> Result<Self, String> {
        let data =
            fs::read_to_string(path).map_err(|e| format!("Could not read {}: {}", path, e))?;
        serde_json::from_str(&data).map_err(|e| format!("Invalid JSON in {}: {}", path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered() {
        assert!(ShorthandLevel::None < ShorthandLevel::Common);
        assert!(ShorthandLevel::Common < ShorthandLevel::Font);
        assert!(ShorthandLevel::Font < ShorthandLevel::Background);
        assert!(ShorthandLevel::Background < ShorthandLevel::All);
    }

    #[test]
    fn config_from_json() {
        let config: Config = serde_json::from_str(
            r#"{ "optimise_shorthands": "font", "compress_colors": false }"#,
        )
        .expect("parse config");
        assert_eq!(config.optimise_shorthands, ShorthandLevel::Font);
        assert!(!config.compress_colors);
        assert!(config.compress_font_weight);
        assert_eq!(config.style, OutputStyle::Pretty);
    }

    #[test]
    fn unknown_level_name_errors() {
        assert!(ShorthandLevel::parse("maximum").is_err());
        assert_eq!(ShorthandLevel::parse("all"), Ok(ShorthandLevel::All));
    }
}
