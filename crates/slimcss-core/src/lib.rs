pub mod ast;
pub mod color;
pub mod config;
pub mod emitter;
pub mod error;
pub mod number;
pub mod optimizer;
pub mod parser;
pub mod rewrite;
pub mod shorthand;
pub mod split;

pub use config::{Config, OutputStyle, ShorthandLevel};

/// Parse, optimise and re-emit a stylesheet in one call.
pub fn process(input: &str, config: &Config) -> Result<String, String> {
    let mut stylesheet = parser::parse(input)?;
    optimizer::optimise(&mut stylesheet, config);
    Ok(emitter::emit_css(&stylesheet, config))
}
