mod cli;

use clap::Parser;
use cli::Cli;
use slimcss_core::{process, Config, OutputStyle, ShorthandLevel};
use std::fs;

fn main() {
    env_logger::init();
    let args = Cli::parse();
    if let Err(message) = run(&args) {
        eprintln!("error: {}", message);
        std::process::exit(1);
    }
}

fn run(args: &Cli) -> Result<(), String> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(level) = &args.level {
        config.optimise_shorthands = ShorthandLevel::parse(level)?;
    }
    if args.compact {
        config.style = OutputStyle::Compact;
    }
    if args.no_color_compression {
        config.compress_colors = false;
    }
    if args.no_font_weight_compression {
        config.compress_font_weight = false;
    }

    let source = fs::read_to_string(&args.input)
        .map_err(|e| format!("Could not read {}: {}", args.input, e))?;
    let result = process(&source, &config)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &result).map_err(|e| format!("Could not write {}: {}", path, e))?
        }
        None => print!("{}", result),
    }

    let ratio = if source.is_empty() {
        100.0
    } else {
        result.len() as f64 * 100.0 / source.len() as f64
    };
    eprintln!(
        "{} bytes in, {} bytes out ({:.1}%)",
        source.len(),
        result.len(),
        ratio
    );
    Ok(())
}
