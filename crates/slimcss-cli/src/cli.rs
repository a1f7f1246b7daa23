use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "slimcss")]
#[command(about = "CSS parser and optimiser")]
pub struct Cli {
    /// Input CSS file
    pub input: String,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<String>,

    /// Shorthand optimisation level: none, common, font, background, all
    #[arg(long)]
    pub level: Option<String>,

    /// Emit compact output without whitespace
    #[arg(long)]
    pub compact: bool,

    /// Leave colours as written
    #[arg(long)]
    pub no_color_compression: bool,

    /// Leave font-weight keywords as written
    #[arg(long)]
    pub no_font_weight_compression: bool,
}
