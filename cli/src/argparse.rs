use clap::{Args, Parser, Subcommand};
use label_selector_cli::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lsel",
    about = "Parse and validate label selectors",
    version,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence when set)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Pick which subcommand to use
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse selectors and print their requirements
    Parse(ParseArgs),
    /// Validate selectors, reporting every failure
    Check(CheckArgs),
    /// Print the token stream of a selector
    Tokens(TokensArgs),
}

#[derive(Args)]
pub struct ParseArgs {
    /// Selectors to parse, e.g. 'env=prod,tier in (web,api)'
    #[arg(required = true)]
    pub selectors: Vec<String>,

    /// Output format: table, json or yaml
    #[arg(long, default_value = "table")]
    pub format: OutputFormat,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Selectors to validate
    #[arg(required_unless_present = "file", conflicts_with = "file")]
    pub selectors: Vec<String>,

    /// Read selectors from a file, one per line
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args)]
pub struct TokensArgs {
    /// Selector to scan
    pub selector: String,

    /// Output format: table, json or yaml
    #[arg(long, default_value = "table")]
    pub format: OutputFormat,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
