mod check;
mod parse;
mod tokens;

use crate::argparse::Commands;
pub use check::handle_check_command;
pub use parse::handle_parse_command;
pub use tokens::handle_tokens_command;

/// Runs one subcommand, returning `false` when any selector was rejected.
pub fn handle_command(command: Commands) -> anyhow::Result<bool> {
    match command {
        Commands::Parse(args) => handle_parse_command(args),
        Commands::Check(args) => handle_check_command(args),
        Commands::Tokens(args) => handle_tokens_command(args),
    }
}
