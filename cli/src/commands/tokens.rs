use crate::argparse::TokensArgs;
use label_selector::scan;
use label_selector_cli::{render_tokens, tokens_accepted};

pub fn handle_tokens_command(args: TokensArgs) -> anyhow::Result<bool> {
    let tokens = scan(&args.selector);
    println!("{}", render_tokens(&tokens, args.format)?);
    Ok(tokens_accepted(&tokens))
}
