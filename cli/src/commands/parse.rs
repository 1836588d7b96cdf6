use crate::argparse::ParseArgs;
use label_selector::LabelSelectorParser;
use label_selector_cli::{render_errors, render_requirements, SelectorReport};
use log::info;

pub fn handle_parse_command(args: ParseArgs) -> anyhow::Result<bool> {
    let report = SelectorReport::parse_all(&LabelSelectorParser::new(), &args.selectors);

    for outcome in report.outcomes() {
        match &outcome.result {
            Ok(requirements) => {
                info!(
                    "Parsed {} requirement(s) from {:?}",
                    requirements.len(),
                    outcome.selector
                );
                println!(
                    "{}",
                    render_requirements(&outcome.selector, requirements, args.format)?
                );
            }
            Err(errors) => {
                eprintln!("{}", render_errors(&outcome.selector, errors, args.format)?);
            }
        }
    }

    Ok(report.all_accepted())
}
