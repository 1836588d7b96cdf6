use crate::argparse::CheckArgs;
use label_selector::LabelSelectorParser;
use label_selector_cli::{read_selectors, SelectorReport};
use log::info;

pub fn handle_check_command(args: CheckArgs) -> anyhow::Result<bool> {
    let selectors = match &args.file {
        Some(path) => read_selectors(path)?,
        None => args.selectors,
    };
    info!("Checking {} selector(s)", selectors.len());

    let report = SelectorReport::parse_all(&LabelSelectorParser::new(), &selectors);
    for outcome in report.outcomes() {
        match &outcome.result {
            Ok(_) => println!("ok     {}", outcome.selector),
            Err(errors) => {
                println!("error  {}", outcome.selector);
                for message in errors.messages() {
                    println!("       {}", message);
                }
            }
        }
    }

    let failed = report.rejected();
    if failed > 0 {
        eprintln!("{} of {} selector(s) rejected", failed, report.len());
    }
    Ok(report.all_accepted())
}
