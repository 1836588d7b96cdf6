pub mod output;
pub mod report;
pub mod selector_file;

pub use output::{render_errors, render_requirements, render_tokens, OutputFormat};
pub use report::{tokens_accepted, SelectorOutcome, SelectorReport};
pub use selector_file::read_selectors;
