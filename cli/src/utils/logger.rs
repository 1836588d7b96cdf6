use log::LevelFilter;

/// Logs selector activity at `info`, or `debug` with `--verbose`. Other
/// crates stay at `warn`. A set `RUST_LOG` replaces these defaults.
pub fn init_logger(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => {
            builder.parse_filters(&filters);
        }
        Err(_) => {
            let level = if verbose {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            };
            builder
                .filter_level(LevelFilter::Warn)
                .filter_module("label_selector", level)
                .filter_module("lsel", level);
        }
    }
    builder.init();
}
