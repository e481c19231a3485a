use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Route logs to stderr; stdout carries command output only.
///
/// `RUST_LOG` wins over `-v`/`-vv` when set.
pub fn init(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    Builder::from_env(Env::default().default_filter_or(default_level))
        .target(Target::Stderr)
        .filter_module("tantivy", LevelFilter::Warn)
        .format_timestamp(None)
        .init();
}
