//! Global logger set-up.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Level used for this crate's own records.
#[must_use]
pub const fn crate_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes the global logger.
///
/// Everything logs at info and above. When `verbose` is `true`, the
/// factory's debug records (spawns, expiries, skipped catalog records) are
/// shown as well. `RUST_LOG` overrides both. Returns `false` if a logger was
/// already installed, which lets tests call `init` repeatedly.
#[must_use]
pub fn init(verbose: bool) -> bool {
    let env = Env::default().default_filter_or(LevelFilter::Info.to_string());
    let mut builder = Builder::from_env(env);
    if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_module(env!("CARGO_CRATE_NAME"), crate_level(verbose));
    }
    builder.try_init().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(true, LevelFilter::Debug)]
    #[case(false, LevelFilter::Info)]
    fn verbosity_selects_level(#[case] verbose: bool, #[case] expected: LevelFilter) {
        assert_eq!(crate_level(verbose), expected);
    }

    #[rstest]
    fn repeated_init_does_not_panic() {
        let _first = init(false);
        assert!(!init(true));
    }
}
