pub mod catalog;
pub mod check;
pub mod new;
pub mod powers;
pub mod skills;
pub mod stats;

use std::path::Path;

use ft_core::CharacterBuild;
use ft_mechanics::Rules;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "FT_LOG";

/// Install the stderr log subscriber.
///
/// `FT_LOG` takes any `EnvFilter` directive; `--verbose` forces `debug`.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load the catalog file, or the standard catalog when none is given.
fn load_rules(catalog: Option<&Path>) -> Result<Rules, String> {
    match catalog {
        Some(path) => Rules::load(path).map_err(|e| format!("{}: {e}", path.display())),
        None => Rules::standard().map_err(|e| e.to_string()),
    }
}

fn load_build(path: &Path) -> Result<CharacterBuild, String> {
    CharacterBuild::load(path).map_err(|e| format!("{}: {e}", path.display()))
}

/// Rules and build together, for commands that inspect one build.
fn load(catalog: Option<&Path>, build: &Path) -> Result<(Rules, CharacterBuild), String> {
    Ok((load_rules(catalog)?, load_build(build)?))
}
