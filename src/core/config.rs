use std::path::PathBuf;
use tracing::info;

use crate::error::SplitError;
use crate::models::Config;

/// Load configuration from the given directory with CLI overrides
pub fn load_config(
    dir: &PathBuf,
    column: Option<usize>,
    line: Option<usize>,
    sort: bool,
    tile: bool,
) -> Result<Config, SplitError> {
    let config = Config::load_from_dir(dir)?;
    let config = config.with_overrides(column, line, sort, tile);

    info!(
        "Configuration loaded: column={}, line={}, sort={}, tile={}",
        config.split.column, config.split.line, config.split.sort, config.split.tile
    );

    Ok(config)
}
