//! Restore command - copy a cached entry into a directory

use super::entry_label;
use crate::cache::create_cache;
use crate::cli::args::RestoreArgs;
use crate::config::Config;
use crate::error::FetchCacheResult;
use crate::ui::{self, UiContext};

/// Execute the restore command
pub fn execute(args: RestoreArgs, config: &Config) -> FetchCacheResult<()> {
    let ctx = UiContext::detect();
    let cache = create_cache(&config.cache)?;

    cache.copy_from(&args.namespace, &args.key, &args.dest)?;

    ui::step_ok_detail(
        &ctx,
        &format!("Restored {}", entry_label(&args.namespace, &args.key)),
        &args.dest.display().to_string(),
    );
    Ok(())
}
