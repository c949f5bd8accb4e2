//! Save command - copy a fetched directory into the cache

use super::entry_label;
use crate::cache::{create_cache, SaveOutcome};
use crate::cli::args::SaveArgs;
use crate::config::Config;
use crate::error::FetchCacheResult;
use crate::ui::{self, UiContext};

/// Execute the save command
pub fn execute(args: SaveArgs, config: &Config) -> FetchCacheResult<()> {
    let ctx = UiContext::detect();
    let cache = create_cache(&config.cache)?;
    let label = entry_label(&args.namespace, &args.key);

    let outcome = cache.save_with_outcome(&args.namespace, &args.key, &args.source)?;
    match outcome {
        SaveOutcome::Stored { bytes } => {
            ui::step_ok_detail(&ctx, &format!("Cached {}", label), &format!("{} bytes", bytes));
        }
        SaveOutcome::SkippedOverQuota { .. } => {
            ui::step_warn_hint(
                &ctx,
                &format!("{} not cached: {}", label, outcome),
                "Raise the limit with --max-size or cache.max_size",
            );
        }
        SaveOutcome::Disabled => {
            ui::step_info(&ctx, &format!("{} not cached: caching is disabled", label));
        }
    }

    Ok(())
}
