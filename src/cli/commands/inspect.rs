//! Inspect command - show where an entry lives on disk

use crate::cache::{encode_key, tree_size, Cache};
use crate::cli::args::{EntryArgs, OutputFormat};
use crate::config::Config;
use crate::error::FetchCacheResult;
use crate::ui::{self, UiContext};
use serde::Serialize;

#[derive(Serialize)]
struct InspectJson {
    namespace: String,
    key: String,
    encoded_key: String,
    path: String,
    exists: bool,
    size_bytes: Option<u64>,
    max_size: String,
    max_size_bytes: u64,
    enabled: bool,
}

/// Execute the inspect command
///
/// Works even when caching is disabled, so existing entries can be examined.
pub fn execute(args: EntryArgs, config: &Config) -> FetchCacheResult<()> {
    let cache = Cache::new(config.cache.resolved_root(), &config.cache.max_size)?;
    let path = cache.entry_path(&args.namespace, &args.key)?;
    let exists = path.is_dir();
    let size_bytes = if exists { Some(tree_size(&path)?) } else { None };

    match args.format {
        OutputFormat::Json => {
            let json = InspectJson {
                namespace: args.namespace.clone(),
                key: args.key.clone(),
                encoded_key: encode_key(&args.key),
                path: path.display().to_string(),
                exists,
                size_bytes,
                max_size: cache.quota().to_string(),
                max_size_bytes: cache.quota().bytes(),
                enabled: config.cache.enabled,
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Plain => {
            let ctx = UiContext::detect();
            let namespace = if args.namespace.is_empty() {
                "(none)"
            } else {
                args.namespace.as_str()
            };
            ui::key_value(&ctx, "namespace", namespace);
            ui::key_value(&ctx, "key", &args.key);
            ui::key_value(&ctx, "encoded", &encode_key(&args.key));
            ui::key_value(&ctx, "path", &path.display().to_string());
            match size_bytes {
                Some(bytes) => {
                    ui::key_value_status(&ctx, "status", &format!("cached, {} bytes", bytes), true)
                }
                None => ui::key_value_status(&ctx, "status", "not cached", false),
            }
            ui::key_value(
                &ctx,
                "max size",
                &format!("{} ({} bytes)", cache.quota(), cache.quota().bytes()),
            );
            ui::key_value_status(
                &ctx,
                "caching",
                if config.cache.enabled { "enabled" } else { "disabled" },
                config.cache.enabled,
            );
        }
    }

    Ok(())
}
