//! Has command - check whether an entry is cached

use crate::cache::create_cache;
use crate::cli::args::{EntryArgs, OutputFormat};
use crate::config::Config;
use crate::error::FetchCacheResult;
use serde::Serialize;

#[derive(Serialize)]
struct HasJson<'a> {
    namespace: &'a str,
    key: &'a str,
    hit: bool,
    path: Option<String>,
}

/// Execute the has command, returning whether the entry was found
pub fn execute(args: EntryArgs, config: &Config) -> FetchCacheResult<bool> {
    let cache = create_cache(&config.cache)?;
    let hit = cache.has(&args.namespace, &args.key);

    match args.format {
        OutputFormat::Plain => {
            if let Some(ref path) = hit {
                println!("{}", path.display());
            }
        }
        OutputFormat::Json => {
            let json = HasJson {
                namespace: &args.namespace,
                key: &args.key,
                hit: hit.is_some(),
                path: hit.as_ref().map(|p| p.display().to_string()),
            };
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
    }

    Ok(hit.is_some())
}
