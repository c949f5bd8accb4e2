//! Size command - measure a directory the way the quota check does

use crate::cache::tree_size;
use crate::cli::args::SizeArgs;
use crate::error::{FetchCacheError, FetchCacheResult};

/// Execute the size command
pub fn execute(args: SizeArgs) -> FetchCacheResult<()> {
    if !args.dir.is_dir() {
        return Err(FetchCacheError::SourceNotFound(args.dir));
    }

    println!("{}", tree_size(&args.dir)?);
    Ok(())
}
