//! Local artifact cache for fetchers
//!
//! Before fetching a git ref, image, chart or archive again, a fetcher asks
//! the cache whether it already holds the tree for that (namespace, cache id)
//! pair and copies it back into place on a hit.
//!
//! # Entry Lifecycle
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | `has` | Reports the entry path, no side effects |
//! | `save` | Deletes any previous entry, then copies the source tree if it fits the quota |
//! | `copy_from` | Copies the entry into a destination, fails on a miss |
//!
//! Quota is checked per save. There is no eviction, deduplication, locking
//! or checksumming: concurrent saves of the same key must be serialized by
//! the caller.

pub mod backend;
pub mod copy;
pub mod factory;
pub mod key;
pub mod quota;
pub mod size;
pub mod store;

pub use backend::{ArtifactCache, NoCache, SaveOutcome};
pub use copy::copy_tree;
pub use factory::create_cache;
pub use key::encode_key;
pub use quota::{Quota, DEFAULT_MAX_SIZE};
pub use size::tree_size;
pub use store::{Cache, CACHE_DIR, FETCHER_DIR};
