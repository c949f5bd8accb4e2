//! CLI command implementations

pub mod config;
pub mod has;
pub mod inspect;
pub mod restore;
pub mod save;
pub mod size;

pub use config::execute as config;
pub use has::execute as has;
pub use inspect::execute as inspect;
pub use restore::execute as restore;
pub use save::execute as save;
pub use size::execute as size;

/// Render a (namespace, key) pair for status lines
pub(crate) fn entry_label(namespace: &str, key: &str) -> String {
    if namespace.is_empty() {
        key.to_string()
    } else {
        format!("{}/{}", namespace, key)
    }
}
