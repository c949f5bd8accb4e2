//! UI module for consistent CLI output
//!
//! Uses `cliclack` for styled log lines in interactive terminals, with
//! automatic fallback to plain output in CI/non-interactive environments.
//!
//! Machine-readable results (paths, sizes, JSON) are printed directly by the
//! commands; this module is only for human-facing status lines.
//!
//! # Example
//!
//! ```rust,ignore
//! use fetch_cache::ui::{self, UiContext};
//!
//! let ctx = UiContext::detect();
//! ui::step_ok_detail(&ctx, "Cached git/abc123", "1500 bytes");
//! ui::step_warn_hint(&ctx, "Not cached", "Raise --max-size");
//! ```

mod context;
mod output;

pub use context::UiContext;
pub use output::{key_value, key_value_status, step_info, step_ok_detail, step_warn_hint};
