//! Placing registry files in the project.
//!
//! - [`paths`]: pure path algebra over registry paths
//! - [`target`]: per-file destination resolution
//! - [`dedup`]: cross-item resolution with last-wins deduplication
//! - [`writer`]: the write effect and its report
//! - [`env_file`]: additive `.env` merging

pub mod dedup;
pub mod env_file;
pub mod paths;
pub mod target;
pub mod writer;

pub use dedup::{can_deduplicate, resolve_files_with_dedup, ResolvedFile};
pub use paths::{find_common_root, resolve_nested_file_path};
pub use target::{resolve_file_path, resolve_page_target, TargetOptions};
pub use writer::{write_files, FixedAnswer, OverwritePrompt, WriteOptions, WriteReport};
