//! Project detection.
//!
//! Works out which framework a project uses and whether it keeps its
//! sources under `src/`. Both facts feed file target resolution.

pub mod file_detection;
pub mod project;

pub use project::{Framework, ProjectDetector, ProjectInfo};
