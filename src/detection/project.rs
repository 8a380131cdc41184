//! Project framework and layout detection.

use std::fmt;
use std::path::Path;

use super::file_detection::{config_file_exists, dir_exists, file_exists};

/// Detected frontend framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framework {
    NextApp,
    NextPages,
    ReactRouter,
    Laravel,
    Vite,
    #[default]
    Unknown,
}

impl Framework {
    /// Stable name used in logs and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::NextApp => "next-app",
            Self::NextPages => "next-pages",
            Self::ReactRouter => "react-router",
            Self::Laravel => "laravel",
            Self::Vite => "vite",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Facts about the consuming project that influence where files land.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectInfo {
    pub framework: Framework,
    /// Whether sources live under a `src/` directory.
    pub src_dir: bool,
}

impl ProjectInfo {
    pub fn new(framework: Framework, src_dir: bool) -> Self {
        Self { framework, src_dir }
    }
}

/// Detects the framework from marker files.
pub struct ProjectDetector;

impl ProjectDetector {
    /// Inspect a project root.
    pub fn detect(project_root: &Path) -> ProjectInfo {
        let src_dir = dir_exists(project_root, "src");
        let framework = Self::detect_framework(project_root, src_dir);

        tracing::debug!(
            framework = framework.name(),
            src_dir,
            "Detected project layout"
        );

        ProjectInfo { framework, src_dir }
    }

    fn detect_framework(project_root: &Path, src_dir: bool) -> Framework {
        let app_dir = if src_dir { "src/app" } else { "app" };

        if config_file_exists(project_root, "next.config").is_some() {
            return if dir_exists(project_root, app_dir) {
                Framework::NextApp
            } else {
                Framework::NextPages
            };
        }

        if config_file_exists(project_root, "react-router.config").is_some() {
            return Framework::ReactRouter;
        }

        if file_exists(project_root, "artisan") {
            return Framework::Laravel;
        }

        if config_file_exists(project_root, "vite.config").is_some() {
            return Framework::Vite;
        }

        Framework::Unknown
    }
}
