//! Writing resolved files into the project.
//!
//! Writes happen sequentially after resolution completes. They are not
//! transactional: a failure midway leaves earlier files written.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RegkitError, Result};
use crate::files::dedup::ResolvedFile;
use crate::files::env_file::{is_env_file, merge_env_content};

/// Decides whether an existing, different file may be replaced.
pub trait OverwritePrompt {
    fn confirm_overwrite(&mut self, path: &Path) -> bool;
}

/// Answers every prompt with a fixed value.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl OverwritePrompt for FixedAnswer {
    fn confirm_overwrite(&mut self, _path: &Path) -> bool {
        self.0
    }
}

/// Options for [`write_files`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WriteOptions {
    /// Replace changed files without asking.
    pub overwrite: bool,
}

/// What happened to each destination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    pub created: Vec<PathBuf>,
    pub updated: Vec<PathBuf>,
    /// Unchanged, declined, or content-less files.
    pub skipped: Vec<PathBuf>,
}

impl WriteReport {
    /// Every path that was written.
    pub fn written(&self) -> impl Iterator<Item = &PathBuf> {
        self.created.iter().chain(self.updated.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.created.is_empty() && self.updated.is_empty() && self.skipped.is_empty()
    }
}

/// Write files to disk, creating parent directories as needed.
///
/// `.env` files only gain keys they do not have yet. A destination that is
/// a directory is an error.
pub fn write_files(
    files: &[ResolvedFile],
    options: WriteOptions,
    prompt: &mut dyn OverwritePrompt,
) -> Result<WriteReport> {
    let mut report = WriteReport::default();

    for resolved in files {
        let target = &resolved.target;
        let Some(content) = resolved.content() else {
            tracing::debug!(path = %resolved.file.path, "File has no content, skipping");
            report.skipped.push(target.clone());
            continue;
        };

        if target.is_dir() {
            return Err(RegkitError::TargetIsDirectory {
                path: target.clone(),
            });
        }

        if !target.exists() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(target, content)?;
            tracing::debug!(path = %target.display(), "Created file");
            report.created.push(target.clone());
            continue;
        }

        let existing = fs::read_to_string(target)?;

        if is_env_file(target) {
            match merge_env_content(&existing, content) {
                Some(merged) => {
                    fs::write(target, merged)?;
                    tracing::debug!(path = %target.display(), "Merged env file");
                    report.updated.push(target.clone());
                }
                None => report.skipped.push(target.clone()),
            }
            continue;
        }

        if existing == content {
            report.skipped.push(target.clone());
            continue;
        }

        if !options.overwrite && !prompt.confirm_overwrite(target) {
            tracing::info!(path = %target.display(), "Keeping existing file");
            report.skipped.push(target.clone());
            continue;
        }

        fs::write(target, content)?;
        tracing::debug!(path = %target.display(), "Updated file");
        report.updated.push(target.clone());
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::item::{ItemType, RegistryItemFile};
    use tempfile::TempDir;

    fn resolved(target: PathBuf, content: Option<&str>) -> ResolvedFile {
        let mut file = RegistryItemFile::new("x", ItemType::Ui);
        file.content = content.map(str::to_string);
        ResolvedFile { file, target }
    }

    struct CountingPrompt {
        asked: usize,
        answer: bool,
    }

    impl OverwritePrompt for CountingPrompt {
        fn confirm_overwrite(&mut self, _path: &Path) -> bool {
            self.asked += 1;
            self.answer
        }
    }

    #[test]
    fn creates_files_and_directories() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("components/ui/button.tsx");

        let report = write_files(
            &[resolved(target.clone(), Some("button"))],
            WriteOptions::default(),
            &mut FixedAnswer(false),
        )
        .unwrap();

        assert_eq!(report.created, vec![target.clone()]);
        assert_eq!(fs::read_to_string(target).unwrap(), "button");
    }

    #[test]
    fn unchanged_files_are_skipped_without_prompt() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("a.tsx");
        fs::write(&target, "same").unwrap();

        let mut prompt = CountingPrompt { asked: 0, answer: true };
        let report = write_files(
            &[resolved(target.clone(), Some("same"))],
            WriteOptions::default(),
            &mut prompt,
        )
        .unwrap();

        assert_eq!(prompt.asked, 0);
        assert_eq!(report.skipped, vec![target]);
    }

    #[test]
    fn declined_overwrite_keeps_existing() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("a.tsx");
        fs::write(&target, "mine").unwrap();

        let mut prompt = CountingPrompt { asked: 0, answer: false };
        let report = write_files(
            &[resolved(target.clone(), Some("theirs"))],
            WriteOptions::default(),
            &mut prompt,
        )
        .unwrap();

        assert_eq!(prompt.asked, 1);
        assert_eq!(report.skipped, vec![target.clone()]);
        assert_eq!(fs::read_to_string(target).unwrap(), "mine");
    }

    #[test]
    fn overwrite_option_replaces_without_prompt() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("a.tsx");
        fs::write(&target, "mine").unwrap();

        let mut prompt = CountingPrompt { asked: 0, answer: false };
        let report = write_files(
            &[resolved(target.clone(), Some("theirs"))],
            WriteOptions { overwrite: true },
            &mut prompt,
        )
        .unwrap();

        assert_eq!(prompt.asked, 0);
        assert_eq!(report.updated, vec![target.clone()]);
        assert_eq!(fs::read_to_string(target).unwrap(), "theirs");
    }

    #[test]
    fn env_files_gain_only_new_keys() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join(".env.local");
        fs::write(&target, "API_KEY=mine\n").unwrap();

        let report = write_files(
            &[resolved(target.clone(), Some("API_KEY=theirs\nNEW=1\n"))],
            WriteOptions { overwrite: true },
            &mut FixedAnswer(true),
        )
        .unwrap();

        assert_eq!(report.updated, vec![target.clone()]);
        assert_eq!(fs::read_to_string(target).unwrap(), "API_KEY=mine\nNEW=1\n");
    }

    #[test]
    fn directory_destination_is_an_error() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("button.tsx");
        fs::create_dir(&target).unwrap();

        let err = write_files(
            &[resolved(target.clone(), Some("x"))],
            WriteOptions { overwrite: true },
            &mut FixedAnswer(true),
        )
        .unwrap_err();

        assert!(matches!(err, RegkitError::TargetIsDirectory { path } if path == target));
    }

    #[test]
    fn content_less_files_are_skipped() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("empty.tsx");
        let report = write_files(
            &[resolved(target.clone(), None)],
            WriteOptions::default(),
            &mut FixedAnswer(true),
        )
        .unwrap();
        assert_eq!(report.skipped, vec![target.clone()]);
        assert!(!target.exists());
    }
}
