//! Copy selected source files into one flat directory.
//!
//! `src/app/api/route.ts` under the project root becomes
//! `<destination>/src_app_api_route.ts`.

use crate::{OrganizerConfig, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// What [`organize`] copied, as `(source, destination)` pairs.
#[derive(Debug, Clone, Default)]
pub struct OrganizeReport {
    pub copied: Vec<(PathBuf, PathBuf)>,
    pub skipped_dirs: Vec<PathBuf>,
}

/// Copy every allow-listed file under the configured source roots.
pub fn organize(config: &OrganizerConfig) -> Result<OrganizeReport> {
    let root = &config.project_root;
    let destination = root.join(&config.destination);
    fs::create_dir_all(&destination)?;

    let mut report = OrganizeReport::default();
    for source in &config.source_dirs {
        let dir = root.join(source);
        if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), "source directory not found, skipping");
            continue;
        }
        walk(config, &dir, &destination, &mut report)?;
    }

    tracing::info!(
        copied = report.copied.len(),
        skipped_dirs = report.skipped_dirs.len(),
        "organize finished"
    );
    Ok(report)
}

/// Copy the allowed files below `dir`.
///
/// Directory symlinks are listed but never entered, so a link back up the
/// tree cannot make the walk loop.
fn walk(
    config: &OrganizerConfig,
    dir: &Path,
    destination: &Path,
    report: &mut OrganizeReport,
) -> Result<()> {
    let root = &config.project_root;
    let mut skipped = Vec::new();

    let entries = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            if !entry.file_type().is_dir() {
                return true;
            }
            let relative = relative_slash_path(root, entry.path());
            let excluded = config
                .excluded_dirs
                .iter()
                .any(|excluded| relative.contains(excluded.as_str()));
            if excluded {
                tracing::debug!(dir = %relative, "excluded");
                skipped.push(entry.path().to_path_buf());
            }
            !excluded
        });

    for entry in entries {
        let entry = entry?;
        // Symlinks to files are copied through; links to directories are not.
        let path = entry.path();
        if !path.is_file() || !has_allowed_extension(path, &config.extensions) {
            continue;
        }
        let target = destination.join(flat_name(root, path));
        copy_preserving_mtime(path, &target)?;
        tracing::debug!(from = %path.display(), to = %target.display(), "copied");
        report.copied.push((entry.into_path(), target));
    }

    report.skipped_dirs.extend(skipped);
    Ok(())
}

fn has_allowed_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}

/// Root-relative path with its components joined by `_`.
pub fn flat_name(root: &Path, path: &Path) -> String {
    relative_components(root, path).join("_")
}

fn relative_slash_path(root: &Path, path: &Path) -> String {
    relative_components(root, path).join("/")
}

fn relative_components(root: &Path, path: &Path) -> Vec<String> {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect()
}

fn copy_preserving_mtime(from: &Path, to: &Path) -> Result<()> {
    fs::copy(from, to)?;
    let modified = fs::metadata(from)?.modified()?;
    fs::File::options().write(true).open(to)?.set_modified(modified)?;
    Ok(())
}
