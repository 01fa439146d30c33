//! ASCII directory tree of a project, written to a Markdown file.

use crate::Result;
use std::fs;
use std::path::Path;

pub const DEFAULT_EXCLUDED: [&str; 4] = ["node_modules", ".next", ".git", ".vscode"];

pub const DEFAULT_OUTPUT: &str = "폴더 구조.md";

/// Render the tree below `root`, one entry per line.
///
/// Entries are sorted by name; names in `excluded` are left out together
/// with everything beneath them.
pub fn render_tree(root: &Path, excluded: &[&str]) -> Result<String> {
    let mut out = String::new();
    render_dir(root, "", excluded, &mut out)?;
    Ok(out)
}

fn render_dir(dir: &Path, prefix: &str, excluded: &[&str], out: &mut String) -> Result<()> {
    let mut names: Vec<String> = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<std::io::Result<_>>()?;
    names.retain(|n| !excluded.contains(&n.as_str()));
    names.sort();

    let count = names.len();
    for (i, name) in names.into_iter().enumerate() {
        let is_last = i + 1 == count;
        out.push_str(prefix);
        out.push_str(if is_last { "└─" } else { "├─" });
        out.push_str(&name);
        out.push('\n');

        // Linked directories are listed but not entered.
        let path = dir.join(&name);
        if fs::symlink_metadata(&path)?.is_dir() {
            let child_prefix = format!("{prefix}{}", if is_last { "   " } else { "│  " });
            render_dir(&path, &child_prefix, excluded, out)?;
        }
    }
    Ok(())
}

/// Render the tree of `root` with the default exclusions and save it.
pub fn write_tree(root: &Path, output: &Path) -> Result<()> {
    let tree = render_tree(root, &DEFAULT_EXCLUDED)?;
    fs::write(output, tree)?;
    tracing::info!(output = %output.display(), "folder structure saved");
    Ok(())
}
