// Tests for the project housekeeping helpers: flat file copy and folder tree.

use std::fs;
use std::path::Path;
use wordmaster::organizer::organize;
use wordmaster::tree::{render_tree, write_tree, DEFAULT_EXCLUDED};
use wordmaster::OrganizerConfig;

fn touch(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn config_for(root: &Path) -> OrganizerConfig {
    OrganizerConfig {
        project_root: root.to_path_buf(),
        ..Default::default()
    }
}

// ── organize ──────────────────────────────────────────────────────────────────

#[test]
fn copies_allowed_files_with_path_encoded_names() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "src/app/page.tsx", "page");
    touch(root, "src/utils/auth.ts", "auth");
    touch(root, "src/styles/site.css", "css");
    touch(root, "prisma/schema.prisma", "schema");

    let report = organize(&config_for(root)).unwrap();

    let dest = root.join("project_knowledge");
    assert_eq!(report.copied.len(), 3);
    assert_eq!(fs::read_to_string(dest.join("src_app_page.tsx")).unwrap(), "page");
    assert_eq!(fs::read_to_string(dest.join("src_utils_auth.ts")).unwrap(), "auth");
    assert_eq!(fs::read_to_string(dest.join("prisma_schema.prisma")).unwrap(), "schema");
    assert!(!dest.join("src_styles_site.css").exists());
}

#[test]
fn excluded_directories_are_skipped_entirely() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "prisma/schema.prisma", "schema");
    touch(root, "prisma/migrations/001/migration.prisma", "m");

    let report = organize(&config_for(root)).unwrap();

    let names: Vec<String> = report
        .copied
        .iter()
        .map(|(_, to)| to.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["prisma_schema.prisma"]);
    assert_eq!(report.skipped_dirs.len(), 1);
}

#[test]
fn missing_source_roots_are_tolerated() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "src/index.ts", "x");

    let report = organize(&config_for(dir.path())).unwrap();

    assert_eq!(report.copied.len(), 1);
    assert!(dir.path().join("project_knowledge").is_dir());
}

#[test]
fn custom_extensions_and_destination() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "lib/a.rs", "a");
    touch(root, "lib/b.ts", "b");

    let config = OrganizerConfig {
        project_root: root.to_path_buf(),
        source_dirs: vec!["lib".into()],
        destination: "flat".into(),
        excluded_dirs: vec![],
        extensions: vec!["rs".into()],
    };
    let report = organize(&config).unwrap();

    assert_eq!(report.copied.len(), 1);
    assert!(root.join("flat/lib_a.rs").exists());
}

#[cfg(unix)]
#[test]
fn directory_symlink_cycles_are_not_followed() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "src/app/page.ts", "page");
    std::os::unix::fs::symlink(root.join("src"), root.join("src/app/loop")).unwrap();

    let report = organize(&config_for(root)).unwrap();

    assert_eq!(report.copied.len(), 1);
    assert!(root.join("project_knowledge/src_app_page.ts").exists());
}

#[cfg(unix)]
#[test]
fn file_symlinks_are_copied_through() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "shared/types.ts", "types");
    fs::create_dir_all(root.join("src")).unwrap();
    std::os::unix::fs::symlink(root.join("shared/types.ts"), root.join("src/types.ts")).unwrap();

    let report = organize(&config_for(root)).unwrap();

    assert_eq!(report.copied.len(), 1);
    assert_eq!(
        fs::read_to_string(root.join("project_knowledge/src_types.ts")).unwrap(),
        "types"
    );
}

// ── tree ──────────────────────────────────────────────────────────────────────

#[test]
fn tree_uses_branch_and_corner_markers() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "b.txt", "");
    touch(root, "a/inner.txt", "");
    touch(root, "a/z.txt", "");

    let tree = render_tree(root, &[]).unwrap();

    assert_eq!(tree, "├─a\n│  ├─inner.txt\n│  └─z.txt\n└─b.txt\n");
}

#[test]
fn tree_skips_excluded_names() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "src/main.ts", "");
    touch(root, "node_modules/pkg/index.js", "");
    touch(root, ".git/HEAD", "");

    let tree = render_tree(root, &DEFAULT_EXCLUDED).unwrap();

    assert_eq!(tree, "└─src\n   └─main.ts\n");
}

#[cfg(unix)]
#[test]
fn tree_lists_directory_links_without_entering_them() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch(root, "a/file.txt", "");
    std::os::unix::fs::symlink(root.join("a"), root.join("a/back")).unwrap();

    let tree = render_tree(root, &[]).unwrap();

    assert_eq!(tree, "└─a\n   ├─back\n   └─file.txt\n");
}

#[test]
fn write_tree_saves_markdown_file() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "README.md", "");
    let out = tempfile::tempdir().unwrap();
    let output = out.path().join("tree.md");

    write_tree(dir.path(), &output).unwrap();

    assert_eq!(fs::read_to_string(output).unwrap(), "└─README.md\n");
}
