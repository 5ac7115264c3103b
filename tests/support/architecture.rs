//! Source scanning for the layering rules.

use std::fs;
use std::path::{Path, PathBuf};

/// One offending line.
#[derive(Debug)]
pub struct Hit {
    pub path: String,
    pub line: usize,
    pub text: String,
}

/// A Rust source file under the crate root.
pub struct Source {
    /// Path relative to the crate root, `/`-separated.
    pub path: String,
    pub content: String,
}

impl Source {
    fn is_mod_file(&self) -> bool {
        self.path == "mod.rs" || self.path.ends_with("/mod.rs")
    }

    /// Non-comment lines with their 1-based numbers.
    fn code_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.content
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line))
            .filter(|(_, line)| !line.trim_start().starts_with("//"))
    }

    fn hit(&self, line: usize, text: &str) -> Hit {
        Hit {
            path: self.path.clone(),
            line,
            text: text.to_string(),
        }
    }
}

fn crate_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Every `.rs` file below `relative_dir`, sorted by path.
pub fn sources(relative_dir: &str) -> Vec<Source> {
    let root = crate_root();
    let mut pending = vec![root.join(relative_dir)];
    let mut found: Vec<PathBuf> = Vec::new();

    while let Some(dir) = pending.pop() {
        let entries = fs::read_dir(&dir)
            .unwrap_or_else(|e| panic!("failed to read dir {}: {e}", dir.display()));
        for entry in entries {
            let path = entry
                .unwrap_or_else(|e| panic!("failed to read entry in {}: {e}", dir.display()))
                .path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                found.push(path);
            }
        }
    }

    found.sort();
    found
        .into_iter()
        .map(|path| Source {
            content: fs::read_to_string(&path)
                .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display())),
            path: display_path(&root, &path),
        })
        .collect()
}

fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Code lines below `relative_dir` mentioning any of `needles`.
///
/// Test modules are scanned too; comment lines are not.
pub fn lines_mentioning(relative_dir: &str, needles: &[&str]) -> Vec<Hit> {
    sources(relative_dir)
        .iter()
        .flat_map(|source| {
            source
                .code_lines()
                .filter(|(_, line)| needles.iter().any(|needle| line.contains(needle)))
                .map(|(number, line)| source.hit(number, line))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Lines in `mod.rs` files that are neither declarations, re-exports,
/// attributes nor comments.
pub fn mod_file_bodies(relative_dir: &str) -> Vec<Hit> {
    const ALLOWED: [&str; 4] = ["pub mod ", "mod ", "pub use ", "#[cfg"];

    sources(relative_dir)
        .iter()
        .filter(|source| source.is_mod_file())
        .flat_map(|source| {
            source
                .code_lines()
                .filter(|(_, line)| {
                    let line = line.trim();
                    !line.is_empty() && !ALLOWED.iter().any(|prefix| line.starts_with(prefix))
                })
                .map(|(number, line)| source.hit(number, line))
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Contents of a file given relative to the crate root.
pub fn read_relative(relative_path: &str) -> String {
    fs::read_to_string(crate_root().join(relative_path))
        .unwrap_or_else(|e| panic!("failed to read {relative_path}: {e}"))
}
