use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use colored::Colorize;
use glob::{Pattern, glob};
use walkdir::WalkDir;

use crate::core::extract::is_supported_file;

/// Directories that are never scanned, whatever the configuration says.
const ALWAYS_SKIPPED_DIRS: &[&str] = &["node_modules", ".git"];

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning a source root.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Paths relative to the source root, `/`-separated, sorted.
    pub files: Vec<String>,
    pub skipped_count: usize,
}

/// Collect every file an extractor supports under `root`.
///
/// `includes` narrows the walk to literal directories/files or glob matches
/// (all of `root` when empty). `excludes` drops literal path prefixes or
/// glob matches against the relative path.
pub fn scan_files(
    root: &Path,
    includes: &[String],
    excludes: &[String],
    verbose: bool,
) -> ScanResult {
    let mut files: BTreeSet<String> = BTreeSet::new();
    let mut skipped_count = 0;

    let mut literal_excludes: Vec<PathBuf> = Vec::new();
    let mut glob_excludes: Vec<Pattern> = Vec::new();
    for p in excludes {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_excludes.push(pattern),
                Err(e) => {
                    if verbose {
                        eprintln!(
                            "{} Invalid exclude pattern '{}': {}",
                            "warning:".bold().yellow(),
                            p,
                            e
                        );
                    }
                }
            }
        } else {
            literal_excludes.push(root.join(p));
        }
    }

    let roots: Vec<PathBuf> = if includes.is_empty() {
        vec![root.to_path_buf()]
    } else {
        let mut paths = Vec::new();
        for inc in includes {
            if is_glob_pattern(inc) {
                let full_pattern = root.join(inc);
                match glob(&full_pattern.to_string_lossy()) {
                    Ok(entries) => paths.extend(entries.flatten()),
                    Err(e) => {
                        if verbose {
                            eprintln!(
                                "{} Invalid include pattern '{}': {}",
                                "warning:".bold().yellow(),
                                inc,
                                e
                            );
                        }
                    }
                }
            } else {
                let path = root.join(inc);
                if path.exists() {
                    paths.push(path);
                } else if verbose {
                    eprintln!(
                        "{} Include path does not exist: {}",
                        "warning:".bold().yellow(),
                        path.display()
                    );
                }
            }
        }
        paths
    };

    for start in roots {
        let walker = WalkDir::new(start).into_iter().filter_entry(|entry| {
            !(entry.file_type().is_dir()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| ALWAYS_SKIPPED_DIRS.contains(&name)))
        });

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || !is_scannable_file(path) {
                continue;
            }
            if literal_excludes.iter().any(|ex| path.starts_with(ex)) {
                continue;
            }

            let relative = relative_path(root, path);
            if glob_excludes.iter().any(|p| p.matches(&relative)) {
                continue;
            }
            files.insert(relative);
        }
    }

    ScanResult {
        files: files.into_iter().collect(),
        skipped_count,
    }
}

/// Supported source file that is not a type declaration.
fn is_scannable_file(path: &Path) -> bool {
    let is_declaration = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name.ends_with(".d.ts"));
    !is_declaration && is_supported_file(path)
}

fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use std::fs::{self, File};

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_scan_supported_files() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        File::create(dir_path.join("app.tsx")).unwrap();
        File::create(dir_path.join("Hello.vue")).unwrap();
        File::create(dir_path.join("index.html")).unwrap();
        File::create(dir_path.join("style.css")).unwrap();
        File::create(dir_path.join("types.d.ts")).unwrap();

        let result = scan_files(dir_path, &[], &[], false);

        assert_eq!(result.files, vec!["Hello.vue", "app.tsx", "index.html"]);
    }

    #[test]
    fn test_scan_skips_node_modules() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let node_modules = dir_path.join("node_modules").join("lib");
        fs::create_dir_all(&node_modules).unwrap();
        File::create(node_modules.join("index.js")).unwrap();
        File::create(dir_path.join("app.ts")).unwrap();

        let result = scan_files(dir_path, &[], &[], false);

        assert_eq!(result.files, vec!["app.ts"]);
    }

    #[test]
    fn test_scan_relative_nested_paths() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let components = dir_path.join("src").join("components");
        fs::create_dir_all(&components).unwrap();
        File::create(components.join("Button.tsx")).unwrap();
        let pages = dir_path.join("src").join("pages");
        fs::create_dir_all(&pages).unwrap();
        File::create(pages.join("home.vue")).unwrap();

        let result = scan_files(dir_path, &[], &[], false);

        assert_eq!(
            result.files,
            vec!["src/components/Button.tsx", "src/pages/home.vue"]
        );
    }

    #[test]
    fn test_scan_with_includes() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        fs::create_dir(dir_path.join("src")).unwrap();
        File::create(dir_path.join("src").join("app.tsx")).unwrap();
        fs::create_dir(dir_path.join("lib")).unwrap();
        File::create(dir_path.join("lib").join("utils.ts")).unwrap();

        let result = scan_files(
            dir_path,
            &["src".to_owned(), "nonexistent".to_owned()],
            &[],
            false,
        );

        assert_eq!(result.files, vec!["src/app.tsx"]);
    }

    #[test]
    fn test_scan_overlapping_includes_deduplicated() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let components = dir_path.join("src").join("components");
        fs::create_dir_all(&components).unwrap();
        File::create(components.join("Button.tsx")).unwrap();

        let result = scan_files(
            dir_path,
            &["src".to_owned(), "src/components".to_owned()],
            &[],
            false,
        );

        assert_eq!(result.files, vec!["src/components/Button.tsx"]);
    }

    #[test]
    fn test_scan_with_glob_include() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let src = dir_path.join("src");
        fs::create_dir_all(&src).unwrap();
        File::create(src.join("a.ts")).unwrap();
        File::create(src.join("b.vue")).unwrap();

        let result = scan_files(dir_path, &["src/**/*.vue".to_owned()], &[], false);

        assert_eq!(result.files, vec!["src/b.vue"]);
    }

    #[test]
    fn test_scan_excludes_mixed_patterns() {
        let dir = tempdir().unwrap();
        let dir_path = dir.path();

        let components = dir_path.join("src").join("components");
        fs::create_dir_all(&components).unwrap();
        File::create(components.join("Button.tsx")).unwrap();
        File::create(components.join("Button.test.tsx")).unwrap();
        let generated = dir_path.join("src").join("generated");
        fs::create_dir_all(&generated).unwrap();
        File::create(generated.join("api.ts")).unwrap();

        let result = scan_files(
            dir_path,
            &[],
            &["src/generated".to_owned(), "**/*.test.tsx".to_owned()],
            false,
        );

        assert_eq!(result.files, vec!["src/components/Button.tsx"]);
    }

    #[test]
    fn test_is_glob_pattern() {
        assert!(is_glob_pattern("src/*"));
        assert!(is_glob_pattern("src/**/*.tsx"));
        assert!(!is_glob_pattern("src"));
        assert!(!is_glob_pattern("app/[locale]"));
    }
}
