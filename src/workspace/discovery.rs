//! Finds the catalog files to check.

use std::collections::HashSet;
use std::path::{
    Path,
    PathBuf,
};

use ignore::WalkBuilder;

use super::types::WorkspaceError;
use crate::config::{
    FileMatcher,
    LintSettings,
};

/// Expands command-line paths into catalog files.
///
/// Files are taken as given. Directories are walked, honoring `.gitignore`, and
/// contribute the files matching the include and exclude patterns relative to that
/// directory. Each file appears once, in first-seen order.
///
/// # Errors
/// Fails when a path does not exist or a pattern is invalid.
pub fn discover_catalogs(
    paths: &[PathBuf],
    settings: &LintSettings,
) -> Result<Vec<PathBuf>, WorkspaceError> {
    let mut seen = HashSet::new();
    let mut found_files = Vec::new();

    for path in paths {
        if path.is_file() {
            if seen.insert(path.clone()) {
                found_files.push(path.clone());
            }
        } else if path.is_dir() {
            let matcher = FileMatcher::new(path.clone(), settings)?;
            for file in walk_dir(&matcher) {
                if seen.insert(file.clone()) {
                    found_files.push(file);
                }
            }
        } else {
            return Err(WorkspaceError::PathNotFound(path.clone()));
        }
    }

    tracing::debug!(count = found_files.len(), "Discovered catalog files");
    Ok(found_files)
}

/// ディレクトリ配下のカタログファイルを検索
fn walk_dir(matcher: &FileMatcher) -> Vec<PathBuf> {
    let mut found_files = Vec::new();

    // ignore クレートでファイルを走査
    for result in WalkBuilder::new(matcher.root())
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        // ファイルのみを対象
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path: &Path = entry.path();
        if matcher.is_catalog_file(path) {
            found_files.push(path.to_path_buf());
        }
    }

    // 出力順を安定させる
    found_files.sort();
    found_files
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use tempfile::TempDir;

    use super::*;

    fn touch(root: &Path, relative: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "").unwrap();
        path
    }

    #[googletest::test]
    fn test_walks_directory_with_patterns() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let de = touch(root, "locale/de.po");
        let fr = touch(root, "locale/fr.po");
        touch(root, "locale/app.pot");
        touch(root, "vendor/gem/es.po");
        let settings =
            LintSettings { exclude_patterns: vec!["vendor/**".to_string()], ..LintSettings::default() };

        let files = discover_catalogs(&[root.to_path_buf()], &settings).unwrap();

        expect_that!(files, elements_are![eq(&de), eq(&fr)]);
    }

    #[googletest::test]
    fn test_explicit_files_are_kept_once() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let template = touch(root, "app.pot");
        let fr = touch(root, "fr.po");

        let files = discover_catalogs(
            &[template.clone(), fr.clone(), root.to_path_buf()],
            &LintSettings::default(),
        )
        .unwrap();

        expect_that!(files, elements_are![eq(&template), eq(&fr)]);
    }

    #[googletest::test]
    fn test_respects_gitignore() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(root.join(".gitignore"), "build/\n").unwrap();
        let kept = touch(root, "locale/fr.po");
        touch(root, "build/fr.po");

        let files = discover_catalogs(&[root.to_path_buf()], &LintSettings::default()).unwrap();

        expect_that!(files, elements_are![eq(&kept)]);
    }

    #[googletest::test]
    fn test_missing_path_is_error() {
        let temp_dir = TempDir::new().unwrap();

        let result = discover_catalogs(&[temp_dir.path().join("nope")], &LintSettings::default());

        expect_that!(matches!(result, Err(WorkspaceError::PathNotFound(_))), eq(true));
    }
}
