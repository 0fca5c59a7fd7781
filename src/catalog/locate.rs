// SPDX-License-Identifier: PMPL-1.0-or-later

//! Catalog file resolution: `<search path>/<lang>/LC_MESSAGES/<domain>.mo`

use crate::error::{CatalogError, Result};
use crate::locale::candidate_languages;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const MESSAGES_DIR: &str = "LC_MESSAGES";
pub const MO_EXTENSION: &str = "mo";

/// Every path probed for `domain`, in probing order.
pub fn candidate_paths<S: AsRef<str>>(
    domain: &str,
    search_path: &Path,
    languages: &[S],
) -> Vec<PathBuf> {
    let file_name = format!("{}.{}", domain, MO_EXTENSION);
    candidate_languages(languages)
        .into_iter()
        .map(|language| search_path.join(language).join(MESSAGES_DIR).join(&file_name))
        .collect()
}

/// The first candidate that exists as a regular file.
pub fn resolve<S: AsRef<str>>(domain: &str, search_path: &Path, languages: &[S]) -> Result<PathBuf> {
    let candidates = candidate_paths(domain, search_path, languages);
    for candidate in &candidates {
        debug!(path = %candidate.display(), "probing catalog candidate");
        if candidate.is_file() {
            return Ok(candidate.clone());
        }
    }
    Err(CatalogError::ResourceNotFound {
        domain: domain.to_string(),
        search_path: search_path.to_path_buf(),
        tried: candidates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, language: &str, domain: &str) -> PathBuf {
        let dir = root.join(language).join(MESSAGES_DIR);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(format!("{}.mo", domain));
        fs::write(&path, b"").unwrap();
        path
    }

    #[test]
    fn candidate_paths_follow_locale_layout() {
        let paths = candidate_paths("app", Path::new("/srv/locale"), &["pt_BR"]);
        assert_eq!(
            paths,
            vec![
                PathBuf::from("/srv/locale/pt_BR/LC_MESSAGES/app.mo"),
                PathBuf::from("/srv/locale/pt/LC_MESSAGES/app.mo"),
            ]
        );
    }

    #[test]
    fn resolve_prefers_earlier_language() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "de", "app");
        let fr = touch(dir.path(), "fr", "app");
        assert_eq!(resolve("app", dir.path(), &["fr", "de"]).unwrap(), fr);
    }

    #[test]
    fn resolve_falls_back_to_bare_language() {
        let dir = TempDir::new().unwrap();
        let pt = touch(dir.path(), "pt", "app");
        assert_eq!(resolve("app", dir.path(), &["pt_BR.UTF-8"]).unwrap(), pt);
    }

    #[test]
    fn resolve_ignores_directories_named_like_catalogs() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("fr/LC_MESSAGES/app.mo")).unwrap();
        assert!(matches!(
            resolve("app", dir.path(), &["fr"]),
            Err(CatalogError::ResourceNotFound { .. })
        ));
    }

    #[test]
    fn not_found_lists_every_candidate() {
        let dir = TempDir::new().unwrap();
        match resolve("app", dir.path(), &["es_MX", "fr"]) {
            Err(CatalogError::ResourceNotFound { tried, domain, .. }) => {
                assert_eq!(domain, "app");
                assert_eq!(tried.len(), 3);
            }
            other => panic!("expected ResourceNotFound, got {:?}", other),
        }
    }
}
