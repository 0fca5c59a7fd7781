// SPDX-License-Identifier: PMPL-1.0-or-later

//! Error taxonomy for catalog decoding and normalization

use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// No candidate language resolved to a catalog file.
    #[error(
        "no catalog for domain `{domain}` under {} ({} candidate paths tried)",
        .search_path.display(),
        .tried.len()
    )]
    ResourceNotFound {
        domain: String,
        search_path: PathBuf,
        tried: Vec<PathBuf>,
    },

    /// The binary container or its contents failed a structural check.
    #[error("malformed catalog{}: {reason}", describe_origin(.path.as_deref()))]
    MalformedCatalog {
        path: Option<PathBuf>,
        reason: String,
    },

    /// A non-empty header line has no `:` separator.
    #[error("malformed header line {line}: {text:?} has no `:` separator")]
    MalformedHeader { line: usize, text: String },

    /// A catalog file was found but could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CatalogError {
    pub fn malformed(path: Option<&Path>, reason: impl Into<String>) -> Self {
        CatalogError::MalformedCatalog {
            path: path.map(Path::to_path_buf),
            reason: reason.into(),
        }
    }

    /// Attach the catalog path to a path-less `MalformedCatalog`.
    pub fn with_path(self, catalog: &Path) -> Self {
        match self {
            CatalogError::MalformedCatalog { path: None, reason } => {
                CatalogError::MalformedCatalog {
                    path: Some(catalog.to_path_buf()),
                    reason,
                }
            }
            other => other,
        }
    }
}

fn describe_origin(path: Option<&Path>) -> String {
    path.map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}
