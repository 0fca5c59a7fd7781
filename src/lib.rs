// SPDX-License-Identifier: PMPL-1.0-or-later

//! gettext-json — compiled gettext catalogs as ordered documents.
//!
//! Reads a binary `.mo` catalog and re-expresses it as a deterministic,
//! key-ordered document for client-side runtimes:
//!
//! ```text
//! {
//!   "":       { "content_type": "text/plain; charset=UTF-8", "plural_forms": "..." },
//!   "apple":  [null, "pomme"],
//!   "banana": ["banane", "bananes"]
//! }
//! ```
//!
//! PIPELINE:
//! 1. **Catalog**: resolves `<path>/<lang>/LC_MESSAGES/<domain>.mo` and decodes
//!    the binary container in either byte order.
//! 2. **Normalize**: parses the header, sorts entries, and groups plural
//!    variants under their base key.
//! 3. **Output**: renders the document as JSON or YAML.

pub mod catalog;
pub mod config;
pub mod error;
pub mod locale;
pub mod normalize;
pub mod output;
pub mod preprocess;
pub mod types;

pub use config::ExportConfig;
pub use error::{CatalogError, Result};
pub use types::{CatalogDocument, CatalogEntry, CatalogKey, HeaderTable, MessageFamily};

/// Decode and normalize the catalog described by `config`.
pub fn load_document(config: &ExportConfig) -> Result<CatalogDocument> {
    tracing::debug!(
        domain = %config.domain,
        languages = ?config.effective_languages(),
        "exporting catalog"
    );
    let catalog = catalog::decode(
        &config.domain,
        &config.search_path,
        config.effective_languages(),
    )?;
    let path = catalog.path.clone();
    normalize::normalize(catalog.into_entries()).map_err(|err| err.with_path(&path))
}

/// Decode, normalize and render in one step. Nothing is returned unless
/// every stage succeeds.
pub fn export(config: &ExportConfig) -> Result<String> {
    let document = load_document(config)?;
    config.format.render(&document, config.indent)
}
