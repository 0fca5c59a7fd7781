// SPDX-License-Identifier: PMPL-1.0-or-later

//! Catalog decoder
//!
//! Resolves a compiled catalog for a domain and turns its binary contents
//! into [`CatalogEntry`] values. Plural messages are split into one entry
//! per variant, keyed by `(text, ordinal)`.

pub mod locate;
pub mod mo;

use crate::error::{CatalogError, Result};
use crate::types::{CatalogEntry, CatalogKey};
use encoding_rs::{Encoding, UTF_8};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub use mo::{ByteOrder, MoHeader};

/// A decoded catalog and where it came from.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub path: PathBuf,
    pub header: MoHeader,
    pub encoding: &'static Encoding,
    pub entries: Vec<CatalogEntry>,
}

/// Decode the catalog for `domain` under `search_path`.
///
/// `languages` is tried in order. Callers choosing between requested and
/// default languages go through [`crate::ExportConfig::effective_languages`].
pub fn decode<S: AsRef<str>>(domain: &str, search_path: &Path, languages: &[S]) -> Result<Catalog> {
    let path = locate::resolve(domain, search_path, languages)?;
    let bytes = fs::read(&path).map_err(|source| CatalogError::Io {
        path: path.clone(),
        source,
    })?;
    let catalog = Catalog::from_bytes(path, &bytes)?;
    info!(
        path = %catalog.path.display(),
        entries = catalog.entries.len(),
        byte_order = %catalog.header.byte_order,
        charset = catalog.encoding.name(),
        "decoded catalog"
    );
    Ok(catalog)
}

impl Catalog {
    /// Decode an in-memory MO image. `path` is only used for error reporting.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: &[u8]) -> Result<Self> {
        let path = path.into();
        let malformed = |reason: String| CatalogError::malformed(Some(&path), reason);

        let mo = mo::parse(bytes).map_err(|err| malformed(err.to_string()))?;
        let encoding = catalog_encoding(&mo).map_err(&malformed)?;

        let mut entries = Vec::with_capacity(mo.messages.len());
        for (index, message) in mo.messages.iter().enumerate() {
            let text = |raw: &[u8]| {
                decode_text(encoding, raw).ok_or_else(|| {
                    malformed(format!(
                        "message {} is not valid {}",
                        index,
                        encoding.name()
                    ))
                })
            };

            if message.original.contains(&0) {
                // Only the singular msgid names the family; msgid_plural is dropped.
                let base = message
                    .original
                    .split(|byte| *byte == 0)
                    .next()
                    .unwrap_or_default();
                let base = text(base)?;
                for (ordinal, variant) in message.translation.split(|byte| *byte == 0).enumerate() {
                    let ordinal = u32::try_from(ordinal)
                        .map_err(|_| malformed(format!("message {} has too many variants", index)))?;
                    entries.push(CatalogEntry::new(
                        CatalogKey::Plural(base.clone(), ordinal),
                        text(variant)?,
                    ));
                }
            } else {
                entries.push(CatalogEntry::new(
                    CatalogKey::Plain(text(message.original)?),
                    text(message.translation)?,
                ));
            }
        }

        Ok(Self {
            path,
            header: mo.header,
            encoding,
            entries,
        })
    }

    pub fn into_entries(self) -> Vec<CatalogEntry> {
        self.entries
    }
}

fn decode_text(encoding: &'static Encoding, raw: &[u8]) -> Option<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(raw)
        .map(|text| text.into_owned())
}

/// The encoding named by the header's `Content-Type` charset, UTF-8 if none.
fn catalog_encoding(mo: &mo::MoFile<'_>) -> std::result::Result<&'static Encoding, String> {
    let label = mo
        .messages
        .iter()
        .find(|message| message.original.is_empty())
        .and_then(|header| charset_label(header.translation));

    match label {
        None => Ok(UTF_8),
        // Left unfilled by msginit templates.
        Some(label) if label.eq_ignore_ascii_case("CHARSET") => {
            warn!("catalog header declares placeholder charset `CHARSET`, assuming UTF-8");
            Ok(UTF_8)
        }
        Some(label) => {
            Encoding::for_label(label.as_bytes()).ok_or_else(|| format!("unknown charset `{}`", label))
        }
    }
}

fn charset_label(blob: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(blob);
    text.lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-type"))
        .and_then(|(_, value)| {
            value.split(';').find_map(|param| {
                let (key, label) = param.split_once('=')?;
                key.trim()
                    .eq_ignore_ascii_case("charset")
                    .then(|| label.trim().trim_matches('"').to_string())
            })
        })
        .filter(|label| !label.is_empty())
}
