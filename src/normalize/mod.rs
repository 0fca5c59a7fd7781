// SPDX-License-Identifier: PMPL-1.0-or-later

//! Catalog normalizer
//!
//! Folds decoded entries into a [`CatalogDocument`]: entries are sorted by
//! `(text, ordinal)`, the header blob becomes a [`HeaderTable`], and
//! plural variants are gathered under their base text in ordinal order.
//!
//! [`HeaderTable`]: crate::types::HeaderTable

pub mod header;

use crate::error::{CatalogError, Result};
use crate::types::{CatalogDocument, CatalogEntry, CatalogKey, MessageFamily, OrderedTable};

pub use header::parse_header;

/// A family under construction.
enum Draft {
    Header(MessageFamily),
    Singular(String),
    Plural(Vec<String>),
}

impl Draft {
    fn kind(&self) -> &'static str {
        match self {
            Draft::Header(_) => "header",
            Draft::Singular(_) => "singular",
            Draft::Plural(_) => "plural",
        }
    }

    fn finish(self) -> MessageFamily {
        match self {
            Draft::Header(family) => family,
            Draft::Singular(text) => MessageFamily::Singular(text),
            Draft::Plural(variants) => MessageFamily::Plural(variants),
        }
    }
}

/// Build the ordered document for a set of decoded entries.
///
/// Later duplicates of the same key overwrite earlier ones. A text used both
/// as a plain key and as a plural key, or a plural family with a missing
/// ordinal, is reported as a malformed catalog and no document is built.
pub fn normalize(mut entries: Vec<CatalogEntry>) -> Result<CatalogDocument> {
    // Stable, so the last of several identical keys wins below.
    entries.sort_by(|a, b| a.key.cmp(&b.key));

    let mut drafts: OrderedTable<Draft> = OrderedTable::new();
    for CatalogEntry { key, value } in entries {
        match key {
            CatalogKey::Plain(text) if text.is_empty() => {
                let table = parse_header(&value)?;
                claim(&mut drafts, &text, Draft::Header(MessageFamily::Header(table)))?;
            }
            CatalogKey::Plain(text) => {
                claim(&mut drafts, &text, Draft::Singular(value))?;
            }
            CatalogKey::Plural(text, ordinal) => {
                let draft = drafts.get_or_insert_with(&text, || Draft::Plural(Vec::new()));
                let slots = match draft {
                    Draft::Plural(slots) => slots,
                    other => return Err(conflict(&text, other.kind())),
                };
                // Sorted input: ordinals for one text arrive ascending, so a
                // jump past the end is a gap.
                let next = slots.len();
                match usize::try_from(ordinal) {
                    Ok(index) if index < next => slots[index] = value,
                    Ok(index) if index == next => slots.push(value),
                    _ => {
                        return Err(CatalogError::malformed(
                            None,
                            format!("plural message {:?} has no variant {}", text, next),
                        ))
                    }
                }
            }
        }
    }

    let families = drafts.map_values(Draft::finish);
    Ok(CatalogDocument::new(families))
}

/// Store a header or singular draft, refusing to replace a plural family.
fn claim(drafts: &mut OrderedTable<Draft>, text: &str, draft: Draft) -> Result<()> {
    if matches!(drafts.get(text), Some(Draft::Plural(_))) {
        return Err(conflict(text, draft.kind()));
    }
    drafts.insert(text, draft);
    Ok(())
}

fn conflict(text: &str, other_kind: &str) -> CatalogError {
    CatalogError::malformed(
        None,
        format!(
            "message {:?} is used both as a plural and as a {} message",
            text, other_kind
        ),
    )
}
