// SPDX-License-Identifier: PMPL-1.0-or-later

//! Header blob parsing
//!
//! The header is the translation of the empty message id: a block of
//! `Name: value` lines. Field names are lower-cased with `-` mapped to `_`
//! (`Plural-Forms` becomes `plural_forms`).

use crate::error::{CatalogError, Result};
use crate::types::HeaderTable;

pub fn parse_header(blob: &str) -> Result<HeaderTable> {
    let mut table = HeaderTable::new();
    for (index, physical) in blob.lines().enumerate() {
        for line in physical.split('\r') {
            if line.is_empty() {
                continue;
            }
            let (name, value) = line
                .split_once(':')
                .ok_or_else(|| CatalogError::MalformedHeader {
                    line: index + 1,
                    text: line.to_string(),
                })?;
            table.insert(normalize_field_name(name), value.trim_start().to_string());
        }
    }
    Ok(table)
}

pub fn normalize_field_name(name: &str) -> String {
    name.replace('-', "_").to_lowercase()
}
