// SPDX-License-Identifier: PMPL-1.0-or-later

//! Serialization of catalog documents

use crate::error::Result;
use crate::types::CatalogDocument;
use clap::ValueEnum;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            _ => None,
        }
    }

    /// The format implied by a file name's extension, if it names one.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::parse)
    }

    /// Render `document`. `indent` only affects JSON: `None` is compact,
    /// `Some(n)` pretty-prints with `n` spaces per level.
    pub fn render(&self, document: &CatalogDocument, indent: Option<usize>) -> Result<String> {
        match self {
            OutputFormat::Json => to_json(document, indent),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(document)?),
        }
    }
}

/// JSON with non-ASCII text written as UTF-8, never as `\u` escapes.
pub fn to_json(document: &CatalogDocument, indent: Option<usize>) -> Result<String> {
    match indent {
        None => Ok(serde_json::to_string(document)?),
        Some(width) => {
            let indent = " ".repeat(width);
            let mut buffer = Vec::new();
            let mut serializer = serde_json::Serializer::with_formatter(
                &mut buffer,
                PrettyFormatter::with_indent(indent.as_bytes()),
            );
            document.serialize(&mut serializer)?;
            Ok(String::from_utf8_lossy(&buffer).into_owned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MessageFamily, OrderedTable};

    fn sample() -> CatalogDocument {
        let mut header = OrderedTable::new();
        header.insert("language", "fr".to_string());
        let mut families = OrderedTable::new();
        families.insert("", MessageFamily::Header(header));
        families.insert("coffee", MessageFamily::Singular("café ☕".into()));
        families.insert(
            "file",
            MessageFamily::Plural(vec!["fichier".into(), "fichiers".into()]),
        );
        CatalogDocument::new(families)
    }

    #[test]
    fn compact_json() {
        assert_eq!(
            to_json(&sample(), None).unwrap(),
            r#"{"":{"language":"fr"},"coffee":[null,"café ☕"],"file":["fichier","fichiers"]}"#
        );
    }

    #[test]
    fn indented_json() {
        let expected = "{\n  \"\": {\n    \"language\": \"fr\"\n  },\n  \"coffee\": [\n    null,\n    \"café ☕\"\n  ],\n  \"file\": [\n    \"fichier\",\n    \"fichiers\"\n  ]\n}";
        assert_eq!(to_json(&sample(), Some(2)).unwrap(), expected);
    }

    #[test]
    fn zero_indent_breaks_lines_only() {
        let rendered = to_json(&sample(), Some(0)).unwrap();
        assert!(rendered.starts_with("{\n\"\": {\n\"language\": \"fr\"\n},"));
    }

    #[test]
    fn yaml_keeps_order_and_null_slot() {
        let rendered = OutputFormat::Yaml.render(&sample(), None).unwrap();
        let coffee = rendered.find("coffee").unwrap();
        let file = rendered.find("file").unwrap();
        assert!(coffee < file);
        assert!(rendered.contains("- null"));
    }

    #[test]
    fn parse_format_names() {
        assert_eq!(OutputFormat::parse("YML"), Some(OutputFormat::Yaml));
        assert_eq!(OutputFormat::parse("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("xml"), None);
        assert_eq!(
            OutputFormat::from_path(Path::new("out/fr.yml")),
            Some(OutputFormat::Yaml)
        );
        assert_eq!(OutputFormat::from_path(Path::new("fr")), None);
    }
}
