// SPDX-License-Identifier: PMPL-1.0-or-later

//! Export configuration handed from the command line to the library

use crate::output::OutputFormat;
use std::path::PathBuf;

/// Everything one export run needs. The default-locale fallback is an
/// explicit field rather than something read from the environment later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub domain: String,
    pub search_path: PathBuf,
    /// Preference-ordered languages requested by the caller.
    pub languages: Vec<String>,
    /// Used when `languages` is empty.
    pub fallback_languages: Vec<String>,
    pub format: OutputFormat,
    pub indent: Option<usize>,
}

impl ExportConfig {
    pub fn new(domain: impl Into<String>, search_path: impl Into<PathBuf>) -> Self {
        Self {
            domain: domain.into(),
            search_path: search_path.into(),
            languages: Vec::new(),
            fallback_languages: Vec::new(),
            format: OutputFormat::default(),
            indent: None,
        }
    }

    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_fallback_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fallback_languages = languages.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_indent(mut self, indent: Option<usize>) -> Self {
        self.indent = indent;
        self
    }

    /// The language list the decoder will actually probe.
    pub fn effective_languages(&self) -> &[String] {
        if self.languages.is_empty() {
            &self.fallback_languages
        } else {
            &self.languages
        }
    }
}
