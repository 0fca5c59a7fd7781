// SPDX-License-Identifier: PMPL-1.0-or-later

//! Source rewriting ahead of string extraction
//!
//! Lets an extractor that understands `#` comments and implicit string
//! concatenation read JavaScript-style sources:
//!
//! - `"foo" +\n    "bar"` becomes `"foobar"` (same quote character on both sides)
//! - `    // note` becomes `    # note`
//!
//! Text that matches neither pattern passes through untouched.

use regex::Regex;

pub struct Preprocessor {
    string_join: Regex,
    line_comment: Regex,
}

impl Preprocessor {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            // No backreferences in `regex`, so each quote style gets its own branch.
            string_join: Regex::new(r#""\s*\+\s*"|'\s*\+\s*'"#)?,
            line_comment: Regex::new(r"(?m)^(\s*)//")?,
        })
    }

    pub fn join_string_continuations(&self, source: &str) -> String {
        self.string_join.replace_all(source, "").into_owned()
    }

    pub fn rewrite_line_comments(&self, source: &str) -> String {
        self.line_comment.replace_all(source, "${1}#").into_owned()
    }

    pub fn run(&self, source: &str) -> String {
        let joined = self.join_string_continuations(source);
        self.rewrite_line_comments(&joined)
    }
}

/// One-shot convenience around [`Preprocessor::run`].
pub fn run(source: &str) -> Result<String, regex::Error> {
    Ok(Preprocessor::new()?.run(source))
}
