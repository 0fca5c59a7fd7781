// SPDX-License-Identifier: PMPL-1.0-or-later

//! Locale identifiers and the candidate list the decoder probes.
//!
//! A POSIX locale name has the shape `language[_TERRITORY][.codeset][@modifier]`.
//! Catalog directories may be named after any less specific form of the
//! requested locale, so each identifier expands into a list of candidates
//! from most to least specific.
//!
//! The process environment is never read implicitly: callers that want the
//! usual `LANGUAGE`/`LC_ALL`/`LC_MESSAGES`/`LANG` fallback ask for it with
//! [`languages_from_env`] and pass the result along explicitly.

use std::env;

/// Environment variables consulted for the default language list, in order.
pub const LOCALE_VARS: [&str; 4] = ["LANGUAGE", "LC_ALL", "LC_MESSAGES", "LANG"];

/// The untranslated locale. Probing stops when it is reached.
pub const C_LOCALE: &str = "C";

/// ISO 639-1 two-letter codes, sorted for binary search.
///
/// Reference: <https://www.loc.gov/standards/iso639-2/php/code_list.php>
const ISO_639_1: &[&str] = &[
    "aa", "ab", "af", "ak", "am", "an", "ar", "as", "av", "ay", "az", //
    "ba", "be", "bg", "bh", "bi", "bm", "bn", "bo", "br", "bs", //
    "ca", "ce", "ch", "co", "cr", "cs", "cu", "cv", "cy", //
    "da", "de", "dv", "dz", //
    "ee", "el", "en", "eo", "es", "et", "eu", //
    "fa", "ff", "fi", "fj", "fo", "fr", "fy", //
    "ga", "gd", "gl", "gn", "gu", "gv", //
    "ha", "he", "hi", "ho", "hr", "ht", "hu", "hy", "hz", //
    "ia", "id", "ie", "ig", "ii", "ik", "io", "is", "it", "iu", //
    "ja", "jv", //
    "ka", "kg", "ki", "kj", "kk", "kl", "km", "kn", "ko", "kr", "ks", "ku", "kv", "kw", "ky", //
    "la", "lb", "lg", "li", "ln", "lo", "lt", "lu", "lv", //
    "mg", "mh", "mi", "mk", "ml", "mn", "mr", "ms", "mt", "my", //
    "na", "nb", "nd", "ne", "ng", "nl", "nn", "no", "nr", "nv", "ny", //
    "oc", "oj", "om", "or", "os", //
    "pa", "pi", "pl", "ps", "pt", //
    "qu", //
    "rm", "rn", "ro", "ru", "rw", //
    "sa", "sc", "sd", "se", "sg", "si", "sk", "sl", "sm", "sn", "so", "sq", "sr", "ss", "st",
    "su", "sv", "sw", //
    "ta", "te", "tg", "th", "ti", "tk", "tl", "tn", "to", "tr", "ts", "tt", "tw", "ty", //
    "ug", "uk", "ur", "uz", //
    "ve", "vi", "vo", //
    "wa", "wo", //
    "xh", //
    "yi", "yo", //
    "za", "zh", "zu",
];

/// Whether `code` is a known ISO 639-1 two-letter language code.
///
/// Case-sensitive: codes are lowercase.
///
/// # Examples
/// ```
/// assert!(gettext_json::locale::is_valid_iso639_1("fr"));
/// assert!(!gettext_json::locale::is_valid_iso639_1("xx"));
/// ```
pub fn is_valid_iso639_1(code: &str) -> bool {
    ISO_639_1.binary_search(&code).is_ok()
}

/// A parsed `language[_TERRITORY][.codeset][@modifier]` identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleId {
    pub language: String,
    pub territory: Option<String>,
    pub codeset: Option<String>,
    pub modifier: Option<String>,
}

impl LocaleId {
    /// Split an identifier into its parts. Never fails: anything before the
    /// first separator is the language.
    pub fn parse(raw: &str) -> Self {
        let (rest, modifier) = split_part(raw, '@');
        let (rest, codeset) = split_part(rest, '.');
        let (language, territory) = split_part(rest, '_');
        Self {
            language: language.to_string(),
            territory,
            codeset,
            modifier,
        }
    }

    /// Every directory name this locale may be stored under, most specific
    /// first. The modifier outranks the territory, which outranks the codeset.
    pub fn expand(&self) -> Vec<String> {
        const CODESET: u8 = 1;
        const TERRITORY: u8 = 1 << 1;
        const MODIFIER: u8 = 1 << 2;

        let mut present = 0;
        if self.codeset.is_some() {
            present |= CODESET;
        }
        if self.territory.is_some() {
            present |= TERRITORY;
        }
        if self.modifier.is_some() {
            present |= MODIFIER;
        }

        (0..=present)
            .rev()
            .filter(|mask| mask & !present == 0)
            .map(|mask| {
                let mut name = self.language.clone();
                if let Some(territory) = self.territory.as_deref().filter(|_| mask & TERRITORY != 0)
                {
                    name.push('_');
                    name.push_str(territory);
                }
                if let Some(codeset) = self.codeset.as_deref().filter(|_| mask & CODESET != 0) {
                    name.push('.');
                    name.push_str(codeset);
                }
                if let Some(modifier) = self.modifier.as_deref().filter(|_| mask & MODIFIER != 0) {
                    name.push('@');
                    name.push_str(modifier);
                }
                name
            })
            .collect()
    }

    /// Two-letter codes outside ISO 639-1 are most likely typos. Longer
    /// codes (ISO 639-2/3) and the C locale are accepted as-is.
    pub fn looks_suspicious(&self) -> bool {
        self.language != C_LOCALE
            && self.language.len() == 2
            && !is_valid_iso639_1(&self.language)
    }
}

fn split_part(raw: &str, separator: char) -> (&str, Option<String>) {
    match raw.split_once(separator) {
        Some((head, tail)) => (head, Some(tail.to_string())),
        None => (raw, None),
    }
}

/// Expand a preference-ordered language list into directory names to probe.
///
/// Duplicates are dropped, keeping the first occurrence. The list ends at
/// the first `C` candidate.
pub fn candidate_languages<S: AsRef<str>>(languages: &[S]) -> Vec<String> {
    let mut candidates: Vec<String> = Vec::new();
    for language in languages {
        let id = LocaleId::parse(language.as_ref());
        if id.looks_suspicious() {
            tracing::warn!(
                language = language.as_ref(),
                "`{}` is not an ISO 639-1 language code",
                id.language
            );
        }
        for name in id.expand() {
            if name == C_LOCALE {
                return candidates;
            }
            if !candidates.contains(&name) {
                candidates.push(name);
            }
        }
    }
    candidates
}

/// The default language list from the process environment.
pub fn languages_from_env() -> Vec<String> {
    languages_from_vars(|name| env::var(name).ok())
}

/// The default language list from the first non-empty locale variable,
/// split on `:`.
pub fn languages_from_vars(lookup: impl Fn(&str) -> Option<String>) -> Vec<String> {
    LOCALE_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
        .map(|value| {
            value
                .split(':')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
