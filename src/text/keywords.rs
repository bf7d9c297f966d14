//! Literal keyword substitution.
//!
//! Rules apply in list order. When one `find` phrase is a prefix of another,
//! the longer phrase must come first or it will be rewritten by the shorter
//! rule.

use serde::Deserialize;
use std::fmt;

/// One literal (non-regex) replacement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct KeywordRule {
    #[serde(rename = "@find")]
    pub find: String,
    #[serde(rename = "@replace")]
    pub replace: String,
}

impl KeywordRule {
    pub fn new(find: impl Into<String>, replace: impl Into<String>) -> Self {
        Self {
            find: find.into(),
            replace: replace.into(),
        }
    }
}

/// Report entry for a rule whose phrase appeared in the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordChange {
    pub find: String,
    pub replace: String,
}

impl fmt::Display for KeywordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "replaced '{}' with '{}'", self.find, self.replace)
    }
}

/// Apply `rules` in order and describe which phrases were present.
pub fn replace_keywords(text: &str, rules: &[KeywordRule]) -> (String, Vec<KeywordChange>) {
    let mut out = text.to_owned();
    for rule in rules.iter().filter(|r| !r.find.is_empty()) {
        if out.contains(&rule.find) {
            out = out.replace(&rule.find, &rule.replace);
        }
    }

    let mut changes = Vec::new();
    if out != text {
        changes.extend(
            rules
                .iter()
                .filter(|r| !r.find.is_empty() && text.contains(&r.find))
                .map(|r| KeywordChange {
                    find: r.find.clone(),
                    replace: r.replace.clone(),
                }),
        );
    }
    (out, changes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_keywords;

    #[test]
    fn longer_phrase_wins() {
        let (out, changes) = replace_keywords("China Sector Package Studio v2", &default_keywords());
        assert_eq!(out, "Flyleague-Collection v2");
        assert!(!out.contains("China-Mainland-Sector Studio"));
        // The shorter phrase is a substring of the longer one, so both are reported.
        assert_eq!(changes.len(), 2);
        assert_eq!(
            changes[0].to_string(),
            "replaced 'China Sector Package Studio' with 'Flyleague-Collection'"
        );
    }

    #[test]
    fn shorter_phrase_alone() {
        let (out, changes) = replace_keywords(
            ";China Sector Package AIRAC 2401\n",
            &default_keywords(),
        );
        assert_eq!(out, ";China-Mainland-Sector AIRAC 2401\n");
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].replace, "China-Mainland-Sector");
    }

    #[test]
    fn substitution_is_idempotent() {
        let rules = default_keywords();
        let input = "China Sector Package Studio / China Sector Package / other";
        let (once, _) = replace_keywords(input, &rules);
        let (twice, changes) = replace_keywords(&once, &rules);
        assert_eq!(once, twice);
        assert!(changes.is_empty());
    }

    #[test]
    fn untouched_text_reports_nothing() {
        let (out, changes) = replace_keywords("[INFO]\nZBPE\n", &default_keywords());
        assert_eq!(out, "[INFO]\nZBPE\n");
        assert!(changes.is_empty());
    }
}
