//! Universal POS tag vocabulary.
//!
//! The tag set is closed: a `pos` job requesting anything outside
//! [`PosTag::ALL`] ends in a terminal error without running the analyzer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Reason recorded against each rejected tag.
pub const INVALID_TAG_REASON: &str = "Invalid POS tag";

/// Coarse part-of-speech category (Universal Dependencies v2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosTag {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl PosTag {
    pub const ALL: [PosTag; 17] = [
        Self::Adj,
        Self::Adp,
        Self::Adv,
        Self::Aux,
        Self::Cconj,
        Self::Det,
        Self::Intj,
        Self::Noun,
        Self::Num,
        Self::Part,
        Self::Pron,
        Self::Propn,
        Self::Punct,
        Self::Sconj,
        Self::Sym,
        Self::Verb,
        Self::X,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Adj => "ADJ",
            Self::Adp => "ADP",
            Self::Adv => "ADV",
            Self::Aux => "AUX",
            Self::Cconj => "CCONJ",
            Self::Det => "DET",
            Self::Intj => "INTJ",
            Self::Noun => "NOUN",
            Self::Num => "NUM",
            Self::Part => "PART",
            Self::Pron => "PRON",
            Self::Propn => "PROPN",
            Self::Punct => "PUNCT",
            Self::Sconj => "SCONJ",
            Self::Sym => "SYM",
            Self::Verb => "VERB",
            Self::X => "X",
        }
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PosTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Result of checking a raw tag list against the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagSelection {
    /// Recognised tags, in request order, without duplicates.
    pub valid: Vec<PosTag>,
    /// Normalised spellings of rejected tags, in request order.
    pub invalid: Vec<String>,
}

/// Split a comma-separated tag list and resolve each entry.
///
/// Entries are upper-cased and stripped of all whitespace, so
/// `"verb, Noun"` selects `VERB` and `NOUN`. Empty entries are ignored.
pub fn select_tags(raw: &str) -> TagSelection {
    let mut valid = Vec::new();
    let mut invalid = Vec::new();

    for entry in raw.split(',') {
        let normalized: String = entry
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();
        if normalized.is_empty() {
            continue;
        }
        match normalized.parse::<PosTag>() {
            Ok(tag) if !valid.contains(&tag) => valid.push(tag),
            Ok(_) => {}
            Err(unknown) if !invalid.contains(&unknown) => invalid.push(unknown),
            Err(_) => {}
        }
    }

    TagSelection { valid, invalid }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tag_parses_from_its_name() {
        for tag in PosTag::ALL {
            assert_eq!(tag.as_str().parse::<PosTag>(), Ok(tag));
        }
    }

    #[test]
    fn lowercase_names_do_not_parse_directly() {
        assert!("verb".parse::<PosTag>().is_err());
    }

    #[test]
    fn select_normalizes_case_and_whitespace() {
        let selection = select_tags(" verb ,No un");
        assert_eq!(selection.valid, vec![PosTag::Verb, PosTag::Noun]);
        assert!(selection.invalid.is_empty());
    }

    #[test]
    fn select_collapses_duplicates_and_skips_empty_entries() {
        let selection = select_tags("NOUN,,noun,VERB,");
        assert_eq!(selection.valid, vec![PosTag::Noun, PosTag::Verb]);
    }

    #[test]
    fn select_reports_unknown_tags() {
        let selection = select_tags("VERB,foo,BAR,foo");
        assert_eq!(selection.valid, vec![PosTag::Verb]);
        assert_eq!(selection.invalid, vec!["FOO".to_string(), "BAR".to_string()]);
    }

    #[test]
    fn serializes_as_uppercase_name() {
        assert_eq!(
            serde_json::to_value(PosTag::Propn).unwrap(),
            serde_json::json!("PROPN")
        );
    }
}
