//! Full-text match predicate
//!
//! A query is a whitespace separated list of terms:
//!
//! | Term | Meaning |
//! |------|---------|
//! | `word` | some word of the text equals `word` |
//! | `pre*` | some word of the text starts with `pre` |
//! | `-word` / `NOT word` | no word of the text starts with `word` |
//! | `AND` | ignored, all positive terms are required anyway |
//!
//! Terms are lowercased and split on punctuation the same way the text is
//! tokenized, so `foo-bar` in a query requires both `foo` and `bar`.

use crate::tokenizer::tokenize;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Term {
    Word(String),
    Prefix(String),
}

impl Term {
    fn matches(&self, words: &[String]) -> bool {
        match self {
            Term::Word(term) => words.iter().any(|w| w == term),
            Term::Prefix(prefix) => words.iter().any(|w| w.starts_with(prefix.as_str())),
        }
    }
}

/// Parsed full-text query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FullTextQuery {
    positive: Vec<Term>,
    excluded: Vec<String>,
}

impl FullTextQuery {
    /// Parse a query string.
    ///
    /// # Example
    ///
    /// ```
    /// use soupstore_search::FullTextQuery;
    ///
    /// let query = FullTextQuery::parse("bono* NOT robot");
    /// assert!(query.matches("Pro Bono Bonobo"));
    /// assert!(!query.matches("Bono the robot"));
    /// ```
    pub fn parse(query: &str) -> Self {
        let mut parsed = FullTextQuery::default();
        let mut negate_next = false;

        for raw in query.split_whitespace() {
            match raw {
                "NOT" => {
                    negate_next = true;
                    continue;
                }
                "AND" => continue,
                _ => {}
            }

            let (negated, body) = match raw.strip_prefix('-') {
                Some(rest) => (true, rest),
                None => (negate_next, raw),
            };
            negate_next = false;

            for piece in body
                .to_lowercase()
                .split(|c: char| !(c.is_alphanumeric() || c == '*'))
                .filter(|p| !p.is_empty())
            {
                let is_prefix = piece.ends_with('*');
                let stem: String = piece.chars().filter(|c| *c != '*').collect();
                if stem.is_empty() {
                    continue;
                }
                if negated {
                    parsed.excluded.push(stem);
                } else if is_prefix {
                    parsed.positive.push(Term::Prefix(stem));
                } else {
                    parsed.positive.push(Term::Word(stem));
                }
            }
        }
        parsed
    }

    /// True when the query has no terms at all.
    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.excluded.is_empty()
    }

    /// Test candidate text against the query.
    ///
    /// The candidate fails if any of its words starts with an excluded
    /// term; otherwise every positive term must be satisfied.
    pub fn matches(&self, text: &str) -> bool {
        let words = tokenize(text);
        if self
            .excluded
            .iter()
            .any(|ex| words.iter().any(|w| w.starts_with(ex.as_str())))
        {
            return false;
        }
        self.positive.iter().all(|term| term.matches(&words))
    }
}

/// One-shot convenience for [`FullTextQuery::parse`] + [`FullTextQuery::matches`].
pub fn does_full_text_match(text: &str, query: &str) -> bool {
    FullTextQuery::parse(query).matches(text)
}
