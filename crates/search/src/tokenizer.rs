//! Basic tokenizer for full-text matching
//!
//! - Lowercase
//! - Split on non-alphanumeric characters
//! - Drop empty pieces

/// Tokenize text into searchable words
///
/// # Example
///
/// ```
/// use soupstore_search::tokenizer::tokenize;
///
/// let tokens = tokenize("Pro Bono, Bonobo!");
/// assert_eq!(tokens, vec!["pro", "bono", "bonobo"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
