// src/score/counter.rs
// =============================================================================
// This module counts how many times a word appears in a page.
//
// Rules:
// - The markup is stripped first, only the visible text is searched
// - Matching is case-insensitive ("Cat" matches "cat" and "CAT")
// - Only whole words count: "cat" is not found inside "concatenate"
// - Matches never overlap
// =============================================================================

use crate::error::{Error, Result};
use crate::extract::extract_text;
use crate::page::Page;
use regex::{Regex, RegexBuilder};

/// Counts the whole-word, case-insensitive occurrences of `word` in a page
///
/// Fails with `InvalidArgument` when the word is empty.
pub fn count_word_occurrences(page: &Page, word: &str) -> Result<usize> {
    let matcher = WordMatcher::new(word)?;
    Ok(matcher.count_in_page(page))
}

/// Rejects words that are empty (or only whitespace)
pub(crate) fn validate_word(word: &str) -> Result<&str> {
    let word = word.trim();
    if word.is_empty() {
        return Err(Error::InvalidArgument(
            "the word to search for cannot be empty".to_string(),
        ));
    }
    Ok(word)
}

/// A compiled matcher for one word, reusable across many pages
#[derive(Debug, Clone)]
pub struct WordMatcher {
    regex: Regex,
}

impl WordMatcher {
    pub fn new(word: &str) -> Result<Self> {
        let word = validate_word(word)?;

        // The word is escaped, so this only fails on absurdly long input
        let regex = RegexBuilder::new(&regex::escape(word))
            .case_insensitive(true)
            .build()
            .map_err(|e| Error::InvalidArgument(e.to_string()))?;

        Ok(Self { regex })
    }

    /// Counts matches in the visible text of a page
    pub fn count_in_page(&self, page: &Page) -> usize {
        self.count(&extract_text(page.content()))
    }

    /// Counts matches in plain text
    pub fn count(&self, text: &str) -> usize {
        let mut count = 0;
        let mut pos = 0;

        while let Some(found) = self.regex.find_at(text, pos) {
            if is_whole_word(text, found.start(), found.end()) {
                count += 1;
                pos = found.end();
            } else {
                // Try again one character later; a rejected match may hide a
                // valid one that starts inside it
                pos = found.start()
                    + text[found.start()..]
                        .chars()
                        .next()
                        .map_or(1, char::len_utf8);
            }

            if pos >= text.len() {
                break;
            }
        }

        count
    }
}

// A match is a whole word when neither neighbour is a word character
fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();

    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
