use crate::constants::STOP_WORDS;
use crate::types::Token;
use std::collections::HashSet;

/// A utility struct for tokenizing security names, with configurable options for
/// search-word extraction and case-preserving parsing.
pub struct Tokenizer {
    /// Whether tokens are lowercased.
    lowercase: bool,

    /// Preprocessed stop words for filtering tokens.
    pre_processed_stop_words: Option<HashSet<String>>,
}

impl Tokenizer {
    /// Creates a tokenizer configured for deriving search words from company names.
    ///
    /// Lowercases tokens and filters stop words.
    pub fn company_name_parser() -> Self {
        Self {
            lowercase: true,
            pre_processed_stop_words: Some(Self::preprocess_stop_words()),
        }
    }

    /// Creates a tokenizer which keeps case and stop words.
    ///
    /// Used where capitalization carries meaning (e.g., initialisms).
    pub fn verbatim_name_parser() -> Self {
        Self {
            lowercase: false,
            pre_processed_stop_words: None,
        }
    }

    /// Splits the input text into tokens based on the tokenizer's configuration.
    ///
    /// Hyphens, slashes, ampersands and parentheses separate words; possessive endings
    /// and remaining punctuation are removed. CJK characters are kept as-is.
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let stop_words = self.pre_processed_stop_words.as_ref();

        text.replace(['\n', '\r', '\t'], " ")
            .replace(['-', '/', ',', '(', ')', '&', '+', '|'], " ")
            .split_whitespace()
            // Remove possessive endings
            .map(|word| {
                let stripped = word.replace("'s", "").replace("\u{2019}s", "");

                stripped
                    .chars()
                    .filter(|c| c.is_alphanumeric())
                    .collect::<String>()
            })
            .filter(|word| !word.is_empty())
            .map(|word| {
                if self.lowercase {
                    word.to_lowercase()
                } else {
                    word
                }
            })
            .filter(|word| {
                stop_words.map_or(true, |stop_words| !stop_words.contains(&word.to_lowercase()))
            })
            .collect()
    }

    fn preprocess_stop_words() -> HashSet<String> {
        STOP_WORDS.iter().map(|word| word.to_lowercase()).collect()
    }
}
