use crate::constants::CORPORATE_SUFFIXES;
use crate::types::Token;
use std::collections::BTreeSet;

/// Derives the abbreviations a company is commonly referred to by.
///
/// # Arguments
/// * `name` - The security's display name.
/// * `raw_words` - Case-preserving tokens of the name (no stop-word filtering).
/// * `name_words` - Lowercased, stop-word-filtered tokens of the name.
///
/// # Returns
/// Uppercase ASCII acronyms of at least two characters, drawn from:
/// - the initialism of every word,
/// - the concatenation of all capital letters,
/// - a parenthetical abbreviation (`Industrial and Commercial Bank of China (ICBC)`),
/// - initials of the meaningful words (legal-form words such as `Inc` removed), plus the
///   initials of the first two and of the first and last meaningful words,
/// - a trailing dotted suffix (`S.A.` -> `SA`).
///
/// # Example
/// ```
/// use ticker_resolver::utils::generate_acronyms;
///
/// let raw_words = vec!["International".to_string(), "Business".to_string(), "Machines".to_string(), "Corp".to_string()];
/// let name_words = vec!["international".to_string(), "business".to_string(), "machines".to_string(), "corp".to_string()];
///
/// let acronyms = generate_acronyms("International Business Machines Corp", &raw_words, &name_words);
/// assert!(acronyms.contains("IBM"));
/// assert!(acronyms.contains("IBMC"));
/// ```
pub fn generate_acronyms(name: &str, raw_words: &[Token], name_words: &[Token]) -> BTreeSet<String> {
    let mut acronyms = BTreeSet::new();

    if raw_words.len() >= 2 {
        insert_acronym(&mut acronyms, initials(raw_words.iter()));
    }

    let capitals: String = name.chars().filter(|c| c.is_ascii_uppercase()).collect();
    insert_acronym(&mut acronyms, capitals);

    if let Some(parenthetical) = parenthetical_content(name) {
        insert_acronym(
            &mut acronyms,
            parenthetical
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect(),
        );
    }

    let meaningful_words: Vec<&Token> = name_words
        .iter()
        .filter(|word| !CORPORATE_SUFFIXES.contains(&word.as_str()))
        .collect();

    if meaningful_words.len() >= 2 {
        insert_acronym(&mut acronyms, initials(meaningful_words.iter().copied()));
        insert_acronym(&mut acronyms, initials(meaningful_words.iter().take(2).copied()));

        let first_last = [meaningful_words[0], meaningful_words[meaningful_words.len() - 1]];
        insert_acronym(&mut acronyms, initials(first_last.into_iter()));
    }

    if let Some(last_word) = name.split_whitespace().last() {
        if is_dotted_abbreviation(last_word) {
            insert_acronym(
                &mut acronyms,
                last_word.chars().filter(|c| c.is_alphanumeric()).collect(),
            );
        }
    }

    acronyms
}

fn initials<'a>(words: impl Iterator<Item = &'a Token>) -> String {
    words
        .filter_map(|word| word.chars().next())
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}

fn insert_acronym(acronyms: &mut BTreeSet<String>, candidate: String) {
    let candidate = candidate.to_uppercase();

    if candidate.chars().count() >= 2 && candidate.chars().all(|c| c.is_ascii_alphanumeric()) {
        acronyms.insert(candidate);
    }
}

fn parenthetical_content(name: &str) -> Option<&str> {
    let start = name.find('(')? + 1;
    let length = name[start..].find(')')?;

    Some(name[start..start + length].trim())
}

/// `S.A.`, `N.V.`, `A.G.`: single letters separated by dots.
fn is_dotted_abbreviation(word: &str) -> bool {
    let parts: Vec<&str> = word.split('.').filter(|part| !part.is_empty()).collect();

    word.contains('.')
        && parts.len() >= 2
        && parts
            .iter()
            .all(|part| part.chars().count() == 1 && part.chars().all(|c| c.is_alphabetic()))
}
