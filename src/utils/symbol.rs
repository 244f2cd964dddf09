/// Whether the symbol carries an exchange qualifier (e.g. `9988.HK`, `VOD.L`).
pub fn has_exchange_suffix(symbol: &str) -> bool {
    symbol.contains('.')
}

/// Checks whether `symbol` ends with `code`, preceded by one of `separators`.
///
/// The comparison is case-insensitive and requires at least one character before the
/// separator, so a bare `.HK` is not considered a Hong Kong listing.
///
/// # Example
/// ```
/// use ticker_resolver::utils::symbol_has_suffix;
///
/// assert!(symbol_has_suffix("0700.hk", "HK", &['.']));
/// assert!(symbol_has_suffix("LSE:VOD", "VOD", &[':']));
/// assert!(!symbol_has_suffix("HK", "HK", &['.']));
/// ```
pub fn symbol_has_suffix(symbol: &str, code: &str, separators: &[char]) -> bool {
    if code.is_empty() {
        return false;
    }

    let symbol = symbol.to_uppercase();
    let code = code.to_uppercase();

    match symbol.strip_suffix(code.as_str()) {
        Some(head) => {
            let mut head_chars = head.chars();
            let separator = head_chars.next_back();

            separator.map_or(false, |c| separators.contains(&c)) && head_chars.next().is_some()
        }
        None => false,
    }
}

/// The listing code without its exchange qualifier (`0700.HK` -> `0700`).
pub fn symbol_code(symbol: &str) -> &str {
    symbol.split('.').next().unwrap_or(symbol)
}
