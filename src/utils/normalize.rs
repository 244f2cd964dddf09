/// Trims and lowercases a query so it can be compared against derived search metadata.
pub fn normalize_query(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Drops whitespace and punctuation, keeping alphanumeric characters (including CJK).
pub fn strip_non_alphanumeric(text: &str) -> String {
    text.chars().filter(|c| c.is_alphanumeric()).collect()
}

pub fn is_numeric_code(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// The forms a numeric listing code may appear in within a symbol: as given, and with
/// leading zeros removed (`00943` is also tried as `943`).
pub fn numeric_code_variants(code: &str) -> Vec<String> {
    let mut variants = vec![code.to_string()];

    let stripped = code.trim_start_matches('0');
    if !stripped.is_empty() && stripped != code {
        variants.push(stripped.to_string());
    }

    variants
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_code_variants_strip_leading_zeros() {
        assert_eq!(numeric_code_variants("00943"), vec!["00943", "943"]);
        assert_eq!(numeric_code_variants("943"), vec!["943"]);
        assert_eq!(numeric_code_variants("000"), vec!["000"]);
    }

    #[test]
    fn test_strip_non_alphanumeric_keeps_cjk() {
        assert_eq!(strip_non_alphanumeric("阿里巴巴 (集团)"), "阿里巴巴集团");
        assert_eq!(strip_non_alphanumeric("Coca-Cola Co."), "CocaColaCo");
    }

    #[test]
    fn test_is_numeric_code() {
        assert!(is_numeric_code("00700"));
        assert!(!is_numeric_code("0700.HK"));
        assert!(!is_numeric_code(""));
    }
}
