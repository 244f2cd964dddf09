use ticker_resolver::models::Tokenizer;

#[cfg(test)]
mod company_name_tokenizer_tests {
    use super::*;

    #[test]
    fn test_lowercases_and_ignores_stop_words() {
        let tokenizer = Tokenizer::company_name_parser();

        let tokens = tokenizer.tokenize("Industrial and Commercial Bank of China Limited");
        assert_eq!(
            tokens,
            vec!["industrial", "commercial", "bank", "china", "limited"]
        );
    }

    #[test]
    fn test_splits_on_punctuation() {
        let tokenizer = Tokenizer::company_name_parser();

        let tokens = tokenizer.tokenize("Kweichow Moutai Co., Ltd.");
        assert_eq!(tokens, vec!["kweichow", "moutai", "co", "ltd"]);

        let tokens = tokenizer.tokenize("Coca-Cola/Procter & Gamble (PG)");
        assert_eq!(tokens, vec!["coca", "cola", "procter", "gamble", "pg"]);
    }

    #[test]
    fn test_strips_possessives() {
        let tokenizer = Tokenizer::company_name_parser();

        let tokens = tokenizer.tokenize("McDonald's Corporation");
        assert_eq!(tokens, vec!["mcdonald", "corporation"]);
    }

    #[test]
    fn test_keeps_cjk_characters() {
        let tokenizer = Tokenizer::company_name_parser();

        let tokens = tokenizer.tokenize("阿里巴巴 集团");
        assert_eq!(tokens, vec!["阿里巴巴", "集团"]);
    }
}

#[cfg(test)]
mod verbatim_name_tokenizer_tests {
    use super::*;

    #[test]
    fn test_keeps_case_and_stop_words() {
        let tokenizer = Tokenizer::verbatim_name_parser();

        let tokens = tokenizer.tokenize("Bank of America Corp.");
        assert_eq!(tokens, vec!["Bank", "of", "America", "Corp"]);
    }

    #[test]
    fn test_empty_input() {
        let tokenizer = Tokenizer::verbatim_name_parser();

        assert!(tokenizer.tokenize("  - / ").is_empty());
    }
}
