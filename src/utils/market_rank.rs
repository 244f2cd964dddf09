use crate::constants::{MARKET_CAP_RANKS, PRIMARY_MARKET_RANKS, UNRANKED_MARKET_CAP_RANK};

/// Market-cap rank of an exchange short name; unknown exchanges rank last.
///
/// This is a heuristic: it ranks exchanges, not individual securities.
pub fn market_cap_rank(exchange_short_name: &str) -> i64 {
    lookup_rank(MARKET_CAP_RANKS, exchange_short_name).unwrap_or(UNRANKED_MARKET_CAP_RANK)
}

/// Primary-market preference of an exchange short name; unknown exchanges score 0.
pub fn primary_market_rank(exchange_short_name: &str) -> i64 {
    lookup_rank(PRIMARY_MARKET_RANKS, exchange_short_name).unwrap_or(0)
}

fn lookup_rank(table: &[(&str, i64)], exchange_short_name: &str) -> Option<i64> {
    let exchange_short_name = exchange_short_name.trim();

    table
        .iter()
        .find(|(exchange, _)| exchange.eq_ignore_ascii_case(exchange_short_name))
        .map(|(_, rank)| *rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_cap_rank_lookup() {
        assert_eq!(market_cap_rank("nyse"), 1);
        assert_eq!(market_cap_rank(" HKSE "), 3);
        assert_eq!(market_cap_rank("XETRA"), UNRANKED_MARKET_CAP_RANK);
    }

    #[test]
    fn test_primary_market_rank_defaults_to_zero() {
        assert_eq!(primary_market_rank("LSE"), 2);
        assert_eq!(primary_market_rank("PNK"), 0);
    }
}
