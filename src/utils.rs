pub mod generate_acronyms;
pub mod market_rank;
pub mod name_match;
pub mod normalize;
pub mod symbol;
pub mod weighted_fuzzy_distance;

pub use generate_acronyms::generate_acronyms;
pub use market_rank::{market_cap_rank, primary_market_rank};
pub use name_match::{
    contains_whole_word, has_derivative_marker, is_whole_token, name_match_tier, NameMatchTier,
};
pub use normalize::{is_numeric_code, normalize_query, numeric_code_variants, strip_non_alphanumeric};
pub use symbol::{has_exchange_suffix, symbol_code, symbol_has_suffix};
pub use weighted_fuzzy_distance::weighted_fuzzy_distance;
