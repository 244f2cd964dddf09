use crate::types::ExchangeKey;

/// Canonical exchange keys with their ordered synonyms (long names, short codes and
/// symbol suffix codes). Lookups walk this table in order, so the first key wins.
pub const EXCHANGE_SYNONYMS: &[(ExchangeKey, &[&str])] = &[
    (
        "NYSE",
        &[
            "NYSE",
            "New York Stock Exchange",
            "NYSE American",
            "NYSE Arca",
            "AMEX",
            "NYQ",
        ],
    ),
    (
        "NASDAQ",
        &[
            "NASDAQ",
            "Nasdaq Global Select",
            "NASDAQ Global Market",
            "NASDAQ Capital Market",
            "NMS",
            "NGM",
            "NCM",
        ],
    ),
    (
        "HKEX",
        &[
            "HKEX",
            "Hong Kong Stock Exchange",
            "Hong Kong Exchanges and Clearing",
            "SEHK",
            "HKG",
            "HK",
        ],
    ),
    ("HKSE", &["HKSE", "Hong Kong", "HK"]),
    ("LSE", &["LSE", "London Stock Exchange", "London", "LON", "L"]),
    ("SSE", &["SSE", "Shanghai Stock Exchange", "Shanghai", "SS"]),
    ("SZSE", &["SZSE", "Shenzhen Stock Exchange", "Shenzhen", "SHZ", "SZ"]),
    ("SHH", &["SHH", "Shanghai", "SS"]),
];

/// Hong Kong keys are always equivalent to each other.
pub const HONG_KONG_EXCHANGE_KEYS: &[ExchangeKey] = &["HKEX", "HKSE"];

/// Symbol suffix shared by every Hong Kong listing.
pub const HONG_KONG_SYMBOL_SUFFIX: &str = "HK";

/// Exchange hint meaning "any exchange".
pub const ALL_EXCHANGES_SENTINEL: &str = "all";

pub const US_PREFERRED_EXCHANGES: &[ExchangeKey] = &["NYSE", "NASDAQ"];
pub const HK_PREFERRED_EXCHANGES: &[ExchangeKey] = &["HKEX", "HKSE"];
pub const CHINA_PREFERRED_EXCHANGES: &[ExchangeKey] = &["SSE", "SZSE", "SHH"];

/// Heuristic market-cap rank per exchange short name (lower ranks first).
pub const MARKET_CAP_RANKS: &[(&str, i64)] = &[
    ("NYSE", 1),
    ("NASDAQ", 2),
    ("HKEX", 3),
    ("HKSE", 3),
    ("LSE", 4),
    ("SSE", 5),
    ("SHH", 5),
    ("SS", 5),
    ("SZSE", 6),
    ("SZ", 6),
];

pub const UNRANKED_MARKET_CAP_RANK: i64 = 999;

/// Primary-market preference used by the fallback tie-break (higher first).
pub const PRIMARY_MARKET_RANKS: &[(&str, i64)] = &[
    ("NYSE", 3),
    ("NASDAQ", 3),
    ("HKSE", 3),
    ("HKEX", 3),
    ("LSE", 2),
    ("SSE", 2),
    ("SZSE", 2),
];

/// Name fragments identifying derivative products rather than the underlying company.
pub const DERIVATIVE_PRODUCT_MARKERS: &[&str] =
    &["etf", "etp", "tracker", "short", "long", "-1x", "-2x", "-3x"];

pub const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "by", "de", "for", "from", "in", "of", "on", "or", "the",
    "to", "with",
];

/// Legal-form words which carry no identifying information for acronyms.
pub const CORPORATE_SUFFIXES: &[&str] = &[
    "inc",
    "incorporated",
    "corp",
    "corporation",
    "co",
    "company",
    "ltd",
    "limited",
    "plc",
    "llc",
    "lp",
    "sa",
    "ag",
    "nv",
    "se",
    "holding",
    "holdings",
    "group",
    "class",
    "adr",
    "ads",
];

/// Lines of an oracle response containing any of these are echoed prompt text.
pub const PROMPT_ECHO_MARKERS: &[&str] = &[
    "user query:",
    "query:",
    "instructions:",
    "output format:",
    "example:",
    "examples:",
    "extract company",
];

pub const RESPONSE_LABEL: &str = "response:";

// Approximate-match field weights; heavier fields tolerate more difference.
pub const FUZZY_SYMBOL_WEIGHT: f64 = 1.0;
pub const FUZZY_NAME_WEIGHT: f64 = 0.9;
pub const FUZZY_ACRONYM_WEIGHT: f64 = 0.8;
pub const FUZZY_SEARCH_TERM_WEIGHT: f64 = 0.7;
