use crate::constants::{CHINA_PREFERRED_EXCHANGES, HK_PREFERRED_EXCHANGES, US_PREFERRED_EXCHANGES};
use crate::types::ExchangeKey;
use crate::utils::{has_exchange_suffix, symbol_has_suffix};
use crate::Error;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The market a query should preferably be resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Geography {
    Us,
    Hk,
    China,
    #[default]
    Global,
}

impl Geography {
    pub fn as_str(&self) -> &'static str {
        match self {
            Geography::Us => "us",
            Geography::Hk => "hk",
            Geography::China => "china",
            Geography::Global => "global",
        }
    }

    /// Canonical exchange keys preferred for this geography. Empty for `Global`.
    pub fn preferred_exchanges(&self) -> &'static [ExchangeKey] {
        match self {
            Geography::Us => US_PREFERRED_EXCHANGES,
            Geography::Hk => HK_PREFERRED_EXCHANGES,
            Geography::China => CHINA_PREFERRED_EXCHANGES,
            Geography::Global => &[],
        }
    }

    /// Whether the symbol carries the listing form this geography favors in tie-breaks:
    /// `.HK` for Hong Kong, `.SS`/`.SZ` for mainland China and a bare symbol for the US.
    pub fn prefers_symbol(&self, symbol: &str) -> bool {
        match self {
            Geography::Us => !has_exchange_suffix(symbol),
            Geography::Hk => symbol_has_suffix(symbol, "HK", &['.']),
            Geography::China => {
                symbol_has_suffix(symbol, "SS", &['.']) || symbol_has_suffix(symbol, "SZ", &['.'])
            }
            Geography::Global => false,
        }
    }
}

impl fmt::Display for Geography {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Geography {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "us" | "usa" => Ok(Geography::Us),
            "hk" | "hongkong" | "hong kong" => Ok(Geography::Hk),
            "china" | "cn" => Ok(Geography::China),
            "global" | "all" | "" => Ok(Geography::Global),
            other => Err(Error::InvalidArgument(format!(
                "Unknown geography: {}",
                other
            ))),
        }
    }
}

/// Language of the user's query, forwarded to the extraction oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowercased = s.trim().to_lowercase();

        if lowercased.is_empty() || lowercased == "en" || lowercased.starts_with("en-") {
            Ok(Language::En)
        } else if lowercased == "zh" || lowercased.starts_with("zh-") || lowercased == "chinese"
        {
            Ok(Language::Zh)
        } else {
            Err(Error::InvalidArgument(format!(
                "Unknown language: {}",
                lowercased
            )))
        }
    }
}
