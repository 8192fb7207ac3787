//! Variable catalog
//!
//! Maps the long, human-readable variable names shown in the builder to the
//! short codes used by the compact preview. Names outside the catalog (codes
//! that are already short, such as `cma` or `mom`, or variables the backend
//! added later) pass through unchanged in both directions.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

/// One catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Variable {
    /// Long name used by the builder and the Raw format
    pub name: &'static str,
    /// Short code used by the compact preview
    pub code: &'static str,
}

/// Trade count since the last cycle; drives the implicit phase clause
pub const TRADE_COUNT: &str = "buyCount";

const VARIABLES: &[Variable] = &[
    Variable { name: "currentPrice", code: "cpr" },
    Variable { name: "prevPrice", code: "ppr" },
    Variable { name: "initBuyPrice", code: "ibp" },
    Variable { name: "lastBuyPrice", code: "lbp" },
    Variable { name: "lastSellPrice", code: "lsp" },
    Variable { name: "listedPrice", code: "lpr" },
    Variable { name: "buyCount", code: "bcn" },
    Variable { name: "sellCount", code: "scn" },
    Variable { name: "cycleCount", code: "ccn" },
    Variable { name: "highestPriceSinceInitialBuy", code: "hib" },
    Variable { name: "lowestPriceSinceInitialBuy", code: "lib" },
    Variable { name: "highestPriceSinceLastFill", code: "hlf" },
    Variable { name: "lowestPriceSinceLastFill", code: "llf" },
    Variable { name: "minutesSinceLastTrade", code: "mlt" },
    Variable { name: "minutesSinceLastBuy", code: "mlb" },
    Variable { name: "minutesSinceLastSell", code: "mls" },
    Variable { name: "totalProfitPercent", code: "tpp" },
    Variable { name: "unrealizedProfitPercent", code: "upp" },
    Variable { name: "positionValue", code: "pvl" },
    Variable { name: "rollingHigh", code: "rhi" },
    Variable { name: "rollingLow", code: "rlo" },
    Variable { name: "allTimeHigh", code: "ath" },
    Variable { name: "allTimeLow", code: "atl" },
    Variable { name: "priceChange1h", code: "pch" },
    Variable { name: "volatility", code: "vol" },
    Variable { name: "volume24h", code: "v24" },
    Variable { name: "liquidity", code: "liq" },
    Variable { name: "marketCap", code: "mcp" },
    Variable { name: "holderCount", code: "hcn" },
    Variable { name: "tokenAgeMinutes", code: "tam" },
    Variable { name: "bollingerUpper", code: "bbu" },
    Variable { name: "bollingerLower", code: "bbl" },
    Variable { name: "supportLevel", code: "sup" },
    Variable { name: "resistanceLevel", code: "res" },
];

static LONG_TO_CODE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| VARIABLES.iter().map(|v| (v.name, v.code)).collect());

static CODE_TO_LONG: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| VARIABLES.iter().map(|v| (v.code, v.name)).collect());

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z_][A-Za-z0-9_]*\b").expect("identifier pattern is valid"));

/// All catalog entries, in builder dropdown order
pub fn variables() -> &'static [Variable] {
    VARIABLES
}

/// Whether `name` is a catalogued long name or short code
pub fn is_known(name: &str) -> bool {
    LONG_TO_CODE.contains_key(name) || CODE_TO_LONG.contains_key(name)
}

/// Long name → short code. Unknown names are returned unchanged.
pub fn to_code(name: &str) -> &str {
    LONG_TO_CODE.get(name).copied().unwrap_or(name)
}

/// Short code → long name. Unknown codes are returned unchanged.
pub fn to_long(code: &str) -> &str {
    CODE_TO_LONG.get(code).copied().unwrap_or(code)
}

/// Rewrite every identifier in an expression to its short code
pub fn compact_expression(expr: &str) -> String {
    IDENTIFIER
        .replace_all(expr, |caps: &Captures| to_code(&caps[0]).to_string())
        .into_owned()
}

/// Rewrite every identifier in an expression to its long name
pub fn expand_expression(expr: &str) -> String {
    IDENTIFIER
        .replace_all(expr, |caps: &Captures| to_long(&caps[0]).to_string())
        .into_owned()
}
