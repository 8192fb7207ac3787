//! Raw wire format
//!
//! A JSON array of `{"c": condition, "a": [actions]}` objects, pretty-printed
//! with two-space indentation. The backend receives this text verbatim, so the
//! layout must stay identical to `JSON.stringify(rules, null, 2)`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::encode::{encode_actions, encode_condition};
use crate::error::ParseError;
use crate::model::{Rule, Strategy};

static OPERATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*(&&|==|!=|>=|<=|>|<|\*)\s*").expect("operator pattern is valid")
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// One `{c, a}` entry of the Raw format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParsedRule {
    #[serde(rename = "c")]
    pub condition: String,
    #[serde(rename = "a")]
    pub actions: Vec<String>,
}

impl ParsedRule {
    /// Encode a rule with long or short variable names
    pub fn from_rule(rule: &Rule, short: bool) -> Self {
        Self {
            condition: encode_condition(rule, short),
            actions: encode_actions(rule),
        }
    }
}

/// Put single spaces around `&&`, comparison operators and `*`
pub fn normalize_condition(condition: &str) -> String {
    let spaced = OPERATOR.replace_all(condition, " ${1} ");
    WHITESPACE.replace_all(&spaced, " ").trim().to_string()
}

fn render(strategy: &Strategy, short: bool) -> serde_json::Result<String> {
    let entries: Vec<ParsedRule> = strategy
        .rules()
        .iter()
        .map(|rule| ParsedRule::from_rule(rule, short))
        .collect();
    serde_json::to_string_pretty(&entries)
}

/// Raw text submitted to the backend; uses long variable names
pub fn to_raw(strategy: &Strategy) -> serde_json::Result<String> {
    render(strategy, false)
}

/// Raw layout with short codes, as shown in the builder's compact preview
pub fn to_compact(strategy: &Strategy) -> serde_json::Result<String> {
    render(strategy, true)
}

/// Read Raw text back into `{c, a}` entries with normalized condition spacing
pub fn parse_raw(text: &str) -> Result<Vec<ParsedRule>, ParseError> {
    let entries: Vec<ParsedRule> = serde_json::from_str(text)?;
    if entries.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(entries
        .into_iter()
        .map(|entry| ParsedRule {
            condition: normalize_condition(&entry.condition),
            actions: entry.actions,
        })
        .collect())
}
