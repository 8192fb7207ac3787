//! Readable rendering, for display only

use crate::encode::{encode_actions, encode_condition};
use crate::model::Strategy;

/// Numbered `c:` / `a:` lines per rule, rules separated by a blank line
pub fn to_readable(strategy: &Strategy) -> String {
    strategy
        .rules()
        .iter()
        .enumerate()
        .map(|(index, rule)| {
            format!(
                "{}  c: {}\n    a: {}",
                index + 1,
                encode_condition(rule, false),
                encode_actions(rule).join(", ")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
