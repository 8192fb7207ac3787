//! Rule encoders
//!
//! Turn a [`Rule`] into the boolean expression and action list the backend
//! consumes. Empty condition rows are skipped here; the validator is what
//! rejects them at submission time.

use crate::catalog::{self, TRADE_COUNT};
use crate::model::{Condition, Rule};

/// Separator between clauses of a compiled condition
pub const AND: &str = " && ";

/// Name as emitted: long, or translated to its short code
fn variable(name: &str, short: bool) -> &str {
    if short {
        catalog::to_code(name)
    } else {
        name
    }
}

/// Render one complete condition as `left op right[ * multiplier]`
pub fn encode_clause(condition: &Condition, short: bool) -> String {
    let mut right = variable(condition.right.value(), short).to_string();
    if let Some(multiplier) = condition.right.effective_multiplier() {
        right.push_str(" * ");
        right.push_str(multiplier);
    }
    format!(
        "{} {} {}",
        variable(&condition.left, short),
        condition.operator,
        right
    )
}

/// Compile a rule's guard: the phase clause followed by each complete condition
pub fn encode_condition(rule: &Rule, short: bool) -> String {
    let phase_clause = format!(
        "{} {}",
        variable(TRADE_COUNT, short),
        rule.phase.trade_count_test()
    );

    std::iter::once(phase_clause)
        .chain(
            rule.conditions
                .iter()
                .filter(|c| c.is_complete())
                .map(|c| encode_clause(c, short)),
        )
        .collect::<Vec<_>>()
        .join(AND)
}

/// Action strings for every slot that has a kind
pub fn encode_actions(rule: &Rule) -> Vec<String> {
    rule.actions
        .iter()
        .filter_map(|a| a.kind.as_ref())
        .map(ToString::to_string)
        .collect()
}
