//! Strategy validation
//!
//! The `is_*_valid` checks are the builder's quick flags for enabling the
//! submit button. [`validate`] lists every problem, including ones a
//! hand-built or deserialized model can carry past the mutators (actions
//! illegal for the phase, too many actions, a fraction, literal or
//! multiplier that is not a number), and gates [`submission`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::Limits;
use crate::error::SubmitError;
use crate::model::condition::is_number;
use crate::model::{ActionKind, Condition, Phase, RightOperand, Rule, Strategy};
use crate::transcode::to_raw;

/// Empty or complete
pub fn is_condition_valid(condition: &Condition) -> bool {
    condition.is_empty() || condition.is_complete()
}

/// Conditions valid, at least one action, every action set, every sell has a fraction
pub fn is_rule_valid(rule: &Rule) -> bool {
    rule.conditions.iter().all(is_condition_valid)
        && !rule.actions.is_empty()
        && rule.actions.iter().all(|action| match &action.kind {
            None => false,
            Some(ActionKind::Sell(param)) => !param.is_empty(),
            Some(_) => true,
        })
}

/// Every rule valid; a strategy always holds at least one
pub fn is_strategy_valid(strategy: &Strategy) -> bool {
    strategy.rules().iter().all(is_rule_valid)
}

/// A problem found by [`validate`].
///
/// `rule` is the 1-based position in the strategy; `condition` and `action`
/// are ids within the rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum Issue {
    IncompleteCondition { rule: usize, condition: u32 },
    NonNumericValue { rule: usize, condition: u32, value: String },
    NonNumericMultiplier { rule: usize, condition: u32, multiplier: String },
    NoActions { rule: usize },
    UnsetAction { rule: usize, action: u32 },
    MissingSellFraction { rule: usize, action: u32 },
    InvalidSellFraction { rule: usize, action: u32, param: String },
    IllegalAction { rule: usize, phase: Phase, kind: String },
    TooManyActions { rule: usize, phase: Phase, count: usize, limit: usize },
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::IncompleteCondition { rule, condition } => {
                write!(f, "rule {}: condition {} is incomplete", rule, condition)
            }
            Issue::NonNumericValue { rule, condition, value } => write!(
                f,
                "rule {}: condition {} compares against '{}', which is not a number",
                rule, condition, value
            ),
            Issue::NonNumericMultiplier { rule, condition, multiplier } => write!(
                f,
                "rule {}: condition {} multiplier '{}' is not a number",
                rule, condition, multiplier
            ),
            Issue::NoActions { rule } => write!(f, "rule {}: no actions", rule),
            Issue::UnsetAction { rule, action } => {
                write!(f, "rule {}: action {} has no type", rule, action)
            }
            Issue::MissingSellFraction { rule, action } => {
                write!(f, "rule {}: sell action {} needs a fraction", rule, action)
            }
            Issue::InvalidSellFraction { rule, action, param } => write!(
                f,
                "rule {}: sell action {} fraction '{}' must be a number in (0, 1]",
                rule, action, param
            ),
            Issue::IllegalAction { rule, phase, kind } => {
                write!(f, "rule {}: '{}' is not allowed in the {} phase", rule, kind, phase)
            }
            Issue::TooManyActions { rule, phase, count, limit } => write!(
                f,
                "rule {}: {} actions, a {}-phase rule holds at most {}",
                rule, count, phase, limit
            ),
        }
    }
}

fn sell_fraction_ok(param: &str) -> bool {
    param
        .trim()
        .parse::<f64>()
        .is_ok_and(|v| v > 0.0 && v <= 1.0)
}

fn rule_issues(number: usize, rule: &Rule, issues: &mut Vec<Issue>) {
    for condition in &rule.conditions {
        if !is_condition_valid(condition) {
            issues.push(Issue::IncompleteCondition {
                rule: number,
                condition: condition.id,
            });
            continue;
        }
        if condition.is_empty() {
            continue;
        }
        match &condition.right {
            RightOperand::Number { value } if !is_number(value) => {
                issues.push(Issue::NonNumericValue {
                    rule: number,
                    condition: condition.id,
                    value: value.clone(),
                });
            }
            right => {
                if let Some(multiplier) = right.effective_multiplier().filter(|m| !is_number(m)) {
                    issues.push(Issue::NonNumericMultiplier {
                        rule: number,
                        condition: condition.id,
                        multiplier: multiplier.to_string(),
                    });
                }
            }
        }
    }

    if rule.actions.is_empty() {
        issues.push(Issue::NoActions { rule: number });
    }
    let limit = rule.phase.max_actions();
    if rule.actions.len() > limit {
        issues.push(Issue::TooManyActions {
            rule: number,
            phase: rule.phase,
            count: rule.actions.len(),
            limit,
        });
    }

    for action in &rule.actions {
        let Some(kind) = &action.kind else {
            issues.push(Issue::UnsetAction {
                rule: number,
                action: action.id,
            });
            continue;
        };
        if !kind.allowed_in(rule.phase) {
            issues.push(Issue::IllegalAction {
                rule: number,
                phase: rule.phase,
                kind: kind.name().to_string(),
            });
        }
        if let ActionKind::Sell(param) = kind {
            if param.is_empty() {
                issues.push(Issue::MissingSellFraction {
                    rule: number,
                    action: action.id,
                });
            } else if !sell_fraction_ok(param) {
                issues.push(Issue::InvalidSellFraction {
                    rule: number,
                    action: action.id,
                    param: param.clone(),
                });
            }
        }
    }
}

/// Every problem in the strategy, in rule order
pub fn validate(strategy: &Strategy) -> Vec<Issue> {
    let mut issues = Vec::new();
    for (index, rule) in strategy.rules().iter().enumerate() {
        rule_issues(index + 1, rule, &mut issues);
    }
    issues
}

/// Raw text ready for the validation / mint endpoint
pub fn submission(strategy: &Strategy, limits: &Limits) -> Result<String, SubmitError> {
    let issues = validate(strategy);
    if !issues.is_empty() {
        tracing::debug!(count = issues.len(), "strategy not submittable");
        return Err(SubmitError::Incomplete(issues));
    }

    let raw = to_raw(strategy)?;
    let len = raw.chars().count();
    if len > limits.max_raw_len {
        return Err(SubmitError::TooLong {
            len,
            max: limits.max_raw_len,
        });
    }
    Ok(raw)
}
