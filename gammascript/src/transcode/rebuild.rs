//! Rebuilding editable rules from Raw entries
//!
//! Used by clone/pre-fill: when a Raw entry has the shape the builder emits,
//! it becomes a structured [`Rule`] again. Anything else fails with a
//! [`ParseError`] and the caller keeps the text as an opaque starting point.

use crate::catalog::{self, TRADE_COUNT};
use crate::encode::AND;
use crate::error::{EditError, ParseError};
use crate::model::condition::is_number;
use crate::model::{Action, ActionKind, Condition, Operator, Phase, RightOperand, Rule, Strategy};

use super::raw::{normalize_condition, parse_raw, ParsedRule};

fn phase_of(clause: &str) -> Option<Phase> {
    match clause.split_whitespace().collect::<Vec<_>>().as_slice() {
        [name, "==", "0"] if catalog::to_long(name) == TRADE_COUNT => Some(Phase::Buy),
        [name, ">", "0"] if catalog::to_long(name) == TRADE_COUNT => Some(Phase::Sell),
        _ => None,
    }
}

fn condition_of(id: u32, clause: &str) -> Option<Condition> {
    let tokens: Vec<&str> = clause.split_whitespace().collect();
    let (left, op, right, multiplier) = match tokens.as_slice() {
        [left, op, right] => (*left, *op, *right, None),
        [left, op, right, "*", m] if is_number(m) => (*left, *op, *right, Some(*m)),
        _ => return None,
    };
    let operator: Operator = op.parse().ok()?;

    let right = if is_number(right) {
        if multiplier.is_some() {
            return None;
        }
        RightOperand::number(right)
    } else {
        RightOperand::Variable {
            name: catalog::to_long(right).to_string(),
            multiplier: multiplier.map(str::to_string),
        }
    };

    Some(Condition::compare(
        id,
        catalog::to_long(left),
        operator,
        right,
    ))
}

impl ParsedRule {
    /// Rebuild a structured rule. Short codes are mapped back to long names.
    pub fn to_rule(&self, id: u32) -> Result<Rule, ParseError> {
        let number = id as usize;
        let condition = normalize_condition(&self.condition);
        let mut clauses = condition.split(AND);

        let first = clauses.next().unwrap_or_default();
        let phase = phase_of(first).ok_or_else(|| ParseError::MissingPhaseClause {
            rule: number,
            found: first.to_string(),
        })?;

        let conditions = clauses
            .zip(1..)
            .map(|(clause, cid)| {
                condition_of(cid, clause).ok_or_else(|| ParseError::InvalidClause {
                    rule: number,
                    clause: clause.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut actions = Vec::with_capacity(self.actions.len().max(1));
        for (text, aid) in self.actions.iter().zip(1..) {
            let kind = ActionKind::parse(text).ok_or_else(|| ParseError::UnknownAction {
                rule: number,
                action: text.clone(),
            })?;
            if !kind.allowed_in(phase) {
                return Err(ParseError::Edit {
                    rule: number,
                    source: EditError::IllegalAction {
                        phase,
                        kind: kind.name().to_string(),
                    },
                });
            }
            actions.push(Action::new(aid, kind));
        }
        if actions.len() > phase.max_actions() {
            return Err(ParseError::Edit {
                rule: number,
                source: EditError::ActionLimit {
                    phase,
                    limit: phase.max_actions(),
                },
            });
        }
        if actions.is_empty() {
            actions.push(Action::empty(1));
        }

        Ok(Rule {
            id,
            phase,
            conditions,
            actions,
        })
    }
}

impl Strategy {
    /// Parse Raw (or compact) text into an editable strategy, one rule per entry
    pub fn from_raw(text: &str) -> Result<Self, ParseError> {
        let entries = parse_raw(text)?;
        let rules = entries
            .iter()
            .zip(1..)
            .map(|(entry, id)| entry.to_rule(id))
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(rules = rules.len(), "rebuilt strategy from raw text");
        Strategy::from_rules(rules).map_err(|_| ParseError::Empty)
    }
}
