//! Rules and their pure mutators
//!
//! Every mutator borrows the rule and returns an edited copy, so callers can
//! keep earlier snapshots around for undo.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Action, ActionKind, Condition, ConditionUpdate};
use crate::error::EditError;

/// Trading phase a rule applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No open position
    #[default]
    Buy,
    /// Holding a position
    Sell,
}

impl Phase {
    /// Most actions a rule of this phase may hold
    pub fn max_actions(&self) -> usize {
        match self {
            Phase::Buy => 1,
            Phase::Sell => 2,
        }
    }

    /// Comparison of the trade count against zero that guards this phase
    pub fn trade_count_test(&self) -> &'static str {
        match self {
            Phase::Buy => "== 0",
            Phase::Sell => "> 0",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Buy => f.write_str("buy"),
            Phase::Sell => f.write_str("sell"),
        }
    }
}

/// One ordered step of a strategy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: u32,
    #[serde(default)]
    pub phase: Phase,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Rule {
    /// Fresh buy-phase rule with no conditions and one empty action slot
    pub fn new(id: u32) -> Self {
        Self {
            id,
            phase: Phase::Buy,
            conditions: Vec::new(),
            actions: vec![Action::empty(1)],
        }
    }

    pub fn with_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn with_actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = actions;
        self
    }

    /// Change the phase.
    ///
    /// An actual change resets the actions to a single empty slot, since the
    /// legal action set differs between phases.
    pub fn set_phase(&self, phase: Phase) -> Self {
        let mut next = self.clone();
        if phase != self.phase {
            next.phase = phase;
            next.actions = vec![Action::empty(1)];
        }
        next
    }

    pub fn add_condition(&self) -> Self {
        let mut next = self.clone();
        let id = next_id(self.conditions.iter().map(|c| c.id));
        next.conditions.push(Condition::new(id));
        next
    }

    pub fn remove_condition(&self, id: u32) -> Result<Self, EditError> {
        let index = self
            .conditions
            .iter()
            .position(|c| c.id == id)
            .ok_or(EditError::UnknownCondition(id))?;
        let mut next = self.clone();
        next.conditions.remove(index);
        Ok(next)
    }

    pub fn update_condition(&self, id: u32, update: ConditionUpdate) -> Result<Self, EditError> {
        let index = self
            .conditions
            .iter()
            .position(|c| c.id == id)
            .ok_or(EditError::UnknownCondition(id))?;
        let mut next = self.clone();
        next.conditions[index] = self.conditions[index].updated(update);
        Ok(next)
    }

    /// Append an empty action slot, refused once the phase limit is reached
    pub fn add_action(&self) -> Result<Self, EditError> {
        let limit = self.phase.max_actions();
        if self.actions.len() >= limit {
            return Err(EditError::ActionLimit {
                phase: self.phase,
                limit,
            });
        }
        let mut next = self.clone();
        let id = next_id(self.actions.iter().map(|a| a.id));
        next.actions.push(Action::empty(id));
        Ok(next)
    }

    /// Remove an action slot. The last remaining slot is kept.
    pub fn remove_action(&self, id: u32) -> Result<Self, EditError> {
        let index = self
            .actions
            .iter()
            .position(|a| a.id == id)
            .ok_or(EditError::UnknownAction(id))?;
        let mut next = self.clone();
        if self.actions.len() <= 1 {
            tracing::debug!(rule = self.id, action = id, "refusing to remove the only action");
            return Ok(next);
        }
        next.actions.remove(index);
        Ok(next)
    }

    /// Set the kind of an action slot, refusing kinds illegal for the phase
    pub fn update_action(&self, id: u32, kind: Option<ActionKind>) -> Result<Self, EditError> {
        let index = self
            .actions
            .iter()
            .position(|a| a.id == id)
            .ok_or(EditError::UnknownAction(id))?;
        if let Some(kind) = &kind {
            if !kind.allowed_in(self.phase) {
                return Err(EditError::IllegalAction {
                    phase: self.phase,
                    kind: kind.name().to_string(),
                });
            }
        }
        let mut next = self.clone();
        next.actions[index].kind = kind;
        Ok(next)
    }
}

/// Smallest id greater than every existing one.
///
/// Once `u32::MAX` is taken, the lowest free id is reused instead.
pub(crate) fn next_id(ids: impl Iterator<Item = u32>) -> u32 {
    let mut ids: Vec<u32> = ids.collect();
    match ids.iter().max() {
        None => 1,
        Some(&max) => match max.checked_add(1) {
            Some(id) => id,
            None => {
                ids.sort_unstable();
                ids.dedup();
                let mut free = 1u32;
                for id in ids {
                    if id == free {
                        free = free.saturating_add(1);
                    } else if id > free {
                        break;
                    }
                }
                free
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Operator, RightKind, RightOperand};

    #[test]
    fn test_new_rule_shape() {
        let rule = Rule::new(7);
        assert_eq!(rule.id, 7);
        assert_eq!(rule.phase, Phase::Buy);
        assert!(rule.conditions.is_empty());
        assert_eq!(rule.actions, vec![Action::empty(1)]);
    }

    #[test]
    fn test_set_phase_resets_actions() {
        let rule = Rule::new(1)
            .set_phase(Phase::Sell)
            .update_action(1, Some(ActionKind::SellAll))
            .unwrap();
        let rule = rule.add_action().unwrap();
        assert_eq!(rule.actions.len(), 2);

        let back = rule.set_phase(Phase::Buy);
        assert_eq!(back.phase, Phase::Buy);
        assert_eq!(back.actions, vec![Action::empty(1)]);
    }

    #[test]
    fn test_set_same_phase_keeps_actions() {
        let rule = Rule::new(1).update_action(1, Some(ActionKind::Buy)).unwrap();
        assert_eq!(rule.set_phase(Phase::Buy), rule);
    }

    #[test]
    fn test_buy_phase_rejects_sell() {
        let rule = Rule::new(1);
        let err = rule
            .update_action(1, Some(ActionKind::Sell("0.5".into())))
            .unwrap_err();
        assert_eq!(
            err,
            EditError::IllegalAction {
                phase: Phase::Buy,
                kind: "sell".into()
            }
        );
        // original untouched
        assert_eq!(rule.actions[0].kind, None);
    }

    #[test]
    fn test_action_limits() {
        let buy = Rule::new(1);
        assert!(matches!(
            buy.add_action(),
            Err(EditError::ActionLimit { limit: 1, .. })
        ));

        let sell = buy.set_phase(Phase::Sell).add_action().unwrap();
        assert_eq!(sell.actions.len(), 2);
        assert_eq!(sell.actions[1].id, 2);
        assert!(sell.add_action().is_err());
    }

    #[test]
    fn test_remove_last_action_is_noop() {
        let rule = Rule::new(1);
        assert_eq!(rule.remove_action(1).unwrap(), rule);
        assert_eq!(rule.remove_action(9), Err(EditError::UnknownAction(9)));

        let sell = rule.set_phase(Phase::Sell).add_action().unwrap();
        let trimmed = sell.remove_action(1).unwrap();
        assert_eq!(trimmed.actions, vec![Action::empty(2)]);
    }

    #[test]
    fn test_condition_edits() {
        let rule = Rule::new(1).add_condition().add_condition();
        assert_eq!(rule.conditions.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2]);

        let rule = rule
            .update_condition(2, ConditionUpdate::Left("currentPrice".into()))
            .and_then(|r| r.update_condition(2, ConditionUpdate::Operator(Operator::Lt)))
            .and_then(|r| r.update_condition(2, ConditionUpdate::RightKind(RightKind::Number)))
            .and_then(|r| r.update_condition(2, ConditionUpdate::RightValue("0.001".into())))
            .unwrap();
        assert_eq!(rule.conditions[1].right, RightOperand::number("0.001"));
        assert_eq!(rule.conditions[1].operator, Operator::Lt);

        let rule = rule.remove_condition(1).unwrap();
        assert_eq!(rule.conditions.len(), 1);
        assert_eq!(rule.add_condition().conditions[1].id, 3);
        assert_eq!(rule.remove_condition(1), Err(EditError::UnknownCondition(1)));
    }

    #[test]
    fn test_next_id_at_u32_max() {
        assert_eq!(next_id(std::iter::empty()), 1);
        assert_eq!(next_id([3, 1].into_iter()), 4);
        assert_eq!(next_id([u32::MAX].into_iter()), 1);
        assert_eq!(next_id([u32::MAX, 2, 1, 1].into_iter()), 3);

        let rule = Rule::new(1)
            .with_conditions(vec![Condition::new(u32::MAX)])
            .add_condition();
        assert_eq!(rule.conditions[1].id, 1);

        let sell = Rule::new(1)
            .set_phase(Phase::Sell)
            .with_actions(vec![Action::empty(u32::MAX)])
            .add_action()
            .unwrap();
        assert_eq!(sell.actions[1].id, 1);
    }
}
