//! Strategy: the ordered rule list

use serde::{Deserialize, Serialize};

use super::rule::next_id;
use super::Rule;
use crate::error::EditError;

/// Direction for [`Strategy::move_rule`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Ordered, non-empty list of rules. Order is significant to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RuleList")]
pub struct Strategy {
    rules: Vec<Rule>,
}

#[derive(Deserialize)]
struct RuleList {
    rules: Vec<Rule>,
}

impl TryFrom<RuleList> for Strategy {
    type Error = EditError;

    fn try_from(list: RuleList) -> Result<Self, Self::Error> {
        Strategy::from_rules(list.rules)
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy {
    /// New strategy holding one default buy-phase rule
    pub fn new() -> Self {
        Self {
            rules: vec![Rule::new(1)],
        }
    }

    /// Strategy from existing rules; refuses an empty list
    pub fn from_rules(rules: Vec<Rule>) -> Result<Self, EditError> {
        if rules.is_empty() {
            return Err(EditError::NoRules);
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule(&self, id: u32) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    fn index_of(&self, id: u32) -> Result<usize, EditError> {
        self.rules
            .iter()
            .position(|r| r.id == id)
            .ok_or(EditError::UnknownRule(id))
    }

    /// Append a default rule with a fresh id
    pub fn add_rule(&self) -> Self {
        let mut next = self.clone();
        let id = next_id(self.rules.iter().map(|r| r.id));
        next.rules.push(Rule::new(id));
        next
    }

    /// Remove a rule. The last remaining rule is kept.
    pub fn remove_rule(&self, id: u32) -> Result<Self, EditError> {
        let index = self.index_of(id)?;
        let mut next = self.clone();
        if self.rules.len() <= 1 {
            tracing::debug!(rule = id, "refusing to remove the only rule");
            return Ok(next);
        }
        next.rules.remove(index);
        Ok(next)
    }

    /// Swap a rule with its neighbour; no-op at either end
    pub fn move_rule(&self, id: u32, direction: Direction) -> Result<Self, EditError> {
        let index = self.index_of(id)?;
        let mut next = self.clone();
        let target = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => Some(index + 1).filter(|&i| i < self.rules.len()),
        };
        if let Some(target) = target {
            next.rules.swap(index, target);
        }
        Ok(next)
    }

    /// Replace a rule with the result of `edit`.
    ///
    /// The rule keeps its id and position whatever `edit` returns.
    pub fn update_rule<F>(&self, id: u32, edit: F) -> Result<Self, EditError>
    where
        F: FnOnce(&Rule) -> Result<Rule, EditError>,
    {
        let index = self.index_of(id)?;
        let mut edited = edit(&self.rules[index])?;
        edited.id = id;
        let mut next = self.clone();
        next.rules[index] = edited;
        Ok(next)
    }
}
