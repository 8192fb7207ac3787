//! Conditions: the user-editable clauses of a rule's guard

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[default]
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Ge,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Le,
}

impl Operator {
    pub const ALL: [Operator; 6] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Gt,
        Operator::Ge,
        Operator::Lt,
        Operator::Le,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("unknown operator '{}'", s))
    }
}

/// Numeric literal as the builder writes it (rejects `inf`, `NaN` and friends)
pub(crate) fn is_number(token: &str) -> bool {
    let leading = token
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'));
    leading && token.parse::<f64>().is_ok()
}

/// Which kind of right operand a condition compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RightKind {
    Variable,
    Number,
}

/// Right-hand side of a condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RightOperand {
    /// Another variable, optionally scaled: `name * multiplier`
    Variable {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        multiplier: Option<String>,
    },
    /// A numeric literal, kept as typed
    Number { value: String },
}

impl Default for RightOperand {
    fn default() -> Self {
        RightOperand::empty(RightKind::Variable)
    }
}

impl RightOperand {
    pub fn variable(name: impl Into<String>) -> Self {
        RightOperand::Variable {
            name: name.into(),
            multiplier: None,
        }
    }

    pub fn scaled(name: impl Into<String>, multiplier: impl Into<String>) -> Self {
        RightOperand::Variable {
            name: name.into(),
            multiplier: Some(multiplier.into()),
        }
    }

    pub fn number(value: impl Into<String>) -> Self {
        RightOperand::Number {
            value: value.into(),
        }
    }

    fn empty(kind: RightKind) -> Self {
        match kind {
            RightKind::Variable => RightOperand::variable(""),
            RightKind::Number => RightOperand::number(""),
        }
    }

    pub fn kind(&self) -> RightKind {
        match self {
            RightOperand::Variable { .. } => RightKind::Variable,
            RightOperand::Number { .. } => RightKind::Number,
        }
    }

    /// The variable name or literal, without any multiplier
    pub fn value(&self) -> &str {
        match self {
            RightOperand::Variable { name, .. } => name,
            RightOperand::Number { value } => value,
        }
    }

    /// Multiplier that actually changes the operand.
    ///
    /// Blank multipliers and ones numerically equal to 1 (`"1"`, `"1.0"`,
    /// `"1.00"`) are dropped. Text that is not a number is kept verbatim.
    pub fn effective_multiplier(&self) -> Option<&str> {
        match self {
            RightOperand::Variable {
                multiplier: Some(m),
                ..
            } => {
                let m = m.trim();
                if m.is_empty() {
                    return None;
                }
                match m.parse::<f64>() {
                    Ok(value) if value == 1.0 => None,
                    _ => Some(m),
                }
            }
            _ => None,
        }
    }
}

/// A single field edit on a condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ConditionUpdate {
    Left(String),
    Operator(Operator),
    /// Switching kinds clears the right value and multiplier
    RightKind(RightKind),
    RightValue(String),
    /// Ignored for numeric operands
    Multiplier(String),
}

/// One clause ANDed into a rule's guard
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Condition {
    pub id: u32,
    #[serde(default)]
    pub left: String,
    #[serde(default)]
    pub operator: Operator,
    #[serde(default)]
    pub right: RightOperand,
}

impl Condition {
    /// A blank builder row
    pub fn new(id: u32) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn compare(
        id: u32,
        left: impl Into<String>,
        operator: Operator,
        right: RightOperand,
    ) -> Self {
        Self {
            id,
            left: left.into(),
            operator,
            right,
        }
    }

    /// Neither side filled in; encoders skip it
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.value().is_empty()
    }

    /// Both sides filled in
    pub fn is_complete(&self) -> bool {
        !self.left.is_empty() && !self.right.value().is_empty()
    }

    /// Apply one field edit, returning the edited copy
    pub fn updated(&self, update: ConditionUpdate) -> Self {
        let mut next = self.clone();
        match update {
            ConditionUpdate::Left(left) => next.left = left,
            ConditionUpdate::Operator(op) => next.operator = op,
            ConditionUpdate::RightKind(kind) => {
                if kind != self.right.kind() {
                    next.right = RightOperand::empty(kind);
                }
            }
            ConditionUpdate::RightValue(value) => match &mut next.right {
                RightOperand::Variable { name, .. } => *name = value,
                RightOperand::Number { value: v } => *v = value,
            },
            ConditionUpdate::Multiplier(m) => match &mut next.right {
                RightOperand::Variable { multiplier, .. } => {
                    *multiplier = if m.trim().is_empty() { None } else { Some(m) };
                }
                RightOperand::Number { .. } => {
                    tracing::debug!(condition = self.id, "multiplier ignored for numeric operand");
                }
            },
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_round_trip() {
        for op in Operator::ALL {
            assert_eq!(op.as_str().parse::<Operator>().unwrap(), op);
        }
        assert!("=>".parse::<Operator>().is_err());
    }

    #[test]
    fn test_effective_multiplier() {
        assert_eq!(RightOperand::scaled("prevPrice", "1").effective_multiplier(), None);
        assert_eq!(RightOperand::scaled("prevPrice", "1.0").effective_multiplier(), None);
        assert_eq!(RightOperand::scaled("prevPrice", "1.00").effective_multiplier(), None);
        assert_eq!(RightOperand::scaled("prevPrice", " ").effective_multiplier(), None);
        assert_eq!(
            RightOperand::scaled("prevPrice", "0.95").effective_multiplier(),
            Some("0.95")
        );
        assert_eq!(RightOperand::number("1.5").effective_multiplier(), None);
    }

    #[test]
    fn test_switching_kind_clears_operand() {
        let cond = Condition::compare(1, "currentPrice", Operator::Gt, RightOperand::scaled("prevPrice", "1.1"));

        let numeric = cond.updated(ConditionUpdate::RightKind(RightKind::Number));
        assert_eq!(numeric.right, RightOperand::number(""));
        assert_eq!(numeric.left, "currentPrice");

        let back = numeric
            .updated(ConditionUpdate::RightValue("5".into()))
            .updated(ConditionUpdate::RightKind(RightKind::Variable));
        assert_eq!(back.right, RightOperand::variable(""));
    }

    #[test]
    fn test_same_kind_keeps_operand() {
        let cond = Condition::compare(1, "currentPrice", Operator::Gt, RightOperand::scaled("prevPrice", "1.1"));
        let same = cond.updated(ConditionUpdate::RightKind(RightKind::Variable));
        assert_eq!(same, cond);
    }

    #[test]
    fn test_multiplier_on_number_is_ignored() {
        let cond = Condition::compare(1, "currentPrice", Operator::Lt, RightOperand::number("3"));
        assert_eq!(cond.updated(ConditionUpdate::Multiplier("2".into())), cond);
    }

    #[test]
    fn test_blank_multiplier_clears() {
        let cond = Condition::compare(1, "currentPrice", Operator::Gt, RightOperand::scaled("prevPrice", "1.1"));
        let cleared = cond.updated(ConditionUpdate::Multiplier(String::new()));
        assert_eq!(cleared.right, RightOperand::variable("prevPrice"));
    }
}
