//! Actions: what the bot does when a rule's condition holds

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Phase;

/// Bot directive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "param")]
pub enum ActionKind {
    #[serde(rename = "buy")]
    Buy,
    /// Sell a fraction of the position, e.g. `"0.5"`
    #[serde(rename = "sell")]
    Sell(String),
    #[serde(rename = "sell all")]
    SellAll,
    #[serde(rename = "liquidate")]
    Liquidate,
    #[serde(rename = "deact")]
    Deactivate,
    #[serde(rename = "reset")]
    Reset,
    #[serde(rename = "skip")]
    Skip,
}

impl ActionKind {
    /// Directive name as it appears in the builder's type picker
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Buy => "buy",
            ActionKind::Sell(_) => "sell",
            ActionKind::SellAll => "sell all",
            ActionKind::Liquidate => "liquidate",
            ActionKind::Deactivate => "deact",
            ActionKind::Reset => "reset",
            ActionKind::Skip => "skip",
        }
    }

    /// Kind selected by name, with an empty fraction for `sell`
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "buy" => ActionKind::Buy,
            "sell" => ActionKind::Sell(String::new()),
            "sell all" => ActionKind::SellAll,
            "liquidate" => ActionKind::Liquidate,
            "deact" => ActionKind::Deactivate,
            "reset" => ActionKind::Reset,
            "skip" => ActionKind::Skip,
            _ => return None,
        };
        Some(kind)
    }

    /// Read an encoded action string such as `"sell 0.5"` or `"sell all"`
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if let Some(kind) = Self::from_name(&text) {
            return Some(kind);
        }
        match text.strip_prefix("sell ") {
            Some(param) if !param.contains(' ') => Some(ActionKind::Sell(param.to_string())),
            _ => None,
        }
    }

    /// Whether the kind may appear in a rule of the given phase
    pub fn allowed_in(&self, phase: Phase) -> bool {
        match phase {
            Phase::Buy => matches!(
                self,
                ActionKind::Buy | ActionKind::Deactivate | ActionKind::Skip
            ),
            Phase::Sell => !matches!(self, ActionKind::Buy),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Sell(param) => write!(f, "sell {}", param),
            other => f.write_str(other.name()),
        }
    }
}

/// One action slot of a rule; `kind` is unset until the user picks a type
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Action {
    pub id: u32,
    #[serde(default)]
    pub kind: Option<ActionKind>,
}

impl Action {
    pub fn empty(id: u32) -> Self {
        Self { id, kind: None }
    }

    pub fn new(id: u32, kind: ActionKind) -> Self {
        Self {
            id,
            kind: Some(kind),
        }
    }
}
