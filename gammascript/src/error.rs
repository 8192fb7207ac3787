//! Error types
//!
//! Incomplete builder input is never an error: it is reported through the
//! boolean checks and [`Issue`](crate::validator::Issue) lists in
//! [`validator`](crate::validator). The types here cover refused edits, Raw
//! text that cannot be read back, and the submission gate.

use thiserror::Error;

use crate::model::Phase;
use crate::validator::Issue;

/// A mutation the builder refuses to apply
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditError {
    #[error("action '{kind}' is not allowed in the {phase} phase")]
    IllegalAction { phase: Phase, kind: String },

    #[error("a {phase}-phase rule holds at most {limit} action(s)")]
    ActionLimit { phase: Phase, limit: usize },

    #[error("a strategy needs at least one rule")]
    NoRules,

    #[error("no rule with id {0}")]
    UnknownRule(u32),

    #[error("no condition with id {0}")]
    UnknownCondition(u32),

    #[error("no action with id {0}")]
    UnknownAction(u32),
}

/// Raw strategy text that could not be read back.
///
/// Rule numbers are 1-based, matching the Readable rendering.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed strategy JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("strategy contains no rules")]
    Empty,

    #[error("rule {rule}: condition must start with the trade count clause, found '{found}'")]
    MissingPhaseClause { rule: usize, found: String },

    #[error("rule {rule}: cannot read clause '{clause}'")]
    InvalidClause { rule: usize, clause: String },

    #[error("rule {rule}: unknown action '{action}'")]
    UnknownAction { rule: usize, action: String },

    #[error("rule {rule}: {source}")]
    Edit {
        rule: usize,
        #[source]
        source: EditError,
    },
}

/// Reasons a strategy cannot be handed to the validation / mint endpoint
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("strategy is not submittable: {}", describe(.0))]
    Incomplete(Vec<Issue>),

    #[error("strategy is {len} characters long, the limit is {max}")]
    TooLong { len: usize, max: usize },

    #[error("failed to serialize strategy: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn describe(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
