//! GammaScript: the Gammabots strategy representation
//!
//! A strategy is an ordered list of rules, each a `(condition, actions)` pair.
//! This crate holds the structured model the visual builder edits and the
//! transforms between it and the two text forms:
//!
//! - **Raw**: the JSON array of `{"c", "a"}` objects sent to the validation and
//!   mint endpoints
//! - **Readable**: numbered display text
//!
//! # Modules
//!
//! - [`catalog`]: long variable names ↔ short codes
//! - [`model`]: rules, conditions, actions and their pure mutators
//! - [`encode`]: rule → condition expression / action list
//! - [`transcode`]: strategy ↔ Raw / Readable text
//! - [`validator`]: validity flags, diagnostics and the submission gate
//!
//! # Example
//!
//! ```
//! use gammascript::prelude::*;
//!
//! let strategy = Strategy::new()
//!     .update_rule(1, |rule| {
//!         rule.add_condition()
//!             .update_condition(1, ConditionUpdate::Left("currentPrice".into()))?
//!             .update_condition(1, ConditionUpdate::RightValue("prevPrice".into()))?
//!             .update_action(1, Some(ActionKind::Buy))
//!     })
//!     .unwrap();
//!
//! assert!(is_strategy_valid(&strategy));
//! assert_eq!(
//!     encode_condition(&strategy.rules()[0], false),
//!     "buyCount == 0 && currentPrice > prevPrice"
//! );
//! ```

pub mod catalog;
pub mod config;
pub mod encode;
pub mod error;
pub mod model;
pub mod transcode;
pub mod validator;

// Re-export commonly used types
pub mod prelude {
    pub use crate::catalog::{to_code, to_long, variables, Variable};
    pub use crate::config::*;
    pub use crate::encode::*;
    pub use crate::error::*;
    pub use crate::model::*;
    pub use crate::transcode::*;
    pub use crate::validator::*;
}
