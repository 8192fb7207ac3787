//! Rule model
//!
//! A [`Strategy`] is an ordered list of [`Rule`]s. Each rule has a [`Phase`],
//! user [`Condition`]s ANDed after the implicit phase clause, and [`Action`]s.

pub mod action;
pub mod condition;
pub mod rule;
pub mod strategy;

pub use action::*;
pub use condition::*;
pub use rule::*;
pub use strategy::*;
