//! Format transcoders
//!
//! - [`readable`]: numbered display text, never parsed back
//! - [`raw`]: the JSON wire format and its parser
//! - [`rebuild`]: Raw entries back into editable rules

pub mod raw;
pub mod readable;
pub mod rebuild;

pub use raw::*;
pub use readable::*;
