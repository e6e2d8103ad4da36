//! Ratewatch Common Types
//!
//! Shared types used across the ratewatch crates: the two supported
//! currencies, conversion direction, quoted rates and time helpers.

pub mod error;
pub mod monetary;
pub mod time;

pub use error::*;
pub use monetary::*;
pub use time::*;
