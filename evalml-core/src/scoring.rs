//! Classification scoring routines.
//!
//! These functions know nothing about metric plugins. They validate their own inputs and
//! report failures through [`crate::error::Error`], so callers can forward them as-is.

mod label_counts;
mod precision_score;
mod target_type;

pub use label_counts::*;
pub use precision_score::*;
pub use target_type::*;
