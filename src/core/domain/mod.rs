//! Domain types.

mod key;
mod outcome;

pub use key::{KeyDetail, KeyRecord, KeyState, Tag};
pub use outcome::{Outcome, SkipReason};
