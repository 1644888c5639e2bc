//! The roll-call reconciler.
//!
//! Converts partial, user-supplied vote input plus the current roster into a
//! complete, mutually exclusive partition {aye, nay, abstain, absent}, and
//! provides the derived tallies and display strings the reading views need.
//!
//! Everything here is pure and synchronous: operations take a roster snapshot
//! and a record, and return a new record. Callers own persistence and
//! concurrency control.

mod ballot;
mod reconcile;
mod roll_call;
mod tally;

pub use ballot::{BallotChoice, Voter};
pub use reconcile::{apply_text, from_name_lists, toggle, RawBallotText};
pub use roll_call::RollCall;
pub use tally::{summarize, Tally};
