//! Domain layer for duma-register
//!
//! This crate contains the chamber's entities and the roll-call reconciler.
//! It has no dependencies on infrastructure or presentation concerns: every
//! operation is a pure function over a roster snapshot and a record.
//!
//! # Core Concepts
//!
//! ## Roll-call reconciliation
//!
//! An admin supplies partial vote input (per-member toggles or bulk text)
//! and the reconciler produces a complete, mutually exclusive partition of
//! the roster into {aye, nay, abstain, absent}, with absence derived rather
//! than asserted.
//!
//! ## Id-keyed relations
//!
//! Votes and leadership assignments reference representatives by stable id;
//! display names are resolved at render time. Free-text names that match no
//! roster member are preserved as unlisted voters, never dropped.

pub mod agenda;
pub mod bill;
pub mod core;
pub mod leadership;
pub mod rollcall;
pub mod roster;

// Re-export commonly used types
pub use agenda::{AgendaDay, AgendaId, AgendaLineItem, BusinessItem, RichText};
pub use bill::{distinct_kinds, Bill, BillFilter, BillId, BillStatus};
pub use self::core::error::DomainError;
pub use leadership::{LeadershipBoard, LeadershipEntry, LeadershipPost};
pub use rollcall::{
    apply_text, from_name_lists, summarize, toggle, BallotChoice, RawBallotText, RollCall, Tally,
    Voter,
};
pub use roster::{
    Party, Region, Representative, RepresentativeFilter, RepresentativeId, Roster,
};
