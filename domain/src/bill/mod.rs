//! Bills and their lifecycle labels.

mod entities;
mod filter;
mod status;

pub use entities::{Bill, BillId};
pub use filter::{distinct_kinds, BillFilter};
pub use status::BillStatus;
