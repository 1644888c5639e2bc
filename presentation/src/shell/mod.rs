//! Interactive admin shell.

pub mod admin;

pub use admin::{prompt_credentials, AdminShell};
