//! Output formatting for the console.

pub mod console;
pub mod notifier;

pub use console::ConsoleFormatter;
pub use notifier::ConsoleNotifier;
