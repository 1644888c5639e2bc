//! Console implementation of the status-notice port.

use colored::Colorize;
use duma_application::ports::status_notifier::{NoticeLevel, StatusNotifier};

/// Prints notices as colored toast lines.
pub struct ConsoleNotifier;

impl StatusNotifier for ConsoleNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Info => println!("{}", message.green()),
            NoticeLevel::Warning => eprintln!("{}", message.yellow().bold()),
        }
    }
}
