use colored::Colorize;
use std::env;

const DEBUG_ENV: &str = "CC_POWERLINE_DEBUG";

pub fn debug(message: &str) {
    if env::var(DEBUG_ENV).is_ok() {
        eprintln!("[DEBUG] {}", message);
    }
}

pub fn debug_with_context(context: &str, message: &str) {
    if env::var(DEBUG_ENV).is_ok() {
        eprintln!("[DEBUG] {}: {}", context, message);
    }
}

/// Always printed to stderr; the statusline itself goes to stdout.
pub fn warn(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}
