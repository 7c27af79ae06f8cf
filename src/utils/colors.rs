//! ANSI colour helpers for terminal output.

use crate::core::calendar::IncomeTier;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Calendar cell colour: high green, medium blue, low yellow.
pub fn color_for_tier(tier: IncomeTier) -> &'static str {
    match tier {
        IncomeTier::High => GREEN,
        IncomeTier::Medium => BLUE,
        IncomeTier::Low => YELLOW,
        IncomeTier::None => GREY,
    }
}

/// Wrap `s` in `color` unless colours are disabled.
pub fn paint(s: &str, color: &str, enabled: bool) -> String {
    if enabled && !color.is_empty() {
        format!("{color}{s}{RESET}")
    } else {
        s.to_string()
    }
}

/// Grey placeholder for values that cannot be resolved (deleted workplace, ...).
pub fn or_missing(value: Option<&str>, enabled: bool) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => paint("-", GREY, enabled),
    }
}
