//! Number and duration formatting shared by the usage segments.

use crate::providers::TokenBreakdown;

pub fn format_cost(cost: f64) -> String {
    format!("${:.2}", cost.max(0.0))
}

pub fn format_number(num: u64) -> String {
    if num >= 1_000_000 {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    } else if num >= 1_000 {
        format!("{:.1}K", num as f64 / 1_000.0)
    } else {
        num.to_string()
    }
}

pub fn format_tokens(tokens: u64) -> String {
    format!("{} tokens", format_number(tokens))
}

pub fn format_breakdown(breakdown: &TokenBreakdown) -> String {
    let mut parts = vec![
        format!("{}in", format_number(breakdown.input_tokens)),
        format!("{}out", format_number(breakdown.output_tokens)),
    ];
    let cached = breakdown.cache_creation_input_tokens + breakdown.cache_read_input_tokens;
    if cached > 0 {
        parts.push(format!("{}cached", format_number(cached)));
    }
    parts.join(" + ")
}

/// `"2h 5m"` from one hour up, `"45m"` below.
pub fn format_minutes(minutes: i64) -> String {
    let minutes = minutes.max(0);
    if minutes >= 60 {
        format!("{}h {}m", minutes / 60, minutes % 60)
    } else {
        format!("{}m", minutes)
    }
}

/// Units switch on the displayed value, so 59.96s reads `1.0m`.
pub fn format_response_time(seconds: f64) -> String {
    let tenths = (seconds.max(0.0) * 10.0).round() / 10.0;
    if tenths < 60.0 {
        format!("{:.1}s", tenths)
    } else {
        format!("{:.1}m", seconds / 60.0)
    }
}

pub fn format_duration(seconds: f64) -> String {
    let whole = seconds.max(0.0).round();
    if whole < 60.0 {
        format!("{:.0}s", whole)
    } else {
        format_minutes((whole / 60.0) as i64)
    }
}

/// Coarse age like `"42s"`, `"5m"`, `"3h"`, `"2d"`.
pub fn format_age(seconds: u64) -> String {
    match seconds {
        s if s < 60 => format!("{}s", s),
        s if s < 3_600 => format!("{}m", s / 60),
        s if s < 86_400 => format!("{}h", s / 3_600),
        s => format!("{}d", s / 86_400),
    }
}

/// Cents below a dollar an hour, dollars from there up.
pub fn format_cost_rate(per_hour: f64) -> String {
    let cents = (per_hour.max(0.0) * 100.0).round();
    if cents < 100.0 {
        format!("{:.0}¢/h", cents)
    } else {
        format!("${:.2}/h", cents / 100.0)
    }
}

pub fn format_token_rate(per_hour: f64) -> String {
    format!("{}/h", format_number(per_hour.max(0.0).round() as u64))
}
