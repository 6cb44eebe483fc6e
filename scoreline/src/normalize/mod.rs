//! Raw upstream JSON to client-facing shapes.
//!
//! Normalizers are pure: the same payload always yields the same output,
//! in upstream order, with every missing field replaced by an explicit
//! default.

pub mod football;
pub mod nfl;

const UNKNOWN: &str = "Unknown";

fn or_unknown(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}
