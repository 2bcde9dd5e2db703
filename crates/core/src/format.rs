//! Display helpers shared by front-ends.

use chrono::{DateTime, Local};

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Formats a byte count with a binary unit, e.g. `1536` -> `1.5 KB`.
///
/// At most two decimals are kept and trailing zeros are dropped.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded} {}", SIZE_UNITS[unit])
}

/// Formats an amount in Indian rupees using crore, lakh and thousand units.
///
/// `185_000_000.0` with one decimal becomes `₹18.5Cr`.
pub fn format_currency(value: f64, decimals: usize) -> String {
    if value >= 10_000_000.0 {
        format!("₹{:.*}Cr", decimals, value / 10_000_000.0)
    } else if value >= 100_000.0 {
        format!("₹{:.*}L", decimals, value / 100_000.0)
    } else if value >= 1_000.0 {
        format!("₹{:.*}K", decimals, value / 1_000.0)
    } else {
        format!("₹{value:.decimals$}")
    }
}

/// 24-hour `HH:MM:SS` rendering of a local time.
pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format("%H:%M:%S").to_string()
}

/// The current local time as `HH:MM:SS`.
pub fn timestamp_now() -> String {
    format_timestamp(Local::now())
}
