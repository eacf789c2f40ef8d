//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new UUID v4
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Format a timestamp for display
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Format a rupiah amount for display (e.g. 150000 -> "Rp 150.000")
pub fn format_price(amount: i64) -> String {
    let digits = amount.abs().to_string();
    let mut grouped = String::new();

    for (i, c) in digits.chars().enumerate() {
        let remaining = digits.len() - i;
        grouped.push(c);
        if remaining > 1 && remaining % 3 == 1 {
            grouped.push('.');
        }
    }

    if amount < 0 {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

/// Format an hour-of-day as a slot label (e.g. 14 -> "14:00")
pub fn slot_label(hour: u8) -> String {
    format!("{:02}:00", hour)
}

/// Parse a slot label back into an hour-of-day
pub fn parse_slot_label(label: &str) -> Option<u8> {
    let (hour, minutes) = label.split_once(':')?;
    if minutes != "00" {
        return None;
    }
    hour.parse::<u8>().ok().filter(|h| *h < 24)
}

/// Format a contiguous run of slot labels as a range (e.g. "14:00 - 16:00")
pub fn format_slot_range(slots: &[String]) -> String {
    match slots {
        [] => String::new(),
        [only] => only.clone(),
        [first, .., last] => {
            let end = parse_slot_label(last)
                .map(|h| slot_label((h + 1) % 24))
                .unwrap_or_else(|| last.clone());
            format!("{} - {}", first, end)
        }
    }
}

/// Validate phone number format (basic validation)
pub fn is_valid_phone(phone: &str) -> bool {
    phone.chars().all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ')
        && phone.chars().filter(|c| c.is_ascii_digit()).count() >= 9
}

/// Sanitize filename for safe upload
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
