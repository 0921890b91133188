//! Display helpers shared by every screen.
//!
//! Course durations arrive from the backend in a compact `<h>h<m>p` notation
//! ("p" for "phút") and prices as whole dong; these functions turn both into
//! the Vietnamese strings the app shows.

use crate::schema::notification::Notification;

/// Format a compact course duration such as `"2h30p"` for display.
///
/// Zero hours are omitted, as are zero minutes when hours are present. Input
/// that does not follow the `<hours>h<minutes>p` shape is returned unchanged.
///
/// ```
/// use edumall_core::format::format_duration;
///
/// assert_eq!(format_duration("2h30p"), "2 giờ 30 phút");
/// assert_eq!(format_duration("0h15p"), "15 phút");
/// assert_eq!(format_duration("3h0p"), "3 giờ");
/// ```
#[must_use]
pub fn format_duration(raw: &str) -> String {
    let Some((hours, minutes)) = parse_duration(raw.trim()) else {
        return raw.to_owned();
    };

    match (hours, minutes) {
        (0, m) => format!("{m} phút"),
        (h, 0) => format!("{h} giờ"),
        (h, m) => format!("{h} giờ {m} phút"),
    }
}

fn parse_duration(raw: &str) -> Option<(u32, u32)> {
    let (hours, rest) = raw.split_once('h')?;
    let minutes = rest.strip_suffix('p')?;
    if hours.is_empty() || minutes.is_empty() {
        return None;
    }
    Some((hours.parse().ok()?, minutes.parse().ok()?))
}

/// Format a dong amount with dot thousands separators, e.g. `1.250.000 ₫`.
#[must_use]
pub fn format_vnd(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if amount < 0 {
        format!("-{grouped} ₫")
    } else {
        format!("{grouped} ₫")
    }
}

/// Number of notifications the user has not opened yet.
#[must_use]
pub fn unread_count(notifications: &[Notification]) -> usize {
    notifications.iter().filter(|n| !n.is_read).count()
}
