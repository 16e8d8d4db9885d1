//! Time-of-day canonicalization (`HH:MM`, 24-hour)

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::ValidationError;

static TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([0-9]{1,2}):([0-9]{2})(\s*(AM|PM))?$").expect("invalid time regex")
});

/// Normalize `H:MM`, `HH:MM` or either with an `AM`/`PM` suffix to `HH:MM`.
///
/// Fails with [`ValidationError::InvalidTimeFormat`] when the input does not
/// look like a time and [`ValidationError::InvalidTimeValue`] when the hour
/// or minute is out of range after 12-hour conversion.
pub fn normalize_time(input: &str) -> Result<String, ValidationError> {
    let caps = TIME_RE
        .captures(input.trim())
        .ok_or(ValidationError::InvalidTimeFormat)?;

    let mut hours: u32 = caps[1]
        .parse()
        .map_err(|_| ValidationError::InvalidTimeFormat)?;
    let minutes: u32 = caps[2]
        .parse()
        .map_err(|_| ValidationError::InvalidTimeFormat)?;

    match caps.get(4).map(|m| m.as_str().to_ascii_uppercase()).as_deref() {
        Some("PM") if hours != 12 => hours += 12,
        Some("AM") if hours == 12 => hours = 0,
        _ => {}
    }

    if hours > 23 || minutes > 59 {
        return Err(ValidationError::InvalidTimeValue);
    }

    Ok(format!("{hours:02}:{minutes:02}"))
}
