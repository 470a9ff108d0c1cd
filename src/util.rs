use chrono::{NaiveTime, Timelike};

use error::SliderError;

pub const MINUTES_PER_DAY: u16 = 1440;
pub const LAST_MINUTE: u16 = MINUTES_PER_DAY - 1;

/// Parses an "HH:mm" time of day into minutes since midnight.
pub fn parse_hm(text: &str) -> Result<u16, SliderError> {
    let bytes = text.as_bytes();
    let canonical = bytes.len() == 5
        && bytes[2] == b':'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 2 || b.is_ascii_digit());
    if !canonical {
        return Err(SliderError::invalid(format!(
            "{:?} is not an HH:mm time of day",
            text
        )));
    }

    let time = NaiveTime::parse_from_str(text, "%H:%M").map_err(|e| {
        SliderError::invalid(format!("{:?} is not an HH:mm time of day ({})", text, e))
    })?;

    Ok((time.hour() * 60 + time.minute()) as u16)
}

pub fn format_hm(minutes: u16) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
