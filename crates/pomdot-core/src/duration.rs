//! Parsing and formatting of the `time` tokens.
//!
//! FOCUS and REST accept `N` (minutes), `Nm` (minutes) or `Ns` (seconds).
//! REPEAT is a plain non-negative integer.

use crate::error::ParseError;

/// Smallest accepted countdown bar width.
pub const MIN_BAR_WIDTH: u16 = 10;

/// Parse a focus or rest token into seconds.
pub fn parse_focus_or_rest(token: &str) -> Result<u64, ParseError> {
    let text = token.trim().to_ascii_lowercase();
    let invalid = || ParseError::InvalidDurationFormat {
        token: token.to_string(),
    };

    let (digits, multiplier) = match text.as_bytes().last() {
        Some(b'm') => (&text[..text.len() - 1], 60),
        Some(b's') => (&text[..text.len() - 1], 1),
        _ => (text.as_str(), 60),
    };
    if !is_digits(digits) {
        return Err(invalid());
    }

    let amount: u64 = digits.parse().map_err(|_| invalid())?;
    if amount == 0 {
        return Err(ParseError::DurationTooSmall {
            token: token.to_string(),
        });
    }
    amount.checked_mul(multiplier).ok_or_else(invalid)
}

/// Parse a repeat token into the number of extra focus/rest cycles.
pub fn parse_repeat(token: &str) -> Result<u64, ParseError> {
    let text = token.trim();
    let invalid = || ParseError::InvalidRepeatFormat {
        token: token.to_string(),
    };
    if !is_digits(text) {
        return Err(invalid());
    }
    text.parse().map_err(|_| invalid())
}

/// Parse a bar width token.
pub fn parse_bar_width(token: &str) -> Result<u16, ParseError> {
    let text = token.trim();
    let invalid = || ParseError::InvalidBarWidth {
        token: token.to_string(),
    };
    if !is_digits(text) {
        return Err(invalid());
    }
    let width: i64 = text.parse().map_err(|_| invalid())?;
    validate_bar_width(width).map_err(|err| match err {
        ParseError::InvalidBarWidth { .. } => invalid(),
        other => other,
    })
}

/// Range-check an integer bar width, e.g. one read from the config file.
pub fn validate_bar_width(width: i64) -> Result<u16, ParseError> {
    if width < i64::from(MIN_BAR_WIDTH) {
        return Err(ParseError::BarWidthTooSmall {
            width,
            min: MIN_BAR_WIDTH,
        });
    }
    u16::try_from(width).map_err(|_| ParseError::InvalidBarWidth {
        token: width.to_string(),
    })
}

/// Canonical token for a duration: bare minutes when whole, seconds otherwise.
///
/// `parse_focus_or_rest(&format_duration_token(s)) == Ok(s)` for every `s >= 1`.
pub fn format_duration_token(seconds: u64) -> String {
    if seconds % 60 == 0 {
        (seconds / 60).to_string()
    } else {
        format!("{seconds}s")
    }
}

/// `HH:MM:SS`; hours are not wrapped at 24.
pub fn format_hhmmss(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
