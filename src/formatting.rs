use crate::config::DisplayConfig;
use thiserror::Error;

/// Sort value used for a shooting percentage with no attempts
///
/// Real percentages are always >= 0, so this ranks below every real value.
pub const NO_ATTEMPTS_SENTINEL: f64 = -1.0;

/// Box-drawing characters for table borders
#[derive(Debug, Clone, PartialEq)]
pub struct BoxChars {
    pub horizontal: String,
    pub double_horizontal: String,
    pub vertical: String,
    pub selector: String,
}

impl BoxChars {
    pub fn unicode() -> Self {
        Self {
            horizontal: "─".to_string(),
            double_horizontal: "═".to_string(),
            vertical: "│".to_string(),
            selector: "►".to_string(),
        }
    }

    pub fn ascii() -> Self {
        Self {
            horizontal: "-".to_string(),
            double_horizontal: "=".to_string(),
            vertical: "|".to_string(),
            selector: ">".to_string(),
        }
    }

    pub fn from_use_unicode(use_unicode: bool) -> Self {
        if use_unicode {
            Self::unicode()
        } else {
            Self::ascii()
        }
    }
}

/// Format a header with text and underline
///
/// # Arguments
/// * `text` - The header text to display
/// * `double_line` - If true, uses double-line (═/=), otherwise single-line (─/-)
/// * `display` - Display configuration to determine unicode vs ASCII
pub fn format_header(text: &str, double_line: bool, display: &DisplayConfig) -> String {
    let separator_char = if double_line {
        &display.box_chars.double_horizontal
    } else {
        &display.box_chars.horizontal
    };
    format!("{}\n{}\n", text, separator_char.repeat(text.chars().count()))
}

/// Shooting percentage for display, e.g. "50.0%"
///
/// No attempts is "no data", not 0%, so it renders as an empty string.
pub fn percentage(made: f64, attempts: f64) -> String {
    if attempts == 0.0 {
        return String::new();
    }
    format!("{:.1}%", made / attempts * 100.0)
}

/// Shooting percentage as a sortable ratio
///
/// Returns [`NO_ATTEMPTS_SENTINEL`] when there are no attempts so those rows
/// always end up as the worst value instead of dividing by zero.
pub fn percentage_sort_value(made: f64, attempts: f64) -> f64 {
    if attempts == 0.0 {
        return NO_ATTEMPTS_SENTINEL;
    }
    made / attempts
}

/// Render fractional minutes as a game clock, e.g. 9.5 -> "9:30"
///
/// Seconds are rounded to the nearest whole second before splitting, so
/// 59.999 becomes "60:00" rather than "59:60". Negative input renders as "0:00".
pub fn format_minutes(minutes: f64) -> String {
    let total_seconds = (minutes * 60.0).round().max(0.0) as u64;
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseMinutesError {
    #[error("invalid minutes '{0}': expected M:SS or a number")]
    Invalid(String),
    #[error("invalid seconds in '{0}': must be between 0 and 59")]
    SecondsOutOfRange(String),
}

/// Parse "M:SS", "M" or "M.f" into fractional minutes
///
/// Blank input means no minutes played.
pub fn parse_minutes(value: &str) -> Result<f64, ParseMinutesError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    let invalid = || ParseMinutesError::Invalid(trimmed.to_string());

    if let Some((mm, ss)) = trimmed.split_once(':') {
        let mins: u32 = mm.trim().parse().map_err(|_| invalid())?;
        let secs: u32 = ss.trim().parse().map_err(|_| invalid())?;
        if secs >= 60 {
            return Err(ParseMinutesError::SecondsOutOfRange(trimmed.to_string()));
        }
        return Ok(f64::from(mins) + f64::from(secs) / 60.0);
    }

    let mins: f64 = trimmed.parse().map_err(|_| invalid())?;
    if !mins.is_finite() || mins < 0.0 {
        return Err(invalid());
    }
    Ok(mins)
}

/// Counting stat for display: whole numbers without decimals, others with one
pub fn format_stat(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

/// "#23 Name (G)" style label used wherever a player is listed
pub fn player_label(name: &str, jersey_number: Option<i64>, position: Option<&str>) -> String {
    let mut label = match jersey_number {
        Some(number) => format!("#{} {}", number, name),
        None => name.to_string(),
    };
    if let Some(pos) = position.filter(|p| !p.is_empty()) {
        label.push_str(&format!(" ({})", pos));
    }
    label
}
