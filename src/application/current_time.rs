//! Local clock tool.
//!
//! Accepts `UTC`, `Z`, `GMT` or a fixed offset (`+05:30`, `-0800`, `+09`).
//! Named zones other than those are rejected rather than guessed.

use chrono::{DateTime, FixedOffset, SecondsFormat, Utc};

use crate::domain::tools::catalog::{params, DEFAULT_TIMEZONE};
use crate::domain::tools::{ArgumentError, ToolArguments, ToolResult};

const MAX_OFFSET_SECS: i32 = 14 * 3600;

/// Renders the current time for the requested timezone.
pub fn current_time(arguments: &ToolArguments) -> ToolResult {
    current_time_at(arguments, Utc::now())
}

pub(crate) fn current_time_at(arguments: &ToolArguments, now: DateTime<Utc>) -> ToolResult {
    let timezone = arguments
        .optional_string(params::TIMEZONE)
        .unwrap_or(DEFAULT_TIMEZONE);

    match parse_offset(timezone) {
        Ok(offset) => {
            let local = now.with_timezone(&offset);
            ToolResult::success(format!(
                "Current time in {}: {}",
                timezone,
                local.to_rfc3339_opts(SecondsFormat::Secs, true)
            ))
        }
        Err(err) => ToolResult::validation_error(&err),
    }
}

fn parse_offset(timezone: &str) -> Result<FixedOffset, ArgumentError> {
    let trimmed = timezone.trim();
    if ["UTC", "Z", "GMT"]
        .iter()
        .any(|name| trimmed.eq_ignore_ascii_case(name))
    {
        return FixedOffset::east_opt(0).ok_or_else(|| unsupported(timezone));
    }

    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'+') => (1, &trimmed[1..]),
        Some(b'-') => (-1, &trimmed[1..]),
        _ => return Err(unsupported(timezone)),
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(unsupported(timezone));
    }
    let (hours, minutes) = match digits.len() {
        1 | 2 => (digits.as_str(), "0"),
        4 => digits.split_at(2),
        _ => return Err(unsupported(timezone)),
    };
    let hours: i32 = hours.parse().map_err(|_| unsupported(timezone))?;
    let minutes: i32 = minutes.parse().map_err(|_| unsupported(timezone))?;
    if minutes >= 60 {
        return Err(unsupported(timezone));
    }

    let seconds = sign * (hours * 3600 + minutes * 60);
    if seconds.abs() > MAX_OFFSET_SECS {
        return Err(unsupported(timezone));
    }
    FixedOffset::east_opt(seconds).ok_or_else(|| unsupported(timezone))
}

fn unsupported(timezone: &str) -> ArgumentError {
    ArgumentError::invalid(
        params::TIMEZONE,
        format!(
            "unsupported timezone `{}`; use UTC or an offset like +05:30",
            timezone
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tools::{calendar_registry, ToolResultKind};
    use chrono::TimeZone;
    use serde_json::json;

    fn arguments(value: serde_json::Value) -> ToolArguments {
        calendar_registry()
            .unwrap()
            .resolve("get_current_time")
            .unwrap()
            .validate(&value)
            .unwrap()
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn defaults_to_utc() {
        let result = current_time_at(&arguments(json!({})), noon());

        assert_eq!(result.content(), "Current time in UTC: 2024-03-01T12:00:00Z");
    }

    #[test]
    fn applies_fixed_offsets() {
        let result = current_time_at(&arguments(json!({"timezone": "+05:30"})), noon());
        assert_eq!(
            result.content(),
            "Current time in +05:30: 2024-03-01T17:30:00+05:30"
        );

        let result = current_time_at(&arguments(json!({"timezone": "-0800"})), noon());
        assert_eq!(
            result.content(),
            "Current time in -0800: 2024-03-01T04:00:00-08:00"
        );
    }

    #[test]
    fn accepts_utc_aliases() {
        for alias in ["Z", "gmt", "utc"] {
            let result = current_time_at(&arguments(json!({"timezone": alias})), noon());
            assert_eq!(result.kind(), ToolResultKind::Success, "{}", alias);
        }
    }

    #[test]
    fn rejects_named_zones_and_bad_offsets() {
        for tz in ["America/New_York", "+25:00", "+05:75", "0530", "+5:3:0"] {
            let result = current_time_at(&arguments(json!({"timezone": tz})), noon());
            assert_eq!(result.kind(), ToolResultKind::ValidationError, "{}", tz);
            assert!(result.content().contains("timezone"));
        }
    }
}
