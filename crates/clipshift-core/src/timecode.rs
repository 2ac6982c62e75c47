//! `MM:SS` time codes.
//!
//! Time codes are the human-facing way of entering a trim range. Parsing is
//! forgiving: anything that is not a well-formed `MM:SS` value reads as `0.0`,
//! which callers treat as "unspecified" (start of clip, or end of clip for an
//! end point), never as an error.

/// Parse a `MM:SS` string into seconds.
///
/// Minutes must be an integer, seconds may be fractional (`"01:30.5"` is
/// `90.5`). Malformed input (wrong separator count, non-numeric parts,
/// negative or non-finite results) returns `0.0`.
///
/// # Example
/// ```
/// use clipshift_core::timecode;
///
/// assert_eq!(timecode::parse("02:05"), 125.0);
/// assert_eq!(timecode::parse("garbage"), 0.0);
/// ```
pub fn parse(text: &str) -> f64 {
    let mut parts = text.split(':');
    let (Some(minutes), Some(seconds), None) = (parts.next(), parts.next(), parts.next()) else {
        return 0.0;
    };

    let Ok(minutes) = minutes.trim().parse::<i64>() else {
        return 0.0;
    };
    let Ok(seconds) = seconds.trim().parse::<f64>() else {
        return 0.0;
    };

    let total = minutes as f64 * 60.0 + seconds;
    if total.is_finite() && total >= 0.0 {
        total
    } else {
        0.0
    }
}

/// Format seconds as `MM:SS`.
///
/// Both fields are truncated and zero-padded to two digits. There is no hour
/// rollover, so 3725 seconds formats as `"62:05"`.
pub fn format(seconds: f64) -> String {
    if !seconds.is_finite() || seconds <= 0.0 {
        return "00:00".to_string();
    }

    let minutes = (seconds / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    format!("{:02}:{:02}", minutes, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(parse("00:00"), 0.0);
        assert_eq!(parse("01:30"), 90.0);
        assert_eq!(parse("10:05.5"), 605.5);
        assert_eq!(parse(" 2 : 07 "), 127.0);
    }

    #[test]
    fn test_parse_malformed_is_zero() {
        assert_eq!(parse(""), 0.0);
        assert_eq!(parse("90"), 0.0);
        assert_eq!(parse("1:2:3"), 0.0);
        assert_eq!(parse("ab:cd"), 0.0);
        assert_eq!(parse("1.5:00"), 0.0);
        assert_eq!(parse("00:inf"), 0.0);
        assert_eq!(parse("-3:00"), 0.0);
    }

    #[test]
    fn test_format() {
        assert_eq!(format(0.0), "00:00");
        assert_eq!(format(59.99), "00:59");
        assert_eq!(format(90.0), "01:30");
        assert_eq!(format(3725.0), "62:05");
    }

    #[test]
    fn test_format_degenerate() {
        assert_eq!(format(-4.0), "00:00");
        assert_eq!(format(f64::NAN), "00:00");
    }

    #[test]
    fn test_round_trip_is_lossy_below_one_second() {
        assert_eq!(format(parse("03:07.9")), "03:07");
        assert_eq!(parse(&format(187.0)), 187.0);
    }
}
