use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use crate::{CoreError, CoreResult};

const LOCAL_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses a flight date as entered (`2024-01-01T10:00`), with optional seconds
/// or an RFC 3339 offset. A bare date means midnight.
pub fn parse_flight_date(text: &str) -> CoreResult<NaiveDateTime> {
    let text = text.trim();

    for format in LOCAL_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(parsed);
        }
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Ok(parsed.with_timezone(&Local).naive_local());
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| CoreError::InvalidDate(text.to_string()))
}

/// pt-BR rendering, `01/01/2024 10:00`. Unparsable input is returned unchanged.
pub fn format_flight_date(text: &str) -> String {
    match parse_flight_date(text) {
        Ok(parsed) => parsed.format("%d/%m/%Y %H:%M").to_string(),
        Err(_) => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_datetime_local_input() {
        let parsed = parse_flight_date("2024-01-01T10:00").unwrap();
        assert_eq!(parsed.year(), 2024);
        assert_eq!(parsed.hour(), 10);

        let with_seconds = parse_flight_date("2024-01-01T10:00:30").unwrap();
        assert_eq!(with_seconds.second(), 30);
    }

    #[test]
    fn test_parse_bare_date() {
        let parsed = parse_flight_date("2024-12-25").unwrap();
        assert_eq!(parsed.day(), 25);
        assert_eq!(parsed.hour(), 0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_flight_date("amanhã"),
            Err(CoreError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_format_pt_br() {
        assert_eq!(format_flight_date("2024-01-01T10:00"), "01/01/2024 10:00");
        assert_eq!(format_flight_date("??"), "??");
    }
}
