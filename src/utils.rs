//! Display helpers for numbers and dates

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};

/// Compact display of a count: `1.2M`, `3.4K`, otherwise comma-grouped.
pub fn format_number(num: f64) -> String {
    if num >= 1_000_000.0 {
        return format!("{:.1}M", num / 1_000_000.0);
    }
    if num >= 1_000.0 {
        return format!("{:.1}K", num / 1_000.0);
    }

    let text = num.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut out = format!("{}{}", sign, group_digits(integer));
    if let Some(f) = fraction {
        out.push('.');
        out.push_str(f);
    }
    out
}

/// Insert commas every three digits: `1234567` becomes `1,234,567`
pub fn group_thousands(n: u64) -> String {
    group_digits(&n.to_string())
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Parse an RFC 3339 timestamp, `YYYY-MM-DDTHH:MM:SS` or a bare date.
///
/// Naive values are taken as UTC. Returns `None` when nothing matches.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Render `date` with the tokens `YYYY MM DD HH mm ss`.
///
/// Each token is replaced once, first occurrence only.
pub fn format_date(date: &DateTime<Utc>, format: &str) -> String {
    format
        .replacen("YYYY", &date.year().to_string(), 1)
        .replacen("MM", &format!("{:02}", date.month()), 1)
        .replacen("DD", &format!("{:02}", date.day()), 1)
        .replacen("HH", &format!("{:02}", date.hour()), 1)
        .replacen("mm", &format!("{:02}", date.minute()), 1)
        .replacen("ss", &format!("{:02}", date.second()), 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2_500_000.0), "2.5M");
        assert_eq!(format_number(1_000_000.0), "1.0M");
        assert_eq!(format_number(15_300.0), "15.3K");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(-1234.0), "-1,234");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_parse_date() {
        let dt = parse_date("2024-03-05T10:20:30Z").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 5, 10, 20, 30).unwrap());

        let offset = parse_date("2024-03-05T10:20:30-04:00").unwrap();
        assert_eq!(offset.hour(), 14);

        let day = parse_date("2024-03-05").unwrap();
        assert_eq!(day, Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap());

        assert!(parse_date("not a date").is_none());
        assert!(parse_date("2024-13-40").is_none());
    }

    #[test]
    fn test_format_date() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 9, 7, 5, 3).unwrap();
        assert_eq!(format_date(&dt, "YYYY-MM-DD"), "2024-01-09");
        assert_eq!(format_date(&dt, "DD/MM/YYYY HH:mm:ss"), "09/01/2024 07:05:03");
    }
}
