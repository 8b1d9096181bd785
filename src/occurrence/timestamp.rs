use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;

/// Event time of an occurrence. Naive, interpreted as UTC.
pub type Timestamp = NaiveDateTime;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse the loose date forms found in occurrence exports.
///
/// Accepts plain dates, date-times with or without fractional seconds,
/// RFC 3339 with an offset (normalised to UTC), year-month and bare years
/// (first instant of the period), and ISO 8601 intervals, of which only
/// the start is kept. Returns `None` for anything else.
pub fn parse(text: &str) -> Option<Timestamp> {
    let text = text.trim();
    let text = text.split('/').next().unwrap_or(text).trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    if let Some(stripped) = text.strip_suffix('Z') {
        if let Some(ts) = datetime(stripped) {
            return Some(ts);
        }
    }
    datetime(text)
        .or_else(|| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok().map(midnight))
        .or_else(|| month(text))
        .or_else(|| year(text))
}

fn datetime(text: &str) -> Option<Timestamp> {
    DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(text, f).ok())
}

fn month(text: &str) -> Option<Timestamp> {
    let (y, m) = text.split_once('-')?;
    if y.len() != 4 || m.is_empty() || m.len() > 2 {
        return None;
    }
    NaiveDate::from_ymd_opt(y.parse().ok()?, m.parse().ok()?, 1).map(midnight)
}

fn year(text: &str) -> Option<Timestamp> {
    if text.len() != 4 || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    NaiveDate::from_ymd_opt(text.parse().ok()?, 1, 1).map(midnight)
}

fn midnight(date: NaiveDate) -> Timestamp {
    date.and_time(NaiveTime::MIN)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Timestamp {
        midnight(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn plain_date() {
        assert_eq!(parse("2020-06-01"), Some(ymd(2020, 6, 1)));
    }

    #[test]
    fn datetime_with_seconds() {
        let ts = parse("2020-06-01T12:30:15").unwrap();
        assert_eq!(ts.format("%H:%M:%S").to_string(), "12:30:15");
        assert_eq!(parse("2020-06-01 12:30:15"), Some(ts));
        assert_eq!(parse("2020-06-01T12:30:15Z"), Some(ts));
    }

    #[test]
    fn offset_is_normalised_to_utc() {
        let ts = parse("2020-06-01T02:00:00+02:00").unwrap();
        assert_eq!(ts, ymd(2020, 6, 1));
    }

    #[test]
    fn partial_dates() {
        assert_eq!(parse("2019-03"), Some(ymd(2019, 3, 1)));
        assert_eq!(parse("1987"), Some(ymd(1987, 1, 1)));
    }

    #[test]
    fn interval_keeps_start() {
        assert_eq!(parse("2010-03-12/2010-03-15"), Some(ymd(2010, 3, 12)));
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("yesterday"), None);
        assert_eq!(parse("2020-13-45"), None);
        assert_eq!(parse("12345"), None);
    }
}
