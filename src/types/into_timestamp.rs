use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Utc};

/// Text format accepted for string timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Anything that can stand in for the optional wall-clock timestamp of an icon request.
///
/// A value that cannot be interpreted (e.g. an unparsable string) yields `None`,
/// which icon resolution treats as daytime.
pub trait IntoTimestamp {
    fn into_timestamp(self) -> Option<NaiveDateTime>;
}

impl IntoTimestamp for NaiveDateTime {
    fn into_timestamp(self) -> Option<NaiveDateTime> {
        Some(self)
    }
}

impl IntoTimestamp for DateTime<Local> {
    fn into_timestamp(self) -> Option<NaiveDateTime> {
        Some(self.naive_local())
    }
}

impl IntoTimestamp for DateTime<Utc> {
    fn into_timestamp(self) -> Option<NaiveDateTime> {
        Some(self.naive_utc())
    }
}

impl IntoTimestamp for DateTime<FixedOffset> {
    fn into_timestamp(self) -> Option<NaiveDateTime> {
        Some(self.naive_local())
    }
}

impl IntoTimestamp for &str {
    fn into_timestamp(self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(self.trim(), TIMESTAMP_FORMAT).ok()
    }
}

impl<T: IntoTimestamp> IntoTimestamp for Option<T> {
    fn into_timestamp(self) -> Option<NaiveDateTime> {
        self.and_then(IntoTimestamp::into_timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn test_string_timestamp() {
        let ts = "2024-03-01 18:30".into_timestamp().unwrap();
        assert_eq!(ts.hour(), 18);
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_unparsable_string_is_none() {
        assert_eq!("yesterday evening".into_timestamp(), None);
        assert_eq!(None::<NaiveDateTime>.into_timestamp(), None);
    }
}
