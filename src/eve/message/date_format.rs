use crate::errors::Error;
use crate::value::FieldValue;
use chrono::{DateTime, ParseError, Utc};

pub const FORMAT: &'static str = "%Y-%m-%dT%H:%M:%S%.f%z";

pub fn parse_date_time(s: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_str(s, FORMAT).map(|dt| dt.with_timezone(&Utc))
}

/// Seconds elapsed between two eve timestamps, e.g. `flow.start` and `flow.end`
pub fn seconds_between(start: &FieldValue, end: &FieldValue) -> Result<f64, Error> {
    let (start, end) = match (start.as_str(), end.as_str()) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            return Err(Error::Custom {
                msg: format!("Timestamps are not strings: {} / {}", start, end),
            })
        }
    };
    let elapsed = parse_date_time(end)? - parse_date_time(start)?;
    let secs = match elapsed.num_nanoseconds() {
        Some(nanos) => nanos as f64 / 1e9,
        None => elapsed.num_milliseconds() as f64 / 1e3,
    };
    Ok(secs)
}
