use chrono::{DateTime, NaiveDateTime, Utc};
use log::error;

/// Feed timestamps look like `2018-02-20T21:29Z`: UTC, minute resolution.
const FEED_DATE_FORMAT: &str = "%Y-%m-%dT%H:%MZ";

/// Parses a feed timestamp. Missing or empty values give `None` silently,
/// malformed ones are logged and also give `None`.
pub fn parse_feed_date(value: Option<&str>) -> Option<DateTime<Utc>> {
	let value = value.filter(|v| !v.is_empty())?;

	match NaiveDateTime::parse_from_str(value, FEED_DATE_FORMAT) {
		Ok(date) => Some(date.and_utc()),
		Err(e) => {
			error!("Could not convert date string {}: {}", value, e);
			None
		}
	}
}
