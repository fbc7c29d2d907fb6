pub(crate) mod error;
pub(crate) mod projects;
pub(crate) mod time_entries;

pub(crate) use error::ApiError;

use time::{
    format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime,
};

fn parse_date(s: &str) -> Result<Date, ApiError> {
    Date::parse(s, format_description!("[year]-[month]-[day]"))
        .map_err(|_| ApiError::bad_request(format!("could not parse date: {}", s)))
}

/// Parses an RFC 3339 timestamp. A `+` offset sent unencoded in a query
/// string arrives as a space and is accepted as well.
fn parse_timestamp(s: &str) -> Result<OffsetDateTime, ApiError> {
    OffsetDateTime::parse(s, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(&s.replacen(' ', "+", 1), &Rfc3339))
        .map_err(|_| ApiError::bad_request(format!("could not parse timestamp: {}", s)))
}
