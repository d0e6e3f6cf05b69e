//! Artifact timestamps on the wire.
//!
//! Snapshots always carry an explicit numeric offset (`+00:00`), never the
//! `Z` shorthand, so that re-encoding an unchanged snapshot produces
//! byte-identical output. Both forms are accepted when parsing.

use time::OffsetDateTime;
use time::error::{Format, Parse};
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

const WHOLE_SECONDS: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory]:[offset_minute]"
);
const FRACTIONAL_SECONDS: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond][offset_hour sign:mandatory]:[offset_minute]"
);

/// Formats a timestamp as fixed-offset ISO-8601.
///
/// Fractional seconds are only written when non-zero, and then with as many
/// digits as needed to round-trip exactly.
///
/// ```
/// use resbot_model::format_timestamp;
/// use time::macros::datetime;
/// assert_eq!(format_timestamp(datetime!(2022-01-13 10:09:08 UTC)).unwrap(), "2022-01-13T10:09:08+00:00");
/// ```
pub fn format(timestamp: OffsetDateTime) -> Result<String, Format> {
    match timestamp.nanosecond() {
        0 => timestamp.format(WHOLE_SECONDS),
        _ => timestamp.format(FRACTIONAL_SECONDS),
    }
}

/// Parses an ISO-8601 timestamp with either a numeric offset or `Z`.
pub fn parse(value: &str) -> Result<OffsetDateTime, Parse> {
    OffsetDateTime::parse(value.trim(), &Rfc3339)
}
