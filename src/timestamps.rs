use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{DoraLensError, Result};

/// Octopus emits fractional seconds and a colon separated offset,
/// e.g. `2022-01-04T04:23:02.941+00:00`.
const OCTOPUS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

/// GitHub emits whole seconds with a literal `Z`, e.g. `2022-01-04T04:23:02Z`.
const GITHUB_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

pub fn parse_octopus_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_str(value, OCTOPUS_FORMAT)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|source| DoraLensError::Timestamp {
            value: value.to_string(),
            source,
        })
}

pub fn parse_github_timestamp(value: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, GITHUB_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|source| DoraLensError::Timestamp {
            value: value.to_string(),
            source,
        })
}

/// Signed seconds from `earlier` to `later`, keeping sub-second precision.
#[allow(clippy::cast_precision_loss)]
pub fn seconds_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> f64 {
    (later - earlier).num_milliseconds() as f64 / 1000.0
}
