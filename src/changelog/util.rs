use std::env;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, FixedOffset, Local, Utc};

pub(crate) const SOURCE_DATE_EPOCH: &str = "SOURCE_DATE_EPOCH";

/// Debian changelog trailer date, e.g. `Mon, 17 Jun 2019 10:21:05 -0700`.
pub(crate) const DEBIAN_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %z";
/// RPM `%changelog` header date, e.g. `Mon Jun 17 2019`.
pub(crate) const RPM_DATE_FORMAT: &str = "%a %b %d %Y";

/// First two dot-separated components of `version`.
pub(crate) fn major_minor(version: &str) -> String {
    version.split('.').take(2).collect::<Vec<_>>().join(".")
}

/// Entry timestamp: `SOURCE_DATE_EPOCH` in UTC when set, otherwise local time.
pub(crate) fn timestamp_now() -> Result<DateTime<FixedOffset>> {
    match env::var(SOURCE_DATE_EPOCH) {
        Ok(value) => timestamp_from_epoch(&value),
        Err(_) => Ok(Local::now().fixed_offset()),
    }
}

fn timestamp_from_epoch(value: &str) -> Result<DateTime<FixedOffset>> {
    let seconds = value
        .trim()
        .parse::<i64>()
        .with_context(|| format!("{SOURCE_DATE_EPOCH} `{value}` is not an integer"))?;
    let timestamp = DateTime::<Utc>::from_timestamp(seconds, 0)
        .ok_or_else(|| anyhow!("{SOURCE_DATE_EPOCH} `{value}` is out of range"))?;
    Ok(timestamp.fixed_offset())
}

#[cfg(test)]
mod tests {
    use super::{DEBIAN_DATE_FORMAT, RPM_DATE_FORMAT, major_minor, timestamp_from_epoch};

    #[test]
    fn major_minor_keeps_first_two_components() {
        assert_eq!(major_minor("1.15.0"), "1.15");
        assert_eq!(major_minor("1.15.2-rc.1"), "1.15");
        assert_eq!(major_minor("0.7"), "0.7");
        assert_eq!(major_minor("1"), "1");
    }

    #[test]
    fn epoch_timestamp_formats_in_utc() {
        let timestamp = timestamp_from_epoch("1560792065").expect("valid epoch");
        assert_eq!(
            timestamp.format(DEBIAN_DATE_FORMAT).to_string(),
            "Mon, 17 Jun 2019 17:21:05 +0000"
        );
        assert_eq!(
            timestamp.format(RPM_DATE_FORMAT).to_string(),
            "Mon Jun 17 2019"
        );
    }

    #[test]
    fn epoch_must_be_an_integer() {
        let error = timestamp_from_epoch("yesterday").expect_err("should fail");
        assert!(format!("{error:#}").contains("is not an integer"));
    }
}
