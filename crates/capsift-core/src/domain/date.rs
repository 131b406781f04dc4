use std::fmt::{Display, Formatter};

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::ValidationError;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Calendar date in ISO form (YYYY-MM-DD), the granularity the provider
/// reports listing dates and daily aggregates at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate(Date);

impl IsoDate {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let parsed = Date::parse(input, ISO_DATE).map_err(|_| ValidationError::InvalidDate {
            value: input.to_owned(),
        })?;

        Ok(Self(parsed))
    }

    /// Calendar day containing a provider millisecond timestamp, read as UTC.
    pub fn from_unix_millis(millis: i64) -> Result<Self, ValidationError> {
        let datetime = OffsetDateTime::from_unix_timestamp(millis.div_euclid(1_000)).map_err(
            |_| ValidationError::InvalidDate {
                value: millis.to_string(),
            },
        )?;

        Ok(Self(datetime.date()))
    }

    pub fn into_inner(self) -> Date {
        self.0
    }

    pub fn format_iso(self) -> String {
        self.0
            .format(ISO_DATE)
            .expect("IsoDate must be ISO formattable")
    }
}

impl Display for IsoDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_iso())
    }
}

impl Serialize for IsoDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for IsoDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value).map_err(D::Error::custom)
    }
}
