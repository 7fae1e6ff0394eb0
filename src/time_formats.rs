//! Date wrappers that encode to fixed OpenSearch date formats.
//!
//! Native timestamp types are rejected by the compiler because they have no
//! single wire format. These wrappers pick one: each maps to the `date` type
//! with its own `format`, and serializes to matching text.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use serde::de::{self, Deserialize, Deserializer};
use serde::{Serialize, Serializer};

use crate::descriptor::{FieldKind, FieldType};
use crate::error::DateParseError;

/// A type that encodes to text in a known OpenSearch date format.
///
/// Implement this (plus [`FieldType`] returning [`FieldKind::date`]) for
/// custom date types; the compiler maps them to `date` with
/// `format: FORMAT`.
pub trait DateType: fmt::Display + FromStr<Err = DateParseError> {
    /// OpenSearch date format name, e.g. `basic_date`.
    const FORMAT: &'static str;
}

/// `yyyyMMdd'T'HHmmss.SSSZ`, e.g. `20190323T213446.567+00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BasicDateTime(pub DateTime<FixedOffset>);

/// `yyyyMMdd'T'HHmmssZ`, e.g. `20190323T213446+00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BasicDateTimeNoMillis(pub DateTime<FixedOffset>);

/// `yyyyMMdd`, e.g. `20190323`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BasicDate(pub NaiveDate);

const BASIC_DATE_TIME_OUT: &str = "%Y%m%dT%H%M%S%.3f%:z";
const BASIC_DATE_TIME_IN: &str = "%Y%m%dT%H%M%S%.f%:z";
const BASIC_DATE_TIME_NO_MILLIS: &str = "%Y%m%dT%H%M%S%:z";
const BASIC_DATE: &str = "%Y%m%d";

impl DateType for BasicDateTime {
    const FORMAT: &'static str = "basic_date_time";
}

impl DateType for BasicDateTimeNoMillis {
    const FORMAT: &'static str = "basic_date_time_no_millis";
}

impl DateType for BasicDate {
    const FORMAT: &'static str = "basic_date";
}

impl fmt::Display for BasicDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(BASIC_DATE_TIME_OUT))
    }
}

impl fmt::Display for BasicDateTimeNoMillis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(BASIC_DATE_TIME_NO_MILLIS))
    }
}

impl fmt::Display for BasicDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(BASIC_DATE))
    }
}

impl FromStr for BasicDateTime {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateTime::parse_from_str(s, BASIC_DATE_TIME_IN)
            .map(Self)
            .map_err(|source| parse_error::<Self>(s, source))
    }
}

impl FromStr for BasicDateTimeNoMillis {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateTime::parse_from_str(s, BASIC_DATE_TIME_NO_MILLIS)
            .map(Self)
            .map_err(|source| parse_error::<Self>(s, source))
    }
}

impl FromStr for BasicDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, BASIC_DATE)
            .map(Self)
            .map_err(|source| parse_error::<Self>(s, source))
    }
}

fn parse_error<D: DateType>(input: &str, source: chrono::ParseError) -> DateParseError {
    DateParseError {
        input: input.to_string(),
        format: D::FORMAT,
        source,
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for BasicDateTime {
    fn from(dt: DateTime<Tz>) -> Self {
        Self(dt.fixed_offset())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for BasicDateTimeNoMillis {
    fn from(dt: DateTime<Tz>) -> Self {
        Self(dt.fixed_offset())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for BasicDate {
    fn from(dt: DateTime<Tz>) -> Self {
        Self(dt.date_naive())
    }
}

impl From<NaiveDate> for BasicDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

macro_rules! impl_date_field {
    ($($ty:ty),+) => {
        $(
            impl FieldType for $ty {
                fn field_kind() -> FieldKind {
                    FieldKind::date::<$ty>()
                }
            }

            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let text = String::deserialize(deserializer)?;
                    text.parse().map_err(de::Error::custom)
                }
            }
        )+
    };
}

impl_date_field!(BasicDateTime, BasicDateTimeNoMillis, BasicDate);
