/*!
 * Bank statement documents.
 *
 * Typed model of the statement JSON produced by the bank's statement API.
 * Every type implements `Localize`, so statements can be handed to the
 * `Translator` directly.
 */

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

pub use self::model::{
    AccountBalance, AccountStatement, AccountStatements, DailySummary, GlobalSummary, PartyDetails, Record,
    StatementResponse, StatementSummary,
};

pub mod model;

/// Timestamp as found in statements, `None` when the API sent `null`
///
/// Accepts RFC 3339 with an offset, `YYYY-MM-DDTHH:MM:SS[.fff]` without one
/// (taken as UTC) and plain dates. Serializes as RFC 3339.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Time(pub Option<DateTime<Utc>>);

impl Time {
    /// Parse one of the accepted timestamp layouts
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Some(Self(None));
        }

        if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
            return Some(Self(Some(parsed.with_timezone(&Utc))));
        }
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(Self(Some(parsed.and_utc())));
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|midnight| Self(Some(midnight.and_utc())))
    }

    /// Whether the timestamp is missing
    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }
}

impl From<DateTime<Utc>> for Time {
    fn from(value: DateTime<Utc>) -> Self {
        Self(Some(value))
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(time) => serializer.serialize_str(&time.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }
}

struct TimeVisitor;

impl<'de> Visitor<'de> for TimeVisitor {
    type Value = Time;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a timestamp string or null")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Time, E> {
        Time::parse(value).ok_or_else(|| E::custom(format!("unable to parse time: {}", value)))
    }

    fn visit_none<E: de::Error>(self) -> Result<Time, E> {
        Ok(Time(None))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Time, E> {
        Ok(Time(None))
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Time, D::Error> {
        deserializer.deserialize_str(TimeVisitor)
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_option(TimeVisitor)
    }
}

crate::localize_leaf!(Time);
