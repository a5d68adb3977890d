//! Identifiers assigned by the backend.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Identifier of a backend record (user, company, ...).
///
/// The API hands out numeric ids, but string ids are accepted as well and
/// serialized back in the form they were received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            RecordId::Int(v) => Some(*v),
            RecordId::Text(s) => s.parse().ok(),
        }
    }
}

impl core::fmt::Display for RecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RecordId::Int(v) => core::fmt::Display::fmt(v, f),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for RecordId {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl FromStr for RecordId {
    type Err = core::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(v) => Self::Int(v),
            Err(_) => Self::Text(s.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_and_text_ids_keep_their_wire_form() {
        let int: RecordId = serde_json::from_str("7").unwrap();
        assert_eq!(int, RecordId::Int(7));
        assert_eq!(serde_json::to_string(&int).unwrap(), "7");

        let text: RecordId = serde_json::from_str("\"c-42\"").unwrap();
        assert_eq!(text, RecordId::from("c-42"));
        assert_eq!(serde_json::to_string(&text).unwrap(), "\"c-42\"");
    }

    #[test]
    fn parse_prefers_integers() {
        assert_eq!("12".parse::<RecordId>().unwrap(), RecordId::Int(12));
        assert_eq!("abc".parse::<RecordId>().unwrap().as_int(), None);
        assert_eq!(RecordId::from("31").as_int(), Some(31));
    }
}
