//! Parser for the `pdfinfo -isodates` metadata dump.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::MetaInfo;

/// A value from a `Key: Value` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InfoValue {
    /// `yes` / `no`
    Bool(bool),
    /// Anything else, verbatim
    Text(String),
}

impl InfoValue {
    fn from_raw(raw: &str) -> Self {
        match raw {
            "yes" => InfoValue::Bool(true),
            "no" => InfoValue::Bool(false),
            other => InfoValue::Text(other.to_string()),
        }
    }

    /// The boolean, if this value was `yes` / `no`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            InfoValue::Bool(b) => Some(*b),
            InfoValue::Text(_) => None,
        }
    }

    /// The text, if this value was not `yes` / `no`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            InfoValue::Text(s) => Some(s),
            InfoValue::Bool(_) => None,
        }
    }
}

/// Parse `Key: Value` lines into a map.
///
/// Blank lines are ignored; lines without a colon are skipped with a
/// warning. The key is everything before the first colon.
pub fn parse_info_dump(text: &str) -> BTreeMap<String, InfoValue> {
    let mut fields = BTreeMap::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line.split_once(':') {
            Some((key, value)) if !key.trim().is_empty() => {
                fields.insert(key.trim().to_string(), InfoValue::from_raw(value.trim()));
            }
            _ => log::warn!("skipping metadata line without key: {}", line),
        }
    }

    fields
}

/// Pick the fields the extractor keeps. Missing or unparseable fields are
/// `None`.
pub fn meta_from_fields(fields: &BTreeMap<String, InfoValue>) -> MetaInfo {
    let date = |key: &str| {
        fields
            .get(key)
            .and_then(InfoValue::as_text)
            .and_then(parse_iso_date)
    };

    MetaInfo {
        touch_date: date("ModDate").or_else(|| date("CreationDate")),
        page_count: fields
            .get("Pages")
            .and_then(InfoValue::as_text)
            .and_then(|s| s.parse().ok()),
        tagged: fields.get("Tagged").and_then(InfoValue::as_bool),
    }
}

/// Parse a dump straight into [`MetaInfo`].
pub fn parse_meta_info(text: &str) -> MetaInfo {
    meta_from_fields(&parse_info_dump(text))
}

/// Parse an ISO-8601 timestamp as printed by `pdfinfo -isodates`.
///
/// Accepts RFC 3339, hour-only offsets (`+02`) and offset-less
/// timestamps, which are taken as UTC.
pub fn parse_iso_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%#z") {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}
