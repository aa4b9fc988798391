//! Runtime sample values.
//!
//! `Value` is the closed set of things we know how to look at: JSON data, plus
//! the handful of host-ish kinds (dates, promises, functions, bigints,
//! symbols) that sample data can carry when it is built in code rather than
//! parsed from a document.
use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Date(DateTime<Utc>),
    /// A pending or settled asynchronous result. Its payload is never inspected.
    Promise,
    /// Anything callable.
    Function,
    Array(Vec<Value>),
    /// Keys keep insertion order; that order is what inference walks.
    Object(IndexMap<String, Value>),
    BigInt(i128),
    Symbol(Option<String>),
}

impl Value {
    pub fn object() -> Self {
        Value::Object(IndexMap::new())
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function)
    }

    /// Convert a JSON document, promoting ISO-8601 looking strings to `Date`.
    pub fn from_json_with_dates(json: serde_json::Value) -> Self {
        convert(json, true)
    }
}

// ------------------------------ JSON bridge ------------------------------- //

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        convert(json, false)
    }
}

fn convert(json: serde_json::Value, detect_dates: bool) -> Value {
    use serde_json::Value as J;
    match json {
        J::Null => Value::Null,
        J::Bool(b) => Value::Bool(b),
        // as_f64 only fails for arbitrary-precision numbers, which we don't enable
        J::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
        J::String(s) => {
            if detect_dates {
                if let Some(date) = parse_iso_date(&s) {
                    return Value::Date(date);
                }
            }
            Value::String(s)
        }
        J::Array(xs) => Value::Array(
            xs.into_iter().map(|x| convert(x, detect_dates)).collect()
        ),
        J::Object(map) => Value::Object(
            map.into_iter().map(|(k, v)| (k, convert(v, detect_dates))).collect()
        ),
    }
}

// ------------------------------ Date sniffing ----------------------------- //

static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\d{4}-\d{2}-\d{2}(?:[Tt ]\d{2}:\d{2}(?::\d{2}(?:\.\d+)?)?(?:[Zz]|[+-]\d{2}:?\d{2})?)?$"
    ).expect("static ISO date regex")
});

/// Parse `YYYY-MM-DD` or an RFC 3339 timestamp. Anything else is `None`.
pub fn parse_iso_date(s: &str) -> Option<DateTime<Utc>> {
    if !ISO_DATE.is_match(s) {
        return None;
    }
    if s.len() == 10 {
        let day = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
        return Some(day.and_hms_opt(0, 0, 0)?.and_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // offset-less timestamps are read as UTC
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| chrono::NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

// ------------------------------ Constructors ------------------------------ //

impl From<&str> for Value {
    fn from(s: &str) -> Self { Value::String(s.to_string()) }
}

impl From<String> for Value {
    fn from(s: String) -> Self { Value::String(s) }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self { Value::Number(n) }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self { Value::Number(n as f64) }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self { Value::Bool(b) }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self { Value::Date(d) }
}

impl From<Vec<Value>> for Value {
    fn from(xs: Vec<Value>) -> Self { Value::Array(xs) }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn json_objects_keep_document_key_order() {
        let v = Value::from(json!({"zeta": 1, "alpha": "a", "mid": null}));
        let Value::Object(map) = v else { panic!("expected object") };
        let keys: Vec<&str> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
        assert_eq!(map["mid"], Value::Null);
    }

    #[test]
    fn strings_stay_strings_without_date_detection() {
        let v = Value::from(json!("2024-05-01T10:00:00Z"));
        assert_eq!(v, Value::String("2024-05-01T10:00:00Z".into()));
    }

    #[test]
    fn date_detection_promotes_nested_timestamps() {
        let v = Value::from_json_with_dates(json!({
            "created": "2024-05-01T10:30:00+02:00",
            "day": "2024-05-01",
            "tags": ["2024-05-02", "not a date"],
        }));
        let Value::Object(map) = v else { panic!("expected object") };
        let Value::Date(created) = &map["created"] else { panic!("created is a date") };
        assert_eq!(created.hour(), 8);
        let Value::Date(day) = &map["day"] else { panic!("day is a date") };
        assert_eq!((day.year(), day.month(), day.day()), (2024, 5, 1));
        let Value::Array(tags) = &map["tags"] else { panic!("tags is an array") };
        assert!(matches!(tags[0], Value::Date(_)));
        assert_eq!(tags[1], Value::from("not a date"));
    }

    #[test]
    fn iso_lookalikes_that_do_not_parse_are_rejected() {
        assert!(parse_iso_date("2024-13-45").is_none());
        assert!(parse_iso_date("20240501").is_none());
        assert!(parse_iso_date("2024-05-01T10:30").is_some());
        assert!(parse_iso_date("2024-05-01 10:30:15.250").is_some());
    }

    #[test]
    fn from_iter_builds_ordered_objects() {
        let v: Value = [("b", Value::from(1_i64)), ("a", Value::Function)].into_iter().collect();
        let Value::Object(map) = v else { panic!("expected object") };
        assert_eq!(map.get_index(0).map(|(k, _)| k.as_str()), Some("b"));
        assert!(map["a"].is_callable());
    }
}
