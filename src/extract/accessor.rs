use std::fmt;

use serde_json::Value;

use crate::archive::Record;

/// Locates the tweet body inside an archive record.
pub trait TextAccessor {
    fn text<'a>(&self, record: &'a Record) -> Option<&'a str>;
}

/// Path of object keys leading to a string field, e.g. `tweet.full_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPath {
    keys: Vec<String>,
}

impl FieldPath {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        FieldPath {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Build from dotted notation. Empty segments are dropped.
    pub fn parse(dotted: &str) -> Self {
        FieldPath::new(dotted.split('.').map(str::trim).filter(|k| !k.is_empty()))
    }
}

impl Default for FieldPath {
    fn default() -> Self {
        FieldPath::new(["tweet", "full_text"])
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.keys.join("."))
    }
}

impl TextAccessor for FieldPath {
    fn text<'a>(&self, record: &'a Record) -> Option<&'a str> {
        let (first, rest) = self.keys.split_first()?;
        let mut node: &Value = record.get(first)?;
        for key in rest {
            node = node.as_object()?.get(key)?;
        }
        node.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(v: Value) -> Record {
        match v {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn default_path_reads_full_text() {
        let r = record(json!({"tweet": {"full_text": "hello", "id_str": "1"}}));
        assert_eq!(FieldPath::default().text(&r), Some("hello"));
    }

    #[test]
    fn missing_nested_field_is_none() {
        let path = FieldPath::default();
        assert_eq!(path.text(&record(json!({"notweet": 1}))), None);
        assert_eq!(path.text(&record(json!({"tweet": {"text": "x"}}))), None);
        assert_eq!(path.text(&record(json!({"tweet": "flat"}))), None);
    }

    #[test]
    fn non_string_field_is_none() {
        let r = record(json!({"tweet": {"full_text": 42}}));
        assert_eq!(FieldPath::default().text(&r), None);
        let r = record(json!({"tweet": {"full_text": null}}));
        assert_eq!(FieldPath::default().text(&r), None);
    }

    #[test]
    fn dotted_paths() {
        let path = FieldPath::parse("note_tweet.core.text");
        assert_eq!(path.to_string(), "note_tweet.core.text");
        let r = record(json!({"note_tweet": {"core": {"text": "long form"}}}));
        assert_eq!(path.text(&r), Some("long form"));

        assert_eq!(FieldPath::parse(" tweet . full_text "), FieldPath::default());
    }

    #[test]
    fn empty_path_never_matches() {
        let r = record(json!({"tweet": {"full_text": "hello"}}));
        assert_eq!(FieldPath::parse("").text(&r), None);
    }
}
