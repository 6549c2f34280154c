//! Loading of Twitter archive exports (`tweets.js`).
//!
//! The export is a JavaScript assignment of a JSON array to a global,
//! `window.YTD.tweets.part0 = [ ... ]`. Removing that wrapper leaves plain JSON.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::error::{ExtractError, Result};

/// Assignment that precedes the JSON array in a tweets.js export.
pub const WRAPPER_PREFIX: &str = "window.YTD.tweets.part0 = ";

/// One element of the archive array.
pub type Record = Map<String, Value>;

/// Read the whole archive into memory.
pub fn read(path: &Path) -> Result<String> {
    info!("Reading input file...");
    let content = fs::read_to_string(path).map_err(|source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    info!(
        "Successfully read {} characters from input file",
        content.chars().count()
    );
    Ok(content)
}

/// JSON body after a leading wrapper, ignoring a BOM and leading whitespace.
fn unwrap_prefix(blob: &str) -> Option<&str> {
    blob.trim_start_matches('\u{feff}')
        .trim_start()
        .strip_prefix(WRAPPER_PREFIX)
}

/// Remove the JavaScript wrapper, returning the JSON body.
/// Only a leading wrapper counts; anything else, including a bare JSON array
/// whose tweets quote the wrapper, is returned unchanged.
pub fn strip_wrapper(blob: &str) -> &str {
    unwrap_prefix(blob).unwrap_or(blob)
}

/// Strip the wrapper and parse the body as an array of objects.
pub fn parse(blob: &str) -> Result<Vec<Record>> {
    let body = match unwrap_prefix(blob) {
        Some(body) => {
            info!("JavaScript wrapper removed");
            body
        }
        None => {
            debug!("No JavaScript wrapper found, parsing input as bare JSON");
            blob
        }
    };
    info!("Parsing JSON data...");
    let records: Vec<Record> = serde_json::from_str(body)?;
    info!(
        "Successfully parsed JSON data containing {} tweets",
        records.len()
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_wrapper_prefix() {
        assert_eq!(strip_wrapper("window.YTD.tweets.part0 = []"), "[]");
        assert_eq!(strip_wrapper("\u{feff}window.YTD.tweets.part0 = [1]"), "[1]");
    }

    #[test]
    fn bare_json_passes_through() {
        assert_eq!(strip_wrapper("[]"), "[]");
        assert_eq!(strip_wrapper("  [ ]\n"), "  [ ]\n");
    }

    #[test]
    fn quoted_wrapper_inside_bare_json_is_kept() {
        let blob = r#"[{"tweet":{"full_text":"a"}},{"tweet":{"full_text":"js: window.YTD.tweets.part0 = [] lol"}}]"#;
        assert_eq!(strip_wrapper(blob), blob);
        let records = parse(blob).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn wrapper_after_leading_whitespace() {
        assert_eq!(strip_wrapper("\n  window.YTD.tweets.part0 = []"), "[]");
    }

    #[test]
    fn parses_wrapped_array() {
        let blob = r#"window.YTD.tweets.part0 = [{"tweet":{"full_text":"hi"}},{"other":1}]"#;
        let records = parse(blob).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].contains_key("tweet"));
        assert!(records[1].contains_key("other"));
    }

    #[test]
    fn empty_array_parses() {
        let records = parse("window.YTD.tweets.part0 = []").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn broken_json_is_parse_error() {
        let err = parse("window.YTD.tweets.part0 = {not json").unwrap_err();
        assert!(matches!(err, ExtractError::Parse(_)));
    }

    #[test]
    fn non_array_is_parse_error() {
        let err = parse(r#"window.YTD.tweets.part0 = {"tweet":{}}"#).unwrap_err();
        assert!(matches!(err, ExtractError::Parse(_)));
    }

    #[test]
    fn array_of_scalars_is_parse_error() {
        let err = parse("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ExtractError::Parse(_)));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read(&dir.path().join("nope.js")).unwrap_err();
        assert!(matches!(err, ExtractError::Read { .. }));
    }

    #[test]
    fn non_utf8_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.js");
        fs::write(&path, [0xff, 0xfe, 0x00, 0xc3]).unwrap();
        let err = read(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Read { .. }));
    }

    #[test]
    fn fixture_archive_parses() {
        let blob = std::fs::read_to_string("tests/fixtures/tweets.js").unwrap();
        let records = parse(&blob).unwrap();
        assert_eq!(records.len(), 8);
    }
}
