use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{ClientError, ClientResult};

/// Parse a feed file's text into record fields.
///
/// The feed format is one `key:value` entry per line: blank lines are
/// skipped, the split happens at the first `:`, and both sides are trimmed.
/// Values that read as JSON numbers or booleans stay typed; everything else
/// is kept as a string. Lines without a `:` are ignored.
pub fn parse_feed(text: &str) -> Map<String, Value> {
    let mut fields = Map::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            tracing::warn!(line, "skipping feed line without a separator");
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        fields.insert(key.to_string(), coerce_scalar(value.trim()));
    }
    fields
}

/// Read and parse a feed file.
///
/// An empty feed (no usable entries) is refused: publishing an empty
/// mapping would replace a real record with nothing.
pub fn load_feed(path: impl AsRef<Path>) -> ClientResult<Map<String, Value>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let fields = parse_feed(&text);
    if fields.is_empty() {
        return Err(ClientError::EmptyFeed(path.display().to_string()));
    }
    Ok(fields)
}

fn coerce_scalar(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(value @ (Value::Number(_) | Value::Bool(_))) => value,
        _ => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_key_value_lines() {
        let fields = parse_feed("id:IDS60901\nname:Adelaide (West Terrace / ngayirdapira)\n");
        assert_eq!(fields["id"], json!("IDS60901"));
        assert_eq!(fields["name"], json!("Adelaide (West Terrace / ngayirdapira)"));
    }

    #[test]
    fn numbers_and_booleans_stay_typed() {
        let fields = parse_feed("air_temp:13.3\npress:1023.9\ncloud_oktas:8\ngusting:true\n");
        assert_eq!(fields["air_temp"], json!(13.3));
        assert_eq!(fields["press"], json!(1023.9));
        assert_eq!(fields["cloud_oktas"], json!(8));
        assert_eq!(fields["gusting"], json!(true));
    }

    #[test]
    fn splits_at_the_first_colon_only() {
        let fields = parse_feed("local_date_time_full:20230715160000\nuri:http://example.com/x\n");
        assert_eq!(fields["uri"], json!("http://example.com/x"));
    }

    #[test]
    fn blank_and_separator_less_lines_are_skipped() {
        let fields = parse_feed("\nid:x\n\njust some text\n   \n");
        assert_eq!(fields.len(), 1);
        assert_eq!(fields["id"], json!("x"));
    }

    #[test]
    fn whitespace_is_trimmed_around_keys_and_values() {
        let fields = parse_feed("  wind_dir :  S \n");
        assert_eq!(fields["wind_dir"], json!("S"));
    }

    #[test]
    fn later_duplicate_keys_win() {
        let fields = parse_feed("id:first\nid:second\n");
        assert_eq!(fields["id"], json!("second"));
    }

    #[test]
    fn load_refuses_an_empty_feed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "\n\nno separators here\n").unwrap();
        let err = load_feed(&path).unwrap_err();
        assert!(matches!(err, ClientError::EmptyFeed(_)));
    }

    #[test]
    fn load_reads_a_feed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.txt");
        fs::write(&path, "id:IDS60901\nair_temp:13.3\n").unwrap();
        let fields = load_feed(&path).unwrap();
        assert_eq!(fields["id"], json!("IDS60901"));
        assert_eq!(fields["air_temp"], json!(13.3));
    }

    #[test]
    fn missing_feed_file_is_an_io_error() {
        let err = load_feed("/nonexistent/feed.txt").unwrap_err();
        assert!(matches!(err, ClientError::Io(_)));
    }
}
