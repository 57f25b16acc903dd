//! Snapshot Format Module
//!
//! Plain text dump of the store:
//!
//! ```text
//! <entry_count>
//! <key_1>
//! <value_1>
//! ...
//! ```
//!
//! Keys and values are written unescaped, so one containing `\n` corrupts
//! the file. Any other character, `\r` included, reloads intact. There is no
//! version tag and no checksum.

use std::io::{self, Write};

use tracing::warn;

use crate::error::{Result, StoreError};

// == Encode ==
/// Writes the entry count followed by one key line and one value line per
/// entry, in iteration order.
pub fn encode<'a, W, I>(writer: &mut W, count: usize, entries: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    writeln!(writer, "{}", count)?;
    for (key, value) in entries {
        if key.contains('\n') || value.contains('\n') {
            warn!(key, "Snapshot entry contains a line break and will not reload intact");
        }
        writeln!(writer, "{}", key)?;
        writeln!(writer, "{}", value)?;
    }
    writer.flush()
}

// == Decode ==
/// Parses snapshot text into (key, value) pairs in file order.
///
/// Lines are split on `\n` only, so a `\r` inside a key or value is kept.
/// Lines after the declared entries are ignored.
pub fn decode(text: &str) -> Result<Vec<(String, String)>> {
    let mut lines = text.split_terminator('\n');

    let header = lines
        .next()
        .ok_or_else(|| StoreError::MalformedSnapshot("missing entry count".to_string()))?;
    let count: usize = header.trim().parse().map_err(|_| {
        StoreError::MalformedSnapshot(format!("invalid entry count '{}'", header.trim()))
    })?;

    let mut entries = Vec::with_capacity(count.min(1024));
    for read in 0..count {
        let truncated = || {
            StoreError::MalformedSnapshot(format!(
                "expected {} entries, found only {}",
                count, read
            ))
        };
        let key = lines.next().ok_or_else(truncated)?;
        let value = lines.next().ok_or_else(truncated)?;
        entries.push((key.to_string(), value.to_string()));
    }

    Ok(entries)
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn encode_to_string(entries: &[(&str, &str)]) -> String {
        let mut buf = Vec::new();
        encode(&mut buf, entries.len(), entries.iter().copied()).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_encode_layout() {
        let text = encode_to_string(&[("user1", "John Doe"), ("user2", "Jane Smith")]);
        assert_eq!(text, "2\nuser1\nJohn Doe\nuser2\nJane Smith\n");
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode_to_string(&[]), "0\n");
    }

    #[test]
    fn test_decode_keeps_file_order() {
        let entries = decode("2\nb\n2\na\n1\n").unwrap();
        assert_eq!(
            entries,
            vec![
                ("b".to_string(), "2".to_string()),
                ("a".to_string(), "1".to_string())
            ]
        );
    }

    #[test]
    fn test_decode_empty_values() {
        let text = encode_to_string(&[("empty", ""), ("", "blank key")]);
        let entries = decode(&text).unwrap();
        assert_eq!(entries[0], ("empty".to_string(), String::new()));
        assert_eq!(entries[1], (String::new(), "blank key".to_string()));
    }

    #[test]
    fn test_decode_keeps_carriage_returns() {
        // Only the count line tolerates a trailing \r
        let entries = decode("1\r\nk\r\nv\r\n").unwrap();
        assert_eq!(entries, vec![("k\r".to_string(), "v\r".to_string())]);
    }

    #[test]
    fn test_carriage_return_roundtrip() {
        let text = encode_to_string(&[("key\r", "x"), ("k", "v\r")]);
        let entries = decode(&text).unwrap();
        assert_eq!(
            entries,
            vec![
                ("key\r".to_string(), "x".to_string()),
                ("k".to_string(), "v\r".to_string())
            ]
        );
    }

    #[test]
    fn test_decode_missing_header() {
        assert!(matches!(decode(""), Err(StoreError::MalformedSnapshot(_))));
    }

    #[test]
    fn test_decode_invalid_count() {
        let result = decode("lots\nk\nv\n");
        assert!(matches!(result, Err(StoreError::MalformedSnapshot(msg)) if msg.contains("lots")));
    }

    #[test]
    fn test_decode_truncated() {
        let result = decode("3\na\n1\nb\n");
        assert!(
            matches!(result, Err(StoreError::MalformedSnapshot(msg)) if msg.contains("found only 1"))
        );
    }

    #[test]
    fn test_decode_ignores_trailing_lines() {
        let entries = decode("1\nk\nv\nextra\n").unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_newline_in_value_corrupts_layout() {
        let text = encode_to_string(&[("k", "line1\nline2")]);
        let entries = decode(&text).unwrap();
        assert_eq!(entries, vec![("k".to_string(), "line1".to_string())]);
    }
}
