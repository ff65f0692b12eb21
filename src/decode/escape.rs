//! Escape-sequence decoding for string spans.
//!
//! The unescaped length is computed first (raw length minus one byte per
//! escape introducer) so the destination buffer is allocated exactly once.

use memchr::memchr;

use crate::error::{Error, Result};

/// Decode a raw string span. `offset` is the span's byte position in the
/// whole input, used for error locations.
pub(crate) fn unescape(raw: &str, offset: usize) -> Result<String> {
    let mut out = String::with_capacity(unescaped_len(raw));
    let bytes = raw.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\\' {
            let Some(&code) = bytes.get(i + 1) else {
                return Err(Error::syntax(offset + i, "dangling escape at end of string"));
            };
            let decoded = match code {
                b'"' => '"',
                b'\\' => '\\',
                b'/' => '/',
                b'n' => '\n',
                b'r' => '\r',
                b't' => '\t',
                b'b' => '\u{0008}',
                b'f' => '\u{000C}',
                _ => {
                    return Err(Error::syntax(
                        offset + i,
                        format!("unrecognized escape sequence \\{}", code as char),
                    ));
                }
            };
            out.push(decoded);
            i += 2;
        } else {
            // Copy the run up to the next escape in one go.
            let end = memchr(b'\\', &bytes[i..]).map_or(bytes.len(), |j| i + j);
            out.push_str(&raw[i..end]);
            i = end;
        }
    }

    Ok(out)
}

fn unescaped_len(raw: &str) -> usize {
    let bytes = raw.as_bytes();
    let mut escapes = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            escapes += 1;
            i += 2;
        } else {
            i += 1;
        }
    }
    raw.len() - escapes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case("plain", "plain")]
    #[case(r#"say \"hi\""#, "say \"hi\"")]
    #[case(r"a\\b", "a\\b")]
    #[case(r"a\/b", "a/b")]
    #[case(r"line\nbreak", "line\nbreak")]
    #[case(r"\r\t\b\f", "\r\t\u{0008}\u{000C}")]
    #[case("", "")]
    fn test_unescape(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(unescape(raw, 0).unwrap(), expected);
    }

    #[rstest::rstest]
    fn test_unescaped_len_matches_output() {
        let raw = r"a\nb\tc";
        let out = unescape(raw, 0).unwrap();
        assert_eq!(out.len(), unescaped_len(raw));
        assert_eq!(out, "a\nb\tc");
    }

    #[rstest::rstest]
    fn test_unrecognized_escape() {
        let err = unescape(r"bad\x", 10).unwrap_err();
        assert!(err.to_string().contains("unrecognized escape sequence \\x"));
        assert!(matches!(err, Error::Syntax { offset: 13, .. }));
    }

    #[rstest::rstest]
    fn test_dangling_escape() {
        let err = unescape("tail\\", 0).unwrap_err();
        assert!(err.to_string().contains("dangling escape"));
    }
}
