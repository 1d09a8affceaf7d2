//! Byte decoding for HTML input.

use std::borrow::Cow;

use memchr::memmem;

/// How far into the document to look for a `<meta charset>` declaration.
const SNIFF_LIMIT: usize = 1024;

/// Decode HTML bytes to a string.
///
/// 1. UTF-8 (a BOM is honoured by encoding_rs)
/// 2. the label declared by a `<meta charset>` in the first kilobyte
/// 3. Windows-1252
///
/// ```
/// use marksift::util::decode_html;
///
/// assert_eq!(decode_html(b"<p>caf\xc3\xa9</p>"), "<p>café</p>");
/// assert_eq!(decode_html(b"<p>caf\xe9</p>"), "<p>café</p>");
/// ```
pub fn decode_html(bytes: &[u8]) -> Cow<'_, str> {
    decode_text(bytes, sniff_meta_charset(bytes))
}

/// Decode bytes, trying UTF-8, then `hint_encoding`, then Windows-1252.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        log::debug!("decoding input as {}", encoding.name());
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Find the encoding label of a `<meta charset=...>` or
/// `<meta http-equiv content="...; charset=...">` near the top of the page.
pub fn sniff_meta_charset(bytes: &[u8]) -> Option<&str> {
    let head = &bytes[..bytes.len().min(SNIFF_LIMIT)];
    let lower = head.to_ascii_lowercase();
    let pos = memmem::find(&lower, b"charset=")? + b"charset=".len();

    let rest = &head[pos..];
    let rest = rest.strip_prefix(b"\"").or_else(|| rest.strip_prefix(b"'")).unwrap_or(rest);
    let end = rest
        .iter()
        .position(|&b| matches!(b, b'"' | b'\'' | b';' | b'>' | b'/') || b.is_ascii_whitespace())
        .unwrap_or(rest.len());

    let label = std::str::from_utf8(&rest[..end]).ok()?;
    (!label.is_empty()).then_some(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_passthrough_borrows() {
        let decoded = decode_html("<p>héllo</p>".as_bytes());
        assert!(matches!(decoded, Cow::Borrowed(_)));
        assert_eq!(decoded, "<p>héllo</p>");
    }

    #[test]
    fn test_sniff_meta_charset() {
        assert_eq!(sniff_meta_charset(br#"<meta charset="Shift_JIS">"#), Some("Shift_JIS"));
        assert_eq!(sniff_meta_charset(b"<meta charset=koi8-r>"), Some("koi8-r"));
        assert_eq!(
            sniff_meta_charset(
                br#"<meta http-equiv="Content-Type" content="text/html; charset=iso-8859-2">"#
            ),
            Some("iso-8859-2")
        );
        assert_eq!(sniff_meta_charset(b"<p>no declaration</p>"), None);
    }

    #[test]
    fn test_declared_charset_used_for_invalid_utf8() {
        let bytes = b"<meta charset=koi8-r><p>\xf6\xc1</p>";
        let decoded = decode_html(bytes);
        assert!(decoded.contains("<p>"));
        assert!(!decoded.contains('\u{fffd}'));
    }

    #[test]
    fn test_fallback_windows_1252() {
        assert_eq!(decode_text(b"caf\xe9", None), "café");
        assert_eq!(decode_text(b"caf\xe9", Some("no-such-label")), "café");
    }
}
