//! URI normalization for generated ids and fragment hrefs.
//!
//! Values here end up inside `id="…"` and `href="#…"` attributes, so they go
//! through two steps: percent-encoding of characters unsafe in a URL
//! ([`normalize_uri`]), then HTML attribute encoding ([`sanitize_uri`]).

use std::fmt::Write;

use crate::common::encode::encode;

/// Percent-encode characters that are unsafe in a URL.
///
/// ASCII alphanumerics and `!#$&'()*+,-./:;=?@_~` pass through. A `%`
/// followed by two ASCII alphanumerics is assumed to already be a percent
/// escape and is kept as-is. Everything else is encoded byte-wise with
/// uppercase hex.
///
/// ```
/// use mdhtml::common::uri::normalize_uri;
///
/// assert_eq!(normalize_uri("a b"), "a%20b");
/// assert_eq!(normalize_uri("a\\]b"), "a%5C%5Db");
/// assert_eq!(normalize_uri("%5e"), "%5e");
/// ```
pub fn normalize_uri(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let bytes = value.as_bytes();

    for (index, ch) in value.char_indices() {
        if ch.is_ascii() {
            let keep = match ch {
                'a'..='z' | 'A'..='Z' | '0'..='9' => true,
                '!' | '#' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | '-' | '.' | '/'
                | ':' | ';' | '=' | '?' | '@' | '_' | '~' => true,
                // a correct-looking percent escape stays untouched
                '%' => {
                    index + 2 < bytes.len()
                        && bytes[index + 1].is_ascii_alphanumeric()
                        && bytes[index + 2].is_ascii_alphanumeric()
                }
                _ => false,
            };
            if keep {
                result.push(ch);
            } else {
                let _ = write!(result, "%{:02X}", ch as u32);
            }
        } else {
            let mut buf = [0u8; 4];
            for byte in ch.encode_utf8(&mut buf).as_bytes() {
                let _ = write!(result, "%{:02X}", byte);
            }
        }
    }

    result
}

/// Normalize a value for use in an id or fragment href attribute: percent
/// encoding first, then HTML attribute encoding of the remainder.
///
/// ```
/// use mdhtml::common::uri::sanitize_uri;
///
/// assert_eq!(sanitize_uri("a&copy;b"), "a&amp;copy;b");
/// ```
pub fn sanitize_uri(value: &str) -> String {
    encode(&normalize_uri(value)).into_owned()
}
