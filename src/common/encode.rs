//! Minimal HTML encoding for text content and double-quoted attributes.
//!
//! Only `&`, `<`, `>`, and `"` are replaced. The output contract downstream
//! is byte-exact, so this deliberately encodes nothing else (general-purpose
//! escaping crates also rewrite `'` and more, which would change golden
//! output).

use std::borrow::Cow;

/// Encode the four characters that are unsafe in HTML text content and
/// double-quoted attribute values.
///
/// ```
/// use mdhtml::common::encode::encode;
///
/// assert_eq!(encode("a&b"), "a&amp;b");
/// assert_eq!(encode("plain"), "plain");
/// ```
pub fn encode(value: &str) -> Cow<'_, str> {
    let Some(first) = value.find(['&', '<', '>', '"']) else {
        return Cow::Borrowed(value);
    };

    let mut result = String::with_capacity(value.len() + 8);
    result.push_str(&value[..first]);
    for ch in value[first..].chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(ch),
        }
    }
    Cow::Owned(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borrows_when_clean() {
        assert!(matches!(encode("nothing to do"), Cow::Borrowed(_)));
    }

    #[test]
    fn encodes_all_four() {
        assert_eq!(encode(r#"<a href="x">&"#), "&lt;a href=&quot;x&quot;&gt;&amp;");
    }

    #[test]
    fn leaves_apostrophes_alone() {
        assert_eq!(encode("don't"), "don't");
    }
}
