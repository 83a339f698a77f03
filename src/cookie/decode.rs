//! Percent-decoding of cookie values.

use memchr::{memchr, memchr_iter};
use percent_encoding::percent_decode_str;
use std::borrow::Cow;

/// Turns a raw cookie value into the value handed to the caller.
///
/// The parser calls [`Decoder::decode`] once per retained cookie, after the
/// value has been trimmed. Implementations must not fail: if a value cannot be
/// decoded they return it unchanged.
///
/// Any `Fn(&str, &str) -> String` closure taking `(value, name)` is a decoder:
/// ```rust
/// use crumb::{options::ParseOptions, Cookies, CookieMap};
///
/// let upper = |value: &str, _name: &str| value.to_uppercase();
/// let options = ParseOptions {
///     decoder: &upper,
///     ..ParseOptions::default()
/// };
///
/// let cookies: CookieMap = Cookies::parse("foo=bar", &options).unwrap();
/// assert_eq!(cookies["foo"], "BAR");
/// ```
pub trait Decoder {
    /// Decodes `value`, which belongs to the cookie called `name`.
    fn decode<'v>(&self, value: &'v str, name: &str) -> Cow<'v, str>;
}

/// Default decoder, the inverse of JavaScript's `encodeURIComponent`.
///
/// Values without `%` are returned borrowed. Values with a malformed escape
/// (`%A`, `%zz`) or whose escapes decode to invalid UTF-8 are returned
/// borrowed and untouched, so one bad cookie never hides its neighbours.
///
/// ```rust
/// use crumb::{Decoder, PercentDecoder};
///
/// assert_eq!(PercentDecoder.decode("hello%20there!", "foo"), "hello there!");
/// assert_eq!(PercentDecoder.decode("%A", "foo"), "%A");
/// assert_eq!(PercentDecoder.decode("%FF", "foo"), "%FF");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PercentDecoder;

impl Decoder for PercentDecoder {
    #[inline]
    fn decode<'v>(&self, value: &'v str, _name: &str) -> Cow<'v, str> {
        decode(value)
    }
}

/// Pass-through decoder/encoder: hands values over exactly as written.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Verbatim;

impl Decoder for Verbatim {
    #[inline(always)]
    fn decode<'v>(&self, value: &'v str, _name: &str) -> Cow<'v, str> {
        Cow::Borrowed(value)
    }
}

impl<F> Decoder for F
where
    F: Fn(&str, &str) -> String,
{
    #[inline]
    fn decode<'v>(&self, value: &'v str, name: &str) -> Cow<'v, str> {
        Cow::Owned(self(value, name))
    }
}

/// Percent-decodes `value`, falling back to the raw value on failure.
///
/// This is what [`PercentDecoder`] does for every cookie.
pub fn decode(value: &str) -> Cow<'_, str> {
    let bytes = value.as_bytes();

    // Fast path
    if memchr(b'%', bytes).is_none() {
        return Cow::Borrowed(value);
    }

    if !escapes_are_well_formed(bytes) {
        log::trace!("keeping cookie value with malformed percent escape undecoded");
        return Cow::Borrowed(value);
    }

    match percent_decode_str(value).decode_utf8() {
        Ok(decoded) => decoded,
        Err(_) => {
            log::trace!("keeping cookie value that decodes to invalid UTF-8 undecoded");
            Cow::Borrowed(value)
        }
    }
}

// `percent-encoding` passes malformed escapes through as literal text,
// `decodeURIComponent` rejects them. Cookies follow the latter.
#[inline]
fn escapes_are_well_formed(bytes: &[u8]) -> bool {
    memchr_iter(b'%', bytes).all(|pos| {
        matches!(
            (bytes.get(pos + 1), bytes.get(pos + 2)),
            (Some(hi), Some(lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit()
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_percent_is_borrowed() {
        assert!(matches!(decode("plain-value"), Cow::Borrowed("plain-value")));
        assert!(matches!(decode(""), Cow::Borrowed("")));
    }

    #[test]
    fn decodes_escapes() {
        let cases = [
            ("%20%40%23%24%25%5E%26%3A%22%2f", " @#$%^&:\"/"),
            ("hello%20there!", "hello there!"),
            ("E%3Dmc%5E2", "E=mc^2"),
            ("%E2%82%AC", "\u{20ac}"),
            ("a+b", "a+b"),
        ];

        for (raw, expected) in cases {
            assert_eq!(decode(raw), expected, "decoding {:?}", raw);
        }
    }

    #[test]
    fn malformed_escape_falls_back() {
        for raw in ["%A", "%", "%1", "abc%", "%zz", "ok%20then%G0", "%%20"] {
            assert_eq!(decode(raw), raw, "decoding {:?}", raw);
        }
    }

    #[test]
    fn invalid_utf8_falls_back() {
        for raw in ["%FF", "%C3", "%ED%A0%80", "x%80y"] {
            assert_eq!(decode(raw), raw, "decoding {:?}", raw);
        }
    }

    #[test]
    fn strategies() {
        assert_eq!(PercentDecoder.decode("a%20b", "k"), "a b");
        assert_eq!(Verbatim.decode("a%20b", "k"), "a%20b");

        let tagged = |value: &str, name: &str| format!("{name}:{value}");
        assert_eq!(tagged.decode("v", "k"), "k:v");
    }
}
