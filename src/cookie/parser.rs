//! `Cookie` request header parser.

use crate::{errors::Error, options::ParseOptions, signer::Verifier};
use memchr::{memchr, memchr_iter};
use std::{borrow::Cow, collections::HashMap};

/// Cookies keyed by name. Names and undecoded values borrow from the header.
pub type CookieMap<'a> = HashMap<&'a str, Cow<'a, str>>;

/// Tolerant `Cookie` header parser.
///
/// The header is scanned once, left to right, for `name=value` pairs
/// separated by `;`. The scan follows long-standing browser behaviour
/// rather than the strict RFC 6265 grammar:
///
/// - Spaces before a name are skipped, whitespace before `=` is trimmed,
///   and the value is trimmed on both sides; trimming follows ECMAScript
///   `trim` (U+FEFF is whitespace, U+0085 is not)
/// - A segment without `=` before the next `;` (`flag`, `   `) is dropped
/// - Trailing text without any `=` is dropped
/// - When a name repeats, **the first value wins**
/// - Values are percent-decoded; a value that fails to decode is kept as
///   written
///
/// # Examples
/// ```rust
/// use crumb::{Cookies, CookieMap, options::ParseOptions};
///
/// let header = "  foo  =  bar ; flag; empty=; foo=ignored; msg=hello%20there!";
/// let cookies: CookieMap = Cookies::parse(header, &ParseOptions::default()).unwrap();
///
/// assert_eq!(cookies.len(), 3);
/// assert_eq!(cookies["foo"], "bar");
/// assert_eq!(cookies["empty"], "");
/// assert_eq!(cookies["msg"], "hello there!");
/// ```
/// Keep header order with a `Vec`:
/// ```rust
/// use crumb::{Cookies, options::ParseOptions};
/// use std::borrow::Cow;
///
/// let cookies: Vec<(&str, Cow<str>)> =
///     Cookies::parse("b=2; a=1; b=3", &ParseOptions::default()).unwrap();
///
/// assert_eq!(cookies, [("b", Cow::from("2")), ("a", Cow::from("1"))]);
/// ```
pub struct Cookies;

impl Cookies {
    /// Parses a `Cookie` header into a new collection.
    ///
    /// # Arguments
    /// - `input`: Raw header value; anything byte-like, checked to be UTF-8
    /// - `options`: Decoding and signature settings, see [ParseOptions]
    ///
    /// # Errors
    /// - [Error::InputType] if `input` is not UTF-8
    /// - [Error::MalformedSignature] if a verifier is set and any kept value
    ///   fails verification; no collection is returned in that case
    #[inline]
    pub fn parse<'a, C, I>(input: &'a I, options: &ParseOptions<'_>) -> Result<C, Error>
    where
        C: CookieCollector<'a>,
        I: AsRef<[u8]> + ?Sized,
    {
        let input = as_text(input.as_ref())?;

        let mut result = C::with_capacity(memchr_iter(b'=', input.as_bytes()).count());
        Self::scan(&mut result, input, options, |_| false)?;
        Ok(result)
    }

    /// Parses a `Cookie` header into an existing collection.
    ///
    /// Names already present in `result` are treated as seen, so earlier
    /// entries take precedence over the new header.
    ///
    /// ```rust
    /// use crumb::{Cookies, CookieMap, options::ParseOptions};
    ///
    /// let options = ParseOptions::default();
    /// let mut cookies = CookieMap::new();
    ///
    /// Cookies::parse_into(&mut cookies, "a=1; b=2", &options).unwrap();
    /// Cookies::parse_into(&mut cookies, "b=3; c=4", &options).unwrap();
    ///
    /// assert_eq!(cookies.len(), 3);
    /// assert_eq!(cookies["b"], "2");
    /// ```
    ///
    /// # Errors
    /// Same as [Cookies::parse]. When a verifier is set, cookies are staged
    /// and only added to `result` once the whole header verified, so a
    /// failed parse leaves `result` untouched.
    pub fn parse_into<'a, C, I>(
        result: &mut C,
        input: &'a I,
        options: &ParseOptions<'_>,
    ) -> Result<(), Error>
    where
        C: CookieCollector<'a>,
        I: AsRef<[u8]> + ?Sized,
    {
        let input = as_text(input.as_ref())?;
        if options.verifier.is_none() {
            return Self::scan(result, input, options, |_| false);
        }

        let mut staged: Vec<(&'a str, Cow<'a, str>)> = Vec::new();
        Self::scan(&mut staged, input, options, |name| result.contains_cookie(name))?;

        for (name, value) in staged {
            result.add_cookie(name, value);
        }
        Ok(())
    }

    // `seen` reports names collected outside `result`
    fn scan<'a, C: CookieCollector<'a>>(
        result: &mut C,
        input: &'a str,
        options: &ParseOptions<'_>,
        seen: impl Fn(&str) -> bool,
    ) -> Result<(), Error> {
        let data = input.as_bytes();

        let mut cursor = 0;
        while cursor < data.len() {
            // Leading spaces, one per pass
            if data[cursor] == b' ' {
                cursor += 1;
                continue;
            }

            // No `name=value` left
            let Some(equals) = memchr(b'=', &data[cursor..]).map(|pos| cursor + pos) else {
                break;
            };

            let separator = memchr(b';', &data[cursor..])
                .map(|pos| cursor + pos)
                .unwrap_or(data.len());

            // `=` belongs to a later segment
            if equals > separator {
                cursor = separator + 1;
                continue;
            }

            // Both delimiters are ASCII, so the slices stay on char boundaries
            let name = input[cursor..equals].trim_end_matches(is_space);
            if !seen(name) && !result.contains_cookie(name) {
                let raw = input[equals + 1..separator].trim_matches(is_space);
                let value = options.decoder.decode(raw, name);

                let value = match options.verifier {
                    Some(verifier) => unsign(verifier, value)?,
                    None => value,
                };

                result.add_cookie(name, value);
            }

            cursor = separator + 1;
        }

        Ok(())
    }
}

/// Parses a `Cookie` header with the default [ParseOptions].
///
/// ```rust
/// let cookies = crumb::parse("foo=bar; baz=%20qux").unwrap();
///
/// assert_eq!(cookies["foo"], "bar");
/// assert_eq!(cookies["baz"], " qux");
/// assert!(crumb::parse(b"foo=\xff".as_slice()).is_err());
/// ```
///
/// # Errors
/// [Error::InputType] if `input` is not UTF-8.
#[inline]
pub fn parse<I: AsRef<[u8]> + ?Sized>(input: &I) -> Result<CookieMap<'_>, Error> {
    Cookies::parse(input, &ParseOptions::default())
}

#[inline(always)]
fn as_text(bytes: &[u8]) -> Result<&str, Error> {
    simdutf8::basic::from_utf8(bytes).map_err(|_| Error::InputType)
}

/// Whitespace as ECMAScript `trim` sees it: Unicode `White_Space` without
/// U+0085, plus U+FEFF.
#[inline]
fn is_space(c: char) -> bool {
    match c {
        '\u{85}' => false,
        '\u{feff}' => true,
        c => c.is_whitespace(),
    }
}

#[inline]
fn unsign<'a>(verifier: &dyn Verifier, value: Cow<'a, str>) -> Result<Cow<'a, str>, Error> {
    match value {
        Cow::Borrowed(value) => verifier.unsign(value).map(Cow::Borrowed),
        Cow::Owned(value) => verifier.unsign(&value).map(|v| Cow::Owned(v.to_owned())),
    }
}

/// A trait for types that can collect parsed cookies.
///
/// The parser asks [contains_cookie](Self::contains_cookie) before decoding a
/// value and only calls [add_cookie](Self::add_cookie) for names not seen yet,
/// so implementations never have to handle duplicates themselves.
///
/// # Lifetime
/// - `'a`: The lifetime of the header text
///
/// # Examples
/// ```rust
/// use crumb::{Cookies, CookieCollector, options::ParseOptions};
/// use std::borrow::Cow;
///
/// struct Names(Vec<String>);
///
/// impl<'a> CookieCollector<'a> for Names {
///     fn contains_cookie(&self, name: &str) -> bool {
///         self.0.iter().any(|n| n == name)
///     }
///
///     fn add_cookie(&mut self, name: &'a str, _value: Cow<'a, str>) {
///         self.0.push(name.to_owned());
///     }
///
///     fn with_capacity(capacity: usize) -> Self {
///         Names(Vec::with_capacity(capacity))
///     }
/// }
///
/// let names: Names = Cookies::parse("a=1; b=2; a=3", &ParseOptions::default()).unwrap();
/// assert_eq!(names.0, ["a", "b"]);
/// ```
pub trait CookieCollector<'a>
where
    Self: Sized,
{
    /// Returns `true` if a cookie called `name` was already collected.
    fn contains_cookie(&self, name: &str) -> bool;

    /// Adds a cookie. Only called for names not collected yet.
    fn add_cookie(&mut self, name: &'a str, value: Cow<'a, str>);

    /// Creates a new collection with room for about `capacity` cookies.
    fn with_capacity(capacity: usize) -> Self;
}

// Borrowing map, the default
impl<'a> CookieCollector<'a> for HashMap<&'a str, Cow<'a, str>> {
    #[inline(always)]
    fn contains_cookie(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    #[inline(always)]
    fn add_cookie(&mut self, name: &'a str, value: Cow<'a, str>) {
        self.insert(name, value);
    }

    #[inline(always)]
    fn with_capacity(capacity: usize) -> Self {
        HashMap::with_capacity(capacity)
    }
}

// Owned map, detached from the header
impl<'a> CookieCollector<'a> for HashMap<String, String> {
    #[inline(always)]
    fn contains_cookie(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    #[inline(always)]
    fn add_cookie(&mut self, name: &'a str, value: Cow<'a, str>) {
        self.insert(name.to_owned(), value.into_owned());
    }

    #[inline(always)]
    fn with_capacity(capacity: usize) -> Self {
        HashMap::with_capacity(capacity)
    }
}

// Preserves header order; lookups are linear, fine for typical cookie counts
impl<'a> CookieCollector<'a> for Vec<(&'a str, Cow<'a, str>)> {
    #[inline(always)]
    fn contains_cookie(&self, name: &str) -> bool {
        self.iter().any(|(n, _)| *n == name)
    }

    #[inline(always)]
    fn add_cookie(&mut self, name: &'a str, value: Cow<'a, str>) {
        self.push((name, value));
    }

    #[inline(always)]
    fn with_capacity(capacity: usize) -> Self {
        Vec::with_capacity(capacity)
    }
}
