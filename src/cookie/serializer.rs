//! `Set-Cookie` header serializer.

use crate::{cookie::decode::Verbatim, errors::Error, options::SerializeOptions};
use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::{borrow::Cow, fmt, str::FromStr};

// FIELD CONTENT

// HTAB, visible ASCII, SP and obs-text
const fn field_content_table() -> [bool; 256] {
    let mut table = [false; 256];
    let mut byte = 0;
    while byte < 256 {
        table[byte] = byte == 0x09 || (byte >= 0x20 && byte <= 0x7E) || byte >= 0x80;
        byte += 1;
    }
    table
}

const FIELD_CONTENT: [bool; 256] = field_content_table();

/// Non-empty and made only of `\t`, `U+0020..=U+007E` and `U+0080..=U+00FF`.
#[inline]
pub(crate) fn is_field_content(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| (c as u32) < 256 && FIELD_CONTENT[c as usize])
}

#[inline(always)]
fn check_field(value: &str, field: &'static str) -> Result<(), Error> {
    match is_field_content(value) {
        true => Ok(()),
        false => Err(Error::InvalidFieldContent(field)),
    }
}

// ENCODER

/// Characters `encodeURIComponent` escapes: everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Turns a cookie value into the text written after `name=`.
///
/// Any `Fn(&str) -> String` closure is an encoder.
pub trait Encoder {
    /// Encodes `value` for a `Set-Cookie` header.
    fn encode<'v>(&self, value: &'v str) -> Cow<'v, str>;
}

/// Default encoder, equivalent to JavaScript's `encodeURIComponent`.
///
/// ```rust
/// use crumb::{Encoder, PercentEncoder};
///
/// assert_eq!(PercentEncoder.encode("bar+buzz"), "bar%2Bbuzz");
/// assert_eq!(PercentEncoder.encode("it's (ok)!"), "it's%20(ok)!");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PercentEncoder;

impl Encoder for PercentEncoder {
    #[inline]
    fn encode<'v>(&self, value: &'v str) -> Cow<'v, str> {
        utf8_percent_encode(value, COMPONENT).into()
    }
}

impl Encoder for Verbatim {
    #[inline(always)]
    fn encode<'v>(&self, value: &'v str) -> Cow<'v, str> {
        Cow::Borrowed(value)
    }
}

impl<F> Encoder for F
where
    F: Fn(&str) -> String,
{
    #[inline]
    fn encode<'v>(&self, value: &'v str) -> Cow<'v, str> {
        Cow::Owned(self(value))
    }
}

// SAME SITE

/// `SameSite` attribute values
///
/// # References
///
/// - [RFC 6265bis, Section 5.4.7](https://datatracker.ietf.org/doc/html/draft-ietf-httpbis-rfc6265bis#section-5.4.7)
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SameSite {
    /// Sent only with same-site requests
    Strict,
    /// Also sent with top-level cross-site navigations
    Lax,
    /// Sent with all requests; browsers require `Secure` alongside
    None,
}

impl SameSite {
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SameSite {
    type Err = Error;

    /// Case-sensitive: only `Strict`, `Lax` and `None` are accepted.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Strict" => Ok(SameSite::Strict),
            "Lax" => Ok(SameSite::Lax),
            "None" => Ok(SameSite::None),
            _ => Err(Error::InvalidSameSite),
        }
    }
}

// EXPIRES

/// Ways to give the `Expires` attribute.
///
/// Every form is normalized to an RFC 3339 UTC timestamp with milliseconds.
/// Dates outside the `chrono` range (about ±262 000 years) are rejected,
/// which keeps every accepted date inside the ECMAScript `Date` range of
/// ±8.64e15 ms.
///
/// ```rust
/// use crumb::Expires;
///
/// let at = Expires::Millis(1_704_164_645_000);
/// assert_eq!(at.to_timestamp().unwrap(), "2024-01-02T03:04:05.000Z");
///
/// let at = Expires::Text("Tue, 02 Jan 2024 03:04:05 GMT");
/// assert_eq!(at.to_timestamp().unwrap(), "2024-01-02T03:04:05.000Z");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expires<'a> {
    /// A point in time
    At(DateTime<Utc>),
    /// Milliseconds since the Unix epoch
    Millis(i64),
    /// An RFC 3339 or RFC 2822 date, or a bare `YYYY-MM-DD` read as
    /// midnight UTC
    Text(&'a str),
}

impl Expires<'_> {
    /// Resolves to a UTC date.
    ///
    /// # Errors
    /// [Error::InvalidExpires] if the text is not a date or the
    /// milliseconds are out of range.
    pub fn to_datetime(&self) -> Result<DateTime<Utc>, Error> {
        match self {
            Expires::At(at) => Ok(*at),
            Expires::Millis(millis) => Utc
                .timestamp_millis_opt(*millis)
                .single()
                .ok_or(Error::InvalidExpires),
            Expires::Text(text) => parse_date(text).ok_or(Error::InvalidExpires),
        }
    }

    /// Formats as written in the header, e.g. `2024-01-02T03:04:05.000Z`.
    ///
    /// # Errors
    /// Same as [Expires::to_datetime].
    #[inline]
    pub fn to_timestamp(&self) -> Result<String, Error> {
        Ok(self
            .to_datetime()?
            .to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(text).or_else(|_| DateTime::parse_from_rfc2822(text));
    if let Ok(at) = parsed {
        return Some(at.with_timezone(&Utc));
    }

    // Date-only form is midnight UTC
    let day = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&day.and_hms_opt(0, 0, 0)?))
}

impl From<DateTime<Utc>> for Expires<'_> {
    #[inline]
    fn from(at: DateTime<Utc>) -> Self {
        Expires::At(at)
    }
}

// SERIALIZE

/// Builds a `Set-Cookie` header value.
///
/// The value is encoded with [SerializeOptions::encoder] first, then the
/// whole record is validated in one pass; nothing is returned unless every
/// attribute is valid.
///
/// # Examples
/// ```rust
/// use crumb::{options::SerializeOptions, serialize, Error, Expires, SameSite};
///
/// assert_eq!(serialize("foo", "bar", &SerializeOptions::default()).unwrap(), "foo=bar");
///
/// let options = SerializeOptions {
///     domain: Some("example.com"),
///     path: Some("/"),
///     expires: Some(Expires::Millis(0)),
///     max_age: Some(3600.5),
///     secure: true,
///     http_only: true,
///     same_site: Some(SameSite::Strict),
///     ..SerializeOptions::default()
/// };
///
/// assert_eq!(
///     serialize("id", "a b", &options).unwrap(),
///     "id=a%20b; Domain=example.com; Expires=1970-01-01T00:00:00.000Z; \
///      HttpOnly; Max-Age=3600; Path=/; SameSite=Strict; Secure"
/// );
///
/// assert_eq!(
///     serialize("foo\n", "bar", &SerializeOptions::default()),
///     Err(Error::InvalidFieldContent("name"))
/// );
/// ```
///
/// # Errors
/// - [Error::InvalidFieldContent] for a bad name, encoded value, domain or path
/// - [Error::InvalidMaxAge] if `max_age` is not finite
/// - [Error::InvalidExpires] if `expires` is not a date
pub fn serialize(name: &str, value: &str, options: &SerializeOptions<'_>) -> Result<String, Error> {
    check_field(name, "name")?;

    let value = options.encoder.encode(value);
    if !value.is_empty() {
        check_field(&value, "value")?;
    }

    let domain = options.domain.filter(|domain| !domain.is_empty());
    if let Some(domain) = domain {
        check_field(domain, "domain")?;
    }

    let path = options.path.filter(|path| !path.is_empty());
    if let Some(path) = path {
        check_field(path, "path")?;
    }

    let expires = match &options.expires {
        Some(expires) => Some(expires.to_timestamp()?),
        None => None,
    };

    let max_age = match options.max_age {
        Some(max_age) if !max_age.is_finite() => return Err(Error::InvalidMaxAge),
        Some(max_age) => Some(max_age.floor() as i64),
        None => None,
    };

    let mut header = String::with_capacity(name.len() + value.len() + 1);
    header.push_str(name);
    header.push('=');
    header.push_str(&value);

    if let Some(domain) = domain {
        push_attr(&mut header, "Domain", Some(domain));
    }
    if let Some(expires) = &expires {
        push_attr(&mut header, "Expires", Some(expires));
    }
    if options.http_only {
        push_attr(&mut header, "HttpOnly", None);
    }
    if let Some(max_age) = max_age {
        push_attr(&mut header, "Max-Age", Some(&max_age.to_string()));
    }
    if let Some(path) = path {
        push_attr(&mut header, "Path", Some(path));
    }
    if let Some(same_site) = options.same_site {
        push_attr(&mut header, "SameSite", Some(same_site.as_str()));
    }
    if options.secure {
        push_attr(&mut header, "Secure", None);
    }

    Ok(header)
}

#[inline(always)]
fn push_attr(header: &mut String, name: &str, value: Option<&str>) {
    header.push_str("; ");
    header.push_str(name);
    if let Some(value) = value {
        header.push('=');
        header.push_str(value);
    }
}
