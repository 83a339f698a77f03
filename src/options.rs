//! Parser and serializer configuration
//!
//! Both records are plain structs with defaults. Override only what you
//! need and take the rest from [Default]. Decoders, encoders and verifiers
//! are held as `Sync` references, so a configured record can be shared
//! between threads or kept across an `.await`:
//!
//! ```rust
//! use crumb::{
//!     options::{ParseOptions, SerializeOptions},
//!     Cookies, CookieMap, SameSite, Signer, Verbatim,
//! };
//!
//! let signer = Signer::new("secretKey");
//!
//! // Values arrive signed and are not percent-decoded
//! let parse = ParseOptions {
//!     decoder: &Verbatim,
//!     verifier: Some(&signer),
//!     ..ParseOptions::default()
//! };
//!
//! let header = format!("session={}", signer.sign("abc"));
//! let cookies: CookieMap = Cookies::parse(&header, &parse).unwrap();
//! assert_eq!(cookies["session"], "abc");
//!
//! let attributes = SerializeOptions {
//!     path: Some("/"),
//!     http_only: true,
//!     same_site: Some(SameSite::Lax),
//!     ..SerializeOptions::default()
//! };
//!
//! assert_eq!(
//!     crumb::serialize("session", "abc", &attributes).unwrap(),
//!     "session=abc; HttpOnly; Path=/; SameSite=Lax"
//! );
//! ```

use crate::{
    cookie::{
        decode::{Decoder, PercentDecoder},
        serializer::{Encoder, Expires, PercentEncoder, SameSite},
    },
    signer::Verifier,
};
use std::fmt;

/// Controls how [Cookies::parse](crate::Cookies::parse) turns raw values
/// into collected values.
///
/// For every cookie that is kept (the first occurrence of each name), the
/// trimmed raw value goes through [decoder](Self::decoder) and then, if set,
/// through [verifier](Self::verifier):
/// ```text
/// raw value --> decoder.decode(value, name) --> verifier.unsign(value) --> collector
/// ```
#[derive(Clone, Copy)]
pub struct ParseOptions<'o> {
    /// Value decoder (default: [PercentDecoder])
    ///
    /// Use [Verbatim](crate::Verbatim) to keep values as written, or pass a
    /// closure `Fn(&str, &str) -> String` receiving `(value, name)`.
    pub decoder: &'o (dyn Decoder + Sync),

    /// Signature check applied after decoding (default: `None`)
    ///
    /// When set, a single value that fails verification fails the whole
    /// parse with [MalformedSignature](crate::Error::MalformedSignature).
    pub verifier: Option<&'o (dyn Verifier + Sync)>,

    #[doc(hidden)]
    #[allow(dead_code)]
    pub _priv: (),
}

impl Default for ParseOptions<'_> {
    fn default() -> Self {
        Self {
            decoder: &PercentDecoder,
            verifier: None,

            _priv: (),
        }
    }
}

impl fmt::Debug for ParseOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseOptions")
            .field("verifier", &self.verifier.is_some())
            .finish_non_exhaustive()
    }
}

/// `Set-Cookie` attributes for [serialize](crate::serialize).
///
/// The record is validated as a whole when it is serialized; nothing is
/// checked while it is being built. Attributes are written in this order:
/// ```text
/// name=value; Domain=..; Expires=..; HttpOnly; Max-Age=..; Path=..; SameSite=..; Secure
/// ```
#[derive(Clone)]
pub struct SerializeOptions<'o> {
    /// `Domain` attribute (default: `None`)
    ///
    /// Must be RFC 7230 field content. An empty string is treated as absent.
    pub domain: Option<&'o str>,
    /// `Path` attribute (default: `None`)
    ///
    /// Must be RFC 7230 field content. An empty string is treated as absent.
    pub path: Option<&'o str>,
    /// `Expires` attribute (default: `None`)
    ///
    /// Written as an RFC 3339 UTC timestamp with milliseconds,
    /// e.g. `2024-01-02T03:04:05.000Z`.
    pub expires: Option<Expires<'o>>,
    /// `Max-Age` attribute in seconds (default: `None`)
    ///
    /// Must be finite; fractional values are floored.
    pub max_age: Option<f64>,
    /// `Secure` flag (default: `false`)
    pub secure: bool,
    /// `HttpOnly` flag (default: `false`)
    pub http_only: bool,
    /// `SameSite` attribute (default: `None`)
    pub same_site: Option<SameSite>,

    /// Value encoder (default: [PercentEncoder])
    ///
    /// The encoded value must be RFC 7230 field content.
    pub encoder: &'o (dyn Encoder + Sync),

    #[doc(hidden)]
    #[allow(dead_code)]
    pub _priv: (),
}

impl Default for SerializeOptions<'_> {
    fn default() -> Self {
        Self {
            domain: None,
            path: None,
            expires: None,
            max_age: None,
            secure: false,
            http_only: false,
            same_site: None,

            encoder: &PercentEncoder,

            _priv: (),
        }
    }
}

impl fmt::Debug for SerializeOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerializeOptions")
            .field("domain", &self.domain)
            .field("path", &self.path)
            .field("expires", &self.expires)
            .field("max_age", &self.max_age)
            .field("secure", &self.secure)
            .field("http_only", &self.http_only)
            .field("same_site", &self.same_site)
            .finish_non_exhaustive()
    }
}
