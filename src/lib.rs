//! crumb - tolerant `Cookie` parser, `Set-Cookie` serializer and HMAC cookie signer
//!
//! Reads a request's `Cookie` header into name/value pairs, writes
//! `Set-Cookie` header values from a validated attribute record, and detects
//! cookie values that were altered by the client.
//!
//! # Features
//!
//! - **Tolerant parsing** - loose spacing, bare flags, duplicates and broken
//!   escapes are handled the way browsers and long-lived servers expect
//! - **Zero-copy where possible** - names always, values unless they needed
//!   decoding, borrow from the header
//! - **First-wins duplicates** - a repeated name keeps its first value
//! - **Signed values** - `value.hexdigest` with HMAC-SHA256 and a
//!   constant-time check
//! - **Pluggable strategies** - custom [decoders](Decoder),
//!   [encoders](Encoder) and [verifiers](Verifier)
//!
//! # Examples
//!
//! Quick start:
//! ```rust
//! let cookies = crumb::parse("theme=dark; lang=en%2DGB; theme=light").unwrap();
//!
//! assert_eq!(cookies["theme"], "dark");
//! assert_eq!(cookies["lang"], "en-GB");
//! ```
//! Signed session cookie round trip:
//! ```rust
//! use crumb::{
//!     options::{ParseOptions, SerializeOptions},
//!     serialize, Cookies, CookieMap, SameSite,
//! };
//!
//! let signer = crumb::create_signer("change me");
//!
//! // Response: Set-Cookie
//! let attributes = SerializeOptions {
//!     path: Some("/"),
//!     http_only: true,
//!     same_site: Some(SameSite::Strict),
//!     ..SerializeOptions::default()
//! };
//! let set_cookie = serialize("sid", &signer.sign("user-42"), &attributes).unwrap();
//! assert!(set_cookie.starts_with("sid=user-42."));
//!
//! // Next request: Cookie
//! let header = set_cookie.split("; ").next().unwrap();
//! let options = ParseOptions {
//!     verifier: Some(&signer),
//!     ..ParseOptions::default()
//! };
//! let cookies: CookieMap = Cookies::parse(header, &options).unwrap();
//! assert_eq!(cookies["sid"], "user-42");
//!
//! // Tampered cookie
//! let forged = header.replace("user-42", "user-1");
//! assert!(Cookies::parse::<CookieMap, _>(&forged, &options).is_err());
//! ```
//!
//! # Security
//!
//! Signing gives integrity, not secrecy: the value stays readable by the
//! client. See [signer] for the exact format and splitting rule.

pub(crate) mod cookie {
    pub(crate) mod decode;
    pub(crate) mod parser;
    pub(crate) mod serializer;
}
pub(crate) mod errors;
pub mod options;
pub mod signer;

pub use crate::{
    cookie::{
        decode::{decode, Decoder, PercentDecoder, Verbatim},
        parser::{parse, CookieCollector, CookieMap, Cookies},
        serializer::{serialize, Encoder, Expires, PercentEncoder, SameSite},
    },
    errors::Error,
    signer::{create_signer, Signer, Verifier},
};
