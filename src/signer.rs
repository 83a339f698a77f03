//! HMAC-SHA256 cookie signing.
//!
//! A signed value has the form `value.digest`, where `digest` is the
//! lowercase hex encoding of `HMAC-SHA256(secret, value)`:
//! ```text
//! mificot.91be1aa5bb7b88e639ce5b025cf08592945cc34508aeafb8d01f7ba497490d1b
//! ^^^^^^^ ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^
//!  value                        digest (64 hex chars)
//! ```
//!
//! # Splitting rule
//!
//! [`Signer::unsign`] splits on the **first** `.`. A value that itself
//! contains a `.` can be signed, but its signature never verifies, because
//! everything after the first dot is taken as the digest. Changing the rule
//! would change which already issued cookies verify, so it is kept.

use crate::errors::Error;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

const DELIMITER: char = '.';
const DIGEST_LEN: usize = 32;

/// Checks signed cookie values and strips the signature.
///
/// The parser only needs this half of a signer, see
/// [ParseOptions::verifier](crate::options::ParseOptions::verifier).
pub trait Verifier {
    /// Returns the original value if `signed` carries a valid signature.
    ///
    /// # Errors
    /// [`Error::MalformedSignature`] for anything that does not verify.
    fn unsign<'v>(&self, signed: &'v str) -> Result<&'v str, Error>;
}

/// Signs and verifies cookie values with a secret.
///
/// The secret is borrowed for the signer's lifetime and never copied. A
/// signer has no mutable state, so one instance can be shared between any
/// number of threads.
///
/// # Examples
/// ```rust
/// use crumb::{Error, Signer};
///
/// let signer = Signer::new("secretKey");
///
/// let signed = signer.sign("mificot");
/// assert_eq!(
///     signed,
///     "mificot.91be1aa5bb7b88e639ce5b025cf08592945cc34508aeafb8d01f7ba497490d1b"
/// );
/// assert_eq!(signer.unsign(&signed), Ok("mificot"));
///
/// let other = Signer::new("secretKey123");
/// assert_eq!(other.unsign(&signed), Err(Error::MalformedSignature));
/// ```
#[derive(Clone, Copy)]
pub struct Signer<'k> {
    secret: &'k [u8],
}

/// Creates a [`Signer`] for `secret`.
#[inline]
pub fn create_signer<S: AsRef<[u8]> + ?Sized>(secret: &S) -> Signer<'_> {
    Signer::new(secret)
}

impl<'k> Signer<'k> {
    /// Creates a signer that borrows `secret`.
    #[inline]
    pub fn new<S: AsRef<[u8]> + ?Sized>(secret: &'k S) -> Self {
        Signer {
            secret: secret.as_ref(),
        }
    }

    /// Appends `.` and the hex digest of `value`.
    pub fn sign(&self, value: &str) -> String {
        let digest = self.digest(value);

        let mut signed = String::with_capacity(value.len() + 1 + DIGEST_LEN * 2);
        signed.push_str(value);
        signed.push(DELIMITER);
        signed.push_str(&hex::encode(digest));
        signed
    }

    /// Verifies `signed` and returns the value part.
    ///
    /// The digest is compared in constant time: how long the comparison takes
    /// does not depend on where the first differing byte is.
    ///
    /// # Errors
    /// [`Error::MalformedSignature`] when the delimiter is missing, either
    /// side of it is empty, the digest is not 64 hex characters, or the digest
    /// does not match.
    pub fn unsign<'v>(&self, signed: &'v str) -> Result<&'v str, Error> {
        let (value, digest_hex) = match signed.split_once(DELIMITER) {
            Some((value, digest)) if !value.is_empty() && !digest.is_empty() => (value, digest),
            _ => return Err(reject("missing value, digest or delimiter")),
        };

        let mut claimed = [0u8; DIGEST_LEN];
        if hex::decode_to_slice(digest_hex, &mut claimed).is_err() {
            return Err(reject("digest is not 32 hex-encoded bytes"));
        }

        let expected = self.digest(value);
        match bool::from(expected[..].ct_eq(&claimed[..])) {
            true => Ok(value),
            false => Err(reject("digest mismatch")),
        }
    }

    fn digest(&self, value: &str) -> [u8; DIGEST_LEN] {
        let mut mac =
            HmacSha256::new_from_slice(self.secret).expect("HMAC accepts keys of any length");
        mac.update(value.as_bytes());

        let mut digest = [0u8; DIGEST_LEN];
        digest.copy_from_slice(&mac.finalize().into_bytes());
        digest
    }
}

impl Verifier for Signer<'_> {
    #[inline]
    fn unsign<'v>(&self, signed: &'v str) -> Result<&'v str, Error> {
        Signer::unsign(self, signed)
    }
}

impl fmt::Debug for Signer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer").finish_non_exhaustive()
    }
}

#[inline]
fn reject(reason: &'static str) -> Error {
    log::debug!("rejecting signed cookie: {}", reason);
    Error::MalformedSignature
}
