use std::{error, fmt};

/// Every failure the crate can report.
///
/// Parsing only fails with [`Error::InputType`] or, when a
/// [verifier](crate::options::ParseOptions::verifier) is set,
/// [`Error::MalformedSignature`]. The remaining variants come from
/// [serialize](crate::serialize).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Error {
    /// The header handed to the parser is not UTF-8 text.
    InputType,

    /// A signed value is missing its delimiter, has an empty value or digest,
    /// carries a digest of the wrong length, or the digest does not match.
    ///
    /// The variant deliberately carries no detail about which check failed.
    MalformedSignature,

    /// A serialized field contains characters outside the
    /// [RFC 7230 field-content](https://datatracker.ietf.org/doc/html/rfc7230#section-3.2)
    /// class. Holds the name of the field.
    InvalidFieldContent(&'static str),
    /// `Max-Age` is `NaN` or infinite.
    InvalidMaxAge,
    /// A `SameSite` value other than `Strict`, `Lax` or `None`.
    InvalidSameSite,
    /// An `Expires` value that cannot be read as a date.
    InvalidExpires,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InputType => write!(f, "Cookie header must be UTF-8 text"),
            Error::MalformedSignature => write!(f, "Malformed cookie"),
            Error::InvalidFieldContent(field) => {
                write!(f, "{} is invalid. Refer to RFC 7230 sec 3.2", field)
            }
            Error::InvalidMaxAge => write!(f, "maxAge must be valid number"),
            Error::InvalidSameSite => write!(f, "Invalid SameSite value"),
            Error::InvalidExpires => write!(f, "expires must be a valid date"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Error::MalformedSignature.to_string(), "Malformed cookie");
        assert_eq!(
            Error::InvalidFieldContent("domain").to_string(),
            "domain is invalid. Refer to RFC 7230 sec 3.2"
        );
        assert_eq!(Error::InvalidSameSite.to_string(), "Invalid SameSite value");
    }

    #[test]
    fn is_std_error() {
        let err: Box<dyn error::Error + Send + Sync> = Box::new(Error::InputType);
        assert_eq!(err.to_string(), "Cookie header must be UTF-8 text");
    }
}
