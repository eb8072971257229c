//! Error handling.

use core::fmt;

/// Error kind returned by token and claim operations.
///
/// The kinds mirror the failure modes of the token surface: malformed or
/// rejected input, an attempt to add an entry under a name that is already
/// taken, and a lookup of a name that is not there. Operations never log and
/// never swallow a failure; whatever goes wrong is reported through this type
/// (or through [`ValidationError`] for the policy checks).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Malformed input, an algorithm / key mismatch, or a failed signature
    /// verification.
    Invalid,
    /// A header or grant with the requested name is already present.
    Exists,
    /// The requested header or grant is not present.
    NotPresent,
}

impl fmt::Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Invalid => "invalid input or operation",
            Self::Exists => "entry with this name already exists",
            Self::NotPresent => "entry with this name is not present",
        })
    }
}

impl std::error::Error for Error {}

/// Identifier of a claim that may be replicated between the token header and
/// the token grants.
///
/// As per [RFC 7519, section 5.3], `iss`, `sub` and `aud` may appear in both
/// places; when they do, the two copies must agree.
///
/// [RFC 7519, section 5.3]: https://tools.ietf.org/html/rfc7519#section-5.3
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReplicatedClaim {
    /// `iss` claim (token issuer).
    Issuer,
    /// `sub` claim (token subject).
    Subject,
    /// `aud` claim (token audience).
    Audience,
}

impl ReplicatedClaim {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Issuer => "iss",
            Self::Subject => "sub",
            Self::Audience => "aud",
        }
    }
}

impl fmt::Display for ReplicatedClaim {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

/// Errors that can occur when a token is checked against a [`Validator`]
/// policy.
///
/// The `Display` form of each variant is the status message stored on the
/// validator, e.g. `JWT has expired` or `JWT "role" grant does not match`.
///
/// [`Validator`]: crate::Validator
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    /// No token was supplied, e.g. because decoding failed upstream.
    InvalidToken,
    /// Algorithm expected by the policy differs from the token algorithm.
    AlgorithmMismatch,
    /// The `exp` grant lies at or before the validation time.
    Expired,
    /// The `nbf` grant lies after the validation time.
    NotMature,
    /// A claim replicated into the header disagrees with its grant copy.
    HeaderMismatch(ReplicatedClaim),
    /// A grant required by the policy has a different value in the token.
    GrantMismatch(String),
    /// A grant required by the policy is missing from the token.
    GrantMissing(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidToken => formatter.write_str("Invalid JWT"),
            Self::AlgorithmMismatch => formatter.write_str("Algorithm does not match"),
            Self::Expired => formatter.write_str("JWT has expired"),
            Self::NotMature => formatter.write_str("JWT has not matured"),
            Self::HeaderMismatch(claim) => {
                write!(formatter, "JWT \"{claim}\" header does not match")
            }
            Self::GrantMismatch(name) => {
                write!(formatter, "JWT \"{name}\" grant does not match")
            }
            Self::GrantMissing(name) => {
                write!(formatter, "JWT \"{name}\" grant is not present")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_messages() {
        assert_eq!(ValidationError::InvalidToken.to_string(), "Invalid JWT");
        assert_eq!(
            ValidationError::HeaderMismatch(ReplicatedClaim::Issuer).to_string(),
            "JWT \"iss\" header does not match"
        );
        assert_eq!(
            ValidationError::GrantMismatch("role".to_owned()).to_string(),
            "JWT \"role\" grant does not match"
        );
        assert_eq!(
            ValidationError::GrantMissing("role".to_owned()).to_string(),
            "JWT \"role\" grant is not present"
        );
    }
}
