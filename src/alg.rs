//! Signing algorithm tags and signature dispatch.

mod ecdsa;
mod hmacs;
mod rsa;

use hmac::Hmac;
use sha2::{Sha256, Sha384, Sha512};

use core::{fmt, str::FromStr};

use crate::Error;

/// JWT signing algorithm, as carried in the `alg` header field.
///
/// The set is closed: the unsecured `none` algorithm, HMAC with SHA-2
/// (`HS*`), RSA PKCS#1 v1.5 (`RS*`), and ECDSA on the NIST curves (`ES*`).
/// See [RFC 7518](https://www.rfc-editor.org/rfc/rfc7518.html) for the
/// algorithm definitions.
///
/// Tags parse case-insensitively via [`FromStr`]; an unrecognized name is a
/// parse error and is never stored in a token. [`Display`](fmt::Display)
/// emits the canonical names (`none` in lowercase, the rest in uppercase).
///
/// ```
/// # use jwt_core::Algorithm;
/// let alg: Algorithm = "hs256".parse()?;
/// assert_eq!(alg, Algorithm::Hs256);
/// assert_eq!(alg.name(), "HS256");
/// assert!("XS256".parse::<Algorithm>().is_err());
/// # Ok::<_, jwt_core::Error>(())
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Unsecured token: no key, empty signature segment.
    #[default]
    None,
    /// HMAC with SHA-256.
    Hs256,
    /// HMAC with SHA-384.
    Hs384,
    /// HMAC with SHA-512.
    Hs512,
    /// RSA PKCS#1 v1.5 over SHA-256.
    Rs256,
    /// RSA PKCS#1 v1.5 over SHA-384.
    Rs384,
    /// RSA PKCS#1 v1.5 over SHA-512.
    Rs512,
    /// ECDSA on P-256 over SHA-256.
    Es256,
    /// ECDSA on P-384 over SHA-384.
    Es384,
    /// ECDSA on P-521 over SHA-512.
    Es512,
}

impl Algorithm {
    /// Returns the canonical name of the algorithm.
    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Hs256 => "HS256",
            Self::Hs384 => "HS384",
            Self::Hs512 => "HS512",
            Self::Rs256 => "RS256",
            Self::Rs384 => "RS384",
            Self::Rs512 => "RS512",
            Self::Es256 => "ES256",
            Self::Es384 => "ES384",
            Self::Es512 => "ES512",
        }
    }

    /// Signs `message` with `key`, returning the raw signature bytes in the
    /// wire form of the algorithm family: the MAC itself for `HS*`, a
    /// modulus-width signature for `RS*`, and the fixed-width `r || s`
    /// concatenation for `ES*`.
    ///
    /// `HS*` keys are the raw secret; `RS*` / `ES*` keys are PEM-encoded
    /// private keys (PKCS#8, or legacy PKCS#1 / SEC1).
    pub(crate) fn sign(self, key: &[u8], message: &[u8]) -> Result<Vec<u8>, Error> {
        match self {
            Self::Hs256 => self::hmacs::sign::<Hmac<Sha256>>(key, message),
            Self::Hs384 => self::hmacs::sign::<Hmac<Sha384>>(key, message),
            Self::Hs512 => self::hmacs::sign::<Hmac<Sha512>>(key, message),
            Self::Rs256 => self::rsa::sign_rs256(key, message),
            Self::Rs384 => self::rsa::sign_rs384(key, message),
            Self::Rs512 => self::rsa::sign_rs512(key, message),
            Self::Es256 => self::ecdsa::sign_es256(key, message),
            Self::Es384 => self::ecdsa::sign_es384(key, message),
            Self::Es512 => self::ecdsa::sign_es512(key, message),
            Self::None => Err(Error::Invalid),
        }
    }

    /// Verifies `signature` over `message`. `HS*` comparison is
    /// constant-time; `RS*` / `ES*` keys are PEM-encoded public keys
    /// (SPKI, or legacy PKCS#1 for RSA).
    pub(crate) fn verify(self, key: &[u8], message: &[u8], signature: &[u8]) -> Result<(), Error> {
        match self {
            Self::Hs256 => self::hmacs::verify::<Hmac<Sha256>>(key, message, signature),
            Self::Hs384 => self::hmacs::verify::<Hmac<Sha384>>(key, message, signature),
            Self::Hs512 => self::hmacs::verify::<Hmac<Sha512>>(key, message, signature),
            Self::Rs256 => self::rsa::verify_rs256(key, message, signature),
            Self::Rs384 => self::rsa::verify_rs384(key, message, signature),
            Self::Rs512 => self::rsa::verify_rs512(key, message, signature),
            Self::Es256 => self::ecdsa::verify_es256(key, message, signature),
            Self::Es384 => self::ecdsa::verify_es384(key, message, signature),
            Self::Es512 => self::ecdsa::verify_es512(key, message, signature),
            Self::None => Err(Error::Invalid),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        const ALGORITHMS: [Algorithm; 10] = [
            Algorithm::None,
            Algorithm::Hs256,
            Algorithm::Hs384,
            Algorithm::Hs512,
            Algorithm::Rs256,
            Algorithm::Rs384,
            Algorithm::Rs512,
            Algorithm::Es256,
            Algorithm::Es384,
            Algorithm::Es512,
        ];

        ALGORITHMS
            .into_iter()
            .find(|alg| name.eq_ignore_ascii_case(alg.name()))
            .ok_or(Error::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for name in [
            "none", "HS256", "HS384", "HS512", "RS256", "RS384", "RS512", "ES256", "ES384",
            "ES512",
        ] {
            let alg: Algorithm = name.parse().unwrap();
            assert_eq!(alg.name(), name);
            assert_eq!(alg.to_string(), name);
        }
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!("NONE".parse::<Algorithm>().unwrap(), Algorithm::None);
        assert_eq!("hs512".parse::<Algorithm>().unwrap(), Algorithm::Hs512);
        assert_eq!("Es256".parse::<Algorithm>().unwrap(), Algorithm::Es256);
    }

    #[test]
    fn unknown_names_are_rejected() {
        for name in ["", "HS", "HS257", "RSA256", "nonE2"] {
            assert_eq!(name.parse::<Algorithm>().unwrap_err(), Error::Invalid);
        }
    }

    #[test]
    fn none_never_signs() {
        assert_eq!(
            Algorithm::None.sign(b"key", b"message").unwrap_err(),
            Error::Invalid
        );
        assert_eq!(
            Algorithm::None.verify(b"key", b"message", b"").unwrap_err(),
            Error::Invalid
        );
    }
}
