//! `ES*` family: deterministic ECDSA on the NIST curves.
//!
//! Signatures are the fixed-width big-endian `r || s` concatenation (64, 96
//! and 132 bytes for P-256, P-384 and P-521), not DER. Key material arrives
//! as PEM bytes: PKCS#8 (`PRIVATE KEY`) or SEC1 (`EC PRIVATE KEY`) for
//! signing, SPKI (`PUBLIC KEY`) for verification.

use p256::pkcs8::{DecodePrivateKey, DecodePublicKey};
use sha2::{Digest, Sha256, Sha384};

use crate::Error;

macro_rules! ecdsa_curve {
    ($sign:ident, $verify:ident, $curve:ident, $digest:ident) => {
        pub(crate) fn $sign(key: &[u8], message: &[u8]) -> Result<Vec<u8>, Error> {
            use $curve::ecdsa::{signature::DigestSigner, Signature, SigningKey};

            let pem = core::str::from_utf8(key).map_err(|_| Error::Invalid)?;
            let secret = $curve::SecretKey::from_pkcs8_pem(pem)
                .ok()
                .or_else(|| $curve::SecretKey::from_sec1_pem(pem).ok())
                .ok_or(Error::Invalid)?;
            let signing_key = SigningKey::from(secret);

            let mut digest = $digest::default();
            digest.update(message);
            let signature: Signature = signing_key
                .try_sign_digest(digest)
                .map_err(|_| Error::Invalid)?;
            Ok(signature.to_bytes().to_vec())
        }

        pub(crate) fn $verify(key: &[u8], message: &[u8], signature: &[u8]) -> Result<(), Error> {
            use $curve::ecdsa::{signature::DigestVerifier, Signature, VerifyingKey};

            let pem = core::str::from_utf8(key).map_err(|_| Error::Invalid)?;
            let public = $curve::PublicKey::from_public_key_pem(pem).map_err(|_| Error::Invalid)?;
            let verifying_key = VerifyingKey::from(public);

            let signature = Signature::from_slice(signature).map_err(|_| Error::Invalid)?;
            let mut digest = $digest::default();
            digest.update(message);
            verifying_key
                .verify_digest(digest, &signature)
                .map_err(|_| Error::Invalid)
        }
    };
}

ecdsa_curve!(sign_es256, verify_es256, p256, Sha256);
ecdsa_curve!(sign_es384, verify_es384, p384, Sha384);

// p521's `ecdsa` module wraps the generic `ecdsa` crate types in a newtype
// that doesn't forward `DigestSigner`/`DigestVerifier` (and SHA-512's 64-byte
// output doesn't match P-521's 66-byte field size for that generic path
// anyway), so ES512 goes through p521's own `Signer`/`Verifier` impls, which
// hash the message internally.
pub(crate) fn sign_es512(key: &[u8], message: &[u8]) -> Result<Vec<u8>, Error> {
    use p521::ecdsa::{signature::Signer, Signature, SigningKey};

    let pem = core::str::from_utf8(key).map_err(|_| Error::Invalid)?;
    let secret = p521::SecretKey::from_pkcs8_pem(pem)
        .ok()
        .or_else(|| p521::SecretKey::from_sec1_pem(pem).ok())
        .ok_or(Error::Invalid)?;
    let signing_key = SigningKey::from_bytes(&secret.to_bytes()).map_err(|_| Error::Invalid)?;

    let signature: Signature = signing_key.sign(message);
    Ok(signature.to_bytes().to_vec())
}

pub(crate) fn verify_es512(key: &[u8], message: &[u8], signature: &[u8]) -> Result<(), Error> {
    use p521::ecdsa::{signature::Verifier, Signature, VerifyingKey};
    use p521::elliptic_curve::sec1::ToEncodedPoint;

    let pem = core::str::from_utf8(key).map_err(|_| Error::Invalid)?;
    let public = p521::PublicKey::from_public_key_pem(pem).map_err(|_| Error::Invalid)?;
    let verifying_key =
        VerifyingKey::from_encoded_point(&public.to_encoded_point(false)).map_err(|_| Error::Invalid)?;

    let signature = Signature::from_slice(signature).map_err(|_| Error::Invalid)?;
    verifying_key
        .verify(message, &signature)
        .map_err(|_| Error::Invalid)
}
