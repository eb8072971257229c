//! `RS*` family: RSA PKCS#1 v1.5 over SHA-2.
//!
//! Key material arrives as PEM bytes: PKCS#8 (`PRIVATE KEY`) or legacy
//! PKCS#1 (`RSA PRIVATE KEY`) for signing, SPKI (`PUBLIC KEY`) or PKCS#1
//! (`RSA PUBLIC KEY`) for verification.

use rsa::{
    pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey},
    pkcs1v15::{Signature, SigningKey, VerifyingKey},
    pkcs8::{DecodePrivateKey, DecodePublicKey},
    signature::{SignatureEncoding, Signer, Verifier},
    RsaPrivateKey, RsaPublicKey,
};
use sha2::{Sha256, Sha384, Sha512};

use crate::Error;

fn decode_signing_key(raw: &[u8]) -> Result<RsaPrivateKey, Error> {
    let pem = core::str::from_utf8(raw).map_err(|_| Error::Invalid)?;
    RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
        .map_err(|_| Error::Invalid)
}

fn decode_verifying_key(raw: &[u8]) -> Result<RsaPublicKey, Error> {
    let pem = core::str::from_utf8(raw).map_err(|_| Error::Invalid)?;
    RsaPublicKey::from_public_key_pem(pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
        .map_err(|_| Error::Invalid)
}

macro_rules! rsa_pkcs1_sha {
    ($sign:ident, $verify:ident, $digest:ident) => {
        pub(crate) fn $sign(key: &[u8], message: &[u8]) -> Result<Vec<u8>, Error> {
            let signing_key = SigningKey::<$digest>::new(decode_signing_key(key)?);
            let signature = signing_key.try_sign(message).map_err(|_| Error::Invalid)?;
            Ok(signature.to_vec())
        }

        pub(crate) fn $verify(key: &[u8], message: &[u8], signature: &[u8]) -> Result<(), Error> {
            let verifying_key = VerifyingKey::<$digest>::new(decode_verifying_key(key)?);
            let signature = Signature::try_from(signature).map_err(|_| Error::Invalid)?;
            verifying_key
                .verify(message, &signature)
                .map_err(|_| Error::Invalid)
        }
    };
}

rsa_pkcs1_sha!(sign_rs256, verify_rs256, Sha256);
rsa_pkcs1_sha!(sign_rs384, verify_rs384, Sha384);
rsa_pkcs1_sha!(sign_rs512, verify_rs512, Sha512);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_keys_are_rejected() {
        assert_eq!(
            sign_rs256(b"not a pem key", b"message").unwrap_err(),
            Error::Invalid
        );
        assert_eq!(
            verify_rs256(b"not a pem key", b"message", &[0; 256]).unwrap_err(),
            Error::Invalid
        );
        // Non-UTF-8 key bytes cannot be PEM.
        assert_eq!(
            sign_rs256(&[0xff, 0xfe], b"message").unwrap_err(),
            Error::Invalid
        );
    }
}
