//! `HS*` family: HMAC over SHA-2.

use hmac::{digest::KeyInit, Mac};

use crate::Error;

/// Computes the MAC of `message`. HMAC accepts keys of any length; emptiness
/// is ruled out upstream by the token key invariant.
pub(crate) fn sign<M: Mac + KeyInit>(key: &[u8], message: &[u8]) -> Result<Vec<u8>, Error> {
    let mut mac = <M as Mac>::new_from_slice(key).map_err(|_| Error::Invalid)?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Recomputes the MAC and compares it to `signature` in constant time.
pub(crate) fn verify<M: Mac + KeyInit>(
    key: &[u8],
    message: &[u8],
    signature: &[u8],
) -> Result<(), Error> {
    let mut mac = <M as Mac>::new_from_slice(key).map_err(|_| Error::Invalid)?;
    mac.update(message);
    mac.verify_slice(signature).map_err(|_| Error::Invalid)
}
