//! base64url codec: the unpadded, URL-safe alphabet mandated by
//! [RFC 7515, section 2](https://www.rfc-editor.org/rfc/rfc7515.html#section-2).

use base64ct::{Base64UrlUnpadded, Encoding};
use smallvec::{smallvec, SmallVec};

use crate::Error;

/// Maximum "reasonable" signature size in bytes.
pub(crate) const SIGNATURE_SIZE: usize = 128;

/// Encodes `bytes` without padding. Empty input produces empty output.
pub(crate) fn encode(bytes: &[u8]) -> String {
    Base64UrlUnpadded::encode_string(bytes)
}

/// Decodes unpadded base64url text. Characters outside the URL-safe alphabet
/// (including `=` padding) are rejected.
pub(crate) fn decode(text: &str) -> Result<Vec<u8>, Error> {
    Base64UrlUnpadded::decode_vec(text).map_err(|_| Error::Invalid)
}

/// Decodes a signature segment into a stack-allocated buffer.
pub(crate) fn decode_signature(text: &str) -> Result<SmallVec<[u8; SIGNATURE_SIZE]>, Error> {
    let mut buffer = smallvec![0_u8; 3 * (text.len() + 3) / 4];
    let decoded_len = Base64UrlUnpadded::decode(text, &mut buffer)
        .map_err(|_| Error::Invalid)?
        .len();
    buffer.truncate(decoded_len);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vectors() {
        assert_eq!(encode(b"{}"), "e30");
        assert_eq!(encode(br#"{"alg":"none"}"#), "eyJhbGciOiJub25lIn0");
        assert_eq!(decode("e30").unwrap(), b"{}");
    }

    #[test]
    fn empty_input_round_trips() {
        assert_eq!(encode(b""), "");
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn output_is_url_safe() {
        // 0xfb 0xef 0xbe uses the `-` / `_` tail of the alphabet.
        let encoded = encode(&[0xfb, 0xef, 0xbe]);
        assert_eq!(encoded, "----");
        assert!(!encoded.contains(['+', '/', '=']));
    }

    #[test]
    fn standard_alphabet_is_rejected() {
        assert_eq!(decode("e3+").unwrap_err(), Error::Invalid);
        assert_eq!(decode("e3/").unwrap_err(), Error::Invalid);
    }

    #[test]
    fn padding_is_rejected() {
        assert_eq!(decode("e30=").unwrap_err(), Error::Invalid);
    }

    #[test]
    fn signature_buffer_is_truncated() {
        let signature = decode_signature("AAAA").unwrap();
        assert_eq!(signature.as_slice(), [0, 0, 0]);
    }
}
