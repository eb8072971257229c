//! Token decoding: segmentation, header verification and signature checks.

use zeroize::Zeroizing;

use crate::{b64, json, Algorithm, Error, Jwt};

impl Jwt {
    /// Decodes a compact token, verifying its signature when a key is
    /// supplied.
    ///
    /// The token must consist of a base64url header, a base64url payload and
    /// a signature segment separated by `.`; both decoded segments must be
    /// JSON objects. The header must carry a recognized `alg` and, for
    /// signed tokens, a `typ` equal to `"JWT"` (case-insensitively) if one
    /// is present at all.
    ///
    /// For a signed token, the supplied key (the shared secret for `HS*`, a
    /// PEM public key for `RS*` / `ES*`) is used to verify the signature
    /// over the first two segments exactly as they appear on the wire, and
    /// is retained by the returned token. Decoding a signed token **without**
    /// a key skips verification: the result carries the parsed headers and
    /// grants but is downgraded to [`Algorithm::None`]. Supplying a key for
    /// an unsecured token is an error; an empty key slice counts as no key.
    ///
    /// No token is returned on failure; partially decoded state is dropped
    /// and its key bytes are zeroized.
    pub fn decode(token: &str, key: Option<&[u8]>) -> Result<Self, Error> {
        let (head, rest) = token.split_once('.').ok_or(Error::Invalid)?;
        let (body, signature) = rest.split_once('.').ok_or(Error::Invalid)?;

        let mut jwt = Jwt::new();
        if let Some(key) = key.filter(|key| !key.is_empty()) {
            jwt.key = Some(Zeroizing::new(key.to_vec()));
        }

        jwt.verify_head(head)?;
        jwt.grants = json::parse_object(&b64::decode(body)?)?;

        if jwt.alg != Algorithm::None {
            let signed_data = &token.as_bytes()[..head.len() + 1 + body.len()];
            let signature = b64::decode_signature(signature)?;
            let key = jwt.key.as_deref().ok_or(Error::Invalid)?;
            jwt.alg.verify(key, signed_data, &signature)?;
        }
        Ok(jwt)
    }

    /// Parses the header segment and applies the header / key policy.
    fn verify_head(&mut self, head: &str) -> Result<(), Error> {
        self.headers = json::parse_object(&b64::decode(head)?)?;

        let alg = json::str_value(&self.headers, "alg").ok_or(Error::Invalid)?;
        self.alg = alg.parse()?;

        if self.alg == Algorithm::None {
            // An unsecured token must not come with a key.
            if self.key.is_some() {
                return Err(Error::Invalid);
            }
            return Ok(());
        }

        match self.headers.get("typ") {
            None => {}
            Some(typ) if typ.as_str().is_some_and(|typ| typ.eq_ignore_ascii_case("JWT")) => {}
            Some(_) => return Err(Error::Invalid),
        }

        if self.key.is_none() {
            // No key supplied: parse without verifying.
            self.scrub_key();
        }
        Ok(())
    }
}
