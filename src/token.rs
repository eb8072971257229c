//! `Jwt` and its claim / header accessors.

use serde_json::Value;
use zeroize::Zeroizing;

use core::fmt;

use crate::{b64, json, json::JsonObject, Algorithm, Error};

/// JSON Web Token: two JSON objects (headers and grants) plus the signing
/// algorithm and its key material.
///
/// A token starts out empty (no headers, no grants, [`Algorithm::None`], no
/// key) and is built up through the accessors. Header and grant values are
/// schema-less: strings, integers and booleans have dedicated accessors,
/// arbitrary JSON subtrees go through the `*_json` methods. A name can be
/// added at most once; re-adding it fails with [`Error::Exists`].
///
/// The key is owned by the token and bound to the algorithm: a non-`none`
/// algorithm requires a non-empty key, `none` forbids one. Every transition
/// that discards the key (an algorithm change, a failed [`set_alg`], drop)
/// overwrites the key bytes before releasing them. `Clone` deep-copies the
/// headers, the grants and the key.
///
/// [`set_alg`]: Self::set_alg
///
/// # Examples
///
/// ```
/// use jwt_core::{Algorithm, Jwt};
///
/// # fn main() -> Result<(), jwt_core::Error> {
/// let mut jwt = Jwt::new();
/// jwt.set_alg(Algorithm::Hs256, Some(b"super-secret-key"))?;
/// jwt.add_grant("sub", "1234567890")?;
/// jwt.add_grant_int("iat", 1_516_239_022)?;
/// let token = jwt.encode_str()?;
///
/// let decoded = Jwt::decode(&token, Some(b"super-secret-key"))?;
/// assert_eq!(decoded.grant("sub")?, "1234567890");
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct Jwt {
    pub(crate) alg: Algorithm,
    pub(crate) key: Option<Zeroizing<Vec<u8>>>,
    pub(crate) headers: JsonObject,
    pub(crate) grants: JsonObject,
}

impl fmt::Debug for Jwt {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Jwt")
            .field("alg", &self.alg)
            .field("key", &self.key.as_ref().map(|_| "_"))
            .field("headers", &self.headers)
            .field("grants", &self.grants)
            .finish()
    }
}

impl Jwt {
    /// Creates an empty unsecured token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the token algorithm.
    pub fn alg(&self) -> Algorithm {
        self.alg
    }

    /// Sets the signing algorithm and key material.
    ///
    /// The current key, if any, is scrubbed first, even if the new
    /// algorithm is rejected; in that case the token is left unsecured.
    /// `Algorithm::None` must come without a key; any other algorithm
    /// requires a non-empty one (the raw secret for `HS*`, a PEM private
    /// key for `RS*` / `ES*`). The key bytes are copied into the token.
    pub fn set_alg(&mut self, alg: Algorithm, key: Option<&[u8]>) -> Result<(), Error> {
        self.scrub_key();

        match alg {
            Algorithm::None => {
                if key.is_some() {
                    return Err(Error::Invalid);
                }
            }
            _ => match key {
                Some(key) if !key.is_empty() => {
                    self.key = Some(Zeroizing::new(key.to_vec()));
                }
                _ => return Err(Error::Invalid),
            },
        }

        self.alg = alg;
        Ok(())
    }

    /// Drops the key (zeroizing its bytes) and resets the algorithm.
    pub(crate) fn scrub_key(&mut self) {
        self.key = None;
        self.alg = Algorithm::None;
    }

    /// Adds a string grant. Fails with [`Error::Exists`] if the name is
    /// already present, leaving the grants untouched.
    pub fn add_grant(&mut self, name: &str, value: &str) -> Result<(), Error> {
        json::add_entry(&mut self.grants, name, Value::from(value))
    }

    /// Adds an integer grant.
    pub fn add_grant_int(&mut self, name: &str, value: i64) -> Result<(), Error> {
        json::add_entry(&mut self.grants, name, Value::from(value))
    }

    /// Adds a boolean grant.
    pub fn add_grant_bool(&mut self, name: &str, value: bool) -> Result<(), Error> {
        json::add_entry(&mut self.grants, name, Value::from(value))
    }

    /// Merges a JSON object into the grants. `blob` must be an object
    /// without repeated keys; its entries overwrite existing grants of the
    /// same name.
    pub fn add_grants_json(&mut self, blob: &str) -> Result<(), Error> {
        json::merge_str(&mut self.grants, blob)
    }

    /// Returns a string grant. Missing names yield [`Error::NotPresent`];
    /// a present value of another kind yields [`Error::Invalid`].
    pub fn grant(&self, name: &str) -> Result<&str, Error> {
        json::entry_str(&self.grants, name)
    }

    /// Returns an integer grant.
    pub fn grant_int(&self, name: &str) -> Result<i64, Error> {
        json::entry_int(&self.grants, name)
    }

    /// Returns a boolean grant.
    pub fn grant_bool(&self, name: &str) -> Result<bool, Error> {
        json::entry_bool(&self.grants, name)
    }

    /// Serializes the named grant (any JSON kind), or the whole grant object
    /// when `name` is `None` or empty. Output has sorted keys and no
    /// insignificant whitespace.
    pub fn grants_json(&self, name: Option<&str>) -> Result<String, Error> {
        json::dump_entry(&self.grants, name)
    }

    /// Removes the named grant, or clears all grants when `name` is `None`
    /// or empty.
    pub fn del_grants(&mut self, name: Option<&str>) {
        json::remove_entry(&mut self.grants, name);
    }

    /// Adds a string header. Fails with [`Error::Exists`] if the name is
    /// already present, leaving the headers untouched.
    pub fn add_header(&mut self, name: &str, value: &str) -> Result<(), Error> {
        json::add_entry(&mut self.headers, name, Value::from(value))
    }

    /// Adds an integer header.
    pub fn add_header_int(&mut self, name: &str, value: i64) -> Result<(), Error> {
        json::add_entry(&mut self.headers, name, Value::from(value))
    }

    /// Adds a boolean header.
    pub fn add_header_bool(&mut self, name: &str, value: bool) -> Result<(), Error> {
        json::add_entry(&mut self.headers, name, Value::from(value))
    }

    /// Merges a JSON object into the headers, as [`add_grants_json`] does
    /// for grants.
    ///
    /// [`add_grants_json`]: Self::add_grants_json
    pub fn add_headers_json(&mut self, blob: &str) -> Result<(), Error> {
        json::merge_str(&mut self.headers, blob)
    }

    /// Returns a string header.
    pub fn header(&self, name: &str) -> Result<&str, Error> {
        json::entry_str(&self.headers, name)
    }

    /// Returns an integer header.
    pub fn header_int(&self, name: &str) -> Result<i64, Error> {
        json::entry_int(&self.headers, name)
    }

    /// Returns a boolean header.
    pub fn header_bool(&self, name: &str) -> Result<bool, Error> {
        json::entry_bool(&self.headers, name)
    }

    /// Serializes the named header or the whole header object, as
    /// [`grants_json`](Self::grants_json) does for grants.
    pub fn headers_json(&self, name: Option<&str>) -> Result<String, Error> {
        json::dump_entry(&self.headers, name)
    }

    /// Removes the named header, or clears all headers when `name` is
    /// `None` or empty.
    pub fn del_headers(&mut self, name: Option<&str>) {
        json::remove_entry(&mut self.headers, name);
    }

    /// Regenerates the protected header fields: `alg` always carries the
    /// canonical algorithm name, and `typ` is forced to `"JWT"` for signed
    /// tokens. Other headers are left alone.
    fn write_canonical_headers(&mut self) {
        if self.alg != Algorithm::None {
            self.headers.remove("typ");
            self.headers.insert("typ".to_owned(), Value::from("JWT"));
        }
        self.headers.remove("alg");
        self.headers
            .insert("alg".to_owned(), Value::from(self.alg.name()));
    }

    /// Encodes the token into its compact serialization:
    /// `base64url(headers) "." base64url(grants) "." base64url(signature)`,
    /// with an empty signature segment for unsecured tokens.
    ///
    /// The headers are canonicalized first (see the `alg` / `typ` handling
    /// on [`dump_str`](Self::dump_str)), both objects are serialized with
    /// sorted keys and no whitespace, and the signature is computed over the
    /// first two segments joined by `.`. Nothing is emitted on error.
    pub fn encode_str(&mut self) -> Result<String, Error> {
        self.write_canonical_headers();
        let head = json::dump_object_compact(&self.headers)?;
        let body = json::dump_object_compact(&self.grants)?;

        let mut out = b64::encode(head.as_bytes());
        out.push('.');
        out.push_str(&b64::encode(body.as_bytes()));

        if self.alg == Algorithm::None {
            out.push('.');
            return Ok(out);
        }

        let key = self.key.as_deref().ok_or(Error::Invalid)?;
        let signature = self.alg.sign(key, out.as_bytes())?;
        out.push('.');
        out.push_str(&b64::encode(&signature));
        Ok(out)
    }

    /// Dumps the token as `headers "." grants` plain JSON, for inspection
    /// rather than verification; the signature segment is omitted. The headers
    /// are canonicalized exactly as [`encode_str`](Self::encode_str) would:
    /// `alg` is overwritten with the canonical name and, for signed tokens,
    /// `typ` is forced to `"JWT"`.
    ///
    /// With `pretty`, each object is wrapped in newlines and indented four
    /// spaces.
    pub fn dump_str(&mut self, pretty: bool) -> Result<String, Error> {
        self.write_canonical_headers();
        if pretty {
            let head = json::dump_object_pretty(&self.headers)?;
            let body = json::dump_object_pretty(&self.grants)?;
            Ok(format!("\n{head}\n.\n{body}\n"))
        } else {
            let head = json::dump_object_compact(&self.headers)?;
            let body = json::dump_object_compact(&self.grants)?;
            Ok(format!("{head}.{body}"))
        }
    }
}
