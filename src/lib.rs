//! Compact [JSON web token (JWT)][JWT] codec and validator with a dynamic
//! claim model.
//!
//! # Design choices
//!
//! - Headers and claims (*grants*) are schema-less JSON objects manipulated
//!   through typed accessors on [`Jwt`]. No serde derives are required on
//!   the caller side, and tokens minted by other stacks can be inspected
//!   without knowing their claim layout up front.
//! - The signing algorithm is a closed enum, [`Algorithm`]; each variant
//!   knows its digest, its expected key form and its signature encoding.
//!   The `alg` header is regenerated on every encode and checked against the
//!   caller's expectation during validation, so a token cannot talk the
//!   verifier into a different algorithm.
//! - Key material is owned by the token and zeroized on every path that
//!   discards it: algorithm changes, rejected [`Jwt::set_alg`] calls and
//!   drop.
//! - Emission is canonical: object keys are serialized in byte-lexicographic
//!   order with no insignificant whitespace, so equal tokens have equal wire
//!   forms.
//!
//! # Supported algorithms
//!
//! | Algorithm(s) | Key form | Backing implementation |
//! |--------------|----------|------------------------|
//! | `none` | - | - |
//! | `HS256`, `HS384`, `HS512` | raw secret bytes | [`hmac`] + [`sha2`] |
//! | `RS256`, `RS384`, `RS512` | PEM (PKCS#8 / PKCS#1) | [`rsa`] |
//! | `ES256`, `ES384`, `ES512` | PEM (PKCS#8 / SEC1) | [`p256`], [`p384`], [`p521`] |
//!
//! `ES*` signatures use the fixed-width `r || s` form required by
//! [RFC 7518, section 3.4](https://www.rfc-editor.org/rfc/rfc7518.html#section-3.4),
//! not DER. `RS*` verification accepts any modulus size the key provides;
//! keys below 2048 bits are the caller's own risk.
//!
//! # Memory allocation
//!
//! The crate has no allocator hooks of its own: all allocations, including
//! those made by the JSON machinery, go through the process-wide Rust
//! allocator, so installing a custom `#[global_allocator]` before the first
//! token is created covers every buffer this crate touches.
//!
//! [JWT]: https://jwt.io/
//! [`hmac`]: https://docs.rs/hmac/
//! [`sha2`]: https://docs.rs/sha2/
//! [`rsa`]: https://docs.rs/rsa/
//! [`p256`]: https://docs.rs/p256/
//! [`p384`]: https://docs.rs/p384/
//! [`p521`]: https://docs.rs/p521/
//!
//! # Examples
//!
//! Basic JWT lifecycle:
//!
//! ```
//! use jwt_core::{Algorithm, Jwt, Validator};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a token with a couple of grants and sign it.
//! let mut jwt = Jwt::new();
//! jwt.set_alg(Algorithm::Hs256, Some(b"super_secret_key_donut_steel"))?;
//! jwt.add_grant("iss", "files.example.com")?;
//! jwt.add_grant_int("exp", 1_700_000_000)?;
//! let token = jwt.encode_str()?;
//!
//! // Decode it elsewhere; the key verifies the signature.
//! let decoded = Jwt::decode(&token, Some(b"super_secret_key_donut_steel"))?;
//! assert_eq!(decoded.grant("iss")?, "files.example.com");
//!
//! // Apply a validation policy.
//! let mut validator = Validator::new(Algorithm::Hs256);
//! validator.set_now(1_650_000_000);
//! validator.add_grant("iss", "files.example.com")?;
//! validator.validate(Some(&decoded))?;
//! assert_eq!(validator.status(), Some("Valid JWT"));
//! # Ok(())
//! # }
//! ```
//!
//! Inspecting a foreign token without verification:
//!
//! ```
//! use jwt_core::{Algorithm, Jwt};
//!
//! # fn main() -> Result<(), jwt_core::Error> {
//! # let mut source = Jwt::new();
//! # source.set_alg(Algorithm::Hs256, Some(b"someone-elses-key"))?;
//! # source.add_grant("sub", "alice")?;
//! let token_string: String = // token from an external source
//! #     source.encode_str()?;
//! // Without a key the token is parsed but not verified, and the result
//! // is downgraded to an unsecured token.
//! let untrusted = Jwt::decode(&token_string, None)?;
//! assert_eq!(untrusted.alg(), Algorithm::None);
//! assert_eq!(untrusted.header("alg")?, "HS256");
//! assert_eq!(untrusted.grant("sub")?, "alice");
//! # Ok(())
//! # }
//! ```

// Linter settings.
#![warn(missing_debug_implementations, missing_docs, bare_trait_objects)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

mod alg;
mod b64;
mod decode;
mod error;
mod json;
mod token;
mod validate;

/// Prelude to neatly import all necessary stuff from the crate.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::{Algorithm, Jwt, Validator};
}

pub use crate::{
    alg::Algorithm,
    error::{Error, ReplicatedClaim, ValidationError},
    token::Jwt,
    validate::Validator,
};
