//! Claim validation against a caller-defined policy.

use serde_json::Value;

use crate::{json, json::JsonObject, Algorithm, Error, Jwt, ReplicatedClaim, ValidationError};

/// Validation policy applied to decoded tokens.
///
/// A policy carries the expected algorithm, an optional validation time and
/// a set of required grants. [`validate`](Self::validate) runs the checks in
/// a fixed order and stops at the first failure:
///
/// 1. a token must be present at all;
/// 2. the token algorithm must equal the policy algorithm;
/// 3. an integer `exp` grant must lie after the validation time;
/// 4. an integer `nbf` grant must not lie after the validation time;
/// 5. `iss` / `sub` replicated into the header must match their grant
///    copies byte for byte, and a replicated `aud` must be structurally
///    equal (it may be a string or an array);
/// 6. every required grant must be present and structurally equal to its
///    expected value.
///
/// The human-readable outcome of the latest `validate` call (e.g.
/// `Valid JWT` or `JWT has expired`) is kept on the policy and can be read
/// back via [`status`](Self::status).
///
/// # Examples
///
/// ```
/// use jwt_core::{Algorithm, Jwt, Validator};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut jwt = Jwt::new();
/// jwt.add_grant("role", "admin")?;
/// jwt.add_grant_int("exp", 1_700_000_000)?;
///
/// let mut validator = Validator::new(Algorithm::None);
/// validator.set_now(1_650_000_000);
/// validator.add_grant("role", "admin")?;
/// validator.validate(Some(&jwt))?;
/// assert_eq!(validator.status(), Some("Valid JWT"));
///
/// validator.set_now(1_800_000_000);
/// assert!(validator.validate(Some(&jwt)).is_err());
/// assert_eq!(validator.status(), Some("JWT has expired"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    alg: Algorithm,
    now: i64,
    hdr: bool,
    req_grants: JsonObject,
    status: Option<String>,
}

impl Validator {
    /// Creates a policy expecting the given algorithm. Time checks start out
    /// disabled and no grants are required.
    pub fn new(alg: Algorithm) -> Self {
        Self {
            alg,
            now: 0,
            hdr: false,
            req_grants: JsonObject::new(),
            status: None,
        }
    }

    /// Sets the validation time as Unix seconds. `0` (the initial value)
    /// disables the `exp` / `nbf` checks.
    pub fn set_now(&mut self, now: i64) {
        self.now = now;
    }

    /// Reserved selector for where replicated claims are sourced from.
    /// Stored, but without effect on the current validation path.
    pub fn set_headers(&mut self, hdr: bool) {
        self.hdr = hdr;
    }

    /// Requires a string grant to be present with exactly this value.
    /// Fails with [`Error::Exists`] if the name is already required.
    pub fn add_grant(&mut self, name: &str, value: &str) -> Result<(), Error> {
        json::add_entry(&mut self.req_grants, name, Value::from(value))
    }

    /// Requires an integer grant to be present with exactly this value.
    pub fn add_grant_int(&mut self, name: &str, value: i64) -> Result<(), Error> {
        json::add_entry(&mut self.req_grants, name, Value::from(value))
    }

    /// Requires a boolean grant to be present with exactly this value.
    pub fn add_grant_bool(&mut self, name: &str, value: bool) -> Result<(), Error> {
        json::add_entry(&mut self.req_grants, name, Value::from(value))
    }

    /// Merges a JSON object of required grants into the policy. `blob` must
    /// be an object without repeated keys; its entries overwrite required
    /// grants of the same name.
    pub fn add_grants_json(&mut self, blob: &str) -> Result<(), Error> {
        json::merge_str(&mut self.req_grants, blob)
    }

    /// Returns a required string grant.
    pub fn grant(&self, name: &str) -> Result<&str, Error> {
        json::entry_str(&self.req_grants, name)
    }

    /// Returns a required integer grant.
    pub fn grant_int(&self, name: &str) -> Result<i64, Error> {
        json::entry_int(&self.req_grants, name)
    }

    /// Returns a required boolean grant.
    pub fn grant_bool(&self, name: &str) -> Result<bool, Error> {
        json::entry_bool(&self.req_grants, name)
    }

    /// Serializes the named required grant, or all of them when `name` is
    /// `None` or empty.
    pub fn grants_json(&self, name: Option<&str>) -> Result<String, Error> {
        json::dump_entry(&self.req_grants, name)
    }

    /// Drops the named required grant, or all of them when `name` is `None`
    /// or empty.
    pub fn del_grants(&mut self, name: Option<&str>) {
        json::remove_entry(&mut self.req_grants, name);
    }

    /// Returns the status message of the latest [`validate`](Self::validate)
    /// call, or `None` if the policy has not been applied yet.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Applies the policy to a decoded token.
    ///
    /// Pass `None` when there is no token to check (e.g. decoding failed);
    /// this reports [`ValidationError::InvalidToken`]. The status message is
    /// replaced on every call, with `"Valid JWT"` marking success.
    pub fn validate(&mut self, jwt: Option<&Jwt>) -> Result<(), ValidationError> {
        let outcome = self.run_checks(jwt);
        self.status = Some(match &outcome {
            Ok(()) => "Valid JWT".to_owned(),
            Err(err) => err.to_string(),
        });
        outcome
    }

    fn run_checks(&self, jwt: Option<&Jwt>) -> Result<(), ValidationError> {
        let jwt = jwt.ok_or(ValidationError::InvalidToken)?;

        if self.alg != jwt.alg() {
            return Err(ValidationError::AlgorithmMismatch);
        }

        if self.now != 0 {
            if let Some(exp) = json::int_value(&jwt.grants, "exp") {
                if self.now >= exp {
                    return Err(ValidationError::Expired);
                }
            }
            if let Some(nbf) = json::int_value(&jwt.grants, "nbf") {
                if self.now < nbf {
                    return Err(ValidationError::NotMature);
                }
            }
        }

        for claim in [ReplicatedClaim::Issuer, ReplicatedClaim::Subject] {
            let header = json::str_value(&jwt.headers, claim.name());
            let grant = json::str_value(&jwt.grants, claim.name());
            if let (Some(header), Some(grant)) = (header, grant) {
                if header != grant {
                    return Err(ValidationError::HeaderMismatch(claim));
                }
            }
        }

        // `aud` may be a string or an array; compare structurally.
        let audience = ReplicatedClaim::Audience;
        if let (Some(header), Some(grant)) = (
            jwt.headers.get(audience.name()),
            jwt.grants.get(audience.name()),
        ) {
            if header != grant {
                return Err(ValidationError::HeaderMismatch(audience));
            }
        }

        for (name, expected) in &self.req_grants {
            match jwt.grants.get(name) {
                None => return Err(ValidationError::GrantMissing(name.clone())),
                Some(actual) if actual != expected => {
                    return Err(ValidationError::GrantMismatch(name.clone()));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn status_is_replaced_on_every_call() {
        let mut validator = Validator::new(Algorithm::None);
        assert_eq!(validator.status(), None);

        assert_matches!(
            validator.validate(None),
            Err(ValidationError::InvalidToken)
        );
        assert_eq!(validator.status(), Some("Invalid JWT"));

        let jwt = Jwt::new();
        validator.validate(Some(&jwt)).unwrap();
        assert_eq!(validator.status(), Some("Valid JWT"));
    }

    #[test]
    fn required_grants_mirror_the_token_accessors() {
        let mut validator = Validator::new(Algorithm::None);
        validator.add_grant("role", "admin").unwrap();
        validator.add_grant_int("level", 3).unwrap();
        validator.add_grant_bool("active", true).unwrap();

        assert_eq!(validator.add_grant("role", "user").unwrap_err(), Error::Exists);
        assert_eq!(validator.grant("role").unwrap(), "admin");
        assert_eq!(validator.grant_int("level").unwrap(), 3);
        assert!(validator.grant_bool("active").unwrap());
        assert_eq!(
            validator.grants_json(None).unwrap(),
            r#"{"active":true,"level":3,"role":"admin"}"#
        );

        validator.del_grants(Some("level"));
        assert_eq!(validator.grant_int("level").unwrap_err(), Error::NotPresent);
        validator.del_grants(None);
        assert_eq!(validator.grants_json(None).unwrap(), "{}");
    }

    #[test]
    fn time_checks_are_disabled_by_default() {
        let mut jwt = Jwt::new();
        jwt.add_grant_int("exp", 1_000).unwrap();

        let mut validator = Validator::new(Algorithm::None);
        validator.validate(Some(&jwt)).unwrap();

        validator.set_now(2_000);
        assert_matches!(validator.validate(Some(&jwt)), Err(ValidationError::Expired));
    }

    #[test]
    fn non_integer_time_grants_are_ignored() {
        let mut jwt = Jwt::new();
        jwt.add_grant("exp", "1000").unwrap();
        jwt.add_grant("nbf", "9999999999").unwrap();

        let mut validator = Validator::new(Algorithm::None);
        validator.set_now(2_000);
        validator.validate(Some(&jwt)).unwrap();
    }

    #[test]
    fn hdr_selector_has_no_observable_effect() {
        let mut jwt = Jwt::new();
        jwt.add_header("iss", "a").unwrap();
        jwt.add_grant("iss", "b").unwrap();

        for hdr in [false, true] {
            let mut validator = Validator::new(Algorithm::None);
            validator.set_headers(hdr);
            assert_matches!(
                validator.validate(Some(&jwt)),
                Err(ValidationError::HeaderMismatch(ReplicatedClaim::Issuer))
            );
        }
    }
}
