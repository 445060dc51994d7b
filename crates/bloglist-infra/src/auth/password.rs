//! Argon2 password hashing implementation.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use bloglist_core::ports::{AuthError, PasswordService};

/// Argon2id password service. Hashes are PHC strings, so a service built
/// with one cost verifies hashes produced under any other.
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Argon2id with explicit memory (KiB), iteration and lane costs.
    pub fn with_cost(memory_kib: u32, iterations: u32, lanes: u32) -> Result<Self, AuthError> {
        let params = Params::new(memory_kib, iterations, lanes, None)
            .map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

        match self
            .argon2
            .verify_password(password.as_bytes(), &parsed_hash)
        {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::HashingError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap() -> Argon2PasswordService {
        Argon2PasswordService::with_cost(1024, 1, 1).unwrap()
    }

    #[test]
    fn test_hash_and_verify() {
        let service = cheap();

        let hash = service.hash("sekret").unwrap();
        assert!(service.verify("sekret", &hash).unwrap());
        assert!(!service.verify("wrong", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let service = cheap();

        let first = service.hash("sekret").unwrap();
        let second = service.hash("sekret").unwrap();

        assert_ne!(first, second);
        assert!(!first.contains("sekret"));
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        let service = cheap();
        let result = service.verify("sekret", "not-a-phc-string");

        assert!(matches!(result, Err(AuthError::HashingError(_))));
    }

    #[test]
    fn test_cost_is_recorded_in_the_hash() {
        let hash = cheap().hash("sekret").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hash.contains("m=1024,t=1,p=1"));
        assert!(Argon2PasswordService::new().verify("sekret", &hash).unwrap());
    }

    #[test]
    fn test_invalid_cost_is_rejected() {
        let result = Argon2PasswordService::with_cost(1024, 0, 1);
        assert!(matches!(result, Err(AuthError::HashingError(_))));
    }
}
