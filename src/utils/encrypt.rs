use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::error::{PortalError, Result};

// Fixed cost for every admin password: 4 MiB of memory, 3 passes, 1 lane.
const MEMORY_KIB: u32 = 4096;
const ITERATIONS: u32 = 3;
const LANES: u32 = 1;

fn hasher(secret: &str) -> Result<Argon2<'_>> {
    let params = Params::new(MEMORY_KIB, ITERATIONS, LANES, None)
        .map_err(|e| PortalError::Hash(e.to_string()))?;
    Argon2::new_with_secret(secret.as_bytes(), Algorithm::Argon2id, Version::V0x13, params)
        .map_err(|e| PortalError::Hash(e.to_string()))
}

/// Hashes `password` into a PHC string keyed with the server-side secret.
pub fn hash_password(password: &str, secret: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher(secret)?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PortalError::Hash(e.to_string()))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str, secret: &str) -> Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| PortalError::Hash(e.to_string()))?;
    match hasher(secret)?.verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PortalError::Hash(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_only_the_original_password() {
        let hash = hash_password("hunter42", "pepper").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("hunter42", &hash, "pepper").unwrap());
        assert!(!verify_password("hunter43", &hash, "pepper").unwrap());
    }

    #[test]
    fn hash_is_bound_to_the_secret() {
        let hash = hash_password("hunter42", "pepper").unwrap();
        assert!(!verify_password("hunter42", &hash, "salt").unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let first = hash_password("hunter42", "pepper").unwrap();
        let second = hash_password("hunter42", "pepper").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("hunter42", "not-a-hash", "pepper").is_err());
    }
}
