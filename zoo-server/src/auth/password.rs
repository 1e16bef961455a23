//! Password hashing (Argon2id, PHC strings)

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Stored for accounts created without a password; never verifies
pub const UNUSABLE_PASSWORD: &str = "!";

pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(password_hash.to_string())
}

/// Throwaway hash verified when there is no real one to check
static DUMMY_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password("zoo-server-dummy-password").unwrap_or_default());

fn argon2_matches(password: &str, parsed: &PasswordHash<'_>) -> bool {
    Argon2::default()
        .verify_password(password.as_bytes(), parsed)
        .is_ok()
}

/// Check `password` against a stored PHC string.
///
/// Unparseable hashes (including [`UNUSABLE_PASSWORD`]) never match, but
/// still cost one full Argon2 verification.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => argon2_matches(password, &parsed),
        Err(_) => {
            verify_dummy(password);
            false
        }
    }
}

/// Spend one Argon2 verification without any account to check against
///
/// Login calls this for unknown emails so that they take as long as a
/// wrong password.
pub fn verify_dummy(password: &str) {
    if let Ok(parsed) = PasswordHash::new(&DUMMY_HASH) {
        let _ = argon2_matches(password, &parsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("secret5").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("secret5", &hash));
        assert!(!verify_password("secret6", &hash));
    }

    #[test]
    fn test_dummy_hash_is_a_real_argon2_hash() {
        let parsed = PasswordHash::new(&DUMMY_HASH).unwrap();
        assert_eq!(parsed.algorithm.as_str(), "argon2id");
        verify_dummy("secret5");
    }

    #[test]
    fn test_unusable_password_never_matches() {
        assert!(!verify_password("", UNUSABLE_PASSWORD));
        assert!(!verify_password("!", UNUSABLE_PASSWORD));
    }
}
