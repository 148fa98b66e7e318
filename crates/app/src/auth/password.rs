//! Password digest helpers.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use sha2::{Digest, Sha256};

/// Digest a password for storage.
#[must_use]
pub(crate) fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());

    STANDARD.encode(digest)
}

/// Check a candidate password against a stored digest.
#[must_use]
pub(crate) fn verify_password(password: &str, stored_hash: &str) -> bool {
    hash_password(password) == stored_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_is_deterministic() {
        assert_eq!(hash_password("secret"), hash_password("secret"));
    }

    #[test]
    fn verify_accepts_the_original_password() {
        let stored = hash_password("secret");

        assert!(verify_password("secret", &stored));
    }

    #[test]
    fn verify_rejects_a_different_password() {
        let stored = hash_password("secret");

        assert!(!verify_password("Secret", &stored));
        assert!(!verify_password("", &stored));
    }
}
