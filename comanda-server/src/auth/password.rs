//! 密码哈希
//!
//! Stored hashes are the hex SHA-512 of the password followed by the email.
//! The concatenation order is fixed: changing it would invalidate every
//! stored hash.

use sha2::{Digest, Sha512};

/// Hex SHA-512 of `senha || email`
pub fn hash_password(email: &str, senha: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(senha.as_bytes());
    hasher.update(email.as_bytes());
    hex::encode(hasher.finalize())
}

/// Recompute and compare against a stored hash
pub fn verify_password(email: &str, senha: &str, stored: &str) -> bool {
    hash_password(email, senha) == stored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_hash() {
        assert_eq!(
            hash_password("ana@example.com", "segredo123"),
            "1b39207e542f45f9c9bbeadd16c5ca875e3fcdc308463add76f90190b42f4868\
             d7c76080a01d1cae6bbf3c2622ebc807ef218ea8255fbad63032317408a9f4af"
        );
    }

    #[test]
    fn test_email_is_part_of_the_hash() {
        let a = hash_password("ana@example.com", "segredo123");
        let b = hash_password("bia@example.com", "segredo123");
        assert_ne!(a, b);
        assert_eq!(a.len(), 128);
    }

    #[test]
    fn test_verify() {
        let stored = hash_password("bia@example.com", "outraSenha");
        assert!(verify_password("bia@example.com", "outraSenha", &stored));
        assert!(!verify_password("bia@example.com", "outrasenha", &stored));
        assert!(!verify_password("ana@example.com", "outraSenha", &stored));
    }
}
