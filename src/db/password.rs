//! Contraseñas con sal.
//!
//! Formato almacenado: `sha256$<sal hex>$<resumen hex>`, con una sal
//! aleatoria de 16 bytes. Los valores sin el prefijo son contraseñas en
//! claro de ficheros antiguos y se comparan tal cual; no se reescriben.

use sha2::{Digest, Sha256};

const SCHEME: &str = "sha256";
const SCHEME_PREFIX: &str = "sha256$";
const SALT_BYTES: usize = 16;
const DIGEST_BYTES: usize = 32;

/// Genera el valor a guardar para una contraseña nueva
pub fn hash_password(password: &str) -> String {
    let salt: [u8; SALT_BYTES] = rand::random();
    format!(
        "{SCHEME}${}${}",
        hex::encode(salt),
        hex::encode(digest(&salt, password))
    )
}

/// Comprueba `candidate` contra el valor guardado
pub fn verify_password(stored: &str, candidate: &str) -> bool {
    match parse(stored) {
        Some((salt, expected)) => digests_match(&digest(&salt, candidate), &expected),
        // Un valor con el prefijo pero mal formado no autentica nunca
        None if stored.starts_with(SCHEME_PREFIX) => false,
        None => stored == candidate,
    }
}

fn digest(salt: &[u8], password: &str) -> [u8; DIGEST_BYTES] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

/// Compara todos los bytes sin salir al primer fallo
fn digests_match(a: &[u8; DIGEST_BYTES], b: &[u8; DIGEST_BYTES]) -> bool {
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

fn parse(stored: &str) -> Option<(Vec<u8>, [u8; DIGEST_BYTES])> {
    let rest = stored.strip_prefix(SCHEME_PREFIX)?;
    let (salt, hash) = rest.split_once('$')?;
    let salt = hex::decode(salt).ok()?;
    let mut expected = [0u8; DIGEST_BYTES];
    hex::decode_to_slice(hash, &mut expected).ok()?;
    Some((salt, expected))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashed_password_verifies() {
        let stored = hash_password("x1");
        assert!(stored.starts_with("sha256$"));
        assert!(!stored.contains("x1"));
        assert!(verify_password(&stored, "x1"));
    }

    #[test]
    fn wrong_or_empty_password_fails() {
        let stored = hash_password("x1");
        assert!(!verify_password(&stored, "X1"));
        assert!(!verify_password(&stored, ""));
        assert!(!verify_password(&stored, "x1 "));
    }

    #[test]
    fn same_password_gets_different_salts() {
        assert_ne!(hash_password("secret"), hash_password("secret"));
    }

    #[test]
    fn digest_comparison_checks_every_byte() {
        let base = digest(b"salt", "x1");
        assert!(digests_match(&base, &base));
        for idx in [0, DIGEST_BYTES / 2, DIGEST_BYTES - 1] {
            let mut changed = base;
            changed[idx] ^= 0x01;
            assert!(!digests_match(&base, &changed));
        }
    }

    #[test]
    fn truncated_hash_never_verifies() {
        let stored = hash_password("x1");
        let truncated = &stored[..stored.len() - 2];
        assert!(!verify_password(truncated, "x1"));
        assert!(!verify_password(truncated, truncated));
    }

    #[test]
    fn legacy_plaintext_compares_exactly() {
        assert!(verify_password("hola", "hola"));
        assert!(!verify_password("hola", "Hola"));
        assert!(!verify_password("hola", ""));
    }
}
