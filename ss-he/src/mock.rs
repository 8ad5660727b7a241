//! Test-only stand-in for `HeContext` so tests exercising orchestrator
//! plumbing or LSH bucket math don't pay SEAL's setup cost. Never built
//! outside `#[cfg(test)]`; no production code path can reach this type.

use base64::Engine as _;

/// A "ciphertext" that is really just a base64-wrapped plaintext f32
/// vector. Dot products are computed directly, in the clear. Exists
/// solely to let tests assert on orchestration behavior without a real
/// HE context.
pub struct MockCipher;

impl MockCipher {
    pub fn encrypt(vector: &[f32]) -> String {
        let bytes: Vec<u8> = vector.iter().flat_map(|f| f.to_le_bytes()).collect();
        base64::engine::general_purpose::STANDARD.encode(bytes)
    }

    pub fn decrypt(payload: &str) -> Vec<f32> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .expect("mock ciphertext must be valid base64 in tests");
        bytes
            .chunks_exact(4)
            .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect()
    }

    pub fn inner_product(query: &str, stored: &str) -> f32 {
        let q = Self::decrypt(query);
        let s = Self::decrypt(stored);
        q.iter().zip(s.iter()).map(|(a, b)| a * b).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypt_decrypt_roundtrip() {
        let v = vec![1.0_f32, -2.5, 3.25];
        let ct = MockCipher::encrypt(&v);
        assert_eq!(MockCipher::decrypt(&ct), v);
    }

    #[test]
    fn inner_product_matches_plaintext_dot() {
        let a = vec![1.0_f32, 2.0, 3.0];
        let b = vec![4.0_f32, 5.0, 6.0];
        let ct_a = MockCipher::encrypt(&a);
        let ct_b = MockCipher::encrypt(&b);
        assert_eq!(MockCipher::inner_product(&ct_a, &ct_b), 32.0);
    }
}
