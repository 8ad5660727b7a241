//! Shared client-side fixture for integration tests: generates a real CKKS
//! key pair (the orchestrator only ever sees the public half) and exposes
//! encrypt/decrypt helpers so tests exercise the actual SEAL round trip
//! rather than a mock scorer.

use base64::Engine as _;
use seal_fhe::{
    CKKSEncoder, Ciphertext, CoefficientModulus, Context as SealContext, Decryptor, Encryptor,
    EncryptionParameters, KeyGenerator, SchemeType, SecurityLevel,
};
use ss_core::wire::WireHeContextParams;

pub const POLY_MODULUS_DEGREE: u64 = 8192;
pub const COEFF_MODULUS_BITS: [i32; 4] = [60, 40, 40, 60];
pub const SCALE: f64 = 1_099_511_627_776.0; // 2^40

pub struct ClientFixture {
    context: SealContext,
    encryptor: Encryptor,
    decryptor: Decryptor,
    encoder: CKKSEncoder,
    pub wire_params: WireHeContextParams,
}

pub fn build_client_fixture() -> ClientFixture {
    let mut enc_params = EncryptionParameters::new(SchemeType::CKKS);
    enc_params.set_poly_modulus_degree(POLY_MODULUS_DEGREE).unwrap();
    let coeff_modulus = CoefficientModulus::create(POLY_MODULUS_DEGREE, &COEFF_MODULUS_BITS).unwrap();
    enc_params.set_coefficient_modulus(&coeff_modulus).unwrap();

    let context = SealContext::new(&enc_params, true, SecurityLevel::TC128).unwrap();
    let keygen = KeyGenerator::new(&context).unwrap();
    let secret_key = keygen.secret_key();
    let public_key = keygen.create_public_key();
    let galois_keys = keygen.create_galois_keys().unwrap();

    let encryptor = Encryptor::with_public_key(&context, &public_key).unwrap();
    let decryptor = Decryptor::new(&context, &secret_key).unwrap();
    let encoder = CKKSEncoder::new(&context, POLY_MODULUS_DEGREE).unwrap();

    let wire_params = WireHeContextParams {
        scheme: "CKKS".to_string(),
        poly_modulus_degree: POLY_MODULUS_DEGREE,
        scale: SCALE,
        public_key_base64: base64::engine::general_purpose::STANDARD
            .encode(public_key.as_bytes().unwrap()),
        galois_keys_base64: base64::engine::general_purpose::STANDARD
            .encode(galois_keys.as_bytes().unwrap()),
    };

    ClientFixture {
        context,
        encryptor,
        decryptor,
        encoder,
        wire_params,
    }
}

impl ClientFixture {
    /// Normalize `v` to unit length, encrypt it, and base64-encode the
    /// ciphertext the way a real client submits `add`/`search` payloads.
    pub fn encrypt_vector(&self, v: &[f64]) -> String {
        let norm: f64 = v.iter().map(|x| x * x).sum::<f64>().sqrt();
        let normalized: Vec<f64> = v.iter().map(|x| x / norm).collect();
        let plaintext = self.encoder.encode_f64(&normalized, SCALE).unwrap();
        let ciphertext = self.encryptor.encrypt(&plaintext).unwrap();
        base64::engine::general_purpose::STANDARD.encode(ciphertext.to_bytes().unwrap())
    }

    /// Decrypt an `encrypted_similarity_base64` payload back to the dot
    /// product value every slot carries after the rotate-sum reduction.
    pub fn decrypt_score(&self, encrypted_similarity_base64: &str) -> f64 {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encrypted_similarity_base64)
            .unwrap();
        let ciphertext = Ciphertext::from_bytes(&self.context, &bytes).unwrap();
        let plaintext = self.decryptor.decrypt(&ciphertext).unwrap();
        let decoded = self.encoder.decode_f64(&plaintext).unwrap();
        decoded[0]
    }
}
