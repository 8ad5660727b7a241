//! These tests play the role of a client: generating a full CKKS key
//! pair (including the secret key) to produce realistic public
//! parameters, then handing only the public half to `HeContext`, which
//! is the boundary this crate actually enforces in production.

use seal_fhe::{
    CKKSEncoder, CoefficientModulus, Context as SealContext, Decryptor, Encryptor,
    EncryptionParameters, KeyGenerator, SchemeType, SecurityLevel,
};
use ss_core::models::HeContextParams;

const POLY_MODULUS_DEGREE: u64 = 8192;
const COEFF_MODULUS_BITS: [i32; 4] = [60, 40, 40, 60];
const SCALE: f64 = 1_099_511_627_776.0; // 2^40

struct ClientFixture {
    context: SealContext,
    encryptor: Encryptor,
    decryptor: Decryptor,
    encoder: CKKSEncoder,
    params: HeContextParams,
}

fn build_client_fixture(tenant_id: &str) -> ClientFixture {
    let mut enc_params = EncryptionParameters::new(SchemeType::CKKS);
    enc_params.set_poly_modulus_degree(POLY_MODULUS_DEGREE).unwrap();
    let coeff_modulus =
        CoefficientModulus::create(POLY_MODULUS_DEGREE, &COEFF_MODULUS_BITS).unwrap();
    enc_params.set_coefficient_modulus(&coeff_modulus).unwrap();

    let context = SealContext::new(&enc_params, true, SecurityLevel::TC128).unwrap();
    let keygen = KeyGenerator::new(&context).unwrap();
    let secret_key = keygen.secret_key();
    let public_key = keygen.create_public_key();
    let galois_keys = keygen.create_galois_keys().unwrap();

    let encryptor = Encryptor::with_public_key(&context, &public_key).unwrap();
    let decryptor = Decryptor::new(&context, &secret_key).unwrap();
    let encoder = CKKSEncoder::new(&context, POLY_MODULUS_DEGREE).unwrap();

    let params = HeContextParams {
        tenant_id: tenant_id.into(),
        poly_modulus_degree: POLY_MODULUS_DEGREE,
        coeff_modulus_bits: COEFF_MODULUS_BITS.to_vec(),
        scale: SCALE,
        public_key_bytes: public_key.as_bytes().unwrap(),
        galois_key_bytes: galois_keys.as_bytes().unwrap(),
    };

    ClientFixture {
        context,
        encryptor,
        decryptor,
        encoder,
        params,
    }
}

#[test]
fn context_create_rejects_empty_public_key_bytes() {
    let mut params = build_client_fixture("tenant-empty").params;
    params.public_key_bytes.clear();
    let result = ss_he::HeContext::create(&params);
    assert!(result.is_err());
}

#[test]
fn context_create_succeeds_from_public_params_only() {
    let fixture = build_client_fixture("tenant-ctx");
    let context = ss_he::HeContext::create(&fixture.params).unwrap();
    assert_eq!(context.tenant_id(), "tenant-ctx");
}

#[test]
fn inner_product_recovers_the_plaintext_dot_product() {
    let fixture = build_client_fixture("tenant-dot");
    let query = vec![1.0_f64, 2.0, 3.0, 0.0];
    let stored = vec![4.0_f64, 5.0, 6.0, 0.0];
    let expected_dot: f64 = query.iter().zip(stored.iter()).map(|(a, b)| a * b).sum();

    let query_pt = fixture.encoder.encode_f64(&query, SCALE).unwrap();
    let stored_pt = fixture.encoder.encode_f64(&stored, SCALE).unwrap();
    let query_ct = fixture.encryptor.encrypt(&query_pt).unwrap();
    let stored_ct = fixture.encryptor.encrypt(&stored_pt).unwrap();

    let context = ss_he::HeContext::create(&fixture.params).unwrap();
    let score_bytes = context.inner_product(&query_ct, &stored_ct).unwrap();

    let score_ct = context.deserialize_ciphertext(&score_bytes).unwrap();
    let score_pt = fixture.decryptor.decrypt(&score_ct).unwrap();
    let decoded = fixture.encoder.decode_f64(&score_pt).unwrap();

    // every slot after the rotate-sum reduction holds the same total
    assert!((decoded[0] - expected_dot).abs() < 1e-2);
}
