//! Key generation and string encryption properties.

use cloak_rsa::arith::{gcd, is_prime};
use cloak_rsa::{BigUint, KeyGenConfig, RsaCipher, RsaError};
use num_traits::One;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn generate(seed: u64) -> RsaCipher {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    RsaCipher::generate(&mut rng, &KeyGenConfig::default()).expect("key generation")
}

#[test]
fn generated_keys_satisfy_invariants() {
    for seed in 0..50 {
        let rsa = generate(seed);
        let keys = rsa.key_material();
        assert!(is_prime(keys.p()) && is_prime(keys.q()));
        assert_ne!(keys.p(), keys.q());
        assert!(keys.p() >= &BigUint::from(100u32) && keys.p() <= &BigUint::from(199u32));
        assert_eq!(keys.n(), &(keys.p() * keys.q()));
        assert!(gcd(keys.e(), keys.r()).is_one());
        assert!(((keys.e() * keys.d()) % keys.r()).is_one());
    }
}

#[test]
fn public_exponent_is_smallest_candidate() {
    for seed in 0..20 {
        let rsa = generate(seed);
        let keys = rsa.key_material();
        let mut candidate = BigUint::from(3u32);
        while &candidate < keys.e() {
            assert!(!gcd(&candidate, keys.r()).is_one());
            candidate += BigUint::one();
        }
    }
}

#[test]
fn same_seed_same_keys() {
    assert_eq!(generate(9).key_material(), generate(9).key_material());
}

#[test]
fn os_seeded_constructor_works() {
    let rsa = RsaCipher::new().expect("default range always has primes");
    let ct = rsa.encrypt_string(b"entropy");
    assert_eq!(rsa.decrypt_string(&ct).unwrap(), b"entropy");
}

#[test]
fn all_bytes_round_trip_for_fresh_keys() {
    for seed in 100..110 {
        let rsa = generate(seed);
        for m in 0..=255u32 {
            let m = BigUint::from(m);
            let c = rsa.encrypt_int(&m);
            assert!(&c < rsa.key_material().n());
            assert_eq!(rsa.decrypt_int(&c), m);
        }
    }
}

#[test]
fn printable_ascii_strings_round_trip() {
    let mut rng = ChaCha20Rng::seed_from_u64(0xa5c11);
    let rsa = generate(1);
    for len in [0usize, 1, 2, 17, 64, 128, 200] {
        let text: String = (0..len)
            .map(|_| char::from(rng.gen_range(0x20u8..=0x7e)))
            .collect();
        let ct = rsa.encrypt_str(&text);
        assert_eq!(ct.len(), text.len());
        assert_eq!(rsa.decrypt_to_string(&ct).unwrap(), text);
    }
}

#[test]
fn foreign_key_ciphertext_is_detected() {
    let sender = RsaCipher::from_primes(101, 103).unwrap();
    let receiver = RsaCipher::from_primes(107, 109).unwrap();
    let message: Vec<u8> = (0..=255u8).collect();
    let ct = sender.encrypt_string(&message);
    assert!(matches!(
        receiver.decrypt_string(&ct),
        Err(RsaError::OutOfRangeDecryption { .. })
    ));
}

#[test]
fn foreign_key_detected_across_trials() {
    let message = b"The quick brown fox jumps over the lazy dog";
    let mut detected = 0;
    let mut trials = 0;
    for seed in 0..30u64 {
        let sender = generate(seed * 2);
        let receiver = generate(seed * 2 + 1);
        if sender.key_material().n() == receiver.key_material().n() {
            continue;
        }
        trials += 1;
        if receiver.decrypt_string(&sender.encrypt_string(message)).is_err() {
            detected += 1;
        }
    }
    assert!(trials > 0);
    assert_eq!(detected, trials);
}

#[test]
fn wider_primes_from_config() {
    let mut rng = ChaCha20Rng::seed_from_u64(77);
    let config = KeyGenConfig::with_prime_bits(24).unwrap();
    let rsa = RsaCipher::generate(&mut rng, &config).unwrap();
    let keys = rsa.key_material();
    assert!(keys.n().bits() > 40);
    let ct = rsa.encrypt_str("wide modulus");
    assert_eq!(rsa.decrypt_to_string(&ct).unwrap(), "wide modulus");
}

#[test]
fn unusable_range_fails_generation() {
    let mut rng = ChaCha20Rng::seed_from_u64(5);
    let single_prime = KeyGenConfig::default()
        .prime_range(126..=130)
        .max_attempts(500);
    assert!(matches!(
        RsaCipher::generate(&mut rng, &single_prime),
        Err(RsaError::KeyGenerationFailure(_))
    ));

    let tiny = KeyGenConfig::default().prime_range(2..=13).max_attempts(500);
    assert!(matches!(
        RsaCipher::generate(&mut rng, &tiny),
        Err(RsaError::KeyGenerationFailure(_))
    ));
}

#[test]
fn small_primes_with_sparse_partners_always_generate() {
    // 2 has no partner in range (2 * 127 = 254); 3 needs one above 85.
    let config = KeyGenConfig::default().prime_range(2..=127);
    for seed in 0..300 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let rsa = RsaCipher::generate(&mut rng, &config)
            .unwrap_or_else(|err| panic!("seed {seed}: {err}"));
        let keys = rsa.key_material();
        assert_ne!(keys.p(), keys.q());
        assert!(keys.n() > &BigUint::from(255u32), "seed {seed}");
        assert_eq!(rsa.decrypt_string(&rsa.encrypt_string(b"\x00\xff")).unwrap(), b"\x00\xff");
    }
    assert!(RsaCipher::from_primes(3, 127).is_ok());
    assert!(RsaCipher::from_primes(2, 127).is_err());
}
