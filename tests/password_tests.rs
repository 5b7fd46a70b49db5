//! 密码哈希集成测试
//!
//! 测试 Argon2id 哈希与验证

use security_core::PasswordHasher;

/// 低成本参数，加速测试
fn create_test_hasher() -> PasswordHasher {
    PasswordHasher::with_params(64, 1, 1).unwrap()
}

#[test]
fn test_hash_and_verify_roundtrip() {
    let hasher = create_test_hasher();

    let hash = hasher.hash("CorrectHorseBatteryStaple1!").unwrap();
    assert!(hasher.verify("CorrectHorseBatteryStaple1!", &hash));
    assert!(!hasher.verify("WrongPassword", &hash));
}

#[test]
fn test_salted_hashes_differ_but_both_verify() {
    let hasher = create_test_hasher();
    let password = "CorrectHorseBatteryStaple1!";

    let hash1 = hasher.hash(password).unwrap();
    let hash2 = hasher.hash(password).unwrap();

    assert_ne!(hash1, hash2);
    assert!(hasher.verify(password, &hash1));
    assert!(hasher.verify(password, &hash2));
}

#[test]
fn test_malformed_stored_hash_is_non_match() {
    let hasher = create_test_hasher();

    assert!(!hasher.verify("password", "$argon2id$corrupted"));
    assert!(!hasher.verify("password", "plain-sha-digest"));
    assert!(!hasher.verify("password", ""));
}

#[test]
fn test_default_hasher_produces_phc_format() {
    // Default (production-cost) parameters; one hash is enough here
    let hasher = PasswordHasher::new();
    let hash = hasher.hash("TestPassword123!").unwrap();

    assert!(hash.starts_with("$argon2id$"));
    assert!(hasher.verify("TestPassword123!", &hash));
}
