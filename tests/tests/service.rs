//! End-to-end behaviour of the encryption service

use std::sync::Arc;
use std::thread;

use kyberlink_kem::{AcceleratorKind, KemService, KeyStore, MessageCipher, ServiceConfig};
use kyberlink_params::codec::DECRYPTION_FAILED;
use kyberlink_tests::{config_in, scratch_dir, seeded_rng};

#[test]
fn test_hello_round_trip() {
    let dir = scratch_dir("hello");
    let service = KemService::with_rng(config_in(&dir, AcceleratorKind::Simulated), seeded_rng(1)).unwrap();
    let wire = service.encrypt("Hello Kyber!");
    assert_ne!(wire, "Hello Kyber!");
    assert_eq!(service.decrypt(&wire), "Hello Kyber!");
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_wire_shape() {
    let dir = scratch_dir("wire");
    let service = KemService::with_rng(config_in(&dir, AcceleratorKind::Software), seeded_rng(2)).unwrap();
    let wire = service.encrypt("shape");
    let value: serde_json::Value = serde_json::from_str(&wire).unwrap();
    assert_eq!(value["u"].as_array().unwrap().len(), 256);
    assert_eq!(value["v"].as_array().unwrap().len(), 256);
    assert_eq!(value["is_encrypted"], serde_json::Value::Bool(true));
    assert!(value["u"]
        .as_array()
        .unwrap()
        .iter()
        .all(|c| (0..3329).contains(&c.as_i64().unwrap())));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_keys_persist_across_instances() {
    let dir = scratch_dir("persist");
    let config = config_in(&dir, AcceleratorKind::Software);

    let first = KemService::with_rng(config.clone(), seeded_rng(3)).unwrap();
    let wire = first.encrypt("survives a restart");
    let public = first.public_key().unwrap();
    drop(first);

    let stored = KeyStore::new(&config.key_path).load().unwrap().unwrap();
    assert_eq!(stored.public, public);

    let second = KemService::with_rng(config, seeded_rng(4)).unwrap();
    assert_eq!(second.public_key().unwrap(), public);
    assert_eq!(second.decrypt(&wire), "survives a restart");
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_keygen_replaces_keys() {
    let dir = scratch_dir("rekey");
    let service = KemService::with_rng(config_in(&dir, AcceleratorKind::Simulated), seeded_rng(5)).unwrap();
    let old = service.public_key().unwrap();
    let new = service.keygen().unwrap();
    assert_ne!(old, new);
    let stored = KeyStore::new(&service.config().key_path).load().unwrap().unwrap();
    assert_eq!(stored.public, new);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_plaintext_passes_through() {
    let dir = scratch_dir("passthrough");
    let service = KemService::with_rng(config_in(&dir, AcceleratorKind::Software), seeded_rng(6)).unwrap();
    assert_eq!(service.decrypt("just a note"), "just a note");
    assert_eq!(service.decrypt(r#"{"u":[1,2,3],"v":[4]}"#), r#"{"u":[1,2,3],"v":[4]}"#);
    assert_eq!(service.decrypt(""), "");
    assert_ne!(service.decrypt("x"), DECRYPTION_FAILED);
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_config_from_toml_drives_service() {
    let dir = scratch_dir("toml");
    let key_path = dir.join("keys").join("k.json");
    let text = format!(
        "key_path = {:?}\naccelerator = \"software\"\nparity_checks = false\n\n[poll]\nbudget_cycles = 1000\n",
        key_path.display().to_string()
    );
    let config = ServiceConfig::from_toml_str(&text).unwrap();
    assert_eq!(config.accelerator, AcceleratorKind::Software);
    assert!(!config.parity_checks);
    assert_eq!(config.poll.budget_cycles, 1000);

    let service = KemService::with_rng(config, seeded_rng(7)).unwrap();
    assert_eq!(service.accelerator_name(), "software");
    assert!(key_path.exists());
    let wire = service.encrypt("configured");
    assert_eq!(service.decrypt(&wire), "configured");
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_shared_across_threads() {
    let dir = scratch_dir("threads");
    let service = Arc::new(
        KemService::with_rng(config_in(&dir, AcceleratorKind::Simulated), seeded_rng(8)).unwrap(),
    );
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let service = Arc::clone(&service);
            thread::spawn(move || {
                let text = format!("thread {}", i);
                let wire = service.encrypt(&text);
                assert_eq!(service.decrypt(&wire), text);
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    std::fs::remove_dir_all(&dir).unwrap();
}
