//! The encryption service object
//!
//! One [`KemService`] is built by the application's composition root and
//! shared by `Arc`. It owns the key material, a CSPRNG and the parity
//! accelerator behind one mutex, so keygen, encrypt and decrypt are
//! serialized.
//!
//! `encrypt` and `decrypt` never fail towards the caller:
//! - encryption failure returns the plaintext (logged at `error`);
//! - input that is not a ciphertext is returned unchanged;
//! - decryption failure returns [`DECRYPTION_FAILED`].

use std::sync::{Mutex, MutexGuard};

use kyberlink_algorithms::Polynomial;
use kyberlink_hardware::{mismatches, Accelerator, HardwareBridge, SimulatedCore, SoftwareAccelerator};
use kyberlink_params::codec::DECRYPTION_FAILED;
use kyberlink_params::registers::KEYGEN_SEED;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, error, info, warn};

use crate::ciphertext::Ciphertext;
use crate::config::{AcceleratorKind, ServiceConfig};
use crate::error::{Error, Result};
use crate::keys::{KeyMaterial, KeyStore};
use crate::scheme::{self, Ephemeral};
use crate::traits::MessageCipher;

type BoxedAccelerator = Box<dyn Accelerator + Send>;

struct Inner {
    keys: Option<KeyMaterial>,
    accelerator: BoxedAccelerator,
    rng: ChaCha20Rng,
}

/// Key-owning encryption service
pub struct KemService {
    config: ServiceConfig,
    store: KeyStore,
    inner: Mutex<Inner>,
}

/// Pick the parity accelerator. Missing hardware selects the software path.
fn build_accelerator(config: &ServiceConfig) -> BoxedAccelerator {
    match config.accelerator {
        AcceleratorKind::Software => Box::new(SoftwareAccelerator::new()),
        AcceleratorKind::Simulated => match HardwareBridge::new(SimulatedCore::new(), config.poll) {
            Ok(bridge) => Box::new(bridge),
            Err(e) => {
                warn!(error = %e, "simulated core unavailable; using software path");
                Box::new(SoftwareAccelerator::new())
            }
        },
        AcceleratorKind::Verilator => build_verilator(config),
    }
}

#[cfg(feature = "verilator")]
fn build_verilator(config: &ServiceConfig) -> BoxedAccelerator {
    use kyberlink_hardware::VerilatorBackend;

    match VerilatorBackend::new().and_then(|b| HardwareBridge::new(b, config.poll)) {
        Ok(bridge) => Box::new(bridge),
        Err(e) => {
            warn!(error = %e, "verilator model unavailable; using software path");
            Box::new(SoftwareAccelerator::new())
        }
    }
}

#[cfg(not(feature = "verilator"))]
fn build_verilator(_config: &ServiceConfig) -> BoxedAccelerator {
    warn!("built without the verilator feature; using software path");
    Box::new(SoftwareAccelerator::new())
}

fn log_parity(stage: &'static str, accelerator: &str, count: usize) {
    if count == 0 {
        debug!(stage, accelerator, "parity check passed");
    } else {
        warn!(stage, accelerator, mismatches = count, "parity check found coefficient mismatches");
    }
}

/// Mirror `u = matrix∘r + e1` on the accelerator.
fn parity_encrypt(
    accelerator: &mut dyn Accelerator,
    keys: &KeyMaterial,
    eph: &Ephemeral,
    ct: &Ciphertext,
) -> Result<usize> {
    let hw_u = accelerator.mul_acc(&eph.e1_hat, &keys.matrix, &eph.r_hat)?;
    Ok(mismatches(&hw_u, &ct.u))
}

/// Mirror `secret∘u` and the inverse transform of decryption.
fn parity_decrypt(accelerator: &mut dyn Accelerator, keys: &KeyMaterial, ct: &Ciphertext) -> Result<usize> {
    let sw_su = keys.secret.ntt_mul(&ct.u);
    let hw_su = accelerator.mul_acc(&Polynomial::zero(), &keys.secret, &ct.u)?;
    let hw_m = accelerator.inverse_ntt(&(&ct.v - &hw_su))?;
    let sw_m = scheme::recover_message(keys, ct);
    Ok(mismatches(&hw_su, &sw_su) + mismatches(&hw_m, &sw_m))
}

impl KemService {
    /// Build the service, loading key material or generating and persisting it.
    pub fn open(config: ServiceConfig) -> Result<Self> {
        Self::with_rng(config, ChaCha20Rng::from_entropy())
    }

    /// As [`KemService::open`] with an explicit RNG.
    pub fn with_rng(config: ServiceConfig, rng: ChaCha20Rng) -> Result<Self> {
        let store = KeyStore::new(&config.key_path);
        let accelerator = build_accelerator(&config);
        info!(
            accelerator = accelerator.name(),
            parity_checks = config.parity_checks,
            key_path = %store.path().display(),
            "starting encryption service"
        );
        let keys = store.load()?;
        let service = Self::from_parts(config, store, keys, accelerator, rng);
        let needs_keys = service.lock().keys.is_none();
        if needs_keys {
            info!("no key material found; generating");
            service.keygen()?;
        }
        Ok(service)
    }

    fn from_parts(
        config: ServiceConfig,
        store: KeyStore,
        keys: Option<KeyMaterial>,
        accelerator: BoxedAccelerator,
        rng: ChaCha20Rng,
    ) -> Self {
        Self {
            config,
            store,
            inner: Mutex::new(Inner {
                keys,
                accelerator,
                rng,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("encryption service mutex was poisoned; continuing with recovered state");
            poisoned.into_inner()
        })
    }

    /// Configuration the service was built with
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Name of the parity accelerator in use
    pub fn accelerator_name(&self) -> String {
        self.lock().accelerator.name().to_string()
    }

    /// Generate new key material, replacing the current keys and the key file.
    ///
    /// Also issues the hardware key-generation command for parity; its output
    /// does not influence the keys.
    pub fn keygen(&self) -> Result<Polynomial> {
        let mut guard = self.lock();
        let inner = &mut *guard;
        let keys = scheme::keygen(&mut inner.rng);
        let public = keys.public.clone();
        self.store.save(&keys)?;
        inner.keys = Some(keys);

        match inner.accelerator.keygen(KEYGEN_SEED) {
            Ok(_) => debug!(accelerator = inner.accelerator.name(), "hardware key generation issued"),
            Err(e) => warn!(error = %e, "hardware key generation failed"),
        }
        info!("key material generated");
        Ok(public)
    }

    /// Copy of the public polynomial
    pub fn public_key(&self) -> Result<Polynomial> {
        self.lock()
            .keys
            .as_ref()
            .map(|k| k.public.clone())
            .ok_or(Error::KeyNotInitialized)
    }

    fn try_encrypt(&self, plaintext: &str) -> Result<String> {
        let mut guard = self.lock();
        let inner = &mut *guard;
        let keys = inner.keys.as_ref().ok_or(Error::KeyNotInitialized)?;
        let eph = Ephemeral::sample(&mut inner.rng);
        let ct = scheme::encrypt_with(keys, plaintext, &eph);

        if self.config.parity_checks {
            let name = inner.accelerator.name().to_string();
            match parity_encrypt(inner.accelerator.as_mut(), keys, &eph, &ct) {
                Ok(count) => log_parity("encrypt", &name, count),
                Err(e) => warn!(error = %e, "encrypt parity check failed to run"),
            }
        }
        ct.to_wire()
    }

    fn try_decrypt(&self, ct: &Ciphertext) -> Result<String> {
        let mut guard = self.lock();
        let inner = &mut *guard;
        let keys = inner.keys.as_ref().ok_or(Error::KeyNotInitialized)?;
        let text = scheme::decrypt(keys, ct)?;

        if self.config.parity_checks {
            let name = inner.accelerator.name().to_string();
            match parity_decrypt(inner.accelerator.as_mut(), keys, ct) {
                Ok(count) => log_parity("decrypt", &name, count),
                Err(e) => warn!(error = %e, "decrypt parity check failed to run"),
            }
        }
        Ok(text)
    }
}

impl MessageCipher for KemService {
    fn encrypt(&self, plaintext: &str) -> String {
        match self.try_encrypt(plaintext) {
            Ok(wire) => wire,
            Err(e) => {
                error!(error = %e, "encryption failed; storing message as plaintext");
                plaintext.to_string()
            }
        }
    }

    fn decrypt(&self, ciphertext: &str) -> String {
        if ciphertext.is_empty() {
            return String::new();
        }
        let ct = match Ciphertext::from_wire(ciphertext) {
            Ok(ct) => ct,
            Err(e) => {
                debug!(error = %e, "not a ciphertext; passing through");
                return ciphertext.to_string();
            }
        };
        match self.try_decrypt(&ct) {
            Ok(text) => text,
            Err(e) => {
                error!(error = %e, "decryption failed");
                DECRYPTION_FAILED.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unkeyed() -> KemService {
        KemService::from_parts(
            ServiceConfig::default(),
            KeyStore::new(std::env::temp_dir().join("kyberlink-unused.json")),
            None,
            Box::new(SoftwareAccelerator::new()),
            ChaCha20Rng::seed_from_u64(0),
        )
    }

    fn keyed(parity: bool) -> KemService {
        let mut rng = ChaCha20Rng::seed_from_u64(77);
        let keys = scheme::keygen(&mut rng);
        let config = ServiceConfig {
            parity_checks: parity,
            ..ServiceConfig::default()
        };
        let accelerator = build_accelerator(&config);
        KemService::from_parts(
            config,
            KeyStore::new(std::env::temp_dir().join("kyberlink-unused.json")),
            Some(keys),
            accelerator,
            rng,
        )
    }

    #[test]
    fn test_service_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<KemService>();
    }

    #[test]
    fn test_without_keys_encrypt_returns_plaintext() {
        let svc = unkeyed();
        assert_eq!(svc.encrypt("hi there"), "hi there");
        assert!(matches!(svc.public_key(), Err(Error::KeyNotInitialized)));
    }

    #[test]
    fn test_without_keys_decrypt_returns_sentinel() {
        let svc = unkeyed();
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let keys = scheme::keygen(&mut rng);
        let wire = scheme::encrypt(&keys, "x", &mut rng).to_wire().unwrap();
        assert_eq!(svc.decrypt(&wire), DECRYPTION_FAILED);
    }

    #[test]
    fn test_round_trip_with_parity() {
        let svc = keyed(true);
        assert_eq!(svc.accelerator_name(), "simulated");
        let wire = svc.encrypt("Hello Kyber!");
        assert!(wire.contains("\"is_encrypted\":true"));
        assert_eq!(svc.decrypt(&wire), "Hello Kyber!");
    }

    #[test]
    fn test_parity_helpers_agree_with_software() {
        let mut rng = ChaCha20Rng::seed_from_u64(8);
        let keys = scheme::keygen(&mut rng);
        let eph = Ephemeral::sample(&mut rng);
        let ct = scheme::encrypt_with(&keys, "parity", &eph);
        let mut hw = HardwareBridge::new(SimulatedCore::new(), Default::default()).unwrap();
        assert_eq!(parity_encrypt(&mut hw, &keys, &eph, &ct).unwrap(), 0);
        assert_eq!(parity_decrypt(&mut hw, &keys, &ct).unwrap(), 0);
    }

    #[test]
    fn test_passthrough_and_empty() {
        let svc = keyed(false);
        assert_eq!(svc.decrypt(""), "");
        assert_eq!(svc.decrypt("just a plain string"), "just a plain string");
        assert_eq!(svc.decrypt("{\"u\": [1, 2]}"), "{\"u\": [1, 2]}");
    }

    #[test]
    fn test_message_cut_at_nul() {
        let svc = keyed(false);
        let wire = svc.encrypt("a\0b");
        assert_eq!(svc.decrypt(&wire), "a");
    }
}
