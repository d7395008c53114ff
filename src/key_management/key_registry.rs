// ============================================================================
// KeyRegistry — détenteur thread-safe de la paire de clés Paillier
//
// La paire de clés a exactement deux états :
//   Absent : aucune paire chargée — toute opération échoue en UninitializedKey
//   Ready  : paire chargée, immuable — lectures concurrentes illimitées
// Aucune autre transition n'existe (set remplace, clear revient à Absent).
//
// Arc<RwLock<Option<KeyPair>>> :
//   - Arc     : comptage de références atomique → cloneable entre threads
//   - RwLock  : N lecteurs simultanés, un écrivain exclusif — adapté à un
//               serveur où l'écrasante majorité des accès sont des lectures
//               (chiffrement, déchiffrement) et où l'écriture ne survient
//               qu'au chargement ou à la rotation de clé
//   - Option  : distingue Absent de Ready
//
// Verrou empoisonné : l'état protégé est une KeyPair immuable — un panic
// pendant un accès ne peut pas la laisser à moitié écrite. On récupère donc
// le guard via into_inner() au lieu de propager une erreur de verrou.
// ============================================================================

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use crate::paillier::p_keygen::{PublicKey, SecretKey, KeyPair, KeyInfo, KeyStatus};
use crate::crypto_error::CryptoError;

#[derive(Clone, Default)]
pub struct KeyRegistry {
    inner: Arc<RwLock<Option<KeyPair>>>,
}

impl KeyRegistry {
    /// Registre vide, à l'état Absent
    pub fn new() -> Self {
        KeyRegistry {
            inner: Arc::new(RwLock::new(None)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<KeyPair>> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<KeyPair>> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    // -----------------------------------------------------------------------
    // Chargement / rotation — écriture exclusive, quelques microsecondes
    // (simple déplacement de pointeurs)
    // -----------------------------------------------------------------------
    pub fn set_keypair(&self, kp: KeyPair) {
        *self.write() = Some(kp);
    }

    /// Retire la paire (l'ancienne SecretKey est zeroizée via Drop)
    pub fn clear_keypair(&self) {
        *self.write() = None;
    }

    pub fn has_keypair(&self) -> bool {
        self.read().is_some()
    }

    // -----------------------------------------------------------------------
    // Lectures partagées
    // -----------------------------------------------------------------------

    /// Clone de la clé publique — aucune donnée secrète, clonage sans risque
    pub fn public_key(&self) -> Result<PublicKey, CryptoError> {
        self.read()
            .as_ref()
            .map(|kp| kp.public_key.clone())
            .ok_or(CryptoError::UninitializedKey)
    }

    /// Métadonnées de la clé courante ; statut Absent si le registre est vide
    pub fn key_info(&self) -> KeyInfo {
        match self.read().as_ref() {
            Some(kp) => kp.key_info(),
            None => KeyInfo {
                bit_length:   0,
                n_bit_length: 0,
                status:       KeyStatus::Absent,
            },
        }
    }

    // -----------------------------------------------------------------------
    // Pattern « prêter sans cloner » : la clé secrète n'est jamais extraite
    // du registre. Le closure reçoit une référence valide uniquement pendant
    // l'exécution, puis le verrou est relâché — aucun clone de lambda/mu
    // ne se promène dans le heap.
    //
    // Usage typique :
    //   let m = registry.with_secret_key(|pk, sk| p_decrypt(&c, pk, sk))?;
    // -----------------------------------------------------------------------
    pub fn with_secret_key<F, T>(&self, f: F) -> Result<T, CryptoError>
    where
        F: FnOnce(&PublicKey, &SecretKey) -> T,
    {
        self.read()
            .as_ref()
            .map(|kp| f(&kp.public_key, &kp.secret_key))
            .ok_or(CryptoError::UninitializedKey)
    }
}

// ===========================================================================
// Tests unitaires
// ===========================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use num_bigint::BigUint;

    // Paire minimale pour les tests du registre (pas cryptographiquement valide)
    fn dummy_keypair() -> KeyPair {
        let n = BigUint::from(77u32);
        KeyPair {
            bit_length: 8,
            public_key: PublicKey {
                g:         &n + BigUint::from(1u32),
                n_squared: &n * &n,
                n,
            },
            secret_key: SecretKey {
                lambda: BigUint::from(30u32),
                mu:     BigUint::from(18u32),
            },
        }
    }

    #[test]
    fn test_empty_registry_is_uninitialized() {
        let reg = KeyRegistry::new();
        assert_eq!(reg.public_key(), Err(CryptoError::UninitializedKey));
        assert_eq!(reg.key_info().status, KeyStatus::Absent);
        assert!(!reg.has_keypair());
    }

    #[test]
    fn test_set_then_ready() {
        let reg = KeyRegistry::new();
        reg.set_keypair(dummy_keypair());
        assert!(reg.has_keypair());
        assert!(reg.public_key().is_ok());
        assert_eq!(reg.key_info().status, KeyStatus::Ready);
        assert_eq!(reg.key_info().bit_length, 8);
    }

    #[test]
    fn test_clear_returns_to_absent() {
        let reg = KeyRegistry::new();
        reg.set_keypair(dummy_keypair());
        // clear → Drop sur KeyPair → Drop sur SecretKey → Zeroize
        reg.clear_keypair();
        assert_eq!(reg.public_key(), Err(CryptoError::UninitializedKey));
        assert_eq!(reg.key_info().status, KeyStatus::Absent);
    }

    #[test]
    fn test_with_secret_key_on_empty_fails() {
        let reg = KeyRegistry::new();
        let res = reg.with_secret_key(|_, sk| sk.lambda.clone());
        assert_eq!(res, Err(CryptoError::UninitializedKey));
    }

    #[test]
    fn test_concurrent_reads() {
        // N threads lisent simultanément sans deadlock
        let reg = Arc::new(KeyRegistry::new());
        reg.set_keypair(dummy_keypair());

        let handles: Vec<_> = (0..8).map(|_| {
            let r = Arc::clone(&reg);
            thread::spawn(move || {
                for _ in 0..100 {
                    assert!(r.public_key().is_ok());
                }
            })
        }).collect();

        for h in handles { h.join().unwrap(); }
    }
}
