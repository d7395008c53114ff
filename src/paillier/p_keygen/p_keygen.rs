use num_bigint::BigUint;
use num_traits::One;
use zeroize::Zeroize;
use crate::paillier::math::{gcd, lcm, mod_inverse, generate_prime};
use crate::crypto_error::CryptoError;

// Taille minimale du module n en production. En dessous de 512 bits la
// factorisation de n est à la portée d'un poste de travail.
pub const MIN_KEY_BITS: u64 = 512;

// ============================================================================
// Clé publique Paillier — pas de données secrètes, pas de zeroize nécessaire
// ============================================================================
#[derive(Clone, Debug, PartialEq)]
pub struct PublicKey {
    pub n:         BigUint,
    pub g:         BigUint,
    pub n_squared: BigUint,
}

// ============================================================================
// Helper : efface les octets internes d'un BigUint
// ============================================================================
fn zeroize_biguint(n: &mut BigUint) {
    let bits = n.bits() as usize;
    if bits > 0 {
        *n = BigUint::from_bytes_be(&vec![0u8; (bits + 7) / 8]);
    }
    *n = BigUint::default();
}

// ============================================================================
// Clé secrète Paillier — ZEROISÉE À LA DESTRUCTION
// ============================================================================
#[derive(Clone, Debug)]
pub struct SecretKey {
    pub lambda: BigUint,
    pub mu:     BigUint,
}

impl Zeroize for SecretKey {
    fn zeroize(&mut self) {
        zeroize_biguint(&mut self.lambda);
        zeroize_biguint(&mut self.mu);
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

// ============================================================================
// État d'une paire de clés, vu de l'extérieur. Exactement deux états :
// Absent avant génération, Ready après — aucune autre transition.
// ============================================================================
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyStatus {
    Absent,
    Ready,
}

impl std::fmt::Display for KeyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyStatus::Absent => write!(f, "aucune clé générée"),
            KeyStatus::Ready  => write!(f, "prête"),
        }
    }
}

// Métadonnées de clé — lecture pure, aucune donnée secrète
#[derive(Clone, Debug, PartialEq)]
pub struct KeyInfo {
    pub bit_length:   u64,
    pub n_bit_length: u64,
    pub status:       KeyStatus,
}

// ============================================================================
// Paire de clés — immuable une fois construite, partageable en lecture
// entre threads sans verrou (aucune méthode ne mute les champs).
// ============================================================================
#[derive(Clone, Debug)]
pub struct KeyPair {
    pub bit_length: u64,
    pub public_key: PublicKey,
    pub secret_key: SecretKey,
}

impl KeyPair {
    /// Vue publique de la paire — seule partie sûre à diffuser
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Métadonnées de la paire (tailles et état, jamais lambda/mu)
    pub fn key_info(&self) -> KeyInfo {
        KeyInfo {
            bit_length:   self.bit_length,
            n_bit_length: self.public_key.n.bits(),
            status:       KeyStatus::Ready,
        }
    }
}

// ============================================================================
// Génération de clés Paillier
//
// p et q font chacun nbits/2 bits, donc n = p·q fait nbits ou nbits-1 bits.
//
// g = n+1 est le choix canonique : (n+1)^m ≡ 1 + m·n (mod n²) par le binôme
// de Newton (les termes en n² s'annulent), donc L((n+1)^lambda mod n²)
// = lambda mod n et mu = lambda⁻¹ mod n se calcule sans aucun modpow.
// Cela supprime la boucle de recherche aléatoire de g et garantit la
// terminaison du keygen (hors tirage des premiers, plafonné par ailleurs).
// ============================================================================
pub fn p_keygen(nbits: u64) -> Result<KeyPair, CryptoError> {
    if nbits < MIN_KEY_BITS || nbits % 2 != 0 {
        return Err(CryptoError::InvalidKeySize {
            requested: nbits,
            minimum:   MIN_KEY_BITS,
        });
    }

    // Deux premiers distincts de nbits/2 bits chacun
    let p = generate_prime(nbits / 2)?;
    let mut q = generate_prime(nbits / 2)?;
    while p == q {
        q = generate_prime(nbits / 2)?;
    }

    let n         = &p * &q;
    let n_squared = &n * &n;

    let p_minus_1 = &p - BigUint::one();
    let q_minus_1 = &q - BigUint::one();

    let lambda = lcm(&p_minus_1, &q_minus_1)?;

    // Invariant : gcd(lambda, n) = 1 pour deux premiers authentiques de même
    // taille. Un échec ici signale un bug interne, pas une entrée invalide.
    if gcd(&lambda, &n) != BigUint::one() {
        return Err(CryptoError::KeyGenerationFailed);
    }

    let g = &n + BigUint::one();

    // Avec g = n+1 : L(g^lambda mod n²) = lambda mod n, donc
    // mu = lambda⁻¹ mod n directement.
    let mu = mod_inverse(&lambda, &n)
        .map_err(|_| CryptoError::KeyGenerationFailed)?;

    Ok(KeyPair {
        bit_length: nbits,
        public_key: PublicKey { n, g, n_squared },
        secret_key: SecretKey { lambda, mu },
    })
}

// ===========================================================================
// Tests unitaires
// ===========================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::paillier::test_support::test_keypair;

    #[test]
    fn test_keygen_rejects_small_size() {
        assert!(matches!(
            p_keygen(256),
            Err(CryptoError::InvalidKeySize { requested: 256, minimum: MIN_KEY_BITS })
        ));
    }

    #[test]
    fn test_keygen_rejects_odd_size() {
        assert!(matches!(
            p_keygen(513),
            Err(CryptoError::InvalidKeySize { .. })
        ));
    }

    #[test]
    fn test_keygen_invariants() {
        let kp = test_keypair();
        let n      = &kp.public_key.n;
        let lambda = &kp.secret_key.lambda;
        let mu     = &kp.secret_key.mu;

        // g = n+1, n_squared = n·n
        assert_eq!(kp.public_key.g, n + BigUint::one());
        assert_eq!(kp.public_key.n_squared, n * n);

        // gcd(lambda, n) = 1 et lambda·mu ≡ 1 (mod n)
        assert_eq!(gcd(lambda, n), BigUint::one());
        assert_eq!((lambda * mu) % n, BigUint::one());
    }

    #[test]
    fn test_keygen_modulus_size() {
        // Deux premiers de 256 bits → n fait 511 ou 512 bits
        let kp = test_keypair();
        let bits = kp.public_key.n.bits();
        assert!(bits == 512 || bits == 511, "n fait {bits} bits");
    }

    #[test]
    fn test_key_info_ready() {
        let kp = test_keypair();
        let info = kp.key_info();
        assert_eq!(info.bit_length, 512);
        assert_eq!(info.n_bit_length, kp.public_key.n.bits());
        assert_eq!(info.status, KeyStatus::Ready);
    }
}
