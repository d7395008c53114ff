use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand_core::OsRng;
use crate::paillier::p_keygen::PublicKey;
use crate::paillier::math::gcd;
use crate::crypto_error::CryptoError;

// Plafond de tirages du facteur d'aveuglement r. La probabilité que
// gcd(r, n) != 1 pour un r uniforme est ~2/sqrt(n) — inatteignable en
// pratique, mais la boucle ne doit pas pouvoir tourner indéfiniment.
const MAX_BLINDING_ATTEMPTS: u32 = 128;

// ---------------------------------------------------------------------------
// Chiffrement Paillier : c = g^m * r^n  mod n²
//
// Chiffrement probabiliste : chaque appel tire un r frais dans Z*_n via
// OsRng, donc deux chiffrements du même m donnent des chiffrés distincts
// avec une probabilité écrasante (sécurité sémantique).
//
// Retourne Err(MessageOutOfRange) si m >= n. Les messages négatifs sont
// irreprésentables : BigUint est non signé par construction.
// ---------------------------------------------------------------------------
pub fn p_encrypt(m: &BigUint, pk: &PublicKey) -> Result<BigUint, CryptoError> {
    // Validation de l'entrée — erreur récupérable, pas de panic
    if m >= &pk.n {
        return Err(CryptoError::MessageOutOfRange);
    }

    let mut rng = OsRng;

    // Choisit r dans Z*_n : gcd(r, n) = 1 (conformité formelle Paillier)
    let mut r = None;
    for _ in 0..MAX_BLINDING_ATTEMPTS {
        let candidate = rng.gen_biguint_range(&One::one(), &pk.n);
        if gcd(&candidate, &pk.n) == BigUint::one() {
            r = Some(candidate);
            break;
        }
    }
    let r = r.ok_or(CryptoError::BlindingExhausted)?;

    // c = g^m * r^n  mod n²
    let g_m = pk.g.modpow(m, &pk.n_squared);
    let r_n = r.modpow(&pk.n, &pk.n_squared);
    let c = (&g_m * &r_n) % &pk.n_squared;

    Ok(c)
}

// ===========================================================================
// Tests unitaires
// ===========================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use num_traits::Zero;
    use crate::paillier::test_support::test_keypair;
    use crate::paillier::p_decrypt::p_decrypt;

    #[test]
    fn test_roundtrip_42() {
        let kp = test_keypair();
        let c = p_encrypt(&BigUint::from(42u32), &kp.public_key).unwrap();
        let m = p_decrypt(&c, &kp.public_key, &kp.secret_key).unwrap();
        assert_eq!(m, BigUint::from(42u32));
    }

    #[test]
    fn test_boundary_zero_and_n_minus_1() {
        let kp = test_keypair();
        let n_minus_1 = &kp.public_key.n - BigUint::one();

        let c0 = p_encrypt(&BigUint::zero(), &kp.public_key).unwrap();
        assert_eq!(
            p_decrypt(&c0, &kp.public_key, &kp.secret_key).unwrap(),
            BigUint::zero()
        );

        let c1 = p_encrypt(&n_minus_1, &kp.public_key).unwrap();
        assert_eq!(
            p_decrypt(&c1, &kp.public_key, &kp.secret_key).unwrap(),
            n_minus_1
        );
    }

    #[test]
    fn test_message_out_of_range() {
        let kp = test_keypair();
        assert_eq!(
            p_encrypt(&kp.public_key.n, &kp.public_key),
            Err(CryptoError::MessageOutOfRange)
        );
        let too_big = &kp.public_key.n + BigUint::one();
        assert_eq!(
            p_encrypt(&too_big, &kp.public_key),
            Err(CryptoError::MessageOutOfRange)
        );
    }

    #[test]
    fn test_ciphertext_in_range() {
        let kp = test_keypair();
        let c = p_encrypt(&BigUint::from(7u32), &kp.public_key).unwrap();
        assert!(c < kp.public_key.n_squared);
    }

    #[test]
    fn test_probabilistic_encryption() {
        // 100 chiffrements du même message : au moins 95 chiffrés distincts.
        // En pratique les 100 sont distincts — le seuil absorbe la malchance.
        let kp = test_keypair();
        let m = BigUint::from(42u32);
        let mut seen = HashSet::new();
        for _ in 0..100 {
            seen.insert(p_encrypt(&m, &kp.public_key).unwrap());
        }
        assert!(seen.len() >= 95, "seulement {} chiffrés distincts", seen.len());
    }
}
