use num_bigint::BigUint;
use crate::paillier::math::l_function;
use crate::paillier::p_keygen::{PublicKey, SecretKey};
use crate::crypto_error::CryptoError;

// ---------------------------------------------------------------------------
// Déchiffrement Paillier : m = L(c^lambda mod n²) * mu  mod n
//
// Seule la borne c < n² est vérifiable sans la clé privée. Un chiffré dans
// [0, n²) qui n'a pas été produit sous cette clé se déchiffre en une valeur
// quelconque, PAS en erreur — limite inhérente au schéma, à documenter côté
// appelant, pas à « corriger » par des validations que l'algèbre ne permet pas.
// ---------------------------------------------------------------------------
pub fn p_decrypt(c: &BigUint, pk: &PublicKey, sk: &SecretKey) -> Result<BigUint, CryptoError> {
    if c >= &pk.n_squared {
        return Err(CryptoError::CiphertextOutOfRange);
    }

    // u = c^lambda mod n² — u ≡ 1 (mod n) pour un chiffré authentique,
    // donc L(u) est une division entière exacte
    let c_lambda = c.modpow(&sk.lambda, &pk.n_squared);
    let l_c_lambda = l_function(&c_lambda, &pk.n);

    let m = (&l_c_lambda * &sk.mu) % &pk.n;

    Ok(m)
}

// ===========================================================================
// Tests unitaires
// ===========================================================================
#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;
    use crate::paillier::test_support::test_keypair;
    use crate::paillier::p_encrypt::p_encrypt;

    #[test]
    fn test_ciphertext_out_of_range() {
        let kp = test_keypair();
        assert_eq!(
            p_decrypt(&kp.public_key.n_squared, &kp.public_key, &kp.secret_key),
            Err(CryptoError::CiphertextOutOfRange)
        );
    }

    #[test]
    fn test_roundtrip_large_message() {
        let kp = test_keypair();
        let m = &kp.public_key.n >> 1; // message de ~511 bits
        let c = p_encrypt(&m, &kp.public_key).unwrap();
        assert_eq!(p_decrypt(&c, &kp.public_key, &kp.secret_key).unwrap(), m);
    }

    #[test]
    fn test_forged_ciphertext_decrypts_to_garbage_not_error() {
        // Un entier arbitraire dans [0, n²) se déchiffre sans erreur —
        // le résultat n'a simplement aucun sens. Comportement documenté.
        let kp = test_keypair();
        let forged = &kp.public_key.n_squared - BigUint::one();
        assert!(p_decrypt(&forged, &kp.public_key, &kp.secret_key).is_ok());
    }
}
