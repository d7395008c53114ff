use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use crate::paillier::p_keygen::PublicKey;
use crate::crypto_error::CryptoError;

// ---------------------------------------------------------------------------
// Opérations homomorphiques Paillier.
//
// Tout se joue dans Z*_{n²} avec la seule clé publique :
//   E(m1) · E(m2) mod n² = E((m1 + m2) mod n)   — addition
//   E(m)^k mod n²        = E((k · m) mod n)     — pondération par constante
//
// Les randomness se combinent (r1·r2, resp. r^k), donc le résultat est un
// chiffré Paillier valide à part entière.
// ---------------------------------------------------------------------------

/// Addition homomorphique : produit modulaire des deux chiffrés.
/// Se déchiffre en (m1 + m2) mod n.
pub fn p_hom_add(c1: &BigUint, c2: &BigUint, pk: &PublicKey) -> Result<BigUint, CryptoError> {
    if c1 >= &pk.n_squared || c2 >= &pk.n_squared {
        return Err(CryptoError::CiphertextOutOfRange);
    }
    Ok((c1 * c2) % &pk.n_squared)
}

/// Pondération homomorphique par une constante : c^k mod n².
/// Se déchiffre en (k · m) mod n.
///
/// k est signé côté appelant (saisie utilisateur, coefficient métier) —
/// une constante négative est rejetée avec NegativeConstant, le schéma
/// n'encode pas les entiers relatifs.
pub fn p_hom_scale(c: &BigUint, k: &BigInt, pk: &PublicKey) -> Result<BigUint, CryptoError> {
    if c >= &pk.n_squared {
        return Err(CryptoError::CiphertextOutOfRange);
    }
    if k < &BigInt::zero() {
        return Err(CryptoError::NegativeConstant);
    }
    // Conversion sûre : k >= 0 vient d'être vérifié
    let k_unsigned = k.to_biguint().ok_or(CryptoError::NegativeConversion)?;

    Ok(c.modpow(&k_unsigned, &pk.n_squared))
}
