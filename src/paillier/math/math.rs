use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use crate::crypto_error::crypto_error::CryptoError;

// ---------------------------------------------------------------------------
// Primitives arithmétiques modulaires en précision arbitraire.
//
// Fonctions pures, sans état. Tous les calculs du cryptosystème (Miller-Rabin,
// keygen, chiffrement, déchiffrement) passent par ces primitives ou par
// BigUint::modpow directement.
// ---------------------------------------------------------------------------

// Fonction L(u) = (u-1)/n — division entière exacte.
// Bien définie sur les entrées u ≡ 1 (mod n), ce qui est toujours le cas
// pour c^lambda mod n² quand c est un chiffré Paillier authentique.
pub fn l_function(u: &BigUint, n: &BigUint) -> BigUint {
    (u - BigUint::one()) / n
}

// Calcule le pgcd de deux nombres
pub fn gcd(a: &BigUint, b: &BigUint) -> BigUint {
    a.gcd(b)
}

// ---------------------------------------------------------------------------
// Exponentiation modulaire : base^exponent mod modulus.
//
// Err(DivisionByZero) si modulus = 0. Exposant 0 → 1 (y compris 0^0,
// convention de BigUint::modpow). Délègue à modpow (square-and-multiply
// interne de num-bigint) — jamais de débordement, opérandes non bornés.
// ---------------------------------------------------------------------------
pub fn mod_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> Result<BigUint, CryptoError> {
    if modulus.is_zero() {
        return Err(CryptoError::DivisionByZero);
    }
    Ok(base.modpow(exponent, modulus))
}

// ---------------------------------------------------------------------------
// Euclide étendu ITÉRATIF : retourne (g, x, y) avec a·x + b·y = g = gcd(a, b).
//
// La version récursive empile un cadre par étape de division — pour des
// opérandes de plusieurs milliers de bits cela fait des milliers de cadres.
// La boucle while garde la pile constante.
// ---------------------------------------------------------------------------
pub fn extended_gcd(a: &BigUint, b: &BigUint) -> (BigUint, BigInt, BigInt) {
    let (mut old_r, mut r) = (BigInt::from(a.clone()), BigInt::from(b.clone()));
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while r != BigInt::zero() {
        let quotient = &old_r / &r;

        let temp_r = r.clone();
        r = old_r - &quotient * &r;
        old_r = temp_r;

        let temp_s = s.clone();
        s = old_s - &quotient * &s;
        old_s = temp_s;

        let temp_t = t.clone();
        t = old_t - &quotient * &t;
        old_t = temp_t;
    }

    // old_r = gcd(a, b) >= 0 par construction (a, b non signés en entrée)
    let gcd_val = old_r.to_biguint().unwrap_or_default();

    (gcd_val, old_s, old_t)
}

// ---------------------------------------------------------------------------
// Inverse modulaire de a mod m : x dans [0, m) avec a·x ≡ 1 (mod m).
// Retourne Err(DivisionByZero) si m = 0, Err(NoModularInverse) si
// gcd(a, m) != 1. Le garde sur m est nécessaire : gcd(1, 0) = 1 passerait
// le test d'inversibilité et la réduction x mod m diviserait par zéro.
// ---------------------------------------------------------------------------
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint, CryptoError> {
    if m.is_zero() {
        return Err(CryptoError::DivisionByZero);
    }

    let (g, x, _) = extended_gcd(a, m);
    if g != BigUint::one() {
        return Err(CryptoError::NoModularInverse);
    }

    // Le coefficient de Bézout peut être négatif — ramené dans [0, m)
    let m_big = BigInt::from(m.clone());
    let mut x_mod = x % &m_big;
    if x_mod < BigInt::zero() {
        x_mod += &m_big;
    }

    x_mod.to_biguint().ok_or(CryptoError::NegativeConversion)
}

// ---------------------------------------------------------------------------
// lcm(a, b) = a·b / gcd(a, b).
// Err(DivisionByZero) si a = b = 0 (gcd nul, quotient indéfini).
// lcm(0, b) = 0 pour b != 0, conforme à la définition usuelle.
// ---------------------------------------------------------------------------
pub fn lcm(a: &BigUint, b: &BigUint) -> Result<BigUint, CryptoError> {
    if a.is_zero() && b.is_zero() {
        return Err(CryptoError::DivisionByZero);
    }
    if a.is_zero() || b.is_zero() {
        return Ok(BigUint::zero());
    }
    Ok((a * b) / gcd(a, b))
}
