use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand_core::{OsRng, RngCore};
use crate::crypto_error::crypto_error::CryptoError;

// ---------------------------------------------------------------------------
// Nombre de rounds Miller-Rabin par défaut.
// Probabilité de faux positif bornée par (1/4)^rounds → < 10⁻⁶ à 10 rounds.
// ---------------------------------------------------------------------------
pub const MILLER_RABIN_ROUNDS: u32 = 10;

// Plafond d'itérations du générateur de premiers, par bit demandé.
// La densité des premiers donne une espérance en O(nbits) essais ; le facteur
// 128 laisse une marge très large avant de conclure à une entropie défaillante.
const MAX_PRIME_ATTEMPTS_PER_BIT: u64 = 128;

// ---------------------------------------------------------------------------
// Table de petits premiers (crible préliminaire, couvre jusqu'à 2999)
// ---------------------------------------------------------------------------
const SMALL_PRIMES: &[u64] = &[
      3,   5,   7,  11,  13,  17,  19,  23,  29,  31,
     37,  41,  43,  47,  53,  59,  61,  67,  71,  73,
     79,  83,  89,  97, 101, 103, 107, 109, 113, 127,
    131, 137, 139, 149, 151, 157, 163, 167, 173, 179,
    181, 191, 193, 197, 199, 211, 223, 227, 229, 233,
    239, 241, 251, 257, 263, 269, 271, 277, 281, 283,
    293, 307, 311, 313, 317, 331, 337, 347, 349, 353,
    359, 367, 373, 379, 383, 389, 397, 401, 409, 419,
    421, 431, 433, 439, 443, 449, 457, 461, 463, 467,
    479, 487, 491, 499, 503, 509, 521, 523, 541, 547,
    557, 563, 569, 571, 577, 587, 593, 599, 601, 607,
    613, 617, 619, 631, 641, 643, 647, 653, 659, 661,
    673, 677, 683, 691, 701, 709, 719, 727, 733, 739,
    743, 751, 757, 761, 769, 773, 787, 797, 809, 811,
    821, 823, 827, 829, 839, 853, 857, 859, 863, 877,
    881, 883, 887, 907, 911, 919, 929, 937, 941, 947,
    953, 967, 971, 977, 983, 991, 997,1009,1013,1021,
   1031,1033,1039,1049,1051,1061,1063,1069,1087,1091,
   1093,1097,1103,1109,1117,1123,1129,1151,1153,1163,
   1171,1181,1187,1193,1201,1213,1217,1223,1229,1231,
   1237,1249,1259,1277,1279,1283,1289,1291,1297,1301,
   1303,1307,1319,1321,1327,1361,1367,1373,1381,1399,
   1409,1423,1427,1429,1433,1439,1447,1451,1453,1459,
   1471,1481,1483,1487,1489,1493,1499,1511,1523,1531,
   1543,1549,1553,1559,1567,1571,1579,1583,1597,1601,
   1607,1609,1613,1619,1621,1627,1637,1657,1663,1667,
   1669,1693,1697,1699,1709,1721,1723,1733,1741,1747,
   1753,1759,1777,1783,1787,1789,1801,1811,1823,1831,
   1847,1861,1867,1871,1873,1877,1879,1889,1901,1907,
   1913,1931,1933,1949,1951,1973,1979,1987,1993,1997,
   1999,2003,2011,2017,2027,2029,2039,2053,2063,2069,
   2081,2083,2087,2089,2099,2111,2113,2129,2131,2137,
   2141,2143,2153,2161,2179,2203,2207,2213,2221,2237,
   2239,2243,2251,2267,2269,2273,2281,2287,2293,2297,
   2309,2311,2333,2339,2341,2347,2351,2357,2371,2377,
   2381,2383,2389,2393,2399,2411,2417,2423,2437,2441,
   2447,2459,2467,2473,2477,2503,2521,2531,2539,2543,
   2549,2551,2557,2579,2591,2593,2609,2617,2621,2633,
   2647,2657,2659,2663,2671,2677,2683,2687,2689,2693,
   2699,2707,2711,2713,2719,2729,2731,2741,2749,2753,
   2767,2777,2789,2791,2797,2801,2803,2819,2833,2837,
   2843,2851,2857,2861,2879,2887,2897,2903,2909,2917,
   2927,2939,2953,2957,2963,2969,2971,2999,
];

// Vérifie si n est divisible par un des petits premiers de la table.
// n égal au petit premier lui-même n'est pas rejeté (c'est un vrai premier).
fn is_divisible_by_small_prime(n: &BigUint) -> bool {
    for &p in SMALL_PRIMES {
        let bp = BigUint::from(p);
        if n == &bp {
            return false;
        }
        if (n % &bp).is_zero() {
            return true;
        }
    }
    false
}

// ---------------------------------------------------------------------------
// Test de primalité Miller-Rabin.
//
// Décompose n-1 = d·2^r avec d impair, puis tire `rounds` témoins a
// uniformes dans [2, n-2]. Un témoin passe si a^d ≡ ±1 (mod n) ou si un
// des carrés successifs atteint n-1 ; sinon n est composé, retour immédiat.
//
// Le rng est fourni par l'appelant — en production toujours OsRng
// (le témoin doit venir d'une source cryptographique, pas d'un PRNG générique).
// ---------------------------------------------------------------------------
pub fn is_probable_prime(n: &BigUint, rounds: u32, rng: &mut impl RngCore) -> bool {
    if n < &BigUint::from(2u32) { return false; }
    if n == &BigUint::from(2u32) || n == &BigUint::from(3u32) { return true; }
    if n.is_even() { return false; }

    let n_minus_1 = n - BigUint::one();
    let mut d = n_minus_1.clone();
    let mut r = 0u32;
    while d.is_even() {
        d >>= 1;
        r += 1;
    }

    'witness: for _ in 0..rounds {
        let a = rng.gen_biguint_range(
            &BigUint::from(2u32),
            &(n - BigUint::one()),
        );
        let mut x = a.modpow(&d, n);
        if x == BigUint::one() || x == n_minus_1 {
            continue 'witness;
        }
        for _ in 0..r.saturating_sub(1) {
            x = (&x * &x) % n;
            if x == n_minus_1 {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

// ---------------------------------------------------------------------------
// Génère un nombre premier d'exactement nbits bits.
//
// Boucle échantillonne-et-teste :
//   1. Tirage OsRng de nbits bits, MSB forcé (taille exacte), LSB forcé (impair)
//   2. Crible des petits premiers — rejet bon marché avant Miller-Rabin
//   3. Miller-Rabin à MILLER_RABIN_ROUNDS rounds
//
// Plafond d'itérations : 128·nbits essais, puis Err(PrimeGenerationExhausted).
// En pratique jamais atteint (espérance ~0.7·nbits essais) — le plafond
// transforme un blocage sous famine d'entropie en erreur récupérable.
// ---------------------------------------------------------------------------
pub fn generate_prime(nbits: u64) -> Result<BigUint, CryptoError> {
    // Besoin d'au moins 2 bits pour forcer MSB et LSB distincts
    if nbits < 2 {
        return Err(CryptoError::InvalidKeySize { requested: nbits, minimum: 2 });
    }

    let mut rng = OsRng;
    let max_attempts = MAX_PRIME_ATTEMPTS_PER_BIT * nbits;

    for _ in 0..max_attempts {
        let mut candidate = rng.gen_biguint(nbits);
        candidate.set_bit(nbits - 1, true); // MSB : garantit exactement nbits bits
        candidate.set_bit(0, true);         // LSB : garantit un candidat impair

        if is_divisible_by_small_prime(&candidate) {
            continue;
        }

        if is_probable_prime(&candidate, MILLER_RABIN_ROUNDS, &mut rng) {
            debug_assert_eq!(candidate.bits(), nbits);
            return Ok(candidate);
        }
    }

    Err(CryptoError::PrimeGenerationExhausted { attempts: max_attempts })
}

// ===========================================================================
// Tests unitaires
// ===========================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn check(v: u64) -> bool {
        is_probable_prime(&BigUint::from(v), MILLER_RABIN_ROUNDS, &mut OsRng)
    }

    #[test]
    fn test_small_edge_cases() {
        assert!(!check(0));
        assert!(!check(1));
        assert!(check(2));
        assert!(check(3));
        assert!(!check(4));
    }

    #[test]
    fn test_known_primes() {
        for p in [5u64, 13, 97, 7919, 104_729, 2_147_483_647] {
            assert!(check(p), "{p} devrait être premier");
        }
    }

    #[test]
    fn test_known_composites() {
        for c in [9u64, 15, 1001, 7917, 104_730] {
            assert!(!check(c), "{c} devrait être composé");
        }
    }

    #[test]
    fn test_carmichael_number_rejected() {
        // 561 = 3·11·17 trompe le test de Fermat, pas Miller-Rabin
        assert!(!check(561));
        assert!(!check(41_041));
    }

    #[test]
    fn test_generate_prime_exact_bits() {
        let p = generate_prime(64).unwrap();
        assert_eq!(p.bits(), 64);
        assert!(is_probable_prime(&p, MILLER_RABIN_ROUNDS, &mut OsRng));
    }

    #[test]
    fn test_generate_prime_is_odd() {
        let p = generate_prime(48).unwrap();
        assert!(p.is_odd());
    }

    #[test]
    fn test_sieve_does_not_reject_table_members() {
        // 2999 est dans la table : le crible ne doit pas le rejeter
        assert!(!is_divisible_by_small_prime(&BigUint::from(2999u32)));
        assert!(is_divisible_by_small_prime(&BigUint::from(2999u32 * 3)));
    }
}
