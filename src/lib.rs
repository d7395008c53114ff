// Déclaration des modules
pub mod crypto_error;
pub mod paillier;
pub mod key_management;

pub use crate::paillier::math;
pub use crate::paillier::p_keygen;
pub use crate::paillier::p_encrypt;
pub use crate::paillier::p_decrypt;
pub use crate::paillier::p_homomorph;

// Fonctions mathématiques principales
pub use crate::paillier::math::{
    l_function, gcd, extended_gcd, mod_pow, mod_inverse, lcm,
    is_probable_prime, generate_prime, MILLER_RABIN_ROUNDS,
};

// Opérations du cryptosystème
pub use p_keygen::p_keygen::p_keygen;
pub use p_encrypt::p_encrypt::p_encrypt;
pub use p_decrypt::p_decrypt::p_decrypt;
pub use p_homomorph::p_homomorph::{p_hom_add, p_hom_scale};

// Types depuis keygen
pub use p_keygen::{PublicKey, SecretKey, KeyPair, KeyInfo, KeyStatus, MIN_KEY_BITS};

// Erreur centralisée
pub use crypto_error::CryptoError;

// Registre de clés thread-safe — point d'entrée pour les serveurs multi-threadés
pub use key_management::KeyRegistry;
