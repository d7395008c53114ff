pub mod math;
pub mod p_keygen;
pub mod p_encrypt;
pub mod p_decrypt;
pub mod p_homomorph;

// ---------------------------------------------------------------------------
// Support de test partagé : une seule paire 512 bits générée pour toute la
// suite — le keygen domine largement le coût des tests de chiffrement.
// ---------------------------------------------------------------------------
#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::OnceLock;
    use super::p_keygen::KeyPair;
    use super::p_keygen::p_keygen::p_keygen;

    pub fn test_keypair() -> &'static KeyPair {
        static KP: OnceLock<KeyPair> = OnceLock::new();
        KP.get_or_init(|| p_keygen(512).expect("keygen de test"))
    }
}
