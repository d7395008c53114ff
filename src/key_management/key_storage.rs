use serde::{Serialize, Deserialize};
use std::fs;
use std::io;
use std::path::Path;
use num_bigint::BigUint;
use num_traits::Num;
use crate::paillier::p_keygen::{PublicKey, SecretKey, KeyPair};
use crate::crypto_error::CryptoError;

// ============================================================================
// Persistance JSON des clés — couche appelante, PAS le cœur cryptographique.
// Le cœur n'impose aucun format de fil ; ce module en choisit un : champs
// hexadécimaux majuscules dans du JSON lisible.
//
// Limites anti-DoS vérifiées AVANT toute opération coûteuse :
//   - taille du fichier lue via metadata avant fs::read_to_string
//     (un fichier de plusieurs Go tuerait le processus via l'OOM killer) ;
//   - longueur des champs hex avant from_str_radix
//     (conversion O(n²) en taille d'entrée — saturation CPU sinon).
// Dimensionné pour des modules jusqu'à 4096 bits : n_squared fait alors
// 8192 bits = 2048 caractères hex ; 3072 laisse une marge confortable.
// ============================================================================

/// Taille maximale d'un fichier de clés JSON en octets (32 Ko)
const MAX_KEY_FILE_BYTES: u64 = 32_768;

/// Longueur maximale d'un champ hexadécimal en caractères
const MAX_HEX_FIELD_LEN: usize = 3_072;

// ----------------------------------------------------------------------------
// Structures JSON
// ----------------------------------------------------------------------------

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PublicKeyJson {
    pub n:         String,
    pub g:         String,
    pub n_squared: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SecretKeyJson {
    pub lambda: String,
    pub mu:     String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct KeyPairJson {
    pub bit_length: u64,
    pub public_key: PublicKeyJson,
    pub secret_key: SecretKeyJson,
}

// ----------------------------------------------------------------------------
// Conversion BigUint ↔ hexadécimal
// ----------------------------------------------------------------------------

pub fn biguint_to_hex(value: &BigUint) -> String {
    value.to_str_radix(16).to_uppercase()
}

/// Convertit une string hex en BigUint. La longueur du champ est vérifiée
/// AVANT la conversion pour éviter une allocation BigUint géante.
pub fn hex_to_biguint(hex_str: &str) -> Result<BigUint, CryptoError> {
    if hex_str.len() > MAX_HEX_FIELD_LEN {
        return Err(CryptoError::HexFieldTooLong {
            actual:  hex_str.len(),
            maximum: MAX_HEX_FIELD_LEN,
        });
    }
    BigUint::from_str_radix(hex_str, 16)
        .map_err(|_| CryptoError::HexParseError)
}

// ----------------------------------------------------------------------------
// Structures Rust → JSON
// ----------------------------------------------------------------------------

pub fn public_key_to_json(pk: &PublicKey) -> PublicKeyJson {
    PublicKeyJson {
        n:         biguint_to_hex(&pk.n),
        g:         biguint_to_hex(&pk.g),
        n_squared: biguint_to_hex(&pk.n_squared),
    }
}

pub fn keypair_to_json(kp: &KeyPair) -> KeyPairJson {
    KeyPairJson {
        bit_length: kp.bit_length,
        public_key: public_key_to_json(&kp.public_key),
        secret_key: SecretKeyJson {
            lambda: biguint_to_hex(&kp.secret_key.lambda),
            mu:     biguint_to_hex(&kp.secret_key.mu),
        },
    }
}

// ----------------------------------------------------------------------------
// JSON → structures Rust
// Cohérence structurelle vérifiée au chargement : n_squared == n·n.
// Protège contre les fichiers corrompus ou falsifiés — un n_squared faux
// produirait des chiffrés silencieusement indéchiffrables.
// ----------------------------------------------------------------------------

pub fn json_to_public_key(json: &PublicKeyJson) -> Result<PublicKey, CryptoError> {
    let n         = hex_to_biguint(&json.n)?;
    let g         = hex_to_biguint(&json.g)?;
    let n_squared = hex_to_biguint(&json.n_squared)?;

    if n_squared != &n * &n {
        return Err(CryptoError::KeyCoherenceError);
    }

    Ok(PublicKey { n, g, n_squared })
}

pub fn json_to_keypair(json: &KeyPairJson) -> Result<KeyPair, CryptoError> {
    Ok(KeyPair {
        bit_length: json.bit_length,
        public_key: json_to_public_key(&json.public_key)?,
        secret_key: SecretKey {
            lambda: hex_to_biguint(&json.secret_key.lambda)?,
            mu:     hex_to_biguint(&json.secret_key.mu)?,
        },
    })
}

// ----------------------------------------------------------------------------
// Lecture / écriture disque
// ----------------------------------------------------------------------------

// Taille du fichier vérifiée sur la métadonnée, sans ouvrir le contenu
fn check_file_size(filepath: &str) -> io::Result<()> {
    let meta = fs::metadata(filepath)?;
    if meta.len() > MAX_KEY_FILE_BYTES {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Fichier de clés trop grand : {} octets (maximum : {} octets)",
                meta.len(),
                MAX_KEY_FILE_BYTES
            ),
        ));
    }
    Ok(())
}

pub fn save_keypair_json(kp: &KeyPair, filepath: &str) -> io::Result<()> {
    let json = serde_json::to_string_pretty(&keypair_to_json(kp))?;
    fs::write(filepath, json)
}

pub fn save_public_key_json(pk: &PublicKey, filepath: &str) -> io::Result<()> {
    let json = serde_json::to_string_pretty(&public_key_to_json(pk))?;
    fs::write(filepath, json)
}

pub fn load_keypair_json(filepath: &str) -> io::Result<KeyPair> {
    check_file_size(filepath)?;
    let raw  = fs::read_to_string(filepath)?;
    let json: KeyPairJson = serde_json::from_str(&raw)?;
    json_to_keypair(&json)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
}

pub fn load_public_key_json(filepath: &str) -> io::Result<PublicKey> {
    check_file_size(filepath)?;
    let raw  = fs::read_to_string(filepath)?;
    let json: PublicKeyJson = serde_json::from_str(&raw)?;
    json_to_public_key(&json)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))
}

// ----------------------------------------------------------------------------
// Utilitaires
// ----------------------------------------------------------------------------

pub fn key_file_exists(filepath: &str) -> bool {
    Path::new(filepath).exists()
}

pub fn ensure_keys_directory(dir_path: &str) -> io::Result<()> {
    if !Path::new(dir_path).exists() {
        fs::create_dir_all(dir_path)?;
    }
    Ok(())
}

// ===========================================================================
// Tests unitaires
// ===========================================================================
#[cfg(test)]
mod tests {
    use super::*;

    // Paire factice, cohérente structurellement (n_squared = n·n) mais sans
    // valeur cryptographique — suffisant pour tester la sérialisation
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
    fn test_hex_roundtrip() {
        let v = BigUint::from(0xDEADBEEFu64);
        assert_eq!(hex_to_biguint(&biguint_to_hex(&v)).unwrap(), v);
    }

    #[test]
    fn test_hex_field_too_long() {
        let huge = "F".repeat(MAX_HEX_FIELD_LEN + 1);
        assert!(matches!(
            hex_to_biguint(&huge),
            Err(CryptoError::HexFieldTooLong { .. })
        ));
    }

    #[test]
    fn test_hex_invalid_digit() {
        assert_eq!(hex_to_biguint("XYZ"), Err(CryptoError::HexParseError));
    }

    #[test]
    fn test_json_roundtrip_preserves_keypair() {
        let kp = dummy_keypair();
        let back = json_to_keypair(&keypair_to_json(&kp)).unwrap();
        assert_eq!(back.bit_length, kp.bit_length);
        assert_eq!(back.public_key, kp.public_key);
        assert_eq!(back.secret_key.lambda, kp.secret_key.lambda);
        assert_eq!(back.secret_key.mu, kp.secret_key.mu);
    }

    #[test]
    fn test_tampered_n_squared_rejected() {
        let mut json = keypair_to_json(&dummy_keypair());
        json.public_key.n_squared = "1234".to_string();
        assert_eq!(
            json_to_keypair(&json).unwrap_err(),
            CryptoError::KeyCoherenceError
        );
    }
}
