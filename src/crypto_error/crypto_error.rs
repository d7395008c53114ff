// ===========================================================================
// Gestion centralisée des erreurs cryptographiques
//
// Tous les modules utilisent ce type au lieu de panic!/assert!/unwrap().
// L'appelant (menu interactif, serveur, harnais de test) reçoit une Err(...)
// et peut répondre proprement sans crasher le thread.
//
// RÈGLE : aucun variant ne transporte de matériel de clé. Les messages ne
// contiennent que des tailles et des compteurs — jamais n, lambda ou mu.
// ===========================================================================

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum CryptoError {
    // --- Erreurs de paramètres d'entrée ---
    /// Le message m est >= n (hors domaine plaintext Paillier)
    MessageOutOfRange,
    /// Le chiffré c est >= n² (hors domaine ciphertext Paillier)
    CiphertextOutOfRange,
    /// La taille de clé demandée est trop petite ou impaire
    InvalidKeySize { requested: u64, minimum: u64 },
    /// Constante de pondération homomorphique négative
    NegativeConstant,

    // --- Erreurs mathématiques internes ---
    /// L'inverse modulaire n'existe pas (gcd != 1)
    NoModularInverse,
    /// Division par zéro (modulus nul, ou lcm(0, 0))
    DivisionByZero,
    /// Conversion BigInt -> BigUint échouée (résultat négatif — invariant interne)
    NegativeConversion,

    // --- Erreurs de génération de clés ---
    /// Invariant interne violé pendant le keygen (ne doit jamais arriver
    /// avec deux premiers authentiques — signale un bug, pas une entrée invalide)
    KeyGenerationFailed,
    /// Plafond d'itérations atteint sans trouver de nombre premier
    PrimeGenerationExhausted { attempts: u64 },
    /// Plafond d'itérations atteint sans trouver de r copremier avec n
    BlindingExhausted,
    /// Opération tentée sans paire de clés chargée
    UninitializedKey,

    // --- Erreurs de stockage / parsing des clés ---
    /// Parsing hexadécimal invalide dans un champ de clé JSON
    HexParseError,
    /// Champ hex trop long : vecteur DoS potentiel (conversion BigUint coûteuse)
    HexFieldTooLong { actual: usize, maximum: usize },
    /// n_squared != n*n au chargement : fichier corrompu ou falsifié
    KeyCoherenceError,
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::MessageOutOfRange =>
                write!(f, "Le message doit être dans [0, n)"),
            CryptoError::CiphertextOutOfRange =>
                write!(f, "Le chiffré doit être dans [0, n²)"),
            CryptoError::InvalidKeySize { requested, minimum } =>
                write!(f, "Taille de clé {requested} bits invalide : minimum {minimum} bits, nombre pair requis"),
            CryptoError::NegativeConstant =>
                write!(f, "La constante de pondération doit être >= 0"),
            CryptoError::NoModularInverse =>
                write!(f, "Impossible de calculer l'inverse modulaire (gcd != 1)"),
            CryptoError::DivisionByZero =>
                write!(f, "Division par zéro dans une opération modulaire"),
            CryptoError::NegativeConversion =>
                write!(f, "Conversion interne BigInt -> BigUint : résultat négatif inattendu"),
            CryptoError::KeyGenerationFailed =>
                write!(f, "Invariant interne violé pendant la génération de clés"),
            CryptoError::PrimeGenerationExhausted { attempts } =>
                write!(f, "Aucun nombre premier trouvé après {attempts} itérations — entropie défaillante ?"),
            CryptoError::BlindingExhausted =>
                write!(f, "Aucun facteur d'aveuglement copremier avec n trouvé"),
            CryptoError::UninitializedKey =>
                write!(f, "Aucune paire de clés chargée — générer ou charger une clé d'abord"),
            CryptoError::HexParseError =>
                write!(f, "Parsing hexadécimal invalide dans le fichier de clés"),
            CryptoError::HexFieldTooLong { actual, maximum } =>
                write!(f, "Champ hexadécimal trop long : {actual} caractères (maximum autorisé : {maximum})"),
            CryptoError::KeyCoherenceError =>
                write!(f, "Fichier de clés incohérent : n_squared != n*n (corrompu ou falsifié)"),
        }
    }
}

impl std::error::Error for CryptoError {}
