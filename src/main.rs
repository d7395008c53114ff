// =========================================================
// Démonstration — Cryptosystème de Paillier
// Chiffrement additif homomorphe + métriques de durée
// =========================================================

// ── Cœur Paillier ─────────────────────────────────────────
use paillier_hom::paillier::p_keygen::p_keygen::p_keygen;
use paillier_hom::paillier::p_encrypt::p_encrypt;
use paillier_hom::paillier::p_decrypt::p_decrypt;
use paillier_hom::paillier::p_homomorph::{p_hom_add, p_hom_scale};

// ── Gestion des clés ──────────────────────────────────────
use paillier_hom::key_management::{
    key_file_exists, ensure_keys_directory,
    save_keypair_json, save_public_key_json,
    load_keypair_json,
};

// ── Types et erreurs ──────────────────────────────────────
use paillier_hom::CryptoError;
use paillier_hom::KeyPair;

// ── Stdlib & crates externes ──────────────────────────────
use num_bigint::{BigInt, BigUint, RandBigInt};
use rand_core::OsRng;
use std::io::{self, Write};
use std::time::Instant;

// ── Chemins des fichiers de clés ──────────────────────────
const KEYS_DIR:             &str = "keys";
const KEYPAIR_JSON_PATH:    &str = "keys/keypair.json";
const PUBLIC_KEY_JSON_PATH: &str = "keys/public_key.json";

// Taille de clé de démonstration — 1024 bits se génère en quelques secondes
const DEMO_KEY_BITS: u64 = 1024;

// ─────────────────────────────────────────────────────────
// Erreur applicative centrale
//
// Unifie CryptoError et io::Error pour propager toutes les
// erreurs via ? sans conversion manuelle — plus aucun panic!
// ─────────────────────────────────────────────────────────

#[derive(Debug)]
enum AppError {
    Crypto(CryptoError),
    Io(std::io::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Crypto(e) => write!(f, "Erreur cryptographique : {}", e),
            AppError::Io(e)     => write!(f, "Erreur I/O : {}", e),
        }
    }
}

impl From<CryptoError> for AppError {
    fn from(e: CryptoError) -> Self { AppError::Crypto(e) }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self { AppError::Io(e) }
}

// ─────────────────────────────────────────────────────────
// Point d'entrée
// ─────────────────────────────────────────────────────────

fn main() {
    if let Err(e) = ensure_keys_directory(KEYS_DIR) {
        eprintln!("[FATAL] Impossible de créer le répertoire keys/ : {}", e);
        std::process::exit(1);
    }

    loop {
        afficher_menu();
        let choix = lire_choix();

        let res = match choix.as_str() {
            "1" => demonstration_chiffrement(),
            "2" => demonstration_homomorphique(),
            "3" => scenario_agregation_paie(),
            "4" => { println!("\nAu revoir !\n"); break; }
            _   => { println!("\nChoix invalide. Veuillez choisir 1, 2, 3 ou 4.\n"); continue; }
        };

        if let Err(e) = res {
            eprintln!("\n[ERREUR] {}\n", e);
        }

        println!("\nAppuyez sur Entrée pour continuer...");
        let mut pause = String::new();
        io::stdin().read_line(&mut pause).ok();
    }
}

// ─────────────────────────────────────────────────────────
// Menu
// ─────────────────────────────────────────────────────────

fn afficher_menu() {
    println!("\n╔═══════════════════════════════════════════════╗");
    println!("║   CRYPTOSYSTÈME DE PAILLIER — MENU            ║");
    println!("╚═══════════════════════════════════════════════╝");
    println!("\n  [1] Chiffrement / déchiffrement");
    println!("  [2] Opérations homomorphiques (addition, pondération)");
    println!("  [3] Scénario : agrégation de salaires chiffrés");
    println!("  [4] Quitter\n");
    print!("Votre choix : ");
    io::stdout().flush().ok();
}

fn lire_choix() -> String {
    let mut input = String::new();
    io::stdin().read_line(&mut input).ok();
    input.trim().to_string()
}

// ─────────────────────────────────────────────────────────
// Gestion des clés : chargement ou génération + sauvegarde
// ─────────────────────────────────────────────────────────

fn charger_ou_generer_cles(bits: u64) -> Result<(KeyPair, Option<std::time::Duration>), AppError> {
    if key_file_exists(KEYPAIR_JSON_PATH) {
        println!("\n  Clés existantes détectées — chargement...");
        let t = Instant::now();
        match load_keypair_json(KEYPAIR_JSON_PATH) {
            Ok(kp) => {
                println!("  Clés chargées depuis le disque ({:.3?})\n", t.elapsed());
                return Ok((kp, None));
            }
            Err(e) => println!("  Erreur de chargement ({}) — regénération...", e),
        }
    } else {
        println!("\n  Aucune clé trouvée — génération ({} bits)...", bits);
    }
    let (kp, d) = generer_et_sauvegarder(bits)?;
    Ok((kp, Some(d)))
}

fn generer_et_sauvegarder(bits: u64) -> Result<(KeyPair, std::time::Duration), AppError> {
    let t       = Instant::now();
    let keypair = p_keygen(bits)?;          // Result<KeyPair, CryptoError> — propagé via ?
    let duree   = t.elapsed();
    println!("  Clés générées ({} bits) — temps : {:.3?}\n", bits, duree);

    save_keypair_json(&keypair, KEYPAIR_JSON_PATH)?;
    save_public_key_json(&keypair.public_key, PUBLIC_KEY_JSON_PATH)?;
    println!("  Clés sauvegardées dans {}/\n", KEYS_DIR);

    Ok((keypair, duree))
}

fn afficher_cles(kp: &KeyPair) {
    let info = kp.key_info();
    println!("--- CLÉ PUBLIQUE ---");
    println!("  taille demandée = {} bits", info.bit_length);
    println!("  |n|             = {} bits", info.n_bit_length);
    println!("  g               = n + 1");
    println!("  état            = {}", info.status);
    println!("--- CLÉ SECRÈTE ---");
    println!("  |lambda|        = {} bits", kp.secret_key.lambda.bits());
    println!("  |mu|            = {} bits", kp.secret_key.mu.bits());
}

// ─────────────────────────────────────────────────────────
// [1] Chiffrement / déchiffrement — aller-retour chronométré
// ─────────────────────────────────────────────────────────

fn demonstration_chiffrement() -> Result<(), AppError> {
    println!("\n==============================================");
    println!("    Chiffrement Paillier — Démonstration");
    println!("==============================================");

    let (kp, duree_keygen) = charger_ou_generer_cles(DEMO_KEY_BITS)?;
    afficher_cles(&kp);

    // Message dans [0, n) — domaine valide Paillier
    let mut rng = OsRng;
    let m = rng.gen_biguint_below(&kp.public_key.n);

    println!("\n  m   = {} bits", m.bits());

    let t         = Instant::now();
    let c         = p_encrypt(&m, &kp.public_key)?;
    let duree_enc = t.elapsed();
    println!("  c   = {} bits", c.bits());

    let t         = Instant::now();
    let dec       = p_decrypt(&c, &kp.public_key, &kp.secret_key)?;
    let duree_dec = t.elapsed();

    if dec == m {
        println!("\n Aller-retour vérifié : D(E(m)) = m");
    } else {
        println!("\n Erreur : D(E(m)) != m !");
    }

    println!("\n==============================================");
    println!("    RÉSUMÉ DES TEMPS");
    println!("==============================================");
    match duree_keygen {
        Some(d) => println!("  Génération des clés : {:.3?}  (nouvelle génération)", d),
        None    => println!("  Génération des clés : —  (chargées depuis le disque)"),
    }
    println!("  Chiffrement         : {:.3?}", duree_enc);
    println!("  Déchiffrement       : {:.3?}", duree_dec);
    println!("==============================================");

    Ok(())
}

// ─────────────────────────────────────────────────────────
// [2] Opérations homomorphiques — addition et pondération
// ─────────────────────────────────────────────────────────

fn demonstration_homomorphique() -> Result<(), AppError> {
    println!("\n==============================================");
    println!("    Opérations homomorphiques — Démonstration");
    println!("==============================================");

    let (kp, duree_keygen) = charger_ou_generer_cles(DEMO_KEY_BITS)?;
    afficher_cles(&kp);

    let mut rng = OsRng;
    let m1 = rng.gen_biguint_below(&kp.public_key.n);
    let m2 = rng.gen_biguint_below(&kp.public_key.n);
    let somme_claire = (&m1 + &m2) % &kp.public_key.n;

    println!("\n  m1            = {} bits", m1.bits());
    println!("  m2            = {} bits", m2.bits());
    println!("  (m1+m2) mod n = {} bits", somme_claire.bits());

    let t            = Instant::now();
    let c1           = p_encrypt(&m1, &kp.public_key)?;
    let duree_enc_m1 = t.elapsed();

    let t            = Instant::now();
    let c2           = p_encrypt(&m2, &kp.public_key)?;
    let duree_enc_m2 = t.elapsed();

    // Addition homomorphique : E(m1) * E(m2) mod n² = E((m1+m2) mod n)
    let t         = Instant::now();
    let c_somme   = p_hom_add(&c1, &c2, &kp.public_key)?;
    let duree_add = t.elapsed();

    let t         = Instant::now();
    let dec_somme = p_decrypt(&c_somme, &kp.public_key, &kp.secret_key)?;
    let duree_dec = t.elapsed();

    if dec_somme == somme_claire {
        println!("\n Homomorphisme additif vérifié : D(E(m1)·E(m2)) = (m1+m2) mod n");
    } else {
        println!("\n Erreur dans l'homomorphisme additif !");
    }

    // Pondération homomorphique : E(m1)^k mod n² = E((k·m1) mod n)
    let k = BigInt::from(7);
    let produit_clair = (&m1 * BigUint::from(7u32)) % &kp.public_key.n;

    let t           = Instant::now();
    let c_pondere   = p_hom_scale(&c1, &k, &kp.public_key)?;
    let duree_scale = t.elapsed();

    let dec_pondere = p_decrypt(&c_pondere, &kp.public_key, &kp.secret_key)?;
    if dec_pondere == produit_clair {
        println!(" Pondération vérifiée : D(E(m1)^7) = (7·m1) mod n");
    } else {
        println!(" Erreur dans la pondération homomorphique !");
    }

    println!("\n==============================================");
    println!("    RÉSUMÉ DES TEMPS");
    println!("==============================================");
    match duree_keygen {
        Some(d) => println!("  Génération des clés      : {:.3?}  (nouvelle génération)", d),
        None    => println!("  Génération des clés      : —  (chargées depuis le disque)"),
    }
    println!("  Chiffrement m1           : {:.3?}", duree_enc_m1);
    println!("  Chiffrement m2           : {:.3?}", duree_enc_m2);
    println!("  Addition homomorphique   : {:.3?}", duree_add);
    println!("  Pondération (k = 7)      : {:.3?}", duree_scale);
    println!("  Déchiffrement somme      : {:.3?}", duree_dec);
    println!("==============================================");

    Ok(())
}

// ─────────────────────────────────────────────────────────
// [3] Scénario : agrégation de salaires chiffrés
//
// Chaque service chiffre sa masse salariale ; le siège additionne les
// chiffrés et ne déchiffre que le total. Aucun salaire individuel n'est
// visible du côté agrégateur — seules les opérations publiques sont
// utilisées jusqu'au déchiffrement final.
// ─────────────────────────────────────────────────────────

fn scenario_agregation_paie() -> Result<(), AppError> {
    println!("\n==============================================");
    println!("    Agrégation de salaires chiffrés");
    println!("==============================================");

    let (kp, _) = charger_ou_generer_cles(DEMO_KEY_BITS)?;

    let services: &[(&str, u64)] = &[
        ("Ingénierie",   182_000),
        ("Ventes",       114_500),
        ("Support",       67_300),
        ("Direction",     95_000),
    ];
    let total_clair: u64 = services.iter().map(|(_, s)| s).sum();

    println!("\n  {} services chiffrent chacun leur masse salariale :", services.len());

    let t = Instant::now();
    let mut chiffres = Vec::with_capacity(services.len());
    for (nom, salaire) in services {
        let c = p_encrypt(&BigUint::from(*salaire), &kp.public_key)?;
        println!("    {:12} → chiffré de {} bits", nom, c.bits());
        chiffres.push(c);
    }
    let duree_enc = t.elapsed();

    // Agrégation côté siège : uniquement la clé publique
    let t = Instant::now();
    let mut c_total = chiffres[0].clone();
    for c in &chiffres[1..] {
        c_total = p_hom_add(&c_total, c, &kp.public_key)?;
    }
    let duree_agg = t.elapsed();

    let t         = Instant::now();
    let total     = p_decrypt(&c_total, &kp.public_key, &kp.secret_key)?;
    let duree_dec = t.elapsed();

    println!("\n  Total déchiffré : {}", total);
    println!("  Total attendu   : {}", total_clair);
    if total == BigUint::from(total_clair) {
        println!("  Agrégation chiffrée vérifiée");
    } else {
        println!("  Erreur d'agrégation !");
    }

    println!("\n  Chiffrement ({} valeurs) : {:.3?}", services.len(), duree_enc);
    println!("  Agrégation homomorphique : {:.3?}", duree_agg);
    println!("  Déchiffrement du total   : {:.3?}", duree_dec);

    Ok(())
}
