// Réexporte les primitives arithmétiques et le générateur de premiers

mod math;
mod primality;

pub use math::{l_function, gcd, extended_gcd, mod_pow, mod_inverse, lcm};
pub use primality::{is_probable_prime, generate_prime, MILLER_RABIN_ROUNDS};
