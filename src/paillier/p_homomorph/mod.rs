pub mod p_homomorph;

pub use p_homomorph::{p_hom_add, p_hom_scale};
