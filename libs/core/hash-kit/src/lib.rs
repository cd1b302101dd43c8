// [libs/core/hash-kit/src/lib.rs]
/*!
 * =================================================================
 * APARATO: FINGERPRINT KIT (V1.0)
 * CLASIFICACIÓN: CORE PRIMITIVE (ESTRATO L1)
 * RESPONSABILIDAD: HASHING CRIPTOGRÁFICO Y PERCEPTUAL DE CREATIVOS
 *
 * Expone las tres huellas que el resto del workspace necesita para
 * identificar y deduplicar creativos: SHA-256 de bytes, dHash de
 * imagen y SimHash de texto. Ninguna de las tres toca I/O.
 * =================================================================
 */

mod dhash;
mod sha;
mod simhash;

pub use dhash::{image_dhash, image_dhash_hex, HashKitError};
pub use sha::{sha256_hex, text_sha256_utf32_hex};
pub use simhash::text_simhash;

/// Distancia de Hamming entre dos huellas de 64 bits.
pub fn hamming_distance(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hamming_distance_of_equal_hashes_is_zero() {
        assert_eq!(hamming_distance(0xDEAD_BEEF, 0xDEAD_BEEF), 0);
    }

    #[test]
    fn hamming_distance_counts_differing_bits() {
        assert_eq!(hamming_distance(0b0000, 0b0001), 1);
        assert_eq!(hamming_distance(0b0000, 0b1111), 4);
    }
}
