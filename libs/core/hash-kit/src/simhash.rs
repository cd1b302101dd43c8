// [libs/core/hash-kit/src/simhash.rs]
//! 64-bit SimHash over whitespace-tokenized 4-grams, weighted equally.
//! This is the "widely used" scheme `spec.md` calls out as the one the
//! historic corpus was produced with; reimplementations must keep
//! intra-cluster Hamming distances at or below `K=3` for that corpus.

const SHINGLE_SIZE: usize = 4;

/// 64-bit locality-sensitive fingerprint of `body`.
///
/// Lowercases the body, splits on whitespace, and forms a sliding window of
/// `SHINGLE_SIZE` tokens per shingle (falling back to the whole token list
/// as a single shingle when there are fewer than `SHINGLE_SIZE` of them).
/// Each shingle is hashed with FNV-1a/64 and votes +1/-1 into each of the 64
/// bit-position accumulators depending on whether that bit of the shingle
/// hash is set; the sign of each accumulator becomes the output bit.
pub fn text_simhash(body: &str) -> u64 {
    let lowered = body.to_lowercase();
    let tokens: Vec<&str> = lowered.split_whitespace().collect();
    if tokens.is_empty() {
        return 0;
    }

    let mut bit_weights = [0i64; 64];
    for shingle in shingles(&tokens) {
        let shingle_hash = fnv1a64(shingle.as_bytes());
        for (bit, weight) in bit_weights.iter_mut().enumerate() {
            if (shingle_hash >> bit) & 1 == 1 {
                *weight += 1;
            } else {
                *weight -= 1;
            }
        }
    }

    let mut fingerprint: u64 = 0;
    for (bit, weight) in bit_weights.iter().enumerate() {
        if *weight > 0 {
            fingerprint |= 1 << bit;
        }
    }
    fingerprint
}

fn shingles(tokens: &[&str]) -> Vec<String> {
    if tokens.len() < SHINGLE_SIZE {
        return vec![tokens.join(" ")];
    }
    tokens
        .windows(SHINGLE_SIZE)
        .map(|window| window.join(" "))
        .collect()
}

fn fnv1a64(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    let mut hash = OFFSET_BASIS;
    for byte in bytes {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hamming_distance;

    #[test]
    fn empty_body_hashes_to_zero() {
        assert_eq!(text_simhash(""), 0);
        assert_eq!(text_simhash("   "), 0);
    }

    #[test]
    fn identical_bodies_hash_identically() {
        assert_eq!(text_simhash("hello world"), text_simhash("hello world"));
    }

    #[test]
    fn single_shingle_difference_is_closer_than_a_wholly_different_body() {
        let base = "buy the new wireless headphones today with free shipping worldwide";
        let near_duplicate = "buy the new wireless headphones today with free shipping globally";
        let far = "adopt a rescue puppy this weekend at our downtown shelter event";

        let base_hash = text_simhash(base);
        let near_hash = text_simhash(near_duplicate);
        let far_hash = text_simhash(far);

        // Six of the seven 4-gram shingles are byte-identical between `base`
        // and `near_duplicate`; `far` shares none. The near variant must not
        // be hashed farther away than a body sharing no shingles at all.
        assert!(hamming_distance(base_hash, near_hash) <= hamming_distance(base_hash, far_hash));
    }

    #[test]
    fn case_is_normalized() {
        assert_eq!(text_simhash("Hello World"), text_simhash("hello world"));
    }
}
