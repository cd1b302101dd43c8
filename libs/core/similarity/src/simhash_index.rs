// [libs/core/similarity/src/simhash_index.rs]
//! Banded near-duplicate index over 64-bit SimHash fingerprints.
//!
//! Splits each 64-bit key into `K+1` equal-width bands. By the pigeonhole
//! principle, two keys within Hamming distance `K` must agree on at least
//! one band, so indexing every key by each of its band values and probing
//! those same bands at query time finds every candidate within distance
//! `K` without an `O(N^2)` scan.

use std::collections::{HashMap, HashSet};

pub struct SimHashIndex {
    k: u32,
    bands: u32,
    band_bits: u32,
    buckets: HashMap<(u32, u64), Vec<(u64, i64)>>,
}

impl SimHashIndex {
    /// Builds an index tuned for a near-duplicate threshold of `k` bits.
    pub fn new(k: u32) -> Self {
        let bands = k + 1;
        assert!(64 % bands == 0, "64 bits must split evenly into K+1 bands");
        Self {
            k,
            bands,
            band_bits: 64 / bands,
            buckets: HashMap::new(),
        }
    }

    /// Indexes `payload` under `hash`.
    pub fn insert(&mut self, hash: u64, payload: i64) {
        for band in 0..self.bands {
            let key = self.band_value(hash, band);
            self.buckets
                .entry((band, key))
                .or_default()
                .push((hash, payload));
        }
    }

    /// Returns every indexed payload whose hash is within Hamming distance
    /// `self.k` of `hash`, including `hash` itself if previously inserted.
    pub fn query(&self, hash: u64) -> HashSet<i64> {
        let mut found = HashSet::new();
        for band in 0..self.bands {
            let key = self.band_value(hash, band);
            if let Some(candidates) = self.buckets.get(&(band, key)) {
                for (candidate_hash, payload) in candidates {
                    if hamming_distance(*candidate_hash, hash) <= self.k {
                        found.insert(*payload);
                    }
                }
            }
        }
        found
    }

    fn band_value(&self, hash: u64, band: u32) -> u64 {
        let shift = band * self.band_bits;
        let mask = if self.band_bits == 64 {
            u64::MAX
        } else {
            (1u64 << self.band_bits) - 1
        };
        (hash >> shift) & mask
    }
}

fn hamming_distance(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}
