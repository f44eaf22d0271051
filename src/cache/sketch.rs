//! Frequency Sketch Module
//!
//! Count-min sketch estimating how often each key was seen recently.

use std::hash::{BuildHasher, Hash};

const DEPTH: usize = 4;

/// Upper bound on counters per row, reached from a capacity of about 840k.
const MAX_WIDTH: usize = 1 << 22;

/// Fixed per-row seeds so estimates are reproducible across runs.
const ROW_SEEDS: [[u64; 4]; DEPTH] = [
    [0x9e37_79b9_7f4a_7c15, 0xbf58_476d_1ce4_e5b9, 0x94d0_49bb_1331_11eb, 0x2545_f491_4f6c_dd1d],
    [0xd6e8_feb8_6659_fd93, 0xa076_1d64_78bd_642f, 0xe703_7ed1_a0b4_28db, 0x8ebc_6af0_9c88_c6e3],
    [0x5899_65cc_7537_4cc3, 0x1d8e_4e27_c47d_124f, 0xff51_afd7_ed55_8ccd, 0xc4ce_b9fe_1a85_ec53],
    [0x27d4_eb2f_1656_67c5, 0x1656_67b1_9e37_79f9, 0x85eb_ca77_c2b2_ae63, 0xc2b2_ae3d_27d4_eb4f],
];

// == Frequency Sketch ==
/// Approximate access counter shared by every key in the cache.
///
/// Estimates only ever over-count. After `reset_threshold` increments all
/// counters are halved so old popularity decays.
#[derive(Debug)]
pub struct FrequencySketch {
    counters: Vec<Vec<u32>>,
    hashers: Vec<ahash::RandomState>,
    increments: usize,
    reset_threshold: usize,
}

impl FrequencySketch {
    /// Creates a sketch sized for a cache of `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        let reset_threshold = capacity.saturating_mul(10).max(100);
        let width = (reset_threshold.saturating_mul(2) / DEPTH)
            .clamp(256, MAX_WIDTH)
            .next_power_of_two();

        Self {
            counters: (0..DEPTH).map(|_| vec![0; width]).collect(),
            hashers: ROW_SEEDS
                .iter()
                .map(|[a, b, c, d]| ahash::RandomState::with_seeds(*a, *b, *c, *d))
                .collect(),
            increments: 0,
            reset_threshold,
        }
    }

    fn index<Q: Hash + ?Sized>(&self, row: usize, key: &Q) -> usize {
        let width = self.counters[row].len();
        (self.hashers[row].hash_one(key) as usize) & (width - 1)
    }

    // == Increment ==
    pub fn increment<Q: Hash + ?Sized>(&mut self, key: &Q) {
        for row in 0..DEPTH {
            let index = self.index(row, key);
            let counter = &mut self.counters[row][index];
            *counter = counter.saturating_add(1);
        }

        self.increments += 1;
        if self.increments >= self.reset_threshold {
            self.age();
        }
    }

    // == Estimate ==
    pub fn estimate<Q: Hash + ?Sized>(&self, key: &Q) -> u32 {
        (0..DEPTH)
            .map(|row| self.counters[row][self.index(row, key)])
            .min()
            .unwrap_or(0)
    }

    /// Halves every counter.
    fn age(&mut self) {
        self.increments = 0;
        for row in &mut self.counters {
            for counter in row.iter_mut() {
                *counter /= 2;
            }
        }
    }
}
