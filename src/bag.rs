//! 7-bag randomizer for piece generation
//!
//! All 7 pieces are shuffled, then dealt out before reshuffling. This
//! prevents long droughts. The random source is injected so games can be
//! replayed from a seed.

use crate::tetromino::TetrominoType;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// A fresh bag is appended whenever fewer than this many pieces are queued
pub const REFILL_THRESHOLD: usize = 6;

/// The 7-bag piece randomizer
#[derive(Debug, Clone)]
pub struct Bag<R: RngCore = ChaCha8Rng> {
    /// Preview queue for upcoming pieces
    queue: VecDeque<TetrominoType>,
    rng: R,
}

impl Bag<ChaCha8Rng> {
    /// Create a deterministic bag from a seed
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: RngCore> Bag<R> {
    /// Create a bag drawing from the given random source
    pub fn with_rng(rng: R) -> Self {
        let mut bag = Self {
            queue: VecDeque::with_capacity(14),
            rng,
        };
        bag.refill();
        bag
    }

    /// Get the next piece from the queue
    pub fn next(&mut self) -> TetrominoType {
        if self.queue.len() < REFILL_THRESHOLD {
            self.refill();
        }
        // refill above guarantees at least 7 pieces
        self.queue.pop_front().unwrap_or(TetrominoType::I)
    }

    /// Preview the next N pieces without removing them
    pub fn preview(&self, count: usize) -> Vec<TetrominoType> {
        self.queue.iter().take(count).copied().collect()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Discard the queue and start over with a single fresh bag
    pub fn reset(&mut self) {
        self.queue.clear();
        self.refill();
    }

    /// Refill the queue with a new shuffled bag
    fn refill(&mut self) {
        let mut new_bag = TetrominoType::all();
        new_bag.shuffle(&mut self.rng);
        self.queue.extend(new_bag);
    }
}
