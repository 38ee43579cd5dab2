//! Deterministic random generator feeding every stochastic decision.
//!
//! A linear-congruential step whose output is taken through a variable
//! right shift chosen by the top three state bits, in the spirit of PCG.
//! The stream is fully determined by the seed, so runs are reproducible.

use rand::{Error, RngCore, SeedableRng};

const MULTIPLIER: u64 = 0x9b60_9334_58e1_7d7d;
const INCREMENT: u64 = 0xd737_232e_eccd_f7ed;

/// Advance `state` and return the next 32-bit output.
#[inline]
pub fn next(state: u64) -> (u32, u64) {
    let state = state.wrapping_mul(MULTIPLIER).wrapping_add(INCREMENT);
    let shift = 29 - (state >> 61);
    ((state >> shift) as u32, state)
}

/// Seeded generator for rule table operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FractalRng {
    state: u64,
}

impl FractalRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Current internal state.
    pub fn state(&self) -> u64 {
        self.state
    }
}

impl RngCore for FractalRng {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        let (out, state) = next(self.state);
        self.state = state;
        out
    }

    fn next_u64(&mut self) -> u64 {
        let lo = self.next_u32() as u64;
        let hi = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for FractalRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u64::from_le_bytes(seed))
    }

    // The seed is the state; no scrambling, so external seeds stay meaningful.
    fn seed_from_u64(state: u64) -> Self {
        Self::new(state)
    }
}
