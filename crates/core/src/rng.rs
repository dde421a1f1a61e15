//! RNG module - explicitly owned, seedable random source for block spawning
//!
//! The generator is a plain LCG so that a seed plus the order of spawns fully
//! determines a session. It is owned by [`crate::logic::GameLogic`] and passed
//! by `&mut` to whatever needs to draw from it.

/// Linear congruential generator (Numerical Recipes constants)
#[derive(Debug, Clone)]
pub struct GameRng {
    seed: u32,
    state: u32,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // A zero state would still advance (c != 0), but keep the first output
        // from being the bare increment.
        let state = if seed == 0 { 1 } else { seed };
        Self { seed, state }
    }

    /// Seed the generator was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state
    }

    /// Random value in `[0, bound)`; `bound` must be non-zero
    pub fn next_below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0);
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * bound as u64) >> 32) as u32
    }

    /// Random value in the inclusive range `[lo, hi]`
    pub fn next_in(&mut self, lo: u8, hi: u8) -> u8 {
        debug_assert!(lo <= hi);
        let span = (hi - lo) as u32 + 1;
        lo + self.next_below(span) as u8
    }

    /// Pick one element uniformly
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.next_below(items.len() as u32) as usize]
    }
}
