//! Deterministic pseudo-random generation.
//!
//! The renderer must be reproducible: the same seed, viewport sequence and
//! time sequence must produce bit-identical particle state. A small
//! xorshift32 generator is used instead of a platform random source so
//! seeding, particle placement and snap scheduling stay replayable.

/// Xorshift32 pseudo-random generator.
///
/// Not cryptographic. Period 2^32 − 1, which is far more than a background
/// animation ever consumes.
#[derive(Debug, Clone)]
pub struct XorShift32 {
    state: u32,
}

/// Seed used when none is supplied.
pub const DEFAULT_SEED: u32 = 0x9e37_79b9;

impl XorShift32 {
    /// Create a generator from a seed. A zero seed would lock the generator
    /// at zero forever, so it is replaced with [`DEFAULT_SEED`].
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { DEFAULT_SEED } else { seed };
        Self { state }
    }

    /// Next raw 32-bit value.
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform value in `[0, 1]`.
    pub fn next_f32(&mut self) -> f32 {
        self.next_u32() as f32 / u32::MAX as f32
    }

    /// Uniform value in `[min, max]`.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }
}
