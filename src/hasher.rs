//! Deterministic polynomial string hasher used as the table default.

use core::hash::{BuildHasher, Hasher};

/// Base-31 polynomial hash over the written bytes.
///
/// Unlike `RandomState`, the output is identical across runs, so bucket
/// placement (and the diagnostic listing) is reproducible.
#[derive(Clone, Copy, Debug, Default)]
pub struct PolyHasher {
    state: u64,
}

impl Hasher for PolyHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.state = self.state.wrapping_mul(31).wrapping_add(u64::from(b));
        }
    }

    #[inline]
    fn finish(&self) -> u64 {
        self.state
    }
}

/// `BuildHasher` for [`PolyHasher`]; stateless, so every instance agrees.
#[derive(Clone, Copy, Debug, Default)]
pub struct PolyState;

impl BuildHasher for PolyState {
    type Hasher = PolyHasher;

    fn build_hasher(&self) -> Self::Hasher {
        PolyHasher::default()
    }
}
