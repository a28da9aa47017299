use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use rand_core::RngCore;

/// Deterministic ChaCha8 stream used to build coefficient vectors.
pub struct Source {
    source: ChaCha8Rng,
}

impl Source {
    pub fn new(seed: [u8; 32]) -> Source {
        Source {
            source: ChaCha8Rng::from_seed(seed),
        }
    }

    /// Rejection-samples a value in `[0, max)`; `mask` must cover `max - 1`.
    #[inline(always)]
    pub fn next_u64n(&mut self, max: u64, mask: u64) -> u64 {
        let mut x: u64 = self.next_u64() & mask;
        while x >= max {
            x = self.next_u64() & mask;
        }
        x
    }

    /// Uniform residue in `[0, q)`.
    #[inline(always)]
    pub fn next_residue(&mut self, q: u64) -> u64 {
        self.next_u64n(q, residue_mask(q))
    }

    /// Fills `a` with uniform residues in `[0, q)`.
    pub fn fill_residues(&mut self, a: &mut [u64], q: u64) {
        let mask: u64 = residue_mask(q);
        a.iter_mut().for_each(|x| *x = self.next_u64n(q, mask));
    }
}

#[inline(always)]
fn residue_mask(q: u64) -> u64 {
    debug_assert!(q > 1);
    u64::MAX >> (q - 1).leading_zeros()
}

impl RngCore for Source {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.source.next_u32()
    }

    #[inline(always)]
    fn next_u64(&mut self) -> u64 {
        self.source.next_u64()
    }

    #[inline(always)]
    fn fill_bytes(&mut self, bytes: &mut [u8]) {
        self.source.fill_bytes(bytes)
    }
}
