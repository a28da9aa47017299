use rand_distr::{Distribution, Uniform, uniform::Error};

use crate::source::Source;

/// Coefficient distributions used to drive transforms.
///
/// `Canonical` draws from `[0, q)`; `Lazy` draws from `[0, k*q)` to model the
/// output of a lazy transform that has not been normalised yet.
#[derive(Clone, Copy, Debug)]
pub enum Residues {
    Canonical(Uniform<u64>),
    Lazy(Uniform<u64>),
}

impl Residues {
    pub fn canonical(q: u64) -> Result<Self, Error> {
        Ok(Residues::Canonical(Uniform::new(0, q)?))
    }

    /// Values below `k * q`.
    pub fn lazy(q: u64, k: u64) -> Result<Self, Error> {
        Ok(Residues::Lazy(Uniform::new(0, k * q)?))
    }

    pub fn fill(&self, source: &mut Source, a: &mut [u64]) {
        a.iter_mut().for_each(|x| *x = self.sample(source));
    }
}

impl Distribution<u64> for Residues {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        match self {
            Residues::Canonical(u) | Residues::Lazy(u) => u.sample(rng),
        }
    }
}
