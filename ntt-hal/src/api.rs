use crate::{
    error::NttError,
    modulus::final_reduce,
    params::{NttParams, modulus_bits},
};

/// Read-only view every prepared table set exposes to the generic code.
pub trait NttTables: Send + Sync {
    fn q(&self) -> u64;
    fn log_n(&self) -> usize;
    fn n(&self) -> usize {
        1 << self.log_n()
    }
}

/// A transform implementation: its capabilities, its table layout and its
/// in-place kernels.
///
/// Kernels never fail and never allocate. Their preconditions (length `n`,
/// inputs below the documented multiple of `q`) are checked with
/// `debug_assert!` only; [`Module`](crate::layouts::Module) is the checked
/// entry point.
pub trait NttBackend: Sized + Send + Sync + 'static {
    const NAME: &'static str;
    /// Largest supported bit length of `q`.
    const MAX_MODULUS_BITS: u32;
    const MIN_LOG_N: usize;
    /// Lazy forward output is below `LAZY_BOUND * q`.
    const LAZY_BOUND: u64;

    type Tables: NttTables;

    /// Pure capability predicate on the modulus.
    #[inline]
    fn supports(q: u64) -> bool {
        q > 2 && q & 1 == 1 && modulus_bits(q) <= Self::MAX_MODULUS_BITS
    }

    #[inline]
    fn supports_log_n(log_n: usize) -> bool {
        log_n >= Self::MIN_LOG_N
    }

    fn check(params: &NttParams) -> Result<(), NttError> {
        if !Self::supports(params.q()) {
            tracing::debug!(backend = Self::NAME, q = params.q(), "modulus rejected");
            return Err(NttError::ModulusOutOfRange {
                q: params.q(),
                max_bits: Self::MAX_MODULUS_BITS,
            });
        }
        if !Self::supports_log_n(params.log_n()) {
            tracing::debug!(backend = Self::NAME, log_n = params.log_n(), "size rejected");
            return Err(NttError::InvalidSize {
                log_n: params.log_n(),
                min_log_n: Self::MIN_LOG_N,
            });
        }
        Ok(())
    }

    /// Builds the forward and inverse tables. Assumes [`Self::check`] passed.
    fn prepare(params: &NttParams) -> Result<Self::Tables, NttError>;

    /// Inputs `< q`, outputs `< LAZY_BOUND * q`, bit-reversed order.
    fn forward_lazy(tables: &Self::Tables, a: &mut [u64]);

    /// Inputs `< q`, outputs `< q`.
    fn forward(tables: &Self::Tables, a: &mut [u64]) {
        Self::forward_lazy(tables, a);
        final_reduce(a, tables.q(), Self::LAZY_BOUND);
    }

    /// Inputs `< LAZY_BOUND * q` exactly as left by [`Self::forward_lazy`]
    /// (native order included), outputs `< q` in natural order.
    fn inverse(tables: &Self::Tables, a: &mut [u64]);

    fn forward_pair_lazy(tables: &Self::Tables, a: &mut [u64], b: &mut [u64]) {
        Self::forward_lazy(tables, a);
        Self::forward_lazy(tables, b);
    }

    fn forward_pair(tables: &Self::Tables, a: &mut [u64], b: &mut [u64]) {
        Self::forward_pair_lazy(tables, a, b);
        final_reduce(a, tables.q(), Self::LAZY_BOUND);
        final_reduce(b, tables.q(), Self::LAZY_BOUND);
    }

    /// Maps forward output to canonical bit-reversed order. Identity for every
    /// backend whose kernels already emit it.
    #[inline]
    fn to_canonical_order(_tables: &Self::Tables, _a: &mut [u64]) {}
}
