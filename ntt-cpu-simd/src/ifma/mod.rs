//! Backend on 8 lanes with 52-bit fused multiply-add products.
//!
//! The forward kernel is chosen at compile time through [`IfmaVariant`]; all
//! variants share one inverse over the scalar radix-4 expansion. Moduli are
//! limited to 49 bits so that `8q` and every lane product input stay below
//! `2^52`.
//!
//! Kernels are generic over [`Lanes8`]. Tables built on a host with
//! `avx512f` and `avx512ifma` run them on 512-bit registers, every other host
//! runs them on the portable [`U64x8`].

pub mod arith;
#[cfg(target_arch = "x86_64")]
mod avx512;
pub mod expand;
pub mod inverse;
pub mod mixed;
pub mod radix4;

use std::marker::PhantomData;

use ntt_hal::{
    api::{NttBackend, NttTables},
    error::NttError,
    modulus::{IFMA_WORD_SIZE, MulOp},
    params::NttParams,
    twiddle::{build_inverse_twiddle_table, build_operators, build_twiddle_table, expand_radix4, n_inv_operator},
};

use crate::{
    ifma::arith::LaneTable,
    lanes::{Lanes8, U64x8},
};

/// Whether the running CPU has the 52-bit fused multiply-add instructions;
/// tables built while it holds run the kernels on them.
pub fn has_native_ifma() -> bool {
    #[cfg(target_arch = "x86_64")]
    {
        std::is_x86_feature_detected!("avx512f") && std::is_x86_feature_detected!("avx512ifma")
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        false
    }
}

/// Forward kernel and table layout of [`NttIfma`].
pub trait IfmaVariant: Send + Sync + 'static {
    const NAME: &'static str;
    const MIN_LOG_N: usize;
    const LAZY_BOUND: u64;

    /// Lays out the bit-reversed forward table for the kernel.
    fn expand(w: &[u64], q: u64) -> Result<Vec<u64>, NttError>;

    fn forward_lazy<S: Lanes8>(table: &LaneTable, a: &mut [u64], q: u64);

    /// Maps kernel output to canonical bit-reversed order.
    #[inline(always)]
    fn to_canonical_order<S: Lanes8>(_a: &mut [u64]) {}
}

/// Radix-4 levels with canonical output.
pub struct Radix4 {}

/// Radix-4 levels without the final lane transposition.
pub struct Radix4Unordered {}

/// Radix-4 levels down to stride 8, then 16-element radix-2 blocks.
pub struct R4R2 {}

/// Radix-2 levels down to 16-element blocks, then the same block tail.
pub struct R2x16 {}

impl IfmaVariant for Radix4 {
    const NAME: &'static str = "ntt-ifma";
    const MIN_LOG_N: usize = 5;
    const LAZY_BOUND: u64 = 8;

    fn expand(w: &[u64], q: u64) -> Result<Vec<u64>, NttError> {
        expand::expand_radix4(w, q, false)
    }

    #[inline(always)]
    fn forward_lazy<S: Lanes8>(table: &LaneTable, a: &mut [u64], q: u64) {
        radix4::forward_lazy::<S>(table, a, q, false)
    }
}

impl IfmaVariant for Radix4Unordered {
    const NAME: &'static str = "ntt-ifma-unordered";
    const MIN_LOG_N: usize = 5;
    const LAZY_BOUND: u64 = 8;

    fn expand(w: &[u64], q: u64) -> Result<Vec<u64>, NttError> {
        expand::expand_radix4(w, q, true)
    }

    #[inline(always)]
    fn forward_lazy<S: Lanes8>(table: &LaneTable, a: &mut [u64], q: u64) {
        radix4::forward_lazy::<S>(table, a, q, true)
    }

    #[inline(always)]
    fn to_canonical_order<S: Lanes8>(a: &mut [u64]) {
        radix4::unorder_fixup::<S>(a)
    }
}

impl IfmaVariant for R4R2 {
    const NAME: &'static str = "ntt-ifma-r4r2";
    const MIN_LOG_N: usize = 4;
    const LAZY_BOUND: u64 = 4;

    fn expand(w: &[u64], q: u64) -> Result<Vec<u64>, NttError> {
        expand::expand_r4r2(w, q)
    }

    #[inline(always)]
    fn forward_lazy<S: Lanes8>(table: &LaneTable, a: &mut [u64], q: u64) {
        mixed::forward_r4r2::<S>(table, a, q)
    }
}

impl IfmaVariant for R2x16 {
    const NAME: &'static str = "ntt-ifma-r2x16";
    const MIN_LOG_N: usize = 4;
    const LAZY_BOUND: u64 = 4;

    fn expand(w: &[u64], _q: u64) -> Result<Vec<u64>, NttError> {
        expand::expand_r2x16(w)
    }

    #[inline(always)]
    fn forward_lazy<S: Lanes8>(table: &LaneTable, a: &mut [u64], q: u64) {
        mixed::forward_r2x16::<S>(table, a, q)
    }
}

/// 8-lane backend, see the module documentation.
pub struct NttIfma<V: IfmaVariant = Radix4> {
    _marker: PhantomData<V>,
}

pub struct IfmaTables {
    log_n: usize,
    q: u64,
    fwd: LaneTable,
    /// Scalar radix-4 expansion of the inverse table, 52-bit constants.
    inv: Vec<MulOp>,
    n_inv: MulOp,
    /// Set when the host runs the kernels on 512-bit registers.
    native: bool,
}

impl IfmaTables {
    pub fn new<V: IfmaVariant>(params: &NttParams) -> Result<Self, NttError> {
        let (n, q) = (params.n(), params.q());
        let fwd: LaneTable = LaneTable::new(V::expand(&build_twiddle_table(params.w(), n, q)?, q)?, q)?;
        let inv: Vec<u64> = expand_radix4(&build_inverse_twiddle_table(params.w_inv(), n, q)?, q)?;
        let native: bool = has_native_ifma();
        tracing::debug!(
            backend = V::NAME,
            log_n = params.log_n(),
            q,
            fwd_len = fwd.len(),
            inv_len = inv.len(),
            native,
            "lane tables"
        );
        Ok(Self {
            log_n: params.log_n(),
            q,
            fwd,
            inv: build_operators::<IFMA_WORD_SIZE>(&inv, q)?,
            n_inv: n_inv_operator::<IFMA_WORD_SIZE>(params.n_inv(), q),
            native,
        })
    }

    /// Whether transforms over these tables run on 512-bit registers.
    pub fn is_native(&self) -> bool {
        self.native
    }

    fn forward_lazy<V: IfmaVariant>(&self, a: &mut [u64]) {
        #[cfg(target_arch = "x86_64")]
        if self.native {
            // SAFETY: `native` is only set when the host reports avx512f and avx512ifma.
            return unsafe { avx512::forward_lazy::<V>(&self.fwd, a, self.q) };
        }
        V::forward_lazy::<U64x8>(&self.fwd, a, self.q)
    }

    fn inverse<V: IfmaVariant>(&self, a: &mut [u64]) {
        #[cfg(target_arch = "x86_64")]
        if self.native {
            // SAFETY: as in `forward_lazy`.
            return unsafe { avx512::inverse::<V>(&self.inv, self.n_inv, a, self.q) };
        }
        V::to_canonical_order::<U64x8>(a);
        inverse::inverse::<U64x8>(&self.inv, self.n_inv, a, self.q)
    }

    fn final_reduce(&self, a: &mut [u64], bound: u64) {
        #[cfg(target_arch = "x86_64")]
        if self.native {
            // SAFETY: as in `forward_lazy`.
            return unsafe { avx512::final_reduce(a, self.q, bound) };
        }
        final_reduce::<U64x8>(a, self.q, bound)
    }
}

impl NttTables for IfmaTables {
    fn q(&self) -> u64 {
        self.q
    }

    fn log_n(&self) -> usize {
        self.log_n
    }
}

/// Lane-wise `[0, 8q) -> [0, q)`.
#[inline(always)]
pub fn final_reduce_q8<S: Lanes8>(a: &mut [u64], q: u64) {
    let (q4, q2, q1) = (S::splat(q << 2), S::splat(q << 1), S::splat(q));
    a.chunks_exact_mut(8).for_each(|x| {
        S::load(x)
            .reduce_if_greater(q4)
            .reduce_if_greater(q2)
            .reduce_if_greater(q1)
            .store(x)
    });
}

/// Lane-wise `[0, 4q) -> [0, q)`.
#[inline(always)]
pub fn final_reduce_q4<S: Lanes8>(a: &mut [u64], q: u64) {
    let (q2, q1) = (S::splat(q << 1), S::splat(q));
    a.chunks_exact_mut(8).for_each(|x| {
        S::load(x)
            .reduce_if_greater(q2)
            .reduce_if_greater(q1)
            .store(x)
    });
}

/// `[0, bound * q) -> [0, q)` for a lazy bound of 8 or 4.
#[inline(always)]
fn final_reduce<S: Lanes8>(a: &mut [u64], q: u64, bound: u64) {
    match bound {
        8 => final_reduce_q8::<S>(a, q),
        _ => final_reduce_q4::<S>(a, q),
    }
}

impl<V: IfmaVariant> NttBackend for NttIfma<V> {
    const NAME: &'static str = V::NAME;
    const MAX_MODULUS_BITS: u32 = 49;
    const MIN_LOG_N: usize = V::MIN_LOG_N;
    const LAZY_BOUND: u64 = V::LAZY_BOUND;

    type Tables = IfmaTables;

    fn prepare(params: &NttParams) -> Result<IfmaTables, NttError> {
        IfmaTables::new::<V>(params)
    }

    fn forward_lazy(tables: &IfmaTables, a: &mut [u64]) {
        tables.forward_lazy::<V>(a)
    }

    fn forward(tables: &IfmaTables, a: &mut [u64]) {
        tables.forward_lazy::<V>(a);
        tables.final_reduce(a, V::LAZY_BOUND)
    }

    fn inverse(tables: &IfmaTables, a: &mut [u64]) {
        tables.inverse::<V>(a)
    }

    fn to_canonical_order(_tables: &IfmaTables, a: &mut [u64]) {
        V::to_canonical_order::<U64x8>(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn final_reductions() {
        let q: u64 = 0x10001;
        let mut a: Vec<u64> = (0..64).map(|i| i * (8 * q / 64) + 7).collect();
        let expected: Vec<u64> = a.iter().map(|&x| x % q).collect();
        final_reduce_q8::<U64x8>(&mut a, q);
        assert_eq!(a, expected);

        let mut b: Vec<u64> = (0..64).map(|i| i * (4 * q / 64) + 3).collect();
        let expected: Vec<u64> = b.iter().map(|&x| x % q).collect();
        final_reduce_q4::<U64x8>(&mut b, q);
        assert_eq!(b, expected);
    }

    #[test]
    fn native_path_follows_host() {
        let params: NttParams = NttParams::find(6, ntt_hal::test_suite::cases::Q49).unwrap();
        let tables: IfmaTables = IfmaTables::new::<Radix4Unordered>(&params).unwrap();
        assert_eq!(tables.is_native(), has_native_ifma());
        if !cfg!(target_arch = "x86_64") {
            assert!(!tables.is_native());
        }
    }

    #[test]
    fn capabilities() {
        assert!(NttIfma::<Radix4>::supports(ntt_hal::test_suite::cases::Q49));
        assert!(!NttIfma::<Radix4>::supports(1 << 49 | 1));
        assert!(!NttIfma::<Radix4>::supports_log_n(4));
        assert!(NttIfma::<R4R2>::supports_log_n(4));
        assert_eq!(NttIfma::<R2x16>::LAZY_BOUND, 4);
    }
}
