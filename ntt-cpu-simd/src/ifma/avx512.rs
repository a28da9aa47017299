//! [`Lanes8`] on 512-bit registers with the 52-bit fused multiply-add.
//!
//! [`Avx512`] values exist only inside the `#[target_feature]` entry points
//! below; callers must have checked [`has_native_ifma`](super::has_native_ifma)
//! first.

use core::arch::x86_64::{
    __m512i, _mm512_add_epi64, _mm512_and_si512, _mm512_loadu_si512, _mm512_madd52hi_epu64, _mm512_madd52lo_epu64,
    _mm512_min_epu64, _mm512_permutex2var_epi64, _mm512_set1_epi64, _mm512_shuffle_i64x2, _mm512_storeu_si512,
    _mm512_sub_epi64, _mm512_unpackhi_epi64, _mm512_unpacklo_epi64,
};
use std::ops::{Add, BitAnd, Sub};

use ntt_hal::modulus::MulOp;

use crate::{
    ifma::{IfmaVariant, arith::LaneTable, inverse},
    lanes::Lanes8,
};

#[derive(Clone, Copy)]
pub(crate) struct Avx512(__m512i);

impl Add for Avx512 {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Self(_mm512_add_epi64(self.0, rhs.0)) }
    }
}

impl Sub for Avx512 {
    type Output = Self;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Self(_mm512_sub_epi64(self.0, rhs.0)) }
    }
}

impl BitAnd<u64> for Avx512 {
    type Output = Self;
    #[inline(always)]
    fn bitand(self, rhs: u64) -> Self {
        unsafe { Self(_mm512_and_si512(self.0, _mm512_set1_epi64(rhs as i64))) }
    }
}

impl Lanes8 for Avx512 {
    #[inline(always)]
    fn splat(x: u64) -> Self {
        unsafe { Self(_mm512_set1_epi64(x as i64)) }
    }

    #[inline(always)]
    fn from_array(a: [u64; 8]) -> Self {
        unsafe { Self(_mm512_loadu_si512(a.as_ptr().cast())) }
    }

    #[inline(always)]
    fn to_array(self) -> [u64; 8] {
        let mut out: [u64; 8] = [0u64; 8];
        unsafe { _mm512_storeu_si512(out.as_mut_ptr().cast(), self.0) };
        out
    }

    #[inline(always)]
    fn load(a: &[u64]) -> Self {
        let a: &[u64] = &a[..8];
        unsafe { Self(_mm512_loadu_si512(a.as_ptr().cast())) }
    }

    #[inline(always)]
    fn store(self, a: &mut [u64]) {
        let a: &mut [u64] = &mut a[..8];
        unsafe { _mm512_storeu_si512(a.as_mut_ptr().cast(), self.0) }
    }

    #[inline(always)]
    fn reduce_if_greater(self, m: Self) -> Self {
        unsafe { Self(_mm512_min_epu64(self.0, _mm512_sub_epi64(self.0, m.0))) }
    }

    #[inline(always)]
    fn madd52lo(self, b: Self, c: Self) -> Self {
        unsafe { Self(_mm512_madd52lo_epu64(self.0, b.0, c.0)) }
    }

    #[inline(always)]
    fn madd52hi(self, b: Self, c: Self) -> Self {
        unsafe { Self(_mm512_madd52hi_epu64(self.0, b.0, c.0)) }
    }

    #[inline(always)]
    fn shuffle_i64x2<const IMM: i32>(a: Self, b: Self) -> Self {
        unsafe { Self(_mm512_shuffle_i64x2::<IMM>(a.0, b.0)) }
    }

    #[inline(always)]
    fn permutex2var(a: Self, idx: &[u8; 8], b: Self) -> Self {
        let idx: Self = Self::from_array(idx.map(u64::from));
        unsafe { Self(_mm512_permutex2var_epi64(a.0, idx.0, b.0)) }
    }

    #[inline(always)]
    fn unpacklo(a: Self, b: Self) -> Self {
        unsafe { Self(_mm512_unpacklo_epi64(a.0, b.0)) }
    }

    #[inline(always)]
    fn unpackhi(a: Self, b: Self) -> Self {
        unsafe { Self(_mm512_unpackhi_epi64(a.0, b.0)) }
    }
}

/// Forward kernel of `V`, inputs `< q`.
///
/// # Safety
/// The host must support `avx512f` and `avx512ifma`.
#[target_feature(enable = "avx512f,avx512ifma")]
pub(crate) unsafe fn forward_lazy<V: IfmaVariant>(table: &LaneTable, a: &mut [u64], q: u64) {
    V::forward_lazy::<Avx512>(table, a, q)
}

/// Inverse of the output of `V`'s forward kernel.
///
/// # Safety
/// The host must support `avx512f` and `avx512ifma`.
#[target_feature(enable = "avx512f,avx512ifma")]
pub(crate) unsafe fn inverse<V: IfmaVariant>(inv: &[MulOp], n_inv: MulOp, a: &mut [u64], q: u64) {
    V::to_canonical_order::<Avx512>(a);
    inverse::inverse::<Avx512>(inv, n_inv, a, q)
}

/// # Safety
/// The host must support `avx512f` and `avx512ifma`.
#[target_feature(enable = "avx512f,avx512ifma")]
pub(crate) unsafe fn final_reduce(a: &mut [u64], q: u64, bound: u64) {
    super::final_reduce::<Avx512>(a, q, bound)
}
