//! Lane vectors and the 8-lane register model the kernels are written
//! against.
//!
//! [`Lanes`] is a portable `[u64; L]` value with lane-wise arithmetic. On 8
//! lanes it implements [`Lanes8`] with exact emulations of the 512-bit
//! primitives (four 128-bit blocks of two words per register); on 2 lanes it
//! carries the 128-bit multiply-sum (lane 0 is the high word).

use std::ops::{Add, BitAnd, Sub};

use ntt_hal::modulus::IFMA_WORD_MASK;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lanes<const L: usize>(pub [u64; L]);

pub type U64x8 = Lanes<8>;
pub type U64x2 = Lanes<2>;

impl<const L: usize> Default for Lanes<L> {
    fn default() -> Self {
        Self([0u64; L])
    }
}

impl<const L: usize> Lanes<L> {
    #[inline(always)]
    pub fn splat(x: u64) -> Self {
        Self([x; L])
    }

    #[inline(always)]
    fn zip_with<F: Fn(u64, u64) -> u64>(self, other: Self, f: F) -> Self {
        Self(std::array::from_fn(|i| f(self.0[i], other.0[i])))
    }

    /// `min(v, v - m)` with wrapping subtraction: subtracts `m` from lanes
    /// holding at least `m`.
    #[inline(always)]
    pub fn reduce_if_greater(self, m: Self) -> Self {
        self.zip_with(m, |v, m| v.min(v.wrapping_sub(m)))
    }
}

impl<const L: usize> Add for Lanes<L> {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self.zip_with(rhs, u64::wrapping_add)
    }
}

impl<const L: usize> Sub for Lanes<L> {
    type Output = Self;
    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        self.zip_with(rhs, u64::wrapping_sub)
    }
}

impl<const L: usize> BitAnd<u64> for Lanes<L> {
    type Output = Self;
    #[inline(always)]
    fn bitand(self, rhs: u64) -> Self {
        Self(self.0.map(|x| x & rhs))
    }
}

/// Eight 64-bit lanes with the primitives of a 512-bit register and 52-bit
/// fused multiply-add.
///
/// Arithmetic wraps modulo `2^64`. Gathers and scatters go through arrays.
pub trait Lanes8: Copy + Add<Output = Self> + Sub<Output = Self> + BitAnd<u64, Output = Self> {
    fn splat(x: u64) -> Self;

    fn from_array(a: [u64; 8]) -> Self;

    fn to_array(self) -> [u64; 8];

    /// Loads `a[..8]`.
    fn load(a: &[u64]) -> Self;

    /// Stores into `a[..8]`.
    fn store(self, a: &mut [u64]);

    /// Unsigned `min(v, v - m)`.
    fn reduce_if_greater(self, m: Self) -> Self;

    /// `acc + low52(low52(b) * low52(c))`.
    fn madd52lo(self, b: Self, c: Self) -> Self;

    /// `acc + high52(low52(b) * low52(c))`, the bits 52 to 103 of the product.
    fn madd52hi(self, b: Self, c: Self) -> Self;

    /// 128-bit block shuffle: blocks `imm[1:0]`, `imm[3:2]` of `a`, then
    /// `imm[5:4]`, `imm[7:6]` of `b`.
    fn shuffle_i64x2<const IMM: i32>(a: Self, b: Self) -> Self;

    /// Two-source permute: index bit 3 selects `b`, bits 2:0 the lane.
    fn permutex2var(a: Self, idx: &[u8; 8], b: Self) -> Self;

    /// Even lanes of each 128-bit block, interleaved.
    fn unpacklo(a: Self, b: Self) -> Self;

    /// Odd lanes of each 128-bit block, interleaved.
    fn unpackhi(a: Self, b: Self) -> Self;

    #[inline(always)]
    fn from_fn<F: FnMut(usize) -> u64>(f: F) -> Self {
        Self::from_array(std::array::from_fn(f))
    }

    #[inline(always)]
    fn gather(a: &[u64], idx: &[usize; 8]) -> Self {
        Self::from_fn(|i| a[idx[i]])
    }

    #[inline(always)]
    fn scatter(self, a: &mut [u64], idx: &[usize; 8]) {
        idx.iter().zip(self.to_array()).for_each(|(&i, x)| a[i] = x);
    }
}

#[inline(always)]
fn block(v: &U64x8, imm: i32) -> [u64; 2] {
    let i: usize = (imm & 3) as usize;
    [v.0[2 * i], v.0[2 * i + 1]]
}

impl Lanes8 for U64x8 {
    #[inline(always)]
    fn splat(x: u64) -> Self {
        Self([x; 8])
    }

    #[inline(always)]
    fn from_array(a: [u64; 8]) -> Self {
        Self(a)
    }

    #[inline(always)]
    fn to_array(self) -> [u64; 8] {
        self.0
    }

    #[inline(always)]
    fn load(a: &[u64]) -> Self {
        Self(std::array::from_fn(|i| a[i]))
    }

    #[inline(always)]
    fn store(self, a: &mut [u64]) {
        a[..8].copy_from_slice(&self.0)
    }

    #[inline(always)]
    fn reduce_if_greater(self, m: Self) -> Self {
        Lanes::reduce_if_greater(self, m)
    }

    #[inline(always)]
    fn madd52lo(self, b: Self, c: Self) -> Self {
        Self(std::array::from_fn(|i| {
            let p: u128 = (b.0[i] & IFMA_WORD_MASK) as u128 * (c.0[i] & IFMA_WORD_MASK) as u128;
            self.0[i].wrapping_add(p as u64 & IFMA_WORD_MASK)
        }))
    }

    #[inline(always)]
    fn madd52hi(self, b: Self, c: Self) -> Self {
        Self(std::array::from_fn(|i| {
            let p: u128 = (b.0[i] & IFMA_WORD_MASK) as u128 * (c.0[i] & IFMA_WORD_MASK) as u128;
            self.0[i].wrapping_add((p >> 52) as u64)
        }))
    }

    #[inline(always)]
    fn shuffle_i64x2<const IMM: i32>(a: Self, b: Self) -> Self {
        let [b0, b1, b2, b3] = [block(&a, IMM), block(&a, IMM >> 2), block(&b, IMM >> 4), block(&b, IMM >> 6)];
        Self([b0[0], b0[1], b1[0], b1[1], b2[0], b2[1], b3[0], b3[1]])
    }

    #[inline(always)]
    fn permutex2var(a: Self, idx: &[u8; 8], b: Self) -> Self {
        Self(std::array::from_fn(|i| {
            let src: &Self = if idx[i] & 8 != 0 { &b } else { &a };
            src.0[(idx[i] & 7) as usize]
        }))
    }

    #[inline(always)]
    fn unpacklo(a: Self, b: Self) -> Self {
        Self([a.0[0], b.0[0], a.0[2], b.0[2], a.0[4], b.0[4], a.0[6], b.0[6]])
    }

    #[inline(always)]
    fn unpackhi(a: Self, b: Self) -> Self {
        Self([a.0[1], b.0[1], a.0[3], b.0[3], a.0[5], b.0[5], a.0[7], b.0[7]])
    }
}

impl U64x2 {
    /// `a[0] * b[0] + a[1] * b[1] + acc` as one 128-bit value, the 2-lane
    /// multiply-sum.
    #[inline(always)]
    pub fn msum(a: Self, b: Self, acc: u128) -> u128 {
        (a.0[0] as u128 * b.0[0] as u128)
            .wrapping_add(a.0[1] as u128 * b.0[1] as u128)
            .wrapping_add(acc)
    }

    /// Splits a 128-bit value into `[high, low]`.
    #[inline(always)]
    pub fn from_u128(x: u128) -> Self {
        Self([(x >> 64) as u64, x as u64])
    }
}
