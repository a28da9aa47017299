//! Fixed-point modular multiplication and the lazy reduction ladder.
//!
//! A [`MulOp`] pairs a twiddle `op = r` with its Shoup constant
//! `con = floor(r * 2^W / q)` for a fixed-point width `W`:
//!
//! ```text
//! mul_mod_q2(w, t) = w.op * t - floor(w.con * t / 2^W) * q      (mod 2^64)
//! ```
//!
//! The result is congruent to `r * t` and lies in `[0, 2q)` whenever
//! `t < 2^W` and `r < q`. Three widths are in use:
//!
//! | `W`                | Used by                                       |
//! |--------------------|-----------------------------------------------|
//! | [`WORD_SIZE`] (64) | scalar backends                               |
//! | [`VMSL_WORD_SIZE`] | 2-lane backend, 56-bit multiply-sum           |
//! | [`IFMA_WORD_SIZE`] | 8-lane backend, 52-bit fused multiply-add     |

pub const WORD_SIZE: u32 = 64;
pub const VMSL_WORD_SIZE: u32 = 56;
pub const IFMA_WORD_SIZE: u32 = 52;

pub const VMSL_WORD_MASK: u64 = (1 << VMSL_WORD_SIZE) - 1;
pub const IFMA_WORD_MASK: u64 = (1 << IFMA_WORD_SIZE) - 1;

pub trait WordOps<O> {
    fn log2(self) -> O;
    fn reverse_bits_msb(self, n: u32) -> O;
}

impl WordOps<usize> for usize {
    /// `ceil(log2(self))`.
    #[inline(always)]
    fn log2(self) -> usize {
        (usize::BITS - (self - 1).leading_zeros()) as _
    }
    #[inline(always)]
    fn reverse_bits_msb(self, n: u32) -> usize {
        if n == 0 {
            return 0;
        }
        self.reverse_bits() >> (usize::BITS - n)
    }
}

pub trait ReduceOnce<O> {
    /// Returns self-q if self >= q else self.
    /// User must ensure that 2q fits in O.
    fn reduce_once(&self, q: O) -> O;
    /// Assigns self-q to self if self >= q.
    fn reduce_once_assign(&mut self, q: O);
}

impl ReduceOnce<u64> for u64 {
    #[inline(always)]
    fn reduce_once(&self, q: u64) -> u64 {
        debug_assert!(q < 0x8000000000000000, "2q >= 2^64");
        (*self).min(self.wrapping_sub(q))
    }

    #[inline(always)]
    fn reduce_once_assign(&mut self, q: u64) {
        *self = self.reduce_once(q)
    }
}

#[inline(always)]
pub fn reduce_2q_to_q(v: u64, q: u64) -> u64 {
    v.reduce_once(q)
}

#[inline(always)]
pub fn reduce_4q_to_2q(v: u64, q: u64) -> u64 {
    v.reduce_once(q << 1)
}

#[inline(always)]
pub fn reduce_8q_to_4q(v: u64, q: u64) -> u64 {
    v.reduce_once(q << 2)
}

#[inline(always)]
pub fn reduce_4q_to_q(v: u64, q: u64) -> u64 {
    reduce_2q_to_q(reduce_4q_to_2q(v, q), q)
}

#[inline(always)]
pub fn reduce_8q_to_2q(v: u64, q: u64) -> u64 {
    reduce_4q_to_2q(reduce_8q_to_4q(v, q), q)
}

#[inline(always)]
pub fn reduce_8q_to_q(v: u64, q: u64) -> u64 {
    reduce_2q_to_q(reduce_8q_to_2q(v, q), q)
}

/// Brings every element of `a` from `[0, bound * q)` to `[0, q)`.
///
/// `bound` is one of 1, 2, 4 or 8.
pub fn final_reduce(a: &mut [u64], q: u64, bound: u64) {
    match bound {
        1 => {}
        2 => a.iter_mut().for_each(|x| *x = reduce_2q_to_q(*x, q)),
        4 => a.iter_mut().for_each(|x| *x = reduce_4q_to_q(*x, q)),
        8 => a.iter_mut().for_each(|x| *x = reduce_8q_to_q(*x, q)),
        _ => unreachable!("invalid lazy bound {bound}"),
    }
}

/// Shoup multiply operator: twiddle value and its `W`-bit quotient.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MulOp {
    pub op: u64,
    pub con: u64,
}

impl MulOp {
    /// Prepares `op` for fixed-point width `W`.
    #[inline(always)]
    pub fn new<const W: u32>(op: u64, q: u64) -> MulOp {
        let con: u128 = ((op as u128) << W) / q as u128;
        debug_assert!(con <= u64::MAX as u128, "MulOp::new: op={op} too large for W={W}");
        MulOp { op, con: con as u64 }
    }

    #[inline(always)]
    pub fn value(&self) -> u64 {
        self.op
    }

    #[inline(always)]
    pub fn quotient(&self) -> u64 {
        self.con
    }
}

/// `r * t mod q` in `[0, 2q)`.
#[inline(always)]
pub fn mul_mod_q2<const W: u32>(w: MulOp, t: u64, q: u64) -> u64 {
    let hi: u64 = ((w.con as u128 * t as u128) >> W) as u64;
    w.op.wrapping_mul(t).wrapping_sub(hi.wrapping_mul(q))
}

/// `r * t mod q` in `[0, q)`.
#[inline(always)]
pub fn mul_mod_q<const W: u32>(w: MulOp, t: u64, q: u64) -> u64 {
    reduce_2q_to_q(mul_mod_q2::<W>(w, t, q), q)
}

/// `r1 * t1 + r2 * t2 mod q` in `[0, 2q)`, sharing one high-part extraction.
#[inline(always)]
pub fn dbl_mul_mod_q2<const W: u32>(w1: MulOp, w2: MulOp, t1: u64, t2: u64, q: u64) -> u64 {
    let hi: u64 = ((w1.con as u128 * t1 as u128 + w2.con as u128 * t2 as u128) >> W) as u64;
    t1.wrapping_mul(w1.op)
        .wrapping_add(t2.wrapping_mul(w2.op))
        .wrapping_sub(hi.wrapping_mul(q))
}

/// `a * b mod q`, exact. Precomputation only.
#[inline(always)]
pub fn mod_mul(a: u64, b: u64, q: u64) -> u64 {
    ((a as u128 * b as u128) % q as u128) as u64
}

pub fn mod_pow(mut x: u64, mut e: u64, q: u64) -> u64 {
    let mut r: u64 = 1 % q;
    x %= q;
    while e > 0 {
        if e & 1 == 1 {
            r = mod_mul(r, x, q);
        }
        x = mod_mul(x, x, q);
        e >>= 1;
    }
    r
}

/// Inverse modulo a prime `q`.
pub fn mod_inv(x: u64, q: u64) -> u64 {
    mod_pow(x, q - 2, q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sampling::Source;

    fn below(source: &mut Source, bound: u64) -> u64 {
        source.next_u64n(bound, u64::MAX >> (bound - 1).leading_zeros())
    }

    fn check_shoup<const W: u32>(q: u64) {
        let mut source: Source = Source::new([W as u8; 32]);
        for _ in 0..1000 {
            let r: u64 = source.next_residue(q);
            let t: u64 = below(&mut source, q << 2);
            let w: MulOp = MulOp::new::<W>(r, q);
            let x: u64 = mul_mod_q2::<W>(w, t, q);
            assert!(x < 2 * q, "W={W}: {x} >= 2q");
            assert_eq!(x % q, mod_mul(r, t, q));
            assert_eq!(mul_mod_q::<W>(w, t, q), mod_mul(r, t, q));
        }
    }

    #[test]
    fn shoup_property() {
        check_shoup::<WORD_SIZE>(0x7fffffffe0001);
        check_shoup::<WORD_SIZE>(0x1e01);
        check_shoup::<VMSL_WORD_SIZE>(0x80000001c0001);
        check_shoup::<IFMA_WORD_SIZE>(0x1fffffff50001);
    }

    #[test]
    fn dbl_mul() {
        let q: u64 = 0xfff88001;
        let mut source: Source = Source::new([9u8; 32]);
        for _ in 0..1000 {
            let (r1, r2) = (source.next_residue(q), source.next_residue(q));
            let t1: u64 = below(&mut source, q << 3);
            let t2: u64 = below(&mut source, q << 3);
            let x: u64 = dbl_mul_mod_q2::<WORD_SIZE>(
                MulOp::new::<WORD_SIZE>(r1, q),
                MulOp::new::<WORD_SIZE>(r2, q),
                t1,
                t2,
                q,
            );
            assert!(x < 2 * q);
            assert_eq!(x % q, (mod_mul(r1, t1, q) + mod_mul(r2, t2, q)) % q);
        }
    }

    #[test]
    fn ladder() {
        let q: u64 = 0x10001;
        for v in (0..8 * q).step_by(97) {
            let r: u64 = reduce_8q_to_q(v, q);
            assert_eq!(r, v % q);
            assert_eq!(reduce_8q_to_4q(v, q) % q, r);
            assert!(reduce_8q_to_4q(v, q) < 4 * q);
            assert!(reduce_8q_to_2q(v, q) < 2 * q);
            if v < 4 * q {
                assert_eq!(reduce_4q_to_q(v, q), r);
                assert!(reduce_4q_to_2q(v, q) < 2 * q);
            }
            if v < 2 * q {
                let once: u64 = reduce_2q_to_q(v, q);
                assert_eq!(reduce_2q_to_q(once, q), once);
            }
        }
    }

    #[test]
    fn final_reduce_bounds() {
        let q: u64 = 0x1e01;
        let mut a: Vec<u64> = (0..8 * q).collect();
        final_reduce(&mut a, q, 8);
        assert!(a.iter().enumerate().all(|(i, &x)| x == i as u64 % q));
    }

    #[test]
    fn inverses() {
        let q: u64 = 0x10001;
        assert_eq!(mod_mul(mod_inv(1 << 9, q), 1 << 9, q), 1);
        assert_eq!(mod_pow(3, (q - 1) >> 1, q), q - 1);
        assert_eq!(10usize.reverse_bits_msb(4), 5);
        assert_eq!(1024usize.log2(), 10);
    }
}
