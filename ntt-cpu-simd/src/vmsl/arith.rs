//! 2-lane arithmetic on 56-bit Shoup constants through the 128-bit
//! multiply-sum.
//!
//! The `Y` and `T` inputs of a radix-4 node share one lane pair, so both of
//! their products against the inner roots come out of a single multiply-sum.
//! Inputs must stay below `2^56`; with `q < 2^52` the forward bound `8q` and
//! the inverse intermediates `< 8q` both qualify.

use ntt_hal::modulus::{MulOp, VMSL_WORD_MASK, VMSL_WORD_SIZE};

use crate::lanes::{Lanes, U64x2};

/// Modulus constants of one transform.
#[derive(Clone, Copy, Debug)]
pub struct VmslModulus {
    pub q: u64,
    pub q2: u64,
    pub q4: u64,
    /// `[0, -q mod 2^56]`, the multiplier folding the quotient back in.
    pub neg_q: U64x2,
}

impl VmslModulus {
    pub fn new(q: u64) -> Self {
        Self {
            q,
            q2: q << 1,
            q4: q << 2,
            neg_q: Lanes([0, q.wrapping_neg() & VMSL_WORD_MASK]),
        }
    }
}

/// Two inner roots sharing a lane pair, with their constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RootPair {
    pub op: U64x2,
    pub con: U64x2,
}

impl RootPair {
    #[inline(always)]
    pub fn new(w0: MulOp, w1: MulOp) -> Self {
        Self {
            op: Lanes([w0.op, w1.op]),
            con: Lanes([w0.con, w1.con]),
        }
    }
}

/// `w * z mod q` in `[0, 2q)`.
#[inline(always)]
pub fn mul_mod_q2(w: MulOp, z: u64, m: &VmslModulus) -> u64 {
    let hi: u64 = ((w.con as u128 * z as u128) >> VMSL_WORD_SIZE) as u64;
    U64x2::msum(Lanes([w.op, m.neg_q.0[1]]), Lanes([z, hi]), 0) as u64 & VMSL_WORD_MASK
}

/// `r.op[0] * yt[0] + r.op[1] * yt[1] mod q` in `[0, 2q)`: the sum of both
/// constant products is floored once.
#[inline(always)]
pub fn dbl_mul_mod_q2(r: &RootPair, yt: U64x2, m: &VmslModulus) -> u64 {
    let hi: u128 = U64x2::msum(r.con, yt, 0) >> VMSL_WORD_SIZE;
    let lo: u128 = U64x2::msum(r.op, yt, 0);
    let sum: U64x2 = U64x2::from_u128(U64x2::msum(m.neg_q, U64x2::from_u128(hi), lo));
    sum.0[1] & VMSL_WORD_MASK
}

/// Roots of one forward or inverse radix-4 node.
#[derive(Clone, Copy, Debug)]
pub struct NodeRoots {
    pub outer: MulOp,
    pub r1: RootPair,
    pub r2: RootPair,
}

impl NodeRoots {
    /// `r1 = (w[m2], w[m2 + 1])`, `r2 = (w[m2 + 2], w[m2 + 3])`.
    #[inline(always)]
    pub fn forward(e: &[MulOp], m: usize, j: usize) -> Self {
        let m1: usize = 2 * (m + j);
        let m2: usize = 2 * m1;
        Self {
            outer: e[m1],
            r1: RootPair::new(e[m2], e[m2 + 1]),
            r2: RootPair::new(e[m2 + 2], e[m2 + 3]),
        }
    }

    /// `r1 = (w[m2], w[m2 + 2])`, `r2 = (w[m2 + 1], w[m2 + 3])`.
    #[inline(always)]
    pub fn inverse(e: &[MulOp], m: usize, j: usize) -> Self {
        let m1: usize = 2 * (m + j);
        let m2: usize = 2 * m1;
        Self {
            outer: e[m1],
            r1: RootPair::new(e[m2], e[m2 + 2]),
            r2: RootPair::new(e[m2 + 1], e[m2 + 3]),
        }
    }
}

/// Inputs `< 8q`, outputs `< 8q`.
#[inline(always)]
pub fn radix4_fwd(v: [u64; 4], w: &NodeRoots, m: &VmslModulus) -> [u64; 4] {
    let [x, y, z, t] = v;
    let x: u64 = x.min(x.wrapping_sub(m.q4));
    let z: u64 = mul_mod_q2(w.outer, z, m);
    let yt: U64x2 = Lanes([y, t]);
    let y1: u64 = dbl_mul_mod_q2(&w.r1, yt, m);
    let y2: u64 = dbl_mul_mod_q2(&w.r2, yt, m);
    [
        x + z + y1,
        m.q2 + x + z - y1,
        m.q2 + x - z + y2,
        m.q4 + x - z - y2,
    ]
}

/// Inputs `< 2q`, outputs `< 2q`.
#[inline(always)]
pub fn radix4_inv(v: [u64; 4], w: &NodeRoots, m: &VmslModulus) -> [u64; 4] {
    let [x, y, z, t] = v;
    let t0: u64 = z + t;
    let t1: u64 = x + y;
    let zt: U64x2 = Lanes([m.q4 + x - y, m.q4 + z - t]);
    let sum: u64 = t1 + t0;
    let sum: u64 = sum.min(sum.wrapping_sub(m.q4));
    [
        sum.min(sum.wrapping_sub(m.q2)),
        dbl_mul_mod_q2(&w.r1, zt, m),
        mul_mod_q2(w.outer, m.q4 + t1 - t0, m),
        dbl_mul_mod_q2(&w.r2, zt, m),
    ]
}

/// `[(a0, b0), (a1, b1)]`: regroups two lane pairs by lane.
#[inline(always)]
fn merge(a: U64x2, b: U64x2) -> [U64x2; 2] {
    [Lanes([a.0[0], b.0[0]]), Lanes([a.0[1], b.0[1]])]
}

/// [`radix4_fwd`] on two adjacent butterflies of one node, lane `l` of every
/// input holding butterfly `l`.
#[inline(always)]
pub fn radix4_fwd_x2(v: [U64x2; 4], w: &NodeRoots, m: &VmslModulus) -> [U64x2; 4] {
    let [x, y, z, t] = v;
    let (q2, q4) = (U64x2::splat(m.q2), U64x2::splat(m.q4));
    let x: U64x2 = x.reduce_if_greater(q4);
    let z: U64x2 = Lanes(z.0.map(|z| mul_mod_q2(w.outer, z, m)));
    let yt: [U64x2; 2] = merge(y, t);
    let y1: U64x2 = Lanes(yt.map(|yt| dbl_mul_mod_q2(&w.r1, yt, m)));
    let y2: U64x2 = Lanes(yt.map(|yt| dbl_mul_mod_q2(&w.r2, yt, m)));
    [x + z + y1, q2 + x + z - y1, q2 + x - z + y2, q4 + x - z - y2]
}

/// [`radix4_inv`] on two adjacent butterflies of one node.
#[inline(always)]
pub fn radix4_inv_x2(v: [U64x2; 4], w: &NodeRoots, m: &VmslModulus) -> [U64x2; 4] {
    let [x, y, z, t] = v;
    let (q2, q4) = (U64x2::splat(m.q2), U64x2::splat(m.q4));
    let t0: U64x2 = z + t;
    let t1: U64x2 = x + y;
    let zt: [U64x2; 2] = merge(q4 + x - y, q4 + z - t);
    [
        (t1 + t0).reduce_if_greater(q4).reduce_if_greater(q2),
        Lanes(zt.map(|zt| dbl_mul_mod_q2(&w.r1, zt, m))),
        Lanes((q4 + t1 - t0).0.map(|v| mul_mod_q2(w.outer, v, m))),
        Lanes(zt.map(|zt| dbl_mul_mod_q2(&w.r2, zt, m))),
    ]
}
