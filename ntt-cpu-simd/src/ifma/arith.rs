//! 8-lane Shoup arithmetic and butterflies with 52-bit products.
//!
//! Lane inputs stay below `2^52`, which holds for every bound used here
//! (`8q < 2^52` for `q < 2^49`).

use ntt_hal::{
    error::NttError,
    modulus::{IFMA_WORD_MASK, IFMA_WORD_SIZE, MulOp},
    twiddle::build_barrett_constants,
};

use crate::lanes::Lanes8;

/// A lane of operators: values and their 52-bit Shoup constants.
#[derive(Clone, Copy)]
pub struct LaneOp<S: Lanes8> {
    pub op: S,
    pub con: S,
}

impl<S: Lanes8> LaneOp<S> {
    #[inline(always)]
    pub fn splat(w: MulOp) -> Self {
        Self {
            op: S::splat(w.op),
            con: S::splat(w.con),
        }
    }

    /// One operator per lane.
    #[inline(always)]
    pub fn from_ops(w: &[MulOp; 8]) -> Self {
        Self {
            op: S::from_fn(|l| w[l].op),
            con: S::from_fn(|l| w[l].con),
        }
    }
}

/// Modulus broadcasts shared by every kernel of one transform.
#[derive(Clone, Copy)]
pub struct LaneModulus<S: Lanes8> {
    pub q: S,
    pub q2: S,
    pub q4: S,
    /// `-q mod 2^64`; only its low 52 bits enter the products.
    pub neg_q: S,
}

impl<S: Lanes8> LaneModulus<S> {
    #[inline(always)]
    pub fn new(q: u64) -> Self {
        Self {
            q: S::splat(q),
            q2: S::splat(q << 1),
            q4: S::splat(q << 2),
            neg_q: S::splat(q.wrapping_neg()),
        }
    }
}

/// An expanded forward table with its 52-bit constants, read by lane loads.
pub struct LaneTable {
    op: Vec<u64>,
    con: Vec<u64>,
}

impl LaneTable {
    pub fn new(op: Vec<u64>, q: u64) -> Result<Self, NttError> {
        let con: Vec<u64> = build_barrett_constants::<IFMA_WORD_SIZE>(&op, q)?;
        Ok(Self { op, con })
    }

    pub fn len(&self) -> usize {
        self.op.len()
    }

    pub fn is_empty(&self) -> bool {
        self.op.is_empty()
    }

    /// Entry `i` in every lane.
    #[inline(always)]
    pub fn splat<S: Lanes8>(&self, i: usize) -> LaneOp<S> {
        LaneOp {
            op: S::splat(self.op[i]),
            con: S::splat(self.con[i]),
        }
    }

    /// Entry `i` in lanes 0..4, entry `i + 1` in lanes 4..8.
    #[inline(always)]
    pub fn pair<S: Lanes8>(&self, i: usize) -> LaneOp<S> {
        LaneOp {
            op: S::from_fn(|l| self.op[i + (l >> 2)]),
            con: S::from_fn(|l| self.con[i + (l >> 2)]),
        }
    }

    /// Entries `i..i + 8`.
    #[inline(always)]
    pub fn load<S: Lanes8>(&self, i: usize) -> LaneOp<S> {
        LaneOp {
            op: S::load(&self.op[i..]),
            con: S::load(&self.con[i..]),
        }
    }
}

/// `w * t mod q` in `[0, 2q)`.
#[inline(always)]
pub fn mul_mod_q2<S: Lanes8>(w: &LaneOp<S>, t: S, m: &LaneModulus<S>) -> S {
    let zero: S = S::splat(0);
    let hi: S = zero.madd52hi(w.con, t);
    zero.madd52lo(hi, m.neg_q).madd52lo(w.op, t) & IFMA_WORD_MASK
}

/// `w1 * t1 + w2 * t2 mod q` in `[0, 2q)`.
///
/// The two high parts are floored separately, so the raw result can reach
/// `4q`; one conditional subtraction brings it back.
#[inline(always)]
pub fn dbl_mul_mod_q2<S: Lanes8>(w1: &LaneOp<S>, w2: &LaneOp<S>, t1: S, t2: S, m: &LaneModulus<S>) -> S {
    let zero: S = S::splat(0);
    let hi: S = zero.madd52hi(w1.con, t1).madd52hi(w2.con, t2);
    let raw: S = zero.madd52lo(w1.op, t1).madd52lo(w2.op, t2).madd52lo(hi, m.neg_q) & IFMA_WORD_MASK;
    raw.reduce_if_greater(m.q2)
}

/// Harvey forward butterfly; inputs `< 4q`, outputs `< 4q`.
#[inline(always)]
pub fn radix2_fwd<S: Lanes8>(x: S, y: S, w: &LaneOp<S>, m: &LaneModulus<S>) -> (S, S) {
    let x: S = x.reduce_if_greater(m.q2);
    let t: S = mul_mod_q2(w, y, m);
    (x + t, m.q2 - t + x)
}

/// Radix-4 forward butterfly; inputs `< 8q`, outputs `< 8q`.
#[inline(always)]
pub fn radix4_fwd<S: Lanes8>(v: [S; 4], w: &[LaneOp<S>; 5], m: &LaneModulus<S>) -> [S; 4] {
    let [x, y, z, t] = v;
    let t1: S = x.reduce_if_greater(m.q4);
    let t2: S = mul_mod_q2(&w[0], z, m);
    let y1: S = dbl_mul_mod_q2(&w[1], &w[2], y, t, m);
    let y2: S = dbl_mul_mod_q2(&w[3], &w[4], y, t, m);
    let t3: S = t1 + t2;
    let t4: S = t1 - t2;
    [t3 + y1, m.q2 - y1 + t3, m.q2 + y2 + t4, m.q4 - y2 + t4]
}

/// Radix-4 inverse butterfly; inputs `< 2q`, outputs `< 2q`.
#[inline(always)]
pub fn radix4_inv<S: Lanes8>(v: [S; 4], w: &[LaneOp<S>; 5], m: &LaneModulus<S>) -> [S; 4] {
    let [x, y, z, t] = v;
    let t0: S = z + t;
    let t1: S = x + y;
    let t2: S = m.q4 + x - y;
    let t3: S = m.q4 + z - t;
    [
        (t1 + t0).reduce_if_greater(m.q4).reduce_if_greater(m.q2),
        dbl_mul_mod_q2(&w[1], &w[3], t2, t3, m),
        mul_mod_q2(&w[0], m.q4 + t1 - t0, m).reduce_if_greater(m.q),
        dbl_mul_mod_q2(&w[2], &w[4], t2, t3, m),
    ]
}

const IDX_EVEN: [u8; 8] = [0, 2, 8, 10, 4, 6, 12, 14];
const IDX_ODD: [u8; 8] = [1, 3, 9, 11, 5, 7, 13, 15];

/// Last three radix-2 levels (strides 4, 2, 1) of a 16-element block held in
/// `x = a[..8]`, `y = a[8..]`, stored back into `a[..16]` in natural order.
#[inline(always)]
pub fn fwd16_tail<S: Lanes8>(a: &mut [u64], x: S, y: S, w: &[LaneOp<S>; 3], m: &LaneModulus<S>) {
    let (x, y) = (S::shuffle_i64x2::<0x44>(x, y), S::shuffle_i64x2::<0xee>(x, y));
    let (x, y) = radix2_fwd(x, y, &w[0], m);
    let (x, y) = (S::shuffle_i64x2::<0x88>(x, y), S::shuffle_i64x2::<0xdd>(x, y));
    let (x, y) = radix2_fwd(x, y, &w[1], m);
    let (x, y) = (S::permutex2var(x, &IDX_EVEN, y), S::permutex2var(x, &IDX_ODD, y));
    let (x, y) = radix2_fwd(x, y, &w[2], m);
    S::unpacklo(x, y).store(&mut a[..8]);
    S::unpackhi(x, y).store(&mut a[8..16]);
}

#[cfg(test)]
mod tests {
    use ntt_hal::modulus::mod_mul;
    use sampling::Source;

    use super::*;
    use crate::lanes::U64x8;

    const Q: u64 = 0x1fffffff50001;

    fn lane_op(r: u64) -> LaneOp<U64x8> {
        LaneOp::splat(MulOp::new::<IFMA_WORD_SIZE>(r, Q))
    }

    #[test]
    fn products_at_49_bits() {
        let m: LaneModulus<U64x8> = LaneModulus::new(Q);
        let mut source: Source = Source::new([52u8; 32]);
        for _ in 0..200 {
            let (r1, r2) = (source.next_residue(Q), source.next_residue(Q));
            let t1: U64x8 = U64x8::from_fn(|_| source.next_residue(8 * Q));
            let t2: U64x8 = U64x8::from_fn(|_| source.next_residue(8 * Q));
            let p: U64x8 = mul_mod_q2(&lane_op(r1), t1, &m);
            let d: U64x8 = dbl_mul_mod_q2(&lane_op(r1), &lane_op(r2), t1, t2, &m);
            for i in 0..8 {
                assert!(p.0[i] < 2 * Q && d.0[i] < 2 * Q);
                assert_eq!(p.0[i] % Q, mod_mul(r1, t1.0[i], Q));
                assert_eq!(d.0[i] % Q, (mod_mul(r1, t1.0[i], Q) + mod_mul(r2, t2.0[i], Q)) % Q);
            }
        }
    }
}
