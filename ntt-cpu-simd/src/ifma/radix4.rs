//! 8-lane radix-4 forward kernel.
//!
//! Strides of at least 8 run on contiguous lanes with broadcast roots. The
//! stride-4 level transposes 128-bit blocks of two adjacent nodes, and the
//! stride-1 level gathers eight nodes per group. In unordered mode the
//! stride-1 level stores its lanes as they are, leaving every 32-element
//! group permuted; [`unorder_fixup`] restores canonical order.

use itertools::izip;
use ntt_hal::twiddle::has_even_power;

use crate::{
    ifma::arith::{LaneModulus, LaneOp, LaneTable, radix2_fwd, radix4_fwd},
    lanes::Lanes8,
};

/// Canonical position, within a 32-element group, of unordered position
/// `8s + k`.
#[inline(always)]
pub fn canonical_position(s: usize, k: usize) -> usize {
    const LANE_BLOCK: [usize; 8] = [0, 4, 1, 5, 2, 6, 3, 7];
    4 * LANE_BLOCK[k] + s
}

#[inline(always)]
fn load4<S: Lanes8>(block: &[u64]) -> [S; 4] {
    std::array::from_fn(|s| S::load(&block[8 * s..]))
}

/// Stores four vectors each holding the halves of two nodes back as the
/// two 16-element nodes.
#[inline(always)]
fn store_transposed<S: Lanes8>(block: &mut [u64], [x, y, z, t]: [S; 4]) {
    S::shuffle_i64x2::<0x44>(x, y).store(&mut block[..8]);
    S::shuffle_i64x2::<0x44>(z, t).store(&mut block[8..16]);
    S::shuffle_i64x2::<0xee>(x, y).store(&mut block[16..24]);
    S::shuffle_i64x2::<0xee>(z, t).store(&mut block[24..32]);
}

/// Inputs `< q`, outputs `< 8q`. `table` is laid out by
/// [`expand_radix4`](crate::ifma::expand::expand_radix4) with the same
/// `unordered` flag.
#[inline(always)]
pub fn forward_lazy<S: Lanes8>(table: &LaneTable, a: &mut [u64], q: u64, unordered: bool) {
    let n: usize = a.len();
    debug_assert!(n >= 32, "n={n} < 32");
    let m_q: LaneModulus<S> = LaneModulus::new(q);
    let mut idx: usize = 1;

    let (mut m, mut t, bound) = if has_even_power(n) {
        (1, n >> 2, n)
    } else {
        let w: LaneOp<S> = table.splat(idx);
        idx += 1;
        let (lo, hi) = a.split_at_mut(n >> 1);
        izip!(lo.chunks_exact_mut(8), hi.chunks_exact_mut(8)).for_each(|(x, y)| {
            let (u, v) = radix2_fwd(S::load(x), S::load(y), &w, &m_q);
            u.store(x);
            v.store(y);
        });
        (2, n >> 3, n >> 1)
    };

    while m < bound {
        match t {
            8.. => {
                for block in a.chunks_exact_mut(4 * t) {
                    let w: [LaneOp<S>; 5] = std::array::from_fn(|x| table.splat(idx + x));
                    idx += 5;
                    let (xs, rest) = block.split_at_mut(t);
                    let (ys, rest) = rest.split_at_mut(t);
                    let (zs, ts) = rest.split_at_mut(t);
                    izip!(
                        xs.chunks_exact_mut(8),
                        ys.chunks_exact_mut(8),
                        zs.chunks_exact_mut(8),
                        ts.chunks_exact_mut(8)
                    )
                    .for_each(|(x, y, z, u)| {
                        let v: [S; 4] = [&*x, &*y, &*z, &*u].map(S::load);
                        let out: [S; 4] = radix4_fwd(v, &w, &m_q);
                        izip!([x, y, z, u], out).for_each(|(s, o)| o.store(s));
                    });
                }
            }
            4 => {
                for block in a.chunks_exact_mut(32) {
                    let w: [LaneOp<S>; 5] = std::array::from_fn(|x| table.pair(idx + 2 * x));
                    idx += 10;
                    let [x1, y1, z1, t1] = load4::<S>(block);
                    let v: [S; 4] = [
                        S::shuffle_i64x2::<0x44>(x1, z1),
                        S::shuffle_i64x2::<0xee>(x1, z1),
                        S::shuffle_i64x2::<0x44>(y1, t1),
                        S::shuffle_i64x2::<0xee>(y1, t1),
                    ];
                    let out: [S; 4] = radix4_fwd(v, &w, &m_q);
                    if unordered {
                        izip!(block.chunks_exact_mut(8), out).for_each(|(s, o)| o.store(s));
                    } else {
                        store_transposed(block, out);
                    }
                }
            }
            _ => {
                debug_assert_eq!(t, 1);
                for block in a.chunks_exact_mut(32) {
                    let w: [LaneOp<S>; 5] = std::array::from_fn(|x| table.load(idx + 8 * x));
                    idx += 40;
                    let v: [S; 4] = std::array::from_fn(|s| S::gather(block, &std::array::from_fn(|k| 4 * k + s)));
                    let out: [S; 4] = radix4_fwd(v, &w, &m_q);
                    if unordered {
                        izip!(block.chunks_exact_mut(8), out).for_each(|(s, o)| o.store(s));
                    } else {
                        out.iter()
                            .enumerate()
                            .for_each(|(s, o)| o.scatter(block, &std::array::from_fn(|k| 4 * k + s)));
                    }
                }
            }
        }
        t >>= 2;
        m <<= 2;
    }

    debug_assert_eq!(idx, table.len(), "table not fully consumed");
}

/// Reorders the output of the unordered kernel into canonical bit-reversed
/// order, one 32-element group at a time.
#[inline(always)]
pub fn unorder_fixup<S: Lanes8>(a: &mut [u64]) {
    debug_assert_eq!(a.len() % 32, 0);
    a.chunks_exact_mut(32).for_each(|block| {
        let v: [S; 4] = load4(block);
        v.iter()
            .enumerate()
            .for_each(|(s, o)| o.scatter(block, &std::array::from_fn(|k| s + 4 * k)));
        let v: [S; 4] = load4(block);
        store_transposed(block, v);
    });
}
