//! 8-lane kernels finishing with three radix-2 levels inside 16-element
//! blocks; both keep the lazy bound at `4q` and emit canonical order.

use itertools::izip;
use ntt_hal::twiddle::has_even_power;

use crate::{
    ifma::arith::{LaneModulus, LaneOp, LaneTable, fwd16_tail, radix2_fwd, radix4_fwd},
    lanes::Lanes8,
};

/// Stride-8 radix-2 level then [`fwd16_tail`] on each of the `blocks`
/// 16-element blocks. `stride8` gives the stride-8 root of block `i`, `roots`
/// is the table offset of the trailing lane roots.
#[inline(always)]
fn finish_blocks<S: Lanes8, F: Fn(usize) -> Option<LaneOp<S>>>(
    a: &mut [u64],
    table: &LaneTable,
    roots: usize,
    stride8: F,
    m_q: &LaneModulus<S>,
) {
    let blocks: usize = a.len() >> 4;
    a.chunks_exact_mut(16).enumerate().for_each(|(i, block)| {
        let mut x: S = S::load(&block[..8]).reduce_if_greater(m_q.q4);
        let mut y: S = S::load(&block[8..]).reduce_if_greater(m_q.q4);
        if let Some(w) = stride8(i) {
            (x, y) = radix2_fwd(x, y, &w, m_q);
        }
        let i2: usize = roots + 8 * i;
        let w: [LaneOp<S>; 3] = [table.load(i2), table.load(i2 + 8 * blocks), table.load(i2 + 16 * blocks)];
        fwd16_tail(block, x, y, &w, m_q);
    });
}

/// Radix-4 levels down to stride 8, then radix-2. Inputs `< q`, outputs
/// `< 4q`, `n >= 16`. `table` is laid out by
/// [`expand_r4r2`](crate::ifma::expand::expand_r4r2).
#[inline(always)]
pub fn forward_r4r2<S: Lanes8>(table: &LaneTable, a: &mut [u64], q: u64) {
    let n: usize = a.len();
    debug_assert!(n >= 16, "n={n} < 16");
    let m_q: LaneModulus<S> = LaneModulus::new(q);
    let mut idx: usize = 1;

    let mut t: usize = n >> 2;
    while t > 4 {
        for block in a.chunks_exact_mut(4 * t) {
            let w: [LaneOp<S>; 5] = std::array::from_fn(|x| table.splat(idx + x));
            idx += 5;
            let (xs, rest) = block.split_at_mut(t);
            let (ys, rest) = rest.split_at_mut(t);
            let (zs, us) = rest.split_at_mut(t);
            izip!(
                xs.chunks_exact_mut(8),
                ys.chunks_exact_mut(8),
                zs.chunks_exact_mut(8),
                us.chunks_exact_mut(8)
            )
            .for_each(|(x, y, z, u)| {
                let v: [S; 4] = [&*x, &*y, &*z, &*u].map(S::load);
                let out: [S; 4] = radix4_fwd(v, &w, &m_q);
                izip!([x, y, z, u], out).for_each(|(s, o)| o.store(s));
            });
        }
        t >>= 2;
    }

    if has_even_power(n) {
        let blocks: usize = n >> 4;
        finish_blocks(a, table, idx + blocks, |i| Some(table.splat(idx + i)), &m_q);
    } else {
        finish_blocks(a, table, idx, |_| None, &m_q);
    }
}

/// Radix-2 levels down to stride 8, then the 16-element tail. Inputs `< q`,
/// outputs `< 4q`, `n >= 16`. `table` is laid out by
/// [`expand_r2x16`](crate::ifma::expand::expand_r2x16).
#[inline(always)]
pub fn forward_r2x16<S: Lanes8>(table: &LaneTable, a: &mut [u64], q: u64) {
    let n: usize = a.len();
    debug_assert!(n >= 16, "n={n} < 16");
    let m_q: LaneModulus<S> = LaneModulus::new(q);
    let blocks: usize = n >> 4;

    let (mut m, mut t) = (1, n >> 1);
    while m < blocks {
        izip!(a.chunks_exact_mut(2 * t), m..2 * m).for_each(|(block, j)| {
            let w: LaneOp<S> = table.splat(j);
            let (xs, ys) = block.split_at_mut(t);
            izip!(xs.chunks_exact_mut(8), ys.chunks_exact_mut(8)).for_each(|(x, y)| {
                let (u, v) = radix2_fwd(S::load(x), S::load(y), &w, &m_q);
                u.store(x);
                v.store(y);
            });
        });
        m <<= 1;
        t >>= 1;
    }

    finish_blocks(a, table, 2 * blocks, |i| Some(table.splat(blocks + i)), &m_q);
}
