//! 8-lane inverse over the scalar radix-4 expansion with 52-bit constants.
//!
//! Levels of stride 8 and more run on contiguous lanes. Shorter strides
//! gather eight butterflies of the whole level per step, each lane with the
//! roots of its own node. Handles `n >= 16`.

use itertools::izip;
use ntt_hal::{
    butterfly::harvey_bkw_butterfly,
    modulus::{IFMA_WORD_SIZE, MulOp, mul_mod_q, reduce_8q_to_2q},
    twiddle::{collect_roots, has_even_power},
};

use crate::{
    ifma::arith::{LaneModulus, LaneOp, radix4_inv},
    lanes::Lanes8,
};

/// Inputs `< 8q` in canonical bit-reversed order, outputs `< q`. `inv` is
/// the expanded inverse table, see
/// [`expand_radix4`](ntt_hal::twiddle::expand_radix4).
#[inline(always)]
pub fn inverse<S: Lanes8>(inv: &[MulOp], n_inv: MulOp, a: &mut [u64], q: u64) {
    let n: usize = a.len();
    debug_assert!(n >= 16, "n={n} < 16");
    debug_assert_eq!(inv.len(), 2 * n);
    let m_q: LaneModulus<S> = LaneModulus::new(q);

    let (mut m, mut t) = if has_even_power(n) {
        a.iter_mut().for_each(|x| *x = reduce_8q_to_2q(*x, q));
        (n >> 2, 1)
    } else {
        izip!(a.chunks_exact_mut(2), inv[n..].iter().step_by(2)).for_each(|(pair, w)| {
            let (x, y) = pair.split_at_mut(1);
            x[0] = reduce_8q_to_2q(x[0], q);
            y[0] = reduce_8q_to_2q(y[0], q);
            harvey_bkw_butterfly::<IFMA_WORD_SIZE>(&mut x[0], &mut y[0], *w, q);
        });
        (n >> 3, 2)
    };

    while m > 0 {
        if t >= 8 {
            izip!(a.chunks_exact_mut(4 * t), 0..m).for_each(|(block, j)| {
                let w: [LaneOp<S>; 5] = collect_roots(inv, m, j).map(LaneOp::splat);
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
                    let out: [S; 4] = radix4_inv(v, &w, &m_q);
                    izip!([x, y, z, u], out).for_each(|(s, o)| o.store(s));
                });
            });
        } else {
            // n = 16 has four butterflies per level: lanes repeat them.
            let width: usize = (n >> 2).min(8);
            for b0 in (0..n >> 2).step_by(8) {
                let butterflies: [usize; 8] = std::array::from_fn(|l| b0 + l % width);
                let nodes: [usize; 8] = butterflies.map(|b| b / t);
                let base: [usize; 8] = std::array::from_fn(|l| 4 * t * nodes[l] + butterflies[l] % t);
                let roots: [[MulOp; 5]; 8] = nodes.map(|j| collect_roots(inv, m, j));
                let w: [LaneOp<S>; 5] = std::array::from_fn(|x| LaneOp::from_ops(&roots.map(|r| r[x])));
                let idx: [[usize; 8]; 4] = std::array::from_fn(|s| base.map(|i| i + s * t));
                let v: [S; 4] = idx.map(|idx| S::gather(a, &idx));
                izip!(radix4_inv(v, &w, &m_q), &idx).for_each(|(o, idx)| o.scatter(a, idx));
            }
        }
        m >>= 2;
        t <<= 2;
    }

    a.iter_mut()
        .for_each(|x| *x = mul_mod_q::<IFMA_WORD_SIZE>(n_inv, *x, q));
}
