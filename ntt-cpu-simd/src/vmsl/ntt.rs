//! Radix-4 drivers of the 2-lane backend over the expanded tables.

use itertools::izip;
use ntt_hal::{
    butterfly::{harvey_bkw_butterfly, harvey_fwd_butterfly},
    modulus::{MulOp, VMSL_WORD_SIZE, mul_mod_q, reduce_8q_to_2q, reduce_8q_to_4q},
    twiddle::has_even_power,
};

use crate::{
    lanes::{Lanes, U64x2},
    vmsl::arith::{NodeRoots, VmslModulus, radix4_fwd, radix4_fwd_x2, radix4_inv, radix4_inv_x2},
};

/// Runs `f` on every butterfly of a radix-4 block of stride `t`, two
/// adjacent butterflies per call when `t >= 2`.
#[inline(always)]
fn for_each_butterfly<F, G>(block: &mut [u64], t: usize, single: F, pair: G)
where
    F: Fn([u64; 4]) -> [u64; 4],
    G: Fn([U64x2; 4]) -> [U64x2; 4],
{
    let (xs, rest) = block.split_at_mut(t);
    let (ys, rest) = rest.split_at_mut(t);
    let (zs, ts) = rest.split_at_mut(t);
    if t == 1 {
        izip!(xs, ys, zs, ts).for_each(|(x, y, z, u)| {
            [*x, *y, *z, *u] = single([*x, *y, *z, *u]);
        });
        return;
    }
    izip!(
        xs.chunks_exact_mut(2),
        ys.chunks_exact_mut(2),
        zs.chunks_exact_mut(2),
        ts.chunks_exact_mut(2)
    )
    .for_each(|(x, y, z, u)| {
        let out: [U64x2; 4] = pair([&*x, &*y, &*z, &*u].map(|s| Lanes([s[0], s[1]])));
        izip!([x, y, z, u], out).for_each(|(s, o)| s.copy_from_slice(&o.0));
    });
}

#[inline(always)]
fn fwd_block(block: &mut [u64], t: usize, w: &NodeRoots, m: &VmslModulus) {
    for_each_butterfly(block, t, |v| radix4_fwd(v, w, m), |v| radix4_fwd_x2(v, w, m));
}

/// Forward transform of `K` arrays sharing the table: every node's roots are
/// loaded once for all of them. Inputs `< q`, outputs `< 8q`.
pub fn forward_lazy<const K: usize>(e: &[MulOp], mut arrays: [&mut [u64]; K], q: u64) {
    let n: usize = arrays[0].len();
    debug_assert!(arrays.iter().all(|a| a.len() == n));
    debug_assert_eq!(e.len(), 2 * n);
    let m_q: VmslModulus = VmslModulus::new(q);
    let even: bool = has_even_power(n);
    let bound: usize = if even { n } else { n >> 1 };

    let (mut m, mut t) = (1, n >> 2);
    while m < bound {
        for j in 0..m {
            let w: NodeRoots = NodeRoots::forward(e, m, j);
            let range: std::ops::Range<usize> = 4 * t * j..4 * t * (j + 1);
            arrays
                .iter_mut()
                .for_each(|a| fwd_block(&mut a[range.clone()], t, &w, &m_q));
        }
        m <<= 2;
        t >>= 2;
    }

    if !even {
        arrays.iter_mut().for_each(|a| {
            izip!(a.chunks_exact_mut(2), e[n..].iter().step_by(2)).for_each(|(pair, w)| {
                let (x, y) = pair.split_at_mut(1);
                x[0] = reduce_8q_to_4q(x[0], q);
                y[0] = reduce_8q_to_4q(y[0], q);
                harvey_fwd_butterfly::<VMSL_WORD_SIZE>(&mut x[0], &mut y[0], *w, q);
            })
        });
    }
}

/// Inputs `< 8q`, outputs `< q`.
pub fn inverse(e: &[MulOp], n_inv: MulOp, a: &mut [u64], q: u64) {
    let n: usize = a.len();
    debug_assert_eq!(e.len(), 2 * n);
    let m_q: VmslModulus = VmslModulus::new(q);

    let (mut m, mut t) = if has_even_power(n) {
        a.iter_mut().for_each(|x| *x = reduce_8q_to_2q(*x, q));
        (n >> 2, 1)
    } else {
        izip!(a.chunks_exact_mut(2), e[n..].iter().step_by(2)).for_each(|(pair, w)| {
            let (x, y) = pair.split_at_mut(1);
            x[0] = reduce_8q_to_2q(x[0], q);
            y[0] = reduce_8q_to_2q(y[0], q);
            harvey_bkw_butterfly::<VMSL_WORD_SIZE>(&mut x[0], &mut y[0], *w, q);
        });
        (n >> 3, 2)
    };

    while m > 0 {
        izip!(a.chunks_exact_mut(4 * t), 0..m).for_each(|(block, j)| {
            let w: NodeRoots = NodeRoots::inverse(e, m, j);
            for_each_butterfly(block, t, |v| radix4_inv(v, &w, &m_q), |v| radix4_inv_x2(v, &w, &m_q));
        });
        m >>= 2;
        t <<= 2;
    }

    a.iter_mut()
        .for_each(|x| *x = mul_mod_q::<VMSL_WORD_SIZE>(n_inv, *x, q));
}
