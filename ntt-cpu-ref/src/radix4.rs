//! Radix-4 transform over the expanded table.
//!
//! `log4(n)` radix-4 levels; an odd exponent adds one radix-2 level after the
//! last forward level and before the first inverse one. Lazy forward output
//! is below `8q`.

use itertools::izip;
use ntt_hal::{
    butterfly::{harvey_bkw_butterfly, harvey_fwd_butterfly, radix4_fwd_block, radix4_inv_block},
    layouts::Radix4Tables,
    modulus::{MulOp, WORD_SIZE, mul_mod_q, reduce_8q_to_2q, reduce_8q_to_4q},
    twiddle::{collect_roots, has_even_power},
};

pub fn forward_lazy(tables: &Radix4Tables, a: &mut [u64]) {
    let n: usize = 1 << tables.log_n;
    let q: u64 = tables.q;
    let e: &[MulOp] = &tables.fwd;
    debug_assert_eq!(a.len(), n, "a.len()={} != n={}", a.len(), n);

    let even: bool = has_even_power(n);
    let bound: usize = if even { n } else { n >> 1 };

    let (mut m, mut t) = (1, n >> 2);
    while m < bound {
        izip!(a.chunks_exact_mut(4 * t), 0..m).for_each(|(block, j)| {
            radix4_fwd_block::<WORD_SIZE>(block, t, &collect_roots(e, m, j), q);
        });
        m <<= 2;
        t >>= 2;
    }

    if !even {
        radix2_tail_fwd(a, &e[n..], q);
    }
}

/// Last radix-2 level at stride 1, with inputs `< 8q`.
#[inline(always)]
pub(crate) fn radix2_tail_fwd(a: &mut [u64], w: &[MulOp], q: u64) {
    izip!(a.chunks_exact_mut(2), w.iter().step_by(2)).for_each(|(pair, w)| {
        let (x, y) = pair.split_at_mut(1);
        x[0] = reduce_8q_to_4q(x[0], q);
        y[0] = reduce_8q_to_4q(y[0], q);
        harvey_fwd_butterfly::<WORD_SIZE>(&mut x[0], &mut y[0], *w, q);
    });
}

/// First inverse radix-2 level at stride 1, with inputs `< 8q`.
#[inline(always)]
pub(crate) fn radix2_tail_inv(a: &mut [u64], w: &[MulOp], q: u64) {
    izip!(a.chunks_exact_mut(2), w.iter().step_by(2)).for_each(|(pair, w)| {
        let (x, y) = pair.split_at_mut(1);
        x[0] = reduce_8q_to_2q(x[0], q);
        y[0] = reduce_8q_to_2q(y[0], q);
        harvey_bkw_butterfly::<WORD_SIZE>(&mut x[0], &mut y[0], *w, q);
    });
}

pub fn inverse(tables: &Radix4Tables, a: &mut [u64]) {
    let n: usize = 1 << tables.log_n;
    let q: u64 = tables.q;
    let e: &[MulOp] = &tables.inv;
    debug_assert_eq!(a.len(), n, "a.len()={} != n={}", a.len(), n);

    let (mut m, mut t) = if has_even_power(n) {
        a.iter_mut().for_each(|x| *x = reduce_8q_to_2q(*x, q));
        (n >> 2, 1)
    } else {
        radix2_tail_inv(a, &e[n..], q);
        (n >> 3, 2)
    };

    while m > 0 {
        izip!(a.chunks_exact_mut(4 * t), 0..m).for_each(|(block, j)| {
            radix4_inv_block::<WORD_SIZE>(block, t, &collect_roots(e, m, j), q);
        });
        m >>= 2;
        t <<= 2;
    }

    a.iter_mut().for_each(|x| *x = mul_mod_q::<WORD_SIZE>(tables.n_inv, *x, q));
}
