//! Mixed radix-4x4 transform: pairs of radix-4 levels fused into 16-point
//! blocks, plus fix-up levels picked from `log_n mod 4`.
//!
//! | `log_n mod 4` | Forward fix-up after the fused levels          |
//! |---------------|------------------------------------------------|
//! | 0             | none                                           |
//! | 1             | radix-2 at stride 1                            |
//! | 2             | radix-4 at stride 1                            |
//! | 3             | radix-2 at stride 4, then radix-4 at stride 1  |
//!
//! The inverse runs the fix-ups first, in reverse, then the fused levels from
//! the last to the first. Lazy forward output is below `8q`.

use itertools::izip;
use ntt_hal::{
    butterfly::{
        harvey_bkw_butterfly, harvey_fwd_butterfly, radix4_fwd_block, radix4_fwd_butterfly, radix4_inv_block,
        radix4_inv_butterfly,
    },
    layouts::Radix4Tables,
    modulus::{MulOp, WORD_SIZE, mul_mod_q, reduce_8q_to_2q, reduce_8q_to_4q},
    twiddle::collect_roots,
};

use crate::radix4::{radix2_tail_fwd, radix2_tail_inv};

/// Gathers the 16 elements `block[i + c * t/4 + d * t]` into `v[4d + c]`.
#[inline(always)]
fn gather16(block: &[u64], i: usize, t: usize) -> [u64; 16] {
    let t2: usize = t >> 2;
    std::array::from_fn(|k| block[i + (k & 3) * t2 + (k >> 2) * t])
}

#[inline(always)]
fn scatter16(block: &mut [u64], i: usize, t: usize, v: &[u64; 16]) {
    let t2: usize = t >> 2;
    v.iter()
        .enumerate()
        .for_each(|(k, &x)| block[i + (k & 3) * t2 + (k >> 2) * t] = x);
}

/// Levels `m` (stride `t`) and `4m` (stride `t/4`) of node `j`.
fn radix16_fwd(block: &mut [u64], t: usize, e: &[MulOp], m: usize, j: usize, q: u64) {
    let outer: [MulOp; 5] = collect_roots(e, m, j);
    let inner: [[MulOp; 5]; 4] = std::array::from_fn(|d| collect_roots(e, m << 2, 4 * j + d));

    for i in 0..t >> 2 {
        let mut v: [u64; 16] = gather16(block, i, t);
        for c in 0..4 {
            [v[c], v[4 + c], v[8 + c], v[12 + c]] =
                radix4_fwd_butterfly::<WORD_SIZE>([v[c], v[4 + c], v[8 + c], v[12 + c]], &outer, q);
        }
        for (d, w) in inner.iter().enumerate() {
            [v[4 * d], v[4 * d + 1], v[4 * d + 2], v[4 * d + 3]] =
                radix4_fwd_butterfly::<WORD_SIZE>([v[4 * d], v[4 * d + 1], v[4 * d + 2], v[4 * d + 3]], w, q);
        }
        scatter16(block, i, t, &v);
    }
}

fn radix16_inv(block: &mut [u64], t: usize, e: &[MulOp], m: usize, j: usize, q: u64) {
    let outer: [MulOp; 5] = collect_roots(e, m, j);
    let inner: [[MulOp; 5]; 4] = std::array::from_fn(|d| collect_roots(e, m << 2, 4 * j + d));

    for i in 0..t >> 2 {
        let mut v: [u64; 16] = gather16(block, i, t);
        for (d, w) in inner.iter().enumerate() {
            [v[4 * d], v[4 * d + 1], v[4 * d + 2], v[4 * d + 3]] =
                radix4_inv_butterfly::<WORD_SIZE>([v[4 * d], v[4 * d + 1], v[4 * d + 2], v[4 * d + 3]], w, q);
        }
        for c in 0..4 {
            [v[c], v[4 + c], v[8 + c], v[12 + c]] =
                radix4_inv_butterfly::<WORD_SIZE>([v[c], v[4 + c], v[8 + c], v[12 + c]], &outer, q);
        }
        scatter16(block, i, t, &v);
    }
}

pub fn forward_lazy(tables: &Radix4Tables, a: &mut [u64]) {
    let log_n: usize = tables.log_n;
    let n: usize = 1 << log_n;
    let q: u64 = tables.q;
    let e: &[MulOp] = &tables.fwd;
    debug_assert_eq!(a.len(), n, "a.len()={} != n={}", a.len(), n);

    let rem: usize = log_n & 3;

    let (mut m, mut t) = (1, n >> 2);
    while m < n >> rem {
        izip!(a.chunks_exact_mut(4 * t), 0..m).for_each(|(block, j)| radix16_fwd(block, t, e, m, j, q));
        m <<= 4;
        t >>= 4;
    }

    if rem == 1 {
        radix2_tail_fwd(a, &e[n..], q);
        return;
    }

    if rem == 3 {
        let m: usize = n >> 3;
        izip!(a.chunks_exact_mut(8), e[2 * m..].iter().step_by(2)).for_each(|(block, w)| {
            let (xs, ys) = block.split_at_mut(4);
            izip!(xs, ys).for_each(|(x, y)| {
                *x = reduce_8q_to_4q(*x, q);
                *y = reduce_8q_to_4q(*y, q);
                harvey_fwd_butterfly::<WORD_SIZE>(x, y, *w, q);
            });
        });
    }

    if rem >= 2 {
        let m: usize = n >> 2;
        izip!(a.chunks_exact_mut(4), 0..m).for_each(|(block, j)| {
            radix4_fwd_block::<WORD_SIZE>(block, 1, &collect_roots(e, m, j), q);
        });
    }
}

pub fn inverse(tables: &Radix4Tables, a: &mut [u64]) {
    let log_n: usize = tables.log_n;
    let n: usize = 1 << log_n;
    let q: u64 = tables.q;
    let e: &[MulOp] = &tables.inv;
    debug_assert_eq!(a.len(), n, "a.len()={} != n={}", a.len(), n);

    let rem: usize = log_n & 3;

    a.iter_mut().for_each(|x| *x = reduce_8q_to_2q(*x, q));

    if rem == 1 {
        radix2_tail_inv(a, &e[n..], q);
    }

    if rem >= 2 {
        let m: usize = n >> 2;
        izip!(a.chunks_exact_mut(4), 0..m).for_each(|(block, j)| {
            radix4_inv_block::<WORD_SIZE>(block, 1, &collect_roots(e, m, j), q);
        });
    }

    if rem == 3 {
        let m: usize = n >> 3;
        izip!(a.chunks_exact_mut(8), e[2 * m..].iter().step_by(2)).for_each(|(block, w)| {
            let (xs, ys) = block.split_at_mut(4);
            izip!(xs, ys).for_each(|(x, y)| harvey_bkw_butterfly::<WORD_SIZE>(x, y, *w, q));
        });
    }

    for level in (0..(log_n - rem) >> 2).rev() {
        let m: usize = 1 << (4 * level);
        let t: usize = n / (4 * m);
        izip!(a.chunks_exact_mut(4 * t), 0..m).for_each(|(block, j)| radix16_inv(block, t, e, m, j, q));
    }

    a.iter_mut().for_each(|x| *x = mul_mod_q::<WORD_SIZE>(tables.n_inv, *x, q));
}
