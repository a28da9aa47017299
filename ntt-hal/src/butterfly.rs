//! Radix-2 and radix-4 butterflies with their lazy bounds.
//!
//! | Butterfly                       | Inputs                 | Outputs                  |
//! |---------------------------------|------------------------|--------------------------|
//! | [`harvey_fwd_butterfly`]        | `< 4q`                 | `< 4q`                   |
//! | [`harvey_bkw_butterfly`]        | `< 2q`                 | `< 2q`                   |
//! | [`harvey_bkw_butterfly_final`]  | `< 2q`                 | `< q`, scaled by `n_inv` |
//! | [`radix4_fwd_butterfly`]        | `< 8q`                 | `< 8q`                   |
//! | [`radix4_inv_butterfly`]        | `< 2q`                 | `< 2q`                   |
//!
//! Radix-4 roots are the five operators returned by
//! [`collect_roots`](crate::twiddle::collect_roots): `w[0]` multiplies the `Z`
//! lane, `(w[1], w[2])` and `(w[3], w[4])` combine `Y` and `T` through two
//! double multiplies.

use itertools::izip;

use crate::modulus::{MulOp, dbl_mul_mod_q2, mul_mod_q, mul_mod_q2, reduce_4q_to_2q, reduce_8q_to_2q, reduce_8q_to_4q};

#[inline(always)]
pub fn harvey_fwd_butterfly<const W: u32>(x: &mut u64, y: &mut u64, w: MulOp, q: u64) {
    debug_assert!(*x < q << 2, "x:{} 4q:{}", x, q << 2);
    debug_assert!(*y < q << 2, "y:{} 4q:{}", y, q << 2);
    let x1: u64 = reduce_4q_to_2q(*x, q);
    let t: u64 = mul_mod_q2::<W>(w, *y, q);
    *x = x1 + t;
    *y = x1 + (q << 1) - t;
}

#[inline(always)]
pub fn harvey_bkw_butterfly<const W: u32>(x: &mut u64, y: &mut u64, w: MulOp, q: u64) {
    debug_assert!(*x < q << 1, "x:{} 2q:{}", x, q << 1);
    debug_assert!(*y < q << 1, "y:{} 2q:{}", y, q << 1);
    let x1: u64 = reduce_4q_to_2q(*x + *y, q);
    let t: u64 = *x + (q << 1) - *y;
    *x = x1;
    *y = mul_mod_q2::<W>(w, t, q);
}

/// Last inverse level: also multiplies the sum by `n_inv`. `w` must already
/// carry the `n_inv` factor.
#[inline(always)]
pub fn harvey_bkw_butterfly_final<const W: u32>(x: &mut u64, y: &mut u64, w: MulOp, n_inv: MulOp, q: u64) {
    debug_assert!(*x < q << 1, "x:{} 2q:{}", x, q << 1);
    debug_assert!(*y < q << 1, "y:{} 2q:{}", y, q << 1);
    let x1: u64 = *x + *y;
    let t: u64 = *x + (q << 1) - *y;
    *x = mul_mod_q::<W>(n_inv, x1, q);
    *y = mul_mod_q::<W>(w, t, q);
}

#[inline(always)]
pub fn radix4_fwd_butterfly<const W: u32>(v: [u64; 4], w: &[MulOp; 5], q: u64) -> [u64; 4] {
    let [x, y, z, t] = v;
    debug_assert!(v.iter().all(|&a| a < q << 3), "radix4_fwd_butterfly: input >= 8q {:?}", v);
    let q2: u64 = q << 1;
    let q4: u64 = q << 2;

    let y1: u64 = dbl_mul_mod_q2::<W>(w[1], w[2], y, t, q);
    let y2: u64 = dbl_mul_mod_q2::<W>(w[3], w[4], y, t, q);

    let t1: u64 = reduce_8q_to_4q(x, q);
    let t2: u64 = mul_mod_q2::<W>(w[0], z, q);

    [t1 + t2 + y1, t1 + t2 + q2 - y1, t1 + q2 + y2 - t2, t1 + q4 - t2 - y2]
}

#[inline(always)]
pub fn radix4_inv_butterfly<const W: u32>(v: [u64; 4], w: &[MulOp; 5], q: u64) -> [u64; 4] {
    let [x, y, z, t] = v;
    debug_assert!(v.iter().all(|&a| a < q << 1), "radix4_inv_butterfly: input >= 2q {:?}", v);
    let q4: u64 = q << 2;

    let t0: u64 = z + t;
    let t1: u64 = x + y;
    let t2: u64 = q4 + x - y;
    let t3: u64 = q4 + z - t;

    [
        reduce_8q_to_2q(t1 + t0, q),
        dbl_mul_mod_q2::<W>(w[1], w[3], t2, t3, q),
        mul_mod_q::<W>(w[0], q4 + t1 - t0, q),
        dbl_mul_mod_q2::<W>(w[2], w[4], t2, t3, q),
    ]
}

/// Radix-4 forward level over one block of `4t` elements: butterflies on
/// `(i, i + t, i + 2t, i + 3t)` for `i < t`.
#[inline(always)]
pub fn radix4_fwd_block<const W: u32>(block: &mut [u64], t: usize, w: &[MulOp; 5], q: u64) {
    debug_assert_eq!(block.len(), 4 * t);
    let (xs, rest) = block.split_at_mut(t);
    let (ys, rest) = rest.split_at_mut(t);
    let (zs, ts) = rest.split_at_mut(t);
    izip!(xs, ys, zs, ts).for_each(|(x, y, z, t)| {
        [*x, *y, *z, *t] = radix4_fwd_butterfly::<W>([*x, *y, *z, *t], w, q);
    });
}

/// Inverse counterpart of [`radix4_fwd_block`].
#[inline(always)]
pub fn radix4_inv_block<const W: u32>(block: &mut [u64], t: usize, w: &[MulOp; 5], q: u64) {
    debug_assert_eq!(block.len(), 4 * t);
    let (xs, rest) = block.split_at_mut(t);
    let (ys, rest) = rest.split_at_mut(t);
    let (zs, ts) = rest.split_at_mut(t);
    izip!(xs, ys, zs, ts).for_each(|(x, y, z, t)| {
        [*x, *y, *z, *t] = radix4_inv_butterfly::<W>([*x, *y, *z, *t], w, q);
    });
}
