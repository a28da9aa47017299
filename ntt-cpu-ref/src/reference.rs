//! Radix-2 Harvey transform, one level per pass.
//!
//! Forward is Cooley-Tukey from natural to bit-reversed order, inverse is
//! Gentleman-Sande back. Lazy forward output is below `4q`; the inverse
//! accepts it as is.

use itertools::izip;
use ntt_hal::{
    butterfly::{harvey_bkw_butterfly, harvey_bkw_butterfly_final, harvey_fwd_butterfly},
    layouts::Radix2Tables,
    modulus::{WORD_SIZE, reduce_4q_to_2q},
};

pub fn forward_lazy(tables: &Radix2Tables, a: &mut [u64]) {
    let log_n: usize = tables.log_n;
    let q: u64 = tables.q;
    debug_assert_eq!(a.len(), 1 << log_n, "a.len()={} != n={}", a.len(), 1 << log_n);

    for layer in 0..log_n {
        let (m, size) = (1 << layer, 1 << (log_n - layer - 1));
        izip!(a.chunks_exact_mut(2 * size), &tables.fwd[m..]).for_each(|(a, w)| {
            let (a, b) = a.split_at_mut(size);
            izip!(a, b).for_each(|(x, y)| harvey_fwd_butterfly::<WORD_SIZE>(x, y, *w, q));
        });
    }
}

/// Both arrays go through each level together, reading every twiddle once.
pub fn forward_pair_lazy(tables: &Radix2Tables, a: &mut [u64], b: &mut [u64]) {
    let log_n: usize = tables.log_n;
    let q: u64 = tables.q;
    debug_assert_eq!(a.len(), 1 << log_n);
    debug_assert_eq!(b.len(), 1 << log_n);

    for layer in 0..log_n {
        let (m, size) = (1 << layer, 1 << (log_n - layer - 1));
        izip!(a.chunks_exact_mut(2 * size), b.chunks_exact_mut(2 * size), &tables.fwd[m..]).for_each(|(a, b, w)| {
            let (a0, a1) = a.split_at_mut(size);
            let (b0, b1) = b.split_at_mut(size);
            izip!(a0, a1, b0, b1).for_each(|(x0, y0, x1, y1)| {
                harvey_fwd_butterfly::<WORD_SIZE>(x0, y0, *w, q);
                harvey_fwd_butterfly::<WORD_SIZE>(x1, y1, *w, q);
            });
        });
    }
}

/// Inputs `< 4q`, outputs `< q`. The last level folds in `n_inv`.
pub fn inverse(tables: &Radix2Tables, a: &mut [u64]) {
    let log_n: usize = tables.log_n;
    let q: u64 = tables.q;
    let n: usize = 1 << log_n;
    debug_assert_eq!(a.len(), n, "a.len()={} != n={}", a.len(), n);

    for layer in (1..log_n).rev() {
        let (m, size) = (1 << layer, 1 << (log_n - layer - 1));
        let first: bool = layer == log_n - 1;
        izip!(a.chunks_exact_mut(2 * size), &tables.inv[m..]).for_each(|(a, w)| {
            let (a, b) = a.split_at_mut(size);
            izip!(a, b).for_each(|(x, y)| {
                if first {
                    *x = reduce_4q_to_2q(*x, q);
                    *y = reduce_4q_to_2q(*y, q);
                }
                harvey_bkw_butterfly::<WORD_SIZE>(x, y, *w, q)
            });
        });
    }

    let (a, b) = a.split_at_mut(n >> 1);
    izip!(a, b).for_each(|(x, y)| {
        debug_assert!(*x < q << 1 && *y < q << 1);
        harvey_bkw_butterfly_final::<WORD_SIZE>(x, y, tables.inv_last, tables.n_inv, q)
    });
}

#[cfg(test)]
mod tests {
    use ntt_hal::NttParams;

    use super::*;

    #[test]
    fn smallest_size() {
        let params: NttParams = NttParams::find(3, 0x10001).unwrap();
        let tables: Radix2Tables = Radix2Tables::new::<WORD_SIZE>(&params).unwrap();
        let a: Vec<u64> = (1..=8).collect();
        let mut b: Vec<u64> = a.clone();
        forward_lazy(&tables, &mut b);
        assert!(b.iter().all(|&x| x < 4 * params.q()));
        inverse(&tables, &mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn pair_matches_single() {
        let params: NttParams = NttParams::new(8, 0x1e01, 62).unwrap();
        let tables: Radix2Tables = Radix2Tables::new::<WORD_SIZE>(&params).unwrap();
        let a: Vec<u64> = (0..256).map(|i| (i * 31 + 7) % 0x1e01).collect();
        let b: Vec<u64> = (0..256).map(|i| (i * i) % 0x1e01).collect();
        let (mut a0, mut b0) = (a.clone(), b.clone());
        forward_lazy(&tables, &mut a0);
        forward_lazy(&tables, &mut b0);
        let (mut a1, mut b1) = (a, b);
        forward_pair_lazy(&tables, &mut a1, &mut b1);
        assert_eq!((a0, b0), (a1, b1));
    }
}
