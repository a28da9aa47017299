//! Twiddle precomputation and the radix-4 table expansion.
//!
//! Powers of the root are stored in bit-reversed order: entry `brv(i)` holds
//! `w^i`. A radix-2 level with `m` blocks reads entries `m..2m`.
//!
//! The radix-4 expansion doubles the table so that each radix-4 node finds its
//! outer root and the four inner roots at fixed offsets:
//!
//! ```text
//! e[2i]     = w[i]
//! e[2i + 1] = e[i] * w[i]        if i is even
//!           = -(e[i - 1] * w[i]) if i is odd
//! ```
//!
//! Node `(m, j)` then uses `e[m1]` and `e[2*m1..2*m1 + 4]` with `m1 = 2(m + j)`,
//! and the trailing radix-2 level of an odd exponent uses `e[n + i]`.

use itertools::izip;

use crate::{
    error::NttError,
    modulus::{MulOp, WordOps, mod_mul},
};

/// An empty table with room for `len` entries, reporting failure instead of
/// aborting.
pub fn reserve_table<T>(len: usize) -> Result<Vec<T>, NttError> {
    let mut table: Vec<T> = Vec::new();
    table.try_reserve_exact(len).map_err(|_| NttError::Alloc { len })?;
    Ok(table)
}

/// Allocates a zeroed table, reporting failure instead of aborting.
pub fn alloc_table<T: Default + Clone>(len: usize) -> Result<Vec<T>, NttError> {
    let mut table: Vec<T> = reserve_table(len)?;
    table.resize(len, T::default());
    Ok(table)
}

fn powers_bit_reversed(w: u64, n: usize, q: u64) -> Result<Vec<u64>, NttError> {
    debug_assert!(n.is_power_of_two(), "n={} is not a power of two", n);
    let log_n: u32 = n.log2() as u32;
    let mut table: Vec<u64> = alloc_table(n)?;
    let mut power: u64 = 1 % q;
    for i in 0..n {
        table[i.reverse_bits_msb(log_n)] = power;
        power = mod_mul(power, w, q);
    }
    Ok(table)
}

/// Bit-reversed powers `w^0 .. w^(n-1)` of the forward root.
pub fn build_twiddle_table(w: u64, n: usize, q: u64) -> Result<Vec<u64>, NttError> {
    powers_bit_reversed(w, n, q)
}

/// Bit-reversed powers of the inverse root.
pub fn build_inverse_twiddle_table(w_inv: u64, n: usize, q: u64) -> Result<Vec<u64>, NttError> {
    powers_bit_reversed(w_inv, n, q)
}

/// `floor(t * 2^W / q)` for every entry of `table`.
pub fn build_barrett_constants<const W: u32>(table: &[u64], q: u64) -> Result<Vec<u64>, NttError> {
    let mut con: Vec<u64> = alloc_table(table.len())?;
    con.iter_mut()
        .zip(table)
        .for_each(|(c, &t)| *c = MulOp::new::<W>(t, q).con);
    Ok(con)
}

/// Pairs every entry of `table` with its `W`-bit constant.
pub fn build_operators<const W: u32>(table: &[u64], q: u64) -> Result<Vec<MulOp>, NttError> {
    let con: Vec<u64> = build_barrett_constants::<W>(table, q)?;
    let mut ops: Vec<MulOp> = alloc_table(table.len())?;
    izip!(ops.iter_mut(), table.iter(), con.iter()).for_each(|(o, &op, &con)| *o = MulOp { op, con });
    Ok(ops)
}

#[inline(always)]
pub fn n_inv_operator<const W: u32>(n_inv: u64, q: u64) -> MulOp {
    MulOp::new::<W>(n_inv, q)
}

/// Radix-4 layout of a bit-reversed table of `n` powers, of length `2n`.
pub fn expand_radix4(w: &[u64], q: u64) -> Result<Vec<u64>, NttError> {
    let n: usize = w.len();
    debug_assert!(n >= 2);
    let mut e: Vec<u64> = alloc_table(2 * n)?;
    e[0] = w[0];
    e[2] = w[1];
    for i in (4..2 * n).step_by(2) {
        e[i] = w[i >> 1];
        e[i + 1] = if i & 3 == 0 {
            mod_mul(e[i >> 1], w[i >> 1], q)
        } else {
            (q - mod_mul(e[(i - 2) >> 1], w[i >> 1], q)) % q
        };
    }
    Ok(e)
}

/// Outer root and the four inner roots of radix-4 node `j` at level `m`.
#[inline(always)]
pub fn collect_roots(w: &[MulOp], m: usize, j: usize) -> [MulOp; 5] {
    let m1: usize = 2 * (m + j);
    let m2: usize = 2 * m1;
    [w[m1], w[m2], w[m2 + 1], w[m2 + 2], w[m2 + 3]]
}

/// True when `n = 2^k` with `k` even, i.e. the transform is pure radix-4.
#[inline(always)]
pub fn has_even_power(n: usize) -> bool {
    n.log2() & 1 == 0
}
