//! Table layouts of the 8-lane forward kernels.
//!
//! Each expansion reads the bit-reversed table `w` (entry `brv(i)` holds
//! `w^i`) and emits operator values in exactly the order the kernel consumes
//! them, so every kernel walks its table with a single cursor.

use ntt_hal::{
    error::NttError,
    modulus::mod_mul,
    twiddle::{has_even_power, reserve_table},
};

/// Lane order of the unordered kernel's stride-1 roots.
#[inline(always)]
fn interleave_halves(v: [u64; 8]) -> [u64; 8] {
    [v[0], v[4], v[1], v[5], v[2], v[6], v[3], v[7]]
}

/// Outer root and the inner roots `w2`, `w1 * w2`, `w3`, `-(w1 * w3)` of the
/// radix-4 node whose outer root is `w[wi]`.
#[inline(always)]
fn radix4_node(w: &[u64], wi: usize, q: u64) -> [u64; 5] {
    let (w1, w2, w3) = (w[wi], w[2 * wi], w[2 * wi + 1]);
    [w1, w2, mod_mul(w1, w2, q), w3, (q - mod_mul(w1, w3, q)) % q]
}

/// Layout of the radix-4 kernel, `n >= 32`.
///
/// ```text
/// [0] [w1 if log_n odd]
/// nodes with stride >= 16 : 5 broadcast roots each
/// stride 4                : 2 nodes per group, 5 root pairs
/// stride 1                : 8 nodes per group, 5 root octets
/// ```
pub fn expand_radix4(w: &[u64], q: u64, unordered: bool) -> Result<Vec<u64>, NttError> {
    let n: usize = w.len();
    debug_assert!(n >= 32, "n={n} < 32");
    let mut out: Vec<u64> = reserve_table(5 * n)?;
    out.push(0);

    let (mut wi, mut m) = if has_even_power(n) {
        (1, 1)
    } else {
        out.push(w[1]);
        (2, 2)
    };

    while wi < n >> 5 {
        for _ in 0..m {
            out.extend_from_slice(&radix4_node(w, wi, q));
            wi += 1;
        }
        wi = 4 * m;
        m <<= 2;
    }

    for wi in (n >> 4..n >> 3).step_by(2) {
        let k: usize = 2 * wi;
        out.extend_from_slice(&[
            w[wi],
            w[wi + 1],
            w[k],
            w[k + 2],
            mod_mul(w[wi], w[k], q),
            mod_mul(w[wi + 1], w[k + 2], q),
            w[k + 1],
            w[k + 3],
            (q - mod_mul(w[wi], w[k + 1], q)) % q,
            (q - mod_mul(w[wi + 1], w[k + 3], q)) % q,
        ]);
    }

    for wi in (n >> 2..n >> 1).step_by(8) {
        let nodes: [[u64; 5]; 8] = std::array::from_fn(|i| radix4_node(w, wi + i, q));
        for x in 0..5 {
            let group: [u64; 8] = std::array::from_fn(|i| nodes[i][x]);
            out.extend_from_slice(&if unordered { interleave_halves(group) } else { group });
        }
    }

    debug_assert!(out.len() <= 5 * n);
    Ok(out)
}

/// Trailing radix-2 roots shared by [`expand_r4r2`] and [`expand_r2x16`]:
/// strides 4, 2 and 1 of every 16-element block, in lane order.
fn push_fwd16_roots(out: &mut Vec<u64>, w: &[u64], n: usize) {
    let t: usize = n >> 3;
    for i in 0..t {
        out.extend_from_slice(&[w[t + i]; 4]);
    }
    let t: usize = n >> 2;
    for i in (0..t).step_by(4) {
        let (a, b, c, d) = (w[t + i], w[t + i + 1], w[t + i + 2], w[t + i + 3]);
        out.extend_from_slice(&[a, a, c, c, b, b, d, d]);
    }
    let t: usize = n >> 1;
    for i in (0..t).step_by(8) {
        out.extend([0, 4, 1, 5, 2, 6, 3, 7].map(|x| w[t + i + x]));
    }
}

/// Layout of the radix-4 / radix-2 kernel, `n >= 16`: radix-4 nodes down to
/// stride 8, the stride-8 radix-2 roots when `log_n` is even, then
/// [`push_fwd16_roots`].
pub fn expand_r4r2(w: &[u64], q: u64) -> Result<Vec<u64>, NttError> {
    let n: usize = w.len();
    debug_assert!(n >= 16, "n={n} < 16");
    let mut out: Vec<u64> = reserve_table(5 * n)?;
    out.push(0);

    let t: usize = n >> 4;
    let (mut wi, mut m) = (1, 1);
    while wi < t {
        for _ in 0..m {
            out.extend_from_slice(&radix4_node(w, wi, q));
            wi += 1;
        }
        wi = 4 * m;
        m <<= 2;
    }
    if has_even_power(n) {
        out.extend_from_slice(&w[wi..wi + t]);
    }

    push_fwd16_roots(&mut out, w, n);
    Ok(out)
}

/// Layout of the radix-2 / 16-point kernel, `n >= 16`: the plain table up to
/// `n/8`, then [`push_fwd16_roots`].
pub fn expand_r2x16(w: &[u64]) -> Result<Vec<u64>, NttError> {
    let n: usize = w.len();
    debug_assert!(n >= 16, "n={n} < 16");
    let mut out: Vec<u64> = reserve_table(2 * n)?;
    out.extend_from_slice(&w[..n >> 3]);
    push_fwd16_roots(&mut out, w, n);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use ntt_hal::{modulus::mod_pow, twiddle::build_twiddle_table};

    use super::*;

    fn table(log_n: usize) -> Vec<u64> {
        let q: u64 = 0x10001;
        let n: usize = 1 << log_n;
        build_twiddle_table(mod_pow(3, (q - 1) / (2 * n as u64), q), n, q).unwrap()
    }

    #[test]
    fn lengths() {
        // 1 + [odd] + 5 * nodes(stride >= 16) + 10 * n/32 + 40 * n/32
        assert_eq!(expand_radix4(&table(5), 0x10001, false).unwrap().len(), 52);
        assert_eq!(expand_radix4(&table(6), 0x10001, false).unwrap().len(), 1 + 5 + 20 + 80);
        assert_eq!(expand_radix4(&table(7), 0x10001, true).unwrap().len(), 2 + 10 + 40 + 160);
        // 1 + 5 + [n/16] + n/2 + n/2 + n/2
        assert_eq!(expand_r4r2(&table(6), 0x10001).unwrap().len(), 1 + 5 + 4 + 96);
        assert_eq!(expand_r4r2(&table(5), 0x10001).unwrap().len(), 1 + 5 + 48);
        assert_eq!(expand_r2x16(&table(6)).unwrap().len(), 8 + 96);
    }

    #[test]
    fn unordered_only_moves_stride_one_roots() {
        let w: Vec<u64> = table(8);
        let a: Vec<u64> = expand_radix4(&w, 0x10001, false).unwrap();
        let b: Vec<u64> = expand_radix4(&w, 0x10001, true).unwrap();
        let head: usize = a.len() - 40 * (256 / 32);
        assert_eq!(a[..head], b[..head]);
        for (ga, gb) in a[head..].chunks_exact(8).zip(b[head..].chunks_exact(8)) {
            assert_eq!(interleave_halves(ga.try_into().unwrap()), gb);
        }
    }
}
