use crate::{
    error::NttError,
    modulus::{mod_inv, mod_mul, mod_pow},
};

/// Smallest transform handled by any backend.
pub const MIN_LOG_N: usize = 3;
/// Largest transform, bounded by 32-bit table indices.
pub const MAX_LOG_N: usize = 31;
/// Widest modulus any backend accepts.
pub const MAX_MODULUS_BITS: u32 = 62;

/// One `(q, n, w)` configuration with the inverses needed by the inverse
/// transform.
///
/// Validated once at construction: `q` odd, `2n | q - 1`, `w` of order
/// exactly `2n`, and `w * w_inv = n * n_inv = 1 mod q`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NttParams {
    log_n: usize,
    q: u64,
    w: u64,
    w_inv: u64,
    n_inv: u64,
}

impl NttParams {
    /// Derives `w_inv` and `n_inv` for a prime `q`.
    pub fn new(log_n: usize, q: u64, w: u64) -> Result<Self, NttError> {
        check_shape(log_n, q)?;
        let w_inv: u64 = mod_inv(w % q, q);
        let n_inv: u64 = mod_inv(1 << log_n, q);
        Self::with_inverses(log_n, q, w, w_inv, n_inv)
    }

    /// Validates caller-supplied inverses.
    pub fn with_inverses(log_n: usize, q: u64, w: u64, w_inv: u64, n_inv: u64) -> Result<Self, NttError> {
        check_shape(log_n, q)?;
        let n: usize = 1 << log_n;

        if w >= q || (q - 1) % (2 * n as u64) != 0 || mod_pow(w, n as u64, q) != q - 1 {
            return Err(NttError::InvalidRoot { w, n, q });
        }
        if w_inv >= q || mod_mul(w, w_inv, q) != 1 {
            return Err(NttError::InvalidInverse {
                value: w_inv,
                expected: mod_inv(w, q),
                q,
            });
        }
        if n_inv >= q || mod_mul(n as u64 % q, n_inv, q) != 1 {
            return Err(NttError::InvalidInverse {
                value: n_inv,
                expected: mod_inv(n as u64 % q, q),
                q,
            });
        }

        Ok(Self {
            log_n,
            q,
            w,
            w_inv,
            n_inv,
        })
    }

    /// Picks the first primitive `2n`-th root found by [`primitive_root`].
    pub fn find(log_n: usize, q: u64) -> Result<Self, NttError> {
        check_shape(log_n, q)?;
        let w: u64 = primitive_root(q, log_n).ok_or(NttError::InvalidRoot { w: 0, n: 1 << log_n, q })?;
        Self::new(log_n, q, w)
    }

    #[inline(always)]
    pub fn log_n(&self) -> usize {
        self.log_n
    }

    #[inline(always)]
    pub fn n(&self) -> usize {
        1 << self.log_n
    }

    #[inline(always)]
    pub fn q(&self) -> u64 {
        self.q
    }

    #[inline(always)]
    pub fn w(&self) -> u64 {
        self.w
    }

    #[inline(always)]
    pub fn w_inv(&self) -> u64 {
        self.w_inv
    }

    #[inline(always)]
    pub fn n_inv(&self) -> u64 {
        self.n_inv
    }

    /// Bit length of `q`.
    #[inline(always)]
    pub fn modulus_bits(&self) -> u32 {
        modulus_bits(self.q)
    }
}

#[inline(always)]
pub fn modulus_bits(q: u64) -> u32 {
    u64::BITS - q.leading_zeros()
}

fn check_shape(log_n: usize, q: u64) -> Result<(), NttError> {
    if !(MIN_LOG_N..=MAX_LOG_N).contains(&log_n) {
        return Err(NttError::InvalidSize {
            log_n,
            min_log_n: MIN_LOG_N,
        });
    }
    if q < 3 || q & 1 == 0 || modulus_bits(q) > MAX_MODULUS_BITS {
        return Err(NttError::ModulusOutOfRange {
            q,
            max_bits: MAX_MODULUS_BITS,
        });
    }
    Ok(())
}

/// Searches `g = 2, 3, ...` for `w = g^((q-1)/2n)` of order exactly `2n`.
///
/// `None` when `2n` does not divide `q - 1` or no small generator works.
pub fn primitive_root(q: u64, log_n: usize) -> Option<u64> {
    let two_n: u64 = 2u64 << log_n;
    if q < 3 || (q - 1) % two_n != 0 {
        return None;
    }
    let e: u64 = (q - 1) / two_n;
    let half: u64 = two_n >> 1;
    (2..q.min(1 << 16))
        .map(|g| mod_pow(g, e, q))
        .find(|&w| mod_pow(w, half, q) == q - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_inverses() {
        let p: NttParams = NttParams::new(8, 0x1e01, 62).unwrap();
        assert_eq!(p.w_inv(), 1115);
        assert_eq!(p.n_inv(), 7651);
        assert_eq!(p.n(), 256);
        assert_eq!(p.modulus_bits(), 13);
    }

    #[test]
    fn rejects_bad_inputs() {
        assert_eq!(
            NttParams::new(2, 0x1e01, 62),
            Err(NttError::InvalidSize { log_n: 2, min_log_n: 3 })
        );
        assert!(matches!(
            NttParams::new(8, 0x1e00, 62),
            Err(NttError::ModulusOutOfRange { .. })
        ));
        // 62^2 has order 256, not 512.
        assert!(matches!(
            NttParams::new(8, 0x1e01, 62 * 62 % 0x1e01),
            Err(NttError::InvalidRoot { .. })
        ));
        // q - 1 = 2^16 has no element of order 2^18.
        assert!(matches!(
            NttParams::find(17, 0x10001),
            Err(NttError::InvalidRoot { .. })
        ));
        assert!(matches!(
            NttParams::with_inverses(8, 0x1e01, 62, 1116, 7651),
            Err(NttError::InvalidInverse { expected: 1115, .. })
        ));
    }

    #[test]
    fn finds_roots() {
        let q: u64 = 0x1fffffff50001;
        for log_n in [5, 10, 15] {
            let w: u64 = primitive_root(q, log_n).unwrap();
            assert_eq!(mod_pow(w, 1 << log_n, q), q - 1);
        }
        assert_eq!(primitive_root(0x10001, 16), None);
        assert_eq!(NttParams::find(15, 0x10001).unwrap().w(), 3);
    }
}
