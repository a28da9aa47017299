use std::fmt;

/// Failures of table construction and parameter validation.
///
/// Transforms themselves never fail: they are precondition-constrained and
/// only check their inputs with `debug_assert!`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NttError {
    /// Table memory of `len` words could not be reserved.
    Alloc { len: usize },
    /// `log_n` is below what the backend supports (or too large to index).
    InvalidSize { log_n: usize, min_log_n: usize },
    /// `q` is even, `<= 1`, or wider than the backend precision.
    ModulusOutOfRange { q: u64, max_bits: u32 },
    /// `w` is not a primitive `2n`-th root of unity modulo `q`.
    InvalidRoot { w: u64, n: usize, q: u64 },
    /// A caller-supplied inverse does not match the derived one.
    InvalidInverse { value: u64, expected: u64, q: u64 },
}

impl fmt::Display for NttError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NttError::Alloc { len } => write!(f, "cannot allocate twiddle table of {len} words"),
            NttError::InvalidSize { log_n, min_log_n } => {
                write!(f, "invalid transform size 2^{log_n}: backend needs log_n in [{min_log_n}, 31]")
            }
            NttError::ModulusOutOfRange { q, max_bits } => {
                write!(f, "modulus {q:#x} must be an odd value in (1, 2^{max_bits})")
            }
            NttError::InvalidRoot { w, n, q } => {
                write!(f, "{w} is not a primitive {}-th root of unity mod {q:#x} (n = {n})", 2 * n)
            }
            NttError::InvalidInverse { value, expected, q } => {
                write!(f, "inverse {value} does not match {expected} mod {q:#x}")
            }
        }
    }
}

impl std::error::Error for NttError {}
