use std::marker::PhantomData;

use crate::{
    api::{NttBackend, NttTables},
    error::NttError,
    modulus::{MulOp, mod_mul},
    params::NttParams,
    twiddle::{build_inverse_twiddle_table, build_operators, build_twiddle_table, expand_radix4, n_inv_operator},
};

/// Bit-reversed radix-2 tables for a fixed-point width `W`.
///
/// Construct with [`Radix2Tables::new`].
pub struct Radix2Tables {
    pub log_n: usize,
    pub q: u64,
    /// Forward operators, entry `brv(i)` holds `w^i`.
    pub fwd: Vec<MulOp>,
    /// Inverse operators, entry `brv(i)` holds `w_inv^i`.
    pub inv: Vec<MulOp>,
    pub n_inv: MulOp,
    /// `n_inv * inv[1]`, the root of the last inverse level with the
    /// normalisation folded in.
    pub inv_last: MulOp,
}

impl Radix2Tables {
    pub fn new<const W: u32>(params: &NttParams) -> Result<Self, NttError> {
        let (n, q) = (params.n(), params.q());
        let fwd: Vec<u64> = build_twiddle_table(params.w(), n, q)?;
        let inv: Vec<u64> = build_inverse_twiddle_table(params.w_inv(), n, q)?;
        let inv_last: MulOp = MulOp::new::<W>(mod_mul(params.n_inv(), inv[1], q), q);
        tracing::debug!(log_n = params.log_n(), q, width = W, len = n, "radix-2 tables");
        Ok(Self {
            log_n: params.log_n(),
            q,
            fwd: build_operators::<W>(&fwd, q)?,
            inv: build_operators::<W>(&inv, q)?,
            n_inv: n_inv_operator::<W>(params.n_inv(), q),
            inv_last,
        })
    }
}

impl NttTables for Radix2Tables {
    fn q(&self) -> u64 {
        self.q
    }

    fn log_n(&self) -> usize {
        self.log_n
    }
}

/// Radix-4 expanded tables (length `2n` each) for a fixed-point width `W`.
///
/// Construct with [`Radix4Tables::new`].
pub struct Radix4Tables {
    pub log_n: usize,
    pub q: u64,
    /// Expansion of the forward table, see [`expand_radix4`].
    pub fwd: Vec<MulOp>,
    /// Expansion of the inverse table.
    pub inv: Vec<MulOp>,
    pub n_inv: MulOp,
}

impl Radix4Tables {
    pub fn new<const W: u32>(params: &NttParams) -> Result<Self, NttError> {
        let (n, q) = (params.n(), params.q());
        let fwd: Vec<u64> = expand_radix4(&build_twiddle_table(params.w(), n, q)?, q)?;
        let inv: Vec<u64> = expand_radix4(&build_inverse_twiddle_table(params.w_inv(), n, q)?, q)?;
        tracing::debug!(log_n = params.log_n(), q, width = W, len = 2 * n, "radix-4 tables");
        Ok(Self {
            log_n: params.log_n(),
            q,
            fwd: build_operators::<W>(&fwd, q)?,
            inv: build_operators::<W>(&inv, q)?,
            n_inv: n_inv_operator::<W>(params.n_inv(), q),
        })
    }
}

impl NttTables for Radix4Tables {
    fn q(&self) -> u64 {
        self.q
    }

    fn log_n(&self) -> usize {
        self.log_n
    }
}

/// A validated configuration bound to one backend's prepared tables.
///
/// Tables are built once in [`Module::new`] and never mutated afterwards, so
/// a `Module` can be shared across threads and used by concurrent calls.
pub struct Module<B: NttBackend> {
    params: NttParams,
    tables: B::Tables,
    _marker: PhantomData<B>,
}

impl<B: NttBackend> Module<B> {
    pub fn new(params: NttParams) -> Result<Self, NttError> {
        B::check(&params)?;
        let tables: B::Tables = B::prepare(&params)?;
        tracing::debug!(
            backend = B::NAME,
            log_n = params.log_n(),
            q = params.q(),
            w = params.w(),
            "module ready"
        );
        Ok(Self {
            params,
            tables,
            _marker: PhantomData,
        })
    }

    #[inline]
    pub fn params(&self) -> &NttParams {
        &self.params
    }

    #[inline]
    pub fn tables(&self) -> &B::Tables {
        &self.tables
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.params.n()
    }

    #[inline]
    pub fn log_n(&self) -> usize {
        self.params.log_n()
    }

    #[inline]
    pub fn q(&self) -> u64 {
        self.params.q()
    }

    /// Lazy forward output is below `lazy_bound() * q`.
    #[inline]
    pub fn lazy_bound(&self) -> u64 {
        B::LAZY_BOUND
    }

    pub fn forward(&self, a: &mut [u64]) {
        debug_assert_eq!(a.len(), self.n(), "a.len()={} != n={}", a.len(), self.n());
        B::forward(&self.tables, a)
    }

    pub fn forward_lazy(&self, a: &mut [u64]) {
        debug_assert_eq!(a.len(), self.n(), "a.len()={} != n={}", a.len(), self.n());
        B::forward_lazy(&self.tables, a)
    }

    pub fn inverse(&self, a: &mut [u64]) {
        debug_assert_eq!(a.len(), self.n(), "a.len()={} != n={}", a.len(), self.n());
        B::inverse(&self.tables, a)
    }

    pub fn forward_pair(&self, a: &mut [u64], b: &mut [u64]) {
        debug_assert_eq!(a.len(), self.n());
        debug_assert_eq!(b.len(), self.n());
        B::forward_pair(&self.tables, a, b)
    }

    pub fn forward_pair_lazy(&self, a: &mut [u64], b: &mut [u64]) {
        debug_assert_eq!(a.len(), self.n());
        debug_assert_eq!(b.len(), self.n());
        B::forward_pair_lazy(&self.tables, a, b)
    }

    /// Reorders forward output into canonical bit-reversed order.
    pub fn to_canonical_order(&self, a: &mut [u64]) {
        debug_assert_eq!(a.len(), self.n());
        B::to_canonical_order(&self.tables, a)
    }
}
