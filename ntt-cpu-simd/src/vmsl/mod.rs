//! Backend on 2 lanes with the 56-bit multiply-sum.
//!
//! Same radix-4 schedule and expanded tables as the scalar radix-4 backend,
//! with 56-bit constants. Moduli are limited to 52 bits so that `16q` stays
//! below `2^56`.

pub mod arith;
pub mod ntt;

use ntt_hal::{api::NttBackend, error::NttError, layouts::Radix4Tables, modulus::VMSL_WORD_SIZE, params::NttParams};

/// Whether the build targets the architecture whose vector multiply-sum the
/// lanes mirror.
pub fn has_native_vmsl() -> bool {
    cfg!(target_arch = "s390x")
}

/// 2-lane backend, see the module documentation.
pub struct NttVmsl {}

impl NttBackend for NttVmsl {
    const NAME: &'static str = "ntt-vmsl";
    const MAX_MODULUS_BITS: u32 = 52;
    const MIN_LOG_N: usize = 3;
    const LAZY_BOUND: u64 = 8;

    type Tables = Radix4Tables;

    fn prepare(params: &NttParams) -> Result<Radix4Tables, NttError> {
        tracing::debug!(backend = Self::NAME, native = has_native_vmsl(), "preparing lane tables");
        Radix4Tables::new::<VMSL_WORD_SIZE>(params)
    }

    fn forward_lazy(tables: &Radix4Tables, a: &mut [u64]) {
        ntt::forward_lazy(&tables.fwd, [a], tables.q)
    }

    fn inverse(tables: &Radix4Tables, a: &mut [u64]) {
        ntt::inverse(&tables.inv, tables.n_inv, a, tables.q)
    }

    fn forward_pair_lazy(tables: &Radix4Tables, a: &mut [u64], b: &mut [u64]) {
        ntt::forward_lazy(&tables.fwd, [a, b], tables.q)
    }
}
