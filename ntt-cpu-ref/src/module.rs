//! [`NttBackend`] implementations of the scalar backends.

use ntt_hal::{
    api::NttBackend,
    error::NttError,
    layouts::{Radix2Tables, Radix4Tables},
    modulus::WORD_SIZE,
    params::NttParams,
};

use crate::{NttRadix4, NttRadix4x4, NttRef, radix4, radix4x4, reference};

impl NttBackend for NttRef {
    const NAME: &'static str = "ntt-ref";
    const MAX_MODULUS_BITS: u32 = 62;
    const MIN_LOG_N: usize = 3;
    const LAZY_BOUND: u64 = 4;

    type Tables = Radix2Tables;

    fn prepare(params: &NttParams) -> Result<Radix2Tables, NttError> {
        Radix2Tables::new::<WORD_SIZE>(params)
    }

    fn forward_lazy(tables: &Radix2Tables, a: &mut [u64]) {
        reference::forward_lazy(tables, a)
    }

    fn inverse(tables: &Radix2Tables, a: &mut [u64]) {
        reference::inverse(tables, a)
    }

    fn forward_pair_lazy(tables: &Radix2Tables, a: &mut [u64], b: &mut [u64]) {
        reference::forward_pair_lazy(tables, a, b)
    }
}

impl NttBackend for NttRadix4 {
    const NAME: &'static str = "ntt-radix4";
    const MAX_MODULUS_BITS: u32 = 60;
    const MIN_LOG_N: usize = 3;
    const LAZY_BOUND: u64 = 8;

    type Tables = Radix4Tables;

    fn prepare(params: &NttParams) -> Result<Radix4Tables, NttError> {
        Radix4Tables::new::<WORD_SIZE>(params)
    }

    fn forward_lazy(tables: &Radix4Tables, a: &mut [u64]) {
        radix4::forward_lazy(tables, a)
    }

    fn inverse(tables: &Radix4Tables, a: &mut [u64]) {
        radix4::inverse(tables, a)
    }
}

impl NttBackend for NttRadix4x4 {
    const NAME: &'static str = "ntt-radix4x4";
    const MAX_MODULUS_BITS: u32 = 60;
    const MIN_LOG_N: usize = 3;
    const LAZY_BOUND: u64 = 8;

    type Tables = Radix4Tables;

    fn prepare(params: &NttParams) -> Result<Radix4Tables, NttError> {
        Radix4Tables::new::<WORD_SIZE>(params)
    }

    fn forward_lazy(tables: &Radix4Tables, a: &mut [u64]) {
        radix4x4::forward_lazy(tables, a)
    }

    fn inverse(tables: &Radix4Tables, a: &mut [u64]) {
        radix4x4::inverse(tables, a)
    }
}
