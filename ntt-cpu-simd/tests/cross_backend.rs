use std::sync::Arc;

use ntt_cpu_ref::{NttRadix4, NttRadix4x4, NttRef};
use ntt_cpu_simd::{NttIfma, NttVmsl, R2x16, R4R2, Radix4, Radix4Unordered, ifma::radix4::canonical_position};
use ntt_hal::{
    Module, NttBackend, NttError, NttParams, TwiddleCache,
    test_suite::{
        cases::{Q49, test_cases_for},
        ntt::{test_matches_reference, test_round_trip},
    },
};
use sampling::Source;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn catalogue_against_ref<B: NttBackend>() {
    init_logging();
    let cases: Vec<NttParams> = test_cases_for::<B>().unwrap();
    assert!(!cases.is_empty(), "{}: no catalogue case accepted", B::NAME);
    for params in cases {
        let module: Module<B> = Module::new(params).unwrap();
        test_round_trip(&module);
        test_matches_reference(&Module::<NttRef>::new(params).unwrap(), &module);
    }
}

#[test]
fn catalogue_ifma_radix4() {
    catalogue_against_ref::<NttIfma<Radix4>>();
}

#[test]
fn catalogue_ifma_unordered() {
    catalogue_against_ref::<NttIfma<Radix4Unordered>>();
}

#[test]
fn catalogue_ifma_r4r2() {
    catalogue_against_ref::<NttIfma<R4R2>>();
}

#[test]
fn catalogue_ifma_r2x16() {
    catalogue_against_ref::<NttIfma<R2x16>>();
}

#[test]
fn catalogue_vmsl() {
    catalogue_against_ref::<NttVmsl>();
}

fn forward<B: NttBackend>(params: NttParams, a: &[u64]) -> Vec<u64> {
    let module: Module<B> = Module::new(params).unwrap();
    let mut b: Vec<u64> = a.to_vec();
    module.forward(&mut b);
    module.to_canonical_order(&mut b);
    b
}

/// Every backend agrees on the m = 8 configuration.
#[test]
fn scenario_m8_all_backends() {
    init_logging();
    let params: NttParams = NttParams::with_inverses(8, 0x1e01, 62, 1115, 7651).unwrap();
    let mut a: Vec<u64> = vec![0u64; 256];
    Source::new([8u8; 32]).fill_residues(&mut a, params.q());

    let expected: Vec<u64> = forward::<NttRef>(params, &a);
    assert_eq!(forward::<NttRadix4>(params, &a), expected);
    assert_eq!(forward::<NttRadix4x4>(params, &a), expected);
    assert_eq!(forward::<NttIfma<Radix4>>(params, &a), expected);
    assert_eq!(forward::<NttIfma<Radix4Unordered>>(params, &a), expected);
    assert_eq!(forward::<NttIfma<R4R2>>(params, &a), expected);
    assert_eq!(forward::<NttIfma<R2x16>>(params, &a), expected);
    assert_eq!(forward::<NttVmsl>(params, &a), expected);
}

/// The unordered output is the canonical one permuted inside each
/// 32-element group, whatever the size.
#[test]
fn unordered_permutation_is_closed_form() {
    for log_n in [5, 6, 9, 12] {
        let params: NttParams = NttParams::find(log_n, Q49).unwrap();
        let mut a: Vec<u64> = vec![0u64; params.n()];
        Source::new([log_n as u8; 32]).fill_residues(&mut a, params.q());

        let canonical: Vec<u64> = forward::<NttIfma<Radix4>>(params, &a);
        let module: Module<NttIfma<Radix4Unordered>> = Module::new(params).unwrap();
        let mut unordered: Vec<u64> = a;
        module.forward(&mut unordered);

        for (group, block) in canonical.chunks_exact(32).zip(unordered.chunks_exact(32)) {
            for s in 0..4 {
                for k in 0..8 {
                    assert_eq!(block[8 * s + k], group[canonical_position(s, k)], "log_n={log_n}");
                }
            }
        }
    }
}

#[test]
fn capability_checks() {
    assert!(NttIfma::<Radix4>::supports(Q49));
    assert!(!NttIfma::<Radix4>::supports(0x80000001c0001));
    assert!(NttVmsl::supports(0x80000001c0001));
    assert!(!NttVmsl::supports(0x7fffffffffffe1));

    let params: NttParams =
        NttParams::with_inverses(14, 0x80000001c0001, 72703961923, 153477749218715, 2251662376566673).unwrap();
    assert!(matches!(
        Module::<NttIfma<R4R2>>::new(params),
        Err(NttError::ModulusOutOfRange { max_bits: 49, .. })
    ));
    assert!(Module::<NttVmsl>::new(params).is_ok());

    let params: NttParams = NttParams::find(4, 0x10001).unwrap();
    assert!(matches!(
        Module::<NttIfma<Radix4>>::new(params),
        Err(NttError::InvalidSize { log_n: 4, min_log_n: 5 })
    ));
    assert!(Module::<NttIfma<R2x16>>::new(params).is_ok());
}

#[test]
fn cached_lane_module() {
    init_logging();
    let params: NttParams = NttParams::find(10, Q49).unwrap();
    let mut cache: TwiddleCache<NttIfma<R4R2>> = TwiddleCache::new();
    let module: Arc<Module<NttIfma<R4R2>>> = cache.get_or_try_insert(&params).unwrap();
    assert!(Arc::ptr_eq(&module, &cache.get_or_try_insert(&params).unwrap()));

    let mut a: Vec<u64> = vec![0u64; params.n()];
    Source::new([10u8; 32]).fill_residues(&mut a, params.q());
    let mut b: Vec<u64> = a.clone();
    module.forward_lazy(&mut b);
    module.inverse(&mut b);
    assert_eq!(a, b);
}
