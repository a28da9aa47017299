use std::sync::Arc;

use ntt_cpu_ref::{NttRadix4, NttRadix4x4, NttRef};
use ntt_hal::{
    Module, NttBackend, NttError, NttParams, TwiddleCache,
    test_suite::{
        cases::test_cases_for,
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

fn round_trip_all<B: NttBackend>() {
    for params in test_cases_for::<B>().unwrap() {
        test_round_trip(&Module::<B>::new(params).unwrap());
    }
}

#[test]
fn catalogue_round_trip_ref() {
    init_logging();
    round_trip_all::<NttRef>();
}

#[test]
fn catalogue_round_trip_radix4() {
    init_logging();
    round_trip_all::<NttRadix4>();
}

#[test]
fn catalogue_round_trip_radix4x4() {
    init_logging();
    round_trip_all::<NttRadix4x4>();
}

#[test]
fn catalogue_radix4_backends_match_ref() {
    init_logging();
    for params in test_cases_for::<NttRadix4>().unwrap() {
        let module_ref: Module<NttRef> = Module::new(params).unwrap();
        test_matches_reference(&module_ref, &Module::<NttRadix4>::new(params).unwrap());
        test_matches_reference(&module_ref, &Module::<NttRadix4x4>::new(params).unwrap());
    }
}

#[test]
fn scenario_m8() {
    init_logging();
    let params: NttParams = NttParams::with_inverses(8, 0x1e01, 62, 1115, 7651).unwrap();
    let mut source: Source = Source::new([8u8; 32]);
    let mut a: Vec<u64> = vec![0u64; 256];
    source.fill_residues(&mut a, params.q());

    let module_ref: Module<NttRef> = Module::new(params).unwrap();
    let module_r4: Module<NttRadix4> = Module::new(params).unwrap();
    let module_r44: Module<NttRadix4x4> = Module::new(params).unwrap();

    let mut b_ref: Vec<u64> = a.clone();
    module_ref.forward(&mut b_ref);
    let mut b_r4: Vec<u64> = a.clone();
    module_r4.forward(&mut b_r4);
    let mut b_r44: Vec<u64> = a.clone();
    module_r44.forward(&mut b_r44);
    assert_eq!(b_ref, b_r4);
    assert_eq!(b_ref, b_r44);

    module_r44.inverse(&mut b_r44);
    assert_eq!(a, b_r44);
}

/// `log_n = 17` takes the radix-2 fix-up of the fused backend.
#[test]
fn scenario_m17() {
    init_logging();
    let params: NttParams = NttParams::with_inverses(17, 0x100180001, 79247, 4203069932, 4296507381).unwrap();
    let mut source: Source = Source::new([17u8; 32]);
    let mut a: Vec<u64> = vec![0u64; 1 << 17];
    source.fill_residues(&mut a, params.q());

    let module_ref: Module<NttRef> = Module::new(params).unwrap();
    let module_r44: Module<NttRadix4x4> = Module::new(params).unwrap();

    let mut b_ref: Vec<u64> = a.clone();
    module_ref.forward(&mut b_ref);
    let mut b: Vec<u64> = a.clone();
    module_r44.forward_lazy(&mut b);
    assert!(b.iter().all(|&x| x < 8 * params.q()));
    assert!(b.iter().zip(&b_ref).all(|(&x, &y)| x % params.q() == y));

    module_r44.inverse(&mut b);
    assert_eq!(a, b);
}

#[test]
fn capability_checks() {
    assert!(NttRef::supports(0x3fffffffffffffff));
    assert!(!NttRadix4::supports(0x3fffffffffffffff));
    assert!(NttRadix4::supports(0x7fffffffe0001));
    assert!(!NttRef::supports(0x10000));
    assert!(!NttRef::supports_log_n(2));

    // 2^61 + 65, a 62-bit prime.
    let params: NttParams = NttParams::find(3, 0x2000000000000041).unwrap();
    assert!(Module::<NttRef>::new(params).is_ok());
    assert!(matches!(
        Module::<NttRadix4x4>::new(params),
        Err(NttError::ModulusOutOfRange { max_bits: 60, .. })
    ));
}

#[test]
fn cache_shares_and_releases() {
    init_logging();
    let params: NttParams = NttParams::with_inverses(10, 0x10001, 33, 1986, 65473).unwrap();
    let mut cache: TwiddleCache<NttRadix4> = TwiddleCache::new();

    let first: Arc<Module<NttRadix4>> = cache.get_or_try_insert(&params).unwrap();
    let second: Arc<Module<NttRadix4>> = cache.get_or_try_insert(&params).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);

    let key = TwiddleCache::<NttRadix4>::key(&params);
    assert!(cache.release(&key).is_some());
    assert!(cache.is_empty());
    assert!(cache.get(&key).is_none());

    // Released modules stay usable by their holders.
    let mut a: Vec<u64> = (0..1024).collect();
    first.forward(&mut a);
    first.inverse(&mut a);
    assert_eq!(a, (0..1024).collect::<Vec<u64>>());
}

#[test]
fn cache_rejects_without_inserting() {
    let params: NttParams = NttParams::find(3, 0x2000000000000041).unwrap();
    let mut cache: TwiddleCache<NttRadix4> = TwiddleCache::new();
    assert!(cache.get_or_try_insert(&params).is_err());
    assert!(cache.is_empty());
}

#[test]
fn shared_module_across_threads() {
    let params: NttParams = NttParams::with_inverses(12, 0x10001, 13, 15124, 65521).unwrap();
    let module: Arc<Module<NttRadix4x4>> = Arc::new(Module::new(params).unwrap());
    let handles: Vec<_> = (0..4u8)
        .map(|seed| {
            let module: Arc<Module<NttRadix4x4>> = Arc::clone(&module);
            std::thread::spawn(move || {
                let mut source: Source = Source::new([seed; 32]);
                let mut a: Vec<u64> = vec![0u64; module.n()];
                source.fill_residues(&mut a, module.q());
                let mut b: Vec<u64> = a.clone();
                module.forward(&mut b);
                module.inverse(&mut b);
                a == b
            })
        })
        .collect();
    assert!(handles.into_iter().all(|h| h.join().unwrap()));
}
