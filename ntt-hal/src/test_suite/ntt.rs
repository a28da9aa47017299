use sampling::{Residues, Source};

use crate::{
    api::NttBackend,
    layouts::Module,
    modulus::{WordOps, mod_mul, mod_pow, reduce_2q_to_q, reduce_4q_to_2q, reduce_4q_to_q, reduce_8q_to_2q, reduce_8q_to_q},
    params::NttParams,
};

/// Largest size checked against the quadratic evaluation.
pub const NAIVE_MAX_LOG_N: usize = 10;

/// Evaluates `a` at every odd power of `w`, in bit-reversed order:
/// position `k` holds `sum_i a[i] * w^((2 * brv(k) + 1) * i)`.
pub fn naive_forward(params: &NttParams, a: &[u64]) -> Vec<u64> {
    let (n, q, log_n) = (params.n(), params.q(), params.log_n() as u32);
    (0..n)
        .map(|k| {
            let x: u64 = mod_pow(params.w(), 2 * k.reverse_bits_msb(log_n) as u64 + 1, q);
            a.iter().rev().fold(0u64, |acc, &c| (mod_mul(acc, x, q) + c) % q)
        })
        .collect()
}

fn random_residues(n: usize, q: u64, seed: u8) -> Vec<u64> {
    let mut source: Source = Source::new([seed; 32]);
    let mut a: Vec<u64> = vec![0u64; n];
    source.fill_residues(&mut a, q);
    a
}

pub fn test_round_trip<B: NttBackend>(module: &Module<B>) {
    let (n, q) = (module.n(), module.q());
    let a: Vec<u64> = random_residues(n, q, 1);

    let mut b: Vec<u64> = a.clone();
    module.forward(&mut b);
    assert!(b.iter().all(|&x| x < q), "{}: forward output not canonical", B::NAME);
    module.inverse(&mut b);
    assert_eq!(a, b, "{}: forward/inverse round trip", B::NAME);

    module.forward_lazy(&mut b);
    module.inverse(&mut b);
    assert_eq!(a, b, "{}: lazy forward/inverse round trip", B::NAME);

    // Constant and delta inputs hit the extreme butterfly paths.
    for fill in [0, 1, q - 1] {
        let a: Vec<u64> = vec![fill; n];
        let mut b: Vec<u64> = a.clone();
        module.forward_lazy(&mut b);
        module.inverse(&mut b);
        assert_eq!(a, b, "{}: round trip of constant {fill}", B::NAME);
    }
}

pub fn test_lazy_bound<B: NttBackend>(module: &Module<B>) {
    let (n, q) = (module.n(), module.q());
    let bound: u64 = module.lazy_bound() * q;

    for a in [random_residues(n, q, 2), vec![q - 1; n]] {
        let mut lazy: Vec<u64> = a.clone();
        module.forward_lazy(&mut lazy);
        assert!(
            lazy.iter().all(|&x| x < bound),
            "{}: lazy output exceeds {}q",
            B::NAME,
            module.lazy_bound()
        );

        let mut full: Vec<u64> = a;
        module.forward(&mut full);
        assert!(
            lazy.iter().zip(&full).all(|(&l, &f)| l % q == f),
            "{}: lazy and normalised forward disagree",
            B::NAME
        );
    }
}

/// Inputs anywhere below the lazy bound invert like their reductions.
pub fn test_inverse_accepts_lazy<B: NttBackend>(module: &Module<B>) {
    let (n, q) = (module.n(), module.q());
    let mut source: Source = Source::new([3u8; 32]);
    let mut lazy: Vec<u64> = vec![0u64; n];
    Residues::lazy(q, module.lazy_bound())
        .expect("non-empty range")
        .fill(&mut source, &mut lazy);
    let mut reduced: Vec<u64> = lazy.iter().map(|&x| x % q).collect();

    module.inverse(&mut lazy);
    module.inverse(&mut reduced);
    assert_eq!(lazy, reduced, "{}: inverse of lazy input", B::NAME);
}

/// Forward output, in canonical order, against the quadratic evaluation.
pub fn test_matches_naive<B: NttBackend>(module: &Module<B>) {
    if module.log_n() > NAIVE_MAX_LOG_N {
        return;
    }
    let a: Vec<u64> = random_residues(module.n(), module.q(), 4);
    let expected: Vec<u64> = naive_forward(module.params(), &a);
    let mut have: Vec<u64> = a;
    module.forward(&mut have);
    module.to_canonical_order(&mut have);
    assert_eq!(have, expected, "{}: forward against naive evaluation", B::NAME);
}

pub fn test_forward_pair<B: NttBackend>(module: &Module<B>) {
    let (n, q) = (module.n(), module.q());
    let a: Vec<u64> = random_residues(n, q, 5);
    let b: Vec<u64> = random_residues(n, q, 6);

    let (mut a0, mut b0) = (a.clone(), b.clone());
    module.forward(&mut a0);
    module.forward(&mut b0);

    let (mut a1, mut b1) = (a.clone(), b.clone());
    module.forward_pair(&mut a1, &mut b1);
    assert_eq!(a0, a1, "{}: pair forward, first operand", B::NAME);
    assert_eq!(b0, b1, "{}: pair forward, second operand", B::NAME);

    let (mut a2, mut b2) = (a.clone(), b.clone());
    module.forward_pair_lazy(&mut a2, &mut b2);
    let bound: u64 = module.lazy_bound() * q;
    assert!(a2.iter().chain(&b2).all(|&x| x < bound));
    module.inverse(&mut a2);
    module.inverse(&mut b2);
    assert_eq!((a2, b2), (a, b), "{}: pair lazy round trip", B::NAME);
}

/// Both modules must share the same parameters.
pub fn test_matches_reference<BR: NttBackend, BT: NttBackend>(module_ref: &Module<BR>, module_test: &Module<BT>) {
    assert_eq!(module_ref.params(), module_test.params());
    let (n, q) = (module_ref.n(), module_ref.q());

    for seed in [7u8, 8] {
        let a: Vec<u64> = random_residues(n, q, seed);

        let mut have_ref: Vec<u64> = a.clone();
        module_ref.forward(&mut have_ref);
        module_ref.to_canonical_order(&mut have_ref);

        let mut have_test: Vec<u64> = a.clone();
        module_test.forward(&mut have_test);
        module_test.to_canonical_order(&mut have_test);

        assert_eq!(have_ref, have_test, "{} against {}: forward", BT::NAME, BR::NAME);

        let mut lazy_test: Vec<u64> = a;
        module_test.forward_lazy(&mut lazy_test);
        module_test.to_canonical_order(&mut lazy_test);
        lazy_test.iter_mut().for_each(|x| *x %= q);
        assert_eq!(have_ref, lazy_test, "{} against {}: lazy forward", BT::NAME, BR::NAME);
    }
}

/// Samples every ladder step across `[0, 8q)`.
pub fn test_ladder(q: u64) {
    let stride: usize = (q as usize / 4096).max(1);
    for v in (0..8 * q).step_by(stride).chain([8 * q - 1, 4 * q - 1, 2 * q - 1, q, q - 1]) {
        assert!(reduce_8q_to_2q(v, q) < 2 * q);
        assert_eq!(reduce_8q_to_q(v, q), v % q);
        if v < 4 * q {
            assert!(reduce_4q_to_2q(v, q) < 2 * q);
            assert_eq!(reduce_4q_to_q(v, q), v % q);
        }
        if v < 2 * q {
            let once: u64 = reduce_2q_to_q(v, q);
            assert_eq!(once, v % q);
            assert_eq!(reduce_2q_to_q(once, q), once);
        }
    }
}
