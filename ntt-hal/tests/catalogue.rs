use ntt_hal::{
    NttParams,
    modulus::{WordOps, mod_mul, mod_pow},
    test_suite::{
        cases::{Q49, test_cases},
        ntt::{naive_forward, test_ladder},
    },
};

#[test]
fn catalogue_is_consistent() {
    let cases: Vec<NttParams> = test_cases().unwrap();
    assert_eq!(cases.len(), 27);
    for p in &cases {
        let q: u64 = p.q();
        assert_eq!(mod_pow(p.w(), p.n() as u64, q), q - 1, "{p:?}");
        assert_eq!(mod_mul(p.w(), p.w_inv(), q), 1, "{p:?}");
        assert_eq!(mod_mul(p.n() as u64, p.n_inv(), q), 1, "{p:?}");
    }
    assert!(cases.iter().any(|p| p.q() == Q49 && p.log_n() == 15));
    assert!(cases.iter().any(|p| p.q() == 0x100180001 && p.log_n() == 17));
}

#[test]
fn ladder_on_catalogue_moduli() {
    for q in [0x1e01, 0x10001, 0xfff88001, Q49, 0x7fffffffe0001] {
        test_ladder(q);
    }
}

#[test]
fn naive_evaluation_of_monomials() {
    let p: NttParams = NttParams::with_inverses(8, 0x1e01, 62, 1115, 7651).unwrap();
    let (n, q) = (p.n(), p.q());

    let mut delta: Vec<u64> = vec![0; n];
    delta[0] = 1;
    assert!(naive_forward(&p, &delta).iter().all(|&x| x == 1));

    let mut x: Vec<u64> = vec![0; n];
    x[1] = 1;
    let have: Vec<u64> = naive_forward(&p, &x);
    for (k, &v) in have.iter().enumerate() {
        let e: u64 = 2 * k.reverse_bits_msb(p.log_n() as u32) as u64 + 1;
        assert_eq!(v, mod_pow(p.w(), e, q));
    }

    // x^n = -1 at every evaluation point.
    let mut wrap: Vec<u64> = vec![0; n];
    wrap[n - 1] = 1;
    let top: Vec<u64> = naive_forward(&p, &wrap);
    assert!(have.iter().zip(&top).all(|(&a, &b)| mod_mul(a, b, q) == q - 1));
}
