use ntt_hal::{backend_test_suite, cross_backend_test_suite};

backend_test_suite! {
    mod ref_m8,
    backend = crate::NttRef,
    params = ntt_hal::NttParams::with_inverses(8, 0x1e01, 62, 1115, 7651).unwrap(),
    tests = {
        round_trip => ntt_hal::test_suite::ntt::test_round_trip,
        lazy_bound => ntt_hal::test_suite::ntt::test_lazy_bound,
        inverse_accepts_lazy => ntt_hal::test_suite::ntt::test_inverse_accepts_lazy,
        matches_naive => ntt_hal::test_suite::ntt::test_matches_naive,
        forward_pair => ntt_hal::test_suite::ntt::test_forward_pair,
    }
}

backend_test_suite! {
    mod radix4_m9,
    backend = crate::NttRadix4,
    params = ntt_hal::NttParams::with_inverses(9, 0x10001, 431, 55045, 65409).unwrap(),
    tests = {
        round_trip => ntt_hal::test_suite::ntt::test_round_trip,
        lazy_bound => ntt_hal::test_suite::ntt::test_lazy_bound,
        inverse_accepts_lazy => ntt_hal::test_suite::ntt::test_inverse_accepts_lazy,
        matches_naive => ntt_hal::test_suite::ntt::test_matches_naive,
        forward_pair => ntt_hal::test_suite::ntt::test_forward_pair,
    }
}

backend_test_suite! {
    mod radix4x4_m10,
    backend = crate::NttRadix4x4,
    params = ntt_hal::NttParams::with_inverses(10, 0x10001, 33, 1986, 65473).unwrap(),
    tests = {
        round_trip => ntt_hal::test_suite::ntt::test_round_trip,
        lazy_bound => ntt_hal::test_suite::ntt::test_lazy_bound,
        inverse_accepts_lazy => ntt_hal::test_suite::ntt::test_inverse_accepts_lazy,
        matches_naive => ntt_hal::test_suite::ntt::test_matches_naive,
    }
}

cross_backend_test_suite! {
    mod radix4_vs_ref_m14_51bit,
    backend_ref = crate::NttRef,
    backend_test = crate::NttRadix4,
    params = ntt_hal::NttParams::with_inverses(14, 0x7fffffffe0001, 83051296654, 374947202223591, 2251662374600713).unwrap(),
    tests = {
        matches_reference => ntt_hal::test_suite::ntt::test_matches_reference,
    }
}

cross_backend_test_suite! {
    mod radix4x4_vs_ref_m15,
    backend_ref = crate::NttRef,
    backend_test = crate::NttRadix4x4,
    params = ntt_hal::NttParams::with_inverses(15, 0x10001, 3, 21846, 65535).unwrap(),
    tests = {
        matches_reference => ntt_hal::test_suite::ntt::test_matches_reference,
    }
}
