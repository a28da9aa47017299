use ntt_hal::{backend_test_suite, cross_backend_test_suite};

backend_test_suite! {
    mod ifma_radix4_m8,
    backend = crate::NttIfma<crate::Radix4>,
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
    mod ifma_unordered_m9,
    backend = crate::NttIfma<crate::Radix4Unordered>,
    params = ntt_hal::NttParams::with_inverses(9, 0x10001, 431, 55045, 65409).unwrap(),
    tests = {
        round_trip => ntt_hal::test_suite::ntt::test_round_trip,
        lazy_bound => ntt_hal::test_suite::ntt::test_lazy_bound,
        inverse_accepts_lazy => ntt_hal::test_suite::ntt::test_inverse_accepts_lazy,
        matches_naive => ntt_hal::test_suite::ntt::test_matches_naive,
    }
}

backend_test_suite! {
    mod ifma_r4r2_m4,
    backend = crate::NttIfma<crate::R4R2>,
    params = ntt_hal::NttParams::find(4, 0x10001).unwrap(),
    tests = {
        round_trip => ntt_hal::test_suite::ntt::test_round_trip,
        lazy_bound => ntt_hal::test_suite::ntt::test_lazy_bound,
        inverse_accepts_lazy => ntt_hal::test_suite::ntt::test_inverse_accepts_lazy,
        matches_naive => ntt_hal::test_suite::ntt::test_matches_naive,
    }
}

backend_test_suite! {
    mod ifma_r2x16_m7_49bit,
    backend = crate::NttIfma<crate::R2x16>,
    params = ntt_hal::NttParams::find(7, ntt_hal::test_suite::cases::Q49).unwrap(),
    tests = {
        round_trip => ntt_hal::test_suite::ntt::test_round_trip,
        lazy_bound => ntt_hal::test_suite::ntt::test_lazy_bound,
        inverse_accepts_lazy => ntt_hal::test_suite::ntt::test_inverse_accepts_lazy,
        matches_naive => ntt_hal::test_suite::ntt::test_matches_naive,
    }
}

backend_test_suite! {
    mod vmsl_m3,
    backend = crate::NttVmsl,
    params = ntt_hal::NttParams::find(3, 0x10001).unwrap(),
    tests = {
        round_trip => ntt_hal::test_suite::ntt::test_round_trip,
        lazy_bound => ntt_hal::test_suite::ntt::test_lazy_bound,
        matches_naive => ntt_hal::test_suite::ntt::test_matches_naive,
        forward_pair => ntt_hal::test_suite::ntt::test_forward_pair,
    }
}

backend_test_suite! {
    mod vmsl_m11_52bit,
    backend = crate::NttVmsl,
    params = ntt_hal::NttParams::find(11, 0x80000001c0001).unwrap(),
    tests = {
        round_trip => ntt_hal::test_suite::ntt::test_round_trip,
        lazy_bound => ntt_hal::test_suite::ntt::test_lazy_bound,
        inverse_accepts_lazy => ntt_hal::test_suite::ntt::test_inverse_accepts_lazy,
        forward_pair => ntt_hal::test_suite::ntt::test_forward_pair,
    }
}

cross_backend_test_suite! {
    mod ifma_vs_ref_m14_32bit,
    backend_ref = ntt_cpu_ref::NttRef,
    backend_test = crate::NttIfma<crate::Radix4>,
    params = ntt_hal::NttParams::with_inverses(14, 0xfff88001, 263641, 243522111, 4294213663).unwrap(),
    tests = {
        matches_reference => ntt_hal::test_suite::ntt::test_matches_reference,
    }
}

cross_backend_test_suite! {
    mod ifma_unordered_vs_ref_m15_49bit,
    backend_ref = ntt_cpu_ref::NttRef,
    backend_test = crate::NttIfma<crate::Radix4Unordered>,
    params = ntt_hal::NttParams::find(15, ntt_hal::test_suite::cases::Q49).unwrap(),
    tests = {
        matches_reference => ntt_hal::test_suite::ntt::test_matches_reference,
    }
}

cross_backend_test_suite! {
    mod vmsl_vs_ref_m14_52bit,
    backend_ref = ntt_cpu_ref::NttRef,
    backend_test = crate::NttVmsl,
    params = ntt_hal::NttParams::with_inverses(14, 0x80000001c0001, 72703961923, 153477749218715, 2251662376566673).unwrap(),
    tests = {
        matches_reference => ntt_hal::test_suite::ntt::test_matches_reference,
    }
}
