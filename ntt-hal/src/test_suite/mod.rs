pub mod cases;
pub mod ntt;

/// One `#[test]` per listed body, all sharing a lazily built module.
#[macro_export]
macro_rules! backend_test_suite {
    (
        mod $modname:ident,
        backend = $backend:ty,
        params = $params:expr,
        tests = {
            $( $(#[$attr:meta])* $test_name:ident => $impl:path ),+ $(,)?
        }
    ) => {
        mod $modname {
            use std::sync::LazyLock;

            use $crate::layouts::Module;

            static MODULE: LazyLock<Module<$backend>> =
                LazyLock::new(|| Module::<$backend>::new($params).expect("module construction"));

            $(
                $(#[$attr])*
                #[test]
                fn $test_name() {
                    ($impl)(&*MODULE);
                }
            )+
        }
    };
}

/// Pairs a reference backend with a backend under test on the same
/// parameters.
#[macro_export]
macro_rules! cross_backend_test_suite {
    (
        mod $modname:ident,
        backend_ref = $backend_ref:ty,
        backend_test = $backend_test:ty,
        params = $params:expr,
        tests = {
            $( $(#[$attr:meta])* $test_name:ident => $impl:path ),+ $(,)?
        }
    ) => {
        mod $modname {
            use std::sync::LazyLock;

            use $crate::layouts::Module;

            static MODULE_REF: LazyLock<Module<$backend_ref>> =
                LazyLock::new(|| Module::<$backend_ref>::new($params).expect("module construction"));
            static MODULE_TEST: LazyLock<Module<$backend_test>> =
                LazyLock::new(|| Module::<$backend_test>::new($params).expect("module construction"));

            $(
                $(#[$attr])*
                #[test]
                fn $test_name() {
                    ($impl)(&*MODULE_REF, &*MODULE_TEST);
                }
            )+
        }
    };
}
