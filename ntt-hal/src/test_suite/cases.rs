use crate::{api::NttBackend, error::NttError, params::NttParams};

/// `(log_n, q, w, w_inv, n_inv)`.
const CATALOGUE: &[(usize, u64, u64, u64, u64)] = &[
    (8, 0x1e01, 62, 1115, 7651),
    (9, 0x10001, 431, 55045, 65409),
    (10, 0x10001, 33, 1986, 65473),
    (11, 0x10001, 21, 49933, 65505),
    (12, 0x10001, 13, 15124, 65521),
    (13, 0x10001, 15, 30584, 65529),
    (14, 0x10001, 9, 7282, 65533),
    (14, 0xc0001, 9, 174763, 786385),
    (14, 0xfff0001, 10360, 28987060, 268353541),
    (14, 0x1ffc8001, 101907, 42191135, 536608783),
    (14, 0x7ffe0001, 320878, 74168714, 2147221513),
    (14, 0xfff88001, 263641, 243522111, 4294213663),
    (14, 0x7fffffffe0001, 83051296654, 374947202223591, 2251662374600713),
    (14, 0x80000001c0001, 72703961923, 153477749218715, 2251662376566673),
    (15, 0x10001, 3, 21846, 65535),
    (15, 0x80000001c0001, 82138512871, 535648572761016, 2251731096043465),
    (16, 0x7ffe0001, 1859, 1579037640, 2147319811),
    (16, 0x7fffffffe0001, 29454831443, 520731633805630, 2251765453815811),
    (17, 0x100180001, 79247, 4203069932, 4296507381),
];

/// 49-bit modulus at the edge of the 52-bit lane backend.
pub const Q49: u64 = 0x1fffffff50001;

/// Fresh parameter sets for every catalogue entry, plus small and 49-bit
/// configurations whose roots are searched at call time.
pub fn test_cases() -> Result<Vec<NttParams>, NttError> {
    let mut cases: Vec<NttParams> = CATALOGUE
        .iter()
        .map(|&(log_n, q, w, w_inv, n_inv)| NttParams::with_inverses(log_n, q, w, w_inv, n_inv))
        .collect::<Result<_, _>>()?;
    for log_n in [3, 4, 5, 6, 7] {
        cases.push(NttParams::find(log_n, 0x10001)?);
    }
    for log_n in [5, 10, 15] {
        cases.push(NttParams::find(log_n, Q49)?);
    }
    Ok(cases)
}

/// The subset of [`test_cases`] that backend `B` accepts.
pub fn test_cases_for<B: NttBackend>() -> Result<Vec<NttParams>, NttError> {
    Ok(test_cases()?
        .into_iter()
        .filter(|p| B::check(p).is_ok())
        .collect())
}
