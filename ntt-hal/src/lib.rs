//! Hardware-abstraction layer of the negacyclic NTT engine.
//!
//! Everything a backend needs besides its kernels lives here:
//!
//! | Module         | Contents                                                        |
//! |----------------|-----------------------------------------------------------------|
//! | [`modulus`]    | Shoup multiply operators, the lazy reduction ladder             |
//! | [`butterfly`]  | Radix-2 and radix-4 butterflies with their bounds               |
//! | [`twiddle`]    | Bit-reversed root tables, constants and the radix-4 expansion   |
//! | [`params`]     | Validated `(q, n, w)` configurations and root search            |
//! | [`api`]        | The [`NttBackend`] trait                                        |
//! | [`layouts`]    | Shared table layouts and [`Module`]                             |
//! | [`cache`]      | Per-configuration memoisation of prepared modules               |
//! | [`test_suite`] | Backend-generic test bodies and the macros instantiating them   |
//!
//! # Conventions
//!
//! Transforms are in place over `n = 2^log_n` residues. Forward output is in
//! bit-reversed order: position `k` holds the evaluation at
//! `w^(2 * brv(k) + 1)`. Inverse input is whatever the same backend's forward
//! produced, including its lazy bound and native ordering.

pub mod api;
pub mod butterfly;
pub mod cache;
pub mod error;
pub mod layouts;
pub mod modulus;
pub mod params;
pub mod test_suite;
pub mod twiddle;

pub use api::{NttBackend, NttTables};
pub use cache::TwiddleCache;
pub use error::NttError;
pub use layouts::Module;
pub use modulus::MulOp;
pub use params::{NttParams, primitive_root};
