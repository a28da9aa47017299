//! Lane-parallel backends for [`ntt_hal`].
//!
//! | Backend                      | Lanes | Products                  | Max `q` bits | Lazy bound |
//! |------------------------------|-------|---------------------------|--------------|------------|
//! | `NttIfma<Radix4>`            | 8     | 52-bit fused multiply-add | 49           | `8q`       |
//! | `NttIfma<Radix4Unordered>`   | 8     | 52-bit fused multiply-add | 49           | `8q`       |
//! | `NttIfma<R4R2>`              | 8     | 52-bit fused multiply-add | 49           | `4q`       |
//! | `NttIfma<R2x16>`             | 8     | 52-bit fused multiply-add | 49           | `4q`       |
//! | [`NttVmsl`]                  | 2     | 56-bit multiply-sum       | 52           | `8q`       |
//!
//! The 8-lane kernels are generic over [`lanes::Lanes8`]. When
//! [`has_native_ifma`] holds at table construction they run on 512-bit
//! registers with the 52-bit fused multiply-add; otherwise on
//! [`lanes::U64x8`], a portable emulation with the same register semantics,
//! so every backend runs (and is tested) on any target and both paths give
//! identical numbers. The 2-lane kernels always use [`lanes::U64x2`];
//! [`has_native_vmsl`] is only reported.
//!
//! `NttIfma<Radix4Unordered>` leaves its forward output permuted inside every
//! 32-element group; [`Module::to_canonical_order`](ntt_hal::Module::to_canonical_order)
//! undoes it. Its inverse, like every other, takes the forward output as
//! produced, in native order.

pub mod ifma;
pub mod lanes;
pub mod vmsl;

#[cfg(test)]
mod tests;

pub use ifma::{IfmaVariant, NttIfma, R2x16, R4R2, Radix4, Radix4Unordered, has_native_ifma};
pub use vmsl::{NttVmsl, has_native_vmsl};
