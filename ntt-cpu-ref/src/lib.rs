//! Portable scalar backends for [`ntt_hal`].
//!
//! | Backend         | Kernel                       | Max `q` bits | Lazy bound |
//! |-----------------|------------------------------|--------------|------------|
//! | [`NttRef`]      | radix-2 Harvey, [`reference`] | 62           | `4q`       |
//! | [`NttRadix4`]   | radix-4, [`radix4`]          | 60           | `8q`       |
//! | [`NttRadix4x4`] | fused radix-16, [`radix4x4`] | 60           | `8q`       |
//!
//! All three use 64-bit Shoup constants and accept `log_n >= 3`. Their
//! normalised forward outputs are bit-identical; `NttRef` is the reference
//! the lane-parallel backends are tested against.
//!
//! Radix-4 intermediates reach `16q` inside the butterflies, which is why the
//! radix-4 backends stop two bits short of `NttRef`.

mod module;
pub mod radix4;
pub mod radix4x4;
pub mod reference;

#[cfg(test)]
mod tests;

/// Radix-2 reference backend.
pub struct NttRef {}

/// Radix-4 backend over the expanded table.
pub struct NttRadix4 {}

/// Radix-4 backend with pairs of levels fused into 16-point blocks.
pub struct NttRadix4x4 {}
