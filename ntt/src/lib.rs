//! Radix-2 Cooley-Tukey number-theoretic transform over BN254's and
//! BLS12-381's scalar fields.
//!
//! [`config`] is the twiddle-factor cache keyed by transform size (spec.md
//! §3, §4.3, §4.5); [`transform`] is the in-place forward/inverse butterfly
//! and the batch entry points that share one [`config::NttConfig`] across
//! several polynomials of equal length (spec.md §4.3's `batchForwardNtt`/
//! `batchInverseNtt`).

pub mod config;
pub mod transform;

pub use config::NttConfig;
pub use transform::{forward_ntt, forward_ntt_radix4, inverse_ntt, inverse_ntt_radix4};

use zkaccel_field::Fp;
use zkaccel_serialize::Result;

/// Runs [`transform::forward_ntt`] over every polynomial in `polys`, reusing
/// one `cfg` rather than re-deriving twiddle tables per call.
pub fn batch_forward_ntt<const N: usize>(polys: &mut [Vec<Fp<N>>], cfg: &NttConfig<N>) -> Result<()> {
    for poly in polys.iter_mut() {
        transform::forward_ntt(poly, cfg)?;
    }
    Ok(())
}

/// Inverse counterpart of [`batch_forward_ntt`].
pub fn batch_inverse_ntt<const N: usize>(polys: &mut [Vec<Fp<N>>], cfg: &NttConfig<N>) -> Result<()> {
    for poly in polys.iter_mut() {
        transform::inverse_ntt(poly, cfg)?;
    }
    Ok(())
}
