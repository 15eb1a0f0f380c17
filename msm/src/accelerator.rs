//! The pluggable GPU backend spec.md §4.4 calls an "abstract compute
//! backend". This crate ships no real GPU kernel (out of scope per spec.md
//! §1's "native-addon loader and platform-detection shim" exclusion); the
//! trait is the seam a caller's own GPU integration plugs into, and a
//! backend's absence degrades silently to CPU (spec.md §4.4, §7).

use zkaccel_curve::Affine;
use zkaccel_field::BigInt;

/// A compute backend capable of running an MSM, queried for availability
/// before every dispatch (spec.md §4.4: "missing backends degrade to CPU
/// silently").
pub trait Accelerator<const N: usize>: Send + Sync {
    /// Whether this backend is currently usable (hardware present, driver
    /// loaded, etc). Checked fresh on every dispatch rather than cached,
    /// since availability can change between calls in a real GPU backend.
    fn is_available(&self) -> bool;

    /// Runs the MSM on this backend. Only called when [`Accelerator::is_available`]
    /// returned `true`.
    fn msm(&self, scalars: &[BigInt<N>], points: &[Affine<N>]) -> Affine<N>;
}

/// An [`Accelerator`] that reports unavailable unconditionally — the
/// default when no real backend is wired in, making `gpu`/`hybrid` hints
/// transparently fall back to CPU-only dispatch.
pub struct NoAccelerator;

impl<const N: usize> Accelerator<N> for NoAccelerator {
    fn is_available(&self) -> bool {
        false
    }

    fn msm(&self, _scalars: &[BigInt<N>], _points: &[Affine<N>]) -> Affine<N> {
        unreachable!("NoAccelerator::is_available always returns false; dispatch must not call msm")
    }
}
