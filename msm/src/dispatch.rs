//! MSM entry point: input validation, then dispatch across CPU/GPU/hybrid
//! backends per spec.md §4.4, §6's `accelerationHint`.

use zkaccel_curve::config::CurveConfig;
use zkaccel_curve::Affine;
use zkaccel_field::BigInt;
use zkaccel_serialize::{Error, Result};

use crate::accelerator::{Accelerator, NoAccelerator};
use crate::naive::naive_msm;
use crate::pippenger::pippenger_msm;

/// Below this input size, [`AccelerationHint::Auto`] uses the naive path
/// instead of Pippenger (spec.md §4.4: "below a tunable threshold, default
/// 32").
pub const NAIVE_THRESHOLD: usize = 32;

/// `accelerationHint` (spec.md §6).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AccelerationHint {
    Auto,
    Cpu,
    Gpu,
    Hybrid,
}

impl Default for AccelerationHint {
    fn default() -> Self {
        Self::Auto
    }
}

/// Options recognised by the MSM entry point (spec.md §6).
#[derive(Copy, Clone, Debug)]
pub struct MsmOptions {
    pub acceleration_hint: AccelerationHint,
    /// Overrides Pippenger's auto-tuned window size when `Some`.
    pub window_size: Option<u32>,
    /// `auto` prefers a hybrid CPU/GPU split over plain Pippenger once `n`
    /// reaches this size and a GPU backend is available (default 4096).
    pub gpu_threshold: usize,
    /// When `true` (default): check scalar/point count, check every point
    /// is on-curve, and reduce every scalar mod the subgroup order before
    /// use (spec.md §4.4).
    pub validate_inputs: bool,
}

impl Default for MsmOptions {
    fn default() -> Self {
        Self {
            acceleration_hint: AccelerationHint::default(),
            window_size: None,
            gpu_threshold: 4096,
            validate_inputs: true,
        }
    }
}

fn reduce_scalar<const N: usize>(s: &BigInt<N>, modulus: &BigInt<N>) -> BigInt<N> {
    s.rem_mod(modulus)
}

fn validate<const N: usize>(
    scalars: &[BigInt<N>],
    points: &[Affine<N>],
    config: &'static CurveConfig<N>,
) -> Result<Vec<BigInt<N>>> {
    if scalars.len() != points.len() {
        return Err(Error::invalid_input_size(format!(
            "scalar count ({}) does not match point count ({})",
            scalars.len(),
            points.len()
        )));
    }
    for (i, p) in points.iter().enumerate() {
        if !p.is_on_curve() {
            return Err(Error::invalid_curve_point(format!("point at index {i} is not on the curve")));
        }
    }
    Ok(scalars.iter().map(|s| reduce_scalar(s, &config.scalar_field.modulus)).collect())
}

fn cpu_dispatch<const N: usize>(
    scalars: &[BigInt<N>],
    points: &[Affine<N>],
    config: &'static CurveConfig<N>,
    window_size: Option<u32>,
) -> Affine<N> {
    if points.len() < NAIVE_THRESHOLD {
        naive_msm(scalars, points, config)
    } else {
        pippenger_msm(scalars, points, config, window_size)
    }
}

/// Runs an MSM with default options (`auto` acceleration, input validation
/// on). See [`msm_with_options`] for the full contract.
pub fn msm<const N: usize>(
    scalars: &[BigInt<N>],
    points: &[Affine<N>],
    config: &'static CurveConfig<N>,
) -> Result<Affine<N>> {
    msm_with_options(scalars, points, config, &MsmOptions::default(), &NoAccelerator)
}

/// Multi-scalar multiplication with explicit options and an injectable GPU
/// [`Accelerator`] (spec.md §4.4). Every hint produces the same point for
/// the same input (spec.md §8, law 16): only the path taken to get there
/// differs.
pub fn msm_with_options<const N: usize, A: Accelerator<N> + ?Sized>(
    scalars: &[BigInt<N>],
    points: &[Affine<N>],
    config: &'static CurveConfig<N>,
    options: &MsmOptions,
    accelerator: &A,
) -> Result<Affine<N>> {
    let reduced = if options.validate_inputs {
        validate(scalars, points, config)?
    } else {
        if scalars.len() != points.len() {
            return Err(Error::invalid_input_size(format!(
                "scalar count ({}) does not match point count ({})",
                scalars.len(),
                points.len()
            )));
        }
        scalars.to_vec()
    };

    if points.is_empty() {
        return Ok(Affine::identity(config));
    }

    let gpu_available = accelerator.is_available();
    let result = match options.acceleration_hint {
        AccelerationHint::Cpu => naive_msm(&reduced, points, config),
        AccelerationHint::Gpu => {
            if gpu_available {
                tracing::debug!(n = points.len(), "msm: dispatching to gpu accelerator");
                accelerator.msm(&reduced, points)
            } else {
                tracing::debug!(n = points.len(), "msm: gpu hint requested but no backend available, falling back to cpu");
                cpu_dispatch(&reduced, points, config, options.window_size)
            }
        }
        AccelerationHint::Hybrid => hybrid_dispatch(&reduced, points, config, options, accelerator, gpu_available),
        AccelerationHint::Auto => {
            if gpu_available && points.len() >= options.gpu_threshold {
                tracing::debug!(n = points.len(), "msm: auto selecting hybrid dispatch");
                hybrid_dispatch(&reduced, points, config, options, accelerator, gpu_available)
            } else {
                tracing::debug!(n = points.len(), "msm: auto selecting cpu dispatch");
                cpu_dispatch(&reduced, points, config, options.window_size)
            }
        }
    };
    Ok(result)
}

/// Splits the input between CPU (first half) and GPU (second half), runs
/// both partial MSMs, and adds the affine results (spec.md §4.4, §5: "spawn
/// two, wait for both"). Falls back to two CPU halves when no accelerator is
/// available, which is a full-fidelity substitute per spec.md §9.
fn hybrid_dispatch<const N: usize, A: Accelerator<N> + ?Sized>(
    scalars: &[BigInt<N>],
    points: &[Affine<N>],
    config: &'static CurveConfig<N>,
    options: &MsmOptions,
    accelerator: &A,
    gpu_available: bool,
) -> Affine<N> {
    let mid = points.len() / 2;
    let (scalars_lo, scalars_hi) = scalars.split_at(mid);
    let (points_lo, points_hi) = points.split_at(mid);

    let run_hi = |hi_scalars: &[BigInt<N>], hi_points: &[Affine<N>]| -> Affine<N> {
        if gpu_available {
            accelerator.msm(hi_scalars, hi_points)
        } else {
            cpu_dispatch(hi_scalars, hi_points, config, options.window_size)
        }
    };

    let (lo_result, hi_result) = std::thread::scope(|scope| {
        let handle = scope.spawn(|| cpu_dispatch(scalars_lo, points_lo, config, options.window_size));
        let hi_result = run_hi(scalars_hi, points_hi);
        let lo_result = handle.join().expect("cpu half of hybrid msm did not panic");
        (lo_result, hi_result)
    });

    lo_result.to_jacobian().add(&hi_result.to_jacobian()).to_affine()
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkaccel_curve::config::BN254_G1;

    fn scalar(x: u64) -> BigInt<4> {
        BigInt::<4>([x, 0, 0, 0])
    }

    fn points_and_scalars(n: u64) -> (Vec<BigInt<4>>, Vec<Affine<4>>) {
        let g = Affine::generator(&BN254_G1);
        let scalars: Vec<BigInt<4>> = (1..=n).map(scalar).collect();
        let points: Vec<Affine<4>> = scalars.iter().map(|s| g.to_jacobian().scalar_mul(s).to_affine()).collect();
        (scalars, points)
    }

    #[test]
    fn empty_input_is_identity() {
        let result = msm::<4>(&[], &[], &BN254_G1).unwrap();
        assert!(result.eq(&Affine::identity(&BN254_G1)));
    }

    #[test]
    fn mismatched_lengths_fail_with_invalid_input_size() {
        let (scalars, points) = points_and_scalars(4);
        let err = msm(&scalars[..2], &points, &BN254_G1).unwrap_err();
        assert!(matches!(err, Error::InvalidInputSize { .. }));
    }

    #[test]
    fn all_hints_agree_with_naive_reference() {
        let (scalars, points) = points_and_scalars(50);
        let naive = naive_msm(&scalars, &points, &BN254_G1);

        for hint in [AccelerationHint::Auto, AccelerationHint::Cpu, AccelerationHint::Gpu, AccelerationHint::Hybrid] {
            let options = MsmOptions { acceleration_hint: hint, ..MsmOptions::default() };
            let result = msm_with_options(&scalars, &points, &BN254_G1, &options, &NoAccelerator).unwrap();
            assert!(naive.eq(&result), "hint {hint:?} disagreed with naive reference");
        }
    }

    #[test]
    fn scalars_are_reduced_modulo_subgroup_order() {
        let g = Affine::generator(&BN254_G1);
        let mut huge = BN254_G1.scalar_field.modulus;
        huge.add_with_carry(&scalar(2));
        let reduced_result = msm(&[scalar(2)], &[g], &BN254_G1).unwrap();
        let huge_result = msm(&[huge], &[g], &BN254_G1).unwrap();
        assert!(reduced_result.eq(&huge_result));
    }

    #[test]
    fn unavailable_gpu_hint_degrades_to_cpu() {
        let (scalars, points) = points_and_scalars(10);
        let options = MsmOptions { acceleration_hint: AccelerationHint::Gpu, ..MsmOptions::default() };
        let result = msm_with_options(&scalars, &points, &BN254_G1, &options, &NoAccelerator).unwrap();
        let naive = naive_msm(&scalars, &points, &BN254_G1);
        assert!(naive.eq(&result));
    }
}
