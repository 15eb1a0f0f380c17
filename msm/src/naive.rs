//! The straight-line MSM reference: sum of scalar multiplications.
//!
//! Grounded on spec.md §4.4's naive path — used below Pippenger's crossover
//! and as the correctness oracle every other dispatch path (Pippenger,
//! hybrid) is tested against (spec.md §8, law 16).

use zkaccel_curve::config::CurveConfig;
use zkaccel_curve::{Affine, Jacobian};
use zkaccel_field::BigInt;

/// `sum(scalars[i] * points[i])`, accumulated in Jacobian and converted to
/// affine once at the end. `config` is needed to build the identity
/// accumulator so this also handles the empty-input case (spec.md §4.4,
/// law 17: empty input yields the identity).
pub fn naive_msm<const N: usize>(
    scalars: &[BigInt<N>],
    points: &[Affine<N>],
    config: &'static CurveConfig<N>,
) -> Affine<N> {
    let mut acc = Jacobian::identity(config);
    for (s, p) in scalars.iter().zip(points.iter()) {
        acc = acc.add(&p.to_jacobian().scalar_mul(s));
    }
    acc.to_affine()
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkaccel_curve::config::BN254_G1;

    #[test]
    fn two_copies_of_generator_doubled() {
        let g = Affine::generator(&BN254_G1);
        let scalars = [BigInt::<4>([1, 0, 0, 0]), BigInt::<4>([1, 0, 0, 0])];
        let points = [g, g];
        let result = naive_msm(&scalars, &points, &BN254_G1);
        let expected = g.to_jacobian().scalar_mul(&BigInt::<4>([2, 0, 0, 0])).to_affine();
        assert!(result.eq(&expected));
    }

    #[test]
    fn empty_input_is_identity() {
        let result = naive_msm::<4>(&[], &[], &BN254_G1);
        assert!(result.eq(&Affine::identity(&BN254_G1)));
    }
}
