//! Curve parameter tables.
//!
//! Grounded on the `Parameters`/`ModelParameters` trait pair the `snarkVM`
//! short-Weierstrass-Jacobian template is generic over, but — matching this
//! workspace's runtime-config pattern in [`zkaccel_field::config`] — collapsed
//! into one concrete, `Lazy`-cached struct per curve instead of a generic
//! trait implemented per curve type, since there is no build step here to
//! monomorphize trait impls over.

use once_cell::sync::Lazy;
use zkaccel_field::config::FieldConfig;
use zkaccel_field::{BigInt, Fp};
use zkaccel_field::{BLS12_381_FQ, BLS12_381_FR, BN254_FQ, BN254_FR};

/// `y^2 = x^3 + a*x + b` over the curve's base field, plus its generator and
/// cofactor. Both curves named in spec.md use `a = 0`, so [`CurveConfig`]
/// does not even carry an `a` field — [`crate::jacobian`]'s doubling formula
/// is specialized to that case directly, matching the teacher's
/// `WEIERSTRASS_A.is_zero()` fast path rather than implementing the general
/// `a != 0` branch spec.md has no curve that would exercise.
pub struct CurveConfig<const N: usize> {
    pub base_field: &'static FieldConfig<N>,
    pub scalar_field: &'static FieldConfig<N>,
    pub b: Fp<N>,
    pub generator_x: Fp<N>,
    pub generator_y: Fp<N>,
    /// Both BN254's and BLS12-381's G1 have cofactor 1, so subgroup
    /// membership is implied by simply being on the curve (spec.md §4.2's
    /// `isInCorrectSubgroup` degenerates to `isOnCurve` for both curves named
    /// here).
    pub cofactor_is_one: bool,
}

impl<const N: usize> CurveConfig<N> {
    fn new(
        base_field: &'static FieldConfig<N>,
        scalar_field: &'static FieldConfig<N>,
        b_dec: &str,
        gx_dec: &str,
        gy_dec: &str,
    ) -> Self {
        Self {
            base_field,
            scalar_field,
            b: decimal_fp(b_dec, base_field),
            generator_x: decimal_fp(gx_dec, base_field),
            generator_y: decimal_fp(gy_dec, base_field),
            cofactor_is_one: true,
        }
    }
}

fn decimal_fp<const N: usize>(dec: &str, config: &'static FieldConfig<N>) -> Fp<N> {
    let biguint: num_bigint::BigUint = dec.parse().expect("valid decimal field element");
    let bytes = biguint.to_bytes_le();
    Fp::from_bigint(BigInt::<N>::from_bytes_le(&bytes), config)
}

/// BN254 G1: `y^2 = x^3 + 3`, generator `(1, 2)`.
pub static BN254_G1: Lazy<CurveConfig<4>> =
    Lazy::new(|| CurveConfig::new(&BN254_FQ, &BN254_FR, "3", "1", "2"));

/// BLS12-381 G1: `y^2 = x^3 + 4`.
pub static BLS12_381_G1: Lazy<CurveConfig<6>> = Lazy::new(|| {
    CurveConfig::new(
        &BLS12_381_FQ,
        &BLS12_381_FR,
        "4",
        "3685416753713387016781088315183077757961620795782546409894578378688607592378376318836054947676345821548104185464507",
        "1339506544944476473020471379941921221584933875938349620426543736416511423956333506472724655353366534992391756441569",
    )
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bn254_generator_satisfies_curve_equation() {
        let cfg = &*BN254_G1;
        let lhs = cfg.generator_y.square();
        let rhs = cfg.generator_x.square().mul(&cfg.generator_x).unwrap().add(&cfg.b).unwrap();
        assert!(lhs.eq(&rhs));
    }

    #[test]
    fn bls12_381_generator_satisfies_curve_equation() {
        let cfg = &*BLS12_381_G1;
        let lhs = cfg.generator_y.square();
        let rhs = cfg.generator_x.square().mul(&cfg.generator_x).unwrap().add(&cfg.b).unwrap();
        assert!(lhs.eq(&rhs));
    }
}
