//! Short-Weierstrass curve arithmetic for BN254 and BLS12-381 (G1 only —
//! no pairing, per spec.md's explicit non-goal).
//!
//! [`affine`], [`projective`], and [`jacobian`] mirror the three point
//! representations the data model names; [`config`] holds the per-curve
//! constant tables; [`codec`] implements the SEC1 and Arkworks-compatible
//! byte layouts.

pub mod affine;
pub mod codec;
pub mod config;
pub mod jacobian;
pub mod projective;

pub use affine::Affine;
pub use config::{CurveConfig, BLS12_381_G1, BN254_G1};
pub use jacobian::Jacobian;
pub use projective::Projective;

/// BN254 G1 point, affine form.
pub type Bn254G1Affine = Affine<4>;
/// BLS12-381 G1 point, affine form.
pub type Bls12_381G1Affine = Affine<6>;

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use crate::config::BN254_G1;
    use crate::jacobian::Jacobian;
    use zkaccel_field::BigInt;

    fn arb_scalar() -> impl Strategy<Value = BigInt<4>> {
        any::<[u64; 4]>().prop_map(|mut limbs| {
            // Keep well under the field modulus so bit_length-based loops
            // in scalar_mul/scalar_mul_windowed stay comparably sized
            // without needing a full reduction here.
            limbs[3] &= 0x00FF_FFFF_FFFF_FFFF;
            BigInt::<4>(limbs)
        })
    }

    proptest! {
        #[test]
        fn addition_is_commutative(a in arb_scalar(), b in arb_scalar()) {
            let g = Jacobian::generator(&BN254_G1);
            let p = g.scalar_mul(&a);
            let q = g.scalar_mul(&b);
            prop_assert!(p.add(&q).eq(&q.add(&p)));
        }

        #[test]
        fn addition_is_associative(a in arb_scalar(), b in arb_scalar(), c in arb_scalar()) {
            let g = Jacobian::generator(&BN254_G1);
            let p = g.scalar_mul(&a);
            let q = g.scalar_mul(&b);
            let r = g.scalar_mul(&c);
            let lhs = p.add(&q).add(&r);
            let rhs = p.add(&q.add(&r));
            prop_assert!(lhs.eq(&rhs));
        }

        #[test]
        fn scalar_mul_distributes_over_scalar_addition(a in arb_scalar(), b in arb_scalar()) {
            let g = Jacobian::generator(&BN254_G1);
            let mut sum = a;
            sum.add_with_carry(&b);
            let lhs = g.scalar_mul(&sum);
            let rhs = g.scalar_mul(&a).add(&g.scalar_mul(&b));
            prop_assert!(lhs.eq(&rhs));
        }

        #[test]
        fn windowed_scalar_mul_matches_plain_for_random_scalars(a in arb_scalar()) {
            let g = Jacobian::generator(&BN254_G1);
            prop_assert!(g.scalar_mul(&a).eq(&g.scalar_mul_windowed(&a, 5)));
        }
    }
}
