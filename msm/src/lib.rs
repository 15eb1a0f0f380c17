//! Multi-scalar multiplication over BN254 and BLS12-381 G1: the naive
//! reference, Pippenger's windowed bucket method, and an
//! `accelerationHint`-driven dispatcher with a pluggable GPU backend seam
//! (spec.md §4.4).

pub mod accelerator;
pub mod dispatch;
pub mod naive;
pub mod pippenger;

pub use accelerator::{Accelerator, NoAccelerator};
pub use dispatch::{msm, msm_with_options, AccelerationHint, MsmOptions};
pub use naive::naive_msm;
pub use pippenger::pippenger_msm;

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use crate::naive::naive_msm;
    use crate::pippenger::pippenger_msm;
    use zkaccel_curve::config::BN254_G1;
    use zkaccel_curve::Affine;
    use zkaccel_field::BigInt;

    fn arb_scalar() -> impl Strategy<Value = BigInt<4>> {
        any::<[u64; 4]>().prop_map(|mut limbs| {
            limbs[3] &= 0x00FF_FFFF_FFFF_FFFF;
            BigInt::<4>(limbs)
        })
    }

    proptest! {
        #[test]
        fn pippenger_matches_naive_on_random_scalars(scalars in prop::collection::vec(arb_scalar(), 1..20)) {
            let g = Affine::generator(&BN254_G1);
            let points: Vec<Affine<4>> = scalars.iter().map(|s| g.to_jacobian().scalar_mul(s).to_affine()).collect();
            let naive = naive_msm(&scalars, &points, &BN254_G1);
            let pippenger = pippenger_msm(&scalars, &points, &BN254_G1, None);
            prop_assert!(naive.eq(&pippenger));
        }
    }
}
