//! Projective point representation: `(X, Y, Z)`, affine equivalent
//! `(X/Z, Y/Z)`, identity `(0, 1, 0)`.
//!
//! Spec.md's data model names this as one of the three representations
//! callers may hold a point in, but all group-law arithmetic happens in
//! [`crate::jacobian::Jacobian`] (spec.md §4.2: "Internal addition/doubling
//! and scalar multiplication operate in Jacobian coordinates"). This type's
//! job is just the conversions in and out of that representation.

use zkaccel_field::Fp;

use crate::affine::Affine;
use crate::config::CurveConfig;
use crate::jacobian::Jacobian;

#[derive(Copy, Clone)]
pub struct Projective<const N: usize> {
    pub x: Fp<N>,
    pub y: Fp<N>,
    pub z: Fp<N>,
    pub(crate) config: &'static CurveConfig<N>,
}

impl<const N: usize> Projective<N> {
    pub fn identity(config: &'static CurveConfig<N>) -> Self {
        Self { x: Fp::zero(config.base_field), y: Fp::one(config.base_field), z: Fp::zero(config.base_field), config }
    }

    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    pub fn from_affine(p: &Affine<N>) -> Self {
        if p.infinity {
            return Self::identity(p.config);
        }
        Self { x: p.x, y: p.y, z: Fp::one(p.config.base_field), config: p.config }
    }

    pub fn to_affine(&self) -> Affine<N> {
        if self.is_identity() {
            return Affine::identity(self.config);
        }
        let z_inv = self.z.inverse().expect("non-identity point has nonzero z");
        let x = self.x.mul(&z_inv).expect("same field by construction");
        let y = self.y.mul(&z_inv).expect("same field by construction");
        Affine::new(x, y, self.config)
    }

    pub fn from_jacobian(p: &Jacobian<N>) -> Self {
        Self::from_affine(&p.to_affine())
    }

    pub fn to_jacobian(&self) -> Jacobian<N> {
        Jacobian::from_affine(&self.to_affine())
    }

    pub fn eq(&self, other: &Self) -> bool {
        self.to_affine().eq(&other.to_affine())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BN254_G1;

    #[test]
    fn affine_projective_jacobian_roundtrip_agree() {
        let g = Affine::generator(&BN254_G1);
        let via_projective = Projective::from_affine(&g).to_affine();
        let via_jacobian = Jacobian::from_affine(&g).to_affine();
        assert!(via_projective.eq(&g));
        assert!(via_jacobian.eq(&g));
    }

    #[test]
    fn identity_roundtrips() {
        let id = Affine::<4>::identity(&BN254_G1);
        assert!(Projective::from_affine(&id).to_affine().eq(&id));
    }
}
