//! Jacobian point representation and the group law.
//!
//! Grounded on the `snarkVM` short-Weierstrass-Jacobian template
//! (`add_assign`/`add_assign_mixed`/`double_in_place`), specialized to
//! `a = 0` (both BN254 and BLS12-381) and stripped of its GLV-endomorphism
//! scalar multiplication path — spec.md's `scalarMul` asks for plain
//! left-to-right double-and-add, not an optimized decomposition, and GLV
//! needs curve-specific endomorphism constants this spec never names.

use zkaccel_field::{BigInt, Fp};

use crate::affine::Affine;
use crate::config::CurveConfig;

/// `(X, Y, Z)`; affine equivalent `(X/Z^2, Y/Z^3)`; identity is `(1, 1, 0)`.
///
/// All curve group-law operations (spec.md §4.2) are implemented here and
/// only here — affine and projective points convert to Jacobian to compute
/// and convert back, never duplicating the addition/doubling formulas.
#[derive(Copy, Clone)]
pub struct Jacobian<const N: usize> {
    pub x: Fp<N>,
    pub y: Fp<N>,
    pub z: Fp<N>,
    pub(crate) config: &'static CurveConfig<N>,
}

impl<const N: usize> Jacobian<N> {
    pub fn identity(config: &'static CurveConfig<N>) -> Self {
        let one = Fp::one(config.base_field);
        Self { x: one, y: one, z: Fp::zero(config.base_field), config }
    }

    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    pub fn generator(config: &'static CurveConfig<N>) -> Self {
        Self::from_affine(&Affine::generator(config))
    }

    pub fn config(&self) -> &'static CurveConfig<N> {
        self.config
    }

    pub fn from_affine(p: &Affine<N>) -> Self {
        if p.infinity {
            return Self::identity(p.config);
        }
        Self { x: p.x, y: p.y, z: Fp::one(p.config.base_field), config: p.config }
    }

    /// Converts back to affine, paying the single inversion spec.md asks
    /// callers to defer until this point.
    pub fn to_affine(&self) -> Affine<N> {
        if self.is_identity() {
            return Affine::identity(self.config);
        }
        let z_inv = self.z.inverse().expect("non-identity point has nonzero z");
        let z_inv2 = z_inv.square();
        let z_inv3 = z_inv2.mul(&z_inv).expect("same field by construction");
        let x = self.x.mul(&z_inv2).expect("same field by construction");
        let y = self.y.mul(&z_inv3).expect("same field by construction");
        Affine::new(x, y, self.config)
    }

    /// Montgomery's-trick batch version of [`Jacobian::to_affine`]: one
    /// shared inversion instead of `n` independent ones.
    pub fn batch_to_affine(points: &[Self]) -> Vec<Affine<N>> {
        if points.is_empty() {
            return Vec::new();
        }
        let config = points[0].config;
        let mut z_values: Vec<Fp<N>> = points
            .iter()
            .map(|p| if p.is_identity() { Fp::one(config.base_field) } else { p.z })
            .collect();
        zkaccel_field::batch::batch_inversion(&mut z_values).expect("z values known nonzero by construction above");

        points
            .iter()
            .zip(z_values.iter())
            .map(|(p, z_inv)| {
                if p.is_identity() {
                    return Affine::identity(config);
                }
                let z_inv2 = z_inv.square();
                let z_inv3 = z_inv2.mul(z_inv).expect("same field by construction");
                let x = p.x.mul(&z_inv2).expect("same field by construction");
                let y = p.y.mul(&z_inv3).expect("same field by construction");
                Affine::new(x, y, config)
            })
            .collect()
    }

    pub fn neg(&self) -> Self {
        Self { y: self.y.neg(), ..*self }
    }

    /// `pointDouble`: `A=X^2, B=Y^2, C=B^2, D=2*((X+B)^2-A-C), E=3*A, F=E^2;
    /// X3=F-2*D, Y3=E*(D-X3)-8*C, Z3=2*Y*Z`.
    pub fn double(&self) -> Self {
        if self.is_identity() {
            return *self;
        }
        let a = self.x.square();
        let b = self.y.square();
        let c = b.square();
        let x_plus_b = self.x.add(&b).expect("same field by construction");
        let d = x_plus_b.square().sub(&a).expect("same field").sub(&c).expect("same field");
        let d = d.add(&d).expect("same field");
        let e = a.add(&a).expect("same field").add(&a).expect("same field");
        let f = e.square();
        let two_d = d.add(&d).expect("same field");
        let x3 = f.sub(&two_d).expect("same field");
        let eight_c = c.add(&c).expect("same field").add(&c).expect("same field").add(&c).expect("same field");
        let eight_c = eight_c.add(&eight_c).expect("same field");
        let d_minus_x3 = d.sub(&x3).expect("same field");
        let y3 = e.mul(&d_minus_x3).expect("same field").sub(&eight_c).expect("same field");
        let z3 = self.y.mul(&self.z).expect("same field");
        let z3 = z3.add(&z3).expect("same field");
        Self { x: x3, y: y3, z: z3, config: self.config }
    }

    /// `pointAdd`, evaluated in the order spec.md §4.2 lists: identities
    /// first, then the `U1==U2` degenerate cases, then the general formula.
    pub fn add(&self, other: &Self) -> Self {
        if self.is_identity() {
            return *other;
        }
        if other.is_identity() {
            return *self;
        }

        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let u1 = self.x.mul(&z2z2).expect("same field");
        let u2 = other.x.mul(&z1z1).expect("same field");
        let z2_cubed = other.z.mul(&z2z2).expect("same field");
        let s1 = self.y.mul(&z2_cubed).expect("same field");
        let z1_cubed = self.z.mul(&z1z1).expect("same field");
        let s2 = other.y.mul(&z1_cubed).expect("same field");

        if u1.eq(&u2) {
            if s1.eq(&s2) {
                return self.double();
            }
            return Self::identity(self.config);
        }

        let h = u2.sub(&u1).expect("same field");
        let h_doubled = h.add(&h).expect("same field");
        let i = h_doubled.square();
        let j = h.mul(&i).expect("same field");
        let s2_minus_s1 = s2.sub(&s1).expect("same field");
        let r = s2_minus_s1.add(&s2_minus_s1).expect("same field");
        let v = u1.mul(&i).expect("same field");

        let v_doubled = v.add(&v).expect("same field");
        let x3 = r.square().sub(&j).expect("same field").sub(&v_doubled).expect("same field");
        let s1_j2 = s1.mul(&j).expect("same field");
        let s1_j2 = s1_j2.add(&s1_j2).expect("same field");
        let y3 = r.mul(&v.sub(&x3).expect("same field")).expect("same field").sub(&s1_j2).expect("same field");
        let z1_plus_z2 = self.z.add(&other.z).expect("same field");
        let z3 = z1_plus_z2.square().sub(&z1z1).expect("same field").sub(&z2z2).expect("same field");
        let z3 = z3.mul(&h).expect("same field");

        Self { x: x3, y: y3, z: z3, config: self.config }
    }

    /// Mixed addition (`other` affine, i.e. `Z2 = 1`) — the variant
    /// Pippenger's bucket accumulation uses, saving the squarings of `Z2`.
    pub fn add_mixed(&self, other: &Affine<N>) -> Self {
        if other.infinity {
            return *self;
        }
        if self.is_identity() {
            return Self::from_affine(other);
        }

        let z1z1 = self.z.square();
        let u2 = other.x.mul(&z1z1).expect("same field");
        let z1_cubed = self.z.mul(&z1z1).expect("same field");
        let s2 = other.y.mul(&z1_cubed).expect("same field");

        if self.x.eq(&u2) {
            if self.y.eq(&s2) {
                return self.double();
            }
            return Self::identity(self.config);
        }

        let h = u2.sub(&self.x).expect("same field");
        let hh = h.square();
        let i = hh.add(&hh).expect("same field").add(&hh).expect("same field").add(&hh).expect("same field");
        let j = h.mul(&i).expect("same field");
        let s2_minus_y1 = s2.sub(&self.y).expect("same field");
        let r = s2_minus_y1.add(&s2_minus_y1).expect("same field");
        let v = self.x.mul(&i).expect("same field");

        let v_doubled = v.add(&v).expect("same field");
        let x3 = r.square().sub(&j).expect("same field").sub(&v_doubled).expect("same field");
        let y1_j2 = self.y.mul(&j).expect("same field");
        let y1_j2 = y1_j2.add(&y1_j2).expect("same field");
        let y3 = r.mul(&v.sub(&x3).expect("same field")).expect("same field").sub(&y1_j2).expect("same field");
        let z1_plus_h = self.z.add(&h).expect("same field");
        let z3 = z1_plus_h.square().sub(&z1z1).expect("same field").sub(&hh).expect("same field");

        Self { x: x3, y: y3, z: z3, config: self.config }
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Left-to-right double-and-add over the big-endian bits of `k`.
    pub fn scalar_mul(&self, k: &BigInt<N>) -> Self {
        if k.is_zero() {
            return Self::identity(self.config);
        }
        let bits = k.bit_length();
        let mut acc = Self::identity(self.config);
        for i in (0..bits).rev() {
            acc = acc.double();
            if k.bit(i as usize) {
                acc = acc.add(self);
            }
        }
        acc
    }

    /// Windowed scalar multiplication: precomputes `[0*P .. (2^w-1)*P]`,
    /// then processes `w` bits per iteration (`w` doublings, one windowed
    /// add). Required by spec.md to return the *same* point as
    /// [`Jacobian::scalar_mul`] for identical `(k, P)`.
    pub fn scalar_mul_windowed(&self, k: &BigInt<N>, window_bits: u32) -> Self {
        if k.is_zero() || window_bits == 0 {
            return self.scalar_mul(k);
        }
        let table_len = 1usize << window_bits;
        let mut table = Vec::with_capacity(table_len);
        table.push(Self::identity(self.config));
        for i in 1..table_len {
            table.push(table[i - 1].add(self));
        }

        let bits = k.bit_length().max(1);
        let num_windows = (bits + window_bits - 1) / window_bits;
        let mut acc = Self::identity(self.config);
        for w in (0..num_windows).rev() {
            for _ in 0..window_bits {
                acc = acc.double();
            }
            let mut digit = 0usize;
            for b in (0..window_bits).rev() {
                let bit_index = w * window_bits + b;
                digit <<= 1;
                if (bit_index as usize) < (N * 64) && k.bit(bit_index as usize) {
                    digit |= 1;
                }
            }
            if digit != 0 {
                acc = acc.add(&table[digit]);
            }
        }
        acc
    }

    pub fn eq(&self, other: &Self) -> bool {
        self.to_affine().eq(&other.to_affine())
    }
}
