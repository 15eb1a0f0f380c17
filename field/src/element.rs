//! `Fp<N>`: a prime-field element held in Montgomery form.
//!
//! Grounded on `ark-ff`'s `Fp<P, N>`, but monomorphized over the config
//! value rather than a `MontConfig` type parameter: each element carries a
//! `&'static FieldConfig<N>` (one of the four process-wide singletons in
//! [`crate::config`]) so that two elements from different fields can be
//! told apart and rejected at the API boundary (spec.md §4.1's "operations
//! between elements of different fields ... return `InvalidFieldElement`"),
//! rather than being a structurally impossible case as in the teacher, where
//! the field is a compile-time type.

use core::fmt;

use zkaccel_serialize::{ByteOrder, Error, Result};

use crate::biginteger::BigInt;
use crate::config::FieldConfig;
use crate::montgomery::{mont_mul, mont_square};

/// An element of one of the four prime fields this crate knows about,
/// stored in Montgomery form (`value = x * R mod p`).
#[derive(Copy, Clone)]
pub struct Fp<const N: usize> {
    pub(crate) value: BigInt<N>,
    pub(crate) config: &'static FieldConfig<N>,
}

impl<const N: usize> Fp<N> {
    fn same_field(&self, other: &Self) -> Result<()> {
        if core::ptr::eq(self.config, other.config) {
            Ok(())
        } else {
            Err(Error::invalid_field_element("operands belong to different fields"))
        }
    }

    /// Lifts a standard-form integer (`0 <= x < p` assumed already reduced by
    /// the caller) into this field.
    pub fn from_bigint(x: BigInt<N>, config: &'static FieldConfig<N>) -> Self {
        let value = mont_mul(&x, &config.r2, &config.modulus, config.inv);
        Self { value, config }
    }

    /// Wraps a value already known to be in Montgomery form — used by
    /// downstream crates building an `Fp` directly out of a `FieldConfig`'s
    /// precomputed constants (e.g. `two_adic_root_of_unity`), which are
    /// stored in Montgomery form to avoid converting them on every NTT
    /// configuration build.
    pub fn from_montgomery_repr(value: BigInt<N>, config: &'static FieldConfig<N>) -> Self {
        Self { value, config }
    }

    /// Recovers the standard-form representative `0 <= x < p`.
    pub fn to_bigint(&self) -> BigInt<N> {
        let one = BigInt::<N>::from_bytes_le(&[1]);
        mont_mul(&self.value, &one, &self.config.modulus, self.config.inv)
    }

    pub fn zero(config: &'static FieldConfig<N>) -> Self {
        Self { value: BigInt::zero(), config }
    }

    pub fn one(config: &'static FieldConfig<N>) -> Self {
        Self { value: config.r, config }
    }

    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    pub fn generator(config: &'static FieldConfig<N>) -> Self {
        Self { value: config.generator, config }
    }

    pub fn add(&self, other: &Self) -> Result<Self> {
        self.same_field(other)?;
        let mut sum = self.value;
        let carry = sum.add_with_carry(&other.value);
        if carry || sum >= self.config.modulus {
            sum.sub_with_borrow(&self.config.modulus);
        }
        Ok(Self { value: sum, config: self.config })
    }

    pub fn sub(&self, other: &Self) -> Result<Self> {
        self.same_field(other)?;
        let mut diff = self.value;
        let borrow = diff.sub_with_borrow(&other.value);
        if borrow {
            diff.add_with_carry(&self.config.modulus);
        }
        Ok(Self { value: diff, config: self.config })
    }

    pub fn neg(&self) -> Self {
        if self.is_zero() {
            return *self;
        }
        let mut value = self.config.modulus;
        value.sub_with_borrow(&self.value);
        Self { value, config: self.config }
    }

    pub fn mul(&self, other: &Self) -> Result<Self> {
        self.same_field(other)?;
        let value = mont_mul(&self.value, &other.value, &self.config.modulus, self.config.inv);
        Ok(Self { value, config: self.config })
    }

    pub fn square(&self) -> Self {
        let value = mont_square(&self.value, &self.config.modulus, self.config.inv);
        Self { value, config: self.config }
    }

    /// `self^exp` via square-and-multiply, `exp` given as a standard-form
    /// big integer (not Montgomery form).
    pub fn pow(&self, exp: &BigInt<N>) -> Self {
        let mut result = Self::one(self.config);
        let bits = exp.bit_length();
        for i in (0..bits).rev() {
            result = result.square();
            if exp.bit(i as usize) {
                result = result.mul(self).expect("same field by construction");
            }
        }
        result
    }

    /// Multiplicative inverse via Fermat's little theorem (`self^(p-2)`).
    ///
    /// Chosen over binary-GCD: both are correct for any odd prime modulus,
    /// but this one reuses the already-verified `pow`/`mont_mul` path
    /// instead of a second, independent carry-chain algorithm.
    pub fn inverse(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::division_by_zero("cannot invert zero"));
        }
        let mut p_minus_2 = self.config.modulus;
        let borrowed = p_minus_2.sub_with_borrow(&BigInt::from_bytes_le(&[2]));
        debug_assert!(!borrowed, "modulus is >= 3 for every field in this workspace");
        Ok(self.pow(&p_minus_2))
    }

    pub fn div(&self, other: &Self) -> Result<Self> {
        self.same_field(other)?;
        let inv = other.inverse()?;
        self.mul(&inv)
    }

    pub fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.config, other.config) && self.value == other.value
    }

    /// `1` if `self` is a nonzero square, `-1` if not, `0` if `self` is zero
    /// — computed as `self^((p-1)/2)`, valid for any odd-characteristic
    /// field, not only the `p ≡ 3 mod 4` ones this crate's curves use.
    pub fn legendre(&self) -> i8 {
        if self.is_zero() {
            return 0;
        }
        let mut exp = self.config.modulus;
        exp.sub_with_borrow(&BigInt::from_bytes_le(&[1]));
        exp.div2();
        let r = self.pow(&exp);
        if r.eq(&Self::one(self.config)) {
            1
        } else {
            -1
        }
    }

    /// Square root via the `p ≡ 3 (mod 4)` shortcut (`self^((p+1)/4)`).
    ///
    /// Both BN254's and BLS12-381's base fields satisfy this congruence, so
    /// this is the only square-root path the curve decompression codec
    /// needs; a general Tonelli-Shanks implementation isn't required by
    /// spec.md and isn't grounded in anything this crate's callers use.
    pub fn sqrt(&self) -> Option<Self> {
        if self.is_zero() {
            return Some(*self);
        }
        if self.legendre() != 1 {
            return None;
        }
        let mut exp = self.config.modulus;
        exp.add_with_carry(&BigInt::from_bytes_le(&[1]));
        exp.div2();
        exp.div2();
        let candidate = self.pow(&exp);
        if candidate.square().eq(self) {
            Some(candidate)
        } else {
            None
        }
    }

    /// Fixed-width encoding of length `config.byte_width()` (spec.md §4.1,
    /// §6: `ceil(log2(p)/8)` bytes), not `N * 8` — `N` is this field's limb
    /// count, which for BLS12-381's scalar field (6 limbs, 255-bit modulus)
    /// is wider than the modulus actually needs.
    pub fn to_bytes(&self, order: ByteOrder) -> Vec<u8> {
        let repr = self.to_bigint();
        let width = self.config.byte_width();
        match order {
            ByteOrder::LittleEndian => {
                let mut bytes = repr.to_bytes_le();
                bytes.truncate(width);
                bytes
            }
            ByteOrder::BigEndian => {
                let bytes = repr.to_bytes_be();
                bytes[bytes.len() - width..].to_vec()
            }
        }
    }

    pub fn from_bytes(bytes: &[u8], order: ByteOrder, config: &'static FieldConfig<N>) -> Result<Self> {
        let width = config.byte_width();
        if bytes.len() != width {
            return Err(Error::invalid_input_size(format!(
                "expected {width} bytes for this field's modulus, got {}",
                bytes.len()
            )));
        }
        let repr = match order {
            ByteOrder::LittleEndian => BigInt::<N>::from_bytes_le(bytes),
            ByteOrder::BigEndian => BigInt::<N>::from_bytes_be(bytes),
        };
        if repr >= config.modulus {
            return Err(Error::invalid_field_element("encoded value is not less than the field modulus"));
        }
        Ok(Self::from_bigint(repr, config))
    }

    pub fn to_hex(&self, order: ByteOrder) -> String {
        hex::encode(self.to_bytes(order))
    }

    pub fn from_hex(s: &str, order: ByteOrder, config: &'static FieldConfig<N>) -> Result<Self> {
        let bytes = hex::decode(s).map_err(|e| Error::invalid_field_element(format!("invalid hex: {e}")))?;
        Self::from_bytes(&bytes, order, config)
    }
}

impl<const N: usize> fmt::Debug for Fp<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fp({:?})", self.to_bigint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BN254_FR;

    fn fp(x: u64) -> Fp<4> {
        Fp::from_bigint(BigInt::<4>([x, 0, 0, 0]), &BN254_FR)
    }

    #[test]
    fn add_sub_inverse_roundtrip() {
        let a = fp(7);
        let b = fp(11);
        let sum = a.add(&b).unwrap();
        let back = sum.sub(&b).unwrap();
        assert!(back.eq(&a));
    }

    #[test]
    fn mul_by_inverse_is_one() {
        let a = fp(12345);
        let inv = a.inverse().unwrap();
        let product = a.mul(&inv).unwrap();
        assert!(product.eq(&Fp::one(&BN254_FR)));
    }

    #[test]
    fn zero_has_no_inverse() {
        let zero = Fp::zero(&BN254_FR);
        assert!(zero.inverse().is_err());
    }

    #[test]
    fn neg_is_additive_inverse() {
        let a = fp(42);
        let sum = a.add(&a.neg()).unwrap();
        assert!(sum.eq(&Fp::zero(&BN254_FR)));
    }

    #[test]
    fn square_matches_self_mul() {
        let a = fp(99);
        assert!(a.square().eq(&a.mul(&a).unwrap()));
    }

    #[test]
    fn byte_roundtrip_preserves_value() {
        let a = fp(1234567);
        let bytes = a.to_bytes(ByteOrder::BigEndian);
        let back = Fp::<4>::from_bytes(&bytes, ByteOrder::BigEndian, &BN254_FR).unwrap();
        assert!(back.eq(&a));
    }

    #[test]
    fn byte_width_matches_the_modulus_bit_length_not_the_limb_count() {
        // BLS12-381's scalar field is held in 6 limbs (48 bytes of storage)
        // but its modulus is only 255 bits, i.e. a 32-byte encoding.
        use crate::config::BLS12_381_FR;
        let a = Fp::from_bigint(BigInt::<6>([42, 0, 0, 0, 0, 0]), &BLS12_381_FR);
        let be = a.to_bytes(ByteOrder::BigEndian);
        assert_eq!(be.len(), 32);
        let back = Fp::<6>::from_bytes(&be, ByteOrder::BigEndian, &BLS12_381_FR).unwrap();
        assert!(back.eq(&a));

        let le = a.to_bytes(ByteOrder::LittleEndian);
        assert_eq!(le.len(), 32);
        let back_le = Fp::<6>::from_bytes(&le, ByteOrder::LittleEndian, &BLS12_381_FR).unwrap();
        assert!(back_le.eq(&a));
    }

    #[test]
    fn from_bytes_rejects_wrong_width() {
        let too_short = vec![0u8; 31];
        assert!(Fp::<4>::from_bytes(&too_short, ByteOrder::BigEndian, &BN254_FR).is_err());
    }

    #[test]
    fn sqrt_of_square_is_a_root() {
        let a = fp(8);
        let sq = a.square();
        let root = sq.sqrt().expect("square has a root");
        assert!(root.square().eq(&sq));
    }

    #[test]
    fn legendre_of_zero_is_zero() {
        assert_eq!(Fp::<4>::zero(&BN254_FR).legendre(), 0);
    }
}
