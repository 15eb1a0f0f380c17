//! Runtime-built field descriptors.
//!
//! The teacher derives Montgomery constants (`R`, `R2`, `INV`) with a
//! `MontConfig` derive macro expanding at compile time from a decimal string
//! literal. Without a compiler in the loop here, `FieldConfig::new` computes
//! the same constants once, at first use, from the decimal modulus via
//! `num-bigint`, and the four curve fields below are cached behind
//! `once_cell::sync::Lazy` so the cost is paid only once per process —
//! mirroring the "insert-if-absent, process-wide cache" shape the rest of
//! this workspace uses for curve and NTT configuration.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use once_cell::sync::Lazy;

use crate::biginteger::BigInt;
use crate::montgomery::compute_inv;

/// Everything a `Fp<N>` needs to interpret its limbs: the modulus itself,
/// Montgomery's `R`/`R2`/`INV`, and (for scalar fields) the two-adic
/// subgroup data the NTT crate keys its root-of-unity tables on.
pub struct FieldConfig<const N: usize> {
    pub modulus: BigInt<N>,
    pub modulus_biguint: BigUint,
    /// `R = 2^(64*N) mod p`, i.e. the Montgomery representation of `1`.
    pub r: BigInt<N>,
    /// `R2 = R^2 mod p`, used to convert standard-form values into Montgomery form.
    pub r2: BigInt<N>,
    /// `-p^-1 mod 2^64`.
    pub inv: u64,
    pub generator: BigInt<N>,
    /// `v` such that `p - 1 = 2^v * odd`.
    pub two_adicity: u32,
    /// A primitive `2^two_adicity`-th root of unity, in Montgomery form.
    pub two_adic_root_of_unity: BigInt<N>,
}

impl<const N: usize> FieldConfig<N> {
    /// Builds a field descriptor from a decimal modulus and generator.
    ///
    /// Panics if `modulus_dec` doesn't parse, is even, or doesn't fit in `N`
    /// limbs — all four call sites below are fixed, checked-at-authorship
    /// constants, so this is an invariant violation rather than a runtime
    /// input-validation concern (spec.md's typed `Error` surface is reserved
    /// for data the caller supplies, not for this crate's own constant table).
    fn new(modulus_dec: &str, generator_dec: &str) -> Self {
        let modulus_biguint = modulus_dec.parse::<BigUint>().expect("valid decimal modulus");
        assert!(&modulus_biguint % 2u8 == BigUint::one(), "modulus must be odd");
        let modulus = biguint_to_bigint::<N>(&modulus_biguint);

        let r_bits = 64 * N as u32;
        let r_biguint = (BigUint::one() << r_bits) % &modulus_biguint;
        let r = biguint_to_bigint::<N>(&r_biguint);
        let r2_biguint = (&r_biguint * &r_biguint) % &modulus_biguint;
        let r2 = biguint_to_bigint::<N>(&r2_biguint);

        let inv = compute_inv(&modulus);

        let generator_biguint = generator_dec.parse::<BigUint>().expect("valid decimal generator");
        let generator_mont = (&generator_biguint * &r_biguint) % &modulus_biguint;
        let generator = biguint_to_bigint::<N>(&generator_mont);

        let (two_adicity, odd_factor) = factor_out_twos(&modulus_biguint - BigUint::one());
        // A primitive 2^two_adicity-th root of unity is generator^odd_factor.
        let root_biguint = generator_biguint.modpow(&odd_factor, &modulus_biguint);
        let root_mont = (&root_biguint * &r_biguint) % &modulus_biguint;
        let two_adic_root_of_unity = biguint_to_bigint::<N>(&root_mont);

        Self {
            modulus,
            modulus_biguint,
            r,
            r2,
            inv,
            generator,
            two_adicity,
            two_adic_root_of_unity,
        }
    }

    /// `ceil(log2(p) / 8)` — the fixed-width byte encoding length spec.md
    /// §4.1/§6 define for this field, independent of `N`'s limb count (e.g.
    /// BLS12-381's scalar field is stored in 6 limbs/48 bytes but its
    /// modulus is only 255 bits, i.e. a 32-byte encoding).
    pub fn byte_width(&self) -> usize {
        ((self.modulus.bit_length() as usize) + 7) / 8
    }
}

fn biguint_to_bigint<const N: usize>(v: &BigUint) -> BigInt<N> {
    let bytes = v.to_bytes_le();
    BigInt::<N>::from_bytes_le(&bytes)
}

/// Splits `n = 2^v * odd` and returns `(v, odd)`.
fn factor_out_twos(mut n: BigUint) -> (u32, BigUint) {
    let mut v = 0u32;
    while (&n % 2u8).is_zero() {
        n >>= 1u32;
        v += 1;
    }
    (v, n)
}

/// BN254's base field `Fq` (`y^2 = x^3 + 3`).
pub static BN254_FQ: Lazy<FieldConfig<4>> = Lazy::new(|| {
    FieldConfig::new(
        "21888242871839275222246405745257275088696311157297823662689037894645226208583",
        "3",
    )
});

/// BN254's scalar field `Fr`.
pub static BN254_FR: Lazy<FieldConfig<4>> = Lazy::new(|| {
    FieldConfig::new(
        "21888242871839275222246405745257275088548364400416034343698204186575808495617",
        "5",
    )
});

/// BLS12-381's base field `Fq` (`y^2 = x^3 + 4`), six 64-bit limbs wide.
pub static BLS12_381_FQ: Lazy<FieldConfig<6>> = Lazy::new(|| {
    FieldConfig::new(
        "4002409555221667393417789825735904156556882819939007885332058136124031650490837864442687629129015664037894272559787",
        "2",
    )
});

/// BLS12-381's scalar field `Fr`. Also six limbs wide even though the
/// modulus is only 255 bits, matching spec.md's data model literally rather
/// than shrinking it to the tighter 4-limb fit.
pub static BLS12_381_FR: Lazy<FieldConfig<6>> = Lazy::new(|| {
    FieldConfig::new(
        "52435875175126190479447740508185965837690552500527637822603658699938581184513",
        "7",
    )
});
