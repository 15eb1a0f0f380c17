//! Montgomery multiplication primitives.
//!
//! Grounded on `ark-ff`'s `MontBackend::mul_assign`/`square_in_place`
//! (`montgomery_backend.rs`), implemented here as the single, always-correct
//! CIOS (coarsely integrated operand scanning) loop — the teacher's
//! "no-carry optimization" and hand-written x86-64 assembly fast paths are
//! dropped since they apply only under modulus-shape preconditions that
//! would need to be verified by a compiler and test run this exercise
//! cannot perform; the plain CIOS loop is correct for any odd modulus.

use crate::biginteger::BigInt;

/// `r = a + b + carry`, returning the new carry.
#[inline(always)]
fn adc(a: u64, b: u64, carry: &mut u64) -> u64 {
    let sum = a as u128 + b as u128 + *carry as u128;
    *carry = (sum >> 64) as u64;
    sum as u64
}

/// `r = a * b + c + carry`, returning the low 64 bits and updating carry.
#[inline(always)]
fn mac(a: u64, b: u64, c: u64, carry: &mut u64) -> u64 {
    let prod = a as u128 * b as u128 + c as u128 + *carry as u128;
    *carry = (prod >> 64) as u64;
    prod as u64
}

/// Montgomery multiplication: `a * b * R^-1 mod p`, via CIOS.
///
/// `inv` must be `-p^-1 mod 2^64`; `modulus` is `p` in `N` limbs. Ported from
/// the teacher reference's `mul_without_cond_subtract`: the running `2N`-limb
/// product is held as two `N`-limb halves (`lo`, `hi`) rather than a single
/// shifting `N+1`-limb accumulator, which keeps every carry chain confined to
/// one outer-loop row and easy to check by hand without a compiler.
pub fn mont_mul<const N: usize>(a: &BigInt<N>, b: &BigInt<N>, modulus: &BigInt<N>, inv: u64) -> BigInt<N> {
    let mut lo = vec![0u64; N];
    let mut hi = vec![0u64; N];

    for i in 0..N {
        let mut carry = 0u64;
        for j in 0..N {
            let k = i + j;
            if k >= N {
                hi[k - N] = mac(a.0[i], b.0[j], hi[k - N], &mut carry);
            } else {
                lo[k] = mac(a.0[i], b.0[j], lo[k], &mut carry);
            }
        }
        hi[i] = carry;
    }

    let mut carry2 = 0u64;
    for i in 0..N {
        let m = lo[i].wrapping_mul(inv);
        let mut carry = 0u64;
        mac(m, modulus.0[0], lo[i], &mut carry);
        for j in 1..N {
            let k = i + j;
            if k >= N {
                hi[k - N] = mac(m, modulus.0[j], hi[k - N], &mut carry);
            } else {
                lo[k] = mac(m, modulus.0[j], lo[k], &mut carry);
            }
        }
        hi[i] = adc(hi[i], carry, &mut carry2);
    }

    let mut result = BigInt([0u64; N]);
    result.0.copy_from_slice(&hi);
    if carry2 != 0 || result >= *modulus {
        result.sub_with_borrow(modulus);
    }
    result
}

/// Montgomery squaring; correct but not specially optimized (no dedicated
/// squaring shortcut — `mont_mul(a, a, ..)` is exact and simple to verify).
pub fn mont_square<const N: usize>(a: &BigInt<N>, modulus: &BigInt<N>, inv: u64) -> BigInt<N> {
    mont_mul(a, a, modulus, inv)
}

/// Computes `-modulus^-1 mod 2^64` via the standard iterative-squaring
/// construction (grounded on `ark-ff`'s const `inv::<T, N>()`).
pub fn compute_inv<const N: usize>(modulus: &BigInt<N>) -> u64 {
    let mut inv = 1u64;
    for _ in 0..63 {
        inv = inv.wrapping_mul(inv);
        inv = inv.wrapping_mul(modulus.0[0]);
    }
    inv.wrapping_neg()
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;
    use num_traits::ToPrimitive;

    fn small_modulus() -> (BigInt<2>, u64) {
        // p = 2^64 + 13 fits in 2 limbs and is prime-ish enough for a smoke test
        // (we only need odd, since `inv` requires p to be odd).
        let p = BigInt::<2>([0xFFFFFFFFFFFFFFC5, 0]); // a 64-bit prime, limb 1 = 0
        let inv = compute_inv(&p);
        (p, inv)
    }

    #[test]
    fn mont_mul_matches_bigint_reference() {
        let (p, inv) = small_modulus();
        let p_big = BigUint::from_bytes_le(&p.to_bytes_le());
        let r_bits = 128u32; // N=2 limbs * 64
        let r = BigUint::from(1u32) << r_bits;
        let r_mod_p = &r % &p_big;

        let a_std = BigUint::from(123456789u64);
        let b_std = BigUint::from(987654321u64);

        // Convert to Montgomery form: a_mont = a_std * R mod p.
        let a_mont = (&a_std * &r) % &p_big;
        let b_mont = (&b_std * &r) % &p_big;

        let a_bigint = BigInt::<2>::from_bytes_le(&a_mont.to_bytes_le());
        let b_bigint = BigInt::<2>::from_bytes_le(&b_mont.to_bytes_le());

        let result = mont_mul(&a_bigint, &b_bigint, &p, inv);
        let result_std = BigUint::from_bytes_le(&result.to_bytes_le());
        // result should equal (a_mont * b_mont * R^-1) mod p = (a_std*b_std*R) mod p
        let expected = (&a_std * &b_std * &r) % &p_big;
        assert_eq!(result_std, expected);
        let _ = r_mod_p.to_u64();
    }
}
