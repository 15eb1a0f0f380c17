//! Process-wide NTT configuration cache, keyed by transform size.
//!
//! Grounded on spec.md §4.5's "process-wide caches ... append-only and
//! monotonic" requirement and on [`zkaccel_field::config`]'s `Lazy`-cached
//! field tables — same idea (insert-if-absent, build once), but keyed
//! dynamically by `n` rather than by a fixed small set of compile-time
//! names, since NTT sizes are caller-chosen. Only BN254's and BLS12-381's
//! scalar fields ever drive this crate (NTTs run over scalar fields, never
//! base fields), so one cache per field is enough — no need for a generic
//! cache keyed by field identity too.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use zkaccel_field::config::FieldConfig;
use zkaccel_field::Fp;
use zkaccel_serialize::{Error, Result};

/// Everything one radix-2 Cooley-Tukey transform of size `n` needs:
/// twiddle tables for the forward and inverse directions, plus `n^-1`.
pub struct NttConfig<const N: usize> {
    pub n: usize,
    pub log_n: u32,
    /// `twiddles[i] = omega^i` for `i` in `[0, n/2)`.
    pub twiddles: Vec<Fp<N>>,
    /// Built from `omega^-1`.
    pub twiddles_inv: Vec<Fp<N>>,
    pub n_inv: Fp<N>,
}

impl<const N: usize> NttConfig<N> {
    fn build(field: &'static FieldConfig<N>, n: usize) -> Result<Self> {
        if n == 0 || !n.is_power_of_two() {
            return Err(Error::unsupported_ntt_size(format!("{n} is not a power of two")));
        }
        let log_n = n.trailing_zeros();
        if log_n > field.two_adicity {
            return Err(Error::unsupported_ntt_size(format!(
                "size {n} needs a 2^{log_n}-th root of unity, but this field only has one up to 2^{}",
                field.two_adicity
            )));
        }

        // The field's cached root already generates the full 2^two_adicity
        // subgroup; raise it to the power that narrows it down to a
        // primitive n-th root. `two_adicity` is well under 64 for every
        // field this crate supports, so the shift below cannot overflow.
        let shift = field.two_adicity - log_n;
        let base_root = Fp::from_montgomery_repr(field.two_adic_root_of_unity, field);
        let omega = pow_u32(&base_root, 1u64 << shift, field);

        let omega_inv = omega.inverse().expect("root of unity is nonzero");
        let half = n / 2;
        let mut twiddles = Vec::with_capacity(half.max(1));
        let mut twiddles_inv = Vec::with_capacity(half.max(1));
        let mut cur = Fp::one(field);
        let mut cur_inv = Fp::one(field);
        for _ in 0..half {
            twiddles.push(cur);
            twiddles_inv.push(cur_inv);
            cur = cur.mul(&omega).expect("same field by construction");
            cur_inv = cur_inv.mul(&omega_inv).expect("same field by construction");
        }

        let n_as_field = Fp::from_bigint(usize_to_bigint(n), field);
        let n_inv = n_as_field.inverse().expect("n is nonzero and coprime to p by construction");

        Ok(Self { n, log_n, twiddles, twiddles_inv, n_inv })
    }
}

fn usize_to_bigint<const N: usize>(n: usize) -> zkaccel_field::BigInt<N> {
    let mut limbs = [0u64; N];
    limbs[0] = n as u64;
    zkaccel_field::BigInt(limbs)
}

/// `base^exp` by repeated squaring, `exp` a plain `u64` (used only to raise
/// the field's cached 2-adic root down to the requested transform size, so
/// `exp` is always a small power of two).
fn pow_u32<const N: usize>(base: &Fp<N>, exp: u64, field: &'static FieldConfig<N>) -> Fp<N> {
    let mut result = Fp::one(field);
    let mut b = *base;
    let mut e = exp;
    while e > 0 {
        if e & 1 == 1 {
            result = result.mul(&b).expect("same field by construction");
        }
        b = b.square();
        e >>= 1;
    }
    result
}

type CacheFor<const N: usize> = Lazy<RwLock<HashMap<usize, Arc<NttConfig<N>>>>>;

static BN254_FR_CACHE: CacheFor<4> = Lazy::new(|| RwLock::new(HashMap::new()));
static BLS12_381_FR_CACHE: CacheFor<6> = Lazy::new(|| RwLock::new(HashMap::new()));

fn get_or_build<const N: usize>(
    cache: &'static RwLock<HashMap<usize, Arc<NttConfig<N>>>>,
    field: &'static FieldConfig<N>,
    n: usize,
) -> Result<Arc<NttConfig<N>>> {
    if let Some(existing) = cache.read().expect("cache lock not poisoned").get(&n) {
        return Ok(existing.clone());
    }
    let built = Arc::new(NttConfig::build(field, n)?);
    let mut guard = cache.write().expect("cache lock not poisoned");
    Ok(guard.entry(n).or_insert(built).clone())
}

/// Fetches (building and caching on first use) the NTT configuration for
/// BN254's scalar field at size `n`.
pub fn bn254_fr_config(n: usize) -> Result<Arc<NttConfig<4>>> {
    get_or_build(&BN254_FR_CACHE, &zkaccel_field::config::BN254_FR, n)
}

/// Fetches (building and caching on first use) the NTT configuration for
/// BLS12-381's scalar field at size `n`.
pub fn bls12_381_fr_config(n: usize) -> Result<Arc<NttConfig<6>>> {
    get_or_build(&BLS12_381_FR_CACHE, &zkaccel_field::config::BLS12_381_FR, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caches_the_same_config_instance() {
        let a = bn254_fr_config(16).unwrap();
        let b = bn254_fr_config(16).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn rejects_non_power_of_two() {
        assert!(bn254_fr_config(17).is_err());
    }

    #[test]
    fn twiddles_are_correct_size() {
        let cfg = bn254_fr_config(8).unwrap();
        assert_eq!(cfg.twiddles.len(), 4);
        assert_eq!(cfg.twiddles_inv.len(), 4);
    }
}
