//! Radix-2 Cooley-Tukey NTT, and radix-4 as a bit-exact-equivalent
//! delegation to it (spec.md §4.3, §9: "an implementer may... replicate
//! that delegation").

use zkaccel_field::Fp;
use zkaccel_serialize::{Error, Result};

use crate::config::NttConfig;

fn bit_reverse_permute<const N: usize>(a: &mut [Fp<N>], log_n: u32) {
    let n = a.len();
    for i in 0..n {
        let j = (i as u32).reverse_bits() >> (32 - log_n);
        let j = j as usize;
        if i < j {
            a.swap(i, j);
        }
    }
}

fn check_len<const N: usize>(a: &[Fp<N>], cfg: &NttConfig<N>) -> Result<()> {
    if a.len() != cfg.n {
        return Err(Error::invalid_input_size(format!(
            "expected a length-{} input for this NTT configuration, got {}",
            cfg.n,
            a.len()
        )));
    }
    Ok(())
}

fn butterfly_pass<const N: usize>(a: &mut [Fp<N>], log_n: u32, twiddles: &[Fp<N>]) {
    let n = a.len();
    for s in 1..=log_n {
        let m = 1usize << s;
        let half_m = m / 2;
        let step = n / m;
        let mut k = 0;
        while k < n {
            for j in 0..half_m {
                let tw = twiddles[j * step];
                let u = a[k + j];
                let t = tw.mul(&a[k + j + half_m]).expect("same field by construction");
                a[k + j] = u.add(&t).expect("same field by construction");
                a[k + j + half_m] = u.sub(&t).expect("same field by construction");
            }
            k += m;
        }
    }
}

/// In-place forward NTT: bit-reversal permutation, then `log_n` butterfly
/// stages using `cfg.twiddles`.
pub fn forward_ntt<const N: usize>(a: &mut [Fp<N>], cfg: &NttConfig<N>) -> Result<()> {
    check_len(a, cfg)?;
    if cfg.n <= 1 {
        return Ok(());
    }
    bit_reverse_permute(a, cfg.log_n);
    butterfly_pass(a, cfg.log_n, &cfg.twiddles);
    Ok(())
}

/// In-place inverse NTT: identical butterfly structure using
/// `cfg.twiddles_inv`, then every output is scaled by `cfg.n_inv`.
pub fn inverse_ntt<const N: usize>(a: &mut [Fp<N>], cfg: &NttConfig<N>) -> Result<()> {
    check_len(a, cfg)?;
    if cfg.n <= 1 {
        return Ok(());
    }
    bit_reverse_permute(a, cfg.log_n);
    butterfly_pass(a, cfg.log_n, &cfg.twiddles_inv);
    for x in a.iter_mut() {
        *x = x.mul(&cfg.n_inv).expect("same field by construction");
    }
    Ok(())
}

/// Radix-4 entry point. The source this workspace is grounded on delegates
/// radix-4 to radix-2 rather than implementing a dedicated
/// decimation-in-time radix-4 butterfly; spec.md explicitly permits either
/// choice as long as the result is bit-exact with radix-2, so this crate
/// keeps the delegation rather than duplicating the butterfly logic.
pub fn forward_ntt_radix4<const N: usize>(a: &mut [Fp<N>], cfg: &NttConfig<N>) -> Result<()> {
    forward_ntt(a, cfg)
}

pub fn inverse_ntt_radix4<const N: usize>(a: &mut [Fp<N>], cfg: &NttConfig<N>) -> Result<()> {
    inverse_ntt(a, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::bn254_fr_config;
    use zkaccel_field::config::BN254_FR;
    use zkaccel_field::BigInt;

    fn fp(x: u64) -> Fp<4> {
        Fp::from_bigint(BigInt::<4>([x, 0, 0, 0]), &BN254_FR)
    }

    #[test]
    fn round_trip_recovers_input() {
        let cfg = bn254_fr_config(8).unwrap();
        let original: Vec<Fp<4>> = (1..=8).map(fp).collect();
        let mut v = original.clone();
        forward_ntt(&mut v, &cfg).unwrap();
        inverse_ntt(&mut v, &cfg).unwrap();
        for (a, b) in original.iter().zip(v.iter()) {
            assert!(a.eq(b));
        }
    }

    #[test]
    fn size_one_is_identity() {
        let cfg = bn254_fr_config(1).unwrap();
        let mut v = vec![fp(42)];
        forward_ntt(&mut v, &cfg).unwrap();
        assert!(v[0].eq(&fp(42)));
    }

    #[test]
    fn radix4_matches_radix2_bit_exactly() {
        let cfg = bn254_fr_config(16).unwrap();
        let original: Vec<Fp<4>> = (1..=16).map(fp).collect();
        let mut a = original.clone();
        let mut b = original.clone();
        forward_ntt(&mut a, &cfg).unwrap();
        forward_ntt_radix4(&mut b, &cfg).unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert!(x.eq(y));
        }
    }

    #[test]
    fn wrong_length_input_is_rejected() {
        let cfg = bn254_fr_config(8).unwrap();
        let mut v: Vec<Fp<4>> = (1..=4).map(fp).collect();
        assert!(forward_ntt(&mut v, &cfg).is_err());
    }
}
