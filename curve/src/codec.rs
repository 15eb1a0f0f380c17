//! Point (de)serialization: SEC1-style and Arkworks-compatible, both
//! compressed and uncompressed (spec.md §4.2, §6).

use zkaccel_field::Fp;
use zkaccel_serialize::{ByteOrder, Error, Result};

use crate::affine::Affine;
use crate::config::CurveConfig;

fn coordinate_width<const N: usize>(config: &CurveConfig<N>) -> usize {
    config.base_field.byte_width()
}

/// Recovers `y` from `x` via `y^2 = x^3 + b`, then returns the root with the
/// requested parity (spec.md's "selecting the root whose parity matches the
/// prefix"). Both curves in this workspace satisfy `p ≡ 3 (mod 4)`, so
/// [`Fp::sqrt`]'s shortcut applies.
fn recover_y<const N: usize>(x: &Fp<N>, config: &'static CurveConfig<N>, want_odd: bool) -> Result<Fp<N>> {
    let x2 = x.square();
    let x3 = x2.mul(x).expect("same field by construction");
    let y2 = x3.add(&config.b).expect("same field by construction");
    let y = y2.sqrt().ok_or_else(|| Error::invalid_curve_point("x has no square root: not on curve"))?;
    let y_is_odd = y.to_bigint().bit(0);
    Ok(if y_is_odd == want_odd { y } else { y.neg() })
}

/// `true` if `y`, as its standard-form integer, is the larger of the two
/// square-root candidates `{y, p - y}` — the selector Arkworks' flags byte
/// bit 6 carries.
fn y_is_larger<const N: usize>(y: &Fp<N>, config: &CurveConfig<N>) -> bool {
    let y_repr = y.to_bigint();
    let mut neg_repr = config.base_field.modulus;
    neg_repr.sub_with_borrow(&y_repr);
    y_repr > neg_repr
}

/// SEC1-style compressed: `0x00` for identity; else `0x02`/`0x03` (even/odd
/// `y`) followed by big-endian `x`.
pub fn compress_sec1<const N: usize>(p: &Affine<N>) -> Vec<u8> {
    if p.infinity {
        return vec![0x00];
    }
    let width = coordinate_width(p.config);
    let prefix = if p.y.to_bigint().bit(0) { 0x03 } else { 0x02 };
    let mut out = Vec::with_capacity(1 + width);
    out.push(prefix);
    out.extend(p.x.to_bytes(ByteOrder::BigEndian));
    out
}

pub fn decompress_sec1<const N: usize>(bytes: &[u8], config: &'static CurveConfig<N>) -> Result<Affine<N>> {
    if bytes == [0x00] {
        return Ok(Affine::identity(config));
    }
    let width = coordinate_width(config);
    if bytes.len() != 1 + width {
        return Err(Error::invalid_curve_point(format!("expected {} bytes, got {}", 1 + width, bytes.len())));
    }
    let want_odd = match bytes[0] {
        0x02 => false,
        0x03 => true,
        other => return Err(Error::invalid_curve_point(format!("invalid compressed prefix byte 0x{other:02x}"))),
    };
    let x = Fp::from_bytes(&bytes[1..], ByteOrder::BigEndian, config.base_field)?;
    let y = recover_y(&x, config, want_odd)?;
    let p = Affine::new(x, y, config);
    if !p.is_on_curve() {
        return Err(Error::invalid_curve_point("decompressed point failed isOnCurve"));
    }
    Ok(p)
}

/// SEC1-style uncompressed: `0x00` for identity; else `0x04` followed by
/// big-endian `x` then `y`.
pub fn to_uncompressed_sec1<const N: usize>(p: &Affine<N>) -> Vec<u8> {
    if p.infinity {
        return vec![0x00];
    }
    let width = coordinate_width(p.config);
    let mut out = Vec::with_capacity(1 + 2 * width);
    out.push(0x04);
    out.extend(p.x.to_bytes(ByteOrder::BigEndian));
    out.extend(p.y.to_bytes(ByteOrder::BigEndian));
    out
}

pub fn from_uncompressed_sec1<const N: usize>(bytes: &[u8], config: &'static CurveConfig<N>) -> Result<Affine<N>> {
    if bytes == [0x00] {
        return Ok(Affine::identity(config));
    }
    let width = coordinate_width(config);
    if bytes.len() != 1 + 2 * width || bytes[0] != 0x04 {
        return Err(Error::invalid_curve_point("malformed uncompressed SEC1 encoding"));
    }
    let x = Fp::from_bytes(&bytes[1..1 + width], ByteOrder::BigEndian, config.base_field)?;
    let y = Fp::from_bytes(&bytes[1 + width..], ByteOrder::BigEndian, config.base_field)?;
    let p = Affine::new(x, y, config);
    if !p.is_on_curve() {
        return Err(Error::invalid_curve_point("point failed isOnCurve"));
    }
    Ok(p)
}

const ARKWORKS_INFINITY_BIT: u8 = 0x80;
const ARKWORKS_Y_LARGER_BIT: u8 = 0x40;

/// Arkworks `CanonicalSerialize` compressed layout: little-endian `x`, with
/// the infinity/`y`-parity flags packed into the top two bits of `x`'s last
/// (most significant) byte.
pub fn compress_arkworks<const N: usize>(p: &Affine<N>) -> Vec<u8> {
    let width = coordinate_width(p.config);
    let mut out = vec![0u8; width];
    if p.infinity {
        out[width - 1] |= ARKWORKS_INFINITY_BIT;
        return out;
    }
    let x_bytes = p.x.to_bytes(ByteOrder::LittleEndian);
    out[..x_bytes.len()].copy_from_slice(&x_bytes);
    if y_is_larger(&p.y, p.config) {
        out[width - 1] |= ARKWORKS_Y_LARGER_BIT;
    }
    out
}

pub fn decompress_arkworks<const N: usize>(bytes: &[u8], config: &'static CurveConfig<N>) -> Result<Affine<N>> {
    let width = coordinate_width(config);
    if bytes.len() != width {
        return Err(Error::invalid_curve_point(format!("expected {width} bytes, got {}", bytes.len())));
    }
    let flags_byte = bytes[width - 1];
    if flags_byte & ARKWORKS_INFINITY_BIT != 0 {
        return Ok(Affine::identity(config));
    }
    let y_larger = flags_byte & ARKWORKS_Y_LARGER_BIT != 0;

    let mut x_bytes = bytes.to_vec();
    x_bytes[width - 1] &= !(ARKWORKS_INFINITY_BIT | ARKWORKS_Y_LARGER_BIT);
    let x = Fp::from_bytes(&x_bytes, ByteOrder::LittleEndian, config.base_field)?;

    let x2 = x.square();
    let x3 = x2.mul(&x).expect("same field by construction");
    let y2 = x3.add(&config.b).expect("same field by construction");
    let y = y2.sqrt().ok_or_else(|| Error::invalid_curve_point("x has no square root: not on curve"))?;
    let y = if y_is_larger(&y, config) == y_larger { y } else { y.neg() };

    let p = Affine::new(x, y, config);
    if !p.is_on_curve() {
        return Err(Error::invalid_curve_point("decompressed point failed isOnCurve"));
    }
    Ok(p)
}

/// Arkworks `CanonicalSerialize` uncompressed layout: little-endian `x`,
/// little-endian `y`, then a dedicated flags byte (`x‖y‖flags`).
pub fn to_uncompressed_arkworks<const N: usize>(p: &Affine<N>) -> Vec<u8> {
    let width = coordinate_width(p.config);
    let mut out = vec![0u8; 2 * width + 1];
    if p.infinity {
        out[2 * width] = ARKWORKS_INFINITY_BIT;
        return out;
    }
    out[..width].copy_from_slice(&p.x.to_bytes(ByteOrder::LittleEndian));
    out[width..2 * width].copy_from_slice(&p.y.to_bytes(ByteOrder::LittleEndian));
    out
}

pub fn from_uncompressed_arkworks<const N: usize>(bytes: &[u8], config: &'static CurveConfig<N>) -> Result<Affine<N>> {
    let width = coordinate_width(config);
    if bytes.len() != 2 * width + 1 {
        return Err(Error::invalid_curve_point(format!("expected {} bytes, got {}", 2 * width + 1, bytes.len())));
    }
    let flags = bytes[2 * width];
    if flags & ARKWORKS_INFINITY_BIT != 0 {
        return Ok(Affine::identity(config));
    }
    let x = Fp::from_bytes(&bytes[..width], ByteOrder::LittleEndian, config.base_field)?;
    let y = Fp::from_bytes(&bytes[width..2 * width], ByteOrder::LittleEndian, config.base_field)?;
    let p = Affine::new(x, y, config);
    if !p.is_on_curve() {
        return Err(Error::invalid_curve_point("point failed isOnCurve"));
    }
    Ok(p)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BLS12_381_G1, BN254_G1};

    #[test]
    fn sec1_compress_generator_matches_spec_scenario() {
        // S3: BN254 generator G = (1, 2); y = 2 is even, so prefix 0x02.
        let g = Affine::generator(&BN254_G1);
        let compressed = compress_sec1(&g);
        assert_eq!(compressed[0], 0x02);
        let decompressed = decompress_sec1(&compressed, &BN254_G1).unwrap();
        assert!(decompressed.eq(&g));
    }

    #[test]
    fn sec1_roundtrip_identity() {
        let id = Affine::<4>::identity(&BN254_G1);
        let bytes = compress_sec1(&id);
        assert_eq!(bytes, vec![0x00]);
        assert!(decompress_sec1(&bytes, &BN254_G1).unwrap().eq(&id));
    }

    #[test]
    fn sec1_uncompressed_roundtrip() {
        let g = Affine::generator(&BLS12_381_G1);
        let bytes = to_uncompressed_sec1(&g);
        assert_eq!(bytes[0], 0x04);
        let back = from_uncompressed_sec1(&bytes, &BLS12_381_G1).unwrap();
        assert!(back.eq(&g));
    }

    #[test]
    fn compressed_is_shorter_than_uncompressed() {
        let g = Affine::generator(&BN254_G1);
        assert!(compress_sec1(&g).len() < to_uncompressed_sec1(&g).len());
    }

    #[test]
    fn arkworks_compressed_roundtrip() {
        let g = Affine::generator(&BN254_G1);
        let bytes = compress_arkworks(&g);
        let back = decompress_arkworks(&bytes, &BN254_G1).unwrap();
        assert!(back.eq(&g));
    }

    #[test]
    fn arkworks_uncompressed_roundtrip() {
        let g = Affine::generator(&BLS12_381_G1);
        let bytes = to_uncompressed_arkworks(&g);
        let back = from_uncompressed_arkworks(&bytes, &BLS12_381_G1).unwrap();
        assert!(back.eq(&g));
    }

    #[test]
    fn arkworks_identity_is_all_zero_except_infinity_flag() {
        let id = Affine::<4>::identity(&BN254_G1);
        let bytes = compress_arkworks(&id);
        assert_eq!(bytes[bytes.len() - 1], ARKWORKS_INFINITY_BIT);
        assert!(bytes[..bytes.len() - 1].iter().all(|&b| b == 0));
        assert!(decompress_arkworks(&bytes, &BN254_G1).unwrap().eq(&id));
    }
}
