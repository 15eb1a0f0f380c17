//! Montgomery-form prime-field arithmetic for BN254 and BLS12-381.
//!
//! Layout mirrors `ark-ff`: [`biginteger`] is the fixed-width limb type,
//! [`montgomery`] the REDC kernel, [`config`] the four process-wide field
//! descriptors, [`element`] the `Fp<N>` type callers actually use, and
//! [`batch`] the Montgomery's-trick batch inversion the `curve` and `msm`
//! crates build on.

pub mod batch;
pub mod biginteger;
pub mod config;
pub mod element;
pub mod montgomery;

pub use biginteger::BigInt;
pub use config::{FieldConfig, BLS12_381_FQ, BLS12_381_FR, BN254_FQ, BN254_FR};
pub use element::Fp;

/// `Fp<4>` specialized to BN254's base field.
pub type Bn254Fq = Fp<4>;
/// `Fp<4>` specialized to BN254's scalar field.
pub type Bn254Fr = Fp<4>;
/// `Fp<6>` specialized to BLS12-381's base field.
pub type Bls12_381Fq = Fp<6>;
/// `Fp<6>` specialized to BLS12-381's scalar field.
pub type Bls12_381Fr = Fp<6>;
