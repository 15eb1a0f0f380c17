//! Shared infrastructure used by every crate in the zkaccel workspace:
//! the single error enum (spec.md §7) and the byte-order selector used by
//! every fixed-width (de)serialization routine in `field` and `curve`.
//!
//! Mirrors the role `ark-serialize` plays for `ark-ff`/`ark-ec`: a small,
//! dependency-light crate that sits at the bottom of the dependency graph
//! so every other crate can agree on one error type without depending on
//! each other.

use thiserror::Error;

/// Endianness selector for fixed-width field-element and curve-point byte
/// encodings (spec.md §4.1, §6).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    BigEndian,
    LittleEndian,
}

/// The single error type surfaced by every operation in the toolkit.
///
/// All failures are explicit, synchronous, and typed (spec.md §7); nothing
/// in this workspace catches and retries internally. Each variant's `ctx`
/// field carries the diagnostic "context dictionary" spec.md asks for, kept
/// as a plain string rather than a generic map since every call site already
/// knows exactly what it wants to say.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Mismatched moduli, value ≥ modulus on deserialization, negative
    /// exponent, or any other structurally invalid field element.
    #[error("invalid field element: {ctx}")]
    InvalidFieldElement { ctx: String },

    /// Inverting zero, individually or inside a batch inversion (in which
    /// case `ctx` names the offending index).
    #[error("division by zero: {ctx}")]
    DivisionByZero { ctx: String },

    /// A deserialized point failed `isOnCurve`, carried an invalid prefix
    /// byte, had the wrong length, had a coordinate ≥ p, or decompression
    /// found no square root.
    #[error("invalid curve point: {ctx}")]
    InvalidCurvePoint { ctx: String },

    /// MSM scalar/point count mismatch, or a byte array whose length isn't
    /// a multiple of the expected element size.
    #[error("invalid input size: {ctx}")]
    InvalidInputSize { ctx: String },

    /// `n` is not a power of two, or `n` does not divide `p - 1` for the
    /// requested scalar field.
    #[error("unsupported NTT size: {ctx}")]
    UnsupportedNttSize { ctx: String },

    /// Reserved for conditions that should be structurally impossible, e.g.
    /// a failed extended-gcd step on a known prime.
    #[error("internal error: {ctx}")]
    Internal { ctx: String },
}

impl Error {
    pub fn invalid_field_element(ctx: impl Into<String>) -> Self {
        Self::InvalidFieldElement { ctx: ctx.into() }
    }

    pub fn division_by_zero(ctx: impl Into<String>) -> Self {
        Self::DivisionByZero { ctx: ctx.into() }
    }

    pub fn invalid_curve_point(ctx: impl Into<String>) -> Self {
        Self::InvalidCurvePoint { ctx: ctx.into() }
    }

    pub fn invalid_input_size(ctx: impl Into<String>) -> Self {
        Self::InvalidInputSize { ctx: ctx.into() }
    }

    pub fn unsupported_ntt_size(ctx: impl Into<String>) -> Self {
        Self::UnsupportedNttSize { ctx: ctx.into() }
    }

    pub fn internal(ctx: impl Into<String>) -> Self {
        Self::Internal { ctx: ctx.into() }
    }
}

/// Result alias used throughout the workspace.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_constructors_carry_their_context() {
        let err = Error::invalid_field_element("mismatched moduli");
        assert_eq!(err.to_string(), "invalid field element: mismatched moduli");
        let err = Error::division_by_zero("index 3");
        assert_eq!(err.to_string(), "division by zero: index 3");
    }

    #[test]
    fn byte_order_variants_are_distinct() {
        assert_ne!(ByteOrder::BigEndian, ByteOrder::LittleEndian);
    }
}
