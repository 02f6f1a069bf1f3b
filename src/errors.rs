//! Validation errors

use crate::float_types::Real;
use std::fmt::Display;

/// All the possible validation issues we might encounter
///
/// Every error is detected at the boundary of the offending call and returned
/// immediately; nothing is clamped and no NaN is propagated. Retrying without
/// changed input is meaningless, these are deterministic math functions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// (InvalidBaseRadius) The involute base circle radius is not positive
    InvalidBaseRadius(Real),
    /// (InvalidOrbitingRadius) The supplied or derived orbiting radius is not positive
    InvalidOrbitingRadius(Real),
    /// (InvalidWrapThickness) The wrap thickness derived from the involute initial angles is not positive
    InvalidWrapThickness(Real),
    /// (InvalidHeight) The scroll wrap height is not positive
    InvalidHeight(Real),
    /// (InvalidSweep) The angular sweep is empty or reversed
    InvalidSweep { start: Real, end: Real },
    /// (ShapeMismatch) The inner and outer involute branches were sampled at different counts
    ShapeMismatch { inner: usize, outer: usize },
    /// (UnsupportedChamberType) The chamber selector is outside the closed set of known pockets
    UnsupportedChamberType(String),
    /// (RootNotFound) The sizing bracket does not straddle the target volume
    RootNotFound { lo: Real, hi: Real },
}

impl Display for GeometryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeometryError::InvalidBaseRadius(r) => {
                write!(f, "(InvalidBaseRadius) The base circle radius must be positive, got: {}", r)
            },
            GeometryError::InvalidOrbitingRadius(r) => {
                write!(f, "(InvalidOrbitingRadius) The orbiting radius must be positive, got: {}", r)
            },
            GeometryError::InvalidWrapThickness(t) => {
                write!(f, "(InvalidWrapThickness) The wrap thickness must be positive, got: {}", t)
            },
            GeometryError::InvalidHeight(h) => {
                write!(f, "(InvalidHeight) The scroll height must be positive, got: {}", h)
            },
            GeometryError::InvalidSweep { start, end } => {
                write!(f, "(InvalidSweep) The sweep end ({}) must exceed the sweep start ({})", end, start)
            },
            GeometryError::ShapeMismatch { inner, outer } => {
                write!(f, "(ShapeMismatch) The inner branch has {} samples but the outer branch has {}", inner, outer)
            },
            GeometryError::UnsupportedChamberType(name) => {
                write!(f, "(UnsupportedChamberType) Unknown chamber selector: {}", name)
            },
            GeometryError::RootNotFound { lo, hi } => {
                write!(f, "(RootNotFound) No base radius in [{}, {}] realizes the target volume", lo, hi)
            },
        }
    }
}
