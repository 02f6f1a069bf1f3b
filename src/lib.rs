//! Scroll compressor geometry kernel: **involute** wrap generation, chamber
//! volume / centroid evaluation, and base-radius sizing.
//!
//! The crate is a pure mathematical kernel. Everything is computed from an
//! immutable [`ScrollGeometry`] configuration; there is no shared state, no
//! I/O surface, and identical inputs always yield identical outputs. Plotting,
//! CAD export and animation drivers are consumers of the point sequences and
//! [`ChamberState`] snapshots this crate returns.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon for multithreading

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod chamber;
pub mod errors;
pub mod float_types;
pub mod involute;
pub mod scroll;
pub mod sizing;
pub mod wrap;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use chamber::{
    ChamberModel, ChamberState, DisplacedVolume, HarmonicPocket, Pocket, TrappedPocket,
};
pub use errors::GeometryError;
pub use scroll::ScrollGeometry;
pub use sizing::{Sizing, WrapProfile};
