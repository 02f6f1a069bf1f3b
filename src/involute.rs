//! Involute-of-circle curve generation.

use crate::errors::GeometryError;
use crate::float_types::Real;
use nalgebra::Point2;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Calculate the Cartesian coordinates of a point on an involute.
///
/// # Parameters
/// - `base_radius`: radius of the generating circle
/// - `initial_angle`: angle on the base circle where the involute starts
/// - `phi`: involute angle to evaluate at
#[inline]
pub fn involute_xy(base_radius: Real, initial_angle: Real, phi: Real) -> (Real, Real) {
    let r = base_radius * (phi - initial_angle);
    (
        base_radius * phi.cos() + r * phi.sin(),
        base_radius * phi.sin() - r * phi.cos(),
    )
}

/// **Mathematical Foundation: Involute of a Circle**
///
/// Samples the curve traced by unwinding a taut string from a circle of
/// radius r_b, starting at `initial_angle` φ₀:
/// ```text
/// r(φ) = r_b·(φ - φ₀)
/// x(φ) = r_b·cos(φ) + r(φ)·sin(φ)
/// y(φ) = r_b·sin(φ) - r(φ)·cos(φ)
/// ```
///
/// ### **Geometric Properties**
/// - At φ = φ₀ the local involute radius is zero and the sample lies on the
///   base circle at `(r_b·cos(φ₀), r_b·sin(φ₀))`.
/// - Arc speed is |dP/dφ| = r_b·|φ - φ₀|, so for a uniform domain consecutive
///   samples are never farther apart than the step times r_b·(φ_max - φ₀).
///
/// The domain is caller-supplied and may be non-uniform; the output has the
/// same length and order as `angles`. A single-element domain yields a single
/// point and an empty domain yields an empty vector. Each sample is evaluated
/// independently, so the map runs in parallel under the `parallel` feature.
///
/// # Errors
/// `InvalidBaseRadius` if `base_radius <= 0`.
pub fn generate_involute(
    base_radius: Real,
    initial_angle: Real,
    angles: &[Real],
) -> Result<Vec<Point2<Real>>, GeometryError> {
    if base_radius <= 0.0 {
        return Err(GeometryError::InvalidBaseRadius(base_radius));
    }

    #[cfg(feature = "parallel")]
    let points = angles
        .par_iter()
        .map(|&phi| {
            let (x, y) = involute_xy(base_radius, initial_angle, phi);
            Point2::new(x, y)
        })
        .collect();

    #[cfg(not(feature = "parallel"))]
    let points = angles
        .iter()
        .map(|&phi| {
            let (x, y) = involute_xy(base_radius, initial_angle, phi);
            Point2::new(x, y)
        })
        .collect();

    Ok(points)
}

/// Uniform sampling domain of `samples` angles over `[start, end]`, endpoints
/// included. Allocated directly and filled by index.
pub fn linspace(start: Real, end: Real, samples: usize) -> Vec<Real> {
    match samples {
        0 => Vec::new(),
        1 => vec![start],
        n => {
            let step = (end - start) / ((n - 1) as Real);
            (0..n).map(|i| start + step * (i as Real)).collect()
        },
    }
}
