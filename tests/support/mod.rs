//! Test support library
//! Provides shared fixtures & helper functions for tests.

use scrollrs::ScrollGeometry;
use scrollrs::float_types::Real;
use nalgebra::Point2;

/// The Bell (2010) reference wrap used throughout the original design study:
/// r_b = 1.5834 mm, φ_i0 = 0, φ_o0 = -1.39626, φ_ie = φ_oe = 17.7195,
/// h = 3.6·t_s.
pub fn reference_geometry() -> ScrollGeometry {
    ScrollGeometry::new(0.0015834, 0.0, -1.39626, 0.0, 17.7195, 0.00795902).unwrap()
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Shoelace signed area of an outline, first point implicitly closing it.
pub fn signed_area(points: &[Point2<Real>]) -> Real {
    let n = points.len();
    let mut area = 0.0;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        area += p.x * q.y - q.x * p.y;
    }
    0.5 * area
}
