//! Closed scroll wrap outlines composed from involute branch pairs.

use crate::errors::GeometryError;
use crate::float_types::Real;
use crate::involute::generate_involute;
use crate::scroll::ScrollGeometry;
use geo::{LineString, Polygon as GeoPolygon};
use nalgebra::{Point2, Vector2};

/// Compose the untranslated wrap outline: the inner involute branch traversed
/// forward concatenated with the outer branch reversed, forming a
/// non-self-intersecting loop around the wrap cross-section.
///
/// The output length is exactly `inner_angles.len() + outer_angles.len()`.
/// First and last point are distinct; downstream renderers and exporters that
/// require an explicit closure add it themselves (see [`closed_ring`]).
///
/// Both branches are usually sampled over the shared
/// [`ScrollGeometry::sample_angles`] domain. Independently supplied domains
/// must agree in sample count.
///
/// # Errors
/// `ShapeMismatch` when the two domains differ in length.
pub fn compose_wrap(
    geometry: &ScrollGeometry,
    inner_angles: &[Real],
    outer_angles: &[Real],
) -> Result<Vec<Point2<Real>>, GeometryError> {
    compose_wrap_translated(geometry, inner_angles, outer_angles, Vector2::zeros())
}

/// Compose the orbiting wrap at crank angle θ: the same outline as
/// [`compose_wrap`], rigidly translated by
/// [`orbit_offset(θ)`](ScrollGeometry::orbit_offset) after generation.
/// Orbiting is pure translation; the shape itself never rotates, so the
/// output equals the untranslated wrap with every point shifted by
/// `(r_o·cos θ, r_o·sin θ)` for every θ.
pub fn compose_orbiting_wrap(
    geometry: &ScrollGeometry,
    inner_angles: &[Real],
    outer_angles: &[Real],
    crank_angle: Real,
) -> Result<Vec<Point2<Real>>, GeometryError> {
    compose_wrap_translated(geometry, inner_angles, outer_angles, geometry.orbit_offset(crank_angle))
}

/// Compose a wrap with a caller-supplied rigid translation, overriding the
/// crank-angle parameterization.
pub fn compose_wrap_translated(
    geometry: &ScrollGeometry,
    inner_angles: &[Real],
    outer_angles: &[Real],
    translation: Vector2<Real>,
) -> Result<Vec<Point2<Real>>, GeometryError> {
    if inner_angles.len() != outer_angles.len() {
        return Err(GeometryError::ShapeMismatch {
            inner: inner_angles.len(),
            outer: outer_angles.len(),
        });
    }

    let inner = generate_involute(
        geometry.base_radius(),
        geometry.inner_initial_angle(),
        inner_angles,
    )?;
    let outer = generate_involute(
        geometry.base_radius(),
        geometry.outer_initial_angle(),
        outer_angles,
    )?;

    let mut outline = Vec::with_capacity(inner.len() + outer.len());
    outline.extend(inner.into_iter().map(|p| p + translation));
    outline.extend(outer.into_iter().rev().map(|p| p + translation));
    Ok(outline)
}

/// 180°-rotate an outline about the origin by negating both coordinates.
///
/// The fixed scroll is conventionally drawn mirrored against the orbiting
/// one; that is a consumer-side transform applied before composition into a
/// scene, not part of wrap generation.
pub fn mirrored(points: &[Point2<Real>]) -> Vec<Point2<Real>> {
    points.iter().map(|p| Point2::new(-p.x, -p.y)).collect()
}

/// Convert an outline into a `geo` polygon, closing the ring explicitly.
pub fn closed_ring(points: &[Point2<Real>]) -> GeoPolygon<Real> {
    let mut coords: Vec<(Real, Real)> = points.iter().map(|p| (p.x, p.y)).collect();
    if let (Some(&first), Some(&last)) = (coords.first(), coords.last()) {
        if first != last {
            coords.push(first); // close explicitly
        }
    }
    GeoPolygon::new(LineString::from(coords), vec![])
}

#[cfg(test)]
mod test {
    use super::*;

    fn reference() -> ScrollGeometry {
        ScrollGeometry::new(0.0015834, 0.0, -1.39626, 0.0, 17.7195, 0.00795902).unwrap()
    }

    #[test]
    fn outline_length_is_sum_of_branches() {
        let g = reference();
        let angles = g.sample_angles(250);
        let wrap = compose_wrap(&g, &angles, &angles).unwrap();
        assert_eq!(wrap.len(), 500);
        assert_ne!(wrap.first(), wrap.last());
    }

    #[test]
    fn mismatched_domains_are_rejected() {
        let g = reference();
        let inner = g.sample_angles(100);
        let outer = g.sample_angles(99);
        assert_eq!(
            compose_wrap(&g, &inner, &outer),
            Err(GeometryError::ShapeMismatch {
                inner: 100,
                outer: 99
            })
        );
    }

    #[test]
    fn closed_ring_closes_the_loop() {
        let g = reference();
        let angles = g.sample_angles(64);
        let wrap = compose_wrap(&g, &angles, &angles).unwrap();
        let ring = closed_ring(&wrap);
        let exterior = ring.exterior();
        assert_eq!(exterior.0.first(), exterior.0.last());
        assert_eq!(exterior.0.len(), wrap.len() + 1);
    }
}
