//! Chamber volume, volume derivative, and centroid evaluation.
//!
//! A scroll machine traps gas in crescent-shaped pockets between the fixed
//! and orbiting wraps. Each pocket family has its own closed-form volume
//! expression; the [`ChamberModel`] trait is the seam that makes them
//! interchangeable to tabulation and animation consumers.

use crate::errors::GeometryError;
use crate::float_types::{FRAC_PI_2, PI, Real, TAU};
use crate::involute::{involute_xy, linspace};
use crate::scroll::ScrollGeometry;
use crate::wrap::closed_ring;
use geo::Centroid;
use nalgebra::{Point2, Vector2};
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Step for the symmetric-difference volume derivative of
/// [`TrappedPocket`].
#[cfg(feature = "f32")]
const DERIVATIVE_STEP: Real = 1e-3;
/// Step for the symmetric-difference volume derivative of
/// [`TrappedPocket`].
#[cfg(feature = "f64")]
const DERIVATIVE_STEP: Real = 1e-6;

/// Snapshot of one chamber at one crank angle. Stateless: recomputed from
/// `theta` and the model each time, no history retained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChamberState {
    /// Crank angle the snapshot was evaluated at (rad).
    pub theta: Real,
    /// Trapped volume (m³).
    pub volume: Real,
    /// Rate of change of the trapped volume (m³/rad).
    pub dvolume_dtheta: Real,
    /// Centroid of the trapped fluid pocket (m).
    pub centroid: Point2<Real>,
}

/// A chamber type's closed-form expressions for volume, volume derivative and
/// centroid as functions of crank angle.
pub trait ChamberModel {
    /// Trapped volume at crank angle `theta` (m³).
    fn volume(&self, theta: Real) -> Real;

    /// d(volume)/dθ at crank angle `theta` (m³/rad).
    fn dvolume_dtheta(&self, theta: Real) -> Real;

    /// Centroid of the trapped pocket at crank angle `theta` (m).
    fn centroid(&self, theta: Real) -> Point2<Real>;

    /// Evaluate all three capabilities into one snapshot.
    fn state(&self, theta: Real) -> ChamberState {
        ChamberState {
            theta,
            volume: self.volume(theta),
            dvolume_dtheta: self.dvolume_dtheta(theta),
            centroid: self.centroid(theta),
        }
    }
}

/// Evaluate a model across a sweep of crank angles.
///
/// Each element is independent; under the `parallel` feature the map is
/// dispatched through rayon with no shared accumulators.
pub fn sweep<M: ChamberModel + Sync>(model: &M, thetas: &[Real]) -> Vec<ChamberState> {
    #[cfg(feature = "parallel")]
    {
        thetas.par_iter().map(|&theta| model.state(theta)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        thetas.iter().map(|&theta| model.state(theta)).collect()
    }
}

/// The angle-independent displaced-volume model.
///
/// `volume` is [`ScrollGeometry::displaced_volume`] for every θ, so the
/// derivative is identically zero and no modular reduction is involved. The
/// model describes the volume swept per revolution rather than a pocket tied
/// to a crank position; its centroid is reported at the fixed scroll center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplacedVolume {
    geometry: ScrollGeometry,
}

impl DisplacedVolume {
    pub const fn new(geometry: ScrollGeometry) -> Self {
        DisplacedVolume { geometry }
    }
}

impl ChamberModel for DisplacedVolume {
    fn volume(&self, _theta: Real) -> Real {
        self.geometry.displaced_volume()
    }

    fn dvolume_dtheta(&self, _theta: Real) -> Real {
        0.0
    }

    fn centroid(&self, _theta: Real) -> Point2<Real> {
        Point2::origin()
    }
}

/// First-harmonic suction pocket model:
/// ```text
/// V(θ)  = V_peak·(1 - cos θ)/2
/// V'(θ) = V_peak·sin θ/2
/// (x̄, ȳ) = (a_x·sin θ, a_y·sin θ)
/// ```
/// with caller-chosen peak volume and centroid amplitudes. Periodic in θ
/// through its trigonometry alone; angles outside `[0, 2π)` need no explicit
/// reduction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicPocket {
    peak_volume: Real,
    centroid_amplitude: Vector2<Real>,
}

impl HarmonicPocket {
    pub const fn new(peak_volume: Real, centroid_amplitude: Vector2<Real>) -> Self {
        HarmonicPocket {
            peak_volume,
            centroid_amplitude,
        }
    }
}

impl ChamberModel for HarmonicPocket {
    fn volume(&self, theta: Real) -> Real {
        0.5 * self.peak_volume * (1.0 - theta.cos())
    }

    fn dvolume_dtheta(&self, theta: Real) -> Real {
        0.5 * self.peak_volume * theta.sin()
    }

    fn centroid(&self, theta: Real) -> Point2<Real> {
        let s = theta.sin();
        Point2::new(self.centroid_amplitude.x * s, self.centroid_amplitude.y * s)
    }
}

/// Selector for the closed set of trapped pockets of a scroll wrap pair.
///
/// The two suction pockets `s1`/`s2` form at the wrap ends, the compression
/// pairs `c1_k`/`c2_k` (k = 1 innermost-formed, up to
/// [`ScrollGeometry::compression_pair_count`]) spiral inward, and the
/// discharge pockets `d1`/`d2` sit at the center until the discharge angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pocket {
    S1,
    S2,
    C1(u32),
    C2(u32),
    D1,
    D2,
}

impl Pocket {
    /// Every pocket of `geometry`, in the order suction, compression pairs
    /// outermost first, discharge.
    pub fn enumerate(geometry: &ScrollGeometry) -> Vec<Pocket> {
        let mut pockets = vec![Pocket::S1, Pocket::S2];
        for k in 1..=geometry.compression_pair_count() {
            pockets.push(Pocket::C1(k));
            pockets.push(Pocket::C2(k));
        }
        pockets.push(Pocket::D1);
        pockets.push(Pocket::D2);
        pockets
    }
}

impl fmt::Display for Pocket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pocket::S1 => write!(f, "s1"),
            Pocket::S2 => write!(f, "s2"),
            Pocket::C1(k) => write!(f, "c1_{}", k),
            Pocket::C2(k) => write!(f, "c2_{}", k),
            Pocket::D1 => write!(f, "d1"),
            Pocket::D2 => write!(f, "d2"),
        }
    }
}

impl FromStr for Pocket {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "s1" => Ok(Pocket::S1),
            "s2" => Ok(Pocket::S2),
            "d1" => Ok(Pocket::D1),
            "d2" => Ok(Pocket::D2),
            _ => {
                let unsupported = || GeometryError::UnsupportedChamberType(s.to_string());
                let index = |rest: &str| rest.parse::<u32>().map_err(|_| unsupported());
                if let Some(rest) = s.strip_prefix("c1_") {
                    Ok(Pocket::C1(index(rest)?))
                } else if let Some(rest) = s.strip_prefix("c2_") {
                    Ok(Pocket::C2(index(rest)?))
                } else {
                    Err(unsupported())
                }
            },
        }
    }
}

/// Which scroll a pocket flank lies on. The fixed wrap is evaluated in place;
/// the orbiting wrap is the mirrored involute registered by the crank-angle
/// phase shift Θ = φ_ie - θ - π/2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Branch {
    Fixed,
    Orbiting,
}

/// One involute flank of a pocket at a specific crank angle: branch, initial
/// angle and the involute angle interval it spans.
#[derive(Debug, Clone, Copy)]
struct Flank {
    branch: Branch,
    initial_angle: Real,
    phi_min: Real,
    phi_max: Real,
}

impl Flank {
    const fn is_empty(&self) -> bool {
        self.phi_max < self.phi_min
    }
}

/// The general trapped-pocket model: volume by Green's theorem over the two
/// involute flanks and the two closing line segments, scaled by the wrap
/// height.
///
/// Not periodic: the flank intervals shift linearly with θ, and a pocket
/// whose interval has emptied (e.g. the discharge pockets past
/// [`ScrollGeometry::discharge_angle`]) reports zero volume rather than
/// wrapping around.
///
/// The volume derivative is a symmetric difference with a fixed small step,
/// the suction separation angle has no closed-form derivative. Near the
/// angles where a pocket forms or vanishes the difference straddles the
/// clamp to zero.
///
/// The centroid is the polygonal centroid of the sampled pocket boundary at
/// the resolution chosen at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrappedPocket {
    geometry: ScrollGeometry,
    pocket: Pocket,
    boundary_steps: usize,
}

impl TrappedPocket {
    /// Bind a pocket selector to a geometry.
    ///
    /// # Errors
    /// `UnsupportedChamberType` when a compression index is zero or exceeds
    /// the geometry's compression pair count.
    pub fn new(geometry: ScrollGeometry, pocket: Pocket) -> Result<Self, GeometryError> {
        if let Pocket::C1(k) | Pocket::C2(k) = pocket {
            if k == 0 || k > geometry.compression_pair_count() {
                return Err(GeometryError::UnsupportedChamberType(pocket.to_string()));
            }
        }
        Ok(TrappedPocket {
            geometry,
            pocket,
            boundary_steps: 64,
        })
    }

    /// Override the boundary sampling resolution used for the centroid.
    pub const fn with_boundary_steps(mut self, steps: usize) -> Self {
        self.boundary_steps = steps;
        self
    }

    #[inline]
    pub const fn pocket(&self) -> Pocket {
        self.pocket
    }

    /// Suction separation angle φ_ssa(θ): the involute angle at which the
    /// suction pocket separates from the intake region.
    fn suction_separation_angle(&self, theta: Real) -> Real {
        let g = &self.geometry;
        let ratio = g.orbiting_radius() / g.base_radius();
        let a = g.inner_initial_angle() - g.sweep_end() + ratio * theta.cos();
        let b = 1.0 + ratio * theta.sin();
        let s = (a * a + b * b - 1.0).max(0.0).sqrt();
        let delta = 2.0 * ((a + s) / (b + 1.0)).atan();
        g.sweep_end() - PI + delta
    }

    /// Flank intervals of this pocket at crank angle θ. Side-2 pockets are
    /// the side-1 intervals with the fixed/orbiting roles swapped.
    fn flanks(&self, theta: Real) -> (Flank, Flank) {
        let g = &self.geometry;
        let phi_i0 = g.inner_initial_angle();
        let phi_o0 = g.outer_initial_angle();
        let phi_e = g.sweep_end();
        let phi_s = g.sweep_start();
        let pairs = g.compression_pair_count() as Real;

        let (outer_branch, inner_branch) = match self.pocket {
            Pocket::S1 | Pocket::C1(_) | Pocket::D1 => (Branch::Fixed, Branch::Orbiting),
            Pocket::S2 | Pocket::C2(_) | Pocket::D2 => (Branch::Orbiting, Branch::Fixed),
        };

        let (outer_min, outer_max, inner_min, inner_max) = match self.pocket {
            Pocket::S1 | Pocket::S2 => (
                phi_e - theta,
                phi_e,
                phi_e - theta - PI,
                self.suction_separation_angle(theta),
            ),
            Pocket::C1(k) | Pocket::C2(k) => {
                let k = k as Real;
                (
                    phi_e - theta - TAU * k,
                    phi_e - theta - TAU * (k - 1.0),
                    phi_e - theta - PI - TAU * k,
                    phi_e - theta - PI - TAU * (k - 1.0),
                )
            },
            Pocket::D1 | Pocket::D2 => (
                phi_s + PI,
                phi_e - theta - TAU * pairs,
                phi_s,
                phi_e - theta - PI - TAU * pairs,
            ),
        };

        (
            Flank {
                branch: outer_branch,
                initial_angle: phi_i0,
                phi_min: outer_min,
                phi_max: outer_max,
            },
            Flank {
                branch: inner_branch,
                initial_angle: phi_o0,
                phi_min: inner_min,
                phi_max: inner_max,
            },
        )
    }

    /// Point on a flank at involute angle φ. Fixed-branch points are the raw
    /// involute; orbiting-branch points are mirrored and offset by the
    /// orbiting radius at the phase shift Θ = φ_ie - θ - π/2.
    fn flank_xy(&self, branch: Branch, initial_angle: Real, phi: Real, theta: Real) -> (Real, Real) {
        let g = &self.geometry;
        let (x, y) = involute_xy(g.base_radius(), initial_angle, phi);
        match branch {
            Branch::Fixed => (x, y),
            Branch::Orbiting => {
                let shift = g.sweep_end() - theta - FRAC_PI_2;
                (
                    -x + g.orbiting_radius() * shift.cos(),
                    -y + g.orbiting_radius() * shift.sin(),
                )
            },
        }
    }

    /// Green's theorem area anti-derivative along a fixed-scroll involute.
    fn area_antiderivative_fixed(&self, phi: Real, initial_angle: Real) -> Real {
        let rb = self.geometry.base_radius();
        phi * rb * rb / 6.0
            * (phi * phi - 3.0 * phi * initial_angle + 3.0 * initial_angle * initial_angle)
    }

    /// Green's theorem area anti-derivative along an orbiting-scroll involute
    /// at crank angle θ.
    fn area_antiderivative_orbiting(&self, phi: Real, initial_angle: Real, theta: Real) -> Real {
        let g = &self.geometry;
        let rb = g.base_radius();
        let ro = g.orbiting_radius();
        let shift = g.sweep_end() - theta - FRAC_PI_2;
        let term1 = rb
            * (phi * phi * phi - 3.0 * phi * phi * initial_angle
                + 3.0 * phi * initial_angle * initial_angle);
        let term2 = 3.0 * (phi - initial_angle) * ro * (phi - shift).cos();
        let term3 = -3.0 * ro * (phi - shift).sin();
        rb / 6.0 * (term1 + term2 + term3)
    }

    fn flank_area(&self, flank: &Flank, from: Real, to: Real, theta: Real) -> Real {
        match flank.branch {
            Branch::Fixed => {
                self.area_antiderivative_fixed(to, flank.initial_angle)
                    - self.area_antiderivative_fixed(from, flank.initial_angle)
            },
            Branch::Orbiting => {
                self.area_antiderivative_orbiting(to, flank.initial_angle, theta)
                    - self.area_antiderivative_orbiting(from, flank.initial_angle, theta)
            },
        }
    }

    /// Sampled pocket outline at crank angle θ: the outer flank traversed
    /// forward, then the inner flank reversed, `steps + 1` points each.
    /// Empty when the pocket has not formed (or has vanished) at this θ.
    pub fn boundary(&self, theta: Real, steps: usize) -> Vec<Point2<Real>> {
        let (outer, inner) = self.flanks(theta);
        if outer.is_empty() || inner.is_empty() {
            return Vec::new();
        }
        let steps = steps.max(1);
        let mut outline = Vec::with_capacity(2 * (steps + 1));
        for phi in linspace(outer.phi_min, outer.phi_max, steps + 1) {
            let (x, y) = self.flank_xy(outer.branch, outer.initial_angle, phi, theta);
            outline.push(Point2::new(x, y));
        }
        for phi in linspace(inner.phi_min, inner.phi_max, steps + 1).into_iter().rev() {
            let (x, y) = self.flank_xy(inner.branch, inner.initial_angle, phi, theta);
            outline.push(Point2::new(x, y));
        }
        outline
    }
}

impl ChamberModel for TrappedPocket {
    fn volume(&self, theta: Real) -> Real {
        let (outer, inner) = self.flanks(theta);
        if outer.is_empty() || inner.is_empty() {
            return 0.0;
        }

        // Outer flank traversed forward, inner flank backward.
        let area_outer = self.flank_area(&outer, outer.phi_min, outer.phi_max, theta);
        let area_inner = self.flank_area(&inner, inner.phi_max, inner.phi_min, theta);

        let p_outer_max = self.flank_xy(outer.branch, outer.initial_angle, outer.phi_max, theta);
        let p_outer_min = self.flank_xy(outer.branch, outer.initial_angle, outer.phi_min, theta);
        let p_inner_max = self.flank_xy(inner.branch, inner.initial_angle, inner.phi_max, theta);
        let p_inner_min = self.flank_xy(inner.branch, inner.initial_angle, inner.phi_min, theta);

        let closing = line_area(p_outer_max, p_inner_max) + line_area(p_inner_min, p_outer_min);

        self.geometry.height() * (area_outer + area_inner + closing)
    }

    fn dvolume_dtheta(&self, theta: Real) -> Real {
        (self.volume(theta + DERIVATIVE_STEP) - self.volume(theta - DERIVATIVE_STEP))
            / (2.0 * DERIVATIVE_STEP)
    }

    fn centroid(&self, theta: Real) -> Point2<Real> {
        let outline = self.boundary(theta, self.boundary_steps);
        if outline.len() < 3 {
            return Point2::origin();
        }
        match closed_ring(&outline).centroid() {
            Some(c) => Point2::new(c.x(), c.y()),
            None => Point2::origin(),
        }
    }
}

/// Signed area contribution of the line segment from `p1` to `p2`.
#[inline]
fn line_area(p1: (Real, Real), p2: (Real, Real)) -> Real {
    0.5 * (p1.0 * p2.1 - p2.0 * p1.1)
}

#[cfg(test)]
mod test {
    use super::*;

    fn reference() -> ScrollGeometry {
        ScrollGeometry::new(0.0015834, 0.0, -1.39626, 0.0, 17.7195, 0.00795902).unwrap()
    }

    #[test]
    fn pocket_selector_round_trips() {
        for name in ["s1", "s2", "c1_1", "c2_2", "d1", "d2"] {
            let pocket: Pocket = name.parse().unwrap();
            assert_eq!(pocket.to_string(), name);
        }
    }

    #[test]
    fn unknown_selectors_are_unsupported() {
        for name in ["s3", "dd", "c3_1", "c1_", "c1_x", "suction", ""] {
            assert_eq!(
                name.parse::<Pocket>(),
                Err(GeometryError::UnsupportedChamberType(name.to_string())),
                "selector {:?} should be rejected",
                name
            );
        }
    }

    #[test]
    fn compression_index_is_validated() {
        let g = reference();
        assert!(TrappedPocket::new(g, Pocket::C1(1)).is_ok());
        assert!(TrappedPocket::new(g, Pocket::C2(2)).is_ok());
        assert!(matches!(
            TrappedPocket::new(g, Pocket::C1(0)),
            Err(GeometryError::UnsupportedChamberType(_))
        ));
        assert!(matches!(
            TrappedPocket::new(g, Pocket::C2(3)),
            Err(GeometryError::UnsupportedChamberType(_))
        ));
    }

    #[test]
    fn enumerate_lists_every_pocket_once() {
        let g = reference();
        let pockets = Pocket::enumerate(&g);
        assert_eq!(
            pockets,
            vec![
                Pocket::S1,
                Pocket::S2,
                Pocket::C1(1),
                Pocket::C2(1),
                Pocket::C1(2),
                Pocket::C2(2),
                Pocket::D1,
                Pocket::D2,
            ]
        );
    }

    #[test]
    fn suction_pocket_starts_empty() {
        let g = reference();
        let s1 = TrappedPocket::new(g, Pocket::S1).unwrap();
        assert!(s1.volume(0.0).abs() < 1e-12);
    }

    #[test]
    fn discharge_pocket_vanishes_past_discharge_angle() {
        let g = reference();
        let d1 = TrappedPocket::new(g, Pocket::D1).unwrap();
        assert!(d1.volume(g.discharge_angle() - 0.05) != 0.0);
        assert_eq!(d1.volume(g.discharge_angle() + 0.05), 0.0);
        assert!(d1.boundary(g.discharge_angle() + 0.05, 32).is_empty());
    }
}
