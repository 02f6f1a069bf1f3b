//! Immutable scroll wrap configuration shared by every kernel operation.

use crate::errors::GeometryError;
use crate::float_types::{PI, Real, TAU};
use crate::involute::linspace;
use nalgebra::Vector2;

/// Physical configuration of one scroll wrap pair.
///
/// Constructed once per design scenario and immutable thereafter. Both
/// involute branches share the base radius and the `sweep_start..sweep_end`
/// evaluation domain; their initial angles differ, which is what gives the
/// wrap its material thickness t_s = r_b·(φ_i0 - φ_o0).
///
/// Validation happens here, not inside the curve math: a geometry that
/// constructs successfully is physically meaningful everywhere downstream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollGeometry {
    base_radius: Real,
    inner_initial_angle: Real,
    outer_initial_angle: Real,
    sweep_start: Real,
    sweep_end: Real,
    height: Real,
    orbiting_radius: Real,
}

impl ScrollGeometry {
    /// Build a geometry with the orbiting radius derived from the standard
    /// meshing condition r_o = π·r_b - t_s.
    ///
    /// # Errors
    /// `InvalidBaseRadius`, `InvalidWrapThickness`, `InvalidHeight`,
    /// `InvalidSweep` or `InvalidOrbitingRadius` when the corresponding input
    /// (or derived value) is out of range.
    pub fn new(
        base_radius: Real,
        inner_initial_angle: Real,
        outer_initial_angle: Real,
        sweep_start: Real,
        sweep_end: Real,
        height: Real,
    ) -> Result<Self, GeometryError> {
        let thickness = base_radius * (inner_initial_angle - outer_initial_angle);
        Self::with_orbiting_radius(
            base_radius,
            inner_initial_angle,
            outer_initial_angle,
            sweep_start,
            sweep_end,
            height,
            base_radius * PI - thickness,
        )
    }

    /// Build a geometry with an explicitly supplied orbiting radius.
    #[allow(clippy::too_many_arguments)]
    pub fn with_orbiting_radius(
        base_radius: Real,
        inner_initial_angle: Real,
        outer_initial_angle: Real,
        sweep_start: Real,
        sweep_end: Real,
        height: Real,
        orbiting_radius: Real,
    ) -> Result<Self, GeometryError> {
        if base_radius <= 0.0 {
            return Err(GeometryError::InvalidBaseRadius(base_radius));
        }
        let thickness = base_radius * (inner_initial_angle - outer_initial_angle);
        if thickness <= 0.0 {
            return Err(GeometryError::InvalidWrapThickness(thickness));
        }
        // NaN sweeps fail here too
        if !(sweep_end > sweep_start) {
            return Err(GeometryError::InvalidSweep {
                start: sweep_start,
                end: sweep_end,
            });
        }
        if height <= 0.0 {
            return Err(GeometryError::InvalidHeight(height));
        }
        if orbiting_radius <= 0.0 {
            return Err(GeometryError::InvalidOrbitingRadius(orbiting_radius));
        }
        Ok(ScrollGeometry {
            base_radius,
            inner_initial_angle,
            outer_initial_angle,
            sweep_start,
            sweep_end,
            height,
            orbiting_radius,
        })
    }

    /// Radius of the involute generating circle (m).
    #[inline]
    pub const fn base_radius(&self) -> Real {
        self.base_radius
    }

    /// Initial angle φ_i0 of the inner involute branch (rad).
    #[inline]
    pub const fn inner_initial_angle(&self) -> Real {
        self.inner_initial_angle
    }

    /// Initial angle φ_o0 of the outer involute branch (rad).
    #[inline]
    pub const fn outer_initial_angle(&self) -> Real {
        self.outer_initial_angle
    }

    /// Start of the angular evaluation domain (rad).
    #[inline]
    pub const fn sweep_start(&self) -> Real {
        self.sweep_start
    }

    /// End of the angular evaluation domain (rad), also the involute end
    /// angle φ_ie = φ_oe of both branches.
    #[inline]
    pub const fn sweep_end(&self) -> Real {
        self.sweep_end
    }

    /// Scroll wrap height (m).
    #[inline]
    pub const fn height(&self) -> Real {
        self.height
    }

    /// Eccentricity between the fixed and orbiting scroll centers (m).
    #[inline]
    pub const fn orbiting_radius(&self) -> Real {
        self.orbiting_radius
    }

    /// Material thickness between the two involute branches,
    /// t_s = r_b·(φ_i0 - φ_o0).
    #[inline]
    pub fn wrap_thickness(&self) -> Real {
        self.base_radius * (self.inner_initial_angle - self.outer_initial_angle)
    }

    /// Rigid-body translation of the orbiting scroll at crank angle θ:
    /// `(r_o·cos θ, r_o·sin θ)`. Orbiting motion is pure translation, the
    /// orbiting scroll never rotates.
    #[inline]
    pub fn orbit_offset(&self, crank_angle: Real) -> Vector2<Real> {
        Vector2::new(
            self.orbiting_radius * crank_angle.cos(),
            self.orbiting_radius * crank_angle.sin(),
        )
    }

    /// Volume displaced per revolution:
    /// ```text
    /// V_disp = -π·h·r_b·r_o·(3π - 2·φ_ie + φ_i0 + φ_o0)
    /// ```
    /// Angle-independent by construction; see
    /// [`DisplacedVolume`](crate::chamber::DisplacedVolume).
    pub fn displaced_volume(&self) -> Real {
        -PI * self.height
            * self.base_radius
            * self.orbiting_radius
            * (3.0 * PI - 2.0 * self.sweep_end + self.inner_initial_angle + self.outer_initial_angle)
    }

    /// Number of closed compression chamber pairs,
    /// N_c = ⌊(φ_oe - φ_os - π) / 2π⌋.
    pub fn compression_pair_count(&self) -> u32 {
        ((self.sweep_end - self.sweep_start - PI) / TAU).floor().max(0.0) as u32
    }

    /// Crank angle at which the innermost compression pair opens to the
    /// discharge region, θ_d = φ_oe - φ_os - 2π·N_c - π. The discharge
    /// pockets collapse to zero volume past this angle.
    pub fn discharge_angle(&self) -> Real {
        self.sweep_end - self.sweep_start - TAU * (self.compression_pair_count() as Real) - PI
    }

    /// Uniform sampling of the shared `sweep_start..sweep_end` domain, the
    /// default domain for composing wraps. Resolution is a caller choice.
    pub fn sample_angles(&self, segments: usize) -> Vec<Real> {
        linspace(self.sweep_start, self.sweep_end, segments)
    }
}
