//! Base-radius sizing against a target displaced volume.
//!
//! Wrap profiles in a similarity family (fixed involute angles, height tied
//! to thickness) have a displaced volume that is a strictly monotonic cubic
//! in the base radius, so the sizing problem is root-finding over a bracket,
//! not a fixed-step scan.

use crate::errors::GeometryError;
use crate::float_types::{PI, Real};
use crate::scroll::ScrollGeometry;

const MAX_BISECTIONS: usize = 200;

/// The shape family a wrap is sized within: involute angles and the
/// height-to-thickness ratio are held while the base radius scales.
///
/// Derived per candidate base radius r_b:
/// ```text
/// t_s = r_b·(φ_i0 - φ_o0)
/// h   = ratio·t_s
/// r_o = π·r_b - t_s
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WrapProfile {
    /// Initial angle φ_i0 of the inner involute branch (rad).
    pub inner_initial_angle: Real,
    /// Initial angle φ_o0 of the outer involute branch (rad).
    pub outer_initial_angle: Real,
    /// End angle φ_ie = φ_oe of both branches (rad).
    pub end_angle: Real,
    /// Wrap height as a multiple of the wrap thickness.
    pub height_to_thickness: Real,
}

/// A realized sizing: the solved base radius and the dimensions it implies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sizing {
    pub base_radius: Real,
    pub wrap_thickness: Real,
    pub height: Real,
    pub orbiting_radius: Real,
    pub displaced_volume: Real,
}

impl WrapProfile {
    /// Closed-form displaced volume of the profile at base radius `r_b`:
    /// `V = -π·h·r_b·r_o·(3π - 2·φ_ie + φ_i0 + φ_o0)`.
    pub fn displaced_volume(&self, base_radius: Real) -> Real {
        let thickness = base_radius * (self.inner_initial_angle - self.outer_initial_angle);
        let height = self.height_to_thickness * thickness;
        let orbiting_radius = PI * base_radius - thickness;
        -PI * height
            * base_radius
            * orbiting_radius
            * (3.0 * PI - 2.0 * self.end_angle + self.inner_initial_angle + self.outer_initial_angle)
    }

    /// The full [`ScrollGeometry`] of this profile at base radius `r_b`,
    /// swept from angle zero.
    pub fn scroll_geometry(&self, base_radius: Real) -> Result<ScrollGeometry, GeometryError> {
        let thickness = base_radius * (self.inner_initial_angle - self.outer_initial_angle);
        ScrollGeometry::new(
            base_radius,
            self.inner_initial_angle,
            self.outer_initial_angle,
            0.0,
            self.end_angle,
            self.height_to_thickness * thickness,
        )
    }

    fn sizing(&self, base_radius: Real) -> Sizing {
        let wrap_thickness = base_radius * (self.inner_initial_angle - self.outer_initial_angle);
        Sizing {
            base_radius,
            wrap_thickness,
            height: self.height_to_thickness * wrap_thickness,
            orbiting_radius: PI * base_radius - wrap_thickness,
            displaced_volume: self.displaced_volume(base_radius),
        }
    }
}

/// Find the base radius in `bracket = (lo, hi)` whose displaced volume equals
/// `target_volume`, by bisection on the closed-form expression. The bracket
/// width converges below `tolerance` (metres).
///
/// # Errors
/// `RootNotFound` when the bracket is empty or the volumes at its endpoints
/// do not straddle the target.
pub fn solve_base_radius(
    profile: &WrapProfile,
    target_volume: Real,
    bracket: (Real, Real),
    tolerance: Real,
) -> Result<Sizing, GeometryError> {
    let (mut lo, mut hi) = bracket;
    let not_found = GeometryError::RootNotFound {
        lo: bracket.0,
        hi: bracket.1,
    };
    if !(hi > lo) {
        return Err(not_found);
    }

    let residual = |radius: Real| profile.displaced_volume(radius) - target_volume;
    let mut residual_lo = residual(lo);
    let residual_hi = residual(hi);
    if residual_lo == 0.0 {
        return Ok(profile.sizing(lo));
    }
    if residual_hi == 0.0 {
        return Ok(profile.sizing(hi));
    }
    if residual_lo * residual_hi > 0.0 {
        return Err(not_found);
    }

    for _ in 0..MAX_BISECTIONS {
        let mid = 0.5 * (lo + hi);
        let residual_mid = residual(mid);
        if residual_mid == 0.0 || hi - lo < tolerance {
            return Ok(profile.sizing(mid));
        }
        if residual_lo * residual_mid < 0.0 {
            hi = mid;
        } else {
            lo = mid;
            residual_lo = residual_mid;
        }
    }
    Ok(profile.sizing(0.5 * (lo + hi)))
}
