mod support;

use approx::assert_relative_eq;
use scrollrs::GeometryError;
use scrollrs::float_types::{M3_TO_CC, PI};
use scrollrs::sizing::{WrapProfile, solve_base_radius};

use crate::support::approx_eq;

/// The wrap family of the 12 cc design study: Bell's involute angles with
/// height held at 3.6 wrap thicknesses.
fn bell_profile() -> WrapProfile {
    WrapProfile {
        inner_initial_angle: 0.0,
        outer_initial_angle: -1.39626,
        end_angle: 17.7195,
        height_to_thickness: 3.6,
    }
}

#[test]
fn solved_sizing_realizes_the_target_volume() {
    // A 12 cc machine displaces 6 cc per revolution.
    let profile = bell_profile();
    let sizing = solve_base_radius(&profile, 6.0e-6, (1e-4, 4e-3), 1e-10).unwrap();

    assert_relative_eq!(sizing.displaced_volume, 6.0e-6, max_relative = 1e-6);
    assert!(approx_eq(sizing.displaced_volume * M3_TO_CC, 6.0, 1e-3));

    // Derived dimensions are consistent with the similarity family.
    assert_relative_eq!(
        sizing.wrap_thickness,
        sizing.base_radius * (profile.inner_initial_angle - profile.outer_initial_angle),
    );
    assert_relative_eq!(sizing.height, 3.6 * sizing.wrap_thickness);
    assert_relative_eq!(
        sizing.orbiting_radius,
        PI * sizing.base_radius - sizing.wrap_thickness,
    );
}

#[test]
fn reference_base_radius_prints_three_cc() {
    // The scan of the original design study passes through r_b = 1.5834 mm
    // at 3.00 cc displaced.
    let profile = bell_profile();
    assert!(approx_eq(
        profile.displaced_volume(0.0015834) * M3_TO_CC,
        3.00,
        0.01
    ));

    let target = profile.displaced_volume(0.0015834);
    let sizing = solve_base_radius(&profile, target, (1e-4, 4e-3), 1e-10).unwrap();
    assert_relative_eq!(sizing.base_radius, 0.0015834, max_relative = 1e-6);
}

#[test]
fn profile_geometry_agrees_with_sizing() {
    let profile = bell_profile();
    let sizing = solve_base_radius(&profile, 6.0e-6, (1e-4, 4e-3), 1e-10).unwrap();
    let geometry = profile.scroll_geometry(sizing.base_radius).unwrap();

    assert_relative_eq!(geometry.wrap_thickness(), sizing.wrap_thickness);
    assert_relative_eq!(geometry.height(), sizing.height);
    assert_relative_eq!(geometry.orbiting_radius(), sizing.orbiting_radius);
    assert_relative_eq!(
        geometry.displaced_volume(),
        sizing.displaced_volume,
        max_relative = 1e-12
    );
}

#[test]
fn bisection_tolerance_bounds_the_answer() {
    let profile = bell_profile();
    let expected = solve_base_radius(&profile, 6.0e-6, (1e-4, 4e-3), 1e-12)
        .unwrap()
        .base_radius;
    let coarse = solve_base_radius(&profile, 6.0e-6, (1e-4, 4e-3), 1e-6)
        .unwrap()
        .base_radius;
    assert!((coarse - expected).abs() < 1e-6);
}

#[test]
fn non_straddling_bracket_is_root_not_found() {
    let profile = bell_profile();
    // A full cubic metre is far outside any bracket in millimetres.
    assert_eq!(
        solve_base_radius(&profile, 1.0, (1e-4, 4e-3), 1e-10),
        Err(GeometryError::RootNotFound { lo: 1e-4, hi: 4e-3 })
    );
    // Reversed and empty brackets fail the same way.
    assert_eq!(
        solve_base_radius(&profile, 6.0e-6, (4e-3, 1e-4), 1e-10),
        Err(GeometryError::RootNotFound { lo: 4e-3, hi: 1e-4 })
    );
    assert!(solve_base_radius(&profile, 6.0e-6, (2e-3, 2e-3), 1e-10).is_err());
}
