// main.rs
//
// Minimal example of each kernel operation: compose the reference wrap pair,
// tabulate chamber volumes over a revolution, and size a base radius for a
// displacement target.

use scrollrs::ScrollGeometry;
use scrollrs::chamber::{self, Pocket, TrappedPocket};
use scrollrs::float_types::{M3_TO_CC, TAU};
use scrollrs::involute::linspace;
use scrollrs::sizing::{WrapProfile, solve_base_radius};
use scrollrs::wrap::{compose_orbiting_wrap, compose_wrap, mirrored};

fn main() -> Result<(), scrollrs::GeometryError> {
    // Bell (2010) reference wrap
    let geometry = ScrollGeometry::new(0.0015834, 0.0, -1.39626, 0.0, 17.7195, 0.00795902)?;

    // Wrap outlines the way a renderer or exporter consumes them: the fixed
    // scroll mirrored, the orbiting scroll translated to a quarter turn.
    let angles = geometry.sample_angles(1000);
    let fixed = mirrored(&compose_wrap(&geometry, &angles, &angles)?);
    let orbiting = compose_orbiting_wrap(&geometry, &angles, &angles, TAU / 4.0)?;
    println!(
        "fixed wrap: {} points, orbiting wrap: {} points",
        fixed.len(),
        orbiting.len()
    );
    println!(
        "displaced volume: {:.2} cc/rev, discharge angle: {:.4} rad",
        geometry.displaced_volume() * M3_TO_CC,
        geometry.discharge_angle()
    );

    // Chamber volume table over one revolution, one sweep per pocket.
    let thetas = linspace(0.0, TAU, 9);
    let pockets = Pocket::enumerate(&geometry);
    let mut columns = Vec::with_capacity(pockets.len());
    for &pocket in &pockets {
        let model = TrappedPocket::new(geometry, pocket)?;
        columns.push(chamber::sweep(&model, &thetas));
    }
    print!("theta [rad]");
    for pocket in &pockets {
        print!("{:>10}", pocket.to_string());
    }
    println!();
    for (row, &theta) in thetas.iter().enumerate() {
        print!("{:>11.4}", theta);
        for column in &columns {
            print!("{:>10.3}", column[row].volume * M3_TO_CC);
        }
        println!();
    }

    // Size a wrap for a 12 cc machine (6 cc displaced per revolution).
    let profile = WrapProfile {
        inner_initial_angle: 0.0,
        outer_initial_angle: -1.39626,
        end_angle: 17.7195,
        height_to_thickness: 3.6,
    };
    let sizing = solve_base_radius(&profile, 6.0e-6, (1e-4, 4e-3), 1e-10)?;
    println!(
        "sized base radius: {:.5} mm -> {:.2} cc displaced",
        sizing.base_radius * 1e3,
        sizing.displaced_volume * M3_TO_CC
    );

    Ok(())
}
