//! Angle helpers for the sector ring.
//!
//! The ring lies in the XZ plane with +Y up. Angle zero points along +X and
//! angles grow toward +Z.

use std::f32::consts::TAU;

use nalgebra::Rotation3;

use super::{Point3, Vector3};

/// Wraps an angle into `[0, 2π)`.
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Angular width of one sector.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sector_step(segment_count: u32) -> f32 {
    TAU / segment_count as f32
}

/// Angle of the leading edge of `sector`, without reducing it onto the ring.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn sector_angle(sector: u32, segment_count: u32) -> f32 {
    sector as f32 * sector_step(segment_count)
}

/// Unit direction from the ring center toward `angle`.
#[must_use]
pub fn radial_dir(angle: f32) -> Vector3 {
    Vector3::new(angle.cos(), 0.0, angle.sin())
}

/// Point on the ring of `radius` at `angle`, lifted to height `y`.
#[must_use]
pub fn ring_point(angle: f32, radius: f32, y: f32) -> Point3 {
    Point3::new(angle.cos() * radius, y, angle.sin() * radius)
}

/// Rotates `v` by `angle` radians around the vertical axis.
///
/// A rotation of `-π/2` turns the radial direction at some angle into the
/// direction of increasing angle along the ring.
#[must_use]
pub fn rotate_about_vertical(v: &Vector3, angle: f32) -> Vector3 {
    Rotation3::from_axis_angle(&Vector3::y_axis(), angle) * v
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn wrap_keeps_range() {
        assert_abs_diff_eq!(wrap_angle(-FRAC_PI_2), 3.0 * FRAC_PI_2, epsilon = 1e-6);
        assert_abs_diff_eq!(wrap_angle(5.0 * PI), PI, epsilon = 1e-5);
        assert_abs_diff_eq!(wrap_angle(0.25), 0.25);
        assert!(wrap_angle(-1e-9) < TAU);
        assert!(wrap_angle(TAU) < TAU);
    }

    #[test]
    fn sector_angles_cover_ring() {
        assert_abs_diff_eq!(sector_step(4), FRAC_PI_2);
        assert_abs_diff_eq!(sector_angle(2, 4), PI);
        // unreduced past the ring
        assert_abs_diff_eq!(sector_angle(6, 4), 3.0 * PI);
    }

    #[test]
    fn ring_point_lies_on_circle() {
        let p = ring_point(1.1, 5.0, 0.2);
        assert_abs_diff_eq!(p.x.hypot(p.z), 5.0, epsilon = 1e-5);
        assert_abs_diff_eq!(p.y, 0.2);
    }

    #[test]
    fn quarter_turn_gives_ring_tangent() {
        let r = radial_dir(0.0);
        let forward = rotate_about_vertical(&r, -FRAC_PI_2);
        assert_abs_diff_eq!(forward, Vector3::z(), epsilon = 1e-6);
        let backward = rotate_about_vertical(&r, FRAC_PI_2);
        assert_abs_diff_eq!(backward, -Vector3::z(), epsilon = 1e-6);

        let a = 0.7;
        let t = rotate_about_vertical(&radial_dir(a), -FRAC_PI_2);
        assert_abs_diff_eq!(t, Vector3::new(-a.sin(), 0.0, a.cos()), epsilon = 1e-6);
    }
}
