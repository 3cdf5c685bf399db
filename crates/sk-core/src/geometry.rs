//! Brush heading and bristle placement.
//!
//! Headings are radians measured the way `atan2` measures them, shifted by
//! a quarter turn so that a heading of 0 lays bristles out perpendicular to
//! the direction of travel.

use crate::model::{BristleDab, PathCmd, Point};
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// Rotate `distance` around `origin` by `angle`.
pub fn rotate_point(distance: f32, angle: f32, origin: Point) -> Point {
    Point::new(
        origin.x + distance * angle.cos(),
        origin.y + distance * angle.sin(),
    )
}

/// Bearing from `origin` to `destination`, reduced by remainder into
/// (−2π, 2π). The sign of the remainder follows the dividend.
pub fn bearing(origin: Point, destination: Point) -> f32 {
    ((destination.y - origin.y).atan2(destination.x - origin.x) - FRAC_PI_2) % TAU
}

/// Shortest signed rotation taking `from` to `to`. Always in (−π, π].
pub fn angle_delta(from: f32, to: f32) -> f32 {
    let d = (to - from).rem_euclid(TAU);
    if d > PI { d - TAU } else { d }
}

/// Heading for the segment `origin → destination`.
///
/// Without a previous heading this is the plain bearing. Otherwise the
/// previous heading is turned by the shorter way round towards the
/// bearing, so the brush never flips across the ±π seam.
pub fn next_heading(origin: Point, destination: Point, previous: Option<f32>) -> f32 {
    let target = bearing(origin, destination);
    match previous {
        None => target,
        Some(old) => old + angle_delta(old, target),
    }
}

/// Reduce a heading for storage between samples.
pub fn wrap_heading(angle: f32) -> f32 {
    angle % TAU
}

/// Path for one bristle of a dab.
///
/// The bristle sits `bristle_distance − width/2` off the centerline. Its
/// origin is placed with the old heading, its destination with the new
/// one, and the origin rotated by the new heading is the control point.
pub fn bristle_path(dab: &BristleDab, bristle_distance: f32) -> [PathCmd; 3] {
    let offset = bristle_distance - dab.width / 2.0;
    let start = rotate_point(offset, dab.from_angle, dab.origin);
    let control = rotate_point(offset, dab.to_angle, dab.origin);
    let end = rotate_point(offset, dab.to_angle, dab.destination);
    [
        PathCmd::MoveTo(start.x, start.y),
        PathCmd::QuadTo(control.x, control.y, end.x, end.y),
        PathCmd::LineTo(end.x, end.y),
    ]
}
