//! Bristle brush synthesis.
//!
//! A brush of width `w` is made of `round(w / 3)` bristles spread across the
//! width with jittered spacing. Each bristle gets a random thickness and a
//! brightness-varied copy of the base color.

use crate::model::{Bristle, Bristles, Color};
use fastrand::Rng;

/// Bristle spacing in pixels per bristle.
pub const BRISTLE_SPACING: f32 = 3.0;

/// Number of bristles for a brush of the given width.
pub fn bristle_count(width: f32) -> usize {
    if !width.is_finite() || width <= 0.0 {
        return 0;
    }
    (width / BRISTLE_SPACING).round() as usize
}

/// Randomly brighten or darken `base` by up to `vary` percent.
///
/// Draws `amount ∈ [0, 2·vary]`; above `vary` brightens by the excess,
/// otherwise darkens by `amount`.
pub fn vary_color(base: Color, vary: f32, rng: &mut Rng) -> Color {
    let amount = (rng.f32() * 2.0 * vary).round();
    if amount > vary {
        base.brighten(amount - vary)
    } else {
        base.darken(amount)
    }
}

/// Build a fresh bristle set for a brush of `width`.
pub fn synthesize(width: f32, base: Color, vary: f32, rng: &mut Rng) -> Bristles {
    let count = bristle_count(width);
    let mut bristles = Bristles::with_capacity(count);
    if count == 0 {
        return bristles;
    }
    let gap = width / count as f32;
    for i in 0..count {
        let distance = if i == 0 {
            0.0
        } else {
            gap * i as f32 + rng.f32() * gap / 2.0 - gap / 2.0
        };
        bristles.push(Bristle {
            distance,
            thickness: rng.f32() * 2.0 + 2.0,
            color: vary_color(base, vary, rng),
        });
    }
    log::trace!("synthesized {count} bristles for width {width}");
    bristles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_is_rounded_third_of_width() {
        let mut rng = Rng::with_seed(7);
        for w in [1.0_f32, 1.5, 4.4, 4.5, 20.0, 33.0, 150.0, 300.0] {
            let b = synthesize(w, Color::BLACK, 10.0, &mut rng);
            assert_eq!(b.len(), (w / 3.0).round() as usize, "width {w}");
        }
    }

    #[test]
    fn degenerate_widths_have_no_bristles() {
        assert_eq!(bristle_count(0.0), 0);
        assert_eq!(bristle_count(-5.0), 0);
        assert_eq!(bristle_count(f32::NAN), 0);
        assert_eq!(bristle_count(1.0), 0);
    }

    #[test]
    fn same_seed_same_brush() {
        let base = Color::from_hex("#3A7BD5").unwrap();
        let a = synthesize(20.0, base, 10.0, &mut Rng::with_seed(42));
        let b = synthesize(20.0, base, 10.0, &mut Rng::with_seed(42));
        assert_eq!(a, b);
    }

    #[test]
    fn bristles_stay_within_expected_bounds() {
        let mut rng = Rng::with_seed(3);
        let width = 30.0;
        let gap = width / 10.0;
        let b = synthesize(width, Color::BLACK, 10.0, &mut rng);
        assert_eq!(b[0].distance, 0.0);
        for (i, bristle) in b.iter().enumerate().skip(1) {
            let center = gap * i as f32;
            assert!(bristle.distance >= center - gap / 2.0 - 1e-4);
            assert!(bristle.distance < center + 1e-4);
        }
        for bristle in &b {
            assert!(bristle.thickness >= 2.0 && bristle.thickness < 4.0);
        }
    }

    #[test]
    fn varied_color_stays_near_base() {
        let base = Color::rgba(0.5, 0.5, 0.5, 1.0);
        let mut rng = Rng::with_seed(11);
        for _ in 0..200 {
            let c = vary_color(base, 10.0, &mut rng);
            assert!((c.r - base.r).abs() <= 0.1 + 1e-4);
            assert_eq!(c.a, 1.0);
        }
    }
}
