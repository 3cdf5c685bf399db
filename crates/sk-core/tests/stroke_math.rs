//! Integration tests: brush geometry, pressure and bristle synthesis
//! (sk-core).

use pretty_assertions::assert_eq;
use sk_core::brush::{bristle_count, synthesize};
use sk_core::config::SurfaceConfig;
use sk_core::geometry::{angle_delta, bearing, next_heading};
use sk_core::model::{BrushKind, Color, Point};
use sk_core::pressure::PressureMapping;
use sk_core::Rng;
use std::f32::consts::{PI, TAU};

#[test]
fn bristle_count_follows_width() {
    let mut rng = Rng::with_seed(42);
    for width in [3.0_f32, 7.5, 12.0, 20.0, 33.3, 60.0] {
        let bristles = synthesize(width, Color::BLACK, 10.0, &mut rng);
        assert_eq!(bristles.len(), (width / 3.0).round() as usize, "width {width}");
        assert_eq!(bristles.len(), bristle_count(width));
    }
}

#[test]
fn bristles_stay_within_thickness_range() {
    let mut rng = Rng::with_seed(1);
    let bristles = synthesize(45.0, Color::BLACK, 10.0, &mut rng);
    for b in &bristles {
        assert!((2.0..=4.0).contains(&b.thickness), "thickness {}", b.thickness);
        assert!(b.distance >= 0.0);
    }
    let mut distances: Vec<f32> = bristles.iter().map(|b| b.distance).collect();
    let sorted = {
        let mut d = distances.clone();
        d.sort_by(f32::total_cmp);
        d
    };
    assert_eq!(distances, sorted, "bristles are laid out across the brush");
    distances.dedup();
    assert_eq!(distances.len(), bristles.len());
}

#[test]
fn same_seed_same_bristles() {
    let a = synthesize(30.0, Color::BLACK, 10.0, &mut Rng::with_seed(9));
    let b = synthesize(30.0, Color::BLACK, 10.0, &mut Rng::with_seed(9));
    assert_eq!(a, b);
}

#[test]
fn heading_turns_never_exceed_half_a_turn() {
    let origin = Point::new(0.0, 0.0);
    let mut previous = None;
    for i in 0..64 {
        let theta = i as f32 * 0.7;
        let dest = Point::new(theta.cos() * 10.0, theta.sin() * 10.0);
        let heading = next_heading(origin, dest, previous);
        if let Some(prev) = previous {
            let turn = heading - prev;
            assert!(turn > -PI - 1e-4 && turn <= PI + 1e-4, "turn {turn}");
        }
        previous = Some(heading % TAU);
    }
}

#[test]
fn delta_then_bearing_agree() {
    let a = Point::new(10.0, 10.0);
    let b = Point::new(20.0, 5.0);
    let target = bearing(a, b);
    for from in [-5.0_f32, -1.0, 0.0, 2.0, 6.0] {
        let d = angle_delta(from, target);
        let landed = (from + d).rem_euclid(TAU);
        assert!((landed - target.rem_euclid(TAU)).abs() < 1e-4);
    }
}

#[test]
fn stock_mappings_are_monotone() {
    for mapping in [PressureMapping::PEN, PressureMapping::BRISTLE] {
        let mut last = mapping.width(0.0);
        for i in 1..=20 {
            let w = mapping.width(i as f32 / 20.0);
            assert!(w >= last);
            last = w;
        }
        assert!(mapping.width(2.0) == mapping.width(1.0), "pressure is clamped");
    }
}

#[test]
fn config_selects_mapping_per_brush() {
    let config = SurfaceConfig::from_json(r#"{"bristle":{"base_width":30}}"#).unwrap();
    assert_eq!(config.mapping(BrushKind::Bristle).base_width, 30.0);
    assert_eq!(
        config.mapping(BrushKind::Bristle).multiplier,
        PressureMapping::BRISTLE.multiplier
    );
    assert_eq!(config.mapping(BrushKind::Pen), &PressureMapping::PEN);
}
