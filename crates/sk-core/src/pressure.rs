//! Pressure → line width mapping.
//!
//! Raw device force (0..1) is scaled by a multiplier, passed through a
//! response curve, and multiplied by a base width. Successive widths are
//! then smoothed with an exponential moving average so sensor noise does
//! not show up as abrupt width jumps.

use serde::{Deserialize, Serialize};

/// Response curve applied to `multiplier × pressure`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseCurve {
    /// `x`
    Linear,
    /// `ln(1 + x)`
    Logarithmic,
}

impl ResponseCurve {
    pub fn apply(self, x: f32) -> f32 {
        match self {
            ResponseCurve::Linear => x,
            ResponseCurve::Logarithmic => x.ln_1p(),
        }
    }
}

/// Maps device pressure to a line width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PressureMapping {
    pub base_width: f32,
    pub multiplier: f32,
    pub curve: ResponseCurve,
    /// EMA weight of the newest sample. `1.0` disables smoothing.
    pub smoothing: f32,
    /// Curve input used when a device reports a force of zero.
    pub zero_force: f32,
}

impl PressureMapping {
    /// Pen defaults: `40 · ln(1 + p)`, smoothed 0.2 / 0.8.
    pub const PEN: PressureMapping = PressureMapping {
        base_width: 40.0,
        multiplier: 1.0,
        curve: ResponseCurve::Logarithmic,
        smoothing: 0.2,
        zero_force: 0.1,
    };

    /// Bristle defaults: `20 · 15p`, unsmoothed.
    pub const BRISTLE: PressureMapping = PressureMapping {
        base_width: 20.0,
        multiplier: 15.0,
        curve: ResponseCurve::Linear,
        smoothing: 1.0,
        zero_force: 1.0,
    };

    /// Width for a pressure in [0, 1]. Out-of-range input is clamped.
    pub fn width(&self, pressure: f32) -> f32 {
        let p = if pressure.is_nan() { 0.0 } else { pressure.clamp(0.0, 1.0) };
        self.base_width * self.curve.apply(self.multiplier * p)
    }

    /// Width for a device without force sensing (mouse input): the curve
    /// is fed a unit input.
    pub fn unpressured_width(&self) -> f32 {
        self.base_width * self.curve.apply(1.0)
    }

    /// Width for a touch that reports a force of zero.
    pub fn zero_force_width(&self) -> f32 {
        self.base_width * self.curve.apply(self.zero_force)
    }

    /// Width for an optional device force.
    pub fn resolve(&self, force: Option<f32>) -> f32 {
        match force {
            None => self.unpressured_width(),
            Some(f) if f > 0.0 => self.width(f),
            Some(_) => self.zero_force_width(),
        }
    }

    pub fn smoother(&self) -> WidthSmoother {
        WidthSmoother::new(self.smoothing)
    }
}

impl Default for PressureMapping {
    fn default() -> Self {
        Self::PEN
    }
}

/// Exponential moving average over line widths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidthSmoother {
    alpha: f32,
    current: Option<f32>,
}

impl WidthSmoother {
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            current: None,
        }
    }

    /// Feed a computed width and return the smoothed one. The first
    /// sample after a reset is taken as-is.
    pub fn push(&mut self, width: f32) -> f32 {
        let next = match self.current {
            None => width,
            Some(prev) => self.alpha * width + (1.0 - self.alpha) * prev,
        };
        self.current = Some(next);
        next
    }

    pub fn current(&self) -> Option<f32> {
        self.current
    }

    pub fn reset(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_monotonic(mapping: PressureMapping) {
        let mut prev = mapping.width(0.0);
        for i in 1..=1000 {
            let p = i as f32 / 1000.0;
            let w = mapping.width(p);
            assert!(w >= prev, "width({p}) = {w} < {prev}");
            prev = w;
        }
    }

    #[test]
    fn pen_width_is_monotonic() {
        assert_monotonic(PressureMapping::PEN);
    }

    #[test]
    fn bristle_width_is_monotonic() {
        assert_monotonic(PressureMapping::BRISTLE);
    }

    #[test]
    fn pen_full_pressure_width() {
        let w = PressureMapping::PEN.width(1.0);
        assert!((w - 40.0 * std::f32::consts::LN_2).abs() < 1e-4);
    }

    #[test]
    fn bristle_scales_linearly() {
        assert_eq!(PressureMapping::BRISTLE.width(0.5), 150.0);
        assert_eq!(PressureMapping::BRISTLE.width(0.0), 0.0);
    }

    #[test]
    fn missing_force_uses_unit_input() {
        assert_eq!(PressureMapping::BRISTLE.resolve(None), 20.0);
        assert_eq!(PressureMapping::BRISTLE.resolve(Some(0.0)), 20.0);
        assert_eq!(
            PressureMapping::PEN.resolve(None),
            PressureMapping::PEN.width(1.0)
        );
    }

    #[test]
    fn pen_zero_force_draws_thin() {
        let pen = PressureMapping::PEN;
        let w = pen.resolve(Some(0.0));
        assert!((w - 40.0 * 0.1_f32.ln_1p()).abs() < 1e-4, "got {w}");
        assert!(w < pen.resolve(None));
        assert!(w < pen.width(0.2));
        assert_eq!(pen.resolve(Some(f32::NAN)), w);
    }

    #[test]
    fn out_of_range_pressure_is_clamped() {
        let m = PressureMapping::PEN;
        assert_eq!(m.width(2.0), m.width(1.0));
        assert_eq!(m.width(-1.0), 0.0);
        assert_eq!(m.width(f32::NAN), 0.0);
    }

    #[test]
    fn smoother_first_sample_verbatim_then_ema() {
        let mut s = WidthSmoother::new(0.2);
        assert_eq!(s.push(10.0), 10.0);
        let w = s.push(20.0);
        assert!((w - 12.0).abs() < 1e-5, "got {w}");
        s.reset();
        assert_eq!(s.current(), None);
        assert_eq!(s.push(5.0), 5.0);
    }

    #[test]
    fn unit_alpha_disables_smoothing() {
        let mut s = WidthSmoother::new(1.0);
        s.push(10.0);
        assert_eq!(s.push(30.0), 30.0);
    }
}
