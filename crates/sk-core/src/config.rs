//! Drawing-surface configuration.
//!
//! Every field has a default matching the stock brushes; hosts may pass a
//! partial JSON object to override individual values.

use crate::model::{BrushKind, Color};
use crate::pressure::{PressureMapping, ResponseCurve};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Default brush color.
pub const DEFAULT_COLOR: Color = Color::BLACK;

/// Default backing-store scale relative to the displayed canvas size.
pub const DEFAULT_SCALE_FACTOR: f32 = 2.0;

/// Default per-bristle brightness variance, in percent.
pub const DEFAULT_VARY_BRIGHTNESS: f32 = 10.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid surface config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid surface config: {field} must be {expected}")]
    OutOfRange {
        field: &'static str,
        expected: &'static str,
    },
}

/// Configuration for a `DrawingSurface`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Brush selected when the surface is created. Default: **bristle**.
    pub brush: BrushKind,

    /// Initial stroke color.
    #[serde(serialize_with = "color_to_hex", deserialize_with = "color_from_hex")]
    pub color: Color,

    /// Pressure response of the pen. Partial objects are completed from
    /// the pen defaults.
    #[serde(deserialize_with = "pen_mapping")]
    pub pen: PressureMapping,

    /// Pressure response of the bristle brush. Partial objects are
    /// completed from the bristle defaults.
    #[serde(deserialize_with = "bristle_mapping")]
    pub bristle: PressureMapping,

    /// Brightness variance applied per bristle, in percent.
    pub vary_brightness: f32,

    /// Backing-store pixels per CSS pixel.
    pub scale_factor: f32,

    /// Fixed RNG seed for bristle synthesis. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            brush: BrushKind::Bristle,
            color: DEFAULT_COLOR,
            pen: PressureMapping::PEN,
            bristle: PressureMapping::BRISTLE,
            vary_brightness: DEFAULT_VARY_BRIGHTNESS,
            scale_factor: DEFAULT_SCALE_FACTOR,
            seed: None,
        }
    }
}

impl SurfaceConfig {
    /// Parse a (possibly partial) JSON config. Empty input yields defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SurfaceConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.scale_factor > 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "scale_factor",
                expected: "positive",
            });
        }
        if !(0.0..=100.0).contains(&self.vary_brightness) {
            return Err(ConfigError::OutOfRange {
                field: "vary_brightness",
                expected: "within 0..=100",
            });
        }
        for (field, mapping) in [("pen", &self.pen), ("bristle", &self.bristle)] {
            if !(mapping.smoothing > 0.0 && mapping.smoothing <= 1.0) {
                return Err(ConfigError::OutOfRange {
                    field,
                    expected: "a mapping with smoothing within (0, 1]",
                });
            }
            if !(mapping.base_width >= 0.0 && mapping.multiplier >= 0.0) {
                return Err(ConfigError::OutOfRange {
                    field,
                    expected: "a mapping with non-negative width and multiplier",
                });
            }
            if !(mapping.zero_force >= 0.0) {
                return Err(ConfigError::OutOfRange {
                    field,
                    expected: "a mapping with non-negative zero_force",
                });
            }
        }
        Ok(())
    }

    /// Pressure mapping for the given brush.
    pub fn mapping(&self, kind: BrushKind) -> &PressureMapping {
        match kind {
            BrushKind::Pen => &self.pen,
            BrushKind::Bristle => &self.bristle,
        }
    }
}

/// A pressure mapping with every field optional.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MappingPatch {
    base_width: Option<f32>,
    multiplier: Option<f32>,
    curve: Option<ResponseCurve>,
    smoothing: Option<f32>,
    zero_force: Option<f32>,
}

impl MappingPatch {
    fn over(self, base: PressureMapping) -> PressureMapping {
        PressureMapping {
            base_width: self.base_width.unwrap_or(base.base_width),
            multiplier: self.multiplier.unwrap_or(base.multiplier),
            curve: self.curve.unwrap_or(base.curve),
            smoothing: self.smoothing.unwrap_or(base.smoothing),
            zero_force: self.zero_force.unwrap_or(base.zero_force),
        }
    }
}

fn pen_mapping<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PressureMapping, D::Error> {
    Ok(MappingPatch::deserialize(deserializer)?.over(PressureMapping::PEN))
}

fn bristle_mapping<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<PressureMapping, D::Error> {
    Ok(MappingPatch::deserialize(deserializer)?.over(PressureMapping::BRISTLE))
}

fn color_to_hex<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&color.to_hex())
}

fn color_from_hex<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
    let s = String::deserialize(deserializer)?;
    Color::from_hex(&s).ok_or_else(|| serde::de::Error::custom(format!("invalid color `{s}`")))
}
