//! Core stroke data model.
//!
//! A drawing is an ordered list of committed [`Stroke`]s. Each stroke is
//! either a pressure-sensitive pen line (a polyline of [`PenPoint`]s that is
//! smoothed at paint time) or a bristle-brush stroke (a list of
//! [`BristleDab`]s, each carrying the randomly synthesized bristles it was
//! painted with so that replay is deterministic).

use crate::id::StrokeId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ─── Colors ──────────────────────────────────────────────────────────────

/// RGBA color. Stored as 4 × f32 [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Helper to parse a single hex digit.
pub fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Color {
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a hex color string: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.
    /// The string may optionally start with `#`.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();

        let short = |i: usize| hex_val(bytes[i]).map(|v| (v * 17) as f32 / 255.0);
        let long = |i: usize| {
            let hi = hex_val(bytes[i])?;
            let lo = hex_val(bytes[i + 1])?;
            Some((hi << 4 | lo) as f32 / 255.0)
        };

        match bytes.len() {
            3 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, 1.0)),
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            6 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, 1.0)),
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// Emit as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }

    /// Emit as a CSS color string accepted by Canvas2D and SVG.
    pub fn to_css(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("rgba({r}, {g}, {b}, {})", self.a)
        }
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Lift every RGB channel by `amount` percent of full scale.
    pub fn brighten(&self, amount: f32) -> Self {
        let delta = amount / 100.0;
        Self::rgba(
            (self.r + delta).clamp(0.0, 1.0),
            (self.g + delta).clamp(0.0, 1.0),
            (self.b + delta).clamp(0.0, 1.0),
            self.a,
        )
    }

    /// Lower HSL lightness by `amount` percent.
    pub fn darken(&self, amount: f32) -> Self {
        let (h, s, l) = self.to_hsl();
        let l = (l - amount / 100.0).clamp(0.0, 1.0);
        Self::from_hsl(h, s, l, self.a)
    }

    /// Hue in [0, 1), saturation and lightness in [0, 1].
    pub fn to_hsl(&self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let l = (max + min) / 2.0;
        if max == min {
            return (0.0, 0.0, l);
        }
        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == self.r {
            (self.g - self.b) / d + if self.g < self.b { 6.0 } else { 0.0 }
        } else if max == self.g {
            (self.b - self.r) / d + 2.0
        } else {
            (self.r - self.g) / d + 4.0
        };
        (h / 6.0, s, l)
    }

    pub fn from_hsl(h: f32, s: f32, l: f32, a: f32) -> Self {
        if s == 0.0 {
            return Self::rgba(l, l, l, a);
        }
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Self::rgba(
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
            a,
        )
    }
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

// ─── Points ──────────────────────────────────────────────────────────────

/// A position in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// A pen sample: canvas position plus the smoothed line width at that sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenPoint {
    pub x: f32,
    pub y: f32,
    pub line_width: f32,
}

impl PenPoint {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

// ─── Bristles ────────────────────────────────────────────────────────────

/// One strand of a bristle brush.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bristle {
    /// Distance from the brush edge, across the stroke.
    pub distance: f32,
    pub thickness: f32,
    pub color: Color,
}

/// The bristle set of one brush dab. Usually fits inline.
pub type Bristles = SmallVec<[Bristle; 8]>;

/// One bristle-brush segment between two consecutive samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BristleDab {
    pub origin: Point,
    pub destination: Point,
    /// Heading at the origin, radians.
    pub from_angle: f32,
    /// Heading at the destination, radians.
    pub to_angle: f32,
    /// Total brush width the bristle offsets are centered on.
    pub width: f32,
    pub bristles: Bristles,
}

// ─── Path data ───────────────────────────────────────────────────────────

/// A single path command in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCmd {
    MoveTo(f32, f32),
    LineTo(f32, f32),
    QuadTo(f32, f32, f32, f32), // control, end
}

// ─── Strokes ─────────────────────────────────────────────────────────────

/// Which renderer produced a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushKind {
    Pen,
    Bristle,
}

impl BrushKind {
    pub fn name(self) -> &'static str {
        match self {
            BrushKind::Pen => "pen",
            BrushKind::Bristle => "bristle",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pen" => Some(BrushKind::Pen),
            "bristle" | "brush" => Some(BrushKind::Bristle),
            _ => None,
        }
    }
}

/// The geometry of a stroke, per renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StrokeBody {
    Pen(Vec<PenPoint>),
    Bristle(Vec<BristleDab>),
}

/// One continuous gesture from press to release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub id: StrokeId,
    /// Base color. Bristle strokes vary around it per bristle.
    pub color: Color,
    pub body: StrokeBody,
}

impl Stroke {
    pub fn new(color: Color, body: StrokeBody) -> Self {
        Self {
            id: StrokeId::next(),
            color,
            body,
        }
    }

    pub fn kind(&self) -> BrushKind {
        match self.body {
            StrokeBody::Pen(_) => BrushKind::Pen,
            StrokeBody::Bristle(_) => BrushKind::Bristle,
        }
    }

    /// Number of recorded samples (pen points or bristle dabs).
    pub fn len(&self) -> usize {
        match &self.body {
            StrokeBody::Pen(points) => points.len(),
            StrokeBody::Bristle(dabs) => dabs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_forms() {
        let c = Color::from_hex("#FF8000").unwrap();
        assert_eq!(c.to_rgba8(), [255, 128, 0, 255]);
        let short = Color::from_hex("f00").unwrap();
        assert_eq!(short.to_rgba8(), [255, 0, 0, 255]);
        let alpha = Color::from_hex("#00000080").unwrap();
        assert_eq!(alpha.to_rgba8()[3], 128);
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#GGGGGG").is_none());
    }

    #[test]
    fn hex_emit_roundtrip() {
        assert_eq!(Color::from_hex("#3A7BD5").unwrap().to_hex(), "#3A7BD5");
        assert_eq!(Color::from_hex("#3A7BD580").unwrap().to_hex(), "#3A7BD580");
    }

    #[test]
    fn brighten_lifts_channels_and_clamps() {
        let c = Color::rgba(0.5, 0.95, 0.0, 1.0).brighten(10.0);
        assert!((c.r - 0.6).abs() < 1e-5);
        assert_eq!(c.g, 1.0);
        assert!((c.b - 0.1).abs() < 1e-5);
    }

    #[test]
    fn darken_lowers_lightness() {
        let c = Color::from_hex("#3A7BD5").unwrap();
        let (_, _, l0) = c.to_hsl();
        let (_, _, l1) = c.darken(10.0).to_hsl();
        assert!((l0 - l1 - 0.1).abs() < 1e-4);
        assert_eq!(Color::BLACK.darken(10.0), Color::BLACK);
    }

    #[test]
    fn hsl_roundtrip_preserves_color() {
        let c = Color::from_hex("#C0392B").unwrap();
        let (h, s, l) = c.to_hsl();
        assert_eq!(Color::from_hsl(h, s, l, 1.0).to_rgba8(), c.to_rgba8());
    }

    #[test]
    fn brush_kind_names() {
        assert_eq!(BrushKind::from_name("pen"), Some(BrushKind::Pen));
        assert_eq!(BrushKind::from_name("bristle"), Some(BrushKind::Bristle));
        assert_eq!(BrushKind::from_name("marker"), None);
        assert_eq!(BrushKind::Bristle.name(), "bristle");
    }
}
