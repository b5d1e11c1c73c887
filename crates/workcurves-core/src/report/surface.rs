//! Surface export for 3D plotting.
//!
//! Each curve becomes a row of 24 points: x = hour (1-24), y = the curve's
//! activity level, z = mean minutes active in that hour, colored by the
//! curve's mean self-report.

use serde::{Deserialize, Serialize};

use crate::curves::{Curve, CurveCollection};

/// Which value places a curve on the activity-level axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelAxis {
    /// Midpoint of the curve's window (falls back to the total when unknown)
    #[default]
    WindowMidpoint,
    /// Sum of the curve's mean profile
    CurveTotal,
}

impl LevelAxis {
    /// Level of `curve` on this axis.
    pub fn level(&self, curve: &Curve) -> f64 {
        match self {
            LevelAxis::WindowMidpoint => curve.midpoint().unwrap_or_else(|| curve.total_activity()),
            LevelAxis::CurveTotal => curve.total_activity(),
        }
    }
}

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Viridis anchor colors at t = 0, 0.25, 0.5, 0.75, 1.
const VIRIDIS: [Rgb; 5] = [
    Rgb::new(68, 1, 84),
    Rgb::new(59, 82, 139),
    Rgb::new(33, 145, 140),
    Rgb::new(94, 201, 98),
    Rgb::new(253, 231, 37),
];

/// Perceptual (viridis) color for `t`, clamped to [0, 1]. NaN maps to the low end.
pub fn color_scale(t: f64) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let segments = (VIRIDIS.len() - 1) as f64;
    let scaled = t * segments;
    let idx = (scaled.floor() as usize).min(VIRIDIS.len() - 2);
    let frac = scaled - idx as f64;

    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (lo, hi) = (VIRIDIS[idx], VIRIDIS[idx + 1]);
    Rgb::new(lerp(lo.r, hi.r), lerp(lo.g, hi.g), lerp(lo.b, hi.b))
}

/// One vertex of the work-curve surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfacePoint {
    /// Hour of day, 1-24
    pub hour: u8,
    /// Activity level of the curve this point belongs to
    pub level: f64,
    /// Mean minutes active in this hour
    pub activity: f64,
    /// The curve's mean self-report
    pub self_report: f64,
    /// Self-report through the color scale, `#rrggbb`
    pub color: String,
}

/// Flatten a curve collection into surface points, curve by curve in emitted order.
pub fn surface(collection: &CurveCollection, axis: LevelAxis) -> Vec<SurfacePoint> {
    collection
        .iter()
        .flat_map(|curve| {
            let level = axis.level(curve);
            let color = color_scale(curve.self_report).to_hex();
            curve
                .profile
                .iter()
                .enumerate()
                .map(move |(h, &activity)| SurfacePoint {
                    hour: h as u8 + 1,
                    level,
                    activity,
                    self_report: curve.self_report,
                    color: color.clone(),
                })
        })
        .collect()
}
