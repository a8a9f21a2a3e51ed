//! Electromagnetic wave drawing.
//!
//! The electric field is drawn in the canvas plane. The magnetic field is
//! perpendicular to it, so it is drawn at half amplitude and sheared by a
//! fixed perspective skew to suggest depth.

use std::f32::consts::TAU;
use serde::Serialize;

/// Wave speed in display units: `wavelength = WAVE_SPEED / frequency`.
pub const WAVE_SPEED: f32 = 20.0;
pub const CANVAS_WIDTH: f32 = 500.0;
pub const CANVAS_HEIGHT: f32 = 300.0;
/// Pixels per display unit along the propagation axis.
pub const PX_PER_UNIT: f32 = 25.0;
/// Horizontal and vertical shear applied to the magnetic curve per unit of field.
pub const PERSPECTIVE_SKEW: (f32, f32) = (0.5, 0.5);
pub const DEFAULT_STEPS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmWave {
    pub frequency: f32,
    pub amplitude: f32,
}

/// Both field curves for one slider setting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WavePaths {
    pub wavelength: f32,
    pub electric: Vec<Point>,
    pub magnetic: Vec<Point>,
}

impl EmWave {
    pub fn new(frequency: f32, amplitude: f32) -> Self {
        Self { frequency, amplitude }
    }

    /// Zero for a non-positive frequency.
    pub fn wavelength(&self) -> f32 {
        if self.frequency > 0.0 {
            WAVE_SPEED / self.frequency
        } else {
            0.0
        }
    }

    /// Normalized field value at canvas x. Flat when there is no wavelength.
    fn field(&self, x: f32) -> f32 {
        let wavelength = self.wavelength();
        if wavelength <= 0.0 {
            return 0.0;
        }
        (TAU * x / (wavelength * PX_PER_UNIT)).sin()
    }

    /// Sample both curves at `steps + 1` evenly spaced x positions across
    /// the canvas.
    pub fn paths(&self, steps: usize) -> WavePaths {
        let mid = CANVAS_HEIGHT / 2.0;
        let half = self.amplitude / 2.0;
        let denom = steps.max(1) as f32;

        let mut electric = Vec::with_capacity(steps + 1);
        let mut magnetic = Vec::with_capacity(steps + 1);
        for i in 0..=steps {
            let x = CANVAS_WIDTH * i as f32 / denom;
            let s = self.field(x);
            electric.push(Point { x, y: mid - self.amplitude * s });
            magnetic.push(Point {
                x: x + half * s * PERSPECTIVE_SKEW.0,
                y: mid + half * s * PERSPECTIVE_SKEW.1,
            });
        }

        WavePaths {
            wavelength: self.wavelength(),
            electric,
            magnetic,
        }
    }
}

/// SVG path data: `M x y L x y ...`.
pub fn svg_path(points: &[Point]) -> String {
    let mut out = String::with_capacity(points.len() * 16);
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        if i > 0 {
            out.push(' ');
        }
        out.push_str(&format!("{cmd} {:.2} {:.2}", p.x, p.y));
    }
    out
}

/// What the host needs to redraw the wave panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaveDrawing {
    pub wavelength: f32,
    pub wavelength_label: String,
    pub electric_path: String,
    pub magnetic_path: String,
    pub points: usize,
}

impl From<&WavePaths> for WaveDrawing {
    fn from(paths: &WavePaths) -> Self {
        Self {
            wavelength: paths.wavelength,
            wavelength_label: format!("{:.1}", paths.wavelength),
            electric_path: svg_path(&paths.electric),
            magnetic_path: svg_path(&paths.magnetic),
            points: paths.electric.len(),
        }
    }
}
