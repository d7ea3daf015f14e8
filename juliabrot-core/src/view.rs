use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::complex::Complex;
use crate::error::CoreError;
use crate::fractal::FractalMode;
use crate::sample_grid::SampleGrid;
use crate::viewport::Viewport;

/// Direction of a keyboard pan step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Up,
    Down,
    Left,
    Right,
}

/// The complex-plane region and rendering mode currently selected.
///
/// Only the input layer mutates a `ViewState`; renderers take it by
/// reference and treat it as frame-constant. All mutators keep `zoom`
/// inside `[MIN_ZOOM, MAX_ZOOM]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    /// Plane point shown at the middle of the viewport.
    pub center: Complex,

    /// Constant iterated in Julia mode.
    pub julia_constant: Complex,

    /// Magnification: the viewport spans `1 / zoom` plane units horizontally.
    pub zoom: f64,

    pub mode: FractalMode,
}

impl ViewState {
    pub const DEFAULT_ZOOM: f64 = 0.25;

    /// Multiplicative zoom applied per wheel notch or key press.
    pub const ZOOM_STEP: f64 = 1.1;

    /// Widest allowed view (a 1000-unit span).
    pub const MIN_ZOOM: f64 = 1e-3;

    /// Deepest allowed view. Beyond this, adjacent pixels stop being
    /// distinguishable in `f64` around points of magnitude ~1.
    pub const MAX_ZOOM: f64 = 1e12;

    pub fn new(mode: FractalMode) -> Self {
        Self {
            center: Complex::ZERO,
            julia_constant: Complex::ZERO,
            zoom: Self::DEFAULT_ZOOM,
            mode,
        }
    }

    /// Return a copy with an explicit zoom, rejecting non-positive or
    /// non-finite values.
    pub fn with_zoom(self, zoom: f64) -> crate::Result<Self> {
        if !(zoom > 0.0) || !zoom.is_finite() {
            return Err(CoreError::InvalidZoom(zoom));
        }
        Ok(Self {
            zoom: zoom.clamp(Self::MIN_ZOOM, Self::MAX_ZOOM),
            ..self
        })
    }

    /// Restore the default framing. The active mode is kept.
    pub fn reset(&mut self) {
        *self = Self::new(self.mode);
    }

    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    /// Scale zoom by `factor` around the current center.
    pub fn zoom_by(&mut self, factor: f64) {
        if !(factor > 0.0) || !factor.is_finite() {
            return;
        }
        let target = self.zoom * factor;
        self.zoom = target.clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
        if self.zoom != target {
            debug!(target, zoom = self.zoom, "Zoom clamped");
        }
    }

    pub fn zoom_in(&mut self) {
        self.zoom_by(Self::ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.zoom_by(1.0 / Self::ZOOM_STEP);
    }

    /// Scale zoom by `factor` keeping the plane point under pixel
    /// `(px, py)` fixed on screen.
    pub fn zoom_at(&mut self, factor: f64, px: f64, py: f64, viewport: &Viewport) {
        let Some(grid) = SampleGrid::new(self, viewport) else {
            return;
        };
        let anchor = grid.subpixel(px, py);
        let old_zoom = self.zoom;
        self.zoom_by(factor);
        let ratio = old_zoom / self.zoom;
        self.center = anchor + (self.center - anchor) * ratio;
    }

    /// Drag the view by a pixel delta. Content follows the pointer, so the
    /// center moves opposite to the drag.
    pub fn pan(&mut self, dx: f64, dy: f64, viewport: &Viewport) {
        if let Some(delta) = self.pixel_delta_to_plane(dx, dy, viewport) {
            self.center -= delta;
        }
    }

    /// Drag the Julia constant by a pixel delta, using the same scale as
    /// [`pan`](Self::pan).
    pub fn pan_julia_constant(&mut self, dx: f64, dy: f64, viewport: &Viewport) {
        if let Some(delta) = self.pixel_delta_to_plane(dx, dy, viewport) {
            self.julia_constant -= delta;
        }
    }

    /// Move the center by half a view width in the given direction.
    ///
    /// The imaginary axis points down the screen, so "up" decreases `im`.
    pub fn step(&mut self, direction: PanDirection) {
        let half = 1.0 / (self.zoom * 2.0);
        match direction {
            PanDirection::Up => self.center -= Complex::I * half,
            PanDirection::Down => self.center += Complex::I * half,
            PanDirection::Left => self.center -= Complex::from(half),
            PanDirection::Right => self.center += Complex::from(half),
        }
    }

    /// `delta_plane = delta_pixels / (zoom · dimension)`, per axis.
    fn pixel_delta_to_plane(&self, dx: f64, dy: f64, viewport: &Viewport) -> Option<Complex> {
        if viewport.is_empty() || !(self.zoom > 0.0) {
            return None;
        }
        Some(Complex::new(
            dx / (self.zoom * viewport.width as f64),
            dy / (self.zoom * viewport.height as f64),
        ))
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(FractalMode::Mandelbrot)
    }
}
